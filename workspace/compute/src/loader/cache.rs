use cached::{Cached, UnboundCache};
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex};
use tracing::{debug, warn};

use super::{CsvForecastLoader, ForecastLoader, LoadOptions};
use crate::error::Result;
use crate::series::ForecastSeries;

/// A memoizing wrapper for ForecastLoader implementations.
///
/// Series are cached per resolved path for the lifetime of the wrapper. The
/// artifact is static for a deployment, so entries never expire; `clear_cache`
/// exists for tests and tooling. Failed loads are not cached.
pub struct ForecastCacheLoader<
    T: ForecastLoader,
    C: Cached<PathBuf, Arc<ForecastSeries>> = UnboundCache<PathBuf, Arc<ForecastSeries>>,
> {
    /// The wrapped loader
    inner: T,
    /// Loaded series keyed by absolute path
    cache: Arc<Mutex<C>>,
}

impl<T: ForecastLoader, C: Cached<PathBuf, Arc<ForecastSeries>>> ForecastCacheLoader<T, C> {
    /// Creates a cache loader wrapping `inner` with a custom cache store.
    pub fn new_with_store(inner: T, cache_store: C) -> Self {
        Self {
            inner,
            cache: Arc::new(Mutex::new(cache_store)),
        }
    }

    /// Removes all cached series, forcing the next load to read from disk.
    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.cache_clear();
        }
    }

    /// Returns the number of cached series.
    pub fn cache_size(&self) -> usize {
        if let Ok(cache) = self.cache.lock() {
            cache.cache_size()
        } else {
            0
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: ForecastLoader> ForecastCacheLoader<T, UnboundCache<PathBuf, Arc<ForecastSeries>>> {
    /// Creates a cache loader with an unbounded store.
    pub fn new(inner: T) -> Self {
        Self::new_with_store(inner, UnboundCache::new())
    }
}

impl<T: ForecastLoader, C: Cached<PathBuf, Arc<ForecastSeries>>> ForecastLoader
    for ForecastCacheLoader<T, C>
{
    fn load(&self, path: &Path) -> Result<Arc<ForecastSeries>> {
        let key = resolve_path(path);

        // The lock is held across the read so concurrent first loads hit the disk once
        match self.cache.lock() {
            Ok(mut cache) => {
                if let Some(series) = cache.cache_get(&key) {
                    debug!(path = %key.display(), "Forecast served from cache");
                    return Ok(Arc::clone(series));
                }

                let series = self.inner.load(&key)?;
                cache.cache_set(key, Arc::clone(&series));
                Ok(series)
            }
            Err(_) => {
                warn!(path = %key.display(), "Forecast cache lock poisoned, loading uncached");
                self.inner.load(&key)
            }
        }
    }
}

/// Absolute form of `path` used as the cache key.
///
/// Resolution is lexical and never touches the filesystem, so a path maps to
/// the same key whether or not the file still exists.
pub fn resolve_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

static LENIENT_LOADER: LazyLock<ForecastCacheLoader<CsvForecastLoader>> =
    LazyLock::new(|| ForecastCacheLoader::new(CsvForecastLoader::new(LoadOptions::default())));

static STRICT_LOADER: LazyLock<ForecastCacheLoader<CsvForecastLoader>> =
    LazyLock::new(|| ForecastCacheLoader::new(CsvForecastLoader::new(LoadOptions::strict())));

/// Process-wide memoized loader for the given options.
pub fn shared_loader(options: LoadOptions) -> &'static ForecastCacheLoader<CsvForecastLoader> {
    if options.strict_intervals {
        &STRICT_LOADER
    } else {
        &LENIENT_LOADER
    }
}
