pub mod capacity;
pub mod error;
pub mod loader;
pub mod series;
pub mod weekday;

#[cfg(test)]
mod testing;

use std::path::Path;
use std::sync::Arc;

pub use capacity::{
    CAPACITY_HEADROOM, CapacityAnalysis, analyze, capacity_bounds, check_capacity, truncate_for_display,
};
pub use error::{ForecastError, Result};
pub use loader::{CsvForecastLoader, ForecastLoader, LoadOptions};
pub use series::{ForecastRow, ForecastSeries};
pub use weekday::{WeekdayAverages, aggregate, aggregate_rows};

/// Loads the forecast artifact at `path` through the process-wide cache.
///
/// The first call for a path reads and validates the file; later calls for the
/// same resolved path return the same series without touching the disk.
pub fn load(path: impl AsRef<Path>) -> Result<Arc<ForecastSeries>> {
    load_with_options(path, LoadOptions::default())
}

/// Like [`load`], with explicit interval checking options.
pub fn load_with_options(path: impl AsRef<Path>, options: LoadOptions) -> Result<Arc<ForecastSeries>> {
    loader::cache::shared_loader(options).load(path.as_ref())
}
