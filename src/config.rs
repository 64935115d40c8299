use anyhow::{Context, Result, anyhow};
use compute::{ForecastSeries, LoadOptions, loader::DEFAULT_FORECAST_FILE};
use moka::future::Cache;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::schemas::AppState;

/// Where the forecast comes from and how strictly it is checked.
#[derive(Debug, Clone)]
pub struct ForecastConfig {
    pub forecast_path: PathBuf,
    pub load_options: LoadOptions,
}

impl ForecastConfig {
    /// Builds the configuration, falling back to the artifact next to the executable.
    pub fn new(forecast_path: Option<PathBuf>, strict_intervals: bool) -> Result<Self> {
        let forecast_path = match forecast_path {
            Some(path) => path,
            None => default_forecast_path()?,
        };
        debug!(path = %forecast_path.display(), strict_intervals, "Forecast configuration");

        Ok(Self {
            forecast_path,
            load_options: LoadOptions { strict_intervals },
        })
    }
}

/// `sarima_forecast_output.csv` in the directory holding the running binary.
pub fn default_forecast_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Cannot locate the running executable")?;
    let dir = exe
        .parent()
        .ok_or_else(|| anyhow!("Executable path {} has no parent directory", exe.display()))?;
    Ok(dir.join(DEFAULT_FORECAST_FILE))
}

/// Load the forecast through the process-wide cache.
pub fn load_series(config: &ForecastConfig) -> Result<Arc<ForecastSeries>> {
    compute::load_with_options(&config.forecast_path, config.load_options).with_context(|| {
        format!(
            "Failed to load forecast from {}",
            config.forecast_path.display()
        )
    })
}

/// Initialize application state: load the forecast and precompute what does not
/// depend on capacity.
pub fn initialize_app_state(config: &ForecastConfig) -> Result<AppState> {
    let series = load_series(config)?;
    app_state_from_series(series)
}

pub fn app_state_from_series(series: Arc<ForecastSeries>) -> Result<AppState> {
    let weekdays = compute::aggregate(&series);
    let bounds = compute::capacity_bounds(&series)?;
    info!(
        rows = series.len(),
        min = bounds.min,
        max = bounds.max,
        default = bounds.default,
        "Forecast ready"
    );

    // Initialize cache
    let cache = Cache::builder()
        .max_capacity(1000)
        .time_to_live(Duration::from_secs(300)) // 5 minutes
        .build();

    Ok(AppState {
        series,
        weekdays,
        bounds,
        cache,
    })
}
