use thiserror::Error;
use tracing::error;

/// Error types for loading and analysing a forecast
#[derive(Error, Debug)]
pub enum ForecastError {
    /// The artifact is unreadable or does not have the expected shape
    #[error("Malformed forecast input: {0}")]
    MalformedInput(String),

    /// The artifact parsed but holds no forecast rows
    #[error("Forecast series is empty")]
    EmptySeries,

    /// Capacity must be a finite, non-negative number
    #[error("Invalid capacity: {0}")]
    InvalidCapacity(f64),
}

impl From<polars::error::PolarsError> for ForecastError {
    fn from(error: polars::error::PolarsError) -> Self {
        let forecast_error = match error {
            polars::error::PolarsError::IO { .. } => {
                let err = ForecastError::MalformedInput(format!("Unreadable file: {}", error));
                error!(?err, "Forecast artifact could not be read");
                err
            }
            polars::error::PolarsError::NoData(_) => {
                let err = ForecastError::MalformedInput(format!("No data: {}", error));
                error!(?err, "Forecast artifact has no table");
                err
            }
            polars::error::PolarsError::ColumnNotFound(_) => {
                let err = ForecastError::MalformedInput(format!("Column not found: {}", error));
                error!(?err, "Forecast artifact is missing a column");
                err
            }
            polars::error::PolarsError::SchemaMismatch(_) => {
                let err = ForecastError::MalformedInput(format!("Schema mismatch: {}", error));
                error!(?err, "Forecast artifact has an unexpected schema");
                err
            }
            _ => {
                let err = ForecastError::MalformedInput(format!("Parse error: {}", error));
                error!(?err, "Forecast artifact could not be parsed");
                err
            }
        };
        forecast_error
    }
}

/// Type alias for Result with ForecastError
pub type Result<T> = std::result::Result<T, ForecastError>;
