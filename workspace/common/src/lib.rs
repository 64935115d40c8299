//! Common transport-layer types shared between the backend and any dashboard front end.
//! These structs are the payloads the backend handlers return, so a front end can
//! deserialize API responses without duplicating shapes.

mod dashboard;
mod weekday;

pub use dashboard::{
    BreachRow, BreachTable, CapacityBounds, CapacityPoint, Dashboard, ForecastChart,
    ForecastPoint, KpiSummary, WeekdayBar,
};
pub use weekday::DayOfWeek;

use serde::{Deserialize, Serialize};

/// Generic API response wrapper used by the backend.
/// Note: The backend has its own definition in src/schemas.rs with the
/// same field names. We mirror it here for front ends to reuse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}
