use chrono::NaiveDate;
use common::{
    BreachRow, BreachTable, CapacityBounds, CapacityPoint, Dashboard, DayOfWeek, ForecastChart,
    ForecastPoint, KpiSummary, WeekdayBar,
};
use compute::{ForecastSeries, WeekdayAverages};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Forecast loaded at startup, read-only for the process lifetime
    pub series: Arc<ForecastSeries>,
    /// Weekday averages, computed once per load
    pub weekdays: WeekdayAverages,
    /// Advisory capacity range, computed once per load
    pub bounds: CapacityBounds,
    /// Cache for capacity-dependent responses
    pub cache: Cache<String, CachedData>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Kpis(KpiSummary),
    Breaches(BreachTable),
    Chart(ForecastChart),
    Dashboard(Dashboard),
}

/// Query parameters for capacity-dependent endpoints
#[derive(Debug, Deserialize, ToSchema)]
pub struct CapacityQuery {
    /// Capacity in visits per day; defaults to the mean forecast
    pub capacity: Option<f64>,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
#[aliases(
    KpiResponse = ApiResponse<KpiSummary>,
    BreachResponse = ApiResponse<BreachTable>,
    ChartResponse = ApiResponse<ForecastChart>,
    WeekdayResponse = ApiResponse<Vec<WeekdayBar>>,
    BoundsResponse = ApiResponse<CapacityBounds>,
    DashboardResponse = ApiResponse<Dashboard>
)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Number of forecast days loaded
    pub forecast_rows: usize,
    /// First forecast day
    pub first_date: Option<NaiveDate>,
    /// Last forecast day
    pub last_date: Option<NaiveDate>,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::capacity::get_capacity_bounds,
        crate::handlers::capacity::get_kpis,
        crate::handlers::capacity::get_breaches,
        crate::handlers::forecast::get_forecast_chart,
        crate::handlers::forecast::get_weekday_averages,
        crate::handlers::dashboard::get_dashboard,
    ),
    components(
        schemas(
            KpiResponse,
            BreachResponse,
            ChartResponse,
            WeekdayResponse,
            BoundsResponse,
            DashboardResponse,
            ErrorResponse,
            HealthResponse,
            CapacityQuery,
            KpiSummary,
            BreachTable,
            BreachRow,
            ForecastChart,
            ForecastPoint,
            CapacityPoint,
            WeekdayBar,
            DayOfWeek,
            CapacityBounds,
            Dashboard,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "capacity", description = "Capacity KPIs and breach days"),
        (name = "forecast", description = "Forecast chart and weekday seasonality"),
        (name = "dashboard", description = "Everything for one capacity value"),
    ),
    info(
        title = "trafficcap API",
        description = "Web traffic forecast dashboard API - capacity breaches and weekday seasonality over a precomputed forecast",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
