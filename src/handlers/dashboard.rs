use axum::{
    extract::{Query, State},
    response::Json,
};
use common::Dashboard;
use tracing::instrument;

use crate::error::AppError;
use crate::helpers::capacity::{cache_key, determine_capacity};
use crate::helpers::converters::build_dashboard;
use crate::schemas::{ApiResponse, AppState, CachedData, CapacityQuery};

/// Get KPIs, chart, weekday bars and breach table for one capacity
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "dashboard",
    params(
        ("capacity" = Option<f64>, Query, description = "Capacity in visits per day, defaults to the mean forecast"),
    ),
    responses(
        (status = 200, description = "Dashboard computed successfully", body = crate::schemas::DashboardResponse),
        (status = 400, description = "Invalid capacity", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_dashboard(
    Query(query): Query<CapacityQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Dashboard>>, AppError> {
    let capacity = compute::check_capacity(determine_capacity(&query, &state.bounds))?;
    let key = cache_key("dashboard", capacity);

    if let Some(CachedData::Dashboard(dashboard)) = state.cache.get(&key).await {
        return Ok(Json(ApiResponse::ok(dashboard, "Dashboard retrieved from cache")));
    }

    let dashboard = build_dashboard(&state.series, &state.weekdays, state.bounds, capacity)?;
    state
        .cache
        .insert(key, CachedData::Dashboard(dashboard.clone()))
        .await;

    Ok(Json(ApiResponse::ok(dashboard, "Dashboard computed successfully")))
}
