use axum::{
    extract::{Query, State},
    response::Json,
};
use common::{BreachTable, CapacityBounds, KpiSummary};
use tracing::{debug, instrument};

use crate::error::AppError;
use crate::helpers::capacity::{cache_key, determine_capacity};
use crate::helpers::converters::{breach_table, kpi_summary};
use crate::schemas::{ApiResponse, AppState, CachedData, CapacityQuery};

/// Get the advisory range and default for the capacity input
#[utoipa::path(
    get,
    path = "/api/v1/capacity/bounds",
    tag = "capacity",
    responses(
        (status = 200, description = "Capacity bounds retrieved successfully", body = crate::schemas::BoundsResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_capacity_bounds(State(state): State<AppState>) -> Json<ApiResponse<CapacityBounds>> {
    Json(ApiResponse::ok(
        state.bounds,
        "Capacity bounds retrieved successfully",
    ))
}

/// Get the KPI readouts for a capacity
#[utoipa::path(
    get,
    path = "/api/v1/kpis",
    tag = "capacity",
    params(
        ("capacity" = Option<f64>, Query, description = "Capacity in visits per day, defaults to the mean forecast"),
    ),
    responses(
        (status = 200, description = "KPIs computed successfully", body = crate::schemas::KpiResponse),
        (status = 400, description = "Invalid capacity", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_kpis(
    Query(query): Query<CapacityQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<KpiSummary>>, AppError> {
    let capacity = compute::check_capacity(determine_capacity(&query, &state.bounds))?;
    let key = cache_key("kpis", capacity);

    if let Some(CachedData::Kpis(kpis)) = state.cache.get(&key).await {
        return Ok(Json(ApiResponse::ok(kpis, "KPIs retrieved from cache")));
    }

    let analysis = compute::analyze(&state.series, capacity)?;
    let kpis = kpi_summary(&analysis);
    debug!(breach_count = kpis.breach_count, "KPIs computed");

    state.cache.insert(key, CachedData::Kpis(kpis.clone())).await;

    Ok(Json(ApiResponse::ok(kpis, "KPIs computed successfully")))
}

/// Get the days forecast above a capacity
#[utoipa::path(
    get,
    path = "/api/v1/breaches",
    tag = "capacity",
    params(
        ("capacity" = Option<f64>, Query, description = "Capacity in visits per day, defaults to the mean forecast"),
    ),
    responses(
        (status = 200, description = "Breach days computed successfully", body = crate::schemas::BreachResponse),
        (status = 400, description = "Invalid capacity", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_breaches(
    Query(query): Query<CapacityQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<BreachTable>>, AppError> {
    let capacity = compute::check_capacity(determine_capacity(&query, &state.bounds))?;
    let key = cache_key("breaches", capacity);

    if let Some(CachedData::Breaches(table)) = state.cache.get(&key).await {
        return Ok(Json(ApiResponse::ok(table, "Breach days retrieved from cache")));
    }

    let analysis = compute::analyze(&state.series, capacity)?;
    let table = breach_table(&analysis);

    state.cache.insert(key, CachedData::Breaches(table.clone())).await;

    let message = if table.is_clear() {
        "No capacity breach predicted in the forecast horizon".to_string()
    } else {
        format!("{} days exceed capacity", table.len())
    };
    Ok(Json(ApiResponse::ok(table, message)))
}
