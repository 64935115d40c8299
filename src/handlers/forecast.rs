use axum::{
    extract::{Query, State},
    response::Json,
};
use common::{ForecastChart, WeekdayBar};
use tracing::instrument;

use crate::error::AppError;
use crate::helpers::capacity::{cache_key, determine_capacity};
use crate::helpers::converters::{forecast_chart, weekday_bars};
use crate::schemas::{ApiResponse, AppState, CachedData, CapacityQuery};

/// Get the forecast line, confidence band and capacity overlay
#[utoipa::path(
    get,
    path = "/api/v1/forecast",
    tag = "forecast",
    params(
        ("capacity" = Option<f64>, Query, description = "Capacity for the overlay, defaults to the mean forecast"),
    ),
    responses(
        (status = 200, description = "Forecast chart retrieved successfully", body = crate::schemas::ChartResponse),
        (status = 400, description = "Invalid capacity", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_forecast_chart(
    Query(query): Query<CapacityQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ForecastChart>>, AppError> {
    let capacity = compute::check_capacity(determine_capacity(&query, &state.bounds))?;
    let key = cache_key("chart", capacity);

    if let Some(CachedData::Chart(chart)) = state.cache.get(&key).await {
        return Ok(Json(ApiResponse::ok(chart, "Forecast chart retrieved from cache")));
    }

    let chart = forecast_chart(&state.series, capacity);
    state.cache.insert(key, CachedData::Chart(chart.clone())).await;

    Ok(Json(ApiResponse::ok(chart, "Forecast chart retrieved successfully")))
}

/// Get average forecast per weekday, Monday first
#[utoipa::path(
    get,
    path = "/api/v1/weekdays",
    tag = "forecast",
    responses(
        (status = 200, description = "Weekday averages retrieved successfully", body = crate::schemas::WeekdayResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_weekday_averages(State(state): State<AppState>) -> Json<ApiResponse<Vec<WeekdayBar>>> {
    Json(ApiResponse::ok(
        weekday_bars(&state.weekdays),
        "Weekday averages retrieved successfully",
    ))
}
