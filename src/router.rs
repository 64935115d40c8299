use crate::handlers::{
    capacity::{get_breaches, get_capacity_bounds, get_kpis},
    dashboard::get_dashboard,
    forecast::{get_forecast_chart, get_weekday_averages},
    health::health_check,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{Router, routing::get};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Capacity routes
        .route("/api/v1/capacity/bounds", get(get_capacity_bounds))
        .route("/api/v1/kpis", get(get_kpis))
        .route("/api/v1/breaches", get(get_breaches))
        // Forecast routes
        .route("/api/v1/forecast", get(get_forecast_chart))
        .route("/api/v1/weekdays", get(get_weekday_averages))
        .route("/api/v1/dashboard", get(get_dashboard))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
