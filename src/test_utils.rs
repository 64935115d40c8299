use crate::config::app_state_from_series;
use crate::router::create_router;
use crate::schemas::AppState;
use axum::Router;
use chrono::NaiveDate;
use compute::{ForecastRow, ForecastSeries};
use std::sync::Arc;
use tracing::Level;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::FmtSubscriber;

/// Two days: Monday 2024-01-01 at 100 visits, Tuesday 2024-01-02 at 1200.
pub fn scenario_series() -> ForecastSeries {
    ForecastSeries::from_rows(vec![
        ForecastRow::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 100.0, 90.0, 110.0),
        ForecastRow::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 1200.0, 1100.0, 1300.0),
    ])
    .expect("Scenario rows are valid")
}

/// Create AppState for testing
pub fn setup_test_app_state() -> AppState {
    app_state_from_series(Arc::new(scenario_series())).expect("Failed to build test state")
}

/// Initialize tracing for tests with output to STDERR.
///
/// The log level is determined by the RUST_LOG environment variable,
/// defaulting to WARN if not set.
fn init_test_tracing() -> DefaultGuard {
    // Get log level from environment variable or default to WARN
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| match level.to_uppercase().as_str() {
            "ERROR" => Some(Level::ERROR),
            "WARN" => Some(Level::WARN),
            "INFO" => Some(Level::INFO),
            "DEBUG" => Some(Level::DEBUG),
            "TRACE" => Some(Level::TRACE),
            _ => None,
        })
        .unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr) // Output to stderr, which is captured by tests
        .finish();
    tracing::subscriber::set_default(subscriber)
}

/// Create axum app for testing
///
/// Test tracing stays active for as long as the returned guard is held.
pub fn setup_test_app() -> (Router, DefaultGuard) {
    let guard = init_test_tracing();
    (create_router(setup_test_app_state()), guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::subscriber::NoSubscriber;

    #[test]
    fn test_tracing_active_while_guard_held() {
        let (_app, _guard) = setup_test_app();
        let active = tracing::dispatcher::get_default(|dispatch| !dispatch.is::<NoSubscriber>());
        assert!(active);
    }
}
