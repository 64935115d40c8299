use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace};

use crate::config::{ForecastConfig, initialize_app_state};
use crate::router::create_router;

pub async fn serve(config: &ForecastConfig, bind_address: &str) -> Result<()> {
    trace!("Entering serve function");
    info!("trafficcap starting up");
    debug!("Forecast path: {}", config.forecast_path.display());
    debug!("Bind address: {}", bind_address);

    // Load the forecast; a bad artifact is fatal
    trace!("Initializing application state");
    let state = match initialize_app_state(config) {
        Ok(state) => {
            debug!("Application state initialized successfully");
            state
        }
        Err(e) => {
            error!("Failed to initialize application state: {:#}", e);
            return Err(e);
        }
    };

    // Create router
    trace!("Creating application router");
    let app = create_router(state);
    debug!("Router created successfully");

    // Start server
    info!("Starting server on {}", bind_address);
    let listener = match TcpListener::bind(bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("trafficcap API server running on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
