pub mod request_id;

pub use request_id::{
    request_id_middleware, request_id_of, request_span, RequestId, X_REQUEST_ID,
};

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{health, monitor::MonitorController};
use crate::infrastructure::config::Config;

/// Routes of the monitor panel
pub fn build_router(monitor_controller: Arc<MonitorController>) -> Router {
    let monitor_routes = Router::new()
        .route("/api/services", get(MonitorController::list_services))
        .route("/api/system", get(MonitorController::get_system))
        .route("/api/logs/:service_id", get(MonitorController::get_logs))
        .with_state(monitor_controller);

    Router::new()
        .route("/health", get(health::health))
        .merge(monitor_routes)
        .layer(TraceLayer::new_for_http().make_span_with(request_span::<axum::body::Body>))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(request_id_middleware))
}

/// Serve the monitor panel until the process is stopped
pub async fn start_http_server(
    config: Arc<Config>,
    monitor_controller: Arc<MonitorController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(monitor_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.monitor_host, config.monitor_port))
            .await?;

    tracing::info!("Monitor panel listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
