use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api::{self, AppState};
use crate::config::FloodWatchConfig;
use crate::forecast_service::ForecastService;

/// Full application router: API routes, optional dashboard, CORS and request tracing
pub fn app(config: &FloodWatchConfig, state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = api::router(state);
    if let Some(dir) = &config.server.static_dir {
        tracing::info!("Serving dashboard from {}", dir);
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(cors).layer(TraceLayer::new_for_http())
}

pub async fn run(config: FloodWatchConfig) -> Result<()> {
    let service = ForecastService::from_config(&config)?;
    let app = app(&config, AppState::new(service));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server stopped unexpectedly")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
