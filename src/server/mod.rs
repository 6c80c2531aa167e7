pub mod handlers;
pub mod state;

use crate::config::Config;
use axum::http::{HeaderName, HeaderValue};
use axum::{Router, routing::get};
use state::AppState;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{error, info};

/// Build the application router with all routes and middleware.
///
/// Split out of [`start`] so tests can drive the router directly with
/// `tower::ServiceExt::oneshot`.
pub fn build_router(config: Config) -> Router {
    let state = AppState::new(config);

    Router::new()
        .route("/", get(handlers::health::health_check))
        .route("/health", get(handlers::health::health_check))
        .route("/stream.mpd", get(handlers::manifest::serve_manifest))
        .route("/keys", get(handlers::keys::serve_keys))
        .layer(CorsLayer::permissive())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-keyfront-version"),
            HeaderValue::from_static(env!("CARGO_PKG_VERSION")),
        ))
        .with_state(state)
}

/// Start the Axum HTTP server
pub async fn start(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("0.0.0.0:{}", config.port);

    let app = build_router(config);

    // Bind TCP listener
    let listener = match tokio::net::TcpListener::bind(addr.as_str()).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to address {}: {}", addr, e);
            return Err(e.into());
        }
    };

    info!("🚀 Server listening on http://{}", addr);

    // Start serving
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
