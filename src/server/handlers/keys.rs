use crate::{drm, error::Result, server::state::AppState};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{info, warn};

/// Resolve the ClearKey pair for the configured manifest.
///
/// A manifest without a generic ContentProtection marker is the caller's
/// problem (400), not a server failure.
pub async fn serve_keys(State(state): State<AppState>) -> Result<Response> {
    info!("Resolving keys for manifest: {}", state.config.mpd_url);

    match drm::resolve_key(&state.http_client, &state.license, &state.config.mpd_url).await? {
        Some(pair) => Ok((StatusCode::OK, Json(pair)).into_response()),
        None => {
            warn!("No default_KID found in mp4protection ContentProtection");
            Ok((
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "No default_KID found in mp4protection ContentProtection."
                })),
            )
                .into_response())
        }
    }
}
