use crate::{dash, error::Result, fetch, server::state::AppState};
use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::info;

/// Serve the origin manifest with all ContentProtection elements stripped.
///
/// Players that cannot negotiate DRM get a plain MPD; the fetch→normalize→
/// sanitize chain runs per request, nothing is cached.
pub async fn serve_manifest(State(state): State<AppState>) -> Result<Response> {
    info!(
        "Serving sanitized manifest from origin: {}",
        state.config.mpd_url
    );

    let raw = fetch::fetch_manifest(&state.http_client, &state.config.mpd_url).await?;
    let normalized = dash::namespace::ensure_cenc_namespace(&raw);
    let cleaned = dash::sanitize::strip_content_protection(&normalized)?;

    // Return manifest with proper Content-Type header
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/dash+xml")],
        cleaned,
    )
        .into_response())
}
