use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Crate-wide result alias used by handlers and the pipeline
pub type Result<T> = std::result::Result<T, KeyfrontError>;

/// Error kinds surfaced by the manifest-to-key pipeline
#[derive(Debug, Error)]
pub enum KeyfrontError {
    /// Network or non-2xx failure reaching the manifest origin or license server
    #[error("Failed to fetch from upstream: {0}")]
    OriginFetch(#[from] reqwest::Error),

    /// Manifest body is not well-formed XML
    #[error("Failed to parse manifest: {0}")]
    ManifestParse(String),

    /// Malformed hex or base64 key material
    #[error("Invalid key encoding: {0}")]
    KeyFormat(String),

    /// License server answered with something other than a usable key list
    #[error("Failed to parse license server response: {0}")]
    License(String),
}

impl KeyfrontError {
    /// Status code the HTTP façade maps this error to.
    ///
    /// Upstream transport failures are the proxy's fault boundary (502);
    /// everything else is an internal failure (500).
    pub fn status_code(&self) -> StatusCode {
        match self {
            KeyfrontError::OriginFetch(_) => StatusCode::BAD_GATEWAY,
            KeyfrontError::ManifestParse(_)
            | KeyfrontError::KeyFormat(_)
            | KeyfrontError::License(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short category label for the `error` field of JSON error bodies
    fn summary(&self) -> &'static str {
        match self {
            KeyfrontError::OriginFetch(_) => "Failed to fetch from upstream",
            KeyfrontError::ManifestParse(_) => "Failed to parse manifest",
            KeyfrontError::KeyFormat(_) => "Invalid key encoding",
            KeyfrontError::License(_) => "Failed to parse license server response",
        }
    }

    fn details(&self) -> String {
        match self {
            KeyfrontError::OriginFetch(e) => e.to_string(),
            KeyfrontError::ManifestParse(msg)
            | KeyfrontError::KeyFormat(msg)
            | KeyfrontError::License(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for KeyfrontError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        error!("Request failed ({}): {}", status, self);

        let body = Json(json!({
            "error": self.summary(),
            "details": self.details(),
        }));

        (status, body).into_response()
    }
}
