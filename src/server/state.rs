use crate::{config::Config, drm::LicenseClient};
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,
    /// Shared HTTP client for connection pooling
    pub http_client: Client,
    /// License client bound to the configured endpoint and header set
    pub license: LicenseClient,
    /// Server start time, reported by the health endpoint
    pub started_at: Instant,
}

impl AppState {
    /// Create a new AppState with the given configuration
    pub fn new(config: Config) -> Self {
        let http_client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .build()
            .expect("Failed to create HTTP client");

        let license = LicenseClient::new(
            http_client.clone(),
            config.license_url.clone(),
            config.license_headers.clone(),
        );

        Self {
            config: Arc::new(config),
            http_client,
            license,
            started_at: Instant::now(),
        }
    }
}
