use crate::error::{KeyfrontError, Result};
use reqwest::Client;
use tracing::info;

/// Fetch the raw manifest body from the origin.
///
/// One plain GET through the shared pooled client, no retries: a failed
/// origin fetch surfaces as [`KeyfrontError::OriginFetch`] and the caller
/// decides what to tell the player.
pub async fn fetch_manifest(client: &Client, url: &str) -> Result<String> {
    info!("Fetching manifest from origin: {}", url);

    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(KeyfrontError::OriginFetch(
            response.error_for_status().unwrap_err(),
        ));
    }

    Ok(response.text().await?)
}
