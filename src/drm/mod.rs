//! ClearKey DRM resolution: the identifier codec, the license client, and
//! the manifest-to-key pipeline shared by every consumer of this crate.

pub mod codec;
pub mod license;

pub use license::{ClearKeyPair, LicenseClient};

use crate::dash;
use crate::error::Result;
use crate::fetch;
use reqwest::Client;
use tracing::info;

/// Run the full manifest-to-key pipeline once.
///
/// Fetches the manifest, normalizes its cenc namespace, extracts the
/// generic-scheme default_KID and trades it for the decryption key at the
/// license server. `Ok(None)` when the manifest carries no generic
/// ContentProtection marker; callers decide whether that is an error.
pub async fn resolve_key(
    client: &Client,
    license: &LicenseClient,
    mpd_url: &str,
) -> Result<Option<ClearKeyPair>> {
    let raw = fetch::fetch_manifest(client, mpd_url).await?;
    let manifest = dash::namespace::ensure_cenc_namespace(&raw);

    let Some(kid) = dash::kid::extract_default_kid(&manifest)? else {
        info!("Manifest carries no mp4protection default_KID");
        return Ok(None);
    };

    info!("Extracted default_KID: {}", kid);

    let kid_b64 = codec::hex_to_base64url(&kid)?;
    license.request_key(&kid_b64).await.map(Some)
}
