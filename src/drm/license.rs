use crate::config::LicenseHeaders;
use crate::drm::codec;
use crate::error::{KeyfrontError, Result};
use reqwest::{Client, header};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A resolved ClearKey pair, hex-encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClearKeyPair {
    pub kid_hex: String,
    pub key_hex: String,
}

/// ClearKey license request body (W3C Encrypted Media key request shape)
#[derive(Serialize)]
struct LicenseRequest<'a> {
    kids: [&'a str; 1],
    #[serde(rename = "type")]
    license_type: &'static str,
}

#[derive(Deserialize)]
struct LicenseResponse {
    #[serde(default)]
    keys: Vec<LicenseKey>,
}

#[derive(Deserialize)]
struct LicenseKey {
    kid: String,
    k: String,
}

/// License client bound to one endpoint and one browser-emulation header set
#[derive(Clone)]
pub struct LicenseClient {
    client: Client,
    endpoint: String,
    headers: LicenseHeaders,
}

impl LicenseClient {
    pub fn new(client: Client, endpoint: String, headers: LicenseHeaders) -> Self {
        Self {
            client,
            endpoint,
            headers,
        }
    }

    /// Request the decryption key for one base64url-encoded key identifier.
    ///
    /// Sends a single `temporary`-type ClearKey request and reads only the
    /// first entry of the returned key list — multi-key responses are not
    /// supported. Exactly one outbound call, no retry.
    pub async fn request_key(&self, kid_b64: &str) -> Result<ClearKeyPair> {
        info!("Requesting license for KID: {}", kid_b64);

        let body = LicenseRequest {
            kids: [kid_b64],
            license_type: "temporary",
        };

        let mut request = self
            .client
            .post(&self.endpoint)
            .header(header::USER_AGENT, self.headers.user_agent.as_str())
            .header(header::ORIGIN, self.headers.page_origin.as_str())
            .header(header::REFERER, self.headers.referer.as_str())
            .json(&body);

        if let Some(forwarded_for) = &self.headers.forwarded_for {
            request = request.header("X-Forwarded-For", forwarded_for.as_str());
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(KeyfrontError::OriginFetch(
                response.error_for_status().unwrap_err(),
            ));
        }

        let license: LicenseResponse = response
            .json()
            .await
            .map_err(|e| KeyfrontError::License(format!("response is not valid JSON: {e}")))?;

        let Some(first) = license.keys.first() else {
            return Err(KeyfrontError::License(
                "response carries no keys".to_string(),
            ));
        };

        let pair = ClearKeyPair {
            kid_hex: codec::base64url_to_hex(&first.kid)
                .map_err(|e| KeyfrontError::License(format!("malformed kid field: {e}")))?,
            key_hex: codec::base64url_to_hex(&first.k)
                .map_err(|e| KeyfrontError::License(format!("malformed k field: {e}")))?,
        };

        info!("License resolved for KID: {}", pair.kid_hex);

        Ok(pair)
    }
}
