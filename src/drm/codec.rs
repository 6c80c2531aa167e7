use crate::error::{KeyfrontError, Result};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Convert a hex key identifier (optionally dash-grouped, UUID style) into
/// the unpadded URL-safe base64 form license servers expect in `kids`.
pub fn hex_to_base64url(hex_kid: &str) -> Result<String> {
    let compact: String = hex_kid.chars().filter(|&c| c != '-').collect();
    let bytes = hex::decode(&compact)
        .map_err(|e| KeyfrontError::KeyFormat(format!("invalid hex KID {hex_kid:?}: {e}")))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Decode a URL-safe base64 value into lowercase hex.
///
/// License servers usually omit the `=` padding, but some pad; trailing
/// `=` is trimmed before decoding so both forms are accepted.
pub fn base64url_to_hex(value: &str) -> Result<String> {
    let unpadded = value.trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(unpadded)
        .map_err(|e| KeyfrontError::KeyFormat(format!("invalid base64 value {value:?}: {e}")))?;
    Ok(hex::encode(bytes))
}
