//! DASH MPD handling: cenc namespace normalization, default_KID
//! extraction, and ContentProtection stripping.

pub mod kid;
pub mod namespace;
pub mod sanitize;

/// Scheme URI of the DRM-agnostic MP4 protection ContentProtection element
pub const MP4_PROTECTION_SCHEME: &str = "urn:mpeg:dash:mp4protection:2011";

/// MPEG Common Encryption XML namespace
pub const CENC_NAMESPACE: &str = "urn:mpeg:cenc:2013";
