use crate::dash::{CENC_NAMESPACE, MP4_PROTECTION_SCHEME};
use crate::error::{KeyfrontError, Result};
use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};

/// Extract the `cenc:default_KID` from the first ContentProtection element
/// carrying the generic mp4protection scheme, at any nesting depth.
///
/// DRM-system-specific ContentProtection elements (Widevine/PlayReady UUID
/// schemes) are skipped. `Ok(None)` means the manifest carries no generic
/// protection marker at all; absence is a valid outcome, not an error.
pub fn extract_default_kid(xml: &str) -> Result<Option<String>> {
    let mut reader = NsReader::from_str(xml);

    loop {
        match reader.read_resolved_event() {
            Ok((_, Event::Start(e))) | Ok((_, Event::Empty(e))) => {
                if e.local_name().as_ref() != b"ContentProtection" {
                    continue;
                }
                if let Some(kid) = default_kid_of(&reader, &e)? {
                    return Ok(Some(kid));
                }
            }
            Ok((_, Event::Eof)) => return Ok(None),
            Ok(_) => {}
            Err(e) => return Err(KeyfrontError::ManifestParse(e.to_string())),
        }
    }
}

/// Read the cenc-qualified `default_KID` of one ContentProtection element,
/// provided its `schemeIdUri` is the generic mp4protection URI.
fn default_kid_of(reader: &NsReader<&[u8]>, element: &BytesStart) -> Result<Option<String>> {
    let mut scheme_matches = false;
    let mut default_kid = None;

    for attr in element.attributes() {
        let attr = attr.map_err(|e| KeyfrontError::ManifestParse(e.to_string()))?;
        let (ns, local) = reader.resolve_attribute(attr.key);
        let value = attr
            .unescape_value()
            .map_err(|e| KeyfrontError::ManifestParse(e.to_string()))?;

        if local.as_ref() == b"schemeIdUri" {
            scheme_matches = value == MP4_PROTECTION_SCHEME;
        } else if local.as_ref() == b"default_KID" {
            // Only the attribute bound to the cenc namespace counts
            if let ResolveResult::Bound(Namespace(ns)) = ns {
                if ns == CENC_NAMESPACE.as_bytes() {
                    default_kid = Some(value.into_owned());
                }
            }
        }
    }

    Ok(if scheme_matches { default_kid } else { None })
}
