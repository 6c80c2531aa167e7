use crate::error::{KeyfrontError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};

/// Remove every ContentProtection child of every AdaptationSet.
///
/// Events are streamed through and copied byte-for-byte, so sibling
/// elements, attributes, text layout and the root `xmlns` declarations all
/// survive untouched, and the output can never grow serializer-invented
/// `ns0:`-style prefixes. Players that choke on DRM signaling get a plain
/// MPD back.
pub fn strip_content_protection(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::new());
    // local names of the currently open elements
    let mut open: Vec<Vec<u8>> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if is_protection_child(&open, &e) {
                    // drop the whole subtree
                    reader
                        .read_to_end(e.name())
                        .map_err(|err| KeyfrontError::ManifestParse(err.to_string()))?;
                    continue;
                }
                open.push(e.local_name().as_ref().to_vec());
                writer
                    .write_event(Event::Start(e))
                    .map_err(|err| KeyfrontError::ManifestParse(err.to_string()))?;
            }
            Ok(Event::Empty(e)) => {
                if is_protection_child(&open, &e) {
                    continue;
                }
                writer
                    .write_event(Event::Empty(e))
                    .map_err(|err| KeyfrontError::ManifestParse(err.to_string()))?;
            }
            Ok(Event::End(e)) => {
                open.pop();
                writer
                    .write_event(Event::End(e))
                    .map_err(|err| KeyfrontError::ManifestParse(err.to_string()))?;
            }
            Ok(Event::Eof) => break,
            Ok(event) => {
                writer
                    .write_event(event)
                    .map_err(|err| KeyfrontError::ManifestParse(err.to_string()))?;
            }
            Err(e) => return Err(KeyfrontError::ManifestParse(e.to_string())),
        }
    }

    String::from_utf8(writer.into_inner())
        .map_err(|e| KeyfrontError::ManifestParse(e.to_string()))
}

/// True when `element` is a ContentProtection sitting directly inside an
/// AdaptationSet. Protection elements elsewhere (e.g. Representation-level)
/// are left alone, matching the proxy's narrow contract.
fn is_protection_child(open: &[Vec<u8>], element: &BytesStart) -> bool {
    element.local_name().as_ref() == b"ContentProtection"
        && open.last().map(|parent| parent.as_slice()) == Some(b"AdaptationSet".as_slice())
}
