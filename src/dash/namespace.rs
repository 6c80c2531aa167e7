use crate::dash::CENC_NAMESPACE;
use std::borrow::Cow;

/// Ensure the MPD root declares the `cenc` namespace.
///
/// Some origins use `cenc:default_KID` attributes without ever declaring
/// `xmlns:cenc`, which makes a namespace-aware parser drop the attribute.
/// This splices the declaration into the first `<MPD ...>` opening tag as a
/// textual patch, before the document reaches any parser.
///
/// Idempotent: the `xmlns:cenc` check short-circuits a second application.
/// Text without a recognizable `<MPD` tag is returned unchanged; the
/// parser downstream reports the real problem.
pub fn ensure_cenc_namespace(xml: &str) -> Cow<'_, str> {
    if xml.contains("xmlns:cenc") {
        return Cow::Borrowed(xml);
    }

    let Some(tag_start) = xml.find("<MPD") else {
        return Cow::Borrowed(xml);
    };

    // "<MPD" must be a whole tag name, not a prefix of something else
    match xml[tag_start + 4..].chars().next() {
        Some(c) if c.is_whitespace() || c == '>' || c == '/' => {}
        _ => return Cow::Borrowed(xml),
    }

    let Some(tag_end) = xml[tag_start..].find('>') else {
        return Cow::Borrowed(xml);
    };

    let mut insert_at = tag_start + tag_end;
    // keep a self-closing root self-closing
    if xml[..insert_at].ends_with('/') {
        insert_at -= 1;
    }

    let mut patched = String::with_capacity(xml.len() + CENC_NAMESPACE.len() + 16);
    patched.push_str(&xml[..insert_at]);
    patched.push_str(" xmlns:cenc=\"");
    patched.push_str(CENC_NAMESPACE);
    patched.push('"');
    patched.push_str(&xml[insert_at..]);
    Cow::Owned(patched)
}
