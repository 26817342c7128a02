// ABOUTME: Input decoding for HTML read from disk or stdin: charset label, meta sniff, or chardetng.
// ABOUTME: Keeps the formatter itself string-only; callers holding raw bytes decode here first.

use std::fs;
use std::io::Read;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::bytes::Regex;

use crate::error::FormatError;

/// How many leading bytes are searched for a `<meta charset>` declaration.
const META_SNIFF_LEN: usize = 1024;

static META_CHARSET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i-u)<meta[^>]+charset\s*=\s*["']?\s*([a-z0-9_\-:.]+)"#).unwrap()
});

/// Decode raw HTML bytes into a string.
///
/// Resolution order: a UTF-8 BOM, the explicit `charset` label, a
/// `<meta charset>` (or `http-equiv` content type) near the top of the
/// document, then chardetng detection. Unknown labels fall through to the next
/// step. Malformed sequences are replaced, never rejected.
pub fn decode_html_bytes(body: &[u8], charset: Option<&str>) -> String {
    if let Some(rest) = body.strip_prefix(b"\xEF\xBB\xBF") {
        return String::from_utf8_lossy(rest).into_owned();
    }

    let labelled =
        charset.and_then(|label| encoding_rs::Encoding::for_label(label.trim().as_bytes()));
    if let Some(encoding) = labelled {
        let (decoded, _, _) = encoding.decode(body);
        return decoded.into_owned();
    }

    if let Some(encoding) = sniff_meta_charset(body).and_then(encoding_rs::Encoding::for_label) {
        let (decoded, _, _) = encoding.decode(body);
        return decoded.into_owned();
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Find the charset label declared by a meta tag near the start of the body.
fn sniff_meta_charset(body: &[u8]) -> Option<&[u8]> {
    let head = &body[..body.len().min(META_SNIFF_LEN)];
    META_CHARSET_RE
        .captures(head)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_bytes())
}

/// Read and decode an HTML file.
pub fn read_html_file(path: &Path, charset: Option<&str>) -> Result<String, FormatError> {
    let bytes = fs::read(path).map_err(|e| {
        FormatError::input(
            "ReadFile",
            Some(anyhow::Error::new(e).context(format!("reading {}", path.display()))),
        )
    })?;
    Ok(decode_html_bytes(&bytes, charset))
}

/// Read and decode HTML from any reader, e.g. stdin.
pub fn read_html(mut reader: impl Read, charset: Option<&str>) -> Result<String, FormatError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| FormatError::input("Read", Some(e.into())))?;
    Ok(decode_html_bytes(&bytes, charset))
}
