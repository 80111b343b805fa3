//! Asset content encoding and binary sniffing.

use base64::prelude::*;
use infer::MatcherType;

/// Body key for textual asset content.
pub const TEXT_CONTENT_KEY: &str = "value";

/// Body key for binary asset content.
pub const BINARY_CONTENT_KEY: &str = "attachment";

pub fn encode(bytes: &[u8]) -> String {
    BASE64_STANDARD.encode(bytes)
}

/// Decode base64 content, tolerating line breaks inserted by the backend.
pub fn decode(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    BASE64_STANDARD.decode(compact)
}

/// Decide from the byte signature whether content is binary.
///
/// Known signatures (fonts, images, archives) decide first; otherwise NUL
/// bytes or invalid UTF-8 mean binary. Empty content is text.
pub fn is_binary(bytes: &[u8]) -> bool {
    if bytes.is_empty() {
        return false;
    }

    if let Some(kind) = infer::get(bytes) {
        return kind.matcher_type() != MatcherType::Text;
    }

    bytes.contains(&0) || std::str::from_utf8(bytes).is_err()
}

/// Body key for `bytes` when uploading.
pub fn content_key(bytes: &[u8]) -> &'static str {
    if is_binary(bytes) {
        BINARY_CONTENT_KEY
    } else {
        TEXT_CONTENT_KEY
    }
}
