//! MIME inference for response bodies.
//!
//! Thin stand-in for a full MIME database: magic-byte sniffing via `infer`,
//! extension lookup via `mime_guess`. Both entry points are pure functions of
//! their inputs.

use std::path::Path;

use compact_str::CompactString;

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";
pub const APPLICATION_X_EMPTY: &str = "application/x-empty";
pub const TEXT_HTML: &str = "text/html";
pub const TEXT_PLAIN: &str = "text/plain";

/// Infers a MIME type from content alone.
///
/// Empty input maps to the empty-content marker; recognizable magic bytes
/// win; printable UTF-8 falls back to `text/plain`, anything else to
/// `application/octet-stream`.
pub fn for_data(data: &[u8]) -> CompactString {
    if data.is_empty() {
        return CompactString::const_new(APPLICATION_X_EMPTY);
    }
    if let Some(kind) = infer::get(data) {
        return CompactString::from(kind.mime_type());
    }
    if looks_textual(data) {
        CompactString::const_new(TEXT_PLAIN)
    } else {
        CompactString::const_new(APPLICATION_OCTET_STREAM)
    }
}

/// Infers a MIME type from a file name, falling back to content sniffing
/// when the extension is unknown.
pub fn for_file_name_and_data(path: &Path, data: &[u8]) -> CompactString {
    match mime_guess::from_path(path).first() {
        Some(mime) => CompactString::from(mime.essence_str()),
        None => for_data(data),
    }
}

fn looks_textual(data: &[u8]) -> bool {
    match std::str::from_utf8(data) {
        Ok(text) => !text
            .chars()
            .any(|c| c.is_control() && !c.is_ascii_whitespace()),
        Err(_) => false,
    }
}
