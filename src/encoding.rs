//! Character encoding detection and transcoding.
//!
//! Fetched pages and feeds arrive as bytes. The charset is taken from, in
//! order: a byte-order mark, the HTTP `Content-Type` header, a `<meta>`
//! declaration in the first kilobyte, then UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Bytes examined for a `<meta>` charset declaration.
const SNIFF_LEN: usize = 1024;

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>/;]+)"#).expect("valid regex")
});

/// Match the `charset=` parameter of a MIME type
#[allow(clippy::expect_used)]
static MIME_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).expect("valid regex")
});

/// Detect character encoding from bytes and an optional `Content-Type` value.
#[must_use]
pub fn detect_encoding(bytes: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    if let Some(encoding) = content_type.and_then(charset_from_content_type) {
        return encoding;
    }

    let head = &bytes[..bytes.len().min(SNIFF_LEN)];
    let head_str = String::from_utf8_lossy(head);
    if let Some(encoding) = extract_charset(&head_str).and_then(|label| Encoding::for_label(label.as_bytes())) {
        return encoding;
    }

    UTF_8
}

/// Encoding named by the `charset` parameter of a `Content-Type` value.
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    let label = MIME_CHARSET_RE.captures(content_type)?.get(1)?.as_str();
    Encoding::for_label(label.as_bytes())
}

/// Charset label from `<meta charset>` or `<meta http-equiv>` markup.
fn extract_charset(html: &str) -> Option<String> {
    CHARSET_META_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Transcode bytes to a UTF-8 string.
///
/// Invalid sequences become U+FFFD rather than errors.
///
/// # Examples
///
/// ```
/// use zenn_reader::encoding::transcode_to_utf8;
///
/// let html = b"<html><body>Hello, World!</body></html>";
/// assert!(transcode_to_utf8(html, None).contains("Hello, World!"));
///
/// let latin1 = b"Caf\xE9";
/// assert_eq!(transcode_to_utf8(latin1, Some("text/html; charset=ISO-8859-1")), "Café");
/// ```
#[must_use]
pub fn transcode_to_utf8(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = detect_encoding(bytes, content_type);

    // `decode` strips a matching BOM and replaces malformed sequences.
    let (decoded, _encoding_used, _had_errors) = encoding.decode(bytes);
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{SHIFT_JIS, UTF_16LE, WINDOWS_1252};

    #[test]
    fn detect_from_meta_charset() {
        let html = br#"<html><head><meta charset="utf-8"></head><body>Test</body></html>"#;
        assert_eq!(detect_encoding(html, None), UTF_8);

        let html = br#"<html><head><meta charset="Shift_JIS"></head></html>"#;
        assert_eq!(detect_encoding(html, None), SHIFT_JIS);
    }

    #[test]
    fn detect_from_http_equiv() {
        let html = br#"<meta http-equiv="Content-Type" content="text/html; charset=ISO-8859-1">"#;
        // encoding_rs maps ISO-8859-1 to windows-1252 per WHATWG
        assert_eq!(detect_encoding(html, None), WINDOWS_1252);
    }

    #[test]
    fn header_beats_meta() {
        let html = br#"<meta charset="windows-1252">"#;
        assert_eq!(detect_encoding(html, Some("text/html; charset=UTF-8")), UTF_8);
    }

    #[test]
    fn bom_beats_everything() {
        let bytes = b"\xFF\xFEh\0i\0";
        assert_eq!(detect_encoding(bytes, Some("text/html; charset=Shift_JIS")), UTF_16LE);
        assert_eq!(transcode_to_utf8(bytes, None), "hi");
    }

    #[test]
    fn default_to_utf8_when_no_charset() {
        assert_eq!(detect_encoding(b"<html><body>Test</body></html>", Some("text/html")), UTF_8);
    }

    #[test]
    fn transcode_shift_jis() {
        // "日本" in Shift_JIS
        let bytes = b"<meta charset=\"shift_jis\">\x93\xfa\x96\x7b";
        assert!(transcode_to_utf8(bytes, None).ends_with("日本"));
    }

    #[test]
    fn transcode_windows1252_quotes() {
        let html = b"<meta charset=\"windows-1252\">\x93Hello\x94";
        assert!(transcode_to_utf8(html, None).contains("\u{201C}Hello\u{201D}"));
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let result = transcode_to_utf8(b"Test \xFF\xFE Invalid", None);
        assert!(result.contains("Test"));
        assert!(result.contains('\u{FFFD}'));
        assert!(result.contains("Invalid"));
    }

    #[test]
    fn charset_from_content_type_variants() {
        assert_eq!(charset_from_content_type("application/rss+xml; charset=\"utf-8\""), Some(UTF_8));
        assert_eq!(charset_from_content_type("text/html; CHARSET=Shift_JIS"), Some(SHIFT_JIS));
        assert_eq!(charset_from_content_type("text/html"), None);
        assert_eq!(charset_from_content_type("text/html; charset=bogus"), None);
    }

    #[test]
    fn extract_charset_case_insensitive() {
        assert_eq!(extract_charset("<HTML><HEAD><META CHARSET=\"UTF-8\"></HEAD></HTML>"), Some("UTF-8".to_string()));
        assert_eq!(extract_charset("<meta charset=utf-8>"), Some("utf-8".to_string()));
    }
}
