//! HTML character reference decoding.
//!
//! Handles the named references `&nbsp; &amp; &lt; &gt; &quot;` and numeric
//! references in decimal (`&#39;`) and hex (`&#x41;`, case-insensitive) form.
//! Decoding is a single regex pass: `&amp;lt;` becomes `&lt;`, never `<`.

use std::borrow::Cow;

use regex::Captures;

use crate::patterns::ENTITY;

/// Decode HTML character references in `text`.
///
/// Numeric references that do not name a valid Unicode scalar value
/// (surrogates, values above `U+10FFFF`, overflowing digits) are left as-is.
///
/// # Examples
///
/// ```
/// use zenn_reader::entities::decode;
///
/// assert_eq!(decode("Tom &amp; Jerry"), "Tom & Jerry");
/// assert_eq!(decode("&#x41;&#66;"), "AB");
/// assert_eq!(decode("&amp;lt;"), "&lt;");
/// ```
#[must_use]
pub fn decode(text: &str) -> String {
    decode_cow(text).into_owned()
}

/// Like [`decode`] but borrows when there is nothing to replace.
#[must_use]
pub fn decode_cow(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    ENTITY.replace_all(text, replace_reference)
}

fn replace_reference(caps: &Captures) -> String {
    if let Some(named) = caps.name("named") {
        let decoded = match named.as_str() {
            "nbsp" => " ",
            "amp" => "&",
            "lt" => "<",
            "gt" => ">",
            "quot" => "\"",
            _ => return caps[0].to_string(),
        };
        return decoded.to_string();
    }

    let code_point = if let Some(dec) = caps.name("dec") {
        dec.as_str().parse::<u32>().ok()
    } else if let Some(hex) = caps.name("hex") {
        u32::from_str_radix(hex.as_str(), 16).ok()
    } else {
        None
    };

    code_point
        .and_then(char::from_u32)
        .map_or_else(|| caps[0].to_string(), String::from)
}
