//! URL Utility Functions
//!
//! Helpers that read structure out of article, topic and link URLs.

use url::Url;

/// Check if a string is a valid absolute http(s) URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if !s.starts_with("http://") && !s.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Parse a URL string into a Url object.
///
/// # Returns
/// * `Some(Url)` if valid absolute URL, `None` otherwise
#[must_use]
pub fn parse_url(url_str: &str) -> Option<Url> {
    let (is_abs, parsed) = is_absolute_url(url_str);
    if is_abs {
        parsed
    } else {
        None
    }
}

/// Author handle from an article URL: the first path segment after the host.
///
/// # Examples
/// ```
/// use zenn_reader::url_utils::author_from_url;
///
/// assert_eq!(author_from_url("https://zenn.dev/alice/articles/x").as_deref(), Some("alice"));
/// assert_eq!(author_from_url("https://zenn.dev/"), None);
/// assert_eq!(author_from_url("not a url"), None);
/// ```
#[must_use]
pub fn author_from_url(url_str: &str) -> Option<String> {
    let url = parse_url(url_str)?;
    let first = url.path_segments()?.next()?;
    if first.is_empty() {
        None
    } else {
        Some(first.to_string())
    }
}

/// Last non-empty path segment of a link target.
///
/// Works on absolute URLs and on relative paths. Query strings and fragments
/// are ignored.
///
/// # Examples
/// ```
/// use zenn_reader::url_utils::last_path_segment;
///
/// assert_eq!(last_path_segment("https://x.com/a/b/").as_deref(), Some("b"));
/// assert_eq!(last_path_segment("/docs/intro?lang=ja").as_deref(), Some("intro"));
/// assert_eq!(last_path_segment("https://x.com"), None);
/// ```
#[must_use]
pub fn last_path_segment(href: &str) -> Option<String> {
    let href = href.trim();

    if let Ok(url) = Url::parse(href) {
        return url
            .path_segments()?
            .rev()
            .find(|segment| !segment.is_empty())
            .map(str::to_string);
    }

    let path = strip_query_and_fragment(href);
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Topic slug from a topic link (`/topics/rust` or `https://host/topics/rust/`).
///
/// Links that do not point at a topic page yield their path without slashes.
#[must_use]
pub fn topic_slug(href: &str) -> String {
    let path = match parse_url(href) {
        Some(url) => url.path().to_string(),
        None => strip_query_and_fragment(href.trim()).to_string(),
    };

    let slug = match path.find("/topics/") {
        Some(pos) => &path[pos + "/topics/".len()..],
        None => path.as_str(),
    };

    slug.trim_matches('/').to_string()
}

fn strip_query_and_fragment(href: &str) -> &str {
    let end = href.find(['?', '#']).unwrap_or(href.len());
    &href[..end]
}
