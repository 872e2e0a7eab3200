//! Feed listing: feed URLs, RSS 2.0 / Atom parsing and entry search.

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::url_utils;

/// Site root all feed URLs are built on.
pub const ZENN_BASE_URL: &str = "https://zenn.dev";

/// Entries returned when the caller does not ask for a count.
pub const DEFAULT_FEED_COUNT: usize = 20;

/// Seconds east of UTC for Japan Standard Time.
const JST_OFFSET_SECS: i32 = 9 * 3600;

// ============================================================================
// Filters
// ============================================================================

/// Which feed to read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedFilter {
    /// Site-wide latest articles.
    #[default]
    All,
    /// Articles under one topic slug.
    Topic(String),
    /// Articles by one user handle.
    User(String),
}

impl FeedFilter {
    /// Build a filter from the CLI `--type` / `--keyword` pair.
    ///
    /// A keyword needs `topic` or `user`; those two need a keyword.
    pub fn from_parts(kind: Option<&str>, keyword: Option<&str>) -> Result<Self> {
        let keyword = keyword.map(str::trim).filter(|k| !k.is_empty());

        match (kind.map(str::to_ascii_lowercase).as_deref(), keyword) {
            (None | Some("all"), None) => Ok(Self::All),
            (None | Some("all"), Some(k)) => Err(Error::InvalidArgument(format!(
                "keyword '{k}' needs --type topic or --type user"
            ))),
            (Some("topic"), Some(k)) => Ok(Self::Topic(k.to_string())),
            (Some("user"), Some(k)) => Ok(Self::User(k.to_string())),
            (Some(t @ ("topic" | "user")), None) => {
                Err(Error::InvalidArgument(format!("--type {t} needs a --keyword")))
            }
            (Some(other), _) => Err(Error::InvalidArgument(format!(
                "unknown feed type '{other}' (expected all, topic or user)"
            ))),
        }
    }

    /// Feed URL for this filter.
    ///
    /// # Example
    ///
    /// ```rust
    /// use zenn_reader::feed::FeedFilter;
    ///
    /// assert_eq!(FeedFilter::All.feed_url(), "https://zenn.dev/feed");
    /// assert_eq!(FeedFilter::Topic("rust".into()).feed_url(), "https://zenn.dev/topics/rust/feed");
    /// assert_eq!(FeedFilter::User("alice".into()).feed_url(), "https://zenn.dev/alice/feed");
    /// ```
    #[must_use]
    pub fn feed_url(&self) -> String {
        match self {
            Self::All => format!("{ZENN_BASE_URL}/feed"),
            Self::Topic(slug) => format!("{ZENN_BASE_URL}/topics/{}/feed", encode_segment(slug)),
            Self::User(handle) => format!("{ZENN_BASE_URL}/{}/feed", encode_segment(handle)),
        }
    }
}

fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes()).collect()
}

// ============================================================================
// Entries
// ============================================================================

/// One article listed in a feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    /// RFC 3339 in UTC when the feed date parsed, the raw value otherwise.
    pub pub_date: String,
    /// `YYYY/MM/DD HH:MM` in Japan time.
    pub pub_date_formatted: String,
    pub author: String,
}

/// Fields collected while inside an `<item>` / `<entry>`.
#[derive(Default)]
struct RawEntry {
    title: String,
    link: String,
    date: String,
    updated: String,
    creator: String,
    author_name: String,
}

impl RawEntry {
    fn into_entry(self) -> FeedEntry {
        let raw_date = if self.date.is_empty() { self.updated } else { self.date };
        let pub_date = parse_feed_date(&raw_date).map_or_else(
            || raw_date.clone(),
            |dt| dt.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Secs, true),
        );

        let author = url_utils::author_from_url(&self.link)
            .or_else(|| non_empty(self.creator))
            .or_else(|| non_empty(self.author_name))
            .unwrap_or_default();

        FeedEntry {
            title: self.title.trim().to_string(),
            link: self.link.trim().to_string(),
            pub_date_formatted: format_date(&raw_date),
            pub_date,
            author,
        }
    }
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse an RSS 2.0 or Atom document, keeping at most `count` entries.
pub fn parse_feed(xml: &str, count: usize) -> Result<Vec<FeedEntry>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut path: Vec<String> = Vec::new();
    let mut entries: Vec<FeedEntry> = Vec::new();
    let mut current: Option<RawEntry> = None;
    let mut saw_root = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if path.is_empty() {
                    saw_root = matches!(tag.as_str(), "rss" | "feed" | "rdf:RDF");
                }
                match tag.as_str() {
                    "item" | "entry" => current = Some(RawEntry::default()),
                    "link" => {
                        if let Some(entry) = current.as_mut() {
                            take_atom_link(&e, entry);
                        }
                    }
                    _ => {}
                }
                path.push(tag);
            }
            Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"link" {
                    if let Some(entry) = current.as_mut() {
                        take_atom_link(&e, entry);
                    }
                }
            }
            Ok(Event::End(e)) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                path.pop();
                if matches!(tag.as_str(), "item" | "entry") {
                    if let Some(entry) = current.take() {
                        if entries.len() < count {
                            entries.push(entry.into_entry());
                        }
                        if entries.len() >= count {
                            break;
                        }
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(entry) = current.as_mut() {
                    let text = e
                        .unescape()
                        .map_err(|err| Error::Feed(format!("bad text at {}: {err}", reader.buffer_position())))?;
                    collect_text(entry, &path, &text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(entry) = current.as_mut() {
                    let text = String::from_utf8_lossy(&e).to_string();
                    collect_text(entry, &path, &text);
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(Error::Feed(format!("XML error at {}: {err}", reader.buffer_position())));
            }
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(Error::Feed("document is neither RSS nor Atom".to_string()));
    }

    debug!(entries = entries.len(), "feed parsed");
    Ok(entries)
}

/// Route element text into the field named by the innermost open tag.
fn collect_text(entry: &mut RawEntry, path: &[String], text: &str) {
    let Some(tag) = path.last() else {
        return;
    };
    let parent = path.len().checked_sub(2).and_then(|i| path.get(i)).map(String::as_str);

    let field = match (parent, tag.as_str()) {
        (Some("item" | "entry"), "title") => &mut entry.title,
        (Some("item"), "link") => &mut entry.link,
        (Some("item" | "entry"), "pubDate" | "published" | "dc:date") => &mut entry.date,
        (Some("entry"), "updated") => &mut entry.updated,
        (Some("item" | "entry"), "dc:creator") => &mut entry.creator,
        (Some("author"), "name") => &mut entry.author_name,
        _ => return,
    };
    field.push_str(text);
}

/// Atom `<link href=".."/>`: first `alternate` (or rel-less) link wins.
fn take_atom_link(e: &BytesStart, entry: &mut RawEntry) {
    if !entry.link.is_empty() {
        return;
    }

    let mut href = None;
    let mut rel = None;
    for attr in e.attributes().flatten() {
        let Ok(value) = attr.unescape_value() else {
            continue;
        };
        match attr.key.as_ref() {
            b"href" => href = Some(value.into_owned()),
            b"rel" => rel = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(href) = href {
        if rel.as_deref().is_none_or(|r| r == "alternate") {
            entry.link = href;
        }
    }
}

// ============================================================================
// Dates
// ============================================================================

/// Parse RFC 3339 (Atom) or RFC 2822 (RSS) timestamps.
#[must_use]
pub fn parse_feed_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .ok()
}

/// Format a feed timestamp as `YYYY/MM/DD HH:MM` in Japan time.
///
/// Unparsable input comes back unchanged.
///
/// # Example
///
/// ```rust
/// use zenn_reader::feed::format_date;
///
/// assert_eq!(format_date("2023-01-01T12:34:56Z"), "2023/01/01 21:34");
/// assert_eq!(format_date("someday"), "someday");
/// ```
#[must_use]
pub fn format_date(raw: &str) -> String {
    let (Some(dt), Some(jst)) = (parse_feed_date(raw), FixedOffset::east_opt(JST_OFFSET_SECS)) else {
        return raw.to_string();
    };
    dt.with_timezone(&jst).format("%Y/%m/%d %H:%M").to_string()
}

// ============================================================================
// Search
// ============================================================================

/// Entries whose title or author contains `query`, ignoring case.
///
/// An empty query keeps every entry.
#[must_use]
pub fn search_entries(entries: &[FeedEntry], query: &str) -> Vec<FeedEntry> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return entries.to_vec();
    }

    entries
        .iter()
        .filter(|e| e.title.to_lowercase().contains(&query) || e.author.to_lowercase().contains(&query))
        .cloned()
        .collect()
}
