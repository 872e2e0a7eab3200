//! Blocking HTTP collaborators: fetch a feed or an article page.
//!
//! The extraction engine never touches the network; this module hands it
//! bytes already transcoded to UTF-8.

use std::time::Duration;

use tracing::{debug, info};

use crate::encoding::transcode_to_utf8;
use crate::error::{Error, Result};
use crate::feed::{parse_feed, FeedEntry, FeedFilter};
use crate::{extract_with_options, ExtractedArticle, Options};

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("zenn-reader/", env!("CARGO_PKG_VERSION"));

/// Whole-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client settings.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Thin wrapper around a `ureq` agent.
pub struct HttpClient {
    agent: ureq::Agent,
}

impl HttpClient {
    #[must_use]
    pub fn new(config: &FetchConfig) -> Self {
        let agent = ureq::Agent::new_with_config(
            ureq::Agent::config_builder()
                .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
                .user_agent(config.user_agent.as_str())
                .http_status_as_error(false)
                .build(),
        );
        Self { agent }
    }

    /// GET `url` and decode the body to UTF-8.
    ///
    /// The charset comes from a BOM, the `Content-Type` header or a `<meta>`
    /// declaration, in that order.
    pub fn fetch_text(&self, url: &str) -> Result<String> {
        debug!(url, "GET");
        let resp = self
            .agent
            .get(url)
            .call()
            .map_err(|e| Error::Http(format!("{url}: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status { status: status.as_u16(), url: url.to_string() });
        }

        let content_type = resp
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = resp
            .into_body()
            .read_to_vec()
            .map_err(|e| Error::Http(format!("failed to read {url}: {e}")))?;

        Ok(transcode_to_utf8(&bytes, content_type.as_deref()))
    }

    /// Fetch and parse the feed for `filter`.
    pub fn fetch_feed(&self, filter: &FeedFilter, count: usize) -> Result<Vec<FeedEntry>> {
        let url = filter.feed_url();
        let xml = self.fetch_text(&url)?;
        let entries = parse_feed(&xml, count)?;
        info!(url = %url, entries = entries.len(), "feed fetched");
        Ok(entries)
    }

    /// Fetch an article page and run the extraction engine over it.
    ///
    /// A blank response body is a transport problem, not an extraction one.
    pub fn fetch_article(&self, url: &str, options: &Options) -> Result<ExtractedArticle> {
        let html = self.fetch_text(url)?;
        if html.trim().is_empty() {
            return Err(Error::Http(format!("{url}: empty response body")));
        }

        let article = extract_with_options(&html, url, options)?;
        info!(url, title = %article.title, chars = article.content.len(), "article extracted");
        Ok(article)
    }
}
