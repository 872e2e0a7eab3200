//! Output formatting for articles and feed listings.
//!
//! Three formats: plain text (labels in Japanese, Markdown stripped),
//! Markdown, and pretty-printed JSON.

use std::fmt;
use std::str::FromStr;

use serde_json::{json, Map, Value};

use crate::error::Error;
use crate::feed::FeedEntry;
use crate::patterns::{
    MD_BOLD, MD_BULLET, MD_FENCE, MD_HEADING, MD_IMAGE, MD_INLINE_CODE, MD_ITALIC, MD_LINK,
    MD_ORDERED, MD_QUOTE, MD_RULE, MD_STRIKETHROUGH,
};
use crate::result::ExtractedArticle;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(Error::InvalidArgument(format!(
                "unknown format '{other}' (expected text, json or markdown)"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Markdown => "markdown",
        })
    }
}

/// How the article body is written in JSON output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonBody {
    /// Markdown stripped to plain text.
    #[default]
    PlainText,
    /// The Markdown body as extracted.
    Markdown,
}

impl FromStr for JsonBody {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(Self::PlainText),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(Error::InvalidArgument(format!(
                "unknown JSON body '{other}' (expected text or markdown)"
            ))),
        }
    }
}

/// Formatter settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Body representation for [`OutputFormat::Json`].
    ///
    /// Default: [`JsonBody::PlainText`]
    pub json_body: JsonBody,
}

// ============================================================================
// Articles
// ============================================================================

/// Render an extracted article in the requested format.
#[must_use]
pub fn format_article_output(article: &ExtractedArticle, format: OutputFormat, opts: &FormatOptions) -> String {
    match format {
        OutputFormat::Json => {
            let body = match opts.json_body {
                JsonBody::PlainText => markdown_to_text(article.content.as_str()),
                JsonBody::Markdown => article.content.to_string(),
            };
            let tags: Vec<&str> = article.tags.iter().collect();
            let value = json!({
                "title": article.title,
                "content": body,
                "author": article.author,
                "published": article.published.as_str(),
                "url": article.url,
                "tags": tags,
            });
            format!("{value:#}")
        }
        OutputFormat::Markdown => {
            let tags = if article.tags.is_empty() {
                String::new()
            } else {
                let quoted: Vec<String> = article.tags.iter().map(|tag| format!("`{tag}`")).collect();
                format!("\n\nTags: {}", quoted.join(", "))
            };
            format!(
                "# {}\n\n*By {} - {}*\n\n{}{tags}",
                article.title, article.author, article.published, article.content
            )
        }
        OutputFormat::Text => format!(
            "タイトル: {}\n著者: {}\n公開日: {}\nURL: {}\nタグ: {}\n\n{}",
            article.title,
            article.author,
            article.published,
            article.url,
            article.tags.join(", "),
            markdown_to_text(article.content.as_str()),
        ),
    }
}

/// Strip Markdown syntax for plain-text output.
///
/// Code fences are unwrapped and their content kept verbatim; everything
/// else loses heading, emphasis, code and quote markers. Images become
/// `画像: alt`, links `text (url)`.
///
/// # Example
///
/// ```rust
/// use zenn_reader::format::markdown_to_text;
///
/// assert_eq!(markdown_to_text("## Intro\n\nSee [docs](https://x.com)"), "Intro\n\nSee docs (https://x.com)");
/// ```
#[must_use]
pub fn markdown_to_text(markdown: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut last = 0;

    for caps in MD_FENCE.captures_iter(markdown) {
        let (Some(whole), Some(code)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        parts.push(prose_to_text(&markdown[last..whole.start()]));
        parts.push(code.as_str().trim().to_string());
        last = whole.end();
    }
    parts.push(prose_to_text(&markdown[last..]));

    parts.concat()
}

fn prose_to_text(prose: &str) -> String {
    let text = MD_HEADING.replace_all(prose, "");
    let text = MD_BOLD.replace_all(&text, "$1");
    let text = MD_ITALIC.replace_all(&text, "$1");
    let text = MD_INLINE_CODE.replace_all(&text, "$1");
    let text = MD_IMAGE.replace_all(&text, "画像: $1");
    let text = MD_LINK.replace_all(&text, "$1 ($2)");
    let text = MD_STRIKETHROUGH.replace_all(&text, "$1");
    let text = MD_RULE.replace_all(&text, "----------");
    let text = MD_BULLET.replace_all(&text, "- ");
    let text = MD_ORDERED.replace_all(&text, "* ");
    let text = MD_QUOTE.replace_all(&text, "");
    text.into_owned()
}

// ============================================================================
// Feeds
// ============================================================================

/// Render a feed listing in the requested format.
#[must_use]
pub fn format_feed_output(entries: &[FeedEntry], format: OutputFormat, feed_url: Option<&str>) -> String {
    match format {
        OutputFormat::Json => {
            let mut root = Map::new();
            if let Some(url) = feed_url {
                root.insert("feedUrl".to_string(), Value::String(url.to_string()));
            }
            root.insert("articles".to_string(), json!(entries));
            format!("{:#}", Value::Object(root))
        }
        OutputFormat::Markdown => {
            let header = feed_url.map(|url| format!("## Feed: [{url}]({url})\n\n")).unwrap_or_default();
            let lines: Vec<String> = entries
                .iter()
                .map(|e| format!("- [{}]({}) by {} - {}", e.title, e.link, e.author, e.pub_date_formatted))
                .collect();
            format!("{header}{}", lines.join("\n"))
        }
        OutputFormat::Text => {
            let header = feed_url.map(|url| format!("Feed URL: {url}\n\n")).unwrap_or_default();
            let blocks: Vec<String> = entries
                .iter()
                .map(|e| format!("{}\n  {}\n  {} - {}", e.title, e.link, e.author, e.pub_date_formatted))
                .collect();
            format!("{header}{}", blocks.join("\n\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::MarkdownText;
    use crate::result::DateStamp;

    fn article() -> ExtractedArticle {
        ExtractedArticle {
            title: "Intro to Rust".to_string(),
            content: MarkdownText::new("## Setup\n\nInstall **rustup**.\n\n```sh\ncurl *x* | sh\n```"),
            author: "alice".to_string(),
            published: DateStamp::parse_ymd(2024, 3, 15).expect("valid date"),
            url: "https://zenn.dev/alice/articles/intro".to_string(),
            tags: ["Rust", "tech"].into_iter().collect(),
        }
    }

    fn entry(title: &str) -> FeedEntry {
        FeedEntry {
            title: title.to_string(),
            link: "https://zenn.dev/bob/articles/a".to_string(),
            pub_date: "2024-01-01T00:00:00Z".to_string(),
            pub_date_formatted: "2024/01/01 09:00".to_string(),
            author: "bob".to_string(),
        }
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().ok(), Some(OutputFormat::Json));
        assert_eq!("md".parse::<OutputFormat>().ok(), Some(OutputFormat::Markdown));
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert_eq!("plain".parse::<JsonBody>().ok(), Some(JsonBody::PlainText));
    }

    #[test]
    fn test_text_output() {
        let out = format_article_output(&article(), OutputFormat::Text, &FormatOptions::default());
        assert_eq!(
            out,
            "タイトル: Intro to Rust\n著者: alice\n公開日: 2024-03-15\nURL: https://zenn.dev/alice/articles/intro\nタグ: Rust, tech\n\nSetup\n\nInstall rustup.\n\ncurl *x* | sh"
        );
    }

    #[test]
    fn test_markdown_output() {
        let out = format_article_output(&article(), OutputFormat::Markdown, &FormatOptions::default());
        assert!(out.starts_with("# Intro to Rust\n\n*By alice - 2024-03-15*\n\n## Setup"));
        assert!(out.ends_with("```\n\nTags: `Rust`, `tech`"));
    }

    #[test]
    fn test_markdown_output_without_tags() {
        let mut a = article();
        a.tags = crate::result::TagSet::new();
        let out = format_article_output(&a, OutputFormat::Markdown, &FormatOptions::default());
        assert!(!out.contains("Tags:"));
    }

    #[test]
    fn test_json_body_modes() {
        let plain = format_article_output(&article(), OutputFormat::Json, &FormatOptions::default());
        let value: Value = serde_json::from_str(&plain).expect("valid json");
        assert_eq!(value["content"], "Setup\n\nInstall rustup.\n\ncurl *x* | sh");
        assert_eq!(value["tags"], json!(["Rust", "tech"]));
        assert_eq!(value["published"], "2024-03-15");

        let opts = FormatOptions { json_body: JsonBody::Markdown };
        let raw = format_article_output(&article(), OutputFormat::Json, &opts);
        let value: Value = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(value["content"], article().content.as_str());
    }

    #[test]
    fn test_markdown_to_text_rules() {
        assert_eq!(markdown_to_text("![diagram](a.png)"), "画像: diagram");
        assert_eq!(markdown_to_text("a `code` b ~~old~~ *em*"), "a code b old em");
        assert_eq!(markdown_to_text("> quoted\n>\n> more"), "quoted\n\nmore");
        assert_eq!(markdown_to_text("1. one\n2. two"), "* one\n* two");
        assert_eq!(markdown_to_text("---"), "----------");
    }

    #[test]
    fn test_markdown_to_text_keeps_fence_content() {
        let md = "text\n\n```rust\n# not a heading\n**x**\n```\n\nafter";
        assert_eq!(markdown_to_text(md), "text\n\n# not a heading\n**x**\n\nafter");
    }

    #[test]
    fn test_feed_text_output() {
        let out = format_feed_output(&[entry("A"), entry("B")], OutputFormat::Text, Some("https://zenn.dev/feed"));
        assert_eq!(
            out,
            "Feed URL: https://zenn.dev/feed\n\nA\n  https://zenn.dev/bob/articles/a\n  bob - 2024/01/01 09:00\n\nB\n  https://zenn.dev/bob/articles/a\n  bob - 2024/01/01 09:00"
        );
    }

    #[test]
    fn test_feed_markdown_output() {
        let out = format_feed_output(&[entry("A")], OutputFormat::Markdown, Some("https://zenn.dev/feed"));
        assert_eq!(
            out,
            "## Feed: [https://zenn.dev/feed](https://zenn.dev/feed)\n\n- [A](https://zenn.dev/bob/articles/a) by bob - 2024/01/01 09:00"
        );
        assert!(!format_feed_output(&[entry("A")], OutputFormat::Markdown, None).starts_with("##"));
    }

    #[test]
    fn test_feed_json_output() {
        let out = format_feed_output(&[entry("A")], OutputFormat::Json, Some("https://zenn.dev/feed"));
        let value: Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(value["feedUrl"], "https://zenn.dev/feed");
        assert_eq!(value["articles"][0]["pubDateFormatted"], "2024/01/01 09:00");

        let out = format_feed_output(&[], OutputFormat::Json, None);
        let value: Value = serde_json::from_str(&out).expect("valid json");
        assert!(value.get("feedUrl").is_none());
        assert_eq!(value["articles"], json!([]));
    }
}
