//! Error types for zenn-reader.
//!
//! The extraction engine itself only reports two failures: the HTML could not
//! be turned into a usable tree, or no article body survived every fallback.
//! The remaining variants belong to the fetch/feed collaborators and the CLI.

/// Error type for extraction, fetch and feed operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTML could not be parsed into a usable document tree.
    #[error("HTML parsing failed: {0}")]
    ParseFailure(String),

    /// No article body could be extracted by any strategy.
    #[error("No article body could be extracted")]
    EmptyContent,

    /// The HTTP request could not be completed (DNS, TLS, timeout, body read).
    #[error("Request failed: {0}")]
    Http(String),

    /// The server answered with a non-success status code.
    #[error("HTTP {status} for {url}")]
    Status {
        /// Numeric status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// The feed XML could not be parsed.
    #[error("Feed parsing failed: {0}")]
    Feed(String),

    /// Caller supplied an inconsistent combination of arguments.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for zenn-reader operations.
pub type Result<T> = std::result::Result<T, Error>;
