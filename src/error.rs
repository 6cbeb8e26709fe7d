//! Error types for rs-boilerprune.
//!
//! Only caller contract violations surface as errors. Unusual input (no
//! body, nothing to prune, an orphaned node) degrades to a no-op instead.

/// Error type for filtering operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A tag name passed to a rewrite primitive was empty or contained whitespace.
    #[error("Invalid tag name: {0:?}")]
    InvalidTagName(String),

    /// The configured base URL could not be parsed.
    #[error("Invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        /// The rejected URL string.
        url: String,
        /// Underlying parse failure.
        #[source]
        source: url::ParseError,
    },
}

/// Result type alias for filtering operations.
pub type Result<T> = std::result::Result<T, Error>;
