// ABOUTME: Error types for building document snapshots and reading structured data.
// ABOUTME: Ranking itself never fails; these only surface from snapshot construction.

use thiserror::Error;

/// Errors that can occur while preparing a document for image extraction.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The page URL could not be parsed.
    #[error("invalid page URL {url:?}: {source}")]
    InvalidPageUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The page URL parsed but is not http(s), so relative image paths cannot be resolved.
    #[error("unsupported page URL scheme: {0}")]
    UnsupportedScheme(String),

    /// A JSON-LD block was not valid JSON.
    #[error("malformed structured data: {0}")]
    StructuredData(#[from] serde_json::Error),
}

impl ImageError {
    /// Creates an InvalidPageUrl error.
    pub fn invalid_page_url(url: impl Into<String>, source: url::ParseError) -> Self {
        ImageError::InvalidPageUrl {
            url: url.into(),
            source,
        }
    }

    /// Returns true if this error came from a bad page URL.
    pub fn is_invalid_url(&self) -> bool {
        matches!(
            self,
            ImageError::InvalidPageUrl { .. } | ImageError::UnsupportedScheme(_)
        )
    }
}
