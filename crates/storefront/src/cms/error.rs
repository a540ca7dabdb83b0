//! Content-store client errors.

use thiserror::Error;

/// Errors from the CMS content API.
#[derive(Debug, Error)]
pub enum CmsError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("CMS API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be parsed.
    #[error("Failed to parse CMS response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CmsError {
    /// Whether the error is a plain not-found from the API.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}
