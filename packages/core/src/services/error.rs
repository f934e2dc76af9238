//! Service Layer Error Types
//!
//! Errors surfaced by the tree builder and the article service. Collaborator
//! failures arrive as `anyhow::Error` and are wrapped with the operation that
//! was running when they happened.

use thiserror::Error;

/// Service operation errors
#[derive(Error, Debug)]
pub enum NotionServiceError {
    /// A content client call failed
    #[error("Fetch failed: {context}")]
    FetchFailed {
        context: String,
        #[source]
        source: anyhow::Error,
    },

    /// The content API answered with something we cannot read
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration is missing or out of range
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl NotionServiceError {
    /// Create a fetch failed error
    pub fn fetch_failed(context: impl Into<String>, source: anyhow::Error) -> Self {
        Self::FetchFailed {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}
