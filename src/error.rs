//! Error types shared by the curation core, the catalog client and the
//! HTTP boundary.

use thiserror::Error;

/// Failures raised by a single catalog call.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The access token was rejected (missing, expired or revoked).
    #[error("catalog rejected the access token")]
    Unauthorized,

    /// The catalog answered with a non-success status.
    #[error("catalog returned {status} for {endpoint}")]
    Status { status: u16, endpoint: String },

    /// Network failure or an unreadable response.
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response did not match the expected record shape.
    #[error("unexpected catalog response: {0}")]
    Decode(String),
}

/// Errors surfaced by the curation pipelines to their caller.
#[derive(Debug, Error)]
pub enum SetError {
    /// No credential, or a credential the catalog no longer accepts.
    #[error("authentication required")]
    Unauthenticated,

    /// Any downstream catalog call failed.
    #[error("catalog unavailable: {0}")]
    CatalogUnavailable(CatalogError),

    /// A required field is missing or malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl From<CatalogError> for SetError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Unauthorized => SetError::Unauthenticated,
            other => SetError::CatalogUnavailable(other),
        }
    }
}

/// Problems found while building [`crate::config::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("cannot prepare configuration directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot read .env file: {0}")]
    Dotenv(#[from] dotenv::Error),
}
