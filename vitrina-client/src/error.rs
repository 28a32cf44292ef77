//! Client error types

use thiserror::Error;

/// Transport-level client error.
///
/// Authentication outcomes have their own taxonomy ([`crate::AuthError`]);
/// this type only covers the plumbing underneath it.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response was received
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
