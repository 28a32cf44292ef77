//! Authentication error taxonomy

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Classification of a failed authentication exchange.
///
/// Every variant carries the message shown to the user; none of these are
/// retried automatically, the user resubmits.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Email/password pair rejected by the backend
    #[error("{0}")]
    InvalidCredentials(String),

    /// The email has no account on the backend
    #[error("{0}")]
    UserNotRegistered(String),

    /// Unauthorized response with no recognizable credential problem
    #[error("{0}")]
    Unauthorized(String),

    /// The request never produced a response
    #[error("{0}")]
    Connection(String),

    /// Anything else the backend answered
    #[error("{0}")]
    Server(String),

    /// Local precondition failed; no request was made
    #[error("{0}")]
    Validation(String),
}

impl AuthError {
    /// The user-facing message for this error
    pub fn user_message(&self) -> &str {
        match self {
            Self::InvalidCredentials(m)
            | Self::UserNotRegistered(m)
            | Self::Unauthorized(m)
            | Self::Connection(m)
            | Self::Server(m)
            | Self::Validation(m) => m,
        }
    }

    /// The unified error code for this classification
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidCredentials(_) => ErrorCode::InvalidCredentials,
            Self::UserNotRegistered(_) => ErrorCode::UserNotRegistered,
            Self::Unauthorized(_) => ErrorCode::NotAuthenticated,
            Self::Connection(_) => ErrorCode::ConnectionFailed,
            Self::Server(_) => ErrorCode::ServerError,
            Self::Validation(_) => ErrorCode::ValidationFailed,
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::with_message(err.code(), err.user_message())
    }
}
