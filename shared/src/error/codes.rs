//! Unified error codes for the Vitrina suite
//!
//! This module defines all error codes used across the client and app crates.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Order errors
//! - 3xxx: Network errors
//! - 9xxx: System errors

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Email is not registered with the backend
    UserNotRegistered = 1003,
    /// Session has expired
    SessionExpired = 1004,

    // ==================== 2xxx: Order ====================
    /// Order not found
    OrderNotFound = 2001,
    /// Order is already completed
    OrderAlreadyCompleted = 2002,
    /// Order has no positive-quantity lines
    EmptyOrder = 2003,
    /// Proof-of-delivery image missing
    ProofRequired = 2004,
    /// Generated order id collided with an existing record
    OrderIdCollision = 2005,

    // ==================== 3xxx: Network ====================
    /// Could not reach the backend at all
    ConnectionFailed = 3001,
    /// Backend responded with an unclassifiable failure
    ServerError = 3002,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Local storage error
    StorageError = 9002,
    /// Serialization error
    SerializationError = 9003,
}

/// Error type for invalid error code conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Success),
            1 => Ok(Self::Unknown),
            2 => Ok(Self::ValidationFailed),
            3 => Ok(Self::NotFound),
            4 => Ok(Self::AlreadyExists),
            5 => Ok(Self::InvalidRequest),
            1001 => Ok(Self::NotAuthenticated),
            1002 => Ok(Self::InvalidCredentials),
            1003 => Ok(Self::UserNotRegistered),
            1004 => Ok(Self::SessionExpired),
            2001 => Ok(Self::OrderNotFound),
            2002 => Ok(Self::OrderAlreadyCompleted),
            2003 => Ok(Self::EmptyOrder),
            2004 => Ok(Self::ProofRequired),
            2005 => Ok(Self::OrderIdCollision),
            3001 => Ok(Self::ConnectionFailed),
            3002 => Ok(Self::ServerError),
            9001 => Ok(Self::InternalError),
            9002 => Ok(Self::StorageError),
            9003 => Ok(Self::SerializationError),
            other => Err(InvalidErrorCode(other)),
        }
    }
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::NotAuthenticated => "Not authenticated",
            Self::InvalidCredentials => "Invalid credentials",
            Self::UserNotRegistered => "Email not registered",
            Self::SessionExpired => "Session expired",
            Self::OrderNotFound => "Order not found",
            Self::OrderAlreadyCompleted => "Order is already completed",
            Self::EmptyOrder => "Order has no units to order",
            Self::ProofRequired => "Proof-of-delivery image is required",
            Self::OrderIdCollision => "Order id already exists",
            Self::ConnectionFailed => "Connection failed",
            Self::ServerError => "Server error",
            Self::InternalError => "Internal error",
            Self::StorageError => "Storage error",
            Self::SerializationError => "Serialization error",
        }
    }

    /// Get the HTTP status code this error maps to
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ValidationFailed | Self::InvalidRequest | Self::EmptyOrder | Self::ProofRequired => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound | Self::OrderNotFound | Self::UserNotRegistered => StatusCode::NOT_FOUND,
            Self::AlreadyExists | Self::OrderAlreadyCompleted | Self::OrderIdCollision => {
                StatusCode::CONFLICT
            }
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::SessionExpired => StatusCode::UNAUTHORIZED,
            Self::ConnectionFailed => StatusCode::SERVICE_UNAVAILABLE,
            Self::ServerError
            | Self::InternalError
            | Self::StorageError
            | Self::SerializationError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display as the numeric code, matching the wire representation
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::InvalidCredentials,
            ErrorCode::UserNotRegistered,
            ErrorCode::OrderAlreadyCompleted,
            ErrorCode::ConnectionFailed,
            ErrorCode::StorageError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_invalid_code() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_http_status() {
        assert_eq!(ErrorCode::OrderNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::OrderAlreadyCompleted.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::InvalidCredentials.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ErrorCode::ProofRequired.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_serialize_as_u16() {
        let json = serde_json::to_string(&ErrorCode::InvalidCredentials).unwrap();
        assert_eq!(json, "1002");
        let back: ErrorCode = serde_json::from_str("1002").unwrap();
        assert_eq!(back, ErrorCode::InvalidCredentials);
    }
}
