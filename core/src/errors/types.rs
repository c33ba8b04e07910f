//! Error types for OTP dispatch, verification sessions and the auth flow
//!
//! Mismatched and expired codes are not errors: they are ordinary state
//! transitions of a verification session.

use thiserror::Error;

/// Wire code for malformed input
pub const INVALID_ARGUMENT: &str = "invalid-argument";

/// Wire code for delivery failures
pub const INTERNAL: &str = "internal";

/// Failure of a single dispatch call
///
/// `InvalidArgument` is a caller bug and must not be retried.
/// `Internal` may be retried by the caller a bounded number of times.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl DispatchError {
    pub fn bad_email() -> Self {
        Self::InvalidArgument("bad email".to_string())
    }

    pub fn bad_code() -> Self {
        Self::InvalidArgument("bad code".to_string())
    }

    /// The only message a caller ever sees for transport trouble
    pub fn delivery_failed() -> Self {
        Self::Internal("failed to send verification email".to_string())
    }

    /// Machine-readable code used on the RPC boundary
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => INVALID_ARGUMENT,
            Self::Internal(_) => INTERNAL,
        }
    }

    /// Caller-safe message
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidArgument(message) | Self::Internal(message) => message,
        }
    }

    /// Rebuild an error from its wire representation
    ///
    /// Unknown codes are treated as internal failures.
    pub fn from_wire(code: &str, message: impl Into<String>) -> Self {
        match code {
            INVALID_ARGUMENT => Self::InvalidArgument(message.into()),
            _ => Self::Internal(message.into()),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Internal(_))
    }
}

/// Failure reported by a mail transport
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("message rejected: {0}")]
    Rejected(String),

    #[error("invalid message: {0}")]
    InvalidMessage(String),
}

/// Errors surfaced by session operations that cannot be expressed as a state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("a verification email is already being sent")]
    DispatchInProgress,

    #[error("session is already verified")]
    AlreadyVerified,

    #[error("session has been torn down")]
    TornDown,

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Errors from the auth flow controller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthFlowError {
    #[error("auth provider failure: {0}")]
    Provider(String),

    #[error("email has not been verified")]
    NotVerified,

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl From<DispatchError> for AuthFlowError {
    fn from(error: DispatchError) -> Self {
        Self::Session(SessionError::Dispatch(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_error_wire_codes() {
        assert_eq!(DispatchError::bad_email().code(), "invalid-argument");
        assert_eq!(DispatchError::bad_email().message(), "bad email");
        assert_eq!(DispatchError::bad_code().message(), "bad code");
        assert_eq!(DispatchError::delivery_failed().code(), "internal");
        assert_eq!(
            DispatchError::delivery_failed().message(),
            "failed to send verification email"
        );
    }

    #[test]
    fn test_from_wire() {
        assert_eq!(
            DispatchError::from_wire("invalid-argument", "bad code"),
            DispatchError::bad_code()
        );
        assert_eq!(
            DispatchError::from_wire("unavailable", "boom"),
            DispatchError::Internal("boom".to_string())
        );
    }

    #[test]
    fn test_retryability() {
        assert!(!DispatchError::bad_email().is_retryable());
        assert!(DispatchError::delivery_failed().is_retryable());
    }
}
