//! Error types for registry operations.
//!
//! Every error is local to the registry: there is no I/O underneath, so none of
//! them is worth retrying. A failed operation never leaves partial state behind.

use thiserror::Error;

/// Numeric error codes, matching the prefixes hosts of the federation expect
/// in front of error messages (`"-1:app name is null"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum SsoErrorCode {
    /// Malformed registration input
    InvalidArgument = -1,
    /// Name collision
    AlreadyRegistered = -2,
    /// Unknown application name
    NotFound = -3,
    /// Registry used before `init`
    Uninitialized = -4,
}

impl SsoErrorCode {
    /// The raw numeric value.
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Errors returned by [`AppRegistry`](crate::AppRegistry) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SsoError {
    /// The registration record is malformed.
    #[error("{0}")]
    InvalidArgument(&'static str),

    /// An application with the same name is already registered.
    #[error("app has been registered: {0}")]
    AlreadyRegistered(String),

    /// No application is registered under this name.
    #[error("app not found: {0}")]
    NotFound(String),

    /// The registry was used before the host called `init`.
    #[error("registry is not initialized")]
    Uninitialized,
}

impl SsoError {
    /// Message used when the application name is empty.
    pub const EMPTY_NAME: &'static str = "app name is null";

    /// Message used when the callback URL is empty or has an unaccepted scheme.
    pub const BAD_API_URL: &'static str = "api url error";

    /// Get the numeric error code.
    pub fn code(&self) -> SsoErrorCode {
        match self {
            Self::InvalidArgument(_) => SsoErrorCode::InvalidArgument,
            Self::AlreadyRegistered(_) => SsoErrorCode::AlreadyRegistered,
            Self::NotFound(_) => SsoErrorCode::NotFound,
            Self::Uninitialized => SsoErrorCode::Uninitialized,
        }
    }

    /// Render the error as `"<code>:<message>"`.
    pub fn coded_message(&self) -> String {
        format!("{}:{}", self.code().as_i32(), self)
    }

    /// Registry errors are never transient.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SsoError::InvalidArgument(SsoError::EMPTY_NAME).code(),
            SsoErrorCode::InvalidArgument
        );
        assert_eq!(
            SsoError::AlreadyRegistered("shop".into()).code(),
            SsoErrorCode::AlreadyRegistered
        );
        assert_eq!(SsoError::NotFound("shop".into()).code().as_i32(), -3);
        assert_eq!(SsoError::Uninitialized.code().as_i32(), -4);
    }

    #[test]
    fn test_coded_message() {
        let err = SsoError::InvalidArgument(SsoError::EMPTY_NAME);
        assert_eq!(err.coded_message(), "-1:app name is null");

        let err = SsoError::InvalidArgument(SsoError::BAD_API_URL);
        assert_eq!(err.coded_message(), "-1:api url error");

        let err = SsoError::AlreadyRegistered("shop".into());
        assert!(err.coded_message().starts_with("-2:"));
        assert!(err.to_string().contains("shop"));
    }

    #[test]
    fn test_never_retryable() {
        assert!(!SsoError::Uninitialized.is_retryable());
        assert!(!SsoError::AlreadyRegistered("a".into()).is_retryable());
    }
}
