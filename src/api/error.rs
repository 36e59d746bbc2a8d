//! API Error Types
//!
//! Errors raised by the HTTP client layer. Authentication flows wrap these in
//! [`AuthError`] so the rejection message can be shown on the form.

use thiserror::Error;

/// Errors that can occur when talking to the events API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Request timeout")]
    Timeout,

    /// Connection refused or host unreachable
    #[error("Events API unavailable")]
    Unavailable,

    /// The server answered with a non-success status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a transport error
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::Unavailable
        } else {
            ApiError::Request(err)
        }
    }

    /// HTTP status for non-success responses
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors surfaced by login and registration
#[derive(Error, Debug)]
pub enum AuthError {
    /// The server refused the credentials; carries the message to display
    #[error("{0}")]
    Rejected(String),

    #[error("Authentication request failed: {0}")]
    Network(#[from] ApiError),

    /// Success status but no token in the body
    #[error("Authentication response did not contain a token")]
    MalformedResponse,

    #[error("Failed to persist session: {0}")]
    Storage(#[from] crate::session::StorageError),
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::Status {
            status: 404,
            message: "Event not found".to_string(),
        };
        assert_eq!(err.to_string(), "API error 404: Event not found");
        assert_eq!(err.status(), Some(404));

        let err = AuthError::Rejected("bad credentials".to_string());
        assert_eq!(err.to_string(), "bad credentials");
    }

    #[test]
    fn test_api_error_wraps_into_auth_error() {
        let auth: AuthError = ApiError::Unavailable.into();
        assert!(matches!(auth, AuthError::Network(ApiError::Unavailable)));
        assert_eq!(ApiError::Timeout.status(), None);
    }
}
