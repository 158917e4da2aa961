//! Error normalization at the API boundary.
//!
//! Callers never see raw transport errors. Every failure collapses into a
//! single human-readable message, preferring the server's `error` field when
//! one is present. A 401 is the one structured exception: the client clears
//! the stored credential and reports [`ApiError::SessionExpired`].

use serde::Deserialize;

/// Fallback message when the server gives us nothing usable.
pub const GENERIC_ERROR: &str = "An unexpected error occurred";

/// Error envelope the backend uses for failure responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Error surfaced by every façade operation.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A normalized transport or server failure.
    #[error("{0}")]
    Message(String),

    /// The backend rejected the stored credential. By the time the caller
    /// sees this the credential has been cleared and the expiry signal sent.
    #[error("Session expired")]
    SessionExpired,
}

impl ApiError {
    /// Normalize a failure response body: prefer the server-supplied `error`
    /// field, fall back to the generic message.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(e) if !e.error.is_empty() => ApiError::Message(e.error),
            _ => ApiError::Message(GENERIC_ERROR.to_string()),
        }
    }

    pub fn unexpected() -> Self {
        ApiError::Message(GENERIC_ERROR.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        tracing::debug!(error = %err, "Transport error");
        ApiError::unexpected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_field_is_used_verbatim() {
        let err = ApiError::from_body(br#"{"error":"Email already registered"}"#);
        assert_eq!(err.to_string(), "Email already registered");
    }

    #[test]
    fn test_missing_error_field_falls_back() {
        let err = ApiError::from_body(br#"{"message":"nope"}"#);
        assert_eq!(err.to_string(), GENERIC_ERROR);
    }

    #[test]
    fn test_non_json_body_falls_back() {
        let err = ApiError::from_body(b"<html>502 Bad Gateway</html>");
        assert_eq!(err.to_string(), GENERIC_ERROR);
    }

    #[test]
    fn test_empty_error_field_falls_back() {
        let err = ApiError::from_body(br#"{"error":""}"#);
        assert_eq!(err.to_string(), GENERIC_ERROR);
    }
}
