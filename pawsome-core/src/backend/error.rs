//! Backend error types.

use thiserror::Error;

/// Errors from the table and storage APIs.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Server returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("User not authenticated")]
    NotAuthenticated,
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            BackendError::Decode(e.to_string())
        } else {
            BackendError::Http(e.to_string())
        }
    }
}

/// Errors from the auth API. The message is what the user gets to see.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    #[error("{0}")]
    Rejected(String),

    #[error("HTTP error: {0}")]
    Http(String),
}

/// Fallback text for auth failures without a server message.
pub const AUTH_FAILED_MESSAGE: &str = "認証に失敗しました。";

/// Errors from uploading a dog photo.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Failed to read image file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image file has no name")]
    MissingName,

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Pulls a human readable message out of an error body.
///
/// Auth responses use `msg`, `error_description` or `message`; table and
/// storage responses use `message` (storage sometimes nests it in `error`).
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_msg() {
        let body = r#"{"code": 400, "msg": "Invalid login credentials", "message": "other"}"#;
        assert_eq!(
            error_message(body).as_deref(),
            Some("Invalid login credentials")
        );
    }

    #[test]
    fn test_error_message_oauth_style() {
        let body = r#"{"error": "invalid_grant", "error_description": "Refresh Token Not Found"}"#;
        assert_eq!(
            error_message(body).as_deref(),
            Some("Refresh Token Not Found")
        );
    }

    #[test]
    fn test_error_message_not_json() {
        assert!(error_message("<html>bad gateway</html>").is_none());
        assert!(error_message(r#"{"msg": ""}"#).is_none());
    }

    #[test]
    fn test_status_display() {
        let err = BackendError::Status {
            status: 409,
            message: "duplicate key".into(),
        };
        assert_eq!(err.to_string(), "Server returned status 409: duplicate key");
    }
}
