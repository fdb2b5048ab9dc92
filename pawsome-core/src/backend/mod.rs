//! Client for the hosted backend.
//!
//! The backend exposes three REST surfaces under one base URL:
//! - `/auth/v1`: email/password accounts and sessions
//! - `/rest/v1`: the `dogs`, `weight_logs`, `food_logs` and `diaries` tables
//! - `/storage/v1`: the `dog-images` bucket
//!
//! Every request carries the project's anon key in the `apikey` header. Table
//! and storage requests are authorized with the signed-in user's access token
//! so that row-level ownership rules apply on the server.

mod auth;
mod error;
mod records;
mod storage;
mod tables;

pub use auth::{Session, SignUpOutcome, User};
pub use error::{AuthError, BackendError, UploadError, AUTH_FAILED_MESSAGE};
pub use records::HealthRecords;
pub use storage::{ImageFile, IMAGE_BUCKET};
pub use tables::{Order, Table};

use reqwest::RequestBuilder;

/// Connection settings for the hosted backend.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// Project base URL, e.g. `https://abc.example.co`
    pub url: String,
    /// Public anon key of the project
    pub anon_key: String,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
        }
    }
}

/// HTTP client for auth, tables and storage.
#[derive(Debug, Clone)]
pub struct Backend {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    access_token: Option<String>,
}

impl Backend {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key,
            access_token: None,
        }
    }

    /// Returns the base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sets or clears the access token used for table and storage calls.
    pub fn set_access_token(&mut self, token: Option<String>) {
        self.access_token = token;
    }

    pub fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Adds the `apikey` and bearer headers. Without a session the anon key
    /// doubles as the bearer token.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.anon_key);
        request
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", bearer))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let backend = Backend::new(BackendConfig::new("https://pets.example.co/", "anon"));
        assert_eq!(backend.base_url(), "https://pets.example.co");
        assert_eq!(
            backend.endpoint("/rest/v1/dogs"),
            "https://pets.example.co/rest/v1/dogs"
        );
    }

    #[test]
    fn test_access_token_toggle() {
        let mut backend = Backend::new(BackendConfig::new("http://localhost", "anon"));
        assert!(!backend.has_access_token());
        backend.set_access_token(Some("jwt".into()));
        assert!(backend.has_access_token());
        backend.set_access_token(None);
        assert!(!backend.has_access_token());
    }
}
