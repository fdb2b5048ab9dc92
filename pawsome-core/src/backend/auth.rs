//! Email/password accounts and sessions.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::error::{error_message, AuthError, AUTH_FAILED_MESSAGE};
use super::Backend;

/// Seconds before expiry at which a session is already treated as expired.
const EXPIRY_MARGIN_SECS: i64 = 30;

/// The signed-in account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// A signed-in session issued by the auth API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix timestamp (seconds) at which the access token expires
    pub expires_at: i64,
    pub user: User,
}

impl Session {
    pub fn is_expired_at(&self, now: i64) -> bool {
        now + EXPIRY_MARGIN_SECS >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }
}

/// Result of a sign-up request.
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpOutcome {
    /// The account needs e-mail confirmation before signing in.
    ConfirmationSent,
    /// The project auto-confirms accounts; the user is signed in.
    SignedIn(Session),
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: User,
}

impl TokenResponse {
    fn into_session(self) -> Session {
        let expires_at = self
            .expires_at
            .unwrap_or_else(|| Utc::now().timestamp() + self.expires_in.unwrap_or(3600));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

impl Backend {
    /// Registers a new account.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError> {
        let body = self
            .auth_request(
                "/auth/v1/signup",
                serde_json::json!({ "email": email, "password": password }),
            )
            .await?;

        // Auto-confirmed projects answer with a full token response.
        if body.get("access_token").is_some() {
            let token: TokenResponse = serde_json::from_value(body)
                .map_err(|e| AuthError::Http(e.to_string()))?;
            Ok(SignUpOutcome::SignedIn(token.into_session()))
        } else {
            Ok(SignUpOutcome::ConfirmationSent)
        }
    }

    /// Signs in with email and password.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let body = self
            .auth_request(
                "/auth/v1/token?grant_type=password",
                serde_json::json!({ "email": email, "password": password }),
            )
            .await?;
        parse_session(body)
    }

    /// Exchanges a refresh token for a fresh session.
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let body = self
            .auth_request(
                "/auth/v1/token?grant_type=refresh_token",
                serde_json::json!({ "refresh_token": refresh_token }),
            )
            .await?;
        parse_session(body)
    }

    /// Revokes the current session on the server.
    pub async fn sign_out_session(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .http
            .post(self.endpoint("/auth/v1/logout"))
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(|e| AuthError::Http(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(AuthError::Rejected(
                error_message(&text).unwrap_or_else(|| AUTH_FAILED_MESSAGE.to_string()),
            ))
        }
    }

    async fn auth_request(
        &self,
        path: &str,
        payload: serde_json::Value,
    ) -> Result<serde_json::Value, AuthError> {
        let response = self
            .http
            .post(self.endpoint(path))
            .header("apikey", &self.anon_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AuthError::Http(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::Http(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(%status, path, "auth request rejected");
            return Err(AuthError::Rejected(
                error_message(&text).unwrap_or_else(|| AUTH_FAILED_MESSAGE.to_string()),
            ));
        }

        serde_json::from_str(&text).map_err(|e| AuthError::Http(e.to_string()))
    }
}

fn parse_session(body: serde_json::Value) -> Result<Session, AuthError> {
    serde_json::from_value::<TokenResponse>(body)
        .map(TokenResponse::into_session)
        .map_err(|e| AuthError::Http(e.to_string()))
}
