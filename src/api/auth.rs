//! Auth operations.

use reqwest::Method;

use super::{ApiClient, ApiError};
use crate::models::{AuthResponse, Credentials, Registration};

impl ApiClient {
    /// `POST /auth/login`. On success the token in the response has already
    /// been persisted by the inbound interceptor.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.send_json(Method::POST, "/auth/login", credentials).await
    }

    /// `POST /auth/register`. Registers and signs in; the token is persisted
    /// the same way as for login.
    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        self.send_json(Method::POST, "/auth/register", registration)
            .await
    }

    /// Drop the stored credential. Purely local; the backend keeps no session
    /// state beyond the token itself.
    pub fn logout(&self) {
        self.store.clear();
    }

    /// The credential currently in storage, if any.
    pub fn stored_token(&self) -> Option<String> {
        self.store.load()
    }
}
