//! Typed client for the event booking REST API.
//!
//! [`ApiClient`] owns the two cross-cutting interceptor behaviors: it
//! attaches the stored bearer credential to every outbound request, captures
//! refreshed tokens from response bodies, and turns a 401 into a cleared
//! store plus a session-expired signal. The per-resource operation groups
//! live in the submodules.

pub mod auth;
pub mod bookings;
pub mod error;
pub mod events;
pub mod tags;
pub mod upload;
pub mod validation;

pub use error::ApiError;

use anyhow::{Context, Result};
use reqwest::{header, Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::ApiConfig;
use crate::session::{SessionExpired, TokenStore};

pub struct ApiClient {
    http: Client,
    base_url: String,
    upload_host: String,
    store: TokenStore,
    token_override: Option<String>,
    expired_tx: mpsc::UnboundedSender<SessionExpired>,
}

impl ApiClient {
    /// Build a client. Also returns the receiving half of the session-expired
    /// channel; the top-level application subscribes to it and decides how to
    /// react (the HTTP layer never navigates on its own).
    pub fn new(
        config: &ApiConfig,
        store: TokenStore,
    ) -> Result<(Self, mpsc::UnboundedReceiver<SessionExpired>)> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        let (expired_tx, expired_rx) = mpsc::unbounded_channel();

        let client = Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            upload_host: config.upload_host.trim_end_matches('/').to_string(),
            store,
            token_override: None,
            expired_tx,
        };
        Ok((client, expired_rx))
    }

    /// Use an explicit credential instead of whatever the store holds.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token_override = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Outbound interceptor: attach the bearer credential when one exists.
    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        let token = self
            .token_override
            .clone()
            .or_else(|| self.store.load());
        match token {
            Some(token) => req.header(header::AUTHORIZATION, format!("Bearer {}", token)),
            None => req,
        }
    }

    /// Dispatch a request and run the inbound interceptors over the response.
    /// Returns the raw success body; failures are already normalized.
    async fn execute(&self, req: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = self.authorize(req).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status == StatusCode::UNAUTHORIZED {
            // Non-recoverable locally: drop the credential and tell the
            // top-level application.
            self.store.clear();
            let _ = self.expired_tx.send(SessionExpired);
            return Err(ApiError::SessionExpired);
        }

        if !status.is_success() {
            return Err(ApiError::from_body(&body));
        }

        // Login/register responses double as a session refresh.
        if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&body) {
            if let Some(token) = value.get("token").and_then(|t| t.as_str()) {
                if let Err(e) = self.store.save(token) {
                    tracing::warn!(error = %e, "Failed to persist refreshed token");
                }
            }
        }

        Ok(body.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.execute(self.http.get(self.url(path))).await?;
        decode(&body)
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: &B,
    ) -> Result<T, ApiError> {
        let req = self.http.request(method, self.url(path)).json(payload);
        let body = self.execute(req).await?;
        decode(&body)
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.http.delete(self.url(path))).await?;
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Failed to decode response body");
        ApiError::unexpected()
    })
}
