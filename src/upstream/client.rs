//! Upstream HTTP Client
//! Mission: Carry sanitized credentials to the remote provider and bring
//! back a normalized answer

use crate::config::Config;
use crate::upstream::{outcome, UpstreamError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::{error, info, warn};

const LOGIN_ENDPOINT: &str = "/api/login";
const RESET_ENDPOINT: &str = "/login/reset_senha";
const USER_AGENT: &str = "apex-auth-gateway/1.0";

/// Outbound authentication operations, behind a trait so handlers and
/// tests depend on the interface rather than on a live HTTP client.
///
/// Callers pass identifiers that already went through sanitization and a
/// password that is already hashed; plaintext passwords never reach this
/// layer.
#[async_trait]
pub trait UpstreamAuth: Send + Sync {
    /// Authenticate a user. `Ok` carries the provider's user payload.
    async fn authenticate(
        &self,
        identifier: &str,
        password_hash: &str,
    ) -> Result<Value, UpstreamError>;

    /// Reset a user's password. `Ok` carries a human-readable message.
    async fn reset_password(
        &self,
        identifier: &str,
        new_password_hash: &str,
    ) -> Result<String, UpstreamError>;
}

/// Reqwest-backed client for the provider's ORDS-style REST endpoints.
pub struct ApexClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApexClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build upstream HTTP client")?;

        Ok(Self {
            http,
            base_url: config.upstream_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST a JSON body and classify the transport outcome.
    ///
    /// 200/201 count as success; the body is parsed as JSON with a
    /// raw-text fallback. Any other status, connection failure, or
    /// timeout is a failure. No retry loop: a failed attempt surfaces
    /// immediately.
    async fn post(&self, endpoint: &str, body: Value) -> Result<Value, UpstreamError> {
        let url = format!("{}{}", self.base_url, endpoint);
        info!("Upstream request: POST {}", url);

        let response = self.http.post(&url).json(&body).send().await.map_err(|e| {
            if e.is_timeout() {
                error!("Upstream timeout on {}", url);
                UpstreamError::Unavailable(
                    "Timeout communicating with the authentication provider".to_string(),
                )
            } else if e.is_connect() {
                error!("Upstream connection error on {}: {}", url, e);
                UpstreamError::Unavailable(
                    "Connection error reaching the authentication provider".to_string(),
                )
            } else {
                error!("Upstream request error on {}: {}", url, e);
                UpstreamError::Unavailable(
                    "Error communicating with the authentication provider".to_string(),
                )
            }
        })?;

        let status = response.status();
        info!("Upstream response status: {}", status);

        if status == StatusCode::OK || status == StatusCode::CREATED {
            let text = response.text().await.unwrap_or_default();
            match serde_json::from_str::<Value>(&text) {
                Ok(parsed) => Ok(parsed),
                Err(_) => Ok(json!({ "data": text })),
            }
        } else {
            let text = response.text().await.unwrap_or_default();
            let rejected = json!({
                "erro": "Authentication provider returned an error",
                "status_code": status.as_u16(),
                "resposta": truncate(&text, 500),
            });
            let message = outcome::login_error_message(&rejected)
                .unwrap_or_else(|| "Authentication provider returned an error".to_string());
            warn!("Upstream rejected request: {} {}", status, truncate(&text, 200));
            Err(UpstreamError::Rejected {
                message,
                response: rejected,
            })
        }
    }
}

#[async_trait]
impl UpstreamAuth for ApexClient {
    async fn authenticate(
        &self,
        identifier: &str,
        password_hash: &str,
    ) -> Result<Value, UpstreamError> {
        info!(
            "Authenticating upstream: login='{}', senha=[HASH:{}...]",
            identifier,
            truncate(password_hash, 10)
        );

        let body = json!({
            "email_telefone": identifier,
            "senha": password_hash,
        });

        self.post(LOGIN_ENDPOINT, body).await
    }

    async fn reset_password(
        &self,
        identifier: &str,
        new_password_hash: &str,
    ) -> Result<String, UpstreamError> {
        info!("Requesting upstream password reset for '{}'", identifier);

        let body = json!({
            "email_telefone": identifier,
            "nova_senha": new_password_hash,
        });

        let response = self.post(RESET_ENDPOINT, body).await?;
        outcome::reset_result(response)
    }
}

fn truncate(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
