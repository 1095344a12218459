//! JWT Token Service
//! Mission: Issue, verify, and revoke session tokens securely

use crate::auth::models::Claims;
use crate::auth::revocation::RevocationStore;
use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Why a token failed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Token was explicitly revoked. Checked before anything else, so a
    /// revoked token stays dead even while its signature and expiry would
    /// still pass.
    Revoked,
    Expired,
    InvalidSignature,
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            TokenError::Revoked => "Token has been revoked",
            TokenError::Expired => "Token expired",
            TokenError::InvalidSignature => "Invalid token",
        };
        write!(f, "{msg}")
    }
}

impl std::error::Error for TokenError {}

/// HS256 token service over an injected revocation store.
pub struct TokenService {
    secret: String,
    expiration_hours: i64,
    revocations: Arc<dyn RevocationStore>,
}

impl TokenService {
    pub fn new(secret: String, expiration_hours: i64, revocations: Arc<dyn RevocationStore>) -> Self {
        Self {
            secret,
            expiration_hours,
            revocations,
        }
    }

    /// Token lifetime in seconds, as advertised in `expires_in` fields.
    pub fn expires_in_secs(&self) -> usize {
        (self.expiration_hours * 3600) as usize
    }

    /// Issue a signed token embedding the given user payload.
    pub fn issue(&self, usuario: Value) -> Result<(String, usize)> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(chrono::Duration::hours(self.expiration_hours))
            .context("Invalid expiration timestamp")?
            .timestamp() as usize;

        // Fresh jti per token: without it, two tokens for the same user
        // issued within the same second would be byte-identical, and a
        // refresh would hand back the very token it just revoked.
        let claims = Claims {
            usuario,
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp() as usize,
            exp,
        };

        debug!("Issuing session token, expires in {}h", self.expiration_hours);

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to sign session token")?;

        Ok((token, self.expires_in_secs()))
    }

    /// Verify a token and return its claims.
    ///
    /// Revocation short-circuits: a revoked token is reported as such
    /// without decoding it at all.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        if self.revocations.is_revoked(token) {
            return Err(TokenError::Revoked);
        }

        // No leeway: an expired token is expired, full stop.
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::InvalidSignature,
        })
    }

    /// Add a token to the revocation set. Idempotent; never fails, even
    /// for tokens that would not verify.
    pub fn revoke(&self, token: &str) {
        debug!("Revoking session token");
        self.revocations.revoke(token);
    }
}
