//! External Auth Provider Integration
//! Mission: Talk to the remote identity provider and normalize its answers

pub mod client;
pub mod outcome;

pub use client::{ApexClient, UpstreamAuth};

use serde_json::Value;

/// Failure talking to, or being refused by, the upstream provider.
///
/// `Unavailable` is a transport problem (timeout, connection error);
/// `Rejected` is an application-level refusal carrying the provider's
/// response so callers can pick status codes and messages accordingly.
#[derive(Debug, Clone)]
pub enum UpstreamError {
    Unavailable(String),
    Rejected { message: String, response: Value },
}

impl UpstreamError {
    /// Best-effort human-readable message for the caller.
    pub fn message(&self) -> &str {
        match self {
            UpstreamError::Unavailable(msg) => msg,
            UpstreamError::Rejected { message, .. } => message,
        }
    }
}

impl std::fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for UpstreamError {}
