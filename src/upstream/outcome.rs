//! Upstream Response Normalization
//!
//! The provider's success vocabulary is inconsistent: some endpoints set a
//! boolean flag (`sucesso`/`success`), others a `status` string whose
//! casing varies, and error text may live under `erro`, `mensagem`, or
//! `message`. The recognized signals are checked in a fixed priority
//! order here, away from any transport code, so a provider contract
//! change touches exactly this file.

use crate::upstream::UpstreamError;
use serde_json::Value;

pub const USER_NOT_FOUND: &str = "User not found";
pub const RESET_OK: &str = "Password changed successfully";
const RESET_DEFAULT_FAILURE: &str = "Failed to change password";
const UNEXPECTED_RESPONSE: &str = "Unexpected response from the authentication provider";

/// Classified result of a password-reset response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    Success(String),
    NotFound,
    Failure(String),
}

/// Classify a password-reset response, in fixed priority order:
/// `status == "NAO_ENCONTRADO"`, then explicit boolean success flags,
/// then the case-sensitive status strings `OK`/`SUCESSO`/`sucesso`,
/// otherwise a failure with the best available message.
pub fn classify_reset(response: &Value) -> ResetOutcome {
    let Some(map) = response.as_object() else {
        return ResetOutcome::Failure(UNEXPECTED_RESPONSE.to_string());
    };

    let status = map.get("status").and_then(Value::as_str);

    if status == Some("NAO_ENCONTRADO") {
        return ResetOutcome::NotFound;
    }

    let flag = |key: &str| map.get(key).and_then(Value::as_bool).unwrap_or(false);
    if flag("sucesso") || flag("success") {
        return ResetOutcome::Success(RESET_OK.to_string());
    }

    if matches!(status, Some("OK") | Some("SUCESSO") | Some("sucesso")) {
        return ResetOutcome::Success(RESET_OK.to_string());
    }

    let message = reset_error_message(response)
        .unwrap_or_else(|| RESET_DEFAULT_FAILURE.to_string());
    ResetOutcome::Failure(message)
}

/// Map a reset response body to the client's result type.
pub fn reset_result(response: Value) -> Result<String, UpstreamError> {
    match classify_reset(&response) {
        ResetOutcome::Success(message) => Ok(message),
        ResetOutcome::NotFound => Err(UpstreamError::Rejected {
            message: USER_NOT_FOUND.to_string(),
            response,
        }),
        ResetOutcome::Failure(message) => Err(UpstreamError::Rejected { message, response }),
    }
}

/// Error message for authentication responses: `erro`, then `mensagem`,
/// then `message`.
pub fn login_error_message(response: &Value) -> Option<String> {
    first_string(response, &["erro", "mensagem", "message"])
}

/// Error message for reset responses: `mensagem`, then `message`, then
/// `erro` (the provider's reset endpoint prefers the Portuguese key).
pub fn reset_error_message(response: &Value) -> Option<String> {
    first_string(response, &["mensagem", "message", "erro"])
}

fn first_string(response: &Value, keys: &[&str]) -> Option<String> {
    let map = response.as_object()?;
    keys.iter()
        .find_map(|k| map.get(*k).and_then(Value::as_str))
        .map(|s| s.to_string())
}
