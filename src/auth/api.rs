//! Authentication API Endpoints
//! Mission: The /auth surface in front of the upstream identity provider

use crate::auth::{
    jwt::TokenService,
    middleware::{auth_middleware, extract_bearer_token, extract_claims},
    models::{
        Claims, CredentialsRequest, LoginResponse, RefreshResponse, StatusResponse, VerifyResponse,
    },
};
use crate::security::{audit, classify_identifier, sanitize::sanitize, validate_password};
use crate::upstream::UpstreamAuth;
use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use sha2::{Digest, Sha256};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shared auth state.
#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<TokenService>,
    pub upstream: Arc<dyn UpstreamAuth>,
}

/// Assemble the gateway routes. Protected routes run behind the bearer
/// guard; login, reset-password, and health stay public.
pub fn auth_router(state: AuthState) -> Router {
    let protected = Router::new()
        .route("/auth/logout", post(logout))
        .route("/auth/verify-token", post(verify_token))
        .route("/auth/refresh", post(refresh))
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            auth_middleware,
        ))
        .with_state(state.clone());

    let public = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/reset-password", post(reset_password))
        .route("/health", get(health_check))
        .with_state(state);

    Router::new().merge(public).merge(protected)
}

/// SHA-256 hash of a sanitized password, hex-encoded.
///
/// Hashing happens locally so the plaintext never leaves the gateway.
fn hash_password(password: &str) -> Result<String, ApiError> {
    let cleaned = sanitize(password).map_err(|_| ApiError::RejectedInput)?;
    Ok(hex::encode(Sha256::digest(cleaned.as_bytes())))
}

/// Login - POST /auth/login
pub async fn login(
    State(state): State<AuthState>,
    addr: Option<ConnectInfo<SocketAddr>>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let client_ip = addr.map(|ConnectInfo(a)| a.ip());

    let (Some(email_telefone), Some(senha)) = (payload.email_telefone, payload.senha) else {
        audit::invalid_payload("/auth/login", "missing email_telefone or senha", client_ip);
        return Err(ApiError::MissingCredentials);
    };

    let Some(identifier) = classify_identifier(&email_telefone) else {
        audit::suspicious_login(&email_telefone, "invalid identifier format", client_ip);
        return Err(ApiError::InvalidIdentifier);
    };

    if let Err(errors) = validate_password(&senha) {
        audit::invalid_payload("/auth/login", "password failed validation", client_ip);
        return Err(ApiError::ValidationFailed(errors));
    }

    info!("🔐 Login attempt: {} ({})", identifier.value(), identifier.kind());

    let senha_hash = hash_password(&senha)?;

    let usuario = state
        .upstream
        .authenticate(identifier.value(), &senha_hash)
        .await
        .map_err(|e| {
            warn!("❌ Failed login for {}: {}", identifier.value(), e.message());
            ApiError::AuthenticationFailed(e.message().to_string())
        })?;

    let (token, expires_in) = state.tokens.issue(usuario.clone()).map_err(|e| {
        error!("Failed to issue session token: {e:#}");
        ApiError::Internal
    })?;

    info!("✅ Login successful: {}", identifier.value());

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        token,
        usuario,
        expires_in,
    }))
}

/// Logout - POST /auth/logout (bearer-protected)
pub async fn logout(State(state): State<AuthState>, req: Request) -> Result<Json<StatusResponse>, ApiError> {
    let token = extract_bearer_token(&req).ok_or_else(|| {
        error!("Logout reached without a bearer token in extensions");
        ApiError::Internal
    })?;

    state.tokens.revoke(&token.0);
    info!("Session token revoked on logout");

    Ok(Json(StatusResponse {
        success: true,
        message: "Logout successful".to_string(),
    }))
}

/// Verify token - POST /auth/verify-token (bearer-protected)
pub async fn verify_token(req: Request) -> Result<Json<VerifyResponse>, ApiError> {
    let claims = extract_claims(&req).ok_or(ApiError::Internal)?;

    Ok(Json(VerifyResponse {
        success: true,
        message: "Token is valid".to_string(),
        valid: true,
        usuario: claims.usuario.clone(),
    }))
}

/// Refresh - POST /auth/refresh (bearer-protected)
///
/// Revokes the presented token and issues a fresh one carrying the same
/// user payload.
pub async fn refresh(State(state): State<AuthState>, req: Request) -> Result<Json<RefreshResponse>, ApiError> {
    let claims: Claims = extract_claims(&req).cloned().ok_or(ApiError::Internal)?;
    let token = extract_bearer_token(&req).cloned().ok_or(ApiError::Internal)?;

    state.tokens.revoke(&token.0);

    let (new_token, expires_in) = state.tokens.issue(claims.usuario).map_err(|e| {
        error!("Failed to issue refreshed token: {e:#}");
        ApiError::Internal
    })?;

    info!("Session token refreshed");

    Ok(Json(RefreshResponse {
        success: true,
        message: "Token refreshed successfully".to_string(),
        token: new_token,
        expires_in,
    }))
}

/// Reset password - POST /auth/reset-password
pub async fn reset_password(
    State(state): State<AuthState>,
    addr: Option<ConnectInfo<SocketAddr>>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let client_ip: Option<IpAddr> = addr.map(|ConnectInfo(a)| a.ip());

    let (Some(email_telefone), Some(senha)) = (payload.email_telefone, payload.senha) else {
        audit::invalid_payload(
            "/auth/reset-password",
            "missing email_telefone or senha",
            client_ip,
        );
        return Err(ApiError::MissingResetFields);
    };

    let Some(identifier) = classify_identifier(&email_telefone) else {
        audit::suspicious_login(&email_telefone, "invalid identifier format", client_ip);
        return Err(ApiError::InvalidIdentifier);
    };

    if let Err(errors) = validate_password(&senha) {
        audit::invalid_payload("/auth/reset-password", "password failed validation", client_ip);
        return Err(ApiError::ValidationFailed(errors));
    }

    let senha_hash = hash_password(&senha)?;

    let message = state
        .upstream
        .reset_password(identifier.value(), &senha_hash)
        .await
        .map_err(|e| {
            warn!(
                "Password reset failed for {}: {}",
                identifier.value(),
                e.message()
            );
            ApiError::ResetFailed(e.message().to_string())
        })?;

    info!("Password reset completed for {}", identifier.value());

    Ok(Json(StatusResponse {
        success: true,
        message,
    }))
}

/// Health check - GET /health
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "message": "API is running",
        "service": "apex-auth-gateway",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// API error taxonomy for the /auth surface.
#[derive(Debug)]
pub enum ApiError {
    /// Login payload missing email_telefone or senha.
    MissingCredentials,
    /// Reset payload missing email_telefone or senha.
    MissingResetFields,
    /// Identifier is neither a valid email nor a valid RA.
    InvalidIdentifier,
    /// Password failed one or more policy rules.
    ValidationFailed(Vec<String>),
    /// Input contained deny-listed markers.
    RejectedInput,
    /// Upstream refused the credentials or was unreachable.
    AuthenticationFailed(String),
    /// Upstream refused the reset or was unreachable.
    ResetFailed(String),
    /// Anything unanticipated; details go to the log sink only.
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MissingCredentials => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "message": "Email/RA and password are required" }),
            ),
            ApiError::MissingResetFields => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "message": "Email and new password are required" }),
            ),
            ApiError::InvalidIdentifier => (
                StatusCode::BAD_REQUEST,
                json!({
                    "success": false,
                    "message": "Email or RA has an invalid format or contains disallowed characters",
                }),
            ),
            ApiError::ValidationFailed(errors) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "success": false,
                    "message": "Invalid credentials payload",
                    "errors": errors,
                }),
            ),
            ApiError::RejectedInput => (
                StatusCode::BAD_REQUEST,
                json!({
                    "success": false,
                    "message": "Input contains disallowed characters or commands",
                }),
            ),
            ApiError::AuthenticationFailed(message) => (
                StatusCode::UNAUTHORIZED,
                json!({ "success": false, "message": message }),
            ),
            ApiError::ResetFailed(message) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "message": message }),
            ),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "success": false, "message": "Internal server error" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
