//! Authentication Guard
//! Mission: Gate protected endpoints behind bearer-token verification

use crate::auth::jwt::{TokenError, TokenService};
use crate::auth::models::Claims;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Raw bearer token as presented by the client, kept alongside the
/// decoded claims so logout/refresh can revoke exactly what was sent.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

/// Middleware verifying `Authorization: Bearer <token>` before the
/// wrapped handler runs.
///
/// Any failure short-circuits with 401; the handler body is never
/// invoked. On success the verified [`Claims`] and [`BearerToken`] are
/// inserted into request extensions.
pub async fn auth_middleware(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?;

    let value = header_value.to_str().map_err(|_| AuthError::MalformedHeader)?;

    // Exactly a scheme + token pair, nothing more.
    let mut parts = value.split_whitespace();
    let (scheme, token) = match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) => (scheme, token),
        _ => return Err(AuthError::MalformedHeader),
    };

    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AuthError::MalformedHeader);
    }

    // Owned copy so the header borrow on `req` ends here.
    let token = token.to_string();

    let claims = tokens.verify(&token).map_err(AuthError::Token)?;

    req.extensions_mut().insert(claims);
    req.extensions_mut().insert(BearerToken(token));

    Ok(next.run(req).await)
}

/// Extract verified claims from a request (after the guard has run).
pub fn extract_claims(req: &Request) -> Option<&Claims> {
    req.extensions().get::<Claims>()
}

/// Extract the raw bearer token from a request (after the guard has run).
pub fn extract_bearer_token(req: &Request) -> Option<&BearerToken> {
    req.extensions().get::<BearerToken>()
}

/// Guard failure kinds.
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    MalformedHeader,
    Token(TokenError),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingToken => "Access token is required".to_string(),
            AuthError::MalformedHeader => {
                "Invalid authorization header format. Use: Bearer <token>".to_string()
            }
            AuthError::Token(err) => err.to_string(),
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": message })),
        )
            .into_response()
    }
}
