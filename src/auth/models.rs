//! Authentication Wire Types
//! Mission: Request/response bodies and the JWT claims payload

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JWT claims payload.
///
/// `usuario` is whatever user object the upstream provider returned on
/// login; the gateway treats it as opaque and hands it back on
/// verification. `jti` makes every issued token unique, so a refresh
/// within the same second never reproduces the token it just revoked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub usuario: Value,
    pub jti: String,
    pub iat: usize,
    pub exp: usize,
}

/// Body for login and reset-password requests.
///
/// Fields are optional so missing keys produce the gateway's own 400
/// message instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email_telefone: Option<String>,
    pub senha: Option<String>,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub usuario: Value,
    pub expires_in: usize,
}

/// Response for token verification.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub message: String,
    pub valid: bool,
    pub usuario: Value,
}

/// Response for token refresh.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub expires_in: usize,
}

/// Generic success/failure response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_claims_round_trip() {
        let claims = Claims {
            usuario: json!({"nome": "Maria", "ra": "44984023495"}),
            jti: "1b4e28ba-2fa1-11d2-883f-0016d3cca427".to_string(),
            iat: 1_700_000_000,
            exp: 1_700_086_400,
        };
        let encoded = serde_json::to_string(&claims).unwrap();
        let decoded: Claims = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.usuario["nome"], "Maria");
        assert_eq!(decoded.exp, claims.exp);
    }

    #[test]
    fn test_credentials_request_tolerates_missing_fields() {
        let req: CredentialsRequest = serde_json::from_str("{}").unwrap();
        assert!(req.email_telefone.is_none());
        assert!(req.senha.is_none());
    }
}
