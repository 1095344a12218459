//! Runtime Configuration
//! Mission: Single place where environment variables become typed settings

use std::env;
use std::time::Duration;

/// Gateway configuration, loaded once at startup.
///
/// Every field has a default and can be overridden via environment
/// variables (a `.env` file is honored when present).
#[derive(Debug, Clone)]
pub struct Config {
    /// HMAC secret used to sign session tokens.
    pub secret_key: String,
    /// Session token lifetime in hours.
    pub jwt_expiration_hours: i64,
    /// Base URL of the remote identity provider.
    pub upstream_base_url: String,
    /// Per-call timeout for outbound requests.
    pub upstream_timeout: Duration,
    /// Retry budget advertised by the deployment contract. The transport
    /// performs no retry loop; failures surface immediately.
    pub upstream_retries: u32,
    /// Listen address for the HTTP server.
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Self {
        let secret_key = env::var("SECRET_KEY").unwrap_or_else(|_| "teste1234".to_string());

        let jwt_expiration_hours = env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|&v| v > 0)
            .unwrap_or(24);

        let upstream_base_url = env::var("API_EXTERNA_BASE_URL")
            .unwrap_or_else(|_| "https://oracleapex.com/ords/fazemcasa".to_string());

        let upstream_timeout = env::var("API_EXTERNA_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&v| v > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(15));

        let upstream_retries = env::var("API_EXTERNA_RETRIES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(3);

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        Self {
            secret_key,
            jwt_expiration_hours,
            upstream_base_url,
            upstream_timeout,
            upstream_retries,
            bind_addr,
        }
    }
}
