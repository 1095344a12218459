//! Security Audit Log
//!
//! Fire-and-forget structured events for suspicious input. Emitting an
//! event must never fail or block the caller; everything here is plain
//! `tracing` under the `security` target so operators can route it to a
//! dedicated sink with an env filter.

use std::net::IpAddr;
use tracing::{error, warn};

/// An input was rejected by the deny-list sanitizer.
pub fn injection_attempt(field: &str, value: &str, client_ip: Option<IpAddr>) {
    error!(
        target: "security",
        field,
        value = %truncate(value, 100),
        client_ip = %ip_or_unknown(client_ip),
        "injection attempt rejected"
    );
}

/// A login was refused before reaching the upstream provider.
pub fn suspicious_login(identifier: &str, reason: &str, client_ip: Option<IpAddr>) {
    warn!(
        target: "security",
        identifier = %truncate(identifier, 100),
        reason,
        client_ip = %ip_or_unknown(client_ip),
        "suspicious login attempt"
    );
}

/// A request carried a payload that failed validation.
pub fn invalid_payload(endpoint: &str, detail: &str, client_ip: Option<IpAddr>) {
    warn!(
        target: "security",
        endpoint,
        detail = %truncate(detail, 200),
        client_ip = %ip_or_unknown(client_ip),
        "invalid payload received"
    );
}

fn ip_or_unknown(ip: Option<IpAddr>) -> String {
    ip.map(|i| i.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn truncate(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
