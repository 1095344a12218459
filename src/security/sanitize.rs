//! Deny-List Sanitizer
//!
//! Defense-in-depth filter applied to every free-form string before it
//! reaches the upstream provider. This is an input contract enforced at
//! the boundary, not a substitute for parameterized queries on the remote
//! side (which is out of our control).

use crate::security::audit;
use std::net::IpAddr;

/// Substrings that get an input rejected outright, matched
/// case-insensitively against the trimmed value.
const DENY_LIST: &[&str] = &[
    "'",
    "\"",
    ";",
    "--",
    "/*",
    "*/",
    "xp_",
    "sp_",
    "drop",
    "delete",
    "insert",
    "update",
    "select",
    "union",
    "exec",
    "<script",
    "</script",
    "javascript:",
    "vbscript:",
    "onload=",
    "onerror=",
    "onclick=",
];

/// Input contained a deny-listed marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedInput {
    pub marker: &'static str,
}

impl std::fmt::Display for RejectedInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Input contains disallowed characters or commands")
    }
}

impl std::error::Error for RejectedInput {}

/// Sanitize a free-form input string.
///
/// Trims surrounding whitespace, rejects anything containing a deny-listed
/// marker, and strips C0/C1 control characters from what survives. A
/// rejection emits a security-audit event before returning; the event is
/// best-effort and never fails the caller.
pub fn sanitize(input: &str) -> Result<String, RejectedInput> {
    sanitize_field(input, "input", None)
}

/// Same as [`sanitize`] but tags the audit event with the originating
/// field name and client IP when the caller knows them.
pub fn sanitize_field(
    input: &str,
    field: &str,
    client_ip: Option<IpAddr>,
) -> Result<String, RejectedInput> {
    let trimmed = input.trim();
    let lowered = trimmed.to_lowercase();

    for marker in DENY_LIST {
        if lowered.contains(marker) {
            audit::injection_attempt(field, trimmed, client_ip);
            return Err(RejectedInput { marker });
        }
    }

    Ok(strip_control_chars(trimmed))
}

fn strip_control_chars(value: &str) -> String {
    value
        .chars()
        .filter(|c| {
            let code = *c as u32;
            code > 0x1f && !(0x7f..=0x9f).contains(&code)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_input_passes_through() {
        assert_eq!(sanitize("maria.silva@example.com").unwrap(), "maria.silva@example.com");
        assert_eq!(sanitize("  44984023495  ").unwrap(), "44984023495");
    }

    #[test]
    fn test_sql_markers_rejected() {
        assert!(sanitize("' OR 1=1 --").is_err());
        assert!(sanitize("1; DROP TABLE users").is_err());
        assert!(sanitize("UNION ALL").is_err());
        assert!(sanitize("admin'--").is_err());
    }

    #[test]
    fn test_deny_list_is_case_insensitive() {
        assert!(sanitize("DrOp everything").is_err());
        assert!(sanitize("SeLeCt *").is_err());
    }

    #[test]
    fn test_script_markers_rejected() {
        assert!(sanitize("<script>alert(1)</script>").is_err());
        assert!(sanitize("javascript:void(0)").is_err());
        assert!(sanitize("x onerror=alert(1)").is_err());
    }

    #[test]
    fn test_control_chars_stripped() {
        assert_eq!(sanitize("abc\x00def\x1fghi").unwrap(), "abcdefghi");
        assert_eq!(sanitize("abc\u{007f}\u{009f}def").unwrap(), "abcdef");
    }

    #[test]
    fn test_rejection_reports_marker() {
        let err = sanitize("1 union 2").unwrap_err();
        assert_eq!(err.marker, "union");
    }
}
