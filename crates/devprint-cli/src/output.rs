//! Output formatting utilities.

use devprint_identity::{DeviceIdentity, IdentitySource};
use serde_json::Value;

/// Formats a value as pretty JSON.
pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Formats a resolved identity as `<id> (<source>, verified|unverified)`.
pub fn format_identity(identity: Option<&DeviceIdentity>) -> String {
    match identity {
        Some(identity) => {
            let source = match identity.source {
                IdentitySource::Cookie => "cookie",
                IdentitySource::Header => "header",
            };
            let trust = if identity.verified {
                "verified"
            } else {
                "unverified"
            };
            format!("{} ({}, {})", identity.value, source, trust)
        }
        None => "-".to_string(),
    }
}
