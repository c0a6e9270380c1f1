//! Subcommand implementations.

pub mod canonicalize;
pub mod fingerprint;
pub mod resolve;
pub mod sign;
pub mod verify;

use serde_json::Value;
use std::io::{self, Read};

/// Reads JSON from a file, or stdin when no path is given.
pub fn read_json_input(input: Option<String>) -> Result<Value, Box<dyn std::error::Error>> {
    let json_str = if let Some(path) = input {
        std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read file {}: {}", path, e))?
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    };

    let value = serde_json::from_str(&json_str).map_err(|e| format!("Invalid JSON: {}", e))?;
    Ok(value)
}
