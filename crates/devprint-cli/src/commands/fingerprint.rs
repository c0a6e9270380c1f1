//! Fingerprint command implementation.

use super::read_json_input;
use crate::output::format_json;
use devprint_canonical::fingerprint_with_report;
use serde_json::json;

pub fn run(input: Option<String>, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let value = read_json_input(input)?;

    let (fingerprint, report) =
        fingerprint_with_report(&value).map_err(|e| format!("Fingerprint failed: {}", e))?;

    if json_output {
        let out = json!({
            "fingerprint": fingerprint,
            "report": report,
        });
        println!("{}", format_json(&out));
    } else {
        println!("{}", fingerprint);
    }
    Ok(())
}
