//! Verify command implementation.

use crate::output::format_json;
use devprint_identity::Signer;
use serde_json::json;

pub fn run(
    signer: &Signer,
    token: String,
    strict: bool,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let verified = signer.verify(&token);

    if json_output {
        let out = json!({
            "valid": verified.is_some(),
            "device_id": verified,
        });
        println!("{}", format_json(&out));
    } else {
        println!("{}", verified.unwrap_or("invalid"));
    }

    if strict && verified.is_none() {
        std::process::exit(1);
    }

    Ok(())
}
