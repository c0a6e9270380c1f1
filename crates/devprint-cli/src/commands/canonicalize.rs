//! Canonicalize command implementation.

use super::read_json_input;
use devprint_canonical::canonicalize;

pub fn run(input: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let value = read_json_input(input)?;

    let canonical =
        canonicalize(&value).map_err(|e| format!("Canonicalization failed: {}", e))?;

    println!("{}", canonical.to_json_string()?);
    Ok(())
}
