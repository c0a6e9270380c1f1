//! Sign command implementation.

use devprint_identity::{DeviceId, Signer};

pub fn run(signer: &Signer, id: String) -> Result<(), Box<dyn std::error::Error>> {
    let id = DeviceId::parse(id).map_err(|e| format!("Invalid device id: {}", e))?;
    println!("{}", signer.sign(id.as_str()));
    Ok(())
}
