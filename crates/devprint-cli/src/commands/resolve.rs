//! Resolve command implementation.
//!
//! Runs one request through intake and the outbound commit, printing the
//! identity handler logic would see and the `Set-Cookie` value, if any.

use crate::output::{format_identity, format_json};
use devprint_identity::{IdentityConfig, RequestIdentity, SetCookie, Signer, COOKIE_HEADER};
use serde_json::json;

pub fn run(
    signer: &Signer,
    cookie_header: Option<String>,
    device_id: Option<String>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = IdentityConfig::default();
    let request = RequestIdentity::intake(
        |name| {
            if name.eq_ignore_ascii_case(COOKIE_HEADER) {
                cookie_header.as_deref()
            } else if name.eq_ignore_ascii_case(&config.header_name) {
                device_id.as_deref()
            } else {
                None
            }
        },
        signer,
        &config,
    );

    // Rendered before commit consumes the request.
    let identity_json = json!(request.identity());
    let pending_json = json!(request.pending());
    let identity_line = format_identity(request.identity());

    let mut cookies: Vec<SetCookie> = Vec::new();
    request.commit(signer, &config, &mut cookies);
    let set_cookie = cookies.first().map(ToString::to_string);

    if json_output {
        let out = json!({
            "identity": identity_json,
            "pending": pending_json,
            "set_cookie": set_cookie,
        });
        println!("{}", format_json(&out));
    } else {
        println!("identity:   {}", identity_line);
        println!("set-cookie: {}", set_cookie.as_deref().unwrap_or("-"));
    }
    Ok(())
}
