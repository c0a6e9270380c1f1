//! Anonymous device identity for devprint.
//!
//! This crate provides:
//! - [`Signer`]: HMAC-SHA256 signing of opaque device ids into `<id>.<hex>` tokens,
//!   verified with a constant-time comparison
//! - [`resolve`]: the trust policy reconciling the signed `d_id` cookie with the
//!   raw `x-device-id` header
//! - [`commit`]: the deferred outbound cookie write, applied after the handler ran
//! - [`RequestIdentity`]: request-scoped context carrying both halves
//!
//! Core invariants:
//! - Malformed cookies and headers are absent values, never errors
//! - Resolution is pure and deterministic; it performs no I/O
//! - A pending write is consumed exactly once; dropping it writes nothing
//! - The signing secret is loaded once at startup and never mutated
//!
//! ```rust
//! use devprint_identity::{IdentityConfig, RequestIdentity, SetCookie, Signer, SigningSecret};
//!
//! let signer = Signer::new(&SigningSecret::new("startup-secret")?)?;
//! let config = IdentityConfig::default();
//!
//! // Intake: no cookie yet, client sent its own id.
//! let request = RequestIdentity::intake(
//!     |name| (name == "x-device-id").then_some("install-42"),
//!     &signer,
//!     &config,
//! );
//! assert!(!request.identity().unwrap().verified);
//!
//! // ... handler runs ...
//!
//! // Outbound path.
//! let mut cookies: Vec<SetCookie> = Vec::new();
//! request.commit(&signer, &config, &mut cookies);
//! assert!(cookies[0].to_string().starts_with("d_id=install-42."));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
#![deny(missing_docs)]

/// Deferred cookie write.
pub mod commit;
/// Startup configuration: signing secret and cookie/header names.
pub mod config;
/// Request-scoped identity context.
pub mod context;
/// `Cookie` / `Set-Cookie` helpers.
pub mod cookie;
/// Error types.
pub mod errors;
/// Validated device identifiers.
pub mod identifiers;
/// Cookie/header trust policy.
pub mod resolver;
/// HMAC token signing and verification.
pub mod signer;

pub use commit::{commit, CookieSink};
pub use config::{
    IdentityConfig, SigningSecret, COOKIE_HEADER, COOKIE_MAX_AGE_SECS, COOKIE_NAME, HEADER_NAME,
    SECRET_ENV_VAR,
};
pub use context::RequestIdentity;
pub use cookie::{cookie_value, SameSite, SetCookie};
pub use errors::{ConfigError, ValidationError};
pub use identifiers::DeviceId;
pub use resolver::{resolve, DeviceIdentity, IdentitySource, PendingWrite, Resolution};
pub use signer::{SignedToken, Signer, TOKEN_SEPARATOR};
