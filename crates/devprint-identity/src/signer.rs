//! HMAC-SHA256 signing of device ids.
//!
//! Token wire format: `<id>.<hex(hmac_sha256(secret, id))>`, digest in
//! lowercase hex. Verification splits on the first `.`; ids containing `.`
//! therefore never verify (see [`crate::DeviceId`]).

use crate::config::SigningSecret;
use crate::errors::ConfigError;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Separator between id and digest in a signed token.
pub const TOKEN_SEPARATOR: char = '.';

/// A signed token, `<id>.<hex-digest>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedToken(String);

impl SignedToken {
    /// The token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the token, returning its text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Signs and verifies device id tokens with the process secret.
///
/// Holds a pre-keyed MAC that is cloned per operation, so a `Signer` is
/// read-only after construction and can be shared across threads.
#[derive(Clone)]
pub struct Signer {
    mac: HmacSha256,
}

impl Signer {
    /// Keys a signer with the process secret.
    pub fn new(secret: &SigningSecret) -> Result<Self, ConfigError> {
        let mac = <HmacSha256 as Mac>::new_from_slice(secret.expose())
            .map_err(|e| ConfigError::InvalidKey(e.to_string()))?;
        Ok(Self { mac })
    }

    /// Keys a signer from the [`SECRET_ENV_VAR`](crate::SECRET_ENV_VAR) environment variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(&SigningSecret::from_env()?)
    }

    /// Produces `<id>.<hex-digest>`.
    pub fn sign(&self, id: &str) -> SignedToken {
        let digest = self.digest_hex(id);
        let mut token = String::with_capacity(id.len() + 1 + digest.len());
        token.push_str(id);
        token.push(TOKEN_SEPARATOR);
        token.push_str(&digest);
        SignedToken(token)
    }

    /// Returns the id embedded in `token` if its digest matches.
    ///
    /// Malformed input (empty, no separator, wrong digest length, several
    /// separators) yields `None`; this never panics. Digests of equal length
    /// are compared in constant time.
    pub fn verify<'a>(&self, token: &'a str) -> Option<&'a str> {
        let (id, provided) = token.split_once(TOKEN_SEPARATOR)?;
        let expected = self.digest_hex(id);
        if provided.len() != expected.len() {
            return None;
        }
        if bool::from(provided.as_bytes().ct_eq(expected.as_bytes())) {
            Some(id)
        } else {
            None
        }
    }

    fn digest_hex(&self, id: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(id.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer").finish_non_exhaustive()
    }
}
