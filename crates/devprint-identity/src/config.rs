use crate::errors::ConfigError;
use std::fmt;
use zeroize::Zeroizing;

/// Environment variable holding the signing secret.
pub const SECRET_ENV_VAR: &str = "DEVPRINT_SECRET";

/// Name of the signed identity cookie.
pub const COOKIE_NAME: &str = "d_id";

/// Request header carrying inbound cookies.
pub const COOKIE_HEADER: &str = "cookie";

/// Name of the raw client-supplied identity header.
pub const HEADER_NAME: &str = "x-device-id";

/// Lifetime of the identity cookie: one year.
pub const COOKIE_MAX_AGE_SECS: u64 = 31_536_000;

/// Process-wide HMAC key. Zeroized on drop; never printed.
pub struct SigningSecret(Zeroizing<Vec<u8>>);

impl SigningSecret {
    /// Wraps raw key bytes. Empty keys are rejected.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let bytes = Zeroizing::new(bytes.into());
        if bytes.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        Ok(Self(bytes))
    }

    /// Loads the secret from [`SECRET_ENV_VAR`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_var(SECRET_ENV_VAR)
    }

    /// Loads the secret from the named environment variable.
    pub fn from_env_var(var: &str) -> Result<Self, ConfigError> {
        match std::env::var(var) {
            Ok(value) => Self::new(value.into_bytes()),
            Err(std::env::VarError::NotPresent) => Err(ConfigError::MissingSecret {
                var: var.to_string(),
            }),
            Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode {
                var: var.to_string(),
            }),
        }
    }

    pub(crate) fn expose(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningSecret").field(&"<redacted>").finish()
    }
}

/// Cookie and header names plus cookie lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Name of the signed identity cookie.
    pub cookie_name: String,
    /// Name of the raw identity header.
    pub header_name: String,
    /// `Max-Age` of the outbound cookie, in seconds.
    pub cookie_max_age_secs: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            cookie_name: COOKIE_NAME.to_string(),
            header_name: HEADER_NAME.to_string(),
            cookie_max_age_secs: COOKIE_MAX_AGE_SECS,
        }
    }
}
