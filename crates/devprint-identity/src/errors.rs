use thiserror::Error;

/// Startup configuration errors. Any of these must stop the process before it
/// accepts traffic.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The secret environment variable is not set.
    #[error("signing secret not configured: set {var}")]
    MissingSecret {
        /// Environment variable that was consulted.
        var: String,
    },
    /// The secret environment variable is not valid UTF-8.
    #[error("signing secret in {var} is not valid UTF-8")]
    NotUnicode {
        /// Environment variable that was consulted.
        var: String,
    },
    /// The secret is present but empty.
    #[error("signing secret is empty")]
    EmptySecret,
    /// The MAC rejected the key.
    #[error("invalid signing key: {0}")]
    InvalidKey(String),
}

/// Validation errors for identity primitives.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// When a value does not match the required pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
}
