//! Payload fingerprints.
//!
//! A fingerprint is `hex(sha256(canonical_bytes(payload)))`. There is no
//! domain separator: the digest covers the canonical JSON text alone, so any
//! implementation producing the same canonical bytes agrees on the key.

use crate::canonicalizer::{canonicalize, canonicalize_with_report};
use crate::digest::Fingerprint;
use crate::hygiene::HygieneReport;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest as Sha2Digest, Sha256};

/// Computes the fingerprint of a JSON payload.
///
/// # Example
///
/// ```rust
/// use devprint_canonical::fingerprint;
/// use serde_json::json;
///
/// let fp = fingerprint(&json!({"q": "schools", "page": 2}))?;
/// println!("dedup key: {}", fp);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Returns [`FingerprintError`] if canonicalization fails.
pub fn fingerprint(value: &Value) -> Result<Fingerprint, FingerprintError> {
    let canonical = canonicalize(value)?;
    let bytes = canonical.to_bytes()?;
    Ok(fingerprint_bytes(&bytes))
}

/// Computes the fingerprint together with the canonicalization hygiene report.
pub fn fingerprint_with_report(
    value: &Value,
) -> Result<(Fingerprint, HygieneReport), FingerprintError> {
    let result = canonicalize_with_report(value)?;
    Ok((fingerprint_bytes(&result.bytes), result.report))
}

/// Fingerprints any serializable payload by converting it to JSON first.
///
/// # Errors
///
/// Returns [`FingerprintError::Serialization`] when the payload has no JSON
/// form (for example a map with non-string keys).
pub fn fingerprint_serializable<T: Serialize>(
    payload: &T,
) -> Result<Fingerprint, FingerprintError> {
    let value = serde_json::to_value(payload)
        .map_err(|e| FingerprintError::Serialization(e.to_string()))?;
    fingerprint(&value)
}

/// Hashes bytes that are already canonical.
pub fn fingerprint_bytes(canonical_bytes: &[u8]) -> Fingerprint {
    let digest: [u8; 32] = Sha256::digest(canonical_bytes).into();
    Fingerprint::from_digest(&digest)
}

/// Error during fingerprint computation.
#[derive(thiserror::Error, Debug)]
pub enum FingerprintError {
    /// Serialization failed.
    #[error("serialization failed: {0}")]
    Serialization(String),
    /// Canonicalization failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] crate::CanonicalizationError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_digest_is_sha256_of_braces() {
        // sha256("{}")
        assert_eq!(
            fingerprint(&json!({})).unwrap().as_str(),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }

    #[test]
    fn non_string_keys_are_a_serialization_error() {
        let mut payload = std::collections::HashMap::new();
        payload.insert(vec![1u8], "x");
        let err = fingerprint_serializable(&payload).unwrap_err();
        assert!(matches!(err, FingerprintError::Serialization(_)));
    }
}
