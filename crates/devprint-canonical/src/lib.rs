//! Canonical value normalization and payload fingerprints for devprint.
//!
//! Payloads are rewritten into a [`CanonicalValue`] tree (numbers rounded to
//! six fractional digits, object keys sorted by code point) and serialized as
//! compact JSON. The SHA-256 of those bytes, hex encoded, is the payload's
//! [`Fingerprint`]: a stable dedup/idempotency key for callers that cache or
//! deduplicate requests.
//!
//! ```rust
//! use devprint_canonical::fingerprint;
//! use serde_json::json;
//!
//! let a = fingerprint(&json!({"b": 1, "a": {"lat": 1.0000001}}))?;
//! let b = fingerprint(&json!({"a": {"lat": 1.0000004}, "b": 1}))?;
//! assert_eq!(a, b);
//! assert_eq!(a.as_str().len(), 64);
//! # Ok::<(), devprint_canonical::FingerprintError>(())
//! ```
//!
#![deny(missing_docs)]

/// Recursive normalization of JSON trees.
pub mod canonicalizer;
/// Fingerprint newtype.
pub mod digest;
/// SHA-256 fingerprints over canonical bytes.
pub mod fingerprint;
/// Hygiene report types emitted during canonicalization.
pub mod hygiene;
/// Validation helpers used by canonical types.
pub mod validation;
/// Canonical value tree.
pub mod value;

pub use canonicalizer::{
    canonicalize, canonicalize_with_report, round_decimal, CanonicalizationError,
    CanonicalizationResult, DECIMAL_PLACES, MAX_DEPTH,
};
pub use digest::Fingerprint;
pub use fingerprint::{
    fingerprint, fingerprint_bytes, fingerprint_serializable, fingerprint_with_report,
    FingerprintError,
};
pub use hygiene::{HygieneReport, HygieneStatus, HygieneWarning};
pub use validation::ValidationError;
pub use value::CanonicalValue;
