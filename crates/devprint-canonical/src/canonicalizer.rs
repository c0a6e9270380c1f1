use serde_json::{Number, Value};
use tracing::trace;

use crate::hygiene::{HygieneReport, HygieneStatus, HygieneWarning};
use crate::value::CanonicalValue;
use std::collections::BTreeMap;
use std::fmt;

/// Number of fractional decimal digits kept for floats.
pub const DECIMAL_PLACES: i32 = 6;

/// Deepest container nesting accepted before failing fast.
pub const MAX_DEPTH: usize = 128;

const SCALE: f64 = 1_000_000.0;

/// 2^53: above this magnitude binary64 cannot represent every integer.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Error returned when canonicalization fails.
#[derive(thiserror::Error, Debug)]
pub enum CanonicalizationError {
    /// The canonical tree could not be serialized.
    ///
    /// `serde_json` does not fail on the types [`CanonicalValue`] holds, so
    /// this only surfaces if its serializer changes.
    #[error("invalid JSON structure: {0}")]
    InvalidStructure(String),
    /// A number with no finite binary64 value.
    ///
    /// A default-featured `serde_json::Value` cannot hold NaN or infinities;
    /// this is reached when `arbitrary_precision` lets a literal such as
    /// `1e400` through.
    #[error("non-finite number detected at {0}")]
    NonFiniteNumber(String),
    /// Nesting exceeded [`MAX_DEPTH`].
    #[error("nesting deeper than {max} levels at {path}")]
    DepthExceeded {
        /// Path of the first container past the limit.
        path: String,
        /// Configured maximum depth.
        max: usize,
    },
}

/// Result of canonicalization.
#[derive(Debug)]
pub struct CanonicalizationResult {
    /// Canonical tree.
    pub value: CanonicalValue,
    /// Canonical UTF-8 bytes for the input value.
    pub bytes: Vec<u8>,
    /// Hygiene report describing what normalization changed.
    pub report: HygieneReport,
}

/// Helper for building JSON paths in error messages.
#[derive(Debug, Clone)]
struct Path {
    segments: Vec<String>,
}

impl Path {
    fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    fn push_field(&self, field: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(field.to_string());
        Self { segments }
    }

    fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(format!("[{}]", index));
        Self { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}

#[derive(Debug, Default)]
struct Stats {
    rounded_numbers: u64,
    object_keys: u64,
    max_depth: u64,
}

impl Stats {
    fn into_report(self) -> HygieneReport {
        let mut report = HygieneReport::ok();
        if self.rounded_numbers > 0 {
            report.status = HygieneStatus::Lossy;
            report.warnings.push(HygieneWarning::new("RoundedNumber"));
        }
        report
            .metrics
            .insert("rounded_numbers".to_string(), self.rounded_numbers);
        report
            .metrics
            .insert("object_keys".to_string(), self.object_keys);
        report.metrics.insert("max_depth".to_string(), self.max_depth);
        report
    }
}

/// Rewrites `value` into canonical form.
///
/// Numbers are rounded to [`DECIMAL_PLACES`] fractional digits with
/// [`round_decimal`]; object keys are sorted by code point; arrays keep their
/// order; strings, booleans and null pass through.
///
/// # Errors
///
/// Fails on non-finite numbers and on nesting deeper than [`MAX_DEPTH`].
pub fn canonicalize(value: &Value) -> Result<CanonicalValue, CanonicalizationError> {
    let mut stats = Stats::default();
    normalize(value, &Path::root(), 0, &mut stats)
}

/// Produces the canonical tree, its bytes and a hygiene report.
pub fn canonicalize_with_report(
    value: &Value,
) -> Result<CanonicalizationResult, CanonicalizationError> {
    let mut stats = Stats::default();
    let canonical = normalize(value, &Path::root(), 0, &mut stats)?;
    let bytes = canonical.to_bytes()?;

    trace!(
        rounded_numbers = stats.rounded_numbers,
        object_keys = stats.object_keys,
        max_depth = stats.max_depth,
        len = bytes.len(),
        "canonicalized payload"
    );

    Ok(CanonicalizationResult {
        value: canonical,
        bytes,
        report: stats.into_report(),
    })
}

/// Rounds `x` to six fractional decimal digits, half away from zero.
///
/// The rounding happens on `x * 1e6` in binary64. Magnitudes whose scaled
/// value reaches 2^53 are returned unchanged since they carry no sub-1e-6
/// precision. Negative zero is folded to zero.
pub fn round_decimal(x: f64) -> f64 {
    let scaled = x * SCALE;
    if !scaled.is_finite() || scaled.abs() >= EXACT_INTEGER_LIMIT {
        return x;
    }
    let rounded = scaled.round() / SCALE;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn normalize(
    value: &Value,
    path: &Path,
    depth: usize,
    stats: &mut Stats,
) -> Result<CanonicalValue, CanonicalizationError> {
    match value {
        Value::Object(map) => {
            let depth = enter(path, depth, stats)?;
            let mut out = BTreeMap::new();
            for (key, child) in map {
                stats.object_keys += 1;
                let child = normalize(child, &path.push_field(key), depth, stats)?;
                out.insert(key.clone(), child);
            }
            Ok(CanonicalValue::Object(out))
        }
        Value::Array(items) => {
            let depth = enter(path, depth, stats)?;
            let mut out = Vec::with_capacity(items.len());
            for (idx, item) in items.iter().enumerate() {
                out.push(normalize(item, &path.push_index(idx), depth, stats)?);
            }
            Ok(CanonicalValue::Array(out))
        }
        Value::Number(num) => normalize_number(num, path, stats),
        Value::String(s) => Ok(CanonicalValue::String(s.clone())),
        Value::Bool(b) => Ok(CanonicalValue::Bool(*b)),
        Value::Null => Ok(CanonicalValue::Null),
    }
}

fn enter(path: &Path, depth: usize, stats: &mut Stats) -> Result<usize, CanonicalizationError> {
    let depth = depth + 1;
    if depth > MAX_DEPTH {
        return Err(CanonicalizationError::DepthExceeded {
            path: path.to_string(),
            max: MAX_DEPTH,
        });
    }
    stats.max_depth = stats.max_depth.max(depth as u64);
    Ok(depth)
}

fn normalize_number(
    num: &Number,
    path: &Path,
    stats: &mut Stats,
) -> Result<CanonicalValue, CanonicalizationError> {
    if let Some(i) = num.as_i64() {
        return Ok(CanonicalValue::Integer(i));
    }
    if let Some(u) = num.as_u64() {
        return Ok(CanonicalValue::Unsigned(u));
    }
    let f = num
        .as_f64()
        .filter(|f| f.is_finite())
        .ok_or_else(|| CanonicalizationError::NonFiniteNumber(path.to_string()))?;

    let rounded = round_decimal(f);
    if rounded != f {
        stats.rounded_numbers += 1;
    }
    if rounded.fract() == 0.0 && rounded.abs() < EXACT_INTEGER_LIMIT {
        Ok(CanonicalValue::Integer(rounded as i64))
    } else {
        Ok(CanonicalValue::Float(rounded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rounds_symmetrically_around_zero() {
        assert_eq!(round_decimal(0.0000006), 0.000001);
        assert_eq!(round_decimal(-0.0000006), -0.000001);
        assert_eq!(round_decimal(2.0000004), 2.0);
    }

    #[test]
    fn ties_round_away_from_zero() {
        assert_eq!(round_decimal(0.0000025), 0.000003);
        assert_eq!(round_decimal(-0.0000025), -0.000003);
        assert_eq!(round_decimal(0.0000035), 0.000004);
        assert_eq!(round_decimal(-0.0000035), -0.000004);
        assert_eq!(
            canonicalize(&json!({"a": 0.0000025, "b": -0.0000025})).unwrap(),
            canonicalize(&json!({"a": 0.000003, "b": -0.000003})).unwrap()
        );
    }

    #[test]
    fn scale_matches_decimal_places() {
        assert_eq!(SCALE, 10f64.powi(DECIMAL_PLACES));
    }

    #[test]
    fn negative_zero_folds_to_zero() {
        let value = canonicalize(&json!(-0.0000001)).unwrap();
        assert_eq!(value, CanonicalValue::Integer(0));
    }

    #[test]
    fn huge_magnitudes_pass_through() {
        assert_eq!(round_decimal(1.0e300), 1.0e300);
        assert_eq!(round_decimal(12_345_678_901.123_457), 12_345_678_901.123_457);
    }

    #[test]
    fn integral_floats_become_integers() {
        assert_eq!(canonicalize(&json!(3.0)).unwrap(), CanonicalValue::Integer(3));
        assert_eq!(canonicalize(&json!(3)).unwrap(), CanonicalValue::Integer(3));
    }

    #[test]
    fn large_unsigned_is_kept() {
        let value = canonicalize(&json!(u64::MAX)).unwrap();
        assert_eq!(value, CanonicalValue::Unsigned(u64::MAX));
    }

    #[test]
    fn depth_limit_fails_fast() {
        let mut value = json!(1);
        for _ in 0..=MAX_DEPTH {
            value = json!([value]);
        }
        let err = canonicalize(&value).unwrap_err();
        assert!(matches!(err, CanonicalizationError::DepthExceeded { max, .. } if max == MAX_DEPTH));
    }

    #[test]
    fn depth_at_limit_is_accepted() {
        let mut value = json!(1);
        for _ in 0..MAX_DEPTH {
            value = json!([value]);
        }
        assert!(canonicalize(&value).is_ok());
    }

    #[test]
    fn error_reports_path() {
        let mut value = json!({"a": [0, {}]});
        value["a"][1] = {
            let mut inner = json!(0);
            for _ in 0..MAX_DEPTH {
                inner = json!([inner]);
            }
            inner
        };
        let err = canonicalize(&value).unwrap_err();
        assert!(err.to_string().contains("a.[1]"), "{}", err);
    }

    #[test]
    fn report_flags_rounding_as_lossy() {
        let result = canonicalize_with_report(&json!({"x": 0.12345678, "y": [1, 2]})).unwrap();
        assert_eq!(result.report.status, HygieneStatus::Lossy);
        assert_eq!(result.report.metrics["rounded_numbers"], 1);
        assert_eq!(result.report.metrics["object_keys"], 2);
        assert_eq!(result.report.metrics["max_depth"], 2);
        assert_eq!(result.bytes, br#"{"x":0.123457,"y":[1,2]}"#.to_vec());
    }

    #[test]
    fn report_is_ok_without_rounding() {
        let result = canonicalize_with_report(&json!({"x": 0.5})).unwrap();
        assert_eq!(result.report.status, HygieneStatus::Ok);
        assert!(result.report.warnings.is_empty());
    }
}
