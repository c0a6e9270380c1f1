use serde::Serialize;
use std::collections::BTreeMap;

use crate::canonicalizer::CanonicalizationError;

/// A JSON tree in canonical form.
///
/// Objects are backed by a `BTreeMap`, so iteration and serialization follow
/// byte order of the UTF-8 keys, which is the same as code-point order.
/// Integral numbers that fit in 53 bits are always stored as integers, never
/// as `Float`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CanonicalValue {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// Signed integer.
    Integer(i64),
    /// Unsigned integer above `i64::MAX`.
    Unsigned(u64),
    /// Finite float with at most six fractional decimal digits.
    Float(f64),
    /// JSON string, unchanged from the input.
    String(String),
    /// Sequence in input order.
    Array(Vec<CanonicalValue>),
    /// Mapping with sorted keys.
    Object(BTreeMap<String, CanonicalValue>),
}

impl CanonicalValue {
    /// Compact JSON bytes: sorted keys, no insignificant whitespace.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CanonicalizationError> {
        serde_json::to_vec(self)
            .map_err(|err| CanonicalizationError::InvalidStructure(err.to_string()))
    }

    /// Compact JSON text of the canonical tree.
    pub fn to_json_string(&self) -> Result<String, CanonicalizationError> {
        serde_json::to_string(self)
            .map_err(|err| CanonicalizationError::InvalidStructure(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_serializes_in_code_point_order() {
        let mut map = BTreeMap::new();
        map.insert("\u{00e9}".to_string(), CanonicalValue::Integer(3));
        map.insert("b".to_string(), CanonicalValue::Integer(2));
        map.insert("B".to_string(), CanonicalValue::Integer(1));
        let value = CanonicalValue::Object(map);

        assert_eq!(value.to_json_string().unwrap(), "{\"B\":1,\"b\":2,\"\u{00e9}\":3}");
    }

    #[test]
    fn scalars_serialize_compactly() {
        let value = CanonicalValue::Array(vec![
            CanonicalValue::Null,
            CanonicalValue::Bool(true),
            CanonicalValue::Float(1.5),
            CanonicalValue::String("x".into()),
        ]);
        assert_eq!(value.to_bytes().unwrap(), br#"[null,true,1.5,"x"]"#.to_vec());
    }
}
