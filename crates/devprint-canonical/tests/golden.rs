use devprint_canonical::{
    canonicalize, canonicalize_with_report, digest::FINGERPRINT_HEX_LEN, fingerprint,
    fingerprint_serializable, CanonicalValue, Fingerprint, HygieneReport, HygieneStatus,
    HygieneWarning,
};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

fn is_lower_hex(s: &str) -> bool {
    s.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
}

#[test]
fn canonicalizer_produces_ordered_bytes() {
    let value = json!({"b": 1, "a": {"nested": 2}});
    let result = canonicalize_with_report(&value).unwrap();
    assert_eq!(result.bytes, br#"{"a":{"nested":2},"b":1}"#.to_vec());
    assert_eq!(result.report.status, HygieneStatus::Ok);
}

#[test]
fn key_order_does_not_change_canonical_form() {
    let left = canonicalize(&json!({"b": 1, "a": 2})).unwrap();
    let right = canonicalize(&json!({"a": 2, "b": 1})).unwrap();
    assert_eq!(left, right);
}

#[test]
fn nested_key_order_does_not_change_canonical_form() {
    let left = json!({"outer": {"z": [ {"y": 1, "x": 2} ], "a": null}});
    let right = json!({"outer": {"a": null, "z": [ {"x": 2, "y": 1} ]}});
    assert_eq!(canonicalize(&left).unwrap(), canonicalize(&right).unwrap());
}

#[test]
fn array_order_is_preserved() {
    let left = canonicalize(&json!([1, 2, 3])).unwrap();
    let right = canonicalize(&json!([3, 2, 1])).unwrap();
    assert_ne!(left, right);
}

#[test]
fn float_noise_below_six_decimals_is_absorbed() {
    let a = canonicalize(&json!({"lat": 1.0000001})).unwrap();
    let b = canonicalize(&json!({"lat": 1.0000004})).unwrap();
    let c = canonicalize(&json!({"lat": 1.0000006})).unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);

    let mut expected = BTreeMap::new();
    expected.insert("lat".to_string(), CanonicalValue::Float(1.000001));
    assert_eq!(c, CanonicalValue::Object(expected));
}

#[test]
fn rounded_floats_render_without_trailing_zeros() {
    let result = canonicalize_with_report(&json!({"a": 1.0000001, "b": 2.50, "c": -0.1}))
        .unwrap();
    assert_eq!(result.bytes, br#"{"a":1,"b":2.5,"c":-0.1}"#.to_vec());
    assert_eq!(result.report.status, HygieneStatus::Lossy);
    assert_eq!(result.report.warnings, vec![HygieneWarning::new("RoundedNumber")]);
}

#[test]
fn scalars_pass_through_unchanged() {
    let value = json!(["text", true, false, null, "1.0000001"]);
    let canonical = canonicalize(&value).unwrap();
    assert_eq!(
        canonical.to_json_string().unwrap(),
        r#"["text",true,false,null,"1.0000001"]"#
    );
}

#[test]
fn fingerprint_is_64_lowercase_hex() {
    let fp = fingerprint(&json!({"query": "shops", "page": 3})).unwrap();
    assert_eq!(fp.as_str().len(), FINGERPRINT_HEX_LEN);
    assert!(is_lower_hex(fp.as_str()));
}

#[test]
fn fingerprint_ignores_key_order_and_float_noise() {
    let x = json!({"filter": {"lng": 30.5000001, "lat": 50.45}, "kind": "school"});
    let y = json!({"kind": "school", "filter": {"lat": 50.4500004, "lng": 30.5}});
    assert_eq!(fingerprint(&x).unwrap(), fingerprint(&y).unwrap());
}

#[test]
fn fingerprint_differs_when_a_string_field_differs() {
    let x = json!({"kind": "school", "page": 1});
    let y = json!({"kind": "shop", "page": 1});
    assert_ne!(fingerprint(&x).unwrap(), fingerprint(&y).unwrap());
}

#[test]
fn fingerprint_differs_when_a_boolean_differs() {
    let x = json!({"open": true});
    let y = json!({"open": false});
    assert_ne!(fingerprint(&x).unwrap(), fingerprint(&y).unwrap());
}

#[test]
fn typed_payload_matches_json_payload() {
    #[derive(Serialize)]
    struct Search {
        query: String,
        radius_km: f64,
    }

    let typed = Search {
        query: "bakery".into(),
        radius_km: 2.5,
    };
    let fp_typed = fingerprint_serializable(&typed).unwrap();
    let fp_json = fingerprint(&json!({"radius_km": 2.5, "query": "bakery"})).unwrap();
    assert_eq!(fp_typed, fp_json);
}

#[test]
fn fingerprint_serializes_as_plain_string() {
    let fp = fingerprint(&json!([])).unwrap();
    let encoded = serde_json::to_string(&fp).unwrap();
    assert_eq!(encoded, format!("\"{}\"", fp));

    let decoded: Fingerprint = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, fp);
}

#[test]
fn fingerprint_parse_rejects_uppercase_and_short_values() {
    assert!(Fingerprint::parse("A".repeat(64)).is_err());
    assert!(Fingerprint::parse("a".repeat(63)).is_err());
    assert!(Fingerprint::parse("a".repeat(64)).is_ok());
    assert!(serde_json::from_str::<Fingerprint>("\"xyz\"").is_err());
}

#[test]
fn hygiene_report_matches_expected_shape() {
    let mut metrics = BTreeMap::new();
    metrics.insert("rounded_numbers".to_string(), 1);
    let report = HygieneReport {
        status: HygieneStatus::Lossy,
        warnings: vec![HygieneWarning::new("RoundedNumber")],
        metrics,
    };

    let serialized = serde_json::to_value(&report).unwrap();
    let expected = json!({
        "status": "Lossy",
        "warnings": ["RoundedNumber"],
        "metrics": {"rounded_numbers": 1}
    });

    assert_eq!(serialized, expected);
}
