use lsblk_tree::scalar::{Quantity, decode_integer, decode_quantity, decode_tri_bool};
use lsblk_tree::units::format_si;
use lsblk_tree::DecodeError;
use proptest::prelude::*;
#[test]
fn test_tri_bool_literals() {
    assert!(decode_tri_bool("rm", "true").unwrap());
    assert!(!decode_tri_bool("rm", "false").unwrap());
    assert!(decode_tri_bool("rm", "TRUE").unwrap());
    assert!(!decode_tri_bool("rm", "FALSE").unwrap());
}
#[test]
fn test_tri_bool_integers() {
    assert!(decode_tri_bool("ro", "1").unwrap());
    assert!(!decode_tri_bool("ro", "0").unwrap());
    assert!(!decode_tri_bool("ro", "-5").unwrap());
    assert!(decode_tri_bool("ro", "42").unwrap());
}
#[test]
fn test_tri_bool_rejects_words() {
    let err = decode_tri_bool("rota", "abc").unwrap_err();
    match err {
        DecodeError::MalformedScalar { key, token, .. } => {
            assert_eq!(key, "rota");
            assert_eq!(token, "abc");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(decode_tri_bool("rota", "").is_err());
    assert!(decode_tri_bool("rota", "yes").is_err());
}
#[test]
fn test_quantity_absent_or_empty_is_zero() {
    for raw in [None, Some("")] {
        let q = decode_quantity("size", raw).unwrap();
        assert_eq!(q.exact_value(), 0);
        assert_eq!(q.raw_text(), "");
        assert_eq!(q.human_readable(), "0B");
        assert!(!q.is_present());
        assert_eq!(q, Quantity::zero());
    }
}
#[test]
fn test_quantity_present_zero_is_distinguishable() {
    let q = decode_quantity("fsavail", Some("0")).unwrap();
    assert_eq!(q.exact_value(), 0);
    assert!(q.is_present());
    assert_ne!(q, Quantity::zero());
}
#[test]
fn test_quantity_parses_integer() {
    let q = decode_quantity("size", Some("2048")).unwrap();
    assert_eq!(q.exact_value(), 2048);
    assert_eq!(q.raw_text(), "2048");
    assert_eq!(q.human_readable(), format_si(2048));
    assert_eq!(q.human_readable_iec(), "2.0KiB");
    assert_eq!(q.to_string(), "2.0kB");
}
#[test]
fn test_quantity_rejects_garbage() {
    let err = decode_quantity("fssize", Some("abc")).unwrap_err();
    assert_eq!(
        err,
        DecodeError::MalformedScalar {
            key: "fssize".to_string(),
            token: "abc".to_string(),
            expected: "an integer byte count",
        }
    );
    assert!(decode_quantity("size", Some("12G")).is_err());
}
#[test]
fn test_integer_attribute() {
    assert_eq!(decode_integer("ra", None).unwrap(), None);
    assert_eq!(decode_integer("ra", Some("")).unwrap(), None);
    assert_eq!(decode_integer("ra", Some("128")).unwrap(), Some(128));
    assert_eq!(decode_integer("phy-sec", Some("4k")).unwrap_err().key(), Some("phy-sec"));
}
proptest! {
    #[test]
    fn prop_quantity_keeps_raw_text(n in any::<i64>()) {
        let text = n.to_string();
        let q = decode_quantity("size", Some(&text)).unwrap();
        prop_assert_eq!(q.exact_value(), n);
        prop_assert_eq!(q.raw_text(), text.as_str());
        let expected = format_si(n);
        prop_assert_eq!(q.human_readable(), expected.as_str());
    }

    #[test]
    fn prop_tri_bool_integer_is_positive(n in any::<i64>()) {
        prop_assert_eq!(decode_tri_bool("rm", &n.to_string()).unwrap(), n > 0);
    }
}
