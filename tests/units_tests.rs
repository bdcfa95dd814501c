use lsblk_tree::units::{format_iec, format_si};
use proptest::prelude::*;
#[test]
fn test_si_unit_boundary() {
    assert_eq!(format_si(0), "0B");
    assert_eq!(format_si(999), "999B");
    assert_eq!(format_si(1000), "1.0kB");
    assert_eq!(format_si(1500), "1.5kB");
}
#[test]
fn test_si_larger_units() {
    assert_eq!(format_si(1_000_000), "1.0MB");
    assert_eq!(format_si(1_500_000), "1.5MB");
    assert_eq!(format_si(999_999), "1000.0kB");
    assert_eq!(format_si(500_107_862_016), "500.1GB");
    assert_eq!(format_si(2_000_000_000_000), "2.0TB");
}
#[test]
fn test_iec_unit_boundary() {
    assert_eq!(format_iec(0), "0B");
    assert_eq!(format_iec(1023), "1023B");
    assert_eq!(format_iec(1024), "1.0KiB");
    assert_eq!(format_iec(1536), "1.5KiB");
}
#[test]
fn test_iec_larger_units() {
    assert_eq!(format_iec(1024 * 1024), "1.0MiB");
    assert_eq!(format_iec(1024 * 1024 * 1024), "1.0GiB");
    assert_eq!(format_iec(1 << 40), "1.0TiB");
}
proptest! {
    #[test]
    fn prop_si_below_one_unit_is_plain_bytes(n in 0i64..1000) {
        prop_assert_eq!(format_si(n), format!("{}B", n));
    }

    #[test]
    fn prop_iec_below_one_unit_is_plain_bytes(n in 0i64..1024) {
        prop_assert_eq!(format_iec(n), format!("{}B", n));
    }

    #[test]
    fn prop_si_above_one_unit_has_one_decimal(n in 1000i64..i64::MAX) {
        let text = format_si(n);
        prop_assert!(text.ends_with('B'));
        let number: String = text.chars().take_while(|c| c.is_ascii_digit() || *c == '.').collect();
        let (_, decimals) = number.split_once('.').unwrap();
        prop_assert_eq!(decimals.len(), 1);
    }
}
