//! Tests for the postal-code normalizer.

use addr_model::{format_zip, parse_zip, parse_zip_lenient, validate_zip4, validate_zip5};
use proptest::prelude::*;

#[test]
fn five_digit_zip_parses() {
    let result = parse_zip("78749");
    assert!(result.is_valid);
    assert_eq!(result.zip5.as_deref(), Some("78749"));
    assert_eq!(result.zip4, None);
    assert_eq!(result.full.as_deref(), Some("78749"));
    assert_eq!(result.error, None);
}

#[test]
fn hyphenated_zip_plus_four_parses() {
    let result = parse_zip("78749-1234");
    assert!(result.is_valid);
    assert_eq!(result.zip5.as_deref(), Some("78749"));
    assert_eq!(result.zip4.as_deref(), Some("1234"));
    assert_eq!(result.full.as_deref(), Some("78749-1234"));
}

#[test]
fn continuous_nine_digit_zip_splits() {
    let result = parse_zip("787491234");
    assert_eq!(result.zip5.as_deref(), Some("78749"));
    assert_eq!(result.zip4.as_deref(), Some("1234"));
    assert_eq!(result.full.as_deref(), Some("78749-1234"));
}

#[test]
fn surrounding_whitespace_is_trimmed() {
    let result = parse_zip("  78749-1234  ");
    assert!(result.is_valid);
    assert_eq!(result.full.as_deref(), Some("78749-1234"));
}

#[test]
fn empty_and_whitespace_inputs_fail() {
    assert!(!parse_zip("").is_valid);
    assert!(!parse_zip("   ").is_valid);
    assert!(!parse_zip_lenient("").is_valid);
}

#[test]
fn malformed_zip5_fails_both_modes() {
    for input in ["1234", "123456", "12a45", "12345-"] {
        let strict = parse_zip(input);
        let lenient = parse_zip_lenient(input);
        if input == "12345-" {
            // Empty extension after the hyphen is treated as absent.
            assert!(strict.is_valid, "{input}");
            assert!(lenient.is_valid, "{input}");
        } else {
            assert!(!strict.is_valid, "{input}");
        }
    }
}

#[test]
fn malformed_zip4_fails_strict_but_not_lenient() {
    let strict = parse_zip("78749-12");
    assert!(!strict.is_valid);
    assert_eq!(strict.zip5.as_deref(), Some("78749"));
    assert_eq!(strict.full, None);

    let lenient = parse_zip_lenient("78749-12");
    assert!(lenient.is_valid);
    assert_eq!(lenient.zip5.as_deref(), Some("78749"));
    assert_eq!(lenient.zip4, None);
    assert_eq!(lenient.full.as_deref(), Some("78749"));
}

#[test]
fn zip4_is_optional() {
    assert_eq!(validate_zip4(None), Ok(None));
    assert_eq!(validate_zip4(Some("")), Ok(None));
    assert_eq!(validate_zip4(Some("  ")), Ok(None));
    assert_eq!(validate_zip4(Some("1234")), Ok(Some("1234".to_string())));
    assert!(validate_zip4(Some("12345")).is_err());
}

#[test]
fn zip5_is_required() {
    assert!(validate_zip5(None).is_err());
    assert!(validate_zip5(Some("")).is_err());
    assert_eq!(validate_zip5(Some("00501")), Ok("00501".to_string()));
}

#[test]
fn validating_a_valid_value_is_identity() {
    let first = parse_zip("12345-6789");
    let second = parse_zip(first.full.as_deref().unwrap());
    assert_eq!(first, second);
}

proptest! {
    /// normalize(z5, z4) parsed back yields the same (z5, z4) pair.
    #[test]
    fn format_then_parse_round_trips(z5 in "[0-9]{5}", z4 in "[0-9]{4}") {
        let formatted = format_zip(&z5, Some(&z4));
        let parsed = parse_zip(&formatted);
        prop_assert!(parsed.is_valid);
        prop_assert_eq!(parsed.zip5.as_deref(), Some(z5.as_str()));
        prop_assert_eq!(parsed.zip4.as_deref(), Some(z4.as_str()));
    }

    #[test]
    fn zip5_alone_round_trips(z5 in "[0-9]{5}") {
        let parsed = parse_zip(&format_zip(&z5, None));
        prop_assert!(parsed.is_valid);
        prop_assert_eq!(parsed.zip5.as_deref(), Some(z5.as_str()));
        prop_assert_eq!(parsed.zip4, None);
    }

    /// Parsing is pure: the same input always yields the same result.
    #[test]
    fn parse_is_deterministic(input in ".{0,24}") {
        prop_assert_eq!(parse_zip(&input), parse_zip(&input));
        prop_assert_eq!(parse_zip_lenient(&input), parse_zip_lenient(&input));
    }
}
