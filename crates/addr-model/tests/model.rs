//! Tests for the address record model and its derived fields.

use addr_model::{Address, AddressBuilder, ErrorKind, ValidationOutcome, ZipResolution};
use proptest::prelude::*;

fn austin_fixture() -> Address {
    AddressBuilder::new()
        .street_number("123")
        .street_name("Main")
        .street_type("St")
        .city("Austin")
        .state("TX")
        .zip("78749-1234")
        .raw_input("123 Main St, Austin TX 78749-1234")
        .build()
        .expect("valid fixture")
}

#[test]
fn derived_fields_for_simple_street_address() {
    let address = austin_fixture();
    assert_eq!(address.line1.as_deref(), Some("123 Main St"));
    assert_eq!(address.line2, None);
    assert_eq!(address.zip5.as_deref(), Some("78749"));
    assert_eq!(address.zip4.as_deref(), Some("1234"));
    assert_eq!(address.full_zip.as_deref(), Some("78749-1234"));
    insta::assert_snapshot!(address.full, @"123 Main St, Austin, TX 78749-1234");
}

#[test]
fn continuous_nine_digit_zip_is_hyphenated() {
    let address = AddressBuilder::new()
        .street_number("123")
        .street_name("Main")
        .street_type("St")
        .city("Austin")
        .state("TX")
        .zip("787491234")
        .build()
        .expect("valid fixture");
    assert_eq!(address.zip5.as_deref(), Some("78749"));
    assert_eq!(address.zip4.as_deref(), Some("1234"));
    assert_eq!(address.full_zip.as_deref(), Some("78749-1234"));
}

#[test]
fn line2_segments_join_with_commas() {
    let address = AddressBuilder::new()
        .street_number("500")
        .street_name("Congress")
        .street_type("Ave")
        .unit_type("Ste")
        .unit_number("200")
        .building_name("Frost Tower")
        .build()
        .expect("valid fixture");
    assert_eq!(address.line2.as_deref(), Some("Ste 200, Frost Tower"));
    assert_eq!(address.full, "500 Congress Ave, Ste 200, Frost Tower");
}

#[test]
fn occupancy_contributes_one_segment() {
    let mut address = Address {
        occupancy_type: Some("Rm".to_string()),
        occupancy_id: Some("12".to_string()),
        ..Address::default()
    };
    address.recompute().expect("recompute");
    assert_eq!(address.line2.as_deref(), Some("Rm 12"));
}

#[test]
fn po_box_line_ignores_street_fields() {
    let address = AddressBuilder::new()
        .street_number("123")
        .street_name("Main")
        .po_box_type("PO Box")
        .po_box_id("4520")
        .city("Seattle")
        .state("WA")
        .zip("98101")
        .build()
        .expect("valid fixture");
    assert_eq!(address.line1.as_deref(), Some("PO Box 4520"));
    assert_eq!(address.full, "PO Box 4520, Seattle, WA 98101");
}

#[test]
fn recompute_is_idempotent() {
    let mut address = austin_fixture();
    let once = (address.line1.clone(), address.line2.clone(), address.full.clone());
    address.recompute().expect("second recompute");
    let twice = (address.line1.clone(), address.line2.clone(), address.full.clone());
    assert_eq!(once, twice);
    let hash_after_two = address.address_hash.clone();
    address.recompute().expect("third recompute");
    assert_eq!(address.address_hash, hash_after_two);
}

#[test]
fn full_contains_state_and_zip_when_present() {
    let address = austin_fixture();
    assert!(address.full.contains("TX"));
    assert!(address.full.contains("78749-1234"));
}

#[test]
fn split_zip_fields_validate_directly() {
    let mut address = Address {
        zip5: Some("00501".to_string()),
        zip4: Some("1234".to_string()),
        ..Address::default()
    };
    address.recompute().expect("recompute");
    assert_eq!(address.full_zip.as_deref(), Some("00501-1234"));
    assert_eq!(address.zip.as_deref(), Some("00501-1234"));
}

#[test]
fn bad_zip4_fails_construction_with_field_context() {
    let mut address = Address {
        zip5: Some("78749".to_string()),
        zip4: Some("12".to_string()),
        ..Address::default()
    };
    let error = address.recompute().expect_err("bad zip4");
    assert_eq!(error.kind, ErrorKind::StructuralValidation);
    assert_eq!(error.field(), Some("zip4"));
}

#[test]
fn lenient_resolution_drops_bad_zip4_and_reports_it() {
    let mut address = Address {
        zip: Some("78749-12".to_string()),
        ..Address::default()
    };
    let outcome = address
        .recompute_with(ZipResolution::Lenient)
        .expect("lenient recompute");
    assert_eq!(outcome.dropped_zip4.as_deref(), Some("12"));
    assert_eq!(address.zip5.as_deref(), Some("78749"));
    assert_eq!(address.zip4, None);
    assert_eq!(address.full_zip.as_deref(), Some("78749"));
}

#[test]
fn international_flag_passes_postal_code_verbatim() {
    let mut address = Address {
        is_international: Some(true),
        zip: Some("SW1A 2AA".to_string()),
        street_name: Some("Downing Street".to_string()),
        place: Some("London".to_string()),
        ..Address::default()
    };
    address.recompute().expect("international recompute");
    assert_eq!(address.full_zip.as_deref(), Some("SW1A 2AA"));
    assert_eq!(address.zip5, None);
    assert_eq!(address.full, "Downing Street, London, SW1A 2AA");
}

#[test]
fn external_zip_and_state_errors_re_raise_as_domain_error() {
    let address = austin_fixture();
    let mut outcome = ValidationOutcome::valid();
    outcome.add_error(
        "zip",
        "Invalid US ZIP code: 78749-1234",
        Some("78749-1234".to_string()),
    );
    outcome.add_error("state", "Invalid US state: TX", Some("TX".to_string()));

    let error = address
        .validate_external_results(&outcome)
        .expect_err("re-raise");
    assert_eq!(error.kind, ErrorKind::ReferentialValidation);
    assert!(error.message.contains("Invalid US ZIP code"));
    assert!(error.message.contains("Invalid US state"));
}

#[test]
fn unrelated_external_errors_are_ignored() {
    let address = austin_fixture();
    let mut outcome = ValidationOutcome::valid();
    outcome.add_error("place", "unknown city", None);
    assert!(address.validate_external_results(&outcome).is_ok());
}

#[test]
fn field_map_has_unified_postal_key() {
    let address = austin_fixture();
    let map = address.to_field_map();
    assert_eq!(
        map.get("full_zipcode"),
        Some(&Some("78749-1234".to_string()))
    );
    assert_eq!(map.get("street_name"), Some(&Some("Main".to_string())));
    // Every component key is present even when empty.
    assert!(map.contains_key("box_group_id"));
    assert_eq!(map.get("box_group_id"), Some(&None));
}

proptest! {
    /// Recomputing derived fields twice over the same components yields
    /// identical line1/line2/full.
    #[test]
    fn derived_field_recomputation_is_idempotent(
        number in proptest::option::of("[0-9]{1,5}"),
        street in proptest::option::of("[A-Za-z]{1,12}"),
        city in proptest::option::of("[A-Za-z]{1,12}"),
        state in proptest::option::of("[A-Z]{2}"),
        zip5 in proptest::option::of("[0-9]{5}"),
    ) {
        let mut address = Address {
            number: number.clone(),
            street_name: street.clone(),
            place: city.clone(),
            state: state.clone(),
            zip5: zip5.clone(),
            ..Address::default()
        };
        address.recompute().expect("first recompute");
        let once = (address.line1.clone(), address.line2.clone(), address.full.clone());
        address.recompute().expect("second recompute");
        let twice = (address.line1.clone(), address.line2.clone(), address.full.clone());
        prop_assert_eq!(once, twice);
    }

    /// Records with no street, unit, or locality fields format to "".
    #[test]
    fn empty_records_format_to_empty_string(recipient in proptest::option::of("[A-Za-z ]{0,16}")) {
        let mut address = Address {
            recipient,
            ..Address::default()
        };
        address.recompute().expect("recompute");
        prop_assert_eq!(address.full, "");
    }
}
