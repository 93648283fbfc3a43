//! Tests for silent-transformation detection.

use addr_model::{Address, AddressBuilder, OperationKind, ProcessEntry};
use addr_track::track_transformations;

fn entry_for<'e>(entries: &'e [ProcessEntry], field: &str) -> Option<&'e ProcessEntry> {
    entries.iter().find(|entry| entry.field == field)
}

fn austin(zip: &str) -> Address {
    AddressBuilder::new()
        .street_number("123")
        .street_name("Main")
        .street_type("St")
        .city("Austin")
        .state("TX")
        .zip(zip)
        .build()
        .expect("fixture")
}

#[test]
fn continuous_zip_rewrite_is_detected() {
    let raw = "123 Main St, Austin TX 787491234";
    let entries = track_transformations(raw, &austin("787491234"));

    let entry = entry_for(&entries, "zip_format").expect("zip_format entry");
    assert_eq!(entry.original_value.as_deref(), Some("787491234"));
    assert_eq!(entry.new_value.as_deref(), Some("78749-1234"));
    assert_eq!(entry.operation, OperationKind::Normalization);
}

#[test]
fn hyphenated_zip_logs_nothing_for_format() {
    let raw = "123 Main St, Austin TX 78749-1234";
    let entries = track_transformations(raw, &austin("78749-1234"));
    assert!(entry_for(&entries, "zip_format").is_none());
    assert!(entry_for(&entries, "zip5").is_none());
}

#[test]
fn state_full_name_to_abbreviation_is_detected() {
    let raw = "123 Main St, Austin Texas 78749";
    let entries = track_transformations(raw, &austin("78749"));

    let entry = entry_for(&entries, "state").expect("state entry");
    assert_eq!(entry.original_value.as_deref(), Some("Texas"));
    assert_eq!(entry.new_value.as_deref(), Some("TX"));
    assert_eq!(entry.operation, OperationKind::Normalization);
}

#[test]
fn state_case_change_is_detected() {
    let raw = "123 Main St, Austin tx 78749";
    let entries = track_transformations(raw, &austin("78749"));

    let entry = entry_for(&entries, "state").expect("state entry");
    assert_eq!(entry.original_value.as_deref(), Some("tx"));
    assert_eq!(entry.new_value.as_deref(), Some("TX"));
    assert_eq!(entry.operation, OperationKind::Formatting);
}

#[test]
fn whitespace_trimming_and_collapsing_are_detected() {
    let raw = "  123 Main St,  Austin TX 78749 ";
    let entries = track_transformations(raw, &austin("78749"));

    let raw_entries: Vec<&ProcessEntry> = entries
        .iter()
        .filter(|entry| entry.field == "raw_input")
        .collect();
    assert!(
        raw_entries
            .iter()
            .any(|entry| entry.message.contains("whitespace removed"))
    );
    assert!(
        raw_entries
            .iter()
            .any(|entry| entry.message.contains("consecutive spaces"))
    );
}

#[test]
fn trailing_commas_are_detected_for_street_and_city() {
    let raw = "123 Main, Austin, TX 78749";
    let mut address = austin("78749");
    address.street_post_type = None;
    address.recompute().expect("recompute");
    let entries = track_transformations(raw, &address);

    let street = entry_for(&entries, "street_name").expect("street entry");
    assert_eq!(street.original_value.as_deref(), Some("Main,"));
    let city = entry_for(&entries, "city").expect("city entry");
    assert_eq!(city.original_value.as_deref(), Some("Austin,"));
}

#[test]
fn all_caps_components_are_detected() {
    let raw = "123 MAIN St, AUSTIN TX 78749";
    let entries = track_transformations(raw, &austin("78749"));

    let street = entry_for(&entries, "street_name").expect("street entry");
    assert_eq!(street.original_value.as_deref(), Some("MAIN"));
    assert_eq!(street.new_value.as_deref(), Some("Main"));
    let city = entry_for(&entries, "city").expect("city entry");
    assert_eq!(city.original_value.as_deref(), Some("AUSTIN"));
}

#[test]
fn street_type_abbreviation_is_detected() {
    let raw = "123 Main Street, Austin TX 78749";
    let entries = track_transformations(raw, &austin("78749"));

    let entry = entry_for(&entries, "street_type").expect("street_type entry");
    assert_eq!(entry.original_value.as_deref(), Some("Street"));
    assert_eq!(entry.new_value.as_deref(), Some("St"));
    assert!(entry.message.contains("Street -> St"));
}

#[test]
fn directional_abbreviation_is_detected() {
    let raw = "123 North Main St, Austin TX 78749";
    let mut address = austin("78749");
    address.street_pre_directional = Some("N".to_string());
    address.recompute().expect("recompute");
    let entries = track_transformations(raw, &address);

    let entry = entry_for(&entries, "pre_directional").expect("directional entry");
    assert_eq!(entry.original_value.as_deref(), Some("North"));
    assert_eq!(entry.new_value.as_deref(), Some("N"));
}

#[test]
fn unit_type_abbreviation_is_detected() {
    let raw = "123 Main St Apartment 4B, Austin TX 78749";
    let mut address = austin("78749");
    address.subaddress_type = Some("Apt".to_string());
    address.subaddress_id = Some("4B".to_string());
    address.recompute().expect("recompute");
    let entries = track_transformations(raw, &address);

    let entry = entry_for(&entries, "unit_type").expect("unit_type entry");
    assert_eq!(entry.original_value.as_deref(), Some("Apartment"));
    assert_eq!(entry.new_value.as_deref(), Some("Apt"));
}

#[test]
fn period_and_hash_removal_are_detected() {
    let raw = "123 Main St. #4, Austin TX 78749";
    let entries = track_transformations(raw, &austin("78749"));

    let raw_entries: Vec<&ProcessEntry> = entries
        .iter()
        .filter(|entry| entry.field == "raw_input")
        .collect();
    assert!(
        raw_entries
            .iter()
            .any(|entry| entry.message.contains("Period removed"))
    );
    assert!(
        raw_entries
            .iter()
            .any(|entry| entry.message.contains("Hash/pound symbol removed"))
    );
}

#[test]
fn summary_entry_lists_extracted_components() {
    let raw = "123 Main St, Austin TX 78749";
    let entries = track_transformations(raw, &austin("78749"));

    let summary = entries.last().expect("summary entry");
    assert_eq!(summary.operation, OperationKind::Parsing);
    for component in ["address_number", "street_name", "street_type", "city", "state", "zip"] {
        assert!(
            summary.message.contains(component),
            "missing {component} in {}",
            summary.message
        );
    }
}

#[test]
fn detection_never_fails_on_hostile_input() {
    let raw = "((( *** [unclosed \\ weird ??? )))";
    let mut address = Address {
        street_name: Some("(((".to_string()),
        place: Some("***".to_string()),
        ..Address::default()
    };
    address.recompute().expect("recompute");
    // Regex metacharacters in components must not break detection.
    let entries = track_transformations(raw, &address);
    assert!(entries.iter().all(|entry| !entry.message.is_empty()));
}

#[test]
fn nothing_is_logged_when_nothing_changed() {
    let mut address = Address::default();
    address.recompute().expect("recompute");
    let entries = track_transformations("unrelated text", &address);
    assert!(entries.is_empty());
}
