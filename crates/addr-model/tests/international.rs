//! Tests for international record construction.

use std::collections::BTreeMap;

use addr_model::{ErrorKind, InternationalAddress};

fn components(pairs: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    pairs
        .iter()
        .map(|(label, values)| {
            (
                (*label).to_string(),
                values.iter().map(|value| (*value).to_string()).collect(),
            )
        })
        .collect()
}

#[test]
fn full_parse_populates_all_components() {
    let parsed = InternationalAddress::from_components(
        "10 Downing St London SW1A 2AA United Kingdom",
        components(&[
            ("house_number", &["10"]),
            ("road", &["downing", "st"]),
            ("city", &["london"]),
            ("postcode", &["sw1a 2aa"]),
            ("country", &["united kingdom"]),
        ]),
        vec!["10 downing street london sw1a 2aa united kingdom".to_string()],
    )
    .expect("parse");

    assert_eq!(parsed.house_number.as_deref(), Some("10"));
    assert_eq!(parsed.road.as_deref(), Some("downing st"));
    assert_eq!(parsed.city.as_deref(), Some("london"));
    assert_eq!(parsed.postal_code.as_deref(), Some("sw1a 2aa"));
    assert_eq!(parsed.country.as_deref(), Some("united kingdom"));
    assert_eq!(
        parsed.full,
        "10 downing st, london, sw1a 2aa, united kingdom"
    );
    // Hash comes from the canonical expansion, not the raw input.
    assert!(parsed.address_hash.is_some());
}

#[test]
fn empty_component_map_fails() {
    let error =
        InternationalAddress::from_components("garbled", BTreeMap::new(), Vec::new())
            .expect_err("no components");
    assert_eq!(error.kind, ErrorKind::InternationalConstruction);
    assert!(error.message.contains("No components"));
}

#[test]
fn missing_road_with_locality_fails() {
    let error = InternationalAddress::from_components(
        "Tokyo Japan",
        components(&[("country", &["japan"])]),
        Vec::new(),
    )
    .expect_err("no road");
    assert!(error.message.contains("missing road component"));
}

#[test]
fn city_falls_back_to_suburb_and_state_to_district() {
    let parsed = InternationalAddress::from_components(
        "Kreuzberg, Friedrichshain-Kreuzberg, Germany",
        components(&[
            ("road", &["oranienstrasse"]),
            ("suburb", &["kreuzberg"]),
            ("state_district", &["friedrichshain-kreuzberg"]),
            ("country", &["germany"]),
        ]),
        Vec::new(),
    )
    .expect("parse");
    assert_eq!(parsed.city.as_deref(), Some("kreuzberg"));
    assert_eq!(
        parsed.state.as_deref(),
        Some("friedrichshain-kreuzberg")
    );
}

#[test]
fn field_map_exposes_postal_code_as_unified_key_only() {
    let parsed = InternationalAddress::from_components(
        "1 Rue de Rivoli, Paris, France",
        components(&[
            ("house_number", &["1"]),
            ("road", &["rue de rivoli"]),
            ("city", &["paris"]),
            ("postcode", &["75001"]),
            ("country", &["france"]),
        ]),
        Vec::new(),
    )
    .expect("parse");

    let map = parsed.to_field_map();
    assert_eq!(map.get("full_zipcode"), Some(&Some("75001".to_string())));
    // US ZIP fields stay empty for international parses.
    assert_eq!(map.get("zip5"), Some(&None));
    assert_eq!(map.get("full_zip"), Some(&None));
}
