//! Detection of silent normalizations between raw input and parsed record.
//!
//! Detection is best-effort pattern matching against the raw string: when a
//! raw occurrence cannot be found, nothing is logged and nothing fails.

use addr_model::{Address, OperationKind, ProcessEntry};
use addr_standards::constants::STATE_NAME_TO_ABBREV;
use regex::{Regex, RegexBuilder};

use crate::tables::{
    DIRECTION_TO_ABBREV, PERIOD_ABBREVIATIONS, STREET_TYPE_TO_ABBREV, UNIT_TYPE_TO_ABBREV,
};

/// Detect every silent transformation the pipeline applied between
/// `raw_input` and the parsed record, as audit entries ready for a process
/// log. Never fails; an undetectable transformation is simply absent.
pub fn track_transformations(raw_input: &str, address: &Address) -> Vec<ProcessEntry> {
    let mut entries = Vec::new();

    track_zip_normalization(raw_input, address, &mut entries);
    track_state_normalization(raw_input, address, &mut entries);
    track_whitespace_normalization(raw_input, &mut entries);
    track_comma_normalization(raw_input, address, &mut entries);
    track_case_normalization(raw_input, address, &mut entries);
    track_street_type_changes(raw_input, address, &mut entries);
    track_direction_changes(raw_input, address, &mut entries);
    track_unit_type_changes(raw_input, address, &mut entries);
    track_punctuation_removal(raw_input, &mut entries);
    track_component_parsing(raw_input, address, &mut entries);

    entries
}

/// Case-insensitive word-boundary search for `needle` in `haystack`,
/// returning the matched raw text.
fn find_word_ci<'h>(haystack: &'h str, needle: &str) -> Option<&'h str> {
    let pattern = format!(r"\b({})\b", regex::escape(needle));
    let regex = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .ok()?;
    regex
        .captures(haystack)
        .and_then(|captures| captures.get(1))
        .map(|capture| capture.as_str())
}

fn contains_word_ci(haystack: &str, needle: &str) -> bool {
    find_word_ci(haystack, needle).is_some()
}

fn track_zip_normalization(raw_input: &str, address: &Address, entries: &mut Vec<ProcessEntry>) {
    // Most specific pattern first: hyphenated ZIP+4, continuous 9-digit,
    // then plain 5-digit.
    let patterns = [
        r"\b(\d{5})-(\d{4})\b",
        r"\b(\d{5})(\d{4})\b",
        r"\b(\d{5})\b",
    ];

    let mut raw_zip5: Option<String> = None;
    let mut raw_zip4: Option<String> = None;
    let mut raw_full: Option<String> = None;

    for pattern in patterns {
        let Ok(regex) = Regex::new(pattern) else {
            continue;
        };
        if let Some(captures) = regex.captures(raw_input) {
            raw_zip5 = captures.get(1).map(|m| m.as_str().to_string());
            raw_zip4 = captures.get(2).map(|m| m.as_str().to_string());
            raw_full = captures.get(0).map(|m| m.as_str().to_string());
            break;
        }
    }

    let Some(raw_zip5) = raw_zip5 else {
        return;
    };

    // Leading zeros or other zip5 rewrites.
    if let Some(zip5) = address.zip5.as_deref()
        && zip5 != raw_zip5
    {
        entries.push(ProcessEntry::cleaning(
            "zip5",
            Some(raw_zip5.clone()),
            Some(zip5.to_string()),
            "ZIP5 normalized (leading zeros or format change)",
            OperationKind::Normalization,
        ));
    }

    // Continuous 9-digit input rewritten to the hyphenated form.
    if let (Some(raw_full), Some(full_zip)) = (raw_full, address.full_zip.as_deref())
        && raw_zip4.is_some()
        && raw_full != full_zip
        && !raw_full.contains('-')
        && full_zip.contains('-')
    {
        entries.push(ProcessEntry::cleaning(
            "zip_format",
            Some(raw_full),
            Some(full_zip.to_string()),
            "ZIP format normalized from continuous to hyphenated format",
            OperationKind::Normalization,
        ));
    }
}

fn track_state_normalization(raw_input: &str, address: &Address, entries: &mut Vec<ProcessEntry>) {
    let Some(state) = address.state.as_deref() else {
        return;
    };

    // Full name in raw, abbreviation in the parsed field.
    for (full_name, abbrev) in STATE_NAME_TO_ABBREV {
        if contains_word_ci(raw_input, full_name) && state.eq_ignore_ascii_case(abbrev) {
            entries.push(ProcessEntry::cleaning(
                "state",
                Some(title_case(full_name)),
                Some((*abbrev).to_string()),
                "State name normalized from full name to abbreviation",
                OperationKind::Normalization,
            ));
            return;
        }
    }

    // Pure case change ("tx" -> "TX").
    if let Some(raw_state) = find_word_ci(raw_input, state)
        && raw_state != state
    {
        entries.push(ProcessEntry::cleaning(
            "state",
            Some(raw_state.to_string()),
            Some(state.to_string()),
            "State abbreviation case normalized",
            OperationKind::Formatting,
        ));
    }
}

fn track_whitespace_normalization(raw_input: &str, entries: &mut Vec<ProcessEntry>) {
    let stripped = raw_input.trim();
    if stripped != raw_input {
        entries.push(ProcessEntry::cleaning(
            "raw_input",
            Some(raw_input.to_string()),
            Some(stripped.to_string()),
            "Leading/trailing whitespace removed",
            OperationKind::Formatting,
        ));
    }

    if raw_input.contains("  ") {
        entries.push(ProcessEntry::cleaning(
            "raw_input",
            None,
            None,
            "Multiple consecutive spaces normalized to single space",
            OperationKind::Formatting,
        ));
    }
}

fn track_comma_normalization(raw_input: &str, address: &Address, entries: &mut Vec<ProcessEntry>) {
    let trailing_comma = |component: &str| -> bool {
        let pattern = format!(r"\b{}\s*,", regex::escape(component));
        RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map(|regex| regex.is_match(raw_input))
            .unwrap_or(false)
    };

    if let Some(street) = address.street_name.as_deref()
        && trailing_comma(street)
    {
        entries.push(ProcessEntry::cleaning(
            "street_name",
            Some(format!("{street},")),
            Some(street.to_string()),
            "Trailing comma removed from street name component",
            OperationKind::Formatting,
        ));
    }

    if let Some(city) = address.place.as_deref()
        && trailing_comma(city)
    {
        entries.push(ProcessEntry::cleaning(
            "city",
            Some(format!("{city},")),
            Some(city.to_string()),
            "Trailing comma removed from city component",
            OperationKind::Formatting,
        ));
    }
}

fn track_case_normalization(raw_input: &str, address: &Address, entries: &mut Vec<ProcessEntry>) {
    let mut track = |component: Option<&str>, field: &str, reason: &str| {
        let Some(value) = component else {
            return;
        };
        if let Some(raw_value) = find_word_ci(raw_input, value)
            && raw_value != value
            && raw_value.eq_ignore_ascii_case(value)
        {
            entries.push(ProcessEntry::cleaning(
                field,
                Some(raw_value.to_string()),
                Some(value.to_string()),
                reason,
                OperationKind::Formatting,
            ));
        }
    };

    track(
        address.street_name.as_deref(),
        "street_name",
        "Street name case normalized",
    );
    track(address.place.as_deref(), "city", "City name case normalized");
}

fn track_street_type_changes(raw_input: &str, address: &Address, entries: &mut Vec<ProcessEntry>) {
    let Some(street_type) = address.street_post_type.as_deref() else {
        return;
    };

    for (full_name, abbrev) in STREET_TYPE_TO_ABBREV {
        let in_raw = contains_word_ci(raw_input, full_name);
        let matches_abbrev = street_type.eq_ignore_ascii_case(abbrev)
            || street_type.eq_ignore_ascii_case(full_name);
        let is_different = street_type != title_case(full_name);
        if in_raw && matches_abbrev && is_different {
            entries.push(ProcessEntry::cleaning(
                "street_type",
                Some(title_case(full_name)),
                Some(street_type.to_string()),
                format!(
                    "Street type abbreviated: {} -> {street_type}",
                    title_case(full_name)
                ),
                OperationKind::Normalization,
            ));
            return;
        }
    }

    // Case-only change ("ST" -> "St").
    if let Some(raw_type) = find_word_ci(raw_input, street_type)
        && raw_type != street_type
        && raw_type.eq_ignore_ascii_case(street_type)
    {
        entries.push(ProcessEntry::cleaning(
            "street_type",
            Some(raw_type.to_string()),
            Some(street_type.to_string()),
            "Street type case normalized",
            OperationKind::Formatting,
        ));
    }
}

fn track_direction_changes(raw_input: &str, address: &Address, entries: &mut Vec<ProcessEntry>) {
    if let Some(direction) = address.street_pre_directional.as_deref() {
        track_direction_field(raw_input, direction, "pre_directional", entries);
    }
    if let Some(direction) = address.street_post_directional.as_deref() {
        track_direction_field(raw_input, direction, "post_directional", entries);
    }
}

fn track_direction_field(
    raw_input: &str,
    direction: &str,
    field: &str,
    entries: &mut Vec<ProcessEntry>,
) {
    for (full_name, abbrev) in DIRECTION_TO_ABBREV {
        if contains_word_ci(raw_input, full_name) && direction.eq_ignore_ascii_case(abbrev) {
            entries.push(ProcessEntry::cleaning(
                field,
                Some(title_case(full_name)),
                Some(direction.to_string()),
                format!(
                    "Direction abbreviated: {} -> {direction}",
                    title_case(full_name)
                ),
                OperationKind::Normalization,
            ));
            return;
        }
    }

    if let Some(raw_direction) = find_word_ci(raw_input, direction)
        && raw_direction != direction
        && raw_direction.eq_ignore_ascii_case(direction)
    {
        entries.push(ProcessEntry::cleaning(
            field,
            Some(raw_direction.to_string()),
            Some(direction.to_string()),
            "Direction case normalized",
            OperationKind::Formatting,
        ));
    }
}

fn track_unit_type_changes(raw_input: &str, address: &Address, entries: &mut Vec<ProcessEntry>) {
    let Some(unit_type) = address.subaddress_type.as_deref() else {
        return;
    };

    for (full_name, abbrev) in UNIT_TYPE_TO_ABBREV {
        if contains_word_ci(raw_input, full_name) && unit_type.eq_ignore_ascii_case(abbrev) {
            entries.push(ProcessEntry::cleaning(
                "unit_type",
                Some(title_case(full_name)),
                Some(unit_type.to_string()),
                format!(
                    "Unit type abbreviated: {} -> {unit_type}",
                    title_case(full_name)
                ),
                OperationKind::Normalization,
            ));
            return;
        }
    }

    if let Some(raw_type) = find_word_ci(raw_input, unit_type)
        && raw_type != unit_type
        && raw_type.eq_ignore_ascii_case(unit_type)
    {
        entries.push(ProcessEntry::cleaning(
            "unit_type",
            Some(raw_type.to_string()),
            Some(unit_type.to_string()),
            "Unit type case normalized",
            OperationKind::Formatting,
        ));
    }
}

fn track_punctuation_removal(raw_input: &str, entries: &mut Vec<ProcessEntry>) {
    if raw_input.contains('.') {
        for abbreviation in PERIOD_ABBREVIATIONS {
            let pattern = format!(r"(?i)\b{}", regex::escape(abbreviation));
            let matched = Regex::new(&pattern)
                .map(|regex| regex.is_match(raw_input))
                .unwrap_or(false);
            if matched {
                entries.push(ProcessEntry::cleaning(
                    "raw_input",
                    Some((*abbreviation).to_string()),
                    Some(abbreviation.replace('.', "")),
                    "Period removed from abbreviation",
                    OperationKind::Formatting,
                ));
                // One punctuation entry is enough; more is noise.
                break;
            }
        }
    }

    if raw_input.contains('#') {
        entries.push(ProcessEntry::cleaning(
            "raw_input",
            None,
            None,
            "Hash/pound symbol removed from unit number",
            OperationKind::Formatting,
        ));
    }
}

fn track_component_parsing(raw_input: &str, address: &Address, entries: &mut Vec<ProcessEntry>) {
    let mut extracted: Vec<&str> = Vec::new();

    if address.number.is_some() {
        extracted.push("address_number");
    }
    if address.street_name.is_some() {
        extracted.push("street_name");
    }
    if address.street_post_type.is_some() {
        extracted.push("street_type");
    }
    if address.street_pre_directional.is_some() || address.street_post_directional.is_some() {
        extracted.push("directional");
    }
    if address.subaddress_type.is_some() || address.subaddress_id.is_some() {
        extracted.push("unit");
    }
    if address.place.is_some() {
        extracted.push("city");
    }
    if address.state.is_some() {
        extracted.push("state");
    }
    if address.zip5.is_some() {
        extracted.push("zip");
    }
    if address.box_type.is_some() || address.box_id.is_some() {
        extracted.push("po_box");
    }

    if !extracted.is_empty() {
        entries.push(ProcessEntry::cleaning(
            "raw_input",
            Some(raw_input.to_string()),
            Some(address.full.clone()),
            format!("Components extracted: {}", extracted.join(", ")),
            OperationKind::Parsing,
        ));
    }
}

fn title_case(word: &str) -> String {
    word.split_whitespace()
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_handles_multiword_names() {
        assert_eq!(title_case("new hampshire"), "New Hampshire");
        assert_eq!(title_case("texas"), "Texas");
    }

    #[test]
    fn find_word_respects_boundaries() {
        assert_eq!(find_word_ci("Main St, Austin", "st"), Some("St"));
        assert_eq!(find_word_ci("Stadium Rd", "st"), None);
    }
}
