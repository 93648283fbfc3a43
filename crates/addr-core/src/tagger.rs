//! The domestic tagger interface and component assembly.
//!
//! A tagger labels tokens of a raw address string; this module merges the
//! labeled tokens onto [`Address`] fields. Label vocabulary follows the
//! conventional US tagging scheme ("AddressNumber", "StreetName", ...),
//! with lowercase aliases accepted for backends that emit them.

use addr_model::{Address, AddressError, RecomputeOutcome, ZipResolution};

/// One labeled token from a tagger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub value: String,
    pub label: String,
}

impl TaggedToken {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// External component that labels tokens of a US-formatted address string.
///
/// Failure must be recoverable: a tagger returns an error rather than
/// panicking on text it cannot label.
pub trait AddressTagger: Send + Sync {
    /// Name of this tagger implementation, recorded on produced records.
    fn name(&self) -> &'static str;

    /// Label the tokens of `raw_input`, in input order.
    fn tag(&self, raw_input: &str) -> Result<Vec<TaggedToken>, AddressError>;
}

/// Merge consecutive same-label tokens into single space-joined components,
/// stripping trailing commas from the merged values. A label that reappears
/// non-consecutively is a conflict and surfaces as a recoverable parse
/// error.
pub fn merge_consecutive_labels(
    raw_input: &str,
    tokens: &[TaggedToken],
) -> Result<Vec<(String, String)>, AddressError> {
    let mut merged: Vec<(String, String)> = Vec::new();

    for token in tokens {
        let continues_run = merged
            .last()
            .is_some_and(|(label, _)| *label == token.label);
        if continues_run {
            if let Some((_, value)) = merged.last_mut() {
                value.push(' ');
                value.push_str(&token.value);
            }
        } else {
            if merged.iter().any(|(label, _)| *label == token.label) {
                return Err(AddressError::parse(
                    raw_input,
                    format!("Repeated label in tagged output: {}", token.label),
                ));
            }
            merged.push((token.label.clone(), token.value.clone()));
        }
    }

    for (_, value) in &mut merged {
        let trimmed = value.trim_end_matches(',').trim_end().to_string();
        *value = trimmed;
    }

    Ok(merged)
}

/// Map merged (label, value) components onto an [`Address`] and compute its
/// derived fields. Unknown labels are ignored.
pub fn assemble_address(
    raw_input: &str,
    components: &[(String, String)],
    mode: ZipResolution,
) -> Result<(Address, RecomputeOutcome), AddressError> {
    let mut address = Address {
        raw_input: Some(raw_input.to_string()),
        ..Address::default()
    };

    for (label, value) in components {
        if value.is_empty() {
            continue;
        }
        apply_label(&mut address, label, value);
    }

    let outcome = address.recompute_with(mode)?;
    Ok((address, outcome))
}

fn apply_label(address: &mut Address, label: &str, value: &str) {
    let value = Some(value.to_string());
    match label {
        "AddressNumberPrefix" => address.number_prefix = value,
        "AddressNumber" | "house_number" => address.number = value,
        "AddressNumberSuffix" => address.number_suffix = value,
        "StreetNamePreModifier" => address.street_pre_modifier = value,
        "StreetNamePreDirectional" => address.street_pre_directional = value,
        "StreetNamePreType" => address.street_pre_type = value,
        "StreetName" | "road" => address.street_name = value,
        "StreetNamePostType" => address.street_post_type = value,
        "StreetNamePostDirectional" => address.street_post_directional = value,
        "SubaddressType" => address.subaddress_type = value,
        "SubaddressIdentifier" | "unit" => address.subaddress_id = value,
        "BuildingName" | "house" => address.building_name = value,
        "OccupancyType" => address.occupancy_type = value,
        "OccupancyIdentifier" => address.occupancy_id = value,
        "CornerOf" => address.corner_of = value,
        "LandmarkName" => address.landmark = value,
        "PlaceName" | "city" => address.place = value,
        "StateName" | "state" => address.state = value,
        "ZipCode" | "postcode" => address.zip = value,
        "USPSBoxType" => address.box_type = value,
        "USPSBoxID" | "po_box" => address.box_id = value,
        "USPSBoxGroupType" => address.box_group_type = value,
        "USPSBoxGroupID" => address.box_group_id = value,
        "IntersectionSeparator" => address.intersection_separator = value,
        "Recipient" => address.recipient = value,
        "NotAddress" => address.not_address = value,
        "Country" | "country" => address.country = value,
        // Labels outside the vocabulary are dropped, matching the
        // tolerant behavior expected of tagger integrations.
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_labels_merge_space_joined() {
        let tokens = vec![
            TaggedToken::new("123", "AddressNumber"),
            TaggedToken::new("North", "StreetName"),
            TaggedToken::new("Lamar,", "StreetName"),
            TaggedToken::new("Austin", "PlaceName"),
        ];
        let merged = merge_consecutive_labels("123 North Lamar, Austin", &tokens)
            .expect("merge");
        assert_eq!(
            merged,
            vec![
                ("AddressNumber".to_string(), "123".to_string()),
                ("StreetName".to_string(), "North Lamar".to_string()),
                ("PlaceName".to_string(), "Austin".to_string()),
            ]
        );
    }

    #[test]
    fn non_consecutive_repeat_is_a_parse_error() {
        let tokens = vec![
            TaggedToken::new("123", "AddressNumber"),
            TaggedToken::new("Main", "StreetName"),
            TaggedToken::new("456", "AddressNumber"),
        ];
        let error =
            merge_consecutive_labels("123 Main 456", &tokens).expect_err("conflict");
        assert!(error.message.contains("Repeated label"));
    }

    #[test]
    fn assembled_address_computes_derived_fields() {
        let components = vec![
            ("AddressNumber".to_string(), "123".to_string()),
            ("StreetName".to_string(), "Main".to_string()),
            ("StreetNamePostType".to_string(), "St".to_string()),
            ("PlaceName".to_string(), "Austin".to_string()),
            ("StateName".to_string(), "TX".to_string()),
            ("ZipCode".to_string(), "78749".to_string()),
        ];
        let (address, _) = assemble_address(
            "123 Main St, Austin TX 78749",
            &components,
            ZipResolution::Strict,
        )
        .expect("assemble");
        assert_eq!(address.full, "123 Main St, Austin, TX 78749");
        assert_eq!(address.raw_input.as_deref(), Some("123 Main St, Austin TX 78749"));
    }
}
