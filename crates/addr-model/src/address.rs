//! The structured address record and its derived fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::audit::ProcessLog;
use crate::error::AddressError;
use crate::outcome::ValidationOutcome;
use crate::zip::{self, ZipCodeResult};

/// How the postal code is resolved during derived-field computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZipResolution {
    /// A malformed +4 extension fails the whole record.
    #[default]
    Strict,
    /// A malformed +4 extension is dropped, keeping the valid zip5.
    Lenient,
}

/// Report returned by derived-field recomputation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecomputeOutcome {
    /// The raw +4 extension removed under lenient resolution, if any.
    pub dropped_zip4: Option<String>,
}

/// Parsed US address components.
///
/// All component fields are optional strings; `line1`, `line2`, and `full`
/// are derived and recomputed by [`Address::recompute`]. ZIP and state
/// *referential* validity is the validation pipeline's job, not this
/// model's; only shape rules are enforced here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Modifier before the address number (e.g. "N" in "N 123 Main St").
    pub number_prefix: Option<String>,
    /// The primary street number.
    pub number: Option<String>,
    /// Modifier after the address number, such as a half ("1/2").
    pub number_suffix: Option<String>,
    /// Word or phrase before the street name ("Old" in "Old Main St").
    pub street_pre_modifier: Option<String>,
    /// Directional before the street name ("N", "SW").
    pub street_pre_directional: Option<String>,
    /// Street type before the name ("Avenue" in "Avenue C").
    pub street_pre_type: Option<String>,
    pub street_name: Option<String>,
    /// Street type following the name ("St", "Ave").
    pub street_post_type: Option<String>,
    /// Directional after the street name ("SE" in "Main St SE").
    pub street_post_directional: Option<String>,
    /// Subaddress type ("Apt", "Suite", "Unit").
    pub subaddress_type: Option<String>,
    /// Subaddress identifier ("2B", "101").
    pub subaddress_id: Option<String>,
    pub building_name: Option<String>,
    /// Occupancy type ("Dept", "Rm").
    pub occupancy_type: Option<String>,
    pub occupancy_id: Option<String>,
    /// Set when the address references the corner of two streets.
    pub corner_of: Option<String>,
    pub landmark: Option<String>,
    /// City or place name.
    pub place: Option<String>,
    /// State name or abbreviation, as parsed.
    pub state: Option<String>,
    /// Legacy combined postal code, kept populated for compatibility.
    pub zip: Option<String>,
    pub zip5: Option<String>,
    pub zip4: Option<String>,
    /// Full ZIP: "12345" or "12345-6789".
    pub full_zip: Option<String>,
    /// PO Box type ("PO Box").
    pub box_type: Option<String>,
    pub box_id: Option<String>,
    pub box_group_type: Option<String>,
    pub box_group_id: Option<String>,
    /// Separator for intersections ("&", "and").
    pub intersection_separator: Option<String>,
    pub recipient: Option<String>,
    /// Text identified as not part of an address.
    pub not_address: Option<String>,
    /// Original raw input, echoed for comparison with normalized output.
    pub raw_input: Option<String>,
    /// True when derived from an international parse; None otherwise.
    pub is_international: Option<bool>,
    /// Tagger backend that produced this record.
    pub parser_source: Option<String>,
    pub country: Option<String>,
    /// SHA-256 hex digest of the computed `full` string.
    pub address_hash: Option<String>,
    /// Derived street line.
    pub line1: Option<String>,
    /// Derived unit/building line.
    pub line2: Option<String>,
    /// Derived complete formatted address. Always a string, never absent.
    pub full: String,
    /// Companion audit log; excluded from serialization.
    #[serde(skip)]
    pub log: ProcessLog,
}

impl Address {
    /// Recompute derived fields with strict postal-code resolution.
    pub fn recompute(&mut self) -> Result<(), AddressError> {
        self.recompute_with(ZipResolution::Strict).map(|_| ())
    }

    /// Recompute `line1`, `line2`, the resolved postal code, `full`, and the
    /// content hash, in that order. Idempotent: a second call over the same
    /// components yields identical output.
    pub fn recompute_with(
        &mut self,
        mode: ZipResolution,
    ) -> Result<RecomputeOutcome, AddressError> {
        self.line1 = self.compute_line1();
        self.line2 = self.compute_line2();
        let outcome = self.resolve_postal_code(mode)?;
        self.full = self.compute_full();
        self.address_hash = if self.full.is_empty() {
            None
        } else {
            Some(sha256_hex(&self.full))
        };
        Ok(outcome)
    }

    fn compute_line1(&self) -> Option<String> {
        // A PO Box pair replaces the street line entirely.
        if let (Some(box_type), Some(box_id)) = (&self.box_type, &self.box_id) {
            return Some(format!("{box_type} {box_id}"));
        }

        let parts: Vec<&str> = [
            self.number_prefix.as_deref(),
            self.number.as_deref(),
            self.number_suffix.as_deref(),
            self.street_pre_modifier.as_deref(),
            self.street_pre_directional.as_deref(),
            self.street_pre_type.as_deref(),
            self.street_name.as_deref(),
            self.street_post_type.as_deref(),
            self.street_post_directional.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    fn compute_line2(&self) -> Option<String> {
        let mut parts: Vec<String> = Vec::new();

        match (&self.subaddress_type, &self.subaddress_id) {
            (Some(kind), Some(id)) => parts.push(format!("{kind} {id}")),
            (Some(kind), None) => parts.push(kind.clone()),
            (None, Some(id)) => parts.push(id.clone()),
            (None, None) => {}
        }

        if let Some(building) = &self.building_name {
            parts.push(building.clone());
        }

        match (&self.occupancy_type, &self.occupancy_id) {
            (Some(kind), Some(id)) => parts.push(format!("{kind} {id}")),
            (Some(kind), None) => parts.push(kind.clone()),
            (None, Some(id)) => parts.push(id.clone()),
            (None, None) => {}
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }

    fn resolve_postal_code(
        &mut self,
        mode: ZipResolution,
    ) -> Result<RecomputeOutcome, AddressError> {
        let combined = self.full_zip.clone().or_else(|| self.zip.clone());

        if let Some(raw) = combined {
            let cleaned = raw.trim().to_string();

            // International postal codes pass through without US shape rules.
            if self.is_international == Some(true) {
                self.full_zip = Some(cleaned.clone());
                self.zip = Some(cleaned);
                return Ok(RecomputeOutcome::default());
            }

            let result = match mode {
                ZipResolution::Strict => zip::parse_zip(&cleaned),
                ZipResolution::Lenient => zip::parse_zip_lenient(&cleaned),
            };
            if !result.is_valid {
                let message = result
                    .error
                    .unwrap_or_else(|| "Invalid ZIP code".to_string());
                let field = if result.zip5.is_some() { "zip4" } else { "zip" };
                return Err(AddressError::structural(field, &cleaned, message));
            }

            let dropped = dropped_extension(&cleaned, &result);
            self.apply_zip_result(result);
            return Ok(RecomputeOutcome {
                dropped_zip4: dropped,
            });
        }

        if self.zip5.is_some() {
            let zip5 = zip::validate_zip5(self.zip5.as_deref()).map_err(|message| {
                AddressError::structural(
                    "zip5",
                    self.zip5.as_deref().unwrap_or_default(),
                    message,
                )
            })?;

            let mut dropped = None;
            let zip4 = match zip::validate_zip4(self.zip4.as_deref()) {
                Ok(value) => value,
                Err(message) => match mode {
                    ZipResolution::Strict => {
                        return Err(AddressError::structural(
                            "zip4",
                            self.zip4.as_deref().unwrap_or_default(),
                            message,
                        ));
                    }
                    ZipResolution::Lenient => {
                        dropped = self.zip4.clone();
                        None
                    }
                },
            };

            let full = zip::format_zip(&zip5, zip4.as_deref());
            self.zip5 = Some(zip5);
            self.zip4 = zip4;
            self.full_zip = Some(full.clone());
            self.zip = Some(full);
            return Ok(RecomputeOutcome {
                dropped_zip4: dropped,
            });
        }

        Ok(RecomputeOutcome::default())
    }

    fn apply_zip_result(&mut self, result: ZipCodeResult) {
        self.zip5 = result.zip5;
        self.zip4 = result.zip4;
        self.full_zip = result.full.clone();
        self.zip = result.full;
    }

    fn compute_full(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(line1) = &self.line1 {
            parts.push(line1.clone());
        }
        if let Some(line2) = &self.line2 {
            parts.push(line2.clone());
        }

        let mut locality: Vec<String> = Vec::new();
        if let Some(place) = &self.place {
            locality.push(place.clone());
        }
        match (&self.state, &self.full_zip) {
            (Some(state), Some(full_zip)) => locality.push(format!("{state} {full_zip}")),
            (Some(state), None) => locality.push(state.clone()),
            (None, Some(full_zip)) => locality.push(full_zip.clone()),
            (None, None) => {}
        }
        if !locality.is_empty() {
            parts.push(locality.join(", "));
        }

        parts.join(", ")
    }

    /// Re-raise postal-code and state errors from an external validation
    /// outcome as the domain error family, so structural and referential
    /// failures share one error channel. All matching errors are folded
    /// into a single referential error.
    pub fn validate_external_results(
        &self,
        outcome: &ValidationOutcome,
    ) -> Result<(), AddressError> {
        let relevant: Vec<_> = outcome
            .errors
            .iter()
            .filter(|error| matches!(error.field.as_str(), "zip" | "zip5" | "zip4" | "state"))
            .collect();
        if relevant.is_empty() {
            return Ok(());
        }

        let message = relevant
            .iter()
            .map(|error| error.message.clone())
            .collect::<Vec<_>>()
            .join("; ");
        let mut error = AddressError::referential(message);
        for field_error in relevant {
            error = error.with_context(
                format!("value.{}", field_error.field),
                field_error.value.clone().unwrap_or_default(),
            );
        }
        Err(error)
    }

    /// Flat field map with every component present; absent values are None.
    /// `full_zipcode` is the unified postal-code key.
    pub fn to_field_map(&self) -> BTreeMap<String, Option<String>> {
        let mut map = BTreeMap::new();
        let mut put = |key: &str, value: &Option<String>| {
            map.insert(key.to_string(), value.clone());
        };
        put("number_prefix", &self.number_prefix);
        put("number", &self.number);
        put("number_suffix", &self.number_suffix);
        put("street_pre_modifier", &self.street_pre_modifier);
        put("street_pre_directional", &self.street_pre_directional);
        put("street_pre_type", &self.street_pre_type);
        put("street_name", &self.street_name);
        put("street_post_type", &self.street_post_type);
        put("street_post_directional", &self.street_post_directional);
        put("subaddress_type", &self.subaddress_type);
        put("subaddress_id", &self.subaddress_id);
        put("building_name", &self.building_name);
        put("occupancy_type", &self.occupancy_type);
        put("occupancy_id", &self.occupancy_id);
        put("corner_of", &self.corner_of);
        put("landmark", &self.landmark);
        put("place", &self.place);
        put("state", &self.state);
        put("zip", &self.zip);
        put("zip5", &self.zip5);
        put("zip4", &self.zip4);
        put("full_zip", &self.full_zip);
        put("box_type", &self.box_type);
        put("box_id", &self.box_id);
        put("box_group_type", &self.box_group_type);
        put("box_group_id", &self.box_group_id);
        put("intersection_separator", &self.intersection_separator);
        put("recipient", &self.recipient);
        put("not_address", &self.not_address);
        put("raw_input", &self.raw_input);
        put("parser_source", &self.parser_source);
        put("country", &self.country);
        put("address_hash", &self.address_hash);
        put("line1", &self.line1);
        put("line2", &self.line2);
        map.insert(
            "is_international".to_string(),
            self.is_international.map(|flag| flag.to_string()),
        );
        map.insert("full".to_string(), Some(self.full.clone()));
        map.insert("full_zipcode".to_string(), self.full_zip.clone());
        map
    }
}

pub(crate) fn sha256_hex(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// The raw +4 text removed by lenient resolution, if the input carried an
/// extension candidate that did not survive parsing.
fn dropped_extension(cleaned: &str, result: &ZipCodeResult) -> Option<String> {
    if result.zip4.is_some() {
        return None;
    }
    let (_, zip4_part) = zip::split_zip(cleaned);
    zip4_part
        .filter(|part| !part.trim().is_empty())
        .map(|part| part.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn po_box_replaces_street_line() {
        let mut address = Address {
            number: Some("123".to_string()),
            street_name: Some("Main".to_string()),
            street_post_type: Some("St".to_string()),
            box_type: Some("PO Box".to_string()),
            box_id: Some("4520".to_string()),
            ..Address::default()
        };
        address.recompute().expect("recompute");
        assert_eq!(address.line1.as_deref(), Some("PO Box 4520"));
    }

    #[test]
    fn full_degrades_when_locality_is_partial() {
        let mut address = Address {
            place: Some("Austin".to_string()),
            ..Address::default()
        };
        address.recompute().expect("recompute");
        assert_eq!(address.full, "Austin");

        let mut zip_only = Address {
            full_zip: Some("78749".to_string()),
            ..Address::default()
        };
        zip_only.recompute().expect("recompute");
        assert_eq!(zip_only.full, "78749");
    }

    #[test]
    fn empty_record_formats_to_empty_string() {
        let mut address = Address::default();
        address.recompute().expect("recompute");
        assert_eq!(address.full, "");
        assert_eq!(address.address_hash, None);
    }
}
