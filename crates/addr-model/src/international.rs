//! International address records produced by the expansion backend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::address::sha256_hex;
use crate::audit::ProcessLog;
use crate::error::AddressError;

/// Labels that can stand in for a road when the backend found no explicit
/// one, tried in order.
const STREET_LIKE_LABELS: &[&str] = &[
    "road",
    "house_number",
    "po_box",
    "suburb",
    "city_district",
    "neighbourhood",
    "building",
    "unit",
    "level",
    "staircase",
    "entrance",
];

/// Parsed international address components.
///
/// Built from the backend's labeled component list; construction is strict
/// about locality and road signals (see [`InternationalAddress::from_components`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternationalAddress {
    pub raw_input: String,
    pub house_number: Option<String>,
    /// Street/road name.
    pub road: Option<String>,
    /// City or locality.
    pub city: Option<String>,
    /// State/region/province.
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    /// Complete formatted address derived from parsed components.
    pub full: String,
    /// Normalized expansion variants of the raw input, if available.
    pub expansions: Vec<String>,
    /// Raw backend components; lists preserve duplicate labels.
    pub components: BTreeMap<String, Vec<String>>,
    /// SHA-256 hex digest of the canonical expanded form.
    pub address_hash: Option<String>,
    #[serde(skip)]
    pub log: ProcessLog,
}

impl InternationalAddress {
    /// Build from backend components with strict validation.
    ///
    /// Fails when the component map is empty, when no locality signal
    /// (city/state/postal/country) is present, or when no road-like
    /// component can be found.
    pub fn from_components(
        raw_input: &str,
        components: BTreeMap<String, Vec<String>>,
        expansions: Vec<String>,
    ) -> Result<Self, AddressError> {
        if components.is_empty() {
            return Err(AddressError::international(
                raw_input,
                "No components parsed from international backend",
            ));
        }

        let join = |label: &str| -> Option<String> {
            components
                .get(label)
                .filter(|values| !values.is_empty())
                .map(|values| values.join(" "))
        };

        let house_number = join("house_number");
        let city = join("city").or_else(|| join("suburb"));
        let state = join("state").or_else(|| join("state_district"));
        let postal_code = join("postcode");
        let country = join("country");
        let country_code = join("country_code");

        let road = join("road")
            .or_else(|| STREET_LIKE_LABELS.iter().copied().find_map(|label| join(label)));

        if city.is_none() && state.is_none() && postal_code.is_none() && country.is_none() {
            return Err(AddressError::international(
                raw_input,
                "International address missing location components",
            ));
        }
        let Some(road) = road else {
            return Err(AddressError::international(
                raw_input,
                "International address missing road component",
            ));
        };

        let full = format_full(
            house_number.as_deref(),
            &road,
            city.as_deref(),
            state.as_deref(),
            postal_code.as_deref(),
            country.as_deref(),
        );
        let canonical = expansions.first().map_or(full.as_str(), String::as_str);
        let address_hash = if canonical.is_empty() {
            None
        } else {
            Some(sha256_hex(canonical))
        };

        Ok(Self {
            raw_input: raw_input.to_string(),
            house_number,
            road: Some(road),
            city,
            state,
            postal_code,
            country,
            country_code,
            full,
            expansions,
            components,
            address_hash,
            log: ProcessLog::new(),
        })
    }

    /// Flat field map mirroring the domestic shape: US-specific ZIP keys are
    /// present but empty, and the unified `full_zipcode` key carries the raw
    /// international postal code.
    pub fn to_field_map(&self) -> BTreeMap<String, Option<String>> {
        let mut map = BTreeMap::new();
        map.insert("raw_input".to_string(), Some(self.raw_input.clone()));
        map.insert("house_number".to_string(), self.house_number.clone());
        map.insert("road".to_string(), self.road.clone());
        map.insert("city".to_string(), self.city.clone());
        map.insert("state".to_string(), self.state.clone());
        map.insert("postal_code".to_string(), self.postal_code.clone());
        map.insert("country".to_string(), self.country.clone());
        map.insert("country_code".to_string(), self.country_code.clone());
        map.insert("full".to_string(), Some(self.full.clone()));
        map.insert("address_hash".to_string(), self.address_hash.clone());
        map.insert("zip".to_string(), None);
        map.insert("zip5".to_string(), None);
        map.insert("zip4".to_string(), None);
        map.insert("full_zip".to_string(), None);
        map.insert("full_zipcode".to_string(), self.postal_code.clone());
        map
    }
}

fn format_full(
    house_number: Option<&str>,
    road: &str,
    city: Option<&str>,
    state: Option<&str>,
    postal_code: Option<&str>,
    country: Option<&str>,
) -> String {
    let line1 = [house_number, Some(road)]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    let locality = [city, state, postal_code]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ");

    let mut parts: Vec<&str> = Vec::new();
    let line1 = line1.trim();
    if !line1.is_empty() {
        parts.push(line1);
    }
    if !locality.is_empty() {
        parts.push(&locality);
    }
    if let Some(country) = country {
        parts.push(country);
    }
    parts.join(", ")
}
