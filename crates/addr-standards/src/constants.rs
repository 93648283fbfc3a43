//! US state and territory constants.
//!
//! Single source of truth for name-to-abbreviation mappings used by state
//! normalization and the routing heuristics.

/// State name (lowercase) to abbreviation, all 50 states plus DC.
pub const STATE_NAME_TO_ABBREV: &[(&str, &str)] = &[
    ("alabama", "AL"),
    ("alaska", "AK"),
    ("arizona", "AZ"),
    ("arkansas", "AR"),
    ("california", "CA"),
    ("colorado", "CO"),
    ("connecticut", "CT"),
    ("delaware", "DE"),
    ("florida", "FL"),
    ("georgia", "GA"),
    ("hawaii", "HI"),
    ("idaho", "ID"),
    ("illinois", "IL"),
    ("indiana", "IN"),
    ("iowa", "IA"),
    ("kansas", "KS"),
    ("kentucky", "KY"),
    ("louisiana", "LA"),
    ("maine", "ME"),
    ("maryland", "MD"),
    ("massachusetts", "MA"),
    ("michigan", "MI"),
    ("minnesota", "MN"),
    ("mississippi", "MS"),
    ("missouri", "MO"),
    ("montana", "MT"),
    ("nebraska", "NE"),
    ("nevada", "NV"),
    ("new hampshire", "NH"),
    ("new jersey", "NJ"),
    ("new mexico", "NM"),
    ("new york", "NY"),
    ("north carolina", "NC"),
    ("north dakota", "ND"),
    ("ohio", "OH"),
    ("oklahoma", "OK"),
    ("oregon", "OR"),
    ("pennsylvania", "PA"),
    ("rhode island", "RI"),
    ("south carolina", "SC"),
    ("south dakota", "SD"),
    ("tennessee", "TN"),
    ("texas", "TX"),
    ("utah", "UT"),
    ("vermont", "VT"),
    ("virginia", "VA"),
    ("washington", "WA"),
    ("west virginia", "WV"),
    ("wisconsin", "WI"),
    ("wyoming", "WY"),
    ("district of columbia", "DC"),
];

/// Territory name (lowercase) to abbreviation.
pub const TERRITORY_NAME_TO_ABBREV: &[(&str, &str)] = &[
    ("puerto rico", "PR"),
    ("virgin islands", "VI"),
    ("us virgin islands", "VI"),
    ("guam", "GU"),
    ("american samoa", "AS"),
    ("northern mariana islands", "MP"),
];

/// Territory abbreviations valid in US postal addresses.
pub const TERRITORY_ABBREVS: &[&str] = &["PR", "VI", "GU", "AS", "MP"];

/// Resolve a state or territory name/abbreviation to its postal
/// abbreviation, case-insensitively, from the static tables alone.
pub fn state_abbreviation_for(text: &str) -> Option<&'static str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.len() == 2 {
        let upper = trimmed.to_ascii_uppercase();
        let known = STATE_NAME_TO_ABBREV
            .iter()
            .map(|(_, abbrev)| *abbrev)
            .chain(TERRITORY_ABBREVS.iter().copied())
            .find(|abbrev| *abbrev == upper);
        if known.is_some() {
            return known;
        }
    }

    let lower = trimmed.to_lowercase();
    STATE_NAME_TO_ABBREV
        .iter()
        .chain(TERRITORY_NAME_TO_ABBREV.iter())
        .find(|(name, _)| *name == lower)
        .map(|(_, abbrev)| *abbrev)
}
