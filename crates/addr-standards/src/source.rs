//! ZIP reference data: the lookup trait and its table-backed implementation.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants;
use crate::error::StandardsError;

/// Information about one US ZIP code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZipInfo {
    pub zip: String,
    pub city: String,
    pub state_abbrev: String,
    pub state_name: String,
    pub county: String,
}

/// Normalize a raw ZIP string into the 5-digit lookup key: drop any +4
/// extension, trim, left-pad to 5 digits.
pub fn clean_zip_key(zip_code: &str) -> String {
    let head = zip_code.split('-').next().unwrap_or_default().trim();
    format!("{head:0>5}")
}

/// Keyed lookup for ZIP-to-locality data and state validity.
///
/// Implementations load their table once at construction; lookups after
/// that are read-only, which makes concurrent access safe without locks.
pub trait ZipDataSource: Send + Sync {
    /// Look up a ZIP code (5-digit or ZIP+4 format).
    fn zip_info(&self, zip_code: &str) -> Option<ZipInfo>;

    /// All state abbreviations present in the loaded data.
    fn valid_state_abbrevs(&self) -> BTreeSet<String>;

    /// Normalize a state name or abbreviation to its two-letter form,
    /// case-insensitively. Falls back to the static state/territory tables
    /// for names not present in the loaded data.
    fn normalize_state(&self, state: &str) -> Option<String> {
        let trimmed = state.trim();
        if trimmed.is_empty() {
            return None;
        }
        let upper = trimmed.to_ascii_uppercase();
        if self.valid_state_abbrevs().contains(&upper) {
            return Some(upper);
        }
        constants::state_abbreviation_for(trimmed).map(str::to_string)
    }

    fn is_valid_state(&self, state: &str) -> bool {
        self.normalize_state(state).is_some()
    }

    fn is_valid_zip(&self, zip_code: &str) -> bool {
        self.zip_info(zip_code).is_some()
    }
}

/// In-memory ZIP table, the default [`ZipDataSource`] implementation.
#[derive(Debug, Clone, Default)]
pub struct ZipTable {
    by_zip: BTreeMap<String, ZipInfo>,
    state_abbrevs: BTreeSet<String>,
}

impl ZipTable {
    /// Build a table from already-materialized entries. Keys are cleaned
    /// (padded to 5 digits) on the way in.
    pub fn from_entries(entries: impl IntoIterator<Item = ZipInfo>) -> Self {
        let mut table = Self::default();
        for mut info in entries {
            info.zip = clean_zip_key(&info.zip);
            table.state_abbrevs.insert(info.state_abbrev.clone());
            table.by_zip.insert(info.zip.clone(), info);
        }
        table
    }

    /// Load a table from a CSV file with columns
    /// `zip,city,state_id,state_name,county_name`.
    pub fn load_csv(path: &Path) -> Result<Self, StandardsError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|error| StandardsError::csv(path, error.to_string()))?;

        let headers = reader
            .headers()
            .map_err(|error| StandardsError::csv(path, error.to_string()))?
            .clone();
        let column = |name: &str| -> Result<usize, StandardsError> {
            headers
                .iter()
                .position(|header| header.trim_matches('\u{feff}') == name)
                .ok_or_else(|| StandardsError::MissingColumn {
                    path: path.to_path_buf(),
                    column: name.to_string(),
                })
        };
        let zip_idx = column("zip")?;
        let city_idx = column("city")?;
        let state_id_idx = column("state_id")?;
        let state_name_idx = column("state_name")?;
        let county_idx = column("county_name")?;

        let mut entries = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|error| StandardsError::csv(path, error.to_string()))?;
            let field = |idx: usize| record.get(idx).unwrap_or_default().trim().to_string();
            entries.push(ZipInfo {
                zip: field(zip_idx),
                city: field(city_idx),
                state_abbrev: field(state_id_idx),
                state_name: field(state_name_idx),
                county: field(county_idx),
            });
        }

        let table = Self::from_entries(entries);
        debug!(
            zip_count = table.by_zip.len(),
            state_count = table.state_abbrevs.len(),
            path = %path.display(),
            "loaded ZIP reference table"
        );
        Ok(table)
    }

    /// Bundled sample table covering every state, DC, and Puerto Rico.
    /// Intended for demos and tests; production use should load a full
    /// table via [`ZipTable::load_csv`].
    pub fn builtin_sample() -> Self {
        let data = include_str!("../data/uszips_sample.csv");
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(data.as_bytes());
        let entries: Vec<ZipInfo> = reader
            .records()
            .filter_map(|record| record.ok())
            .map(|record| {
                let field = |idx: usize| record.get(idx).unwrap_or_default().trim().to_string();
                ZipInfo {
                    zip: field(0),
                    city: field(1),
                    state_abbrev: field(2),
                    state_name: field(3),
                    county: field(4),
                }
            })
            .collect();
        Self::from_entries(entries)
    }

    pub fn len(&self) -> usize {
        self.by_zip.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_zip.is_empty()
    }
}

impl ZipDataSource for ZipTable {
    fn zip_info(&self, zip_code: &str) -> Option<ZipInfo> {
        self.by_zip.get(&clean_zip_key(zip_code)).cloned()
    }

    fn valid_state_abbrevs(&self) -> BTreeSet<String> {
        self.state_abbrevs.clone()
    }
}
