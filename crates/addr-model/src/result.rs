//! The result envelope wrapping one parse attempt.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::audit::{AuditRecord, ProcessLog};
use crate::error::AddressError;
use crate::international::InternationalAddress;
use crate::outcome::ValidationOutcome;

/// Which backend produced the final record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseSource {
    Us,
    International,
}

impl ParseSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseSource::Us => "us",
            ParseSource::International => "international",
        }
    }
}

/// Result of one parse attempt, tolerant by construction: errors are
/// captured here instead of propagating.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    pub raw_input: String,
    pub address: Option<Address>,
    pub international: Option<InternationalAddress>,
    pub error: Option<AddressError>,
    pub validation: Option<ValidationOutcome>,
    pub source: Option<ParseSource>,
    /// Process-level log for operations that happen before a record exists.
    pub process_log: ProcessLog,
    /// Components cleaned under partial validation (field -> removed value).
    pub cleaned_components: BTreeMap<String, String>,
    /// Components found invalid under partial validation (field -> detail).
    pub invalid_components: BTreeMap<String, String>,
}

impl ParseResult {
    pub fn new(raw_input: impl Into<String>) -> Self {
        Self {
            raw_input: raw_input.into(),
            ..Self::default()
        }
    }

    pub fn failed(raw_input: impl Into<String>, error: AddressError) -> Self {
        Self {
            raw_input: raw_input.into(),
            error: Some(error),
            ..Self::default()
        }
    }

    /// True when parsing produced a record, regardless of validation.
    pub fn is_parsed(&self) -> bool {
        self.error.is_none() && (self.address.is_some() || self.international.is_some())
    }

    /// True when parsing succeeded and validation (if attached) passed.
    pub fn is_valid(&self) -> bool {
        if !self.is_parsed() {
            return false;
        }
        match &self.validation {
            Some(outcome) => outcome.is_valid,
            None => true,
        }
    }

    /// Flat field map for serialization. The international record wins when
    /// both are present so its postal code is preserved; an unparsed result
    /// yields an all-None map.
    pub fn to_field_map(&self) -> BTreeMap<String, Option<String>> {
        if let Some(international) = &self.international {
            return international.to_field_map();
        }
        if let Some(address) = &self.address {
            return address.to_field_map();
        }
        Address::default()
            .to_field_map()
            .into_keys()
            .map(|key| (key, None))
            .collect()
    }

    /// Combine the process-level log with each record's log, every entry
    /// tagged with its origin, sorted by timestamp.
    pub fn aggregate_entries(&self) -> Vec<AuditRecord> {
        let mut entries = self.process_log.export("parse_result");
        if let Some(address) = &self.address {
            entries.extend(address.log.export("address"));
        }
        if let Some(international) = &self.international {
            entries.extend(international.log.export("international_address"));
        }
        entries.sort_by(|a, b| a.entry.timestamp.cmp(&b.entry.timestamp));
        entries
    }
}
