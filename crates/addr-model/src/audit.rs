//! Audit log for silent transformations.
//!
//! Every normalization the pipeline applies without being asked is recorded
//! here so downstream consumers can see exactly how raw input became a
//! normalized record. The log is a companion object composed into each
//! record type rather than a base class.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category of a recorded transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Format standardization (abbreviations, ZIP formats).
    Normalization,
    /// Whitespace, punctuation, case changes.
    Formatting,
    /// Abbreviation expansion (via the international backend).
    Expansion,
    /// Removal of invalid data.
    Cleaning,
    /// Component extraction from raw input.
    Parsing,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Normalization => "normalization",
            OperationKind::Formatting => "formatting",
            OperationKind::Expansion => "expansion",
            OperationKind::Cleaning => "cleaning",
            OperationKind::Parsing => "parsing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Cleaning,
    Error,
}

/// One recorded transformation or error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessEntry {
    pub entry_type: EntryType,
    pub field: String,
    pub message: String,
    pub original_value: Option<String>,
    pub new_value: Option<String>,
    pub operation: OperationKind,
    pub timestamp: DateTime<Utc>,
}

impl ProcessEntry {
    pub fn cleaning(
        field: impl Into<String>,
        original_value: Option<String>,
        new_value: Option<String>,
        reason: impl Into<String>,
        operation: OperationKind,
    ) -> Self {
        Self {
            entry_type: EntryType::Cleaning,
            field: field.into(),
            message: reason.into(),
            original_value,
            new_value,
            operation,
            timestamp: Utc::now(),
        }
    }

    pub fn error(
        field: impl Into<String>,
        message: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        Self {
            entry_type: EntryType::Error,
            field: field.into(),
            message: message.into(),
            original_value: value,
            new_value: None,
            operation: OperationKind::Cleaning,
            timestamp: Utc::now(),
        }
    }
}

/// A process entry tagged with the record it originated from, for
/// flat cross-record reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub source: String,
    #[serde(flatten)]
    pub entry: ProcessEntry,
}

/// Companion log held alongside each record type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessLog {
    pub cleaning: Vec<ProcessEntry>,
    pub errors: Vec<ProcessEntry>,
}

impl ProcessLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cleaning(
        &mut self,
        field: impl Into<String>,
        original_value: Option<String>,
        new_value: Option<String>,
        reason: impl Into<String>,
        operation: OperationKind,
    ) {
        self.cleaning.push(ProcessEntry::cleaning(
            field,
            original_value,
            new_value,
            reason,
            operation,
        ));
    }

    pub fn record_error(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
        value: Option<String>,
    ) {
        self.errors.push(ProcessEntry::error(field, message, value));
    }

    pub fn is_empty(&self) -> bool {
        self.cleaning.is_empty() && self.errors.is_empty()
    }

    /// Flatten the log into audit records tagged with `source`.
    pub fn export(&self, source: &str) -> Vec<AuditRecord> {
        self.cleaning
            .iter()
            .chain(self.errors.iter())
            .map(|entry| AuditRecord {
                source: source.to_string(),
                entry: entry.clone(),
            })
            .collect()
    }
}
