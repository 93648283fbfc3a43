use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category of a domain error. One tagged type covers the whole family so
/// callers match on the kind instead of downcasting through wrapper types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Postal code or state failed shape rules at construction time.
    StructuralValidation,
    /// Well-formed value unknown to the reference data source.
    ReferentialValidation,
    /// International backend returned no usable components.
    InternationalConstruction,
    /// International backend is not installed or reachable.
    BackendUnavailable,
    /// Raw text could not be tagged/tokenized.
    Parse,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::StructuralValidation => "structural_validation",
            ErrorKind::ReferentialValidation => "referential_validation",
            ErrorKind::InternationalConstruction => "international_construction",
            ErrorKind::BackendUnavailable => "backend_unavailable",
            ErrorKind::Parse => "parse",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Domain error carried by every fallible operation in the pipeline.
///
/// The context map holds structured details (offending field, raw value)
/// so callers can report errors without parsing the message text.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct AddressError {
    pub kind: ErrorKind,
    pub message: String,
    pub context: BTreeMap<String, String>,
}

impl AddressError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Shape failure at record-construction time (bad ZIP length etc.).
    pub fn structural(field: &str, value: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StructuralValidation, message)
            .with_context("field", field)
            .with_context("value", value)
    }

    /// Well-formed value rejected by the reference data source.
    pub fn referential(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ReferentialValidation, message)
    }

    pub fn international(raw_input: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InternationalConstruction, message)
            .with_context("value", raw_input)
    }

    pub fn backend_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BackendUnavailable, message)
    }

    pub fn parse(raw_input: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse, message).with_context("value", raw_input)
    }

    /// Field recorded in the context map, if any.
    pub fn field(&self) -> Option<&str> {
        self.context.get("field").map(String::as_str)
    }
}

pub type Result<T> = std::result::Result<T, AddressError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_error_carries_field_context() {
        let error = AddressError::structural("zip5", "1234", "Invalid zip5 format: 1234");
        assert_eq!(error.kind, ErrorKind::StructuralValidation);
        assert_eq!(error.field(), Some("zip5"));
        assert_eq!(error.context.get("value").map(String::as_str), Some("1234"));
        assert_eq!(
            error.to_string(),
            "structural_validation: Invalid zip5 format: 1234"
        );
    }

    #[test]
    fn kind_round_trips_through_serde() {
        let error = AddressError::backend_unavailable("international backend not configured");
        let json = serde_json::to_string(&error).expect("serialize error");
        let round: AddressError = serde_json::from_str(&json).expect("deserialize error");
        assert_eq!(round, error);
    }
}
