//! Individual validation checks.

use std::sync::Arc;

use addr_model::{Address, ValidationOutcome, validate_zip4, validate_zip5};
use addr_standards::ZipDataSource;

/// One independent validation check over an address record.
///
/// Checks never mutate the record; each returns its own outcome and the
/// pipeline merges them in chain order.
pub trait AddressCheck: Send + Sync {
    /// Stable name used for runtime add/remove.
    fn name(&self) -> &'static str;

    fn validate(&self, address: &Address) -> ValidationOutcome;
}

/// Fast shape re-check of the 5-digit ZIP, no external lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct Zip5FormatCheck;

impl AddressCheck for Zip5FormatCheck {
    fn name(&self) -> &'static str {
        "zip5_format"
    }

    fn validate(&self, address: &Address) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::valid();
        if address.is_international == Some(true) {
            return outcome;
        }
        if let Some(zip5) = address.zip5.as_deref()
            && let Err(message) = validate_zip5(Some(zip5))
        {
            outcome.add_error("zip5", message, Some(zip5.to_string()));
        }
        outcome
    }
}

/// Fast shape re-check of the +4 extension, no external lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct Zip4FormatCheck;

impl AddressCheck for Zip4FormatCheck {
    fn name(&self) -> &'static str {
        "zip4_format"
    }

    fn validate(&self, address: &Address) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::valid();
        if address.is_international == Some(true) {
            return outcome;
        }
        if let Err(message) = validate_zip4(address.zip4.as_deref()) {
            outcome.add_error(
                "zip4",
                message,
                address.zip4.clone(),
            );
        }
        outcome
    }
}

/// Existence check against the reference data source, preferring the split
/// zip5 field over re-parsing the combined value. Optionally verifies the
/// ZIP's known state against the record's normalized state.
pub struct ZipCodeCheck {
    source: Arc<dyn ZipDataSource>,
    check_state_match: bool,
}

impl ZipCodeCheck {
    pub fn new(source: Arc<dyn ZipDataSource>, check_state_match: bool) -> Self {
        Self {
            source,
            check_state_match,
        }
    }
}

impl AddressCheck for ZipCodeCheck {
    fn name(&self) -> &'static str {
        "zip_code"
    }

    fn validate(&self, address: &Address) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::valid();
        if address.is_international == Some(true) {
            return outcome;
        }

        let Some(raw) = address
            .zip5
            .as_deref()
            .or(address.zip.as_deref())
            .or(address.full_zip.as_deref())
        else {
            // No ZIP to validate; absence is not an error here.
            return outcome;
        };
        let display = address.zip.as_deref().unwrap_or(raw);

        let Some(info) = self.source.zip_info(raw) else {
            outcome.add_error(
                "zip",
                format!("Invalid US ZIP code: {display}"),
                Some(display.to_string()),
            );
            return outcome;
        };

        if self.check_state_match
            && let Some(state) = address.state.as_deref()
            && let Some(normalized) = self.source.normalize_state(state)
            && normalized != info.state_abbrev
        {
            outcome.add_error(
                "zip",
                format!(
                    "ZIP code {display} is in {}, not {normalized}",
                    info.state_abbrev
                ),
                Some(display.to_string()),
            );
        }

        outcome
    }
}

/// State validity check. An absent state is fine; a present but
/// unrecognized one is an error.
pub struct StateCheck {
    source: Arc<dyn ZipDataSource>,
}

impl StateCheck {
    pub fn new(source: Arc<dyn ZipDataSource>) -> Self {
        Self { source }
    }
}

impl AddressCheck for StateCheck {
    fn name(&self) -> &'static str {
        "state"
    }

    fn validate(&self, address: &Address) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::valid();
        if address.is_international == Some(true) {
            return outcome;
        }
        if let Some(state) = address.state.as_deref()
            && !self.source.is_valid_state(state)
        {
            outcome.add_error(
                "state",
                format!("Invalid US state: {state}"),
                Some(state.to_string()),
            );
        }
        outcome
    }
}
