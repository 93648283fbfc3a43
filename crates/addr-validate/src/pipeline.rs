//! Composite runner over the validation checks.

use std::sync::Arc;

use addr_model::{Address, ValidationOutcome};
use addr_standards::ZipDataSource;
use tracing::debug;

use crate::checks::{AddressCheck, StateCheck, Zip4FormatCheck, Zip5FormatCheck, ZipCodeCheck};

/// Ordered chain of validation checks.
///
/// Runs every check, merging outcomes so validity is the AND of all checks
/// and errors appear in chain order. Checks can be added and removed by
/// name at runtime without rebuilding the chain.
pub struct CheckPipeline {
    checks: Vec<Box<dyn AddressCheck>>,
}

impl CheckPipeline {
    pub fn new(checks: Vec<Box<dyn AddressCheck>>) -> Self {
        Self { checks }
    }

    pub fn empty() -> Self {
        Self { checks: Vec::new() }
    }

    pub fn add_check(&mut self, check: Box<dyn AddressCheck>) {
        self.checks.push(check);
    }

    /// Remove the first check with the given name. Returns whether one was
    /// removed.
    pub fn remove_check(&mut self, name: &str) -> bool {
        if let Some(position) = self.checks.iter().position(|check| check.name() == name) {
            self.checks.remove(position);
            true
        } else {
            false
        }
    }

    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|check| check.name()).collect()
    }

    pub fn validate(&self, address: &Address) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::valid();
        for check in &self.checks {
            let result = check.validate(address);
            if !result.is_valid {
                debug!(check = check.name(), errors = result.errors.len(), "check failed");
            }
            outcome.merge(result);
        }
        outcome
    }
}

/// The default chain: zip5 shape, zip4 shape, ZIP existence, state validity.
pub fn default_pipeline(source: Arc<dyn ZipDataSource>, check_state_match: bool) -> CheckPipeline {
    CheckPipeline::new(vec![
        Box::new(Zip5FormatCheck),
        Box::new(Zip4FormatCheck),
        Box::new(ZipCodeCheck::new(Arc::clone(&source), check_state_match)),
        Box::new(StateCheck::new(source)),
    ])
}
