use serde::{Deserialize, Serialize};

/// One field-scoped validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub value: Option<String>,
}

/// Aggregate result of running validation checks against a record.
///
/// Merging two outcomes ANDs validity and concatenates errors in check
/// order, so a composite runner reports every failure, not just the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub errors: Vec<FieldError>,
}

impl Default for ValidationOutcome {
    fn default() -> Self {
        Self::valid()
    }
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn add_error(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
        value: Option<String>,
    ) {
        self.is_valid = false;
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
            value,
        });
    }

    pub fn merge(&mut self, other: ValidationOutcome) {
        self.is_valid = self.is_valid && other.is_valid;
        self.errors.extend(other.errors);
    }
}
