use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::{
    GOVERNMENT_EMPLOYED, NATURE_OF_EMPLOYMENT_FIELD, NOT_EXTRACTED, NOT_SELECTED,
};

/// Fields that must be non-empty and non-placeholder before submission.
pub const REQUIRED_FIELDS: [&str; 14] = [
    "fullName",
    "fatherName",
    "cnic",
    "dateOfBirth",
    "phone",
    "email",
    "address",
    "city",
    "qualification",
    "registrationNumber",
    NATURE_OF_EMPLOYMENT_FIELD,
    "loanAmount",
    "purpose",
    "scheme",
];

/// Reasons a draft cannot be submitted.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Required field '{0}' is empty")]
    MissingField(String),

    #[error("Required field '{0}' has not been filled in")]
    PlaceholderField(String),

    #[error("Government employees are not eligible for this scheme")]
    GovernmentEmployed,
}

/// The in-progress, user-editable application form shown in the preview
/// step. A flat field-name to string-value mapping; seeding and merge
/// priority live in the preview composer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationFormDraft {
    fields: BTreeMap<String, String>,
}

impl ApplicationFormDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(|s| s.as_str())
    }

    /// Pure single-key replace; the only mutation the preview step performs.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Set only if the field is currently absent or empty. Used during
    /// seeding so higher-priority sources are never overwritten.
    pub fn set_if_empty(&mut self, field: &str, value: impl Into<String>) {
        let empty = self.fields.get(field).map(|v| v.is_empty()).unwrap_or(true);
        if empty {
            self.fields.insert(field.to_string(), value.into());
        }
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn is_placeholder(value: &str) -> bool {
        value == NOT_EXTRACTED || value == NOT_SELECTED
    }

    /// Validate the draft for submission: every required field present,
    /// non-empty, non-placeholder; then the employment policy rule.
    pub fn validate_for_submit(&self) -> Result<(), DraftError> {
        for field in REQUIRED_FIELDS {
            match self.get(field) {
                None => return Err(DraftError::MissingField(field.to_string())),
                Some(v) if v.trim().is_empty() => {
                    return Err(DraftError::MissingField(field.to_string()))
                }
                Some(v) if Self::is_placeholder(v) => {
                    return Err(DraftError::PlaceholderField(field.to_string()))
                }
                Some(_) => {}
            }
        }

        // Scheme policy: government employees cannot apply at all.
        if self.get(NATURE_OF_EMPLOYMENT_FIELD) == Some(GOVERNMENT_EMPLOYED) {
            return Err(DraftError::GovernmentEmployed);
        }

        Ok(())
    }
}
