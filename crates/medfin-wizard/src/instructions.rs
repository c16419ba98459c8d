//! Acknowledgment gate shown before the file picker opens.
//!
//! A soft workflow gate, not a security boundary: `proceed` is only
//! reachable after the sheet has been opened for that document id. The
//! gate itself holds no state beyond the currently targeted id.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GateError {
    #[error("instructions have not been shown for document '{document_id}'")]
    NotOpened { document_id: String },

    #[error("no instructions registered for document '{document_id}'")]
    UnknownDocument { document_id: String },
}

/// Bilingual step-by-step upload instructions for one document type.
#[derive(Debug, Clone)]
pub struct InstructionSheet {
    pub document_id: String,
    pub title: String,
    pub steps_en: Vec<String>,
    pub steps_ur: Vec<String>,
}

impl InstructionSheet {
    fn generic(document_id: &str, display_name: &str) -> Self {
        Self {
            document_id: document_id.to_string(),
            title: format!("How to upload your {}", display_name),
            steps_en: vec![
                format!("Scan or photograph your {} in good lighting", display_name),
                "Make sure all corners are visible and the text is readable".to_string(),
                format!(
                    "Name the file with your full name and the document, e.g. 'Anwar Ali {}'",
                    display_name
                ),
                "Select the file when the picker opens".to_string(),
            ],
            steps_ur: vec![
                format!("{} کو اچھی روشنی میں اسکین یا تصویر لیں", display_name),
                "یقینی بنائیں کہ چاروں کونے نظر آئیں اور تحریر پڑھی جا سکے".to_string(),
                "فائل کا نام اپنے پورے نام اور دستاویز کے نام پر رکھیں".to_string(),
                "پکر کھلنے پر فائل منتخب کریں".to_string(),
            ],
        }
    }
}

/// Tracks which document the sheet is currently open for.
#[derive(Debug, Default)]
pub struct InstructionsGate {
    sheets: HashMap<String, InstructionSheet>,
    open_for: Option<String>,
}

impl InstructionsGate {
    /// Builds a gate with a sheet per registered slot.
    pub fn new(slots: impl IntoIterator<Item = (String, String)>) -> Self {
        let sheets = slots
            .into_iter()
            .map(|(id, display_name)| {
                let sheet = InstructionSheet::generic(&id, &display_name);
                (id, sheet)
            })
            .collect();
        Self {
            sheets,
            open_for: None,
        }
    }

    /// Opens the sheet for `document_id` and returns it for display.
    pub fn open(&mut self, document_id: &str) -> Result<&InstructionSheet, GateError> {
        let sheet = self
            .sheets
            .get(document_id)
            .ok_or_else(|| GateError::UnknownDocument {
                document_id: document_id.to_string(),
            })?;
        self.open_for = Some(document_id.to_string());
        Ok(sheet)
    }

    /// User acknowledged the instructions; yields the document id the file
    /// picker should target. Closes the sheet.
    pub fn proceed(&mut self, document_id: &str) -> Result<String, GateError> {
        match self.open_for.as_deref() {
            Some(open) if open == document_id => {
                self.open_for = None;
                Ok(document_id.to_string())
            }
            _ => Err(GateError::NotOpened {
                document_id: document_id.to_string(),
            }),
        }
    }

    /// User dismissed the sheet; no other state changes.
    pub fn cancel(&mut self) {
        self.open_for = None;
    }

    pub fn is_open_for(&self, document_id: &str) -> bool {
        self.open_for.as_deref() == Some(document_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> InstructionsGate {
        InstructionsGate::new([
            ("cnic".to_string(), "CNIC".to_string()),
            ("photo".to_string(), "Photograph".to_string()),
        ])
    }

    #[test]
    fn test_proceed_requires_open_first() {
        let mut g = gate();
        let err = g.proceed("cnic").unwrap_err();
        assert!(matches!(err, GateError::NotOpened { .. }));
    }

    #[test]
    fn test_open_then_proceed() {
        let mut g = gate();
        let sheet = g.open("cnic").unwrap();
        assert_eq!(sheet.document_id, "cnic");
        assert!(!sheet.steps_en.is_empty());
        assert!(!sheet.steps_ur.is_empty());
        assert_eq!(g.proceed("cnic").unwrap(), "cnic");
        assert!(!g.is_open_for("cnic"));
    }

    #[test]
    fn test_proceed_for_different_document_fails() {
        let mut g = gate();
        g.open("cnic").unwrap();
        assert!(g.proceed("photo").is_err());
        // the cnic sheet is still open
        assert!(g.is_open_for("cnic"));
    }

    #[test]
    fn test_cancel_closes_without_proceeding() {
        let mut g = gate();
        g.open("photo").unwrap();
        g.cancel();
        assert!(g.proceed("photo").is_err());
    }

    #[test]
    fn test_unknown_document_rejected_at_open() {
        let mut g = gate();
        let err = g.open("passport").unwrap_err();
        assert!(matches!(err, GateError::UnknownDocument { .. }));
    }

    #[test]
    fn test_proceed_consumes_the_open_state() {
        let mut g = gate();
        g.open("cnic").unwrap();
        g.proceed("cnic").unwrap();
        // a second proceed needs a fresh open
        assert!(g.proceed("cnic").is_err());
    }
}
