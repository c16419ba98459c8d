//! Per-document pre-upload validation.
//!
//! Pure metadata checks over a selected file: the validator never inspects
//! file content, only name, size, and content type. It is a fast pre-check;
//! the extraction service's own response stays the authoritative verdict
//! for extraction-backed slots.

use medfin_core::models::{DocumentSlot, SelectedFile};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{display_name} must be smaller than {max_mb} MB")]
    FileTooLarge { display_name: String, max_mb: usize },

    #[error("{display_name} looks empty or truncated, please select the full document")]
    FileTooSmall { display_name: String },

    #[error("{display_name} must be one of: {accepted}")]
    UnsupportedType { display_name: String, accepted: String },

    #[error("file name should mention the document, e.g. one of: {expected}")]
    MissingKeyword { expected: String },

    #[error("file name should include your name as it appears on the document")]
    NameMismatch,
}

/// Affirmative result carrying a short user-facing confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    pub message: String,
}

/// Checks run in order, short-circuiting on the first failure:
/// size ceiling, size floor, content type, slot keyword, and for
/// identity-sensitive slots a name-token match. `name_tokens` are the
/// lowercase tokens of the signed-in user's full name; when empty the
/// name check is skipped (no profile loaded yet).
pub fn validate_document(
    slot: &DocumentSlot,
    file: &SelectedFile,
    name_tokens: &[String],
) -> Result<ValidationOutcome, ValidationError> {
    if file.size() > slot.max_size_bytes {
        return Err(ValidationError::FileTooLarge {
            display_name: slot.display_name.clone(),
            max_mb: slot.max_size_bytes / (1024 * 1024),
        });
    }

    if file.size() < slot.min_size_bytes {
        return Err(ValidationError::FileTooSmall {
            display_name: slot.display_name.clone(),
        });
    }

    let content_type = file.content_type.to_ascii_lowercase();
    if !slot
        .accepted_content_types
        .iter()
        .any(|t| t.eq_ignore_ascii_case(&content_type))
    {
        return Err(ValidationError::UnsupportedType {
            display_name: slot.display_name.clone(),
            accepted: slot.accepted_extensions.join(", "),
        });
    }

    let file_name = file.file_name.to_lowercase();
    if !slot.keywords.iter().any(|k| file_name.contains(k.as_str())) {
        return Err(ValidationError::MissingKeyword {
            expected: slot.keywords.join(", "),
        });
    }

    if slot.identity_sensitive && !name_tokens.is_empty() {
        let matched = name_tokens
            .iter()
            .filter(|t| t.len() >= 2)
            .any(|t| file_name.contains(t.as_str()));
        if !matched {
            return Err(ValidationError::NameMismatch);
        }
    }

    Ok(ValidationOutcome {
        message: format!("{} looks good", slot.display_name),
    })
}
