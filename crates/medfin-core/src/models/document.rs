use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// One required document type in a scheme's checklist.
///
/// Slots are defined at wizard initialization and are immutable for the
/// lifetime of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSlot {
    /// Stable string key (e.g. "cnic", "domicile").
    pub id: String,
    pub display_name: String,
    pub description: String,
    /// Lowercase file extensions this slot accepts.
    pub accepted_extensions: Vec<String>,
    /// Lowercase content types this slot accepts.
    pub accepted_content_types: Vec<String>,
    /// Whether the upload is handed to the remote extraction service.
    pub requires_extraction: bool,
    /// Extraction endpoint path; None for direct-upload slots.
    pub extraction_endpoint: Option<String>,
    /// Per-slot size ceiling in bytes.
    pub max_size_bytes: usize,
    /// Uploads below this are treated as truncated or empty.
    pub min_size_bytes: usize,
    /// Filename must contain at least one of these (lowercase).
    pub keywords: Vec<String>,
    /// Filename must also contain a token of the applicant's full name.
    pub identity_sensitive: bool,
}

/// Runtime status of one document slot.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[default]
    Pending,
    Uploading,
    Uploaded,
    Error,
}

impl Display for DocumentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DocumentStatus::Pending => write!(f, "pending"),
            DocumentStatus::Uploading => write!(f, "uploading"),
            DocumentStatus::Uploaded => write!(f, "uploaded"),
            DocumentStatus::Error => write!(f, "error"),
        }
    }
}

impl FromStr for DocumentStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(DocumentStatus::Pending),
            "uploading" => Ok(DocumentStatus::Uploading),
            "uploaded" => Ok(DocumentStatus::Uploaded),
            "error" => Ok(DocumentStatus::Error),
            _ => Err(anyhow::anyhow!("Invalid document status: {}", s)),
        }
    }
}

/// A file handed over by the picker. Ownership of the bytes moves into the
/// slot's `DocumentState` until the document is deleted or replaced.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl SelectedFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Lowercase extension, empty when the name has none.
    pub fn extension(&self) -> String {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default()
    }
}

/// Mutable per-slot runtime record, mutated only by the upload orchestrator.
#[derive(Debug, Clone, Default)]
pub struct DocumentState {
    pub status: DocumentStatus,
    /// 0-100, set when the upload resolves: the ticker's partial value on
    /// error, 100 on success.
    pub progress: u8,
    pub file: Option<SelectedFile>,
    pub error_message: Option<String>,
}

impl DocumentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_uploaded(&self) -> bool {
        self.status == DocumentStatus::Uploaded
    }

    /// Reset the slot back to `pending`, dropping the selected file and any
    /// error message.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
