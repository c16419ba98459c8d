use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire shape returned by the extraction service.
///
/// Upstream response shapes are inconsistent across endpoints, so every
/// field is optional and read defensively; `data` stays an opaque value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResponse {
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Structured data captured for one extracted document, keyed by slot id in
/// the extraction store. Last write wins; never merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRecord {
    pub document_type: String,
    /// Opaque structured payload from the extraction service.
    pub extracted_fields: serde_json::Value,
    pub extracted_at: DateTime<Utc>,
    pub status: i64,
    pub message: String,
}

impl ExtractionRecord {
    /// Normalize a raw service response into a record.
    pub fn from_response(document_type: impl Into<String>, response: &ExtractionResponse) -> Self {
        Self {
            document_type: document_type.into(),
            extracted_fields: response.data.clone(),
            extracted_at: Utc::now(),
            status: response.status.unwrap_or(200),
            message: response
                .message
                .clone()
                .unwrap_or_else(|| "Extraction completed".to_string()),
        }
    }
}
