//! In-memory store for extraction service results.
//!
//! A keyed upsert with last-write-wins semantics, plus a path-fallback
//! lookup for reading logical fields out of the loosely-typed payloads the
//! extraction service returns.

use std::collections::HashMap;

use medfin_core::models::{ExtractionRecord, ExtractionResponse};
use serde_json::Value;

#[derive(Debug, Default)]
pub struct ExtractionStore {
    records: HashMap<String, ExtractionRecord>,
}

impl ExtractionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize and store the raw response under `document_id`, replacing
    /// any prior record for the same id.
    pub fn save(&mut self, document_id: &str, document_type: &str, response: &ExtractionResponse) {
        let record = ExtractionRecord::from_response(document_type, response);
        self.records.insert(document_id.to_string(), record);
    }

    pub fn get(&self, document_id: &str) -> Option<&ExtractionRecord> {
        self.records.get(document_id)
    }

    pub fn remove(&mut self, document_id: &str) -> Option<ExtractionRecord> {
        self.records.remove(document_id)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// First non-empty string found under any of the dotted candidate paths
    /// in the record for `document_id`. Upstream payloads are inconsistent
    /// about nesting and key casing, so callers pass paths in preference
    /// order, e.g. `["name", "fullName", "personal.full_name"]`.
    pub fn lookup(&self, document_id: &str, candidate_paths: &[&str]) -> Option<String> {
        let record = self.records.get(document_id)?;
        candidate_paths
            .iter()
            .find_map(|path| string_at_path(&record.extracted_fields, path))
    }

    /// All records as a JSON object keyed by document id, for the
    /// submission payload's extraction blob.
    pub fn to_json(&self) -> Value {
        let map: serde_json::Map<String, Value> = self
            .records
            .iter()
            .filter_map(|(id, record)| {
                serde_json::to_value(record).ok().map(|v| (id.clone(), v))
            })
            .collect();
        Value::Object(map)
    }
}

fn string_at_path(root: &Value, path: &str) -> Option<String> {
    let mut current = root;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    match current {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
