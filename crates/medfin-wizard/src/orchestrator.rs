//! Per-document upload state machine.
//!
//! Each slot moves `pending -> uploading -> uploaded | error`, with
//! `delete` resetting back to `pending`. Failures never propagate past the
//! affected slot; the caller reads the stored error message instead.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use medfin_core::models::{
    DocumentSlot, DocumentState, DocumentStatus, ExtractionResponse, SelectedFile,
};
use medfin_core::{AppError, ErrorMetadata};

use crate::extraction::ExtractionStore;
use crate::progress::ProgressTicker;
use crate::registry::DocumentRegistry;
use crate::validator::validate_document;

/// Remote OCR extraction call for slots that require it.
#[async_trait]
pub trait ExtractionApi: Send + Sync {
    async fn extract(
        &self,
        endpoint_path: &str,
        file: &SelectedFile,
    ) -> Result<ExtractionResponse, AppError>;
}

/// Upload/delete calls for direct-upload slots.
#[async_trait]
pub trait DocumentApi: Send + Sync {
    async fn upload(&self, slot_id: &str, file: &SelectedFile) -> Result<(), AppError>;
    async fn delete(&self, slot_id: &str) -> Result<(), AppError>;
}

/// Final multipart submission of the composed application.
#[async_trait]
pub trait SubmissionApi: Send + Sync {
    async fn submit(
        &self,
        request: &crate::composer::SubmissionRequest,
    ) -> Result<medfin_core::models::SubmitResponse, AppError>;
}

/// Direct uploads hold the bytes locally until submission; the remote call
/// is a timed no-op kept as a seam for a real storage backend.
pub struct NoopDocumentApi {
    delay: Duration,
}

impl NoopDocumentApi {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for NoopDocumentApi {
    fn default() -> Self {
        Self::new(Duration::from_millis(400))
    }
}

#[async_trait]
impl DocumentApi for NoopDocumentApi {
    async fn upload(&self, _slot_id: &str, _file: &SelectedFile) -> Result<(), AppError> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }

    async fn delete(&self, _slot_id: &str) -> Result<(), AppError> {
        Ok(())
    }
}

pub struct UploadOrchestrator {
    registry: DocumentRegistry,
    states: HashMap<String, DocumentState>,
    extractions: ExtractionStore,
    extraction_api: Arc<dyn ExtractionApi>,
    document_api: Arc<dyn DocumentApi>,
    progress_tick: Duration,
}

impl UploadOrchestrator {
    pub fn new(
        registry: DocumentRegistry,
        extraction_api: Arc<dyn ExtractionApi>,
        document_api: Arc<dyn DocumentApi>,
        progress_tick: Duration,
    ) -> Self {
        let states = registry
            .slots()
            .iter()
            .map(|slot| (slot.id.clone(), DocumentState::new()))
            .collect();
        Self {
            registry,
            states,
            extractions: ExtractionStore::new(),
            extraction_api,
            document_api,
            progress_tick,
        }
    }

    pub fn registry(&self) -> &DocumentRegistry {
        &self.registry
    }

    pub fn state(&self, slot_id: &str) -> Option<&DocumentState> {
        self.states.get(slot_id)
    }

    pub fn extractions(&self) -> &ExtractionStore {
        &self.extractions
    }

    /// True iff every registered slot has an uploaded document. Gates the
    /// preview/submit step.
    pub fn all_uploaded(&self) -> bool {
        self.registry
            .slots()
            .iter()
            .all(|slot| self.states.get(&slot.id).is_some_and(DocumentState::is_uploaded))
    }

    /// Uploaded files by slot id, cloned out for the submission payload.
    pub fn uploaded_files(&self) -> Vec<(String, SelectedFile)> {
        self.registry
            .slots()
            .iter()
            .filter_map(|slot| {
                let state = self.states.get(&slot.id)?;
                if !state.is_uploaded() {
                    return None;
                }
                state.file.clone().map(|file| (slot.id.clone(), file))
            })
            .collect()
    }

    /// Handles a file picked for `slot_id`: validate, transition to
    /// `uploading`, dispatch the remote call, then settle in `uploaded` or
    /// `error`. Selecting over an existing upload replaces it.
    ///
    /// Validation failures leave an empty slot `pending` and an already
    /// uploaded slot untouched, in both cases with an inline message;
    /// remote failures leave the slot `error`. Both are returned so the
    /// caller can surface them, neither aborts the wizard.
    pub async fn select_file(
        &mut self,
        slot_id: &str,
        file: SelectedFile,
        name_tokens: &[String],
    ) -> Result<(), AppError> {
        let slot = self
            .registry
            .get(slot_id)
            .ok_or_else(|| AppError::NotFound(format!("document slot '{}'", slot_id)))?
            .clone();

        if let Err(err) = validate_document(&slot, &file, name_tokens) {
            let message = err.to_string();
            if let Some(state) = self.states.get_mut(slot_id) {
                // A failed replacement must not lose the prior upload or its
                // extraction record; only an empty slot resets.
                if !state.is_uploaded() {
                    state.reset();
                }
                state.error_message = Some(message.clone());
            }
            return Err(AppError::Validation(message));
        }

        // Replacing a prior upload drops its extraction record too.
        self.extractions.remove(slot_id);
        if let Some(state) = self.states.get_mut(slot_id) {
            state.status = DocumentStatus::Uploading;
            state.progress = 0;
            state.error_message = None;
            state.file = Some(file.clone());
        }

        let ticker = ProgressTicker::start(self.progress_tick);
        let outcome = self.dispatch(&slot, &file).await;

        match outcome {
            Ok(()) => {
                if let Some(state) = self.states.get_mut(slot_id) {
                    state.status = DocumentStatus::Uploaded;
                    state.progress = ticker.complete();
                }
                tracing::info!(slot = slot_id, file = %file.file_name, "document uploaded");
                Ok(())
            }
            Err(err) => {
                let progress = ticker.halt();
                if let Some(state) = self.states.get_mut(slot_id) {
                    state.status = DocumentStatus::Error;
                    state.progress = progress;
                    state.error_message = Some(err.client_message());
                }
                tracing::warn!(slot = slot_id, error = %err, "document upload failed");
                Err(err)
            }
        }
    }

    async fn dispatch(&mut self, slot: &DocumentSlot, file: &SelectedFile) -> Result<(), AppError> {
        match slot.extraction_endpoint.as_deref() {
            Some(endpoint) => {
                let response = self.extraction_api.extract(endpoint, file).await?;
                if let Some(status) = response.status {
                    if !(200..300).contains(&status) {
                        // Status comes from a loosely-typed body; out-of-range
                        // values are reported as a bad gateway.
                        return Err(AppError::Api {
                            status: u16::try_from(status).unwrap_or(502),
                            message: response
                                .message
                                .unwrap_or_else(|| "Extraction failed".to_string()),
                        });
                    }
                }
                self.extractions.save(&slot.id, &slot.id, &response);
                Ok(())
            }
            None => self.document_api.upload(&slot.id, file).await,
        }
    }

    /// Deleting a pending slot is a no-op. Otherwise the remote delete is
    /// best effort, and local state always resets to `pending`.
    pub async fn delete_document(&mut self, slot_id: &str) -> Result<(), AppError> {
        let state = self
            .states
            .get(slot_id)
            .ok_or_else(|| AppError::NotFound(format!("document slot '{}'", slot_id)))?;
        if state.status == DocumentStatus::Pending {
            return Ok(());
        }

        if let Err(err) = self.document_api.delete(slot_id).await {
            tracing::warn!(slot = slot_id, error = %err, "remote delete failed, resetting locally");
        }

        if let Some(state) = self.states.get_mut(slot_id) {
            state.reset();
        }
        self.extractions.remove(slot_id);
        Ok(())
    }
}
