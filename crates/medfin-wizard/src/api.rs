//! Wires the wizard's API seams to the real HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use medfin_api_client::ApiClient;
use medfin_core::models::{ExtractionResponse, SelectedFile, SubmitResponse};
use medfin_core::AppError;

use crate::composer::SubmissionRequest;
use crate::orchestrator::{DocumentApi, ExtractionApi, SubmissionApi};

#[async_trait]
impl ExtractionApi for ApiClient {
    async fn extract(
        &self,
        endpoint_path: &str,
        file: &SelectedFile,
    ) -> Result<ExtractionResponse, AppError> {
        ApiClient::extract(self, endpoint_path, file).await
    }
}

#[async_trait]
impl DocumentApi for ApiClient {
    /// Direct-upload slots keep their bytes locally until submission; the
    /// portal has no standalone per-document upload endpoint, so this is a
    /// timed no-op left as a seam for a real storage call.
    async fn upload(&self, slot_id: &str, file: &SelectedFile) -> Result<(), AppError> {
        tracing::debug!(slot = slot_id, file = %file.file_name, "holding direct upload locally");
        tokio::time::sleep(Duration::from_millis(400)).await;
        Ok(())
    }

    async fn delete(&self, slot_id: &str) -> Result<(), AppError> {
        self.delete_document(slot_id).await
    }
}

#[async_trait]
impl SubmissionApi for ApiClient {
    async fn submit(&self, request: &SubmissionRequest) -> Result<SubmitResponse, AppError> {
        let extracted_data = serde_json::to_string(&request.extracted_data)?;
        self.submit_application(&request.fields, &extracted_data, &request.files)
            .await
    }
}
