//! Application service endpoints: search, detail, multipart submission, and
//! the per-document sub-routes.

use std::collections::BTreeMap;

use uuid::Uuid;

use medfin_core::models::{
    ApplicationDetail, ApplicationSummary, SelectedFile, SubmitResponse,
};
use medfin_core::AppError;

use crate::{file_part, ApiClient};

impl ApiClient {
    /// Search the applicant's submitted applications by CNIC.
    pub async fn search_applications(
        &self,
        cnic: &str,
    ) -> Result<Vec<ApplicationSummary>, AppError> {
        let query = vec![("search", urlencoding::encode(cnic).to_string())];
        self.get(&self.portal_url("/api/applications"), &query).await
    }

    /// Fetch one application by id.
    pub async fn get_application(&self, id: Uuid) -> Result<ApplicationDetail, AppError> {
        self.get(&self.portal_url(&format!("/api/applications/{}", id)), &[])
            .await
    }

    /// Submit the finished application: draft fields as text parts, the
    /// JSON-stringified extraction blob, and every selected file re-attached
    /// under its slot id.
    pub async fn submit_application(
        &self,
        fields: &BTreeMap<String, String>,
        extracted_data: &str,
        files: &[(String, SelectedFile)],
    ) -> Result<SubmitResponse, AppError> {
        let mut form = reqwest::multipart::Form::new();

        for (name, value) in fields {
            form = form.text(name.clone(), value.clone());
        }
        form = form.text("extractedData", extracted_data.to_string());

        for (slot_id, file) in files {
            form = form.part(slot_id.clone(), file_part(file)?);
        }

        self.post_multipart(&self.portal_url("/api/applications/submit"), form)
            .await
    }

    /// Replace one document on an already-submitted application.
    pub async fn reupload_document(
        &self,
        application_id: Uuid,
        slot_id: &str,
        file: &SelectedFile,
    ) -> Result<(), AppError> {
        let form = reqwest::multipart::Form::new().part("file", file_part(file)?);
        let url = self.portal_url(&format!(
            "/api/applications/{}/documents/{}/reupload",
            application_id, slot_id
        ));
        // Response body is an acknowledgment envelope; nothing to keep.
        let _: serde_json::Value = self.post_multipart(&url, form).await?;
        Ok(())
    }

    /// Download a submitted document's bytes.
    pub async fn download_document(
        &self,
        application_id: Uuid,
        slot_id: &str,
    ) -> Result<bytes::Bytes, AppError> {
        let url = self.portal_url(&format!(
            "/api/applications/{}/documents/{}/download",
            application_id, slot_id
        ));
        self.get_bytes(&url).await
    }

    /// Build the preview URL for a submitted document (does not call the
    /// API; the URL is opened by the front-end).
    pub fn preview_document_url(&self, application_id: Uuid, slot_id: &str) -> String {
        self.portal_url(&format!(
            "/api/applications/{}/documents/{}/preview",
            application_id, slot_id
        ))
    }

    /// Best-effort delete of a pre-submission document upload. Callers treat
    /// failure as non-fatal and reset local state regardless.
    pub async fn delete_document(&self, slot_id: &str) -> Result<(), AppError> {
        self.delete(&self.portal_url(&format!("/api/applications/documents/{}", slot_id)))
            .await
    }
}
