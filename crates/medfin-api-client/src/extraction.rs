//! Extraction (OCR) service endpoints.
//!
//! The extraction service lives on its own host and accepts a multipart
//! file upload per document. Endpoint paths vary by document family
//! (`/extract`, `/extract/domicile`, `/extract/degree-or-diploma`,
//! `/extract/phc`); each slot carries its own path.

use medfin_core::models::{ExtractionResponse, SelectedFile};
use medfin_core::AppError;

use crate::{file_part, ApiClient};

impl ApiClient {
    /// Send one document to the extraction service and return its raw
    /// response. The response is loosely typed and read defensively by the
    /// extraction store.
    pub async fn extract(
        &self,
        endpoint_path: &str,
        file: &SelectedFile,
    ) -> Result<ExtractionResponse, AppError> {
        let form = reqwest::multipart::Form::new().part("file", file_part(file)?);
        self.post_multipart(&self.extraction_url(endpoint_path), form)
            .await
    }
}
