//! Shared HTTP client for the portal's external services.
//!
//! The portal consumes three remote services and defines no protocol of its
//! own: the auth/profile service, the application service (same host), and
//! the document extraction service (separate host). This crate provides a
//! minimal client with Bearer auth, generic GET/POST helpers, and domain
//! methods grouped by service.
//!
//! Error policy: transport failures become [`AppError::Transport`]; non-2xx
//! responses become [`AppError::Api`] carrying the server's message
//! verbatim so it can be surfaced to the user unchanged.

pub mod applications;
pub mod auth;
pub mod extraction;

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use medfin_core::models::SelectedFile;
use medfin_core::{AppError, PortalConfig};

/// HTTP client for the portal services.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    portal_base_url: String,
    extraction_base_url: String,
    bearer: Option<String>,
}

impl ApiClient {
    pub fn new(
        portal_base_url: String,
        extraction_base_url: String,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            portal_base_url: portal_base_url.trim_end_matches('/').to_string(),
            extraction_base_url: extraction_base_url.trim_end_matches('/').to_string(),
            bearer: None,
        })
    }

    pub fn from_config(config: &PortalConfig) -> Result<Self, AppError> {
        Self::new(
            config.portal_api_url.clone(),
            config.extraction_api_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Attach the bearer token obtained at login.
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn set_bearer(&mut self, token: impl Into<String>) {
        self.bearer = Some(token.into());
    }

    pub fn portal_url(&self, path: &str) -> String {
        format!("{}{}", self.portal_base_url, path)
    }

    pub fn extraction_url(&self, path: &str) -> String {
        format!("{}{}", self.extraction_base_url, path)
    }

    /// The stored bearer token, or a blocking Unauthorized error.
    fn bearer(&self) -> Result<&str, AppError> {
        self.bearer
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Unauthorized("No auth token in session".to_string()))
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, AppError> {
        let token = self.bearer()?;
        Ok(request.header("Authorization", format!("Bearer {}", token)))
    }

    async fn handle<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AppError> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }

        response
            .json()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to parse response as JSON: {}", e)))
    }

    /// Map a non-2xx response to an error carrying the server's message.
    /// JSON bodies with a `message` (or `error`) field are unwrapped so the
    /// user sees the business message, not the envelope.
    async fn api_error(status: reqwest::StatusCode, response: reqwest::Response) -> AppError {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .or_else(|| v.get("error"))
                    .and_then(|m| m.as_str())
                    .map(|m| m.to_string())
            })
            .unwrap_or(body);

        tracing::warn!(status = status.as_u16(), message = %message, "service returned an error");
        AppError::Api {
            status: status.as_u16(),
            message,
        }
    }

    fn transport(e: reqwest::Error) -> AppError {
        AppError::Transport(e.to_string())
    }

    /// GET with optional query parameters. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let mut request = self.authorized(self.client.get(url))?;
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(Self::transport)?;
        Self::handle(response).await
    }

    /// POST JSON body and deserialize response. Unauthenticated; used by
    /// the auth endpoints.
    pub async fn post_json_public<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::handle(response).await
    }

    /// POST a multipart form with the bearer token and deserialize response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        url: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, AppError> {
        let request = self.authorized(self.client.post(url).multipart(form))?;
        let response = request.send().await.map_err(Self::transport)?;
        Self::handle(response).await
    }

    /// DELETE request. Returns Ok(()) on success.
    pub async fn delete(&self, url: &str) -> Result<(), AppError> {
        let request = self.authorized(self.client.delete(url))?;
        let response = request.send().await.map_err(Self::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }
        Ok(())
    }

    /// GET raw bytes (document download).
    pub async fn get_bytes(&self, url: &str) -> Result<bytes::Bytes, AppError> {
        let request = self.authorized(self.client.get(url))?;
        let response = request.send().await.map_err(Self::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }

        response.bytes().await.map_err(Self::transport)
    }
}

/// Build a multipart file part from a selected file, preserving the
/// original filename and content type.
pub(crate) fn file_part(file: &SelectedFile) -> Result<reqwest::multipart::Part, AppError> {
    reqwest::multipart::Part::bytes(file.data.to_vec())
        .file_name(file.file_name.clone())
        .mime_str(&file.content_type)
        .map_err(|e| AppError::InvalidInput(format!("Invalid content type: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn client() -> ApiClient {
        ApiClient::new(
            "http://localhost:5000/".to_string(),
            "http://localhost:8000".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_urls_trim_trailing_slash() {
        let c = client();
        assert_eq!(
            c.portal_url("/api/applications"),
            "http://localhost:5000/api/applications"
        );
        assert_eq!(c.extraction_url("/extract"), "http://localhost:8000/extract");
    }

    #[test]
    fn test_missing_bearer_is_blocking() {
        let c = client();
        assert!(matches!(c.bearer(), Err(AppError::Unauthorized(_))));

        let c = c.with_bearer("tok");
        assert_eq!(c.bearer().unwrap(), "tok");
    }

    #[test]
    fn test_file_part_accepts_valid_content_type() {
        let file = SelectedFile::new("cnic.jpg", "image/jpeg", Bytes::from_static(b"x"));
        assert!(file_part(&file).is_ok());

        let bad = SelectedFile::new("cnic.jpg", "not a mime", Bytes::from_static(b"x"));
        assert!(file_part(&bad).is_err());
    }
}
