//! Configuration module
//!
//! Env-driven configuration for the portal engine: the three external
//! service base URLs, upload size caps, and the cosmetic progress tick.

use std::env;

use crate::constants::{
    MAX_DOCUMENT_SIZE_BYTES, MAX_PHOTO_SIZE_BYTES, MAX_TAX_CERTIFICATE_SIZE_BYTES,
    MIN_DOCUMENT_SIZE_BYTES,
};

const REQUEST_TIMEOUT_SECS: u64 = 60;
const PROGRESS_TICK_MS: u64 = 300;

/// Portal configuration, loaded from environment variables.
#[derive(Clone, Debug)]
pub struct PortalConfig {
    /// Base URL of the auth + application services.
    pub portal_api_url: String,
    /// Base URL of the extraction (OCR) service, a separate host.
    pub extraction_api_url: String,
    pub request_timeout_secs: u64,
    pub max_document_size_bytes: usize,
    pub max_photo_size_bytes: usize,
    pub max_tax_certificate_size_bytes: usize,
    pub min_document_size_bytes: usize,
    /// Interval between cosmetic progress increments while a real upload
    /// call is in flight.
    pub progress_tick_ms: u64,
    /// Path of the JSON session file. None selects an in-memory session.
    pub session_file: Option<String>,
    pub environment: String,
}

impl PortalConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let config = PortalConfig {
            portal_api_url: env::var("MEDFIN_PORTAL_API_URL")
                .or_else(|_| env::var("PORTAL_API_URL"))
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
            extraction_api_url: env::var("MEDFIN_EXTRACTION_API_URL")
                .or_else(|_| env::var("EXTRACTION_API_URL"))
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| REQUEST_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(REQUEST_TIMEOUT_SECS),
            max_document_size_bytes: env::var("MAX_DOCUMENT_SIZE_MB")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .map(|mb| mb * 1024 * 1024)
                .unwrap_or(MAX_DOCUMENT_SIZE_BYTES),
            max_photo_size_bytes: env::var("MAX_PHOTO_SIZE_MB")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .map(|mb| mb * 1024 * 1024)
                .unwrap_or(MAX_PHOTO_SIZE_BYTES),
            max_tax_certificate_size_bytes: env::var("MAX_TAX_CERTIFICATE_SIZE_MB")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .map(|mb| mb * 1024 * 1024)
                .unwrap_or(MAX_TAX_CERTIFICATE_SIZE_BYTES),
            min_document_size_bytes: MIN_DOCUMENT_SIZE_BYTES,
            progress_tick_ms: env::var("PROGRESS_TICK_MS")
                .unwrap_or_else(|_| PROGRESS_TICK_MS.to_string())
                .parse()
                .unwrap_or(PROGRESS_TICK_MS),
            session_file: env::var("MEDFIN_SESSION_FILE").ok().filter(|s| !s.is_empty()),
            environment,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        for (name, url) in [
            ("MEDFIN_PORTAL_API_URL", &self.portal_api_url),
            ("MEDFIN_EXTRACTION_API_URL", &self.extraction_api_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(anyhow::anyhow!("{} must be an http(s) URL", name));
            }
        }

        if self.max_document_size_bytes <= self.min_document_size_bytes {
            return Err(anyhow::anyhow!(
                "MAX_DOCUMENT_SIZE_MB must be larger than the 1KB minimum"
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> PortalConfig {
        PortalConfig {
            portal_api_url: "http://localhost:5000".to_string(),
            extraction_api_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 60,
            max_document_size_bytes: MAX_DOCUMENT_SIZE_BYTES,
            max_photo_size_bytes: MAX_PHOTO_SIZE_BYTES,
            max_tax_certificate_size_bytes: MAX_TAX_CERTIFICATE_SIZE_BYTES,
            min_document_size_bytes: MIN_DOCUMENT_SIZE_BYTES,
            progress_tick_ms: 300,
            session_file: None,
            environment: "development".to_string(),
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let mut config = test_config();
        config.extraction_api_url = "localhost:8000".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_size_caps() {
        let mut config = test_config();
        config.max_document_size_bytes = 512;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_is_production() {
        let mut config = test_config();
        assert!(!config.is_production());
        config.environment = "Production".to_string();
        assert!(config.is_production());
        config.environment = "prod".to_string();
        assert!(config.is_production());
    }
}
