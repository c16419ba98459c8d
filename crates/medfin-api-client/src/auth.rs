//! Auth/profile service endpoints.

use medfin_core::models::{
    AuthResponse, CheckUniqueRequest, CheckUniqueResponse, LoginRequest, SignupRequest,
};
use medfin_core::AppError;

use crate::ApiClient;

impl ApiClient {
    /// Register a new applicant. On success the caller persists the token
    /// and profile to the session store.
    pub async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, AppError> {
        self.post_json_public(&self.portal_url("/api/auth/signup"), request)
            .await
    }

    /// Log in with CNIC or email.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, AppError> {
        self.post_json_public(&self.portal_url("/api/auth/login"), request)
            .await
    }

    /// Check whether a signup field value (cnic, email, phone) is unused.
    pub async fn check_unique(
        &self,
        field: &str,
        value: &str,
    ) -> Result<CheckUniqueResponse, AppError> {
        let request = CheckUniqueRequest {
            field: field.to_string(),
            value: value.to_string(),
        };
        self.post_json_public(&self.portal_url("/api/auth/check-unique"), &request)
            .await
    }
}
