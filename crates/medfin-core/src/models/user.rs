use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Applicant profile as returned by the auth service and persisted in the
/// session under the `user` key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub full_name: String,
    pub cnic: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub father_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl UserProfile {
    /// Lowercase tokens of the full name, used by identity-sensitive
    /// filename checks.
    pub fn name_tokens(&self) -> Vec<String> {
        self.full_name
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// Signup payload for `POST /api/auth/signup`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 3, message = "Full name must be at least 3 characters"))]
    pub full_name: String,
    #[validate(length(equal = 13, message = "CNIC must be 13 digits without dashes"))]
    pub cnic: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 10, max = 15, message = "Invalid phone number"))]
    pub phone: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login payload for `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "CNIC or email is required"))]
    pub identifier: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Successful auth response: bearer token plus the profile to persist.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Payload for `POST /api/auth/check-unique`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckUniqueRequest {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckUniqueResponse {
    pub unique: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn profile(name: &str) -> UserProfile {
        UserProfile {
            id: None,
            full_name: name.to_string(),
            cnic: "3520212345671".to_string(),
            email: "anwar@example.com".to_string(),
            phone: None,
            father_name: None,
            city: None,
            address: None,
        }
    }

    #[test]
    fn test_name_tokens_lowercase_split() {
        assert_eq!(profile("Anwar Ali").name_tokens(), vec!["anwar", "ali"]);
        assert_eq!(
            profile("  Fatima   Noor ").name_tokens(),
            vec!["fatima", "noor"]
        );
    }

    #[test]
    fn test_signup_request_validation() {
        let ok = SignupRequest {
            full_name: "Anwar Ali".to_string(),
            cnic: "3520212345671".to_string(),
            email: "anwar@example.com".to_string(),
            phone: "03001234567".to_string(),
            password: "hunter2hunter2".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad_cnic = SignupRequest {
            cnic: "12345".to_string(),
            ..ok.clone()
        };
        assert!(bad_cnic.validate().is_err());

        let bad_email = SignupRequest {
            email: "not-an-email".to_string(),
            ..ok
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_profile_round_trips_camel_case() {
        let json = r#"{"fullName":"Anwar Ali","cnic":"3520212345671","email":"a@b.pk"}"#;
        let p: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(p.full_name, "Anwar Ali");
        let out = serde_json::to_value(&p).unwrap();
        assert_eq!(out["fullName"], "Anwar Ali");
    }
}
