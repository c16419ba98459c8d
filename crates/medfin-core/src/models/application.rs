use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use uuid::Uuid;

/// Server-side status of a submitted application, shown on the dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
    UnderReview,
    Approved,
    Rejected,
    Disbursed,
}

impl Display for ApplicationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ApplicationStatus::Submitted => write!(f, "submitted"),
            ApplicationStatus::UnderReview => write!(f, "under_review"),
            ApplicationStatus::Approved => write!(f, "approved"),
            ApplicationStatus::Rejected => write!(f, "rejected"),
            ApplicationStatus::Disbursed => write!(f, "disbursed"),
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(ApplicationStatus::Submitted),
            "under_review" => Ok(ApplicationStatus::UnderReview),
            "approved" => Ok(ApplicationStatus::Approved),
            "rejected" => Ok(ApplicationStatus::Rejected),
            "disbursed" => Ok(ApplicationStatus::Disbursed),
            _ => Err(anyhow::anyhow!("Invalid application status: {}", s)),
        }
    }
}

/// One row in `GET /api/applications?search=<cnic>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummary {
    pub id: Uuid,
    pub cnic: String,
    pub scheme: String,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub loan_amount: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Full record from `GET /api/applications/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDetail {
    pub id: Uuid,
    pub status: ApplicationStatus,
    /// Flat form fields as submitted.
    pub fields: serde_json::Value,
    /// Names of documents attached at submission time.
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Response to `POST /api/applications/submit`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub id: Uuid,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_status_round_trip() {
        for status in [
            ApplicationStatus::Submitted,
            ApplicationStatus::UnderReview,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
            ApplicationStatus::Disbursed,
        ] {
            assert_eq!(
                status.to_string().parse::<ApplicationStatus>().unwrap(),
                status
            );
        }
        assert!("pending".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_summary_deserializes_camel_case() {
        let json = r#"{
            "id": "7a0a8b9e-5c5f-4c1e-9d32-111122223333",
            "cnic": "3520212345671",
            "scheme": "doctors",
            "status": "under_review",
            "loanAmount": "1500000",
            "submittedAt": "2026-05-01T10:00:00Z"
        }"#;
        let summary: ApplicationSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.status, ApplicationStatus::UnderReview);
        assert_eq!(summary.loan_amount.as_deref(), Some("1500000"));
    }
}
