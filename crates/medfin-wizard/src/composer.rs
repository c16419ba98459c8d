//! Preview form seeding and submission assembly.
//!
//! Seeds the draft per field from the first non-empty source in priority
//! order: stored user profile, stored scheme/purpose selection, extraction
//! record lookups, then a static sentinel. User edits are plain single-key
//! replaces on the draft.

use std::collections::BTreeMap;

use medfin_core::constants::{NOT_EXTRACTED, NOT_SELECTED};
use medfin_core::models::{
    ApplicationFormDraft, DraftError, PurposeSelection, Scheme, SelectedFile, UserProfile,
};
use medfin_core::AppError;
use serde_json::Value;

use crate::extraction::ExtractionStore;
use crate::orchestrator::UploadOrchestrator;

/// Extraction fallback for one logical field: which document's record to
/// read and the candidate key paths to try, in order.
struct ExtractionSource {
    document_id: &'static str,
    paths: &'static [&'static str],
}

struct FieldSeed {
    field: &'static str,
    profile: Option<fn(&UserProfile) -> Option<String>>,
    extraction: &'static [ExtractionSource],
    default: &'static str,
}

const FIELD_SEEDS: &[FieldSeed] = &[
    FieldSeed {
        field: "fullName",
        profile: Some(|p| Some(p.full_name.clone())),
        extraction: &[ExtractionSource {
            document_id: "cnic",
            paths: &["name", "fullName", "Name", "personal.name"],
        }],
        default: NOT_EXTRACTED,
    },
    FieldSeed {
        field: "fatherName",
        profile: Some(|p| p.father_name.clone()),
        extraction: &[ExtractionSource {
            document_id: "cnic",
            paths: &["fatherName", "father_name", "FatherName", "personal.father_name"],
        }],
        default: NOT_EXTRACTED,
    },
    FieldSeed {
        field: "cnic",
        profile: Some(|p| Some(p.cnic.clone())),
        extraction: &[ExtractionSource {
            document_id: "cnic",
            paths: &["cnicNumber", "cnic", "identityNumber", "personal.cnic"],
        }],
        default: NOT_EXTRACTED,
    },
    FieldSeed {
        field: "dateOfBirth",
        profile: None,
        extraction: &[ExtractionSource {
            document_id: "cnic",
            paths: &["dateOfBirth", "dob", "date_of_birth", "personal.dob"],
        }],
        default: NOT_EXTRACTED,
    },
    FieldSeed {
        field: "phone",
        profile: Some(|p| p.phone.clone()),
        extraction: &[],
        default: NOT_EXTRACTED,
    },
    FieldSeed {
        field: "email",
        profile: Some(|p| Some(p.email.clone())),
        extraction: &[],
        default: NOT_EXTRACTED,
    },
    FieldSeed {
        field: "address",
        profile: Some(|p| p.address.clone()),
        extraction: &[
            ExtractionSource {
                document_id: "domicile",
                paths: &["address", "permanentAddress", "personal.address"],
            },
            ExtractionSource {
                document_id: "cnic",
                paths: &["address", "personal.address"],
            },
        ],
        default: NOT_EXTRACTED,
    },
    FieldSeed {
        field: "city",
        profile: Some(|p| p.city.clone()),
        extraction: &[ExtractionSource {
            document_id: "domicile",
            paths: &["city", "district", "personal.city"],
        }],
        default: NOT_EXTRACTED,
    },
    FieldSeed {
        field: "qualification",
        profile: None,
        extraction: &[ExtractionSource {
            document_id: "degree",
            paths: &["degree", "qualification", "degreeTitle", "degree_title"],
        }],
        default: NOT_EXTRACTED,
    },
    FieldSeed {
        field: "registrationNumber",
        profile: None,
        extraction: &[
            ExtractionSource {
                document_id: "council_registration",
                paths: &["registrationNumber", "regNo", "registration_number"],
            },
            ExtractionSource {
                document_id: "nursing_registration",
                paths: &["registrationNumber", "regNo", "registration_number"],
            },
        ],
        default: NOT_EXTRACTED,
    },
    FieldSeed {
        field: "natureOfEmployment",
        profile: None,
        extraction: &[],
        default: NOT_SELECTED,
    },
    FieldSeed {
        field: "loanAmount",
        profile: None,
        extraction: &[],
        default: NOT_SELECTED,
    },
    FieldSeed {
        field: "purpose",
        profile: None,
        extraction: &[],
        default: NOT_SELECTED,
    },
    FieldSeed {
        field: "scheme",
        profile: None,
        extraction: &[],
        default: NOT_SELECTED,
    },
];

/// Everything the application service needs for one multipart submission.
#[derive(Debug)]
pub struct SubmissionRequest {
    pub fields: BTreeMap<String, String>,
    /// Extraction records keyed by document id, sent as one JSON text part.
    pub extracted_data: Value,
    pub files: Vec<(String, SelectedFile)>,
}

pub struct PreviewComposer {
    draft: ApplicationFormDraft,
}

impl PreviewComposer {
    /// Builds the draft from the stored profile, the stored scheme and
    /// purpose selections, and whatever the extraction service produced.
    pub fn seed(
        profile: Option<&UserProfile>,
        scheme: Scheme,
        loan_amount: Option<&str>,
        purpose: Option<&PurposeSelection>,
        extractions: &ExtractionStore,
    ) -> Self {
        let mut draft = ApplicationFormDraft::new();

        for seed in FIELD_SEEDS {
            if let (Some(read), Some(profile)) = (seed.profile, profile) {
                if let Some(value) = read(profile).filter(|v| !v.trim().is_empty()) {
                    draft.set_if_empty(seed.field, value.trim());
                }
            }
            for source in seed.extraction {
                if let Some(value) = extractions.lookup(source.document_id, source.paths) {
                    draft.set_if_empty(seed.field, value);
                }
            }
            draft.set_if_empty(seed.field, seed.default);
        }

        draft.set("scheme", scheme.display_name());
        if let Some(amount) = loan_amount.filter(|a| !a.trim().is_empty()) {
            draft.set("loanAmount", amount.trim());
        }
        if let Some(selection) = purpose {
            draft.set("purpose", selection.purpose_id.clone());
        }

        Self { draft }
    }

    pub fn draft(&self) -> &ApplicationFormDraft {
        &self.draft
    }

    /// Field-level edit from the preview step.
    pub fn edit(&mut self, field: &str, value: &str) {
        self.draft.set(field, value);
    }

    /// Validates the draft and assembles the multipart submission payload.
    /// Files are pulled back out of the orchestrator's document states.
    pub fn prepare_submission(
        &self,
        orchestrator: &UploadOrchestrator,
    ) -> Result<SubmissionRequest, AppError> {
        if !orchestrator.all_uploaded() {
            return Err(AppError::Validation(
                "All required documents must be uploaded before submitting".to_string(),
            ));
        }

        self.draft.validate_for_submit().map_err(|err| match err {
            DraftError::GovernmentEmployed => AppError::PolicyRejected(err.to_string()),
            other => AppError::Validation(other.to_string()),
        })?;

        Ok(SubmissionRequest {
            fields: self.draft.fields().clone(),
            extracted_data: orchestrator.extractions().to_json(),
            files: orchestrator.uploaded_files(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medfin_core::models::ExtractionResponse;
    use serde_json::json;

    fn profile() -> UserProfile {
        UserProfile {
            id: None,
            full_name: "Anwar Ali".to_string(),
            cnic: "3520212345671".to_string(),
            email: "anwar@example.com".to_string(),
            phone: Some("03001234567".to_string()),
            father_name: None,
            city: Some("Lahore".to_string()),
            address: None,
        }
    }

    fn extractions() -> ExtractionStore {
        let mut store = ExtractionStore::new();
        store.save(
            "cnic",
            "cnic",
            &ExtractionResponse {
                status: Some(200),
                message: None,
                data: json!({
                    "name": "Anwar A.",
                    "fatherName": "Akbar Ali",
                    "dateOfBirth": "1988-03-14",
                    "address": "House 12, Model Town"
                }),
            },
        );
        store
    }

    #[test]
    fn test_profile_wins_over_extraction() {
        let composer = PreviewComposer::seed(
            Some(&profile()),
            Scheme::Doctors,
            None,
            None,
            &extractions(),
        );
        // profile says "Anwar Ali", extraction says "Anwar A."
        assert_eq!(composer.draft().get("fullName"), Some("Anwar Ali"));
    }

    #[test]
    fn test_extraction_fills_profile_gaps() {
        let composer = PreviewComposer::seed(
            Some(&profile()),
            Scheme::Doctors,
            None,
            None,
            &extractions(),
        );
        assert_eq!(composer.draft().get("fatherName"), Some("Akbar Ali"));
        assert_eq!(composer.draft().get("dateOfBirth"), Some("1988-03-14"));
        assert_eq!(composer.draft().get("address"), Some("House 12, Model Town"));
    }

    #[test]
    fn test_sentinels_for_missing_sources() {
        let composer =
            PreviewComposer::seed(None, Scheme::Nurses, None, None, &ExtractionStore::new());
        assert_eq!(composer.draft().get("qualification"), Some(NOT_EXTRACTED));
        assert_eq!(composer.draft().get("purpose"), Some(NOT_SELECTED));
        assert_eq!(composer.draft().get("loanAmount"), Some(NOT_SELECTED));
    }

    #[test]
    fn test_selection_storage_seeds_amount_and_purpose() {
        let purpose = PurposeSelection::new(&Scheme::Doctors.purposes()[0]);
        let composer = PreviewComposer::seed(
            Some(&profile()),
            Scheme::Doctors,
            Some("2500000"),
            Some(&purpose),
            &ExtractionStore::new(),
        );
        assert_eq!(composer.draft().get("loanAmount"), Some("2500000"));
        assert_eq!(
            composer.draft().get("purpose").map(str::to_string),
            Some(purpose.purpose_id)
        );
        assert_eq!(composer.draft().get("scheme"), Some("Doctors Scheme"));
    }

    #[test]
    fn test_edit_replaces_single_field() {
        let mut composer =
            PreviewComposer::seed(Some(&profile()), Scheme::Doctors, None, None, &extractions());
        composer.edit("city", "Karachi");
        assert_eq!(composer.draft().get("city"), Some("Karachi"));
        assert_eq!(composer.draft().get("fullName"), Some("Anwar Ali"));
    }
}
