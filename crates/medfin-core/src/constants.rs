//! Portal-wide constants
//!
//! Size caps, placeholder sentinels, and the durable session key names the
//! portal stores between page loads. Key names are fixed by the deployed
//! services and must not be changed independently.

/// Default per-document upload ceiling.
pub const MAX_DOCUMENT_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// Tighter ceiling for passport-style photographs.
pub const MAX_PHOTO_SIZE_BYTES: usize = 2 * 1024 * 1024;

/// Tighter ceiling for tax certificates.
pub const MAX_TAX_CERTIFICATE_SIZE_BYTES: usize = 5 * 1024 * 1024;

/// Anything below this is treated as a truncated or empty upload.
pub const MIN_DOCUMENT_SIZE_BYTES: usize = 1024;

/// Placeholder for a form field the extraction service could not fill.
pub const NOT_EXTRACTED: &str = "Not extracted";

/// Placeholder for a form field the applicant has not selected yet.
pub const NOT_SELECTED: &str = "Not selected";

/// Draft field carrying the applicant's employment status.
pub const NATURE_OF_EMPLOYMENT_FIELD: &str = "natureOfEmployment";

/// Employment value that blocks submission outright (scheme policy).
pub const GOVERNMENT_EMPLOYED: &str = "Government Employed";

/// Bearer token session keys, newest first. Older portal builds wrote the
/// token under different names; all are checked on read.
pub const TOKEN_KEYS: [&str; 3] = ["authToken", "token", "accessToken"];

/// Session key holding the JSON-encoded user profile.
pub const USER_KEY: &str = "user";

/// Session key holding the requested loan amount.
pub const LOAN_AMOUNT_KEY: &str = "loanAmount";

/// Session key holding the JSON-encoded purpose selection.
pub const SELECTED_PURPOSE_KEY: &str = "selectedPurpose";
