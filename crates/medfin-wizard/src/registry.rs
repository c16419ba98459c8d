//! Document checklist per scheme.
//!
//! A static, ordered collection of [`DocumentSlot`]s, one per required
//! document for the active scheme. Read-only at runtime; the shared slots
//! are defined once and composed per scheme.

use medfin_core::constants::{
    MAX_DOCUMENT_SIZE_BYTES, MAX_PHOTO_SIZE_BYTES, MAX_TAX_CERTIFICATE_SIZE_BYTES,
    MIN_DOCUMENT_SIZE_BYTES,
};
use medfin_core::models::{DocumentSlot, Scheme};
use medfin_core::PortalConfig;

/// Size caps applied when building a checklist. Defaults match the portal
/// constants; a config-derived value lets deployments tighten or relax them
/// without a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLimits {
    pub document_bytes: usize,
    pub photo_bytes: usize,
    pub tax_certificate_bytes: usize,
    pub min_bytes: usize,
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            document_bytes: MAX_DOCUMENT_SIZE_BYTES,
            photo_bytes: MAX_PHOTO_SIZE_BYTES,
            tax_certificate_bytes: MAX_TAX_CERTIFICATE_SIZE_BYTES,
            min_bytes: MIN_DOCUMENT_SIZE_BYTES,
        }
    }
}

impl From<&PortalConfig> for SizeLimits {
    fn from(config: &PortalConfig) -> Self {
        Self {
            document_bytes: config.max_document_size_bytes,
            photo_bytes: config.max_photo_size_bytes,
            tax_certificate_bytes: config.max_tax_certificate_size_bytes,
            min_bytes: config.min_document_size_bytes,
        }
    }
}

/// Which configured ceiling a slot uses.
#[derive(Debug, Clone, Copy)]
enum SizeCap {
    Document,
    Photo,
    TaxCertificate,
}

impl SizeCap {
    fn resolve(self, limits: &SizeLimits) -> usize {
        match self {
            SizeCap::Document => limits.document_bytes,
            SizeCap::Photo => limits.photo_bytes,
            SizeCap::TaxCertificate => limits.tax_certificate_bytes,
        }
    }
}

const IMAGE_AND_PDF_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "pdf"];
const IMAGE_AND_PDF_TYPES: [&str; 3] = ["image/jpeg", "image/png", "application/pdf"];
const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];
const IMAGE_TYPES: [&str; 2] = ["image/jpeg", "image/png"];
const PDF_EXTENSIONS: [&str; 1] = ["pdf"];
const PDF_TYPES: [&str; 1] = ["application/pdf"];

struct SlotSpec {
    id: &'static str,
    display_name: &'static str,
    description: &'static str,
    extensions: &'static [&'static str],
    content_types: &'static [&'static str],
    extraction_endpoint: Option<&'static str>,
    cap: SizeCap,
    keywords: &'static [&'static str],
    identity_sensitive: bool,
}

impl SlotSpec {
    fn build(&self, limits: &SizeLimits) -> DocumentSlot {
        DocumentSlot {
            id: self.id.to_string(),
            display_name: self.display_name.to_string(),
            description: self.description.to_string(),
            accepted_extensions: self.extensions.iter().map(|s| s.to_string()).collect(),
            accepted_content_types: self.content_types.iter().map(|s| s.to_string()).collect(),
            requires_extraction: self.extraction_endpoint.is_some(),
            extraction_endpoint: self.extraction_endpoint.map(|s| s.to_string()),
            max_size_bytes: self.cap.resolve(limits),
            min_size_bytes: limits.min_bytes,
            keywords: self.keywords.iter().map(|s| s.to_string()).collect(),
            identity_sensitive: self.identity_sensitive,
        }
    }
}

const CNIC: SlotSpec = SlotSpec {
    id: "cnic",
    display_name: "CNIC",
    description: "Both sides of your computerized national identity card",
    extensions: &IMAGE_AND_PDF_EXTENSIONS,
    content_types: &IMAGE_AND_PDF_TYPES,
    extraction_endpoint: Some("/extract"),
    cap: SizeCap::Document,
    keywords: &["cnic", "identity", "card", "national", "id"],
    identity_sensitive: true,
};

const PHOTO: SlotSpec = SlotSpec {
    id: "photo",
    display_name: "Photograph",
    description: "Recent passport-size photograph with a plain background",
    extensions: &IMAGE_EXTENSIONS,
    content_types: &IMAGE_TYPES,
    extraction_endpoint: None,
    cap: SizeCap::Photo,
    keywords: &["photo", "picture", "photograph", "pic"],
    identity_sensitive: false,
};

const DOMICILE: SlotSpec = SlotSpec {
    id: "domicile",
    display_name: "Domicile Certificate",
    description: "Domicile certificate issued by your district administration",
    extensions: &IMAGE_AND_PDF_EXTENSIONS,
    content_types: &IMAGE_AND_PDF_TYPES,
    extraction_endpoint: Some("/extract/domicile"),
    cap: SizeCap::Document,
    keywords: &["domicile", "residence"],
    identity_sensitive: true,
};

const DEGREE: SlotSpec = SlotSpec {
    id: "degree",
    display_name: "Medical Qualification",
    description: "Degree, diploma, or final transcript of your qualification",
    extensions: &IMAGE_AND_PDF_EXTENSIONS,
    content_types: &IMAGE_AND_PDF_TYPES,
    extraction_endpoint: Some("/extract/degree-or-diploma"),
    cap: SizeCap::Document,
    keywords: &["degree", "diploma", "transcript", "qualification", "mbbs", "bds"],
    identity_sensitive: true,
};

const COUNCIL_REGISTRATION: SlotSpec = SlotSpec {
    id: "council_registration",
    display_name: "Council Registration",
    description: "Valid registration certificate from your professional council",
    extensions: &IMAGE_AND_PDF_EXTENSIONS,
    content_types: &IMAGE_AND_PDF_TYPES,
    extraction_endpoint: Some("/extract/phc"),
    cap: SizeCap::Document,
    keywords: &["pmc", "phc", "registration", "council", "license", "licence"],
    identity_sensitive: false,
};

const NURSING_REGISTRATION: SlotSpec = SlotSpec {
    id: "nursing_registration",
    display_name: "Nursing Council Registration",
    description: "Valid registration certificate from the nursing council",
    extensions: &IMAGE_AND_PDF_EXTENSIONS,
    content_types: &IMAGE_AND_PDF_TYPES,
    extraction_endpoint: Some("/extract/phc"),
    cap: SizeCap::Document,
    keywords: &["pnc", "nursing", "registration", "council", "license", "licence"],
    identity_sensitive: false,
};

const EXPERIENCE_CERTIFICATE: SlotSpec = SlotSpec {
    id: "experience_certificate",
    display_name: "Experience Certificate",
    description: "Certificate of relevant professional experience",
    extensions: &IMAGE_AND_PDF_EXTENSIONS,
    content_types: &IMAGE_AND_PDF_TYPES,
    extraction_endpoint: None,
    cap: SizeCap::Document,
    keywords: &["experience", "certificate", "employment"],
    identity_sensitive: false,
};

const BANK_STATEMENT: SlotSpec = SlotSpec {
    id: "bank_statement",
    display_name: "Bank Statement",
    description: "Bank statement for the last six months",
    extensions: &PDF_EXTENSIONS,
    content_types: &PDF_TYPES,
    extraction_endpoint: None,
    cap: SizeCap::Document,
    keywords: &["bank", "statement", "account"],
    identity_sensitive: true,
};

const CA_STATEMENT: SlotSpec = SlotSpec {
    id: "ca_statement",
    display_name: "Chartered Accountant Statement",
    description: "Net-worth statement certified by a chartered accountant",
    extensions: &PDF_EXTENSIONS,
    content_types: &PDF_TYPES,
    extraction_endpoint: None,
    cap: SizeCap::Document,
    keywords: &["ca", "chartered", "accountant", "statement"],
    identity_sensitive: true,
};

const NTN: SlotSpec = SlotSpec {
    id: "ntn",
    display_name: "NTN Certificate",
    description: "National tax number registration certificate",
    extensions: &IMAGE_AND_PDF_EXTENSIONS,
    content_types: &IMAGE_AND_PDF_TYPES,
    extraction_endpoint: None,
    cap: SizeCap::Document,
    keywords: &["ntn", "tax", "national"],
    identity_sensitive: true,
};

const TAX_RETURNS: SlotSpec = SlotSpec {
    id: "tax_returns",
    display_name: "Tax Return Certificate",
    description: "Latest income tax return or filer certificate",
    extensions: &PDF_EXTENSIONS,
    content_types: &PDF_TYPES,
    extraction_endpoint: None,
    cap: SizeCap::TaxCertificate,
    keywords: &["tax", "return", "certificate", "fbr"],
    identity_sensitive: false,
};

const BUSINESS_PLAN: SlotSpec = SlotSpec {
    id: "business_plan",
    display_name: "Business Plan",
    description: "Business plan or feasibility study for the loan purpose",
    extensions: &PDF_EXTENSIONS,
    content_types: &PDF_TYPES,
    extraction_endpoint: None,
    cap: SizeCap::Document,
    keywords: &["business", "plan", "proposal", "feasibility"],
    identity_sensitive: false,
};

const QUOTATION: SlotSpec = SlotSpec {
    id: "quotation",
    display_name: "Equipment Quotation",
    description: "Supplier quotation or proforma invoice for planned purchases",
    extensions: &IMAGE_AND_PDF_EXTENSIONS,
    content_types: &IMAGE_AND_PDF_TYPES,
    extraction_endpoint: None,
    cap: SizeCap::Document,
    keywords: &["quotation", "quote", "invoice", "proforma"],
    identity_sensitive: false,
};

const RENT_AGREEMENT: SlotSpec = SlotSpec {
    id: "rent_agreement",
    display_name: "Premises Document",
    description: "Rent agreement or ownership document of the premises",
    extensions: &IMAGE_AND_PDF_EXTENSIONS,
    content_types: &IMAGE_AND_PDF_TYPES,
    extraction_endpoint: None,
    cap: SizeCap::Document,
    keywords: &["rent", "lease", "agreement", "ownership"],
    identity_sensitive: false,
};

const UTILITY_BILL: SlotSpec = SlotSpec {
    id: "utility_bill",
    display_name: "Utility Bill",
    description: "Recent utility bill of the premises",
    extensions: &IMAGE_AND_PDF_EXTENSIONS,
    content_types: &IMAGE_AND_PDF_TYPES,
    extraction_endpoint: None,
    cap: SizeCap::Document,
    keywords: &["utility", "bill", "electricity", "gas"],
    identity_sensitive: false,
};

fn checklist(scheme: Scheme) -> &'static [SlotSpec] {
    match scheme {
        Scheme::Doctors => &[
            CNIC,
            PHOTO,
            DOMICILE,
            DEGREE,
            COUNCIL_REGISTRATION,
            EXPERIENCE_CERTIFICATE,
            BANK_STATEMENT,
            CA_STATEMENT,
            NTN,
            TAX_RETURNS,
            BUSINESS_PLAN,
            QUOTATION,
            RENT_AGREEMENT,
            UTILITY_BILL,
        ],
        Scheme::Nurses => &[
            CNIC,
            PHOTO,
            DOMICILE,
            DEGREE,
            NURSING_REGISTRATION,
            EXPERIENCE_CERTIFICATE,
            BANK_STATEMENT,
            NTN,
            TAX_RETURNS,
            BUSINESS_PLAN,
            QUOTATION,
        ],
        Scheme::AlliedHealth => &[
            CNIC,
            PHOTO,
            DOMICILE,
            DEGREE,
            COUNCIL_REGISTRATION,
            BANK_STATEMENT,
            NTN,
            BUSINESS_PLAN,
            QUOTATION,
        ],
    }
}

/// Ordered, immutable document checklist for one scheme.
#[derive(Debug, Clone)]
pub struct DocumentRegistry {
    scheme: Scheme,
    slots: Vec<DocumentSlot>,
}

impl DocumentRegistry {
    pub fn for_scheme(scheme: Scheme) -> Self {
        Self::with_limits(scheme, &SizeLimits::default())
    }

    pub fn with_limits(scheme: Scheme, limits: &SizeLimits) -> Self {
        Self {
            scheme,
            slots: checklist(scheme)
                .iter()
                .map(|spec| spec.build(limits))
                .collect(),
        }
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn get(&self, slot_id: &str) -> Option<&DocumentSlot> {
        self.slots.iter().find(|s| s.id == slot_id)
    }

    pub fn slots(&self) -> &[DocumentSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checklist_sizes() {
        assert_eq!(DocumentRegistry::for_scheme(Scheme::Doctors).len(), 14);
        assert_eq!(DocumentRegistry::for_scheme(Scheme::Nurses).len(), 11);
        assert_eq!(DocumentRegistry::for_scheme(Scheme::AlliedHealth).len(), 9);
    }

    #[test]
    fn test_slot_ids_are_unique() {
        for scheme in Scheme::ALL {
            let registry = DocumentRegistry::for_scheme(scheme);
            let mut ids: Vec<_> = registry.slots().iter().map(|s| s.id.clone()).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), registry.len(), "duplicate slot in {}", scheme);
        }
    }

    #[test]
    fn test_extraction_slots_carry_endpoints() {
        for scheme in Scheme::ALL {
            for slot in DocumentRegistry::for_scheme(scheme).slots() {
                assert_eq!(
                    slot.requires_extraction,
                    slot.extraction_endpoint.is_some(),
                    "slot {}",
                    slot.id
                );
            }
        }
    }

    #[test]
    fn test_cnic_slot_shape() {
        let registry = DocumentRegistry::for_scheme(Scheme::Doctors);
        let cnic = registry.get("cnic").unwrap();
        assert!(cnic.requires_extraction);
        assert_eq!(cnic.extraction_endpoint.as_deref(), Some("/extract"));
        assert!(cnic.identity_sensitive);
        assert!(cnic.keywords.contains(&"cnic".to_string()));
    }

    #[test]
    fn test_photo_slot_has_tight_cap_and_no_extraction() {
        let registry = DocumentRegistry::for_scheme(Scheme::Nurses);
        let photo = registry.get("photo").unwrap();
        assert!(!photo.requires_extraction);
        assert_eq!(photo.max_size_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn test_with_limits_threads_configured_caps() {
        let limits = SizeLimits {
            document_bytes: 4 * 1024 * 1024,
            photo_bytes: 1024 * 1024,
            tax_certificate_bytes: 3 * 1024 * 1024,
            min_bytes: 2048,
        };
        let registry = DocumentRegistry::with_limits(Scheme::Doctors, &limits);
        let cnic = registry.get("cnic").unwrap();
        assert_eq!(cnic.max_size_bytes, 4 * 1024 * 1024);
        assert_eq!(cnic.min_size_bytes, 2048);
        let photo = registry.get("photo").unwrap();
        assert_eq!(photo.max_size_bytes, 1024 * 1024);
        let tax = registry.get("tax_returns").unwrap();
        assert_eq!(tax.max_size_bytes, 3 * 1024 * 1024);
    }

    #[test]
    fn test_limits_from_config() {
        let config = PortalConfig {
            portal_api_url: "http://localhost:5000".to_string(),
            extraction_api_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 60,
            max_document_size_bytes: 8 * 1024 * 1024,
            max_photo_size_bytes: 512 * 1024,
            max_tax_certificate_size_bytes: 3 * 1024 * 1024,
            min_document_size_bytes: 4096,
            progress_tick_ms: 300,
            session_file: None,
            environment: "development".to_string(),
        };
        let limits = SizeLimits::from(&config);
        assert_eq!(limits.document_bytes, 8 * 1024 * 1024);
        assert_eq!(limits.photo_bytes, 512 * 1024);
        assert_eq!(limits.tax_certificate_bytes, 3 * 1024 * 1024);
        assert_eq!(limits.min_bytes, 4096);
    }

    #[test]
    fn test_unknown_slot_is_none() {
        let registry = DocumentRegistry::for_scheme(Scheme::AlliedHealth);
        assert!(registry.get("passport").is_none());
        // ca_statement only exists on the doctors checklist
        assert!(registry.get("ca_statement").is_none());
    }
}
