use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Loan product variant. Each scheme carries its own document checklist and
/// purpose/amount rules.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    /// Registered medical practitioners setting up or expanding a practice.
    Doctors,
    /// Registered nurses and midwives.
    Nurses,
    /// Pharmacists, lab technologists, and other allied health workers.
    AlliedHealth,
}

impl Scheme {
    pub const ALL: [Scheme; 3] = [Scheme::Doctors, Scheme::Nurses, Scheme::AlliedHealth];

    pub fn display_name(&self) -> &'static str {
        match self {
            Scheme::Doctors => "Doctors Scheme",
            Scheme::Nurses => "Nurses & Midwives Scheme",
            Scheme::AlliedHealth => "Allied Health Scheme",
        }
    }

    /// Inclusive loan amount range for the scheme, in rupees.
    pub fn amount_range(&self) -> (u64, u64) {
        match self {
            Scheme::Doctors => (500_000, 5_000_000),
            Scheme::Nurses => (200_000, 2_000_000),
            Scheme::AlliedHealth => (100_000, 1_000_000),
        }
    }

    /// Loan purposes offered under this scheme.
    pub fn purposes(&self) -> &'static [Purpose] {
        match self {
            Scheme::Doctors => &[
                Purpose {
                    id: "clinic_setup",
                    label: "Clinic or hospital setup",
                    category: "infrastructure",
                },
                Purpose {
                    id: "medical_equipment",
                    label: "Medical equipment purchase",
                    category: "equipment",
                },
                Purpose {
                    id: "working_capital",
                    label: "Working capital",
                    category: "operations",
                },
                Purpose {
                    id: "practice_expansion",
                    label: "Expansion of existing practice",
                    category: "infrastructure",
                },
            ],
            Scheme::Nurses => &[
                Purpose {
                    id: "maternity_home",
                    label: "Maternity home setup",
                    category: "infrastructure",
                },
                Purpose {
                    id: "medical_equipment",
                    label: "Medical equipment purchase",
                    category: "equipment",
                },
                Purpose {
                    id: "working_capital",
                    label: "Working capital",
                    category: "operations",
                },
            ],
            Scheme::AlliedHealth => &[
                Purpose {
                    id: "lab_setup",
                    label: "Laboratory or pharmacy setup",
                    category: "infrastructure",
                },
                Purpose {
                    id: "equipment",
                    label: "Equipment purchase",
                    category: "equipment",
                },
                Purpose {
                    id: "working_capital",
                    label: "Working capital",
                    category: "operations",
                },
            ],
        }
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Scheme::Doctors => write!(f, "doctors"),
            Scheme::Nurses => write!(f, "nurses"),
            Scheme::AlliedHealth => write!(f, "allied_health"),
        }
    }
}

impl FromStr for Scheme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "doctors" => Ok(Scheme::Doctors),
            "nurses" => Ok(Scheme::Nurses),
            "allied_health" | "allied-health" => Ok(Scheme::AlliedHealth),
            _ => Err(anyhow::anyhow!("Invalid scheme: {}", s)),
        }
    }
}

/// One loan purpose offered under a scheme.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Purpose {
    pub id: &'static str,
    pub label: &'static str,
    pub category: &'static str,
}

/// The applicant's persisted purpose selection. Stored under the
/// `selectedPurpose` session key and reloaded on remount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PurposeSelection {
    pub purpose_id: String,
    pub category: String,
    pub timestamp: DateTime<Utc>,
}

impl PurposeSelection {
    pub fn new(purpose: &Purpose) -> Self {
        Self {
            purpose_id: purpose.id.to_string(),
            category: purpose.category.to_string(),
            timestamp: Utc::now(),
        }
    }
}
