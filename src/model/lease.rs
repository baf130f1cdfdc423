//! Lease records
//!
//! The dataset carries two lease shapes: the legacy flat record and the
//! structured record identified by its `leaseId` key. Both are folded into
//! the [`Lease`] enum so every consumer matches on them exhaustively.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Key whose presence marks a structured lease object
const STRUCTURED_DISCRIMINANT: &str = "leaseId";

/// An occupancy agreement on a property
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Lease {
    Legacy(LegacyLease),
    Structured(StructuredLease),
}

impl<'de> Deserialize<'de> for Lease {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.get(STRUCTURED_DISCRIMINANT).is_some() {
            serde_json::from_value(value)
                .map(Lease::Structured)
                .map_err(D::Error::custom)
        } else {
            serde_json::from_value(value)
                .map(Lease::Legacy)
                .map_err(D::Error::custom)
        }
    }
}

impl Lease {
    /// Whether the lease currently occupies or assigns the property
    pub fn is_active(&self) -> bool {
        self.status().is_active()
    }

    /// Status of the lease, with legacy leases mapped from their active flag
    pub fn status(&self) -> LeaseStatus {
        match self {
            Lease::Legacy(lease) if lease.active => LeaseStatus::Active,
            Lease::Legacy(_) => LeaseStatus::Inactive,
            Lease::Structured(lease) => lease.status.clone(),
        }
    }

    /// Display title
    pub fn title(&self) -> String {
        match self {
            Lease::Legacy(lease) => format!("Bail {}", lease.reference),
            Lease::Structured(lease) if lease.title.is_empty() => {
                format!("Bail {}", lease.lease_id)
            }
            Lease::Structured(lease) => lease.title.clone(),
        }
    }

    /// Tenant name, preferring the organization over the legal name
    pub fn tenant(&self) -> Option<&str> {
        let tenant = match self {
            Lease::Legacy(lease) => lease.tenant.as_str(),
            Lease::Structured(lease) => {
                let party = &lease.parties.tenant;
                if party.organization.is_empty() {
                    party.legal_name.as_str()
                } else {
                    party.organization.as_str()
                }
            }
        };
        (!tenant.is_empty()).then_some(tenant)
    }

    /// Sub-leases nested under this lease (legacy leases carry none)
    pub fn sub_leases(&self) -> &[SubLease] {
        match self {
            Lease::Legacy(_) => &[],
            Lease::Structured(lease) => &lease.sub_leases,
        }
    }
}

/// Legacy lease record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyLease {
    pub reference: String,
    #[serde(rename = "locataire")]
    pub tenant: String,
    #[serde(rename = "surface")]
    pub area: f64,
    #[serde(rename = "loyer")]
    pub rent: f64,
    #[serde(rename = "dateDebut")]
    pub start_date: String,
    #[serde(rename = "dateFin")]
    pub end_date: String,
    #[serde(rename = "actif")]
    pub active: bool,
}

/// Structured lease record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StructuredLease {
    pub lease_id: String,
    pub title: String,
    pub status: LeaseStatus,
    pub general: LeaseGeneral,
    pub dates: LeaseDates,
    pub parties: LeaseParties,
    pub terms: LeaseTerms,
    pub metadata: LeaseMetadata,
    #[serde(rename = "sous_bails", skip_serializing_if = "Vec::is_empty")]
    pub sub_leases: Vec<SubLease>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeaseGeneral {
    pub lease_details: LeaseDetails,
    pub financial_details: FinancialDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeaseDetails {
    #[serde(rename = "type")]
    pub kind: String,
    pub primary_use: String,
    pub base_year: String,
}

/// Financial terms, kept as the preformatted strings of the dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FinancialDetails {
    pub rent: String,
    pub accounting_type: String,
    pub payment_terms: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaseDates {
    pub start: String,
    pub duration: String,
    pub end: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaseParties {
    pub tenant: TenantParty,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TenantParty {
    pub organization: String,
    pub legal_name: String,
    pub id: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeaseTerms {
    pub security_requirements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeaseMetadata {
    pub last_updated: String,
}

/// Sub-tenancy nested under a structured lease
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubLease {
    pub reference: String,
    #[serde(rename = "locataire")]
    pub tenant: String,
    #[serde(rename = "surface")]
    pub area: f64,
    #[serde(rename = "loyer")]
    pub rent: f64,
    #[serde(rename = "dateDebut")]
    pub start_date: String,
    #[serde(rename = "dateFin")]
    pub end_date: String,
    #[serde(rename = "actif")]
    pub active: bool,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "tauxOccupation")]
    pub occupancy_rate: Option<f64>,
    pub description: String,
}

/// Status of a structured lease
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LeaseStatus {
    Active,
    #[default]
    Inactive,
    GovernmentOwned,
    Other(String),
}

impl LeaseStatus {
    /// Active leases and government-owned assignments both occupy the property
    pub fn is_active(&self) -> bool {
        matches!(self, LeaseStatus::Active | LeaseStatus::GovernmentOwned)
    }

    /// Badge text
    pub fn label(&self) -> &str {
        match self {
            LeaseStatus::Active => "Actif",
            LeaseStatus::Inactive => "Inactif",
            LeaseStatus::GovernmentOwned => "Propriété Gouvernementale",
            LeaseStatus::Other(raw) if raw.is_empty() => "Inconnu",
            LeaseStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for LeaseStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "actif" => LeaseStatus::Active,
            "inactif" => LeaseStatus::Inactive,
            "Propriété Gouvernementale" => LeaseStatus::GovernmentOwned,
            _ => LeaseStatus::Other(raw),
        }
    }
}

impl From<LeaseStatus> for String {
    fn from(status: LeaseStatus) -> Self {
        match status {
            LeaseStatus::Active => "actif".to_string(),
            LeaseStatus::Inactive => "inactif".to_string(),
            LeaseStatus::GovernmentOwned => "Propriété Gouvernementale".to_string(),
            LeaseStatus::Other(raw) => raw,
        }
    }
}
