//! Property record

use super::activity::{clamp_percent, Project, Task};
use super::lease::Lease;
use crate::search::normalize;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A government real-estate asset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Property {
    pub id: u32,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "adresse")]
    pub address: String,
    #[serde(rename = "ville")]
    pub city: String,
    #[serde(rename = "departement")]
    pub department: String,
    pub region: String,
    /// Assessed value in euros
    #[serde(rename = "valeur")]
    pub value: f64,
    /// Floor area in square metres
    #[serde(rename = "superficie")]
    pub floor_area: f64,
    /// Free-text category as written in the dataset ("Administratif", "Éducation", ...)
    #[serde(rename = "type")]
    pub category_label: String,
    pub status: PropertyStatus,
    #[serde(rename = "ministere")]
    pub ministry: String,
    #[serde(rename = "niveauSecurite")]
    pub security_level: SecurityLevel,
    #[serde(rename = "telephone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "tauxOccupation")]
    pub occupancy_rate: f64,
    #[serde(rename = "occupationActuelle")]
    pub current_occupancy: f64,
    #[serde(rename = "capaciteMax")]
    pub max_capacity: f64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub description: String,
    #[serde(rename = "installations")]
    pub facilities: Vec<String>,
    #[serde(rename = "bails")]
    pub leases: Vec<Lease>,
    #[serde(rename = "projets")]
    pub projects: Vec<Project>,
    #[serde(rename = "taches")]
    pub tasks: Vec<Task>,
}

impl Property {
    /// Category facet this property belongs to, if its label is known
    pub fn category(&self) -> Option<CategoryFacet> {
        CategoryFacet::from_label(&self.category_label)
    }

    /// Occupancy rate clamped to 0..=100
    pub fn occupancy_percent(&self) -> f64 {
        clamp_percent(self.occupancy_rate)
    }

    pub fn has_active_lease(&self) -> bool {
        self.leases.iter().any(Lease::is_active)
    }

    pub fn has_active_project(&self) -> bool {
        self.projects.iter().any(|project| project.active)
    }

    pub fn has_open_tasks(&self) -> bool {
        !self.tasks.is_empty()
    }
}

/// Lifecycle status of a property
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, ValueEnum)]
pub enum PropertyStatus {
    #[serde(rename = "actif")]
    #[value(name = "actif")]
    Active,
    #[serde(rename = "renovation")]
    #[value(name = "renovation")]
    UnderRenovation,
    #[serde(rename = "historique")]
    #[value(name = "historique")]
    Historic,
    #[default]
    #[serde(other)]
    #[value(skip)]
    #[schemars(skip)]
    Unknown,
}

impl PropertyStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PropertyStatus::Active => "Actif",
            PropertyStatus::UnderRenovation => "En Rénovation",
            PropertyStatus::Historic => "Monument Historique",
            PropertyStatus::Unknown => "Inconnu",
        }
    }
}

/// Security classification of a property
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecurityLevel {
    #[serde(rename = "faible")]
    Low,
    #[serde(rename = "moyen")]
    Medium,
    #[serde(rename = "élevé")]
    High,
    #[default]
    #[serde(other)]
    Unknown,
}

impl SecurityLevel {
    pub fn label(&self) -> Option<&'static str> {
        match self {
            SecurityLevel::Low => Some("Sécurité Faible"),
            SecurityLevel::Medium => Some("Sécurité Moyenne"),
            SecurityLevel::High => Some("Sécurité Élevée"),
            SecurityLevel::Unknown => None,
        }
    }
}

/// Category toggles offered by the search panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFacet {
    #[serde(rename = "administratif")]
    #[value(name = "administratif")]
    Administrative,
    #[value(name = "education")]
    Education,
    #[serde(rename = "sante")]
    #[value(name = "sante")]
    Health,
    #[serde(rename = "culturel")]
    #[value(name = "culturel")]
    Cultural,
    #[serde(rename = "securite")]
    #[value(name = "securite")]
    Security,
}

/// Normalized dataset category label to facet
const CATEGORY_TABLE: &[(&str, CategoryFacet)] = &[
    ("administratif", CategoryFacet::Administrative),
    ("education", CategoryFacet::Education),
    ("sante", CategoryFacet::Health),
    ("culturel", CategoryFacet::Cultural),
    ("historique", CategoryFacet::Cultural),
    ("securite", CategoryFacet::Security),
];

impl CategoryFacet {
    pub const ALL: [CategoryFacet; 5] = [
        CategoryFacet::Administrative,
        CategoryFacet::Education,
        CategoryFacet::Health,
        CategoryFacet::Cultural,
        CategoryFacet::Security,
    ];

    /// Look up the facet for a free-text category label, ignoring case and accents
    pub fn from_label(label: &str) -> Option<Self> {
        let key = normalize(label.trim());
        CATEGORY_TABLE
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, facet)| *facet)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFacet::Administrative => "Administratif",
            CategoryFacet::Education => "Éducation",
            CategoryFacet::Health => "Santé",
            CategoryFacet::Cultural => "Culturel",
            CategoryFacet::Security => "Sécurité",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_lookup_ignores_case_and_accents() {
        assert_eq!(CategoryFacet::from_label("Administratif"), Some(CategoryFacet::Administrative));
        assert_eq!(CategoryFacet::from_label("Éducation"), Some(CategoryFacet::Education));
        assert_eq!(CategoryFacet::from_label("SANTÉ"), Some(CategoryFacet::Health));
        assert_eq!(CategoryFacet::from_label("Historique"), Some(CategoryFacet::Cultural));
        assert_eq!(CategoryFacet::from_label(" Sécurité "), Some(CategoryFacet::Security));
        assert_eq!(CategoryFacet::from_label("Industriel"), None);
        assert_eq!(CategoryFacet::from_label(""), None);
    }

    #[test]
    fn test_property_with_missing_fields() {
        let property: Property = serde_json::from_value(json!({ "id": 9, "nom": "Annexe" })).unwrap();
        assert_eq!(property.id, 9);
        assert_eq!(property.status, PropertyStatus::Unknown);
        assert_eq!(property.security_level, SecurityLevel::Unknown);
        assert!(property.leases.is_empty());
        assert!(!property.has_active_lease());
        assert!(!property.has_active_project());
        assert!(!property.has_open_tasks());
        assert_eq!(property.category(), None);
    }

    #[test]
    fn test_property_enums() {
        let property: Property = serde_json::from_value(json!({
            "id": 1,
            "status": "renovation",
            "niveauSecurite": "élevé",
            "type": "Culturel"
        }))
        .unwrap();
        assert_eq!(property.status, PropertyStatus::UnderRenovation);
        assert_eq!(property.status.label(), "En Rénovation");
        assert_eq!(property.security_level.label(), Some("Sécurité Élevée"));
        assert_eq!(property.category(), Some(CategoryFacet::Cultural));
    }

    #[test]
    fn test_occupancy_is_clamped() {
        let mut property = Property {
            occupancy_rate: 120.0,
            ..Default::default()
        };
        assert_eq!(property.occupancy_percent(), 100.0);
        property.occupancy_rate = 85.0;
        assert_eq!(property.occupancy_percent(), 85.0);
    }

    #[test]
    fn test_unknown_status_string() {
        let property: Property = serde_json::from_value(json!({ "status": "demoli" })).unwrap();
        assert_eq!(property.status, PropertyStatus::Unknown);
    }
}
