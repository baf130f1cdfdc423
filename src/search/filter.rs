//! Facet filters and the per-property predicate
//!
//! A property passes when the text clause and every engaged facet pass.
//! Facets that are not engaged always pass.

use super::matches::searchable_fields;
use super::normalize::{contains_normalized, normalize};
use crate::model::{CategoryFacet, Property, PropertyStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Status facet; `All` is the sentinel that always passes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Only(PropertyStatus),
}

impl StatusFilter {
    fn accepts(&self, status: PropertyStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

/// Ministry facet; `All` is the sentinel that always passes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinistryFilter {
    #[default]
    All,
    Only(String),
}

impl MinistryFilter {
    fn accepts(&self, ministry: &str) -> bool {
        match self {
            MinistryFilter::All => true,
            MinistryFilter::Only(wanted) => wanted == ministry,
        }
    }
}

/// Facet toggles of the search panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacetState {
    pub categories: BTreeSet<CategoryFacet>,
    pub status: StatusFilter,
    pub ministry: MinistryFilter,
    pub has_active_leases: bool,
    pub has_active_projects: bool,
    pub has_open_tasks: bool,
}

impl FacetState {
    /// Flip a category toggle
    pub fn toggle_category(&mut self, category: CategoryFacet) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
    }

    pub fn with_category(mut self, category: CategoryFacet) -> Self {
        self.categories.insert(category);
        self
    }

    pub fn with_status(mut self, status: PropertyStatus) -> Self {
        self.status = StatusFilter::Only(status);
        self
    }

    pub fn with_ministry(mut self, ministry: impl Into<String>) -> Self {
        self.ministry = MinistryFilter::Only(ministry.into());
        self
    }

    pub fn with_active_leases(mut self) -> Self {
        self.has_active_leases = true;
        self
    }

    pub fn with_active_projects(mut self) -> Self {
        self.has_active_projects = true;
        self
    }

    pub fn with_open_tasks(mut self) -> Self {
        self.has_open_tasks = true;
        self
    }

    /// Whether any facet narrows the results
    pub fn is_engaged(&self) -> bool {
        *self != FacetState::default()
    }

    /// Disengage every facet
    pub fn reset(&mut self) {
        *self = FacetState::default();
    }

    /// Facet clauses only, without the text clause
    pub fn accepts(&self, property: &Property) -> bool {
        let category_ok = self.categories.is_empty()
            || property
                .category()
                .is_some_and(|category| self.categories.contains(&category));

        category_ok
            && self.status.accepts(property.status)
            && self.ministry.accepts(&property.ministry)
            && (!self.has_active_leases || property.has_active_lease())
            && (!self.has_active_projects || property.has_active_project())
            && (!self.has_open_tasks || property.has_open_tasks())
    }
}

/// Text clause against an already folded query
pub(crate) fn matches_text(property: &Property, needle: &str) -> bool {
    needle.is_empty()
        || searchable_fields(property)
            .iter()
            .any(|field| contains_normalized(field.value, needle))
}

/// Full predicate: text clause AND facet clauses.
///
/// Unlike match extraction, an empty query passes every property.
pub fn matches(property: &Property, query: &str, facets: &FacetState) -> bool {
    matches_text(property, &normalize(query)) && facets.accepts(property)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Lease, LeaseStatus, LegacyLease, Project, StructuredLease, Task};

    fn property(id: u32, name: &str, category: &str, status: PropertyStatus) -> Property {
        Property {
            id,
            name: name.to_string(),
            category_label: category.to_string(),
            status,
            ministry: "Économie".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_facets_and_empty_query_pass() {
        let p = property(1, "Hôtel de Toulouse", "Historique", PropertyStatus::Active);
        assert!(matches(&p, "", &FacetState::default()));
        assert!(!FacetState::default().is_engaged());
    }

    #[test]
    fn test_text_clause() {
        let mut p = property(1, "Hôtel de Toulouse", "Historique", PropertyStatus::Active);
        p.city = "Paris".to_string();
        p.tasks.push(Task {
            title: "Inspection".to_string(),
            description: "Vérification des toitures".to_string(),
            ..Default::default()
        });
        let facets = FacetState::default();
        assert!(matches(&p, "HOTEL", &facets));
        assert!(matches(&p, "paris", &facets));
        assert!(matches(&p, "toitures", &facets));
        assert!(matches(&p, "economie", &facets));
        assert!(!matches(&p, "versailles", &facets));
    }

    #[test]
    fn test_category_clause() {
        let admin = property(1, "Matignon", "Administratif", PropertyStatus::Active);
        let school = property(2, "Sorbonne", "Éducation", PropertyStatus::Active);
        let heritage = property(3, "Toulouse", "Historique", PropertyStatus::Active);
        let odd = property(4, "Entrepôt", "Logistique", PropertyStatus::Active);

        let facets = FacetState::default().with_category(CategoryFacet::Education);
        assert!(!facets.accepts(&admin));
        assert!(facets.accepts(&school));
        assert!(!facets.accepts(&odd));

        let facets = FacetState::default().with_category(CategoryFacet::Cultural);
        assert!(facets.accepts(&heritage));

        // unmapped labels only pass when no category is engaged
        assert!(FacetState::default().accepts(&odd));
    }

    #[test]
    fn test_toggle_category() {
        let mut facets = FacetState::default();
        facets.toggle_category(CategoryFacet::Health);
        assert!(facets.categories.contains(&CategoryFacet::Health));
        assert!(facets.is_engaged());
        facets.toggle_category(CategoryFacet::Health);
        assert!(facets.categories.is_empty());
        assert!(!facets.is_engaged());
    }

    #[test]
    fn test_status_and_ministry_clauses() {
        let p = property(1, "Versailles", "Culturel", PropertyStatus::Historic);
        assert!(FacetState::default().with_status(PropertyStatus::Historic).accepts(&p));
        assert!(!FacetState::default().with_status(PropertyStatus::Active).accepts(&p));
        assert!(FacetState::default().with_ministry("Économie").accepts(&p));
        assert!(!FacetState::default().with_ministry("economie").accepts(&p));
    }

    #[test]
    fn test_active_lease_uniformity() {
        let mut legacy = property(1, "Matignon", "Administratif", PropertyStatus::Active);
        legacy.leases.push(Lease::Legacy(LegacyLease {
            active: true,
            ..Default::default()
        }));

        let mut structured = property(2, "Élysée", "Administratif", PropertyStatus::Active);
        structured.leases.push(Lease::Structured(StructuredLease {
            lease_id: "FR-GOV".to_string(),
            status: LeaseStatus::GovernmentOwned,
            ..Default::default()
        }));

        let mut inactive = property(3, "Bercy", "Administratif", PropertyStatus::Active);
        inactive.leases.push(Lease::Structured(StructuredLease {
            lease_id: "X".to_string(),
            status: LeaseStatus::Inactive,
            ..Default::default()
        }));
        inactive.leases.push(Lease::Legacy(LegacyLease::default()));

        let facets = FacetState::default().with_active_leases();
        assert!(facets.accepts(&legacy));
        assert!(facets.accepts(&structured));
        assert!(!facets.accepts(&inactive));
    }

    #[test]
    fn test_project_and_task_toggles() {
        let mut p = property(1, "Sorbonne", "Éducation", PropertyStatus::Active);
        assert!(!FacetState::default().with_active_projects().accepts(&p));
        assert!(!FacetState::default().with_open_tasks().accepts(&p));

        p.projects.push(Project {
            active: false,
            ..Default::default()
        });
        assert!(!FacetState::default().with_active_projects().accepts(&p));
        p.projects.push(Project {
            active: true,
            ..Default::default()
        });
        assert!(FacetState::default().with_active_projects().accepts(&p));

        p.tasks.push(Task::default());
        assert!(FacetState::default().with_open_tasks().accepts(&p));
    }

    #[test]
    fn test_reset() {
        let mut facets = FacetState::default()
            .with_category(CategoryFacet::Security)
            .with_status(PropertyStatus::Historic)
            .with_open_tasks();
        assert!(facets.is_engaged());
        facets.reset();
        assert_eq!(facets, FacetState::default());
    }
}
