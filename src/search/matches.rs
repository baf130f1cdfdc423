//! Match extraction
//!
//! Lists the fields of a property that contain the query, in a fixed order,
//! so the caller can render "label: value" tags and re-run a search with the
//! exact field value.

use super::normalize::{contains_normalized, normalize};
use crate::model::{Lease, Property};
use serde::Serialize;

/// Entity a match tag points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchCategory {
    Property,
    Lease,
    Project,
    Task,
}

/// A matched field, ready to be shown as a tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MatchTag {
    pub category: MatchCategory,
    pub label: &'static str,
    /// Field content as stored, not the query
    pub value: String,
}

/// A field visited by the text search.
///
/// Fields without a label are searched but never surfaced as tags.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchField<'a> {
    pub category: MatchCategory,
    pub label: Option<&'static str>,
    pub value: &'a str,
}

impl<'a> SearchField<'a> {
    fn tagged(category: MatchCategory, label: &'static str, value: &'a str) -> Self {
        Self {
            category,
            label: Some(label),
            value,
        }
    }

    fn untagged(category: MatchCategory, value: &'a str) -> Self {
        Self {
            category,
            label: None,
            value,
        }
    }
}

/// Every searchable field of a property, in tag display order
pub(crate) fn searchable_fields(property: &Property) -> Vec<SearchField<'_>> {
    use MatchCategory as C;

    let mut fields = vec![
        SearchField::tagged(C::Property, "Propriété", &property.name),
        SearchField::tagged(C::Property, "Adresse", &property.address),
        SearchField::untagged(C::Property, &property.city),
        SearchField::tagged(C::Property, "Ministère", &property.ministry),
    ];

    for lease in &property.leases {
        match lease {
            Lease::Structured(lease) => {
                let tenant = &lease.parties.tenant;
                fields.push(SearchField::tagged(C::Lease, "Bail", &lease.title));
                fields.push(SearchField::untagged(C::Lease, &lease.lease_id));
                fields.push(SearchField::tagged(C::Lease, "Locataire", &tenant.organization));
                fields.push(SearchField::tagged(C::Lease, "Raison sociale", &tenant.legal_name));
                for sub_lease in &lease.sub_leases {
                    fields.push(SearchField::untagged(C::Lease, &sub_lease.reference));
                    fields.push(SearchField::untagged(C::Lease, &sub_lease.tenant));
                }
            }
            Lease::Legacy(lease) => {
                fields.push(SearchField::untagged(C::Lease, &lease.reference));
                fields.push(SearchField::tagged(C::Lease, "Locataire", &lease.tenant));
            }
        }
    }

    for project in &property.projects {
        fields.push(SearchField::tagged(C::Project, "Projet", &project.name));
        fields.push(SearchField::untagged(C::Project, &project.description));
        fields.push(SearchField::tagged(C::Project, "Responsable", &project.manager));
    }

    for task in &property.tasks {
        fields.push(SearchField::tagged(C::Task, "Tâche", &task.title));
        fields.push(SearchField::untagged(C::Task, &task.description));
        fields.push(SearchField::tagged(C::Task, "Assigné à", &task.assignee));
    }

    fields
}

/// Fields of `property` matching `query`, as tags.
///
/// An empty query yields no tags even though it selects every property.
pub fn extract_matches(property: &Property, query: &str) -> Vec<MatchTag> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = normalize(query);
    searchable_fields(property)
        .into_iter()
        .filter(|field| !field.value.is_empty() && contains_normalized(field.value, &needle))
        .filter_map(|field| {
            field.label.map(|label| MatchTag {
                category: field.category,
                label,
                value: field.value.to_string(),
            })
        })
        .collect()
}
