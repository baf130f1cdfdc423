use proptest::prelude::*;
use proptest::sample::select;

use crate::model::{
    CategoryFacet, Lease, LeaseStatus, LegacyLease, Project, Property, PropertyStatus,
    StructuredLease, Task,
};
use crate::search::{normalize, FacetState, SearchIndex, StatusFilter};

const WORDS: &[&str] = &[
    "Palais", "Élysée", "Hôtel", "Matignon", "Économie", "Sorbonne", "Château", "Versailles",
    "Présidence", "Culture", "Santé", "sécurité", "façades", "œuvres", "Bercy", "Toulouse",
];

const CATEGORIES: &[&str] = &[
    "Administratif", "Éducation", "Culturel", "Historique", "Santé", "Sécurité", "Logistique", "",
];

const MINISTRIES: &[&str] = &["Présidence", "Premier Ministre", "Économie", "Culture", ""];

fn text() -> impl Strategy<Value = String> {
    prop::collection::vec(select(WORDS), 0..4).prop_map(|words| words.join(" "))
}

fn status() -> impl Strategy<Value = PropertyStatus> {
    select(vec![
        PropertyStatus::Active,
        PropertyStatus::UnderRenovation,
        PropertyStatus::Historic,
        PropertyStatus::Unknown,
    ])
}

fn lease() -> impl Strategy<Value = Lease> {
    prop_oneof![
        (text(), any::<bool>()).prop_map(|(tenant, active)| Lease::Legacy(LegacyLease {
            tenant,
            active,
            ..Default::default()
        })),
        (
            text(),
            text(),
            select(vec![
                LeaseStatus::Active,
                LeaseStatus::Inactive,
                LeaseStatus::GovernmentOwned,
                LeaseStatus::Other("résilié".to_string()),
            ])
        )
            .prop_map(|(title, organization, status)| {
                let mut lease = StructuredLease {
                    lease_id: "L".to_string(),
                    title,
                    status,
                    ..Default::default()
                };
                lease.parties.tenant.organization = organization;
                Lease::Structured(lease)
            }),
    ]
}

fn project() -> impl Strategy<Value = Project> {
    (text(), text(), any::<bool>()).prop_map(|(name, manager, active)| Project {
        name,
        manager,
        active,
        ..Default::default()
    })
}

fn task() -> impl Strategy<Value = Task> {
    (text(), text()).prop_map(|(title, assignee)| Task {
        title,
        assignee,
        ..Default::default()
    })
}

fn property() -> impl Strategy<Value = Property> {
    (
        text(),
        text(),
        select(CATEGORIES),
        status(),
        select(MINISTRIES),
        prop::collection::vec(lease(), 0..3),
        prop::collection::vec(project(), 0..3),
        prop::collection::vec(task(), 0..3),
    )
        .prop_map(
            |(name, address, category, status, ministry, leases, projects, tasks)| Property {
                name,
                address,
                category_label: category.to_string(),
                status,
                ministry: ministry.to_string(),
                leases,
                projects,
                tasks,
                ..Default::default()
            },
        )
}

fn index() -> impl Strategy<Value = SearchIndex> {
    prop::collection::vec(property(), 0..8).prop_map(|mut properties| {
        for (id, property) in properties.iter_mut().enumerate() {
            property.id = id as u32 + 1;
        }
        SearchIndex::new(properties)
    })
}

fn facets() -> impl Strategy<Value = FacetState> {
    (
        prop::collection::btree_set(select(CategoryFacet::ALL.to_vec()), 0..3),
        prop::option::of(status()),
        prop::option::of(select(MINISTRIES)),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(categories, status, ministry, leases, projects, tasks)| {
            let mut facets = FacetState {
                categories,
                has_active_leases: leases,
                has_active_projects: projects,
                has_open_tasks: tasks,
                ..Default::default()
            };
            if let Some(status) = status {
                facets = facets.with_status(status);
            }
            if let Some(ministry) = ministry {
                facets = facets.with_ministry(ministry);
            }
            facets
        })
}

/// One more engaged facet on top of `facets`
fn narrower(facets: &FacetState, choice: u8) -> FacetState {
    let narrowed = facets.clone();
    match choice % 4 {
        0 => narrowed.with_active_leases(),
        1 => narrowed.with_active_projects(),
        2 => narrowed.with_open_tasks(),
        _ if narrowed.status == StatusFilter::All => narrowed.with_status(PropertyStatus::Historic),
        _ => narrowed.with_open_tasks(),
    }
}

fn ids(results: &[&Property]) -> Vec<u32> {
    results.iter().map(|p| p.id).collect()
}

proptest! {
    #[test]
    fn normalize_is_idempotent(s in "\\PC{0,40}") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_ignores_case_and_accents(word in select(WORDS)) {
        prop_assert_eq!(normalize(&word.to_uppercase()), normalize(word));
    }

    #[test]
    fn empty_query_returns_full_collection(index in index()) {
        let all: Vec<u32> = index.properties().iter().map(|p| p.id).collect();
        prop_assert_eq!(ids(&index.query("", &FacetState::default())), all);
    }

    #[test]
    fn term_narrows_results(index in index(), term in text(), facets in facets()) {
        let base = ids(&index.query("", &facets));
        let narrowed = ids(&index.query(&term, &facets));
        prop_assert!(narrowed.iter().all(|id| base.contains(id)));
    }

    #[test]
    fn extra_facet_never_widens(index in index(), term in text(), facets in facets(), choice in any::<u8>()) {
        let base = ids(&index.query(&term, &facets));
        let narrowed = ids(&index.query(&term, &narrower(&facets, choice)));
        prop_assert!(narrowed.len() <= base.len());
        prop_assert!(narrowed.iter().all(|id| base.contains(id)));
    }

    #[test]
    fn query_is_pure(index in index(), term in text(), facets in facets()) {
        prop_assert_eq!(ids(&index.query(&term, &facets)), ids(&index.query(&term, &facets)));
    }

    #[test]
    fn query_preserves_collection_order(index in index(), term in text(), facets in facets()) {
        let results = ids(&index.query(&term, &facets));
        prop_assert!(results.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn tags_only_on_results(index in index(), term in text()) {
        for hit in index.query_with_matches(&term, &FacetState::default()) {
            let needle = normalize(&term);
            for tag in &hit.matches {
                prop_assert!(normalize(&tag.value).contains(&needle));
            }
        }
    }
}
