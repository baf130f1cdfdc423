//! Search Index
//!
//! Ties together normalization, match extraction and the facet predicate
//! over a fixed collection of properties. Every call is a full linear scan
//! in collection order; there is no ranking and no hidden state.

use super::filter::{matches_text, FacetState};
use super::matches::{extract_matches, MatchTag};
use super::normalize::normalize;
use crate::model::Property;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// A matching property with the tags explaining the match
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a> {
    pub property: &'a Property,
    pub matches: Vec<MatchTag>,
}

/// De-duplicated match tags across a result list
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchSummary {
    /// Tags to display, in first-seen order
    pub shown: Vec<MatchTag>,
    /// Distinct tags left out of `shown`
    pub remaining: usize,
}

/// In-memory search index over a static property collection
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    properties: Vec<Property>,
}

impl SearchIndex {
    /// Create an index over `properties`, keeping their order
    pub fn new(properties: Vec<Property>) -> Self {
        Self { properties }
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Look up a property by id
    pub fn get(&self, id: u32) -> Option<&Property> {
        self.properties.iter().find(|property| property.id == id)
    }

    /// Look up a property by its exact name
    pub fn find_by_name(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|property| property.name == name)
    }

    /// Distinct ministries in first-seen order, for the ministry facet
    pub fn ministries(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.properties
            .iter()
            .map(|property| property.ministry.as_str())
            .filter(|ministry| !ministry.is_empty() && seen.insert(*ministry))
            .collect()
    }

    /// Properties passing the text clause and every engaged facet, in collection order
    pub fn query(&self, term: &str, facets: &FacetState) -> Vec<&Property> {
        let needle = normalize(term);
        let results: Vec<&Property> = self
            .properties
            .iter()
            .filter(|property| matches_text(property, &needle) && facets.accepts(property))
            .collect();

        debug!(
            "Query '{}' matched {} of {} properties",
            term,
            results.len(),
            self.properties.len()
        );

        results
    }

    /// Like [`SearchIndex::query`], with the match tags of each result
    pub fn query_with_matches(&self, term: &str, facets: &FacetState) -> Vec<SearchHit<'_>> {
        self.query(term, facets)
            .into_iter()
            .map(|property| SearchHit {
                property,
                matches: extract_matches(property, term),
            })
            .collect()
    }

    /// Aggregate match tags over all results, showing at most `limit`
    pub fn match_summary(&self, term: &str, facets: &FacetState, limit: usize) -> MatchSummary {
        let mut seen = HashSet::new();
        let distinct: Vec<MatchTag> = self
            .query(term, facets)
            .into_iter()
            .flat_map(|property| extract_matches(property, term))
            .filter(|tag| seen.insert(tag.clone()))
            .collect();

        let remaining = distinct.len().saturating_sub(limit);
        let shown = distinct.into_iter().take(limit).collect();

        MatchSummary { shown, remaining }
    }
}
