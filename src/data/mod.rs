//! Bundled property dataset
//!
//! The collection is compiled into the binary; callers parse it once at
//! startup and share the resulting index.

use crate::error::AppError;
use crate::model::Property;
use crate::search::SearchIndex;
use std::collections::HashSet;
use tracing::debug;

/// Raw JSON of the bundled collection
const PROPERTIES_JSON: &str = include_str!("../../data/properties.json");

/// Parse the bundled collection
pub fn load_properties() -> Result<Vec<Property>, AppError> {
    parse_properties(PROPERTIES_JSON)
}

/// Parse a property collection, rejecting duplicate ids
pub fn parse_properties(json: &str) -> Result<Vec<Property>, AppError> {
    let properties: Vec<Property> = serde_json::from_str(json)
        .map_err(|e| AppError::Dataset(format!("Failed to parse properties: {}", e)))?;

    let mut seen = HashSet::new();
    if let Some(duplicate) = properties.iter().find(|p| !seen.insert(p.id)) {
        return Err(AppError::Dataset(format!(
            "Duplicate property id {}",
            duplicate.id
        )));
    }

    debug!("Loaded {} properties", properties.len());
    Ok(properties)
}

/// Search index over the bundled collection
pub fn default_index() -> Result<SearchIndex, AppError> {
    Ok(SearchIndex::new(load_properties()?))
}
