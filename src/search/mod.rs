//! Property search: accent-insensitive text matching and facet filtering
//!
//! Leaf to root: [`normalize`] folds text, [`matches`] lists matched fields
//! for tags, [`filter`] decides whether a property passes, [`engine`] runs
//! the filter over the collection and [`session`] holds the panel state.

pub mod engine;
pub mod filter;
pub mod matches;
pub mod normalize;
pub mod session;

#[cfg(test)]
mod property_tests;

pub use engine::{MatchSummary, SearchHit, SearchIndex};
pub use filter::{matches, FacetState, MinistryFilter, StatusFilter};
pub use matches::{extract_matches, MatchCategory, MatchTag};
pub use normalize::normalize;
pub use session::{marker_selected, DetailView, PanelState, SearchEvent, SearchSession};
