//! Search panel state machine
//!
//! The panel is either collapsed or expanded. It owns the query, the facet
//! toggles, the facets panel flag and the detail view. Everything that used
//! to travel as an untyped UI event (a map marker selecting a property, a
//! tag click re-running the search) arrives here as a [`SearchEvent`].

use super::engine::{MatchSummary, SearchIndex};
use super::filter::FacetState;
use super::matches::MatchTag;
use crate::model::Property;
use std::time::Duration;
use tracing::debug;

/// Delay between a close request and the detail view disappearing
pub const DETAIL_CLOSE_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelState {
    #[default]
    Collapsed,
    Expanded,
}

/// Detail view of a selected property
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DetailView {
    #[default]
    Hidden,
    Open(u32),
    /// Close requested; hidden once the transition delay elapses
    Closing(u32),
}

/// Input events of the search panel
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    Focus,
    Input(String),
    ClearQuery,
    ClickOutside,
    Collapse,
    ToggleFacetsPanel,
    UpdateFacets(FacetState),
    ResetFacets,
    SelectResult(u32),
    CloseDetail,
    CloseDelayElapsed,
    /// A match tag was clicked: search for its exact value
    ApplyTag(MatchTag),
    /// External selection, e.g. a map marker
    UpdateSearch { term: String },
}

/// Event emitted by the map when a marker is clicked
pub fn marker_selected(property: &Property) -> SearchEvent {
    SearchEvent::UpdateSearch {
        term: property.name.clone(),
    }
}

/// State owned by one search panel
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSession {
    panel: PanelState,
    query: String,
    facets: FacetState,
    facets_panel_open: bool,
    detail: DetailView,
    close_delay: Duration,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self {
            panel: PanelState::default(),
            query: String::new(),
            facets: FacetState::default(),
            facets_panel_open: false,
            detail: DetailView::default(),
            close_delay: DETAIL_CLOSE_DELAY,
        }
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_close_delay(mut self, close_delay: Duration) -> Self {
        self.close_delay = close_delay;
        self
    }

    /// How long a driver waits after `CloseDetail` before sending `CloseDelayElapsed`
    pub fn close_delay(&self) -> Duration {
        self.close_delay
    }

    pub fn panel(&self) -> PanelState {
        self.panel
    }

    pub fn is_expanded(&self) -> bool {
        self.panel == PanelState::Expanded
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn facets(&self) -> &FacetState {
        &self.facets
    }

    pub fn facets_panel_open(&self) -> bool {
        self.facets_panel_open
    }

    pub fn detail(&self) -> DetailView {
        self.detail
    }

    /// Apply one event
    pub fn dispatch(&mut self, event: SearchEvent) {
        debug!("Search session event: {:?}", event);

        match event {
            SearchEvent::Focus => self.expand(),
            SearchEvent::Input(text) => {
                if !text.is_empty() {
                    self.expand();
                }
                self.query = text;
            }
            SearchEvent::ClearQuery => {
                self.query.clear();
                self.expand();
            }
            SearchEvent::ClickOutside | SearchEvent::Collapse => {
                self.panel = PanelState::Collapsed;
                self.facets_panel_open = false;
                self.detail = DetailView::Hidden;
            }
            SearchEvent::ToggleFacetsPanel => self.facets_panel_open = !self.facets_panel_open,
            SearchEvent::UpdateFacets(facets) => self.facets = facets,
            SearchEvent::ResetFacets => self.facets.reset(),
            SearchEvent::SelectResult(id) => {
                self.expand();
                self.facets_panel_open = false;
                self.detail = DetailView::Open(id);
            }
            SearchEvent::CloseDetail => {
                if let DetailView::Open(id) = self.detail {
                    self.detail = DetailView::Closing(id);
                }
            }
            SearchEvent::CloseDelayElapsed => {
                if let DetailView::Closing(_) = self.detail {
                    self.detail = DetailView::Hidden;
                }
            }
            SearchEvent::ApplyTag(tag) => {
                self.query = tag.value;
                self.expand();
            }
            SearchEvent::UpdateSearch { term } => {
                self.query = term;
                self.expand();
                self.facets_panel_open = false;
            }
        }
    }

    fn expand(&mut self) {
        self.panel = PanelState::Expanded;
    }

    /// Results for the current query and facets
    pub fn results<'a>(&self, index: &'a SearchIndex) -> Vec<&'a Property> {
        index.query(&self.query, &self.facets)
    }

    /// Match tags for the current query and facets
    pub fn match_summary(&self, index: &SearchIndex, limit: usize) -> MatchSummary {
        index.match_summary(&self.query, &self.facets, limit)
    }

    /// Property shown in the detail view, including while it closes
    pub fn selected<'a>(&self, index: &'a SearchIndex) -> Option<&'a Property> {
        match self.detail {
            DetailView::Hidden => None,
            DetailView::Open(id) | DetailView::Closing(id) => index.get(id),
        }
    }
}
