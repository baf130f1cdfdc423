//! CLI mode implementation
//!
//! The same argument structs describe CLI flags (clap) and MCP tool inputs
//! (schemars + serde).

use crate::model::{CategoryFacet, PropertyStatus};
use crate::search::FacetState;
use clap::{Parser, Subcommand};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// estate-search CLI
#[derive(Parser)]
#[command(name = "estate-search")]
#[command(about = "Search government real-estate properties, their leases, projects and tasks", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search properties by text and facets
    Search(SearchArgs),
    /// Show the detail card of one property
    Show(ShowArgs),
    /// List the fields matching a query across all properties
    Tags(TagsArgs),
}

/// Search tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug, Default)]
pub struct SearchArgs {
    /// Search text, ignoring case and accents; empty lists every property
    #[arg(short = 'q', long, default_value = "")]
    #[serde(default)]
    #[schemars(description = "Search text, ignoring case and accents; empty lists every property")]
    pub query: String,

    /// Keep properties of these categories (repeatable)
    #[arg(long = "category", value_enum)]
    #[serde(default)]
    #[schemars(description = "Keep properties of these categories")]
    pub categories: Vec<CategoryFacet>,

    /// Keep properties with this status
    #[arg(long, value_enum)]
    #[schemars(description = "Keep properties with this status")]
    pub status: Option<PropertyStatus>,

    /// Keep properties of this ministry (exact name)
    #[arg(long)]
    #[schemars(description = "Keep properties of this ministry (exact name)")]
    pub ministry: Option<String>,

    /// Keep properties with at least one active lease
    #[arg(long)]
    #[serde(default)]
    #[schemars(description = "Keep properties with at least one active lease")]
    pub active_leases: bool,

    /// Keep properties with at least one active project
    #[arg(long)]
    #[serde(default)]
    #[schemars(description = "Keep properties with at least one active project")]
    pub active_projects: bool,

    /// Keep properties with open tasks
    #[arg(long)]
    #[serde(default)]
    #[schemars(description = "Keep properties with open tasks")]
    pub open_tasks: bool,

    /// Maximum number of results listed
    #[arg(short = 'l', long)]
    #[schemars(description = "Maximum number of results listed")]
    pub limit: Option<usize>,

    /// Output JSON instead of markdown
    #[arg(long)]
    #[serde(default)]
    #[schemars(description = "Output JSON instead of markdown")]
    pub json: bool,
}

impl SearchArgs {
    /// Facet state described by the flags
    pub fn facets(&self) -> FacetState {
        let mut facets = FacetState::default();
        for category in &self.categories {
            facets = facets.with_category(*category);
        }
        if let Some(status) = self.status {
            facets = facets.with_status(status);
        }
        if let Some(ministry) = &self.ministry {
            facets = facets.with_ministry(ministry.clone());
        }
        if self.active_leases {
            facets = facets.with_active_leases();
        }
        if self.active_projects {
            facets = facets.with_active_projects();
        }
        if self.open_tasks {
            facets = facets.with_open_tasks();
        }
        facets
    }
}

/// Show tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct ShowArgs {
    /// Property id
    #[arg(long)]
    #[schemars(description = "Property id")]
    pub id: u32,

    /// Output JSON instead of markdown
    #[arg(long)]
    #[serde(default)]
    #[schemars(description = "Output JSON instead of markdown")]
    pub json: bool,
}

/// Tags tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct TagsArgs {
    /// Search text, ignoring case and accents
    #[arg(short = 'q', long)]
    #[schemars(description = "Search text, ignoring case and accents")]
    pub query: String,

    /// Maximum number of tags shown (defaults to the configured limit)
    #[arg(short = 'l', long)]
    #[schemars(description = "Maximum number of tags shown")]
    pub limit: Option<usize>,
}
