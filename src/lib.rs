//! estate-search: accent-insensitive search over government real-estate properties
//!
//! The core is [`search::SearchIndex`]: a text clause plus facet filters over
//! the bundled collection in [`data`]. [`search::SearchSession`] holds the
//! search panel state. The `cli`, `mcp` and `tools` modules expose the same
//! operations on the command line and as MCP tools.

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod mcp;
pub mod model;
pub mod search;
pub mod tools;
