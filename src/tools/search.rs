//! Search tool implementation
//!
//! Implements the `search(query, facets...)` MCP tool

use super::{output_error, parse_args, respond, run_with_timeout};
use crate::cli::SearchArgs;
use crate::config::Config;
use crate::error::{validate_query, AppError};
use crate::format::format_search_results;
use crate::mcp::{McpResponse, ToolResult};
use crate::model::PropertyStatus;
use crate::search::SearchIndex;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// Handle search tool call (MCP)
pub async fn handle_search(
    id: Option<Value>,
    args: Value,
    index: &Arc<SearchIndex>,
    config: &Config,
) -> McpResponse {
    let index = Arc::clone(index);
    let config = config.clone();
    let result = match parse_args::<SearchArgs>(args) {
        Ok(search_args) => {
            run_with_timeout(move || execute_search(&search_args, &index, &config)).await
        }
        Err(e) => Err(e),
    };
    respond(id, result)
}

/// Shared implementation for search (used by MCP and CLI)
pub fn execute_search(
    args: &SearchArgs,
    index: &SearchIndex,
    config: &Config,
) -> Result<ToolResult, AppError> {
    validate_query(&args.query)?;
    if args.limit == Some(0) {
        return Err(AppError::InvalidInput("Limit must be at least 1".to_string()));
    }
    if args.status == Some(PropertyStatus::Unknown) {
        return Err(AppError::InvalidInput(
            "Unknown status, expected one of: actif, renovation, historique".to_string(),
        ));
    }

    let facets = args.facets();
    debug!("Search request: query '{}', facets {:?}", args.query, facets);

    let mut hits = index.query_with_matches(&args.query, &facets);
    let total = hits.len();
    if let Some(limit) = args.limit.or(config.result_limit) {
        hits.truncate(limit);
    }
    let summary = index.match_summary(&args.query, &facets, config.match_tag_limit);

    if args.json {
        let body = json!({
            "total": total,
            "results": hits,
            "tags": summary,
        });
        let text = serde_json::to_string_pretty(&body).map_err(output_error("results"))?;
        return Ok(ToolResult::text(text));
    }

    Ok(ToolResult::text(format_search_results(
        &hits,
        total,
        &args.query,
        &summary,
    )))
}
