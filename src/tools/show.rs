//! Show tool implementation
//!
//! Implements the `show(id)` MCP tool: the detail card of one property

use super::{output_error, parse_args, respond, run_with_timeout};
use crate::cli::ShowArgs;
use crate::error::AppError;
use crate::format::{format_property_detail, DetailStats};
use crate::mcp::{McpResponse, ToolResult};
use crate::search::SearchIndex;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// Handle show tool call (MCP)
pub async fn handle_show(id: Option<Value>, args: Value, index: &Arc<SearchIndex>) -> McpResponse {
    let index = Arc::clone(index);
    let result = match parse_args::<ShowArgs>(args) {
        Ok(show_args) => run_with_timeout(move || execute_show(&show_args, &index)).await,
        Err(e) => Err(e),
    };
    respond(id, result)
}

/// Shared implementation for show (used by MCP and CLI)
pub fn execute_show(args: &ShowArgs, index: &SearchIndex) -> Result<ToolResult, AppError> {
    let property = index
        .get(args.id)
        .ok_or_else(|| AppError::NotFound(format!("No property with id {}", args.id)))?;

    debug!("Showing property {} ({})", property.id, property.name);

    if args.json {
        let body = json!({
            "property": property,
            "stats": DetailStats::of(property),
        });
        let text = serde_json::to_string_pretty(&body).map_err(output_error("property"))?;
        return Ok(ToolResult::text(text));
    }

    Ok(ToolResult::text(format_property_detail(property)))
}
