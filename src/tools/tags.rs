//! Tags tool implementation
//!
//! Implements the `tags(query)` MCP tool: matched fields across all properties

use super::{parse_args, respond, run_with_timeout};
use crate::cli::TagsArgs;
use crate::config::Config;
use crate::error::{validate_query, AppError};
use crate::format::format_tag_list;
use crate::mcp::{McpResponse, ToolResult};
use crate::search::{normalize, FacetState, SearchIndex};
use serde_json::Value;
use std::sync::Arc;

/// Handle tags tool call (MCP)
pub async fn handle_tags(
    id: Option<Value>,
    args: Value,
    index: &Arc<SearchIndex>,
    config: &Config,
) -> McpResponse {
    let index = Arc::clone(index);
    let config = config.clone();
    let result = match parse_args::<TagsArgs>(args) {
        Ok(tags_args) => run_with_timeout(move || execute_tags(&tags_args, &index, &config)).await,
        Err(e) => Err(e),
    };
    respond(id, result)
}

/// Shared implementation for tags (used by MCP and CLI)
pub fn execute_tags(
    args: &TagsArgs,
    index: &SearchIndex,
    config: &Config,
) -> Result<ToolResult, AppError> {
    validate_query(&args.query)?;
    if normalize(&args.query).trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Query is empty after normalization".to_string(),
        ));
    }

    let limit = args.limit.unwrap_or(config.match_tag_limit);
    let summary = index.match_summary(&args.query, &FacetState::default(), limit);

    Ok(ToolResult::text(format_tag_list(&args.query, &summary)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::default_index;
    use serde_json::json;

    fn index() -> Arc<SearchIndex> {
        Arc::new(default_index().unwrap())
    }

    fn tags(query: &str, limit: Option<usize>) -> Result<String, AppError> {
        let args = TagsArgs {
            query: query.to_string(),
            limit,
        };
        execute_tags(&args, &index(), &Config::default()).map(|r| r.content[0].text.clone())
    }

    #[test]
    fn test_tags_deduplicated_across_properties() {
        let text = tags("service technique", None).unwrap();
        assert_eq!(text.matches("- Assigné à: Service Technique").count(), 1);
        assert!(!text.contains("autres"));
    }

    #[test]
    fn test_tags_limit() {
        let text = tags("restauration", Some(1)).unwrap();
        assert!(text.contains("- Projet: Restauration des façades"));
        assert!(text.contains("+1 autres"));
    }

    #[test]
    fn test_tags_no_match() {
        assert_eq!(
            tags("louvre", None).unwrap(),
            "Aucune correspondance pour « louvre »"
        );
    }

    #[test]
    fn test_tags_require_a_query() {
        assert!(matches!(tags("", None), Err(AppError::InvalidInput(_))));
        assert!(matches!(tags("   ", None), Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_handle_tags() {
        let resp = handle_tags(
            Some(json!(7)),
            json!({ "query": "economie" }),
            &index(),
            &Config::default(),
        )
        .await;
        assert!(resp.error.is_none());
        let result = resp.result.unwrap();
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("- Ministère: Économie"));
    }
}
