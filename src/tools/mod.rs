//! MCP tools implementation
//!
//! Each tool has a synchronous `execute_*` shared by the CLI and MCP, and an
//! async `handle_*` that parses MCP arguments and runs it under a timeout.

pub mod search;
pub mod show;
pub mod tags;

use crate::error::AppError;
use crate::mcp::{McpResponse, ToolResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::{timeout, Duration};

/// Upper bound on a single tool call
pub const TOOL_TIMEOUT: Duration = Duration::from_secs(120);

/// Run tool work on the blocking pool, bounded by [`TOOL_TIMEOUT`]
pub async fn run_with_timeout<T, F>(work: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
{
    match timeout(TOOL_TIMEOUT, tokio::task::spawn_blocking(work)).await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => Err(AppError::Internal(format!("Tool task failed: {}", e))),
        Err(_) => Err(AppError::Timeout(format!(
            "Request exceeded {} second timeout",
            TOOL_TIMEOUT.as_secs()
        ))),
    }
}

/// Parse MCP tool arguments into the shared argument struct.
///
/// Missing arguments are read as an empty object.
pub(crate) fn parse_args<A: DeserializeOwned>(args: Value) -> Result<A, AppError> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| AppError::InvalidInput(format!("Invalid arguments: {}", e)))
}

/// Failure to render our own output is a server fault, not bad input
pub(crate) fn output_error(what: &'static str) -> impl Fn(serde_json::Error) -> AppError {
    move |e| AppError::Internal(format!("Failed to serialize {}: {}", what, e))
}

/// Turn a tool outcome into a JSON-RPC response
pub(crate) fn respond(id: Option<Value>, result: Result<ToolResult, AppError>) -> McpResponse {
    let value = result
        .and_then(|content| serde_json::to_value(content).map_err(output_error("tool result")));
    match value {
        Ok(value) => McpResponse::success(id, value),
        Err(e) => McpResponse::error(id, e.error_code(), &e.message()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_with_timeout_passes_results_through() {
        assert_eq!(run_with_timeout(|| Ok(7)).await.unwrap(), 7);

        let err = run_with_timeout(|| Err::<(), _>(AppError::NotFound("x".to_string())))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_run_with_timeout_reports_panics() {
        let err = run_with_timeout(|| -> Result<(), AppError> { panic!("boom") })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn test_output_error_is_internal() {
        let json_error = serde_json::from_str::<Value>("{").unwrap_err();
        let err = output_error("results")(json_error);
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.error_code(), "internal_error");
        assert!(err.message().contains("Failed to serialize results"));
    }

    #[test]
    fn test_respond() {
        let resp = respond(Some(Value::from(1)), Ok(ToolResult::text("ok")));
        assert!(resp.error.is_none());
        assert_eq!(resp.result.unwrap()["content"][0]["text"], "ok");

        let resp = respond(None, Err(AppError::InvalidInput("bad".to_string())));
        let error = resp.error.unwrap();
        assert_eq!(error.code, "invalid_input");
        assert_eq!(error.message, "Invalid input: bad");
    }
}
