//! MCP tool implementations.
//!
//! This module contains all tools exposed by the jobparse server.

pub mod extract_vacancy;
pub mod parse_vacancy;

pub use extract_vacancy::ExtractVacancyParams;
pub use parse_vacancy::ParseVacancyParams;

use jobparse_core::{Error, VacancyRecord, VacancyResponse};
use rmcp::{ErrorData as McpError, model::*};

/// Wrap a record in the success envelope as pretty JSON.
pub(crate) fn respond(record: VacancyRecord) -> Result<CallToolResult, McpError> {
    let response = VacancyResponse::success(record);
    let body = serde_json::to_string_pretty(&response)
        .map_err(|e| Error::ParseFailed(format!("failed to serialize vacancy: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(body)]))
}

#[cfg(test)]
pub(crate) fn response_of(result: &CallToolResult) -> VacancyResponse {
    let content = serde_json::to_value(&result.content[0]).unwrap();
    let text = content
        .get("text")
        .and_then(|v| v.as_str())
        .expect("Expected text field in content");
    serde_json::from_str(text).unwrap()
}
