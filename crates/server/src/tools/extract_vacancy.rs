//! extract_vacancy tool implementation.
//!
//! Runs a site parser over HTML supplied by the client.
//! No network I/O is performed.

use jobparse_client::{Dispatcher, Site};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::respond;

/// Input parameters for extract_vacancy tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractVacancyParams {
    /// The raw HTML of a vacancy page.
    pub html: String,

    /// URL the page was saved from. Used for `original_id` and, when `site`
    /// is absent, to pick the parser.
    pub url: String,

    /// Parser to use: "hh", "habr" or "getmatch" (domains also accepted).
    #[serde(default)]
    pub site: Option<String>,
}

/// Implementation of the extract_vacancy tool.
pub async fn extract_impl(dispatcher: &Dispatcher, params: ExtractVacancyParams) -> Result<CallToolResult, McpError> {
    let site = params.site.as_deref().map(str::parse::<Site>).transpose()?;
    let record = dispatcher.extract(site, &params.html, &params.url)?;

    respond(record)
}
