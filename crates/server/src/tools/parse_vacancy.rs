//! parse_vacancy tool family.
//!
//! Fetches a vacancy page and returns the normalized record. The generic tool
//! routes by domain; the per-site tools pin the parser and reject URLs from
//! other sites before any request is made.

use jobparse_client::{Dispatcher, Site};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::respond;

/// Input parameters for the parse_*vacancy tools.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ParseVacancyParams {
    /// Absolute URL of the vacancy page.
    pub url: String,
}

/// Implementation of the parse_vacancy tools. `site` pins the parser.
pub async fn parse_impl(
    dispatcher: &Dispatcher, site: Option<Site>, params: ParseVacancyParams,
) -> Result<CallToolResult, McpError> {
    let url = params.url.as_str();

    let result = match site {
        Some(site) => dispatcher.parse_site(site, url).await,
        None => dispatcher.parse(url).await,
    };

    let record = result.inspect_err(|e| {
        tracing::warn!(
            url,
            status = e.http_status(),
            validation = e.is_validation(),
            error = %e,
            "vacancy parse failed"
        );
    })?;

    respond(record)
}
