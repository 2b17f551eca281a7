//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use crate::tools::{
    ExtractVacancyParams, ParseVacancyParams, extract_vacancy::extract_impl, parse_vacancy::parse_impl,
};

use jobparse_client::{Dispatcher, Site};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for jobparse.
#[derive(Clone)]
pub struct JobParseServer {
    tool_router: ToolRouter<Self>,
    dispatcher: Arc<Dispatcher>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl JobParseServer {
    /// Create a new server handler around a shared dispatcher.
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { tool_router: Self::tool_router(), dispatcher }
    }

    #[tool(
        description = "Parse a vacancy from hh.ru, career.habr.com or getmatch.ru. The site is picked from the URL. Returns the normalized vacancy as JSON."
    )]
    async fn parse_vacancy(&self, params: Parameters<ParseVacancyParams>) -> Result<CallToolResult, McpError> {
        parse_impl(&self.dispatcher, None, params.0).await
    }

    #[tool(description = "Parse a vacancy page from hh.ru. Rejects URLs from other sites without fetching them.")]
    async fn parse_hh_vacancy(&self, params: Parameters<ParseVacancyParams>) -> Result<CallToolResult, McpError> {
        parse_impl(&self.dispatcher, Some(Site::Hh), params.0).await
    }

    #[tool(description = "Parse a vacancy page from career.habr.com. Rejects URLs from other sites without fetching them.")]
    async fn parse_habr_vacancy(&self, params: Parameters<ParseVacancyParams>) -> Result<CallToolResult, McpError> {
        parse_impl(&self.dispatcher, Some(Site::Habr), params.0).await
    }

    #[tool(description = "Parse a vacancy page from getmatch.ru. Rejects URLs from other sites without fetching them.")]
    async fn parse_getmatch_vacancy(&self, params: Parameters<ParseVacancyParams>) -> Result<CallToolResult, McpError> {
        parse_impl(&self.dispatcher, Some(Site::Getmatch), params.0).await
    }

    /// Extract a vacancy from saved HTML.
    ///
    /// No network requests are made.
    #[tool(
        description = "Extract a vacancy from raw HTML of an hh.ru, career.habr.com or getmatch.ru page. No network I/O. Optional `site` overrides URL-based routing."
    )]
    async fn extract_vacancy(&self, params: Parameters<ExtractVacancyParams>) -> Result<CallToolResult, McpError> {
        extract_impl(&self.dispatcher, params.0).await
    }
}

impl ServerHandler for JobParseServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "jobparse".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Vacancy parser for hh.ru, career.habr.com and getmatch.ru. Use parse_vacancy for a URL, extract_vacancy for saved HTML."
                    .into(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
