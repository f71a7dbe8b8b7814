//! MCP server exposing the template tools over rmcp.

use std::sync::Arc;

use rmcp::{
    Error as McpError, RoleServer, ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
};
use tracing::{error, info};

use super::dispatch::{DispatchError, ToolDispatcher};
use super::tools::tool_definitions;

/// The five template tools as rmcp tool descriptors
pub fn rmcp_tools() -> Vec<Tool> {
    tool_definitions()
        .iter()
        .map(|definition| {
            Tool::new(
                definition.name.as_str(),
                definition.description,
                Arc::new(definition.input_schema.clone()),
            )
        })
        .collect()
}

impl From<DispatchError> for McpError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::InvalidArguments { .. } => McpError::invalid_params(err.to_string(), None),
            DispatchError::Core(_) => McpError::internal_error(err.to_string(), None),
        }
    }
}

/// MCP handler that serves tool calls from a `ToolDispatcher`
#[derive(Debug, Clone)]
pub struct TemplateManagerServer {
    dispatcher: Arc<ToolDispatcher>,
}

impl TemplateManagerServer {
    pub fn new(dispatcher: ToolDispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }
}

impl ServerHandler for TemplateManagerServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "Manage BillPay Backstage templates: create, validate, fix branches, rename, and list."
                    .to_string(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: PaginatedRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            next_cursor: None,
            tools: rmcp_tools(),
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        info!(tool = %request.name, "Tool call received");
        match self
            .dispatcher
            .call(&request.name, request.arguments)
            .await
        {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => {
                error!(tool = %request.name, error = %e, "Tool call failed");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::tools::ToolName;
    use rmcp::model::ErrorCode;

    #[test]
    fn test_rmcp_tools_match_catalog() {
        let tools = rmcp_tools();
        let names: Vec<_> = tools.iter().map(|t| t.name.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "create_template",
                "validate_template",
                "fix_template_branches",
                "rename_template",
                "list_templates"
            ]
        );
        assert!(tools[0].input_schema.contains_key("properties"));
    }

    #[test]
    fn test_server_info_enables_tools() {
        let server = TemplateManagerServer::new(ToolDispatcher::new(
            crate::core::templates::TemplateManager::new(&crate::core::config::ManagerConfig::new(
                "templates",
            )),
        ));
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert_eq!(info.server_info.name, "template-manager");
    }

    #[test]
    fn test_invalid_arguments_map_to_invalid_params() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: McpError = DispatchError::InvalidArguments {
            tool: ToolName::ValidateTemplate,
            source,
        }
        .into();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.starts_with("Invalid arguments for 'validate_template'"));
    }

    #[test]
    fn test_core_faults_map_to_internal_error() {
        let err: McpError = DispatchError::Core(crate::core::Error::document("x")).into();
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert_eq!(err.message, "Document error: x");
    }
}
