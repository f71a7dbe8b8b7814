//! MCP tool surface for the template manager
//!
//! Advertises the five template operations as MCP tools and routes calls to
//! the [`TemplateManager`](crate::core::templates::TemplateManager).

pub mod dispatch;
pub mod server;
pub mod tools;

// Re-exports
pub use dispatch::{DispatchError, ToolCall, ToolDispatcher};
pub use server::{TemplateManagerServer, rmcp_tools};
pub use tools::{ToolDefinition, ToolName, tool_definitions};
