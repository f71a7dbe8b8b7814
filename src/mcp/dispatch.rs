//! Routes a tool call to the matching template operation.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::templates::TemplateManager;

use super::tools::{CreateTemplateArgs, RenameTemplateArgs, TemplateNameArgs, ToolName};

/// Failures of a tool call that are not reported as text
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Arguments missing or of the wrong shape for the tool
    #[error("Invalid arguments for '{tool}': {source}")]
    InvalidArguments {
        tool: ToolName,
        #[source]
        source: serde_json::Error,
    },

    /// A fault inside the operation
    #[error(transparent)]
    Core(#[from] crate::core::Error),
}

/// A decoded tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    CreateTemplate(CreateTemplateArgs),
    ValidateTemplate(TemplateNameArgs),
    FixTemplateBranches(TemplateNameArgs),
    RenameTemplate(RenameTemplateArgs),
    ListTemplates,
}

impl ToolCall {
    /// Decode the arguments for a known tool
    pub fn decode(tool: ToolName, arguments: Map<String, Value>) -> Result<Self, DispatchError> {
        Ok(match tool {
            ToolName::CreateTemplate => Self::CreateTemplate(decode_args(tool, arguments)?),
            ToolName::ValidateTemplate => Self::ValidateTemplate(decode_args(tool, arguments)?),
            ToolName::FixTemplateBranches => {
                Self::FixTemplateBranches(decode_args(tool, arguments)?)
            }
            ToolName::RenameTemplate => Self::RenameTemplate(decode_args(tool, arguments)?),
            ToolName::ListTemplates => Self::ListTemplates,
        })
    }
}

fn decode_args<T: DeserializeOwned>(
    tool: ToolName,
    arguments: Map<String, Value>,
) -> Result<T, DispatchError> {
    serde_json::from_value(Value::Object(arguments))
        .map_err(|source| DispatchError::InvalidArguments { tool, source })
}

/// Dispatches tool calls by name to a `TemplateManager`
#[derive(Debug, Clone)]
pub struct ToolDispatcher {
    manager: TemplateManager,
}

impl ToolDispatcher {
    pub fn new(manager: TemplateManager) -> Self {
        Self { manager }
    }

    pub fn manager(&self) -> &TemplateManager {
        &self.manager
    }

    /// Run the named tool and return its text result.
    ///
    /// An unknown tool name yields an `Unknown tool` message, not an error.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> Result<String, DispatchError> {
        let tool = match name.parse::<ToolName>() {
            Ok(tool) => tool,
            Err(message) => {
                warn!(tool = %name, "Unknown tool called");
                return Ok(message);
            }
        };

        debug!(tool = %tool, "Dispatching tool call");
        let call = ToolCall::decode(tool, arguments.unwrap_or_default())?;
        self.execute(call).await
    }

    /// Run an already decoded call
    pub async fn execute(&self, call: ToolCall) -> Result<String, DispatchError> {
        let text = match call {
            ToolCall::CreateTemplate(args) => self.manager.create(&args.into()).await?.to_string(),
            ToolCall::ValidateTemplate(args) => {
                self.manager.validate(&args.template_name).await?.to_string()
            }
            ToolCall::FixTemplateBranches(args) => self
                .manager
                .fix_branches(&args.template_name)
                .await?
                .to_string(),
            ToolCall::RenameTemplate(args) => self
                .manager
                .rename(&args.old_name, &args.new_purpose)
                .await?
                .to_string(),
            ToolCall::ListTemplates => self.manager.list().await?.to_string(),
        };
        Ok(text)
    }
}
