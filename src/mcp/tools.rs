//! Tool catalog: names, descriptions, input schemas, and argument types.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::core::templates::{CreateOptions, CreateRequest, TemplateType};

/// The operations exposed as tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    CreateTemplate,
    ValidateTemplate,
    FixTemplateBranches,
    RenameTemplate,
    ListTemplates,
}

impl ToolName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateTemplate => "create_template",
            Self::ValidateTemplate => "validate_template",
            Self::FixTemplateBranches => "fix_template_branches",
            Self::RenameTemplate => "rename_template",
            Self::ListTemplates => "list_templates",
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        use ToolName::*;
        [
            CreateTemplate,
            ValidateTemplate,
            FixTemplateBranches,
            RenameTemplate,
            ListTemplates,
        ]
        .iter()
        .copied()
    }
}

impl FromStr for ToolName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| format!("Unknown tool: {s}"))
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tool as advertised to clients
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: ToolName,
    pub description: &'static str,
    /// JSON Schema of the arguments object
    pub input_schema: Map<String, Value>,
}

fn object_schema(schema: Value) -> Map<String, Value> {
    match schema {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

static TOOL_DEFINITIONS: Lazy<Vec<ToolDefinition>> = Lazy::new(|| {
    let defaults = CreateOptions::default();
    let template_name_only = |description: &str| {
        object_schema(json!({
            "type": "object",
            "properties": {
                "template_name": {"type": "string", "description": description}
            },
            "required": ["template_name"]
        }))
    };

    vec![
        ToolDefinition {
            name: ToolName::CreateTemplate,
            description: "Create a new Backstage template following BillPay standards",
            input_schema: object_schema(json!({
                "type": "object",
                "properties": {
                    "template_name": {
                        "type": "string",
                        "description": "Template name (without billpay- prefix)"
                    },
                    "template_type": {
                        "type": "string",
                        "enum": TemplateType::names()
                    },
                    "description": {
                        "type": "string",
                        "description": "Template description"
                    },
                    "cloud_providers": {
                        "type": "array",
                        "items": {"type": "string"},
                        "default": defaults.cloud_providers
                    },
                    "deployment_types": {
                        "type": "array",
                        "items": {"type": "string"},
                        "default": defaults.deployment_types
                    }
                },
                "required": ["template_name", "template_type", "description"]
            })),
        },
        ToolDefinition {
            name: ToolName::ValidateTemplate,
            description: "Validate existing template against BillPay standards",
            input_schema: template_name_only("Template name to validate"),
        },
        ToolDefinition {
            name: ToolName::FixTemplateBranches,
            description: "Fix branch inconsistencies in template",
            input_schema: template_name_only("Template name to fix"),
        },
        ToolDefinition {
            name: ToolName::RenameTemplate,
            description: "Rename template following naming conventions",
            input_schema: object_schema(json!({
                "type": "object",
                "properties": {
                    "old_name": {"type": "string", "description": "Current template name"},
                    "new_purpose": {"type": "string", "description": "New purpose for naming"}
                },
                "required": ["old_name", "new_purpose"]
            })),
        },
        ToolDefinition {
            name: ToolName::ListTemplates,
            description: "List all templates with their status and configuration",
            input_schema: object_schema(json!({"type": "object", "properties": {}})),
        },
    ]
});

/// All tools, in the order they are advertised
pub fn tool_definitions() -> &'static [ToolDefinition] {
    &TOOL_DEFINITIONS
}

fn default_cloud_providers() -> Vec<String> {
    CreateOptions::default().cloud_providers
}

fn default_deployment_types() -> Vec<String> {
    CreateOptions::default().deployment_types
}

/// Arguments of `create_template`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTemplateArgs {
    /// Purpose suffix, without the naming prefix
    pub template_name: String,
    pub template_type: String,
    pub description: String,
    #[serde(default = "default_cloud_providers")]
    pub cloud_providers: Vec<String>,
    #[serde(default = "default_deployment_types")]
    pub deployment_types: Vec<String>,
}

impl From<CreateTemplateArgs> for CreateRequest {
    fn from(args: CreateTemplateArgs) -> Self {
        Self {
            purpose: args.template_name,
            template_type: args.template_type,
            description: args.description,
            options: CreateOptions {
                cloud_providers: args.cloud_providers,
                deployment_types: args.deployment_types,
            },
        }
    }
}

/// Arguments of `validate_template` and `fix_template_branches`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateNameArgs {
    pub template_name: String,
}

/// Arguments of `rename_template`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RenameTemplateArgs {
    pub old_name: String,
    pub new_purpose: String,
}
