//! The `template.yaml` document.
//!
//! Two views of the same file live here. [`GeneratedTemplate`] is the typed
//! shape written when a template is created; its field order is the order the
//! file is written in. [`TemplateDocument`] is the loaded form used by every
//! other operation: it keeps the raw YAML mapping so that edits touch only the
//! fields they mean to and everything else round-trips untouched.

use std::path::Path;

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use tokio::fs;
use tracing::debug;

use crate::core::error::{Error, Result};
use crate::core::standards::{BRANCH_INPUT, DISPATCH_ACTION};

/// Typed `template.yaml` as produced by the create operation
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTemplate {
    pub api_version: String,
    pub kind: String,
    pub metadata: TemplateMetadata,
    pub spec: TemplateSpec,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TemplateMetadata {
    pub name: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TemplateSpec {
    pub owner: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub parameters: Vec<ParameterGroup>,
    pub steps: Vec<Step>,
    pub output: TemplateOutput,
}

/// One page of the scaffolder form
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ParameterGroup {
    pub title: String,
    pub required: Vec<String>,
    pub properties: ProjectProperties,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProjectProperties {
    pub name: Property,
    pub deployment_type: Property,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_names: Option<Vec<String>>,
}

/// One scaffolder step
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Step {
    pub id: String,
    pub name: String,
    /// Guard expression; the step only runs when it evaluates true
    #[serde(rename = "if", skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    pub action: String,
    pub input: StepInput,
}

/// Inputs of the four standard step actions
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum StepInput {
    Fetch(FetchInput),
    Publish(PublishInput),
    Register(RegisterInput),
    Dispatch(DispatchInput),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FetchInput {
    pub url: String,
    pub values: FetchValues,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FetchValues {
    pub name: String,
    pub deployment_type: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublishInput {
    pub description: String,
    pub repo_url: String,
    pub default_branch: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub repo_contents_url: String,
    pub catalog_info_path: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DispatchInput {
    pub repo_url: String,
    pub branch_or_tag_name: String,
    pub workflow_id: String,
    pub workflow_inputs: WorkflowInputs,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WorkflowInputs {
    pub project_name: String,
    pub environment: String,
    pub deployment_type: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TemplateOutput {
    pub links: Vec<OutputLink>,
}

/// A link shown after the template runs
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutputLink {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_ref: Option<String>,
}

impl GeneratedTemplate {
    /// Serialize in declaration order
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// A dispatch step as found in a loaded document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchStep {
    pub id: String,
    /// Branch the step targets, `None` when unset
    pub branch: Option<String>,
}

/// A dispatch step moved onto another branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchChange {
    pub step_id: String,
    pub from: Option<String>,
    pub to: String,
}

/// A `template.yaml` loaded for reading or in-place editing
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDocument {
    root: Mapping,
}

impl TemplateDocument {
    /// Parse a document; the top level must be a mapping.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        match serde_yaml::from_str::<Value>(content)? {
            Value::Mapping(root) => Ok(Self { root }),
            other => Err(Error::document(format!(
                "expected a mapping at the top level, found {}",
                value_kind(&other)
            ))),
        }
    }

    /// Load a document from disk.
    pub async fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Reading template document");
        let content = fs::read_to_string(path).await?;
        Self::from_yaml_str(&content)
    }

    /// Serialize the document, keeping the original field order.
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.root)?)
    }

    /// Overwrite the file at `path` with this document.
    pub async fn save(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "Writing template document");
        fs::write(path, self.to_yaml_string()?).await?;
        Ok(())
    }

    pub fn name(&self) -> Option<&str> {
        self.metadata_str("name")
    }

    pub fn title(&self) -> Option<&str> {
        self.metadata_str("title")
    }

    pub fn description(&self) -> Option<&str> {
        self.metadata_str("description")
    }

    pub fn set_name(&mut self, name: &str) -> Result<()> {
        self.metadata_mut()?
            .insert(Value::from("name"), Value::from(name));
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) -> Result<()> {
        self.metadata_mut()?
            .insert(Value::from("title"), Value::from(title));
        Ok(())
    }

    /// Number of entries in `spec.steps`
    pub fn step_count(&self) -> usize {
        self.steps().map_or(0, |steps| steps.len())
    }

    /// Steps whose action dispatches a deployment workflow, in document order
    pub fn dispatch_steps(&self) -> Vec<DispatchStep> {
        self.steps()
            .into_iter()
            .flatten()
            .filter(|step| is_dispatch(step))
            .map(|step| DispatchStep {
                id: step_id(step),
                branch: step
                    .get("input")
                    .and_then(|input| input.get(BRANCH_INPUT))
                    .and_then(scalar_text),
            })
            .collect()
    }

    /// Point every dispatch step that is not on `branch` at it.
    ///
    /// Returns one change per rewritten step; steps already on `branch` are left alone.
    pub fn retarget_dispatch_steps(&mut self, branch: &str) -> Result<Vec<BranchChange>> {
        let mut changes = Vec::new();
        let Some(steps) = self.steps_mut() else {
            return Ok(changes);
        };

        for step in steps.iter_mut().filter(|step| is_dispatch(step)) {
            let id = step_id(step);
            let Value::Mapping(step) = step else {
                continue;
            };
            let input = step
                .entry(Value::from("input"))
                .or_insert_with(|| Value::Mapping(Mapping::new()));
            if input.is_null() {
                *input = Value::Mapping(Mapping::new());
            }
            let Value::Mapping(input) = input else {
                return Err(Error::document(format!(
                    "input of step '{id}' is not a mapping"
                )));
            };

            let current = input.get(BRANCH_INPUT).and_then(scalar_text);
            if current.as_deref() == Some(branch) {
                continue;
            }
            input.insert(Value::from(BRANCH_INPUT), Value::from(branch));
            changes.push(BranchChange {
                step_id: id,
                from: current,
                to: branch.to_string(),
            });
        }

        Ok(changes)
    }

    fn metadata_str(&self, key: &str) -> Option<&str> {
        self.root.get("metadata")?.get(key)?.as_str()
    }

    fn metadata_mut(&mut self) -> Result<&mut Mapping> {
        let metadata = self
            .root
            .entry(Value::from("metadata"))
            .or_insert_with(|| Value::Mapping(Mapping::new()));
        if metadata.is_null() {
            *metadata = Value::Mapping(Mapping::new());
        }
        metadata
            .as_mapping_mut()
            .ok_or_else(|| Error::document("metadata is not a mapping"))
    }

    fn steps(&self) -> Option<&Vec<Value>> {
        self.root.get("spec")?.get("steps")?.as_sequence()
    }

    fn steps_mut(&mut self) -> Option<&mut Vec<Value>> {
        self.root
            .get_mut("spec")?
            .get_mut("steps")?
            .as_sequence_mut()
    }
}

fn is_dispatch(step: &Value) -> bool {
    step.get("action").and_then(Value::as_str) == Some(DISPATCH_ACTION)
}

fn step_id(step: &Value) -> String {
    step.get("id").and_then(scalar_text).unwrap_or_default()
}

/// Text of a scalar value; `None` for null and collections
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "an empty document",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
