//! Template management operations.
//!
//! The `TemplateManager` implements the five operations exposed to tool
//! callers: create, validate, fix branches, rename, and list. Each call runs
//! to completion against the filesystem before returning; nothing is cached
//! between calls and there is no locking, so concurrent calls against the
//! same template can interleave their writes.
//!
//! Partial failures are not rolled back. If creating a template fails after
//! its directories were made, they stay behind.

use tokio::fs;
use tracing::{debug, info, warn};

use crate::core::config::ManagerConfig;
use crate::core::error::Result;
use crate::core::standards::{STANDARDS, TEMPLATE_FILE, TemplateStandards, WORKFLOW_FILE};

use super::document::TemplateDocument;
use super::generator::{CreateOptions, generate_template, template_title};
use super::kind::TemplateType;
use super::outcome::{
    CreateOutcome, FixOutcome, ListOutcome, RenameOutcome, TemplateSummary, ValidateOutcome,
};
use super::skeleton::render_skeleton;
use super::store::TemplateStore;
use super::validation::{AppliedFix, ValidationIssue, check_document, fix_workflow_triggers};

/// Arguments of the create operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    /// Purpose suffix; the full name is the naming prefix followed by it
    pub purpose: String,
    /// Requested template type name
    pub template_type: String,
    pub description: String,
    pub options: CreateOptions,
}

/// Manages the templates under one root directory
#[derive(Debug, Clone)]
pub struct TemplateManager {
    store: TemplateStore,
    standards: &'static TemplateStandards,
}

impl TemplateManager {
    /// Create a manager for the configured templates root
    pub fn new(config: &ManagerConfig) -> Self {
        Self {
            store: TemplateStore::new(&config.templates_dir),
            standards: &STANDARDS,
        }
    }

    pub fn store(&self) -> &TemplateStore {
        &self.store
    }

    pub fn standards(&self) -> &'static TemplateStandards {
        self.standards
    }

    /// Create a new template directory with its document and skeleton files.
    pub async fn create(&self, request: &CreateRequest) -> Result<CreateOutcome> {
        let Ok(kind) = request.template_type.parse::<TemplateType>() else {
            warn!(template_type = %request.template_type, "Rejected unknown template type");
            return Ok(CreateOutcome::InvalidType {
                requested: request.template_type.clone(),
                valid: TemplateType::names(),
            });
        };

        let name = self.standards.template_name(&request.purpose);
        if !TemplateStore::is_valid_name(&name) {
            warn!(name = %name, "Rejected template name");
            return Ok(CreateOutcome::InvalidName { name });
        }

        let path = self.store.create_layout(&name).await?;

        let document = generate_template(
            &name,
            &request.purpose,
            kind,
            &request.description,
            &request.options,
        );
        self.store
            .write_file(&name, TEMPLATE_FILE, &document.to_yaml_string()?)
            .await?;

        for file in render_skeleton(&name, kind, &request.options)? {
            self.store.write_file(&name, file.path, &file.content).await?;
        }

        info!(name = %name, template_type = %kind, "Created template");
        Ok(CreateOutcome::Created {
            name,
            path,
            template_type: kind.to_string(),
            description: request.description.clone(),
            steps: kind.config().steps.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Check a template's required files, name, and dispatch branches.
    pub async fn validate(&self, name: &str) -> Result<ValidateOutcome> {
        if !self.exists(name).await? {
            warn!(name = %name, "Template not found for validation");
            return Ok(ValidateOutcome::NotFound {
                name: name.to_string(),
            });
        }

        let mut issues: Vec<ValidationIssue> = self
            .store
            .missing_files(name, self.standards.required_files)
            .await?
            .into_iter()
            .map(|path| ValidationIssue::MissingFile(path.to_string()))
            .collect();

        if let Some(document) = self.store.load_document(name).await? {
            issues.extend(check_document(&document, self.standards));
        }

        debug!(name = %name, issues = issues.len(), "Validated template");
        let name = name.to_string();
        if issues.is_empty() {
            Ok(ValidateOutcome::Valid { name })
        } else {
            Ok(ValidateOutcome::Issues { name, issues })
        }
    }

    /// Move dispatch steps onto trunk and add trunk to the workflow triggers.
    ///
    /// A loaded document is always written back, changed or not.
    pub async fn fix_branches(&self, name: &str) -> Result<FixOutcome> {
        if !self.exists(name).await? {
            warn!(name = %name, "Template not found for branch fix");
            return Ok(FixOutcome::NotFound {
                name: name.to_string(),
            });
        }

        let mut fixes = Vec::new();

        if let Some(mut document) = self.store.load_document(name).await? {
            let changes = document.retarget_dispatch_steps(self.standards.trunk_branch())?;
            fixes.extend(changes.into_iter().map(AppliedFix::Step));
            self.store.save_document(name, &document).await?;
        }

        if let Some(workflow) = self.store.read_file(name, WORKFLOW_FILE).await? {
            if let Some(fixed) = fix_workflow_triggers(&workflow, self.standards) {
                self.store.write_file(name, WORKFLOW_FILE, &fixed).await?;
                fixes.push(AppliedFix::WorkflowTriggers);
            }
        }

        let name = name.to_string();
        if fixes.is_empty() {
            debug!(name = %name, "No branch fixes needed");
            Ok(FixOutcome::NothingToFix { name })
        } else {
            info!(name = %name, fixes = fixes.len(), "Fixed template branches");
            Ok(FixOutcome::Fixed { name, fixes })
        }
    }

    /// Rename a template directory and update its document's name and title.
    ///
    /// Other files that mention the old name, such as the skeleton README,
    /// are not rewritten.
    pub async fn rename(&self, old_name: &str, new_purpose: &str) -> Result<RenameOutcome> {
        if !self.exists(old_name).await? {
            warn!(name = %old_name, "Template not found for rename");
            return Ok(RenameOutcome::NotFound {
                name: old_name.to_string(),
            });
        }

        let new_name = self.standards.template_name(new_purpose);
        if !TemplateStore::is_valid_name(&new_name) {
            warn!(name = %new_name, "Rejected template name");
            return Ok(RenameOutcome::InvalidName { name: new_name });
        }
        if self.store.is_occupied(&new_name).await? {
            warn!(name = %new_name, "Rename target already exists");
            return Ok(RenameOutcome::Conflict { name: new_name });
        }

        self.store.rename(old_name, &new_name).await?;

        if let Some(mut document) = self.store.load_document(&new_name).await? {
            document.set_name(&new_name)?;
            document.set_title(&template_title(new_purpose))?;
            self.store.save_document(&new_name, &document).await?;
        }

        info!(from = %old_name, to = %new_name, "Renamed template");
        Ok(RenameOutcome::Renamed {
            old_name: old_name.to_string(),
            new_name,
        })
    }

    /// Summarize every prefixed template directory holding a readable document.
    ///
    /// Directories whose document is missing or unparseable are skipped.
    pub async fn list(&self) -> Result<ListOutcome> {
        let mut templates = Vec::new();

        for dir_name in self.store.template_names(self.standards.name_prefix).await? {
            let document = match self.store.load_document(&dir_name).await {
                Ok(Some(document)) => document,
                Ok(None) => continue,
                Err(e) => {
                    warn!(name = %dir_name, error = %e, "Skipping template with unreadable document");
                    continue;
                }
            };
            templates.push(self.summarize(&dir_name, &document).await?);
        }

        debug!(count = templates.len(), "Listed templates");
        Ok(ListOutcome { templates })
    }

    async fn summarize(&self, dir_name: &str, document: &TemplateDocument) -> Result<TemplateSummary> {
        let path = fs::canonicalize(self.store.template_dir(dir_name)).await?;
        Ok(TemplateSummary {
            name: document.name().unwrap_or(dir_name).to_string(),
            title: document.title().unwrap_or("No title").to_string(),
            description: document.description().unwrap_or("No description").to_string(),
            path,
            steps: document.step_count(),
        })
    }

    async fn exists(&self, name: &str) -> Result<bool> {
        if !TemplateStore::is_valid_name(name) {
            return Ok(false);
        }
        self.store.is_template_dir(name).await
    }
}
