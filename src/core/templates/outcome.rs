//! Results of the template operations.
//!
//! Each operation returns one of these values rather than an error for the
//! cases a caller is expected to hit (unknown template, bad type, name
//! conflict). Their `Display` output is the text returned to tool callers.

use std::fmt;
use std::path::PathBuf;

use super::validation::{AppliedFix, ValidationIssue};

fn invalid_name(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    write!(
        f,
        "❌ Invalid template name '{name}': it must be a single directory name"
    )
}

fn not_found(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    write!(f, "❌ Template '{name}' not found")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created {
        name: String,
        path: PathBuf,
        template_type: String,
        description: String,
        steps: Vec<String>,
    },
    InvalidType {
        requested: String,
        valid: Vec<&'static str>,
    },
    InvalidName {
        name: String,
    },
}

impl fmt::Display for CreateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created {
                name,
                path,
                template_type,
                description,
                steps,
            } => write!(
                f,
                "✅ Template '{name}' created successfully\n\
                 📁 Path: {}\n\
                 🎯 Type: {template_type}\n\
                 📝 Description: {description}\n\
                 🔧 Steps: {}",
                path.display(),
                steps.join(", ")
            ),
            Self::InvalidType { requested, valid } => write!(
                f,
                "❌ Invalid template type '{requested}'. Use: {}",
                valid.join(", ")
            ),
            Self::InvalidName { name } => invalid_name(f, name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidateOutcome {
    NotFound { name: String },
    Valid { name: String },
    Issues {
        name: String,
        issues: Vec<ValidationIssue>,
    },
}

impl ValidateOutcome {
    /// Issues found, empty unless the template was checked and failed
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Self::Issues { issues, .. } => issues,
            _ => &[],
        }
    }
}

impl fmt::Display for ValidateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { name } => not_found(f, name),
            Self::Valid { name } => write!(f, "✅ Template '{name}' is valid"),
            Self::Issues { name, issues } => {
                write!(f, "⚠️ Template '{name}' has issues:")?;
                for issue in issues {
                    write!(f, "\n{issue}")?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixOutcome {
    NotFound { name: String },
    Fixed {
        name: String,
        fixes: Vec<AppliedFix>,
    },
    NothingToFix { name: String },
}

impl fmt::Display for FixOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { name } => not_found(f, name),
            Self::Fixed { name, fixes } => {
                write!(f, "✅ Fixed branches in '{name}':")?;
                for fix in fixes {
                    write!(f, "\n{fix}")?;
                }
                Ok(())
            }
            Self::NothingToFix { name } => write!(f, "✅ No branch fixes needed for '{name}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    NotFound { name: String },
    Conflict { name: String },
    InvalidName { name: String },
    Renamed { old_name: String, new_name: String },
}

impl fmt::Display for RenameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { name } => not_found(f, name),
            Self::Conflict { name } => write!(f, "❌ Template '{name}' already exists"),
            Self::InvalidName { name } => invalid_name(f, name),
            Self::Renamed { old_name, new_name } => {
                write!(f, "✅ Template renamed: '{old_name}' → '{new_name}'")
            }
        }
    }
}

/// Summary of one template for listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSummary {
    pub name: String,
    pub title: String,
    pub description: String,
    pub path: PathBuf,
    pub steps: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOutcome {
    pub templates: Vec<TemplateSummary>,
}

impl fmt::Display for ListOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.templates.is_empty() {
            return write!(f, "No BillPay templates found");
        }

        writeln!(f, "📋 BillPay Templates:")?;
        for template in &self.templates {
            write!(
                f,
                "\n🎭 **{}**\n   🏷️ {}\n   📝 {}\n   🔧 {} steps\n   📁 {}\n",
                template.name,
                template.title,
                template.description,
                template.steps,
                template.path.display()
            )?;
        }
        Ok(())
    }
}
