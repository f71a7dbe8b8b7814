//! Structural rules a template must satisfy, and the fixes for branch drift.

use std::fmt;

use crate::core::standards::TemplateStandards;

use super::document::{BranchChange, TemplateDocument};

/// One way a template deviates from the standards
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// A required file is absent
    MissingFile(String),
    /// `metadata.name` lacks the naming prefix
    NamingConvention { convention: &'static str },
    /// A dispatch step targets a branch other than trunk
    BranchMismatch {
        step_id: String,
        branch: Option<String>,
        expected: &'static str,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFile(path) => write!(f, "❌ Missing required file: {path}"),
            Self::NamingConvention { convention } => {
                write!(f, "❌ Template name doesn't follow '{convention}' convention")
            }
            Self::BranchMismatch {
                step_id,
                branch,
                expected,
            } => write!(
                f,
                "❌ Step '{step_id}' uses branch '{}', should use '{expected}'",
                branch_label(branch.as_deref())
            ),
        }
    }
}

/// A correction made by the fix-branches operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppliedFix {
    /// A dispatch step was moved onto trunk
    Step(BranchChange),
    /// The skeleton workflow now triggers on every policy branch
    WorkflowTriggers,
}

impl fmt::Display for AppliedFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Step(change) => write!(
                f,
                "Fixed step '{}': {} → {}",
                change.step_id,
                branch_label(change.from.as_deref()),
                change.to
            ),
            Self::WorkflowTriggers => write!(f, "Fixed workflow: Added trunk to trigger branches"),
        }
    }
}

fn branch_label(branch: Option<&str>) -> &str {
    branch.unwrap_or("<unset>")
}

/// Check a loaded document's name and dispatch branches.
pub fn check_document(
    document: &TemplateDocument,
    standards: &TemplateStandards,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if !standards.follows_naming(document.name().unwrap_or_default()) {
        issues.push(ValidationIssue::NamingConvention {
            convention: standards.naming_convention,
        });
    }

    let trunk = standards.trunk_branch();
    issues.extend(
        document
            .dispatch_steps()
            .into_iter()
            .filter(|step| step.branch.as_deref() != Some(trunk))
            .map(|step| ValidationIssue::BranchMismatch {
                step_id: step.id,
                branch: step.branch,
                expected: trunk,
            }),
    );

    issues
}

/// Rewrite a workflow that only triggers on the new-project branch.
///
/// Returns the updated content, or `None` when the legacy directive is absent.
pub fn fix_workflow_triggers(content: &str, standards: &TemplateStandards) -> Option<String> {
    let legacy = standards.legacy_trigger_directive();
    content
        .contains(&legacy)
        .then(|| content.replace(&legacy, &standards.trigger_directive()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::standards::STANDARDS;

    fn document(name: &str, branch: &str) -> TemplateDocument {
        TemplateDocument::from_yaml_str(&format!(
            "metadata:\n  name: {name}\nspec:\n  steps:\n  - id: trigger-deployment\n    action: github:actions:dispatch\n    input:\n      branchOrTagName: {branch}\n"
        ))
        .unwrap()
    }

    #[test]
    fn test_clean_document_has_no_issues() {
        assert!(check_document(&document("billpay-demo", "trunk"), &STANDARDS).is_empty());
    }

    #[test]
    fn test_reports_naming_and_branch_issues() {
        let issues = check_document(&document("demo", "main"), &STANDARDS);
        assert_eq!(issues.len(), 2);
        assert_eq!(
            issues[0].to_string(),
            "❌ Template name doesn't follow 'billpay-{purpose}' convention"
        );
        assert_eq!(
            issues[1].to_string(),
            "❌ Step 'trigger-deployment' uses branch 'main', should use 'trunk'"
        );
    }

    #[test]
    fn test_missing_name_violates_convention() {
        let doc = TemplateDocument::from_yaml_str("kind: Template\n").unwrap();
        assert_eq!(
            check_document(&doc, &STANDARDS),
            vec![ValidationIssue::NamingConvention {
                convention: "billpay-{purpose}"
            }]
        );
    }

    #[test]
    fn test_missing_file_display() {
        let issue = ValidationIssue::MissingFile("skeleton/README.md".to_string());
        assert_eq!(
            issue.to_string(),
            "❌ Missing required file: skeleton/README.md"
        );
    }

    #[test]
    fn test_applied_fix_display() {
        let fix = AppliedFix::Step(BranchChange {
            step_id: "trigger-deployment".to_string(),
            from: Some("main".to_string()),
            to: "trunk".to_string(),
        });
        assert_eq!(
            fix.to_string(),
            "Fixed step 'trigger-deployment': main → trunk"
        );
        assert_eq!(
            AppliedFix::WorkflowTriggers.to_string(),
            "Fixed workflow: Added trunk to trigger branches"
        );
    }

    #[test]
    fn test_fix_workflow_triggers() {
        let legacy = "on:\n  push:\n    branches: [main]\n";
        assert_eq!(
            fix_workflow_triggers(legacy, &STANDARDS).as_deref(),
            Some("on:\n  push:\n    branches: [main, trunk]\n")
        );

        let current = "on:\n  push:\n    branches: [main, trunk]\n";
        assert_eq!(fix_workflow_triggers(current, &STANDARDS), None);
    }
}
