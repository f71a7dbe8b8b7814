//! Template type definitions.
//!
//! Each template type fixes which scaffolder steps a new template gets,
//! whether it provisions a fresh GitHub repository, and which workflow in the
//! infrastructure repository deploys it.
//!
//! # Examples
//!
//! ```
//! use template_manager::core::templates::TemplateType;
//! use std::str::FromStr;
//!
//! let kind = TemplateType::from_str("complete-stack").unwrap();
//! assert_eq!(kind, TemplateType::CompleteStack);
//! assert_eq!(kind.to_string(), "complete-stack");
//! assert!(!kind.config().creates_repo);
//! ```

use std::fmt;
use std::str::FromStr;

/// Static configuration of one template type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateTypeConfig {
    /// What templates of this type are for
    pub purpose: &'static str,
    /// Step identifiers the type includes
    pub steps: &'static [&'static str],
    /// Whether the template publishes a new repository
    pub creates_repo: bool,
    /// Workflow file dispatched in the infrastructure repository
    pub deployment_target: &'static str,
}

impl TemplateTypeConfig {
    /// Whether the type includes the given step
    pub fn has_step(&self, step: &str) -> bool {
        self.steps.contains(&step)
    }
}

/// Supported template types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateType {
    /// New repository with basic deployment
    RepositoryCreation,
    /// Deployment without EKS
    SimpleDeployment,
    /// Multi-cloud deployment onto an existing repository
    CompleteStack,
}

static REPOSITORY_CREATION: TemplateTypeConfig = TemplateTypeConfig {
    purpose: "Create new repository with basic deployment",
    steps: &["fetch", "publish", "register", "trigger-deployment"],
    creates_repo: true,
    deployment_target: "deploy-demo.yml",
};

static SIMPLE_DEPLOYMENT: TemplateTypeConfig = TemplateTypeConfig {
    purpose: "Simple deployment without EKS (S3, Lambda, etc)",
    steps: &["fetch", "publish", "register", "trigger-deployment"],
    creates_repo: true,
    deployment_target: "deploy-simple.yml",
};

static COMPLETE_STACK: TemplateTypeConfig = TemplateTypeConfig {
    purpose: "Full multi-cloud deployment with EKS/GKE/AKS",
    steps: &["trigger-deployment", "register"],
    creates_repo: false,
    deployment_target: "deploy-complete.yml",
};

impl TemplateType {
    /// Returns the type name as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RepositoryCreation => "repository-creation",
            Self::SimpleDeployment => "simple-deployment",
            Self::CompleteStack => "complete-stack",
        }
    }

    /// Returns the static configuration for this type
    pub fn config(&self) -> &'static TemplateTypeConfig {
        match self {
            Self::RepositoryCreation => &REPOSITORY_CREATION,
            Self::SimpleDeployment => &SIMPLE_DEPLOYMENT,
            Self::CompleteStack => &COMPLETE_STACK,
        }
    }

    /// Returns an iterator over all template types in registry order
    pub fn all() -> impl Iterator<Item = Self> {
        use TemplateType::*;
        [RepositoryCreation, SimpleDeployment, CompleteStack]
            .iter()
            .copied()
    }

    /// Names of all template types in registry order
    pub fn names() -> Vec<&'static str> {
        Self::all().map(|kind| kind.as_str()).collect()
    }
}

impl FromStr for TemplateType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown template type: {s}"))
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_as_str_and_display() {
        assert_eq!(TemplateType::RepositoryCreation.as_str(), "repository-creation");
        assert_eq!(
            format!("{}", TemplateType::SimpleDeployment),
            "simple-deployment"
        );
        assert_eq!(TemplateType::CompleteStack.to_string(), "complete-stack");
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "repository-creation".parse::<TemplateType>().unwrap(),
            TemplateType::RepositoryCreation
        );
        assert_eq!(
            "complete-stack".parse::<TemplateType>().unwrap(),
            TemplateType::CompleteStack
        );

        // Type names are matched exactly
        assert!("Complete-Stack".parse::<TemplateType>().is_err());
        assert!("microservice".parse::<TemplateType>().is_err());
    }

    #[test]
    fn test_all_is_unique_and_ordered() {
        let unique: HashSet<_> = TemplateType::all().collect();
        assert_eq!(unique.len(), 3);
        assert_eq!(
            TemplateType::names(),
            vec!["repository-creation", "simple-deployment", "complete-stack"]
        );
    }

    #[test]
    fn test_configs() {
        let complete = TemplateType::CompleteStack.config();
        assert!(!complete.creates_repo);
        assert!(complete.has_step("register"));
        assert!(!complete.has_step("fetch"));
        assert_eq!(complete.deployment_target, "deploy-complete.yml");

        let simple = TemplateType::SimpleDeployment.config();
        assert!(simple.creates_repo);
        assert_eq!(simple.steps.len(), 4);
        assert_eq!(simple.deployment_target, "deploy-simple.yml");
    }
}
