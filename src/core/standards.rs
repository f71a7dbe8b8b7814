//! BillPay template standards.
//!
//! Every template managed by this crate is held to one fixed set of rules:
//! its name carries the `billpay-` prefix, a handful of files must exist in
//! its directory, and deployment dispatch steps must target the trunk branch
//! of the infrastructure repository.

/// Branch assignments for the repositories templates interact with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchPolicy {
    /// Named contexts mapped to the branch they must use
    pub contexts: &'static [(&'static str, &'static str)],
    /// Branches that trigger skeleton CI workflows
    pub workflow_triggers: &'static [&'static str],
}

impl BranchPolicy {
    /// Branch configured for a named context
    pub fn branch_for(&self, context: &str) -> Option<&'static str> {
        self.contexts
            .iter()
            .find(|(name, _)| *name == context)
            .map(|(_, branch)| *branch)
    }
}

/// Naming, layout, and branch rules shared by all templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateStandards {
    /// Human-readable naming pattern
    pub naming_convention: &'static str,
    /// Prefix every template name must start with
    pub name_prefix: &'static str,
    /// Files that must exist, relative to the template directory
    pub required_files: &'static [&'static str],
    /// Form parameters BillPay templates are expected to collect. Informational
    /// only; no operation checks a template's parameters against it.
    pub standard_parameters: &'static [&'static str],
    /// Step identifiers in the order generated templates emit them
    pub standard_steps: &'static [&'static str],
    pub branch_policy: BranchPolicy,
}

/// Document file name inside a template directory
pub const TEMPLATE_FILE: &str = "template.yaml";

/// CI workflow path inside a template directory
pub const WORKFLOW_FILE: &str = "skeleton/.github/workflows/deploy.yml";

/// Action identifier of deployment dispatch steps
pub const DISPATCH_ACTION: &str = "github:actions:dispatch";

/// Input key holding the branch a dispatch step targets
pub const BRANCH_INPUT: &str = "branchOrTagName";

/// Branch policy context of the infrastructure repository
const IAC_CONTEXT: &str = "ia_ops_iac";

pub static STANDARDS: TemplateStandards = TemplateStandards {
    naming_convention: "billpay-{purpose}",
    name_prefix: "billpay-",
    required_files: &[
        TEMPLATE_FILE,
        "skeleton/catalog-info.yaml",
        "skeleton/README.md",
        WORKFLOW_FILE,
    ],
    standard_parameters: &["name", "deployment_type", "environment"],
    standard_steps: &["fetch", "publish", "register", "trigger-deployment"],
    branch_policy: BranchPolicy {
        contexts: &[(IAC_CONTEXT, "trunk"), ("new_projects", "main")],
        workflow_triggers: &["main", "trunk"],
    },
};

impl TemplateStandards {
    /// Full template name for a purpose suffix
    pub fn template_name(&self, purpose: &str) -> String {
        format!("{}{}", self.name_prefix, purpose)
    }

    /// Whether a name follows the naming convention
    pub fn follows_naming(&self, name: &str) -> bool {
        name.starts_with(self.name_prefix)
    }

    /// Branch that deployment dispatch steps must target
    pub fn trunk_branch(&self) -> &'static str {
        self.branch_policy.branch_for(IAC_CONTEXT).unwrap_or("trunk")
    }

    /// Branch new project repositories are published with
    pub fn new_project_branch(&self) -> &'static str {
        self.branch_policy
            .branch_for("new_projects")
            .unwrap_or("main")
    }

    /// Workflow trigger directive listing only the new-project branch
    pub fn legacy_trigger_directive(&self) -> String {
        format!("branches: [{}]", self.new_project_branch())
    }

    /// Workflow trigger directive listing every trigger branch
    pub fn trigger_directive(&self) -> String {
        format!(
            "branches: [{}]",
            self.branch_policy.workflow_triggers.join(", ")
        )
    }
}
