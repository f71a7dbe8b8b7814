//! Companion files rendered into a new template's `skeleton/` directory.
//!
//! The Tera sources are embedded in the binary. Backstage's own
//! `${{ values.* }}` placeholders are passed in as context values so they
//! survive rendering verbatim.

use serde::Serialize;
use tera::{Context, Tera};

use crate::core::error::Result;
use crate::core::standards::{STANDARDS, WORKFLOW_FILE};

use super::generator::{CreateOptions, GITHUB_OWNER, IAC_REPO};
use super::kind::TemplateType;

const CATALOG_INFO: (&str, &str) = (
    "skeleton/catalog-info.yaml",
    include_str!("../../../templates/skeleton/catalog-info.yaml.tera"),
);
const README: (&str, &str) = (
    "skeleton/README.md",
    include_str!("../../../templates/skeleton/README.md.tera"),
);
const WORKFLOW: (&str, &str) = (
    WORKFLOW_FILE,
    include_str!("../../../templates/skeleton/deploy.yml.tera"),
);

/// A rendered companion file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkeletonFile {
    /// Path relative to the template directory
    pub path: &'static str,
    pub content: String,
}

#[derive(Serialize)]
struct SkeletonContext<'a> {
    template_name: &'a str,
    purpose: &'static str,
    name_ref: &'static str,
    deployment_type_ref: &'static str,
    deployment_types: Vec<String>,
    github_owner: &'static str,
    iac_repo: &'static str,
    owner_team: &'static str,
    trigger_directive: String,
}

/// Render the catalog descriptor, README, and CI workflow for a template.
pub fn render_skeleton(
    template_name: &str,
    kind: TemplateType,
    options: &CreateOptions,
) -> Result<Vec<SkeletonFile>> {
    let mut tera = Tera::default();
    for (path, source) in [CATALOG_INFO, README, WORKFLOW] {
        tera.add_raw_template(path, source)?;
    }

    let context = Context::from_serialize(SkeletonContext {
        template_name,
        purpose: kind.config().purpose,
        name_ref: "${{ values.name }}",
        deployment_type_ref: "${{ values.deployment_type }}",
        deployment_types: options.deployment_type_choices(),
        github_owner: GITHUB_OWNER,
        iac_repo: IAC_REPO,
        owner_team: "platform-team",
        trigger_directive: STANDARDS.trigger_directive(),
    })?;

    [CATALOG_INFO, README, WORKFLOW]
        .into_iter()
        .map(|(path, _)| -> Result<SkeletonFile> {
            Ok(SkeletonFile {
                path,
                content: tera.render(path, &context)?,
            })
        })
        .collect()
}
