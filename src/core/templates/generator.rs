//! Builds the `template.yaml` structure for a new template.
//!
//! Steps are emitted in the standard step order (fetch, publish, register,
//! trigger-deployment), each only when the template type lists it. The order
//! of the type's own step list does not matter.

use crate::core::standards::{DISPATCH_ACTION, STANDARDS};
use crate::core::utils::purpose_to_title;

use super::document::{
    DispatchInput, FetchInput, FetchValues, GeneratedTemplate, OutputLink, ParameterGroup,
    ProjectProperties, Property, PublishInput, RegisterInput, Step, StepInput, TemplateMetadata,
    TemplateOutput, TemplateSpec, WorkflowInputs,
};
use super::kind::{TemplateType, TemplateTypeConfig};

/// GitHub account that owns published repositories
pub const GITHUB_OWNER: &str = "giovanemere";

/// Infrastructure repository that runs deployments
pub const IAC_REPO: &str = "ia-ops-iac";

/// Environment every dispatched deployment targets
pub const DEPLOY_ENVIRONMENT: &str = "demo";

const OWNER_TEAM: &str = "platform-team";

/// Options for a new template that have defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOptions {
    pub cloud_providers: Vec<String>,
    pub deployment_types: Vec<String>,
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self {
            cloud_providers: vec!["aws".to_string()],
            deployment_types: default_deployment_types(),
        }
    }
}

impl CreateOptions {
    /// Deployment types offered to users, falling back to the defaults when none were given
    pub fn deployment_type_choices(&self) -> Vec<String> {
        if self.deployment_types.is_empty() {
            default_deployment_types()
        } else {
            self.deployment_types.clone()
        }
    }
}

fn default_deployment_types() -> Vec<String> {
    vec!["simulation".to_string(), "real-aws-oidc".to_string()]
}

/// Display title for a purpose suffix
pub fn template_title(purpose: &str) -> String {
    format!("BillPay {}", purpose_to_title(purpose))
}

/// Build the full document for a new template named `name`.
pub fn generate_template(
    name: &str,
    purpose: &str,
    kind: TemplateType,
    description: &str,
    options: &CreateOptions,
) -> GeneratedTemplate {
    let config = kind.config();
    let mut tags = vec!["billpay".to_string()];
    tags.extend(options.cloud_providers.iter().cloned());

    GeneratedTemplate {
        api_version: "scaffolder.backstage.io/v1beta3".to_string(),
        kind: "Template".to_string(),
        metadata: TemplateMetadata {
            name: name.to_string(),
            title: template_title(purpose),
            description: description.to_string(),
            tags,
        },
        spec: TemplateSpec {
            owner: OWNER_TEAM.to_string(),
            kind: "service".to_string(),
            parameters: vec![project_parameters(options)],
            steps: generate_steps(config),
            output: generate_output(config),
        },
    }
}

fn project_parameters(options: &CreateOptions) -> ParameterGroup {
    ParameterGroup {
        title: "Project Information".to_string(),
        required: vec!["name".to_string(), "deployment_type".to_string()],
        properties: ProjectProperties {
            name: Property {
                title: "Project Name".to_string(),
                kind: "string".to_string(),
                pattern: Some("^[a-zA-Z0-9-_]+$".to_string()),
                ..Default::default()
            },
            deployment_type: Property {
                title: "Deployment Type".to_string(),
                kind: "string".to_string(),
                default: Some("simulation".to_string()),
                allowed: Some(options.deployment_type_choices()),
                enum_names: Some(vec![
                    "Simulation (Demo)".to_string(),
                    "Real AWS Deployment".to_string(),
                ]),
                ..Default::default()
            },
        },
    }
}

/// Standard steps for a template type, in the standards' step order
pub fn generate_steps(config: &TemplateTypeConfig) -> Vec<Step> {
    STANDARDS
        .standard_steps
        .iter()
        .filter(|id| config.has_step(id))
        .filter_map(|id| standard_step(id, config))
        .collect()
}

fn standard_step(id: &str, config: &TemplateTypeConfig) -> Option<Step> {
    let step = match id {
        "fetch" => Step {
            id: "fetch".to_string(),
            name: "Fetch Template".to_string(),
            condition: None,
            action: "fetch:template".to_string(),
            input: StepInput::Fetch(FetchInput {
                url: "./skeleton".to_string(),
                values: FetchValues {
                    name: "${{ parameters.name }}".to_string(),
                    deployment_type: "${{ parameters.deployment_type }}".to_string(),
                },
            }),
        },
        "publish" => Step {
            id: "publish".to_string(),
            name: "Create GitHub Repository".to_string(),
            condition: None,
            action: "publish:github".to_string(),
            input: StepInput::Publish(PublishInput {
                description: "BillPay Project - ${{ parameters.name }}".to_string(),
                repo_url: format!("github.com?repo=${{{{ parameters.name }}}}&owner={GITHUB_OWNER}"),
                default_branch: STANDARDS.new_project_branch().to_string(),
            }),
        },
        "register" => Step {
            id: "register".to_string(),
            name: "Register in Catalog".to_string(),
            condition: None,
            action: "catalog:register".to_string(),
            input: StepInput::Register(RegisterInput {
                repo_contents_url: "${{ steps.publish.output.repoContentsUrl }}".to_string(),
                catalog_info_path: "/catalog-info.yaml".to_string(),
            }),
        },
        "trigger-deployment" => Step {
            id: "trigger-deployment".to_string(),
            name: "🚀 Deploy to AWS".to_string(),
            condition: Some("${{ parameters.deployment_type !== 'simulation' }}".to_string()),
            action: DISPATCH_ACTION.to_string(),
            input: StepInput::Dispatch(DispatchInput {
                repo_url: format!("github.com?owner={GITHUB_OWNER}&repo={IAC_REPO}"),
                branch_or_tag_name: STANDARDS.trunk_branch().to_string(),
                workflow_id: config.deployment_target.to_string(),
                workflow_inputs: WorkflowInputs {
                    project_name: "${{ parameters.name }}".to_string(),
                    environment: DEPLOY_ENVIRONMENT.to_string(),
                    deployment_type: "${{ parameters.deployment_type }}".to_string(),
                },
            }),
        },
        _ => return None,
    };
    Some(step)
}

/// Output links for a template type
pub fn generate_output(config: &TemplateTypeConfig) -> TemplateOutput {
    let mut links = Vec::new();

    if config.creates_repo {
        links.push(OutputLink {
            title: "Repository".to_string(),
            url: Some("${{ steps.publish.output.remoteUrl }}".to_string()),
            icon: "github".to_string(),
            entity_ref: None,
        });
        links.push(OutputLink {
            title: "Open in catalog".to_string(),
            url: None,
            icon: "catalog".to_string(),
            entity_ref: Some("${{ steps.register.output.entityRef }}".to_string()),
        });
        links.push(OutputLink {
            title: "GitHub Actions".to_string(),
            url: Some("${{ steps.publish.output.remoteUrl }}/actions".to_string()),
            icon: "deployment".to_string(),
            entity_ref: None,
        });
    }

    links.push(OutputLink {
        title: "AWS Deployment Monitor".to_string(),
        url: Some(format!("https://github.com/{GITHUB_OWNER}/{IAC_REPO}/actions")),
        icon: "cloud".to_string(),
        entity_ref: None,
    });

    TemplateOutput { links }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::templates::document::TemplateDocument;

    fn step_ids(steps: &[Step]) -> Vec<&str> {
        steps.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_repository_creation_generates_all_steps() {
        let steps = generate_steps(TemplateType::RepositoryCreation.config());
        assert_eq!(
            step_ids(&steps),
            vec!["fetch", "publish", "register", "trigger-deployment"]
        );
        assert_eq!(step_ids(&steps), STANDARDS.standard_steps);
    }

    #[test]
    fn test_complete_stack_uses_fixed_order() {
        let config = TemplateType::CompleteStack.config();
        let steps = generate_steps(config);
        assert_eq!(step_ids(&steps), vec!["register", "trigger-deployment"]);

        let output = generate_output(config);
        assert_eq!(output.links.len(), 1);
        assert_eq!(output.links[0].title, "AWS Deployment Monitor");
    }

    #[test]
    fn test_dispatch_step_targets_trunk_and_type_workflow() {
        let steps = generate_steps(TemplateType::SimpleDeployment.config());
        let dispatch = steps
            .iter()
            .find(|s| s.action == DISPATCH_ACTION)
            .unwrap();
        assert!(dispatch.condition.is_some());
        match &dispatch.input {
            StepInput::Dispatch(input) => {
                assert_eq!(input.branch_or_tag_name, "trunk");
                assert_eq!(input.workflow_id, "deploy-simple.yml");
                assert_eq!(input.workflow_inputs.environment, "demo");
            }
            other => panic!("unexpected input: {other:?}"),
        }
    }

    #[test]
    fn test_publish_step_uses_main_branch() {
        let steps = generate_steps(TemplateType::RepositoryCreation.config());
        match &steps[1].input {
            StepInput::Publish(input) => {
                assert_eq!(input.default_branch, "main");
                assert_eq!(
                    input.repo_url,
                    "github.com?repo=${{ parameters.name }}&owner=giovanemere"
                );
            }
            other => panic!("unexpected input: {other:?}"),
        }
    }

    #[test]
    fn test_repo_creating_types_get_repository_links() {
        let output = generate_output(TemplateType::RepositoryCreation.config());
        let titles: Vec<_> = output.links.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Repository",
                "Open in catalog",
                "GitHub Actions",
                "AWS Deployment Monitor"
            ]
        );
    }

    #[test]
    fn test_generate_template_metadata() {
        let options = CreateOptions {
            cloud_providers: vec!["aws".to_string(), "gcp".to_string()],
            ..Default::default()
        };
        let doc = generate_template(
            "billpay-static-site",
            "static-site",
            TemplateType::SimpleDeployment,
            "Static site on S3",
            &options,
        );
        assert_eq!(doc.metadata.name, "billpay-static-site");
        assert_eq!(doc.metadata.title, "BillPay Static Site");
        assert_eq!(doc.metadata.tags, vec!["billpay", "aws", "gcp"]);
        assert_eq!(
            doc.spec.parameters[0].properties.deployment_type.allowed,
            Some(vec!["simulation".to_string(), "real-aws-oidc".to_string()])
        );
    }

    #[test]
    fn test_empty_deployment_types_use_defaults() {
        let options = CreateOptions {
            deployment_types: Vec::new(),
            ..Default::default()
        };
        assert_eq!(
            options.deployment_type_choices(),
            CreateOptions::default().deployment_types
        );
        let doc = generate_template(
            "billpay-demo",
            "demo",
            TemplateType::RepositoryCreation,
            "Demo",
            &options,
        );
        assert_eq!(
            doc.spec.parameters[0].properties.deployment_type.allowed,
            Some(CreateOptions::default().deployment_types)
        );
    }

    #[test]
    fn test_generated_yaml_field_order() {
        let doc = generate_template(
            "billpay-demo",
            "demo",
            TemplateType::CompleteStack,
            "Demo",
            &CreateOptions::default(),
        );
        let yaml = doc.to_yaml_string().unwrap();
        let api = yaml.find("apiVersion:").unwrap();
        let metadata = yaml.find("metadata:").unwrap();
        let spec = yaml.find("spec:").unwrap();
        assert!(api < metadata && metadata < spec);
        assert!(yaml.contains("branchOrTagName: trunk"));
        assert!(yaml.contains("enumNames:"));

        let loaded = TemplateDocument::from_yaml_str(&yaml).unwrap();
        assert_eq!(loaded.name(), Some("billpay-demo"));
        assert_eq!(loaded.step_count(), 2);
        assert_eq!(loaded.dispatch_steps()[0].branch.as_deref(), Some("trunk"));
    }
}
