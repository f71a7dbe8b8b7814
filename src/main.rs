//! template-manager CLI entrypoint
//! Parses command-line arguments and either serves the MCP tools on stdio or runs one tool locally.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use std::path::PathBuf;
use template_manager::{
    core::{config::ManagerConfig, templates::TemplateManager},
    mcp::{TemplateManagerServer, ToolDispatcher, tool_definitions},
};

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "template-manager")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the templates (overrides TEMPLATE_MANAGER_DIR)
    #[arg(long, global = true)]
    templates_dir: Option<PathBuf>,
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Serve the template tools over MCP on stdio
    Serve,
    /// List the available tools
    #[command(name = "list-tools")]
    ListTools,
    /// Call a tool with JSON arguments
    Call {
        /// Name of the tool to call
        tool_name: String,
        /// JSON arguments for the tool
        #[arg(long)]
        args: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log to stderr; stdout carries the MCP transport
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let config = ManagerConfig::resolve(cli.templates_dir.as_deref(), cli.config.as_deref())
        .context("Failed to resolve configuration")?;
    info!(templates_dir = %config.templates_dir.display(), "Starting template manager");

    let dispatcher = ToolDispatcher::new(TemplateManager::new(&config));

    match &cli.command {
        Commands::Serve => serve(dispatcher).await?,
        Commands::ListTools => list_tools(),
        Commands::Call { tool_name, args } => call_tool(&dispatcher, tool_name, args.as_deref()).await?,
    }
    Ok(())
}

/// Serve the tools until the client disconnects
async fn serve(dispatcher: ToolDispatcher) -> anyhow::Result<()> {
    let service = TemplateManagerServer::new(dispatcher)
        .serve(stdio())
        .await
        .inspect_err(|e| error!(error = %e, "Failed to start MCP server"))
        .context("Failed to start MCP server")?;

    info!("MCP server ready on stdio");
    service.waiting().await.context("MCP server task failed")?;
    info!("MCP server stopped");
    Ok(())
}

fn list_tools() {
    println!("Available tools:");
    for tool in tool_definitions() {
        println!("  • {} - {}", tool.name, tool.description);
    }
}

async fn call_tool(
    dispatcher: &ToolDispatcher,
    tool_name: &str,
    args: Option<&str>,
) -> anyhow::Result<()> {
    // Parse arguments JSON or use empty object
    let arguments = match args {
        Some(json_str) => {
            let value: serde_json::Value =
                serde_json::from_str(json_str).context("Failed to parse JSON arguments")?;
            match value {
                serde_json::Value::Object(map) => Some(map),
                _ => anyhow::bail!("Tool arguments must be a JSON object"),
            }
        }
        None => None,
    };

    info!(tool = %tool_name, "Calling tool");
    let text = dispatcher
        .call(tool_name, arguments)
        .await
        .with_context(|| format!("Tool '{tool_name}' failed"))?;

    println!("{text}");
    Ok(())
}
