// Parenting Assistant - forms-driven AI parenting helper
// Main entry point

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;

use parenting_assistant::config::{load_config, Config};
use parenting_assistant::forms::{Feature, FormSubmission};
use parenting_assistant::providers::create_generator;
use parenting_assistant::render::PageRenderer;
use parenting_assistant::server::AssistantServer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "parenting-assistant")]
#[command(about = "AI parenting assistant: daily planner, meal plans and emotion check-ins", version)]
struct Args {
    /// Run mode (defaults to serve)
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to config file (default: ~/.parenting-assistant/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Bind host (overrides config and HOST)
        #[arg(long)]
        host: Option<String>,

        /// Listening port (overrides config and PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run one submission through the configured generator and print the result
    Generate {
        /// Feature area: planner, meals or emotions
        feature: Feature,

        /// Form fields as key=value pairs
        #[arg(value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Some(Command::Generate { feature, fields }) => run_generate(&config, feature, &fields).await,
        Some(Command::Serve { host, port }) => run_server(config, host, port).await,
        None => run_server(config, None, None).await,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

async fn run_server(mut config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let generator = create_generator(&config.generator).context("Failed to create content generator")?;
    let renderer = PageRenderer::with_overrides(config.templates.dir.as_deref())
        .context("Failed to load page templates")?;

    AssistantServer::new(config.server, generator, renderer)
        .serve()
        .await
}

async fn run_generate(config: &Config, feature: Feature, fields: &[String]) -> Result<()> {
    let form = parse_fields(fields)?;
    let submission = FormSubmission::from_form(feature, &form)?;

    let generator = create_generator(&config.generator).context("Failed to create content generator")?;
    let content = generator
        .generate(&submission)
        .await
        .with_context(|| format!("{} generation failed", feature))?;

    println!("{}", content.text);
    Ok(())
}

fn parse_fields(fields: &[String]) -> Result<HashMap<String, String>> {
    let mut form = HashMap::new();
    for field in fields {
        let (key, value) = field
            .split_once('=')
            .ok_or_else(|| anyhow!("Expected KEY=VALUE, got '{}'", field))?;
        if key.trim().is_empty() {
            bail!("Empty field name in '{}'", field);
        }
        form.insert(key.trim().to_string(), value.to_string());
    }
    Ok(form)
}
