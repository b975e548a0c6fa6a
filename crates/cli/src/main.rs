//! swagger-actions CLI
//!
//! Command-line interface for generating GitHub Actions workflows from
//! OpenAPI/Swagger specifications.

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use swagger_actions_common::{Diagnostics, WorkflowConfig, WorkflowDefinition};
use swagger_actions_generator::WorkflowGenerator;
use swagger_actions_parser::{derive_workflows, parse_openapi_file};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "swagger-actions")]
#[command(version, about = "Generate GitHub Actions workflows from OpenAPI/Swagger specifications", long_about = None)]
#[command(after_help = "EXAMPLES:\n  \
    # Generate from ./swagger.yaml into .github/workflows\n  \
    swagger-actions\n\n  \
    # Preview the workflows of a JSON spec without writing anything\n  \
    swagger-actions openapi.json --dry-run\n\n  \
    # Custom output directory and runner\n  \
    swagger-actions api.yaml \\\n    \
    --output ./workflows \\\n    \
    --runner self-hosted")]
struct Cli {
    /// Path to the OpenAPI/Swagger file (YAML or JSON)
    #[arg(default_value = "swagger.yaml")]
    spec: PathBuf,

    /// Output directory (overrides the config file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// YAML file with generation settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// `runs-on` label for the generated jobs (overrides the config file)
    #[arg(long)]
    runner: Option<String>,

    /// Print the workflows that would be generated without writing them
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        println!("{} Verbose mode enabled", "→".cyan());
    }

    generate_command(&cli)
}

fn generate_command(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    println!("{} Parsing spec: {}", "→".cyan(), cli.spec.display());
    let parsed = parse_openapi_file(&cli.spec)
        .with_context(|| format!("Failed to parse {}", cli.spec.display()))?;
    let (api, parse_diagnostics) = parsed.into_parts();

    if cli.verbose {
        if let Some(title) = &api.title {
            println!("  Title: {}", title);
        }
        println!("  Operations: {}", api.operations.len());
        println!("  Component schemas: {}", api.components.len());
    }

    let (workflows, derive_diagnostics) = derive_workflows(&api).into_parts();
    println!(
        "{} Derived {} workflows",
        "✓".green(),
        workflows.len()
    );

    let mut diagnostics = parse_diagnostics;
    diagnostics.extend(derive_diagnostics);
    report_warnings(&diagnostics);

    if cli.dry_run {
        print_workflows(&workflows, &config, cli.verbose);
        println!("\n{}", "✓ Dry run complete, nothing written".green().bold());
        return Ok(());
    }

    if cli.verbose {
        println!("  Output: {}", config.output_dir.display());
        println!("  Runner: {}", config.runner);
    }

    println!("{} Generating workflow files...", "→".cyan());
    let generator =
        WorkflowGenerator::new(config.clone()).context("Failed to create generator")?;
    let written = generator
        .generate_to_directory(&workflows, &config.output_dir)
        .context("Failed to generate workflows")?;

    println!("\n{}", "✓ Generation complete!".green().bold());
    if !written.is_empty() {
        println!("\n{}", "Generated files:".bold());
        for path in &written {
            println!("  📄 {}", path.display());
        }
    }
    if !diagnostics.is_empty() {
        println!(
            "\n{} {} warnings, see above",
            "⚠".yellow(),
            diagnostics.len()
        );
    }

    Ok(())
}

/// Settings from `--config` (or defaults) with command-line overrides applied
fn load_config(cli: &Cli) -> Result<WorkflowConfig> {
    let mut config = match &cli.config {
        Some(path) => WorkflowConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => WorkflowConfig::default(),
    };

    if let Some(output) = &cli.output {
        config.output_dir = output.clone();
    }
    if let Some(runner) = &cli.runner {
        config.runner = runner.clone();
    }

    Ok(config)
}

fn report_warnings(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics {
        eprintln!("{} {}", "⚠".yellow(), diagnostic);
    }
}

fn print_workflows(workflows: &[WorkflowDefinition], config: &WorkflowConfig, verbose: bool) {
    println!("\n{}", "Workflows:".bold());
    for workflow in workflows {
        println!(
            "  • {} ({} {})",
            config.file_name(&workflow.name).cyan(),
            workflow.method,
            workflow.path
        );

        for input in &workflow.inputs {
            let required = if input.required { "required" } else { "optional" };
            if verbose {
                println!(
                    "      {}: {}, {} - {}",
                    input.name.yellow(),
                    input.primitive_type,
                    required,
                    input.description
                );
            } else {
                println!(
                    "      {}: {}, {}",
                    input.name.yellow(),
                    input.primitive_type,
                    required
                );
            }
        }
    }
}
