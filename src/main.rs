//! Bqshift CLI - cross-region table transfer plan builder

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use bqshift::config::{require, ShiftConfig};
use bqshift::error::{FixSuggestion, ShiftError};
use bqshift::plan::{self, PlanParams, DEFAULT_PLAN_NAME};
use bqshift::provider::create_image_service;
use bqshift::table_list::read_table_list;

#[derive(Parser)]
#[command(name = "bqshift")]
#[command(about = "Bqshift - build cross-region BigQuery transfer plans")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a transfer plan from a table list and emit the manifest
    Plan {
        /// Path to the table-list file
        #[arg(short, long)]
        table_list: Option<PathBuf>,

        /// Staging bucket in the source region
        #[arg(long)]
        source_bucket: Option<String>,

        /// Staging bucket in the destination region
        #[arg(long)]
        dest_bucket: Option<String>,

        /// Plan name carried in the manifest
        #[arg(short, long)]
        name: Option<String>,

        /// Manifest format (yaml, json)
        #[arg(short, long)]
        format: Option<String>,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the plan and check its structure without emitting it
    Validate {
        /// Path to the table-list file
        #[arg(short, long)]
        table_list: Option<PathBuf>,

        /// Staging bucket in the source region
        #[arg(long)]
        source_bucket: Option<String>,

        /// Staging bucket in the destination region
        #[arg(long)]
        dest_bucket: Option<String>,

        /// Treat duplicate step ids as an error
        #[arg(long)]
        strict: bool,
    },

    /// Query compute images
    Image {
        #[command(subcommand)]
        action: ImageAction,
    },

    /// Manage persistent configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config file path
    Path,

    /// Write a starter config file
    Init,
}

#[derive(Subcommand)]
enum ImageAction {
    /// Get the newest image in a named family within a project
    FromFamily {
        /// Project id or number
        project: String,
        /// Image family name
        family: String,
        /// Image service (gce, mock)
        #[arg(short, long, default_value = "gce")]
        service: String,
    },

    /// Get a named image within a project
    Get {
        /// Project id or number
        project: String,
        /// Image name
        name: String,
        /// Image service (gce, mock)
        #[arg(short, long, default_value = "gce")]
        service: String,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (ignore if not present)
    let _ = dotenvy::dotenv();

    // Initialize tracing; logs go to stderr so manifests stay clean on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Plan {
            table_list,
            source_bucket,
            dest_bucket,
            name,
            format,
            output,
        } => build_and_emit(table_list, source_bucket, dest_bucket, name, format, output),
        Commands::Validate {
            table_list,
            source_bucket,
            dest_bucket,
            strict,
        } => validate_plan_command(table_list, source_bucket, dest_bucket, strict),
        Commands::Image { action } => handle_image_command(action).await,
        Commands::Config { action } => handle_config_command(action),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

/// Resolve table-list path and plan parameters from flags, env, and config.
///
/// The table-list path is resolved here, at plan-construction time, so a
/// stale CLI definition never pins an old location.
fn resolve_inputs(
    table_list: Option<PathBuf>,
    source_bucket: Option<String>,
    dest_bucket: Option<String>,
    name: Option<String>,
) -> Result<(PathBuf, PlanParams, ShiftConfig), ShiftError> {
    let config = ShiftConfig::load()?.with_env();

    let table_list = require(
        table_list.map(|p| p.display().to_string()),
        config.transfer.table_list.as_deref(),
        "table_list",
        "--table-list",
        "BQSHIFT_TABLE_LIST",
    )?;
    let source_bucket = require(
        source_bucket,
        config.transfer.source_bucket.as_deref(),
        "source_bucket",
        "--source-bucket",
        "BQSHIFT_SOURCE_BUCKET",
    )?;
    let dest_bucket = require(
        dest_bucket,
        config.transfer.dest_bucket.as_deref(),
        "dest_bucket",
        "--dest-bucket",
        "BQSHIFT_DEST_BUCKET",
    )?;

    let params = PlanParams {
        name: name.unwrap_or_else(|| DEFAULT_PLAN_NAME.to_string()),
        source_bucket,
        dest_bucket,
    };

    Ok((PathBuf::from(table_list), params, config))
}

fn build_and_emit(
    table_list: Option<PathBuf>,
    source_bucket: Option<String>,
    dest_bucket: Option<String>,
    name: Option<String>,
    format: Option<String>,
    output: Option<PathBuf>,
) -> Result<(), ShiftError> {
    let (path, params, config) = resolve_inputs(table_list, source_bucket, dest_bucket, name)?;

    let pairs = read_table_list(&path)?;
    let transfer_plan = plan::build_plan(&pairs, &params);

    let report = plan::validate_plan(&transfer_plan)?;
    for id in &report.duplicates {
        eprintln!("{} duplicate step id '{}'", "Warning:".yellow(), id);
    }

    let format = format.as_deref().unwrap_or_else(|| config.format());
    let rendered = plan::render(&transfer_plan, format)?;

    match output {
        Some(out) => {
            fs::write(&out, &rendered)?;
            println!(
                "{} Wrote plan '{}' ({} chains) to {}",
                "✓".green(),
                transfer_plan.name,
                report.chains,
                out.display()
            );
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn validate_plan_command(
    table_list: Option<PathBuf>,
    source_bucket: Option<String>,
    dest_bucket: Option<String>,
    strict: bool,
) -> Result<(), ShiftError> {
    let (path, params, _config) = resolve_inputs(table_list, source_bucket, dest_bucket, None)?;

    let pairs = read_table_list(&path)?;
    let transfer_plan = plan::build_plan(&pairs, &params);
    let report = plan::validate_plan(&transfer_plan)?;

    for id in &report.duplicates {
        eprintln!("{} duplicate step id '{}'", "Warning:".yellow(), id);
    }
    if strict {
        if let Some(id) = report.duplicates.first() {
            return Err(ShiftError::DuplicateStep { id: id.clone() });
        }
    }

    println!(
        "{} Plan '{}' is valid ({})",
        "✓".green(),
        transfer_plan.name,
        path.display()
    );
    println!("  Tables: {}", pairs.len());
    println!("  Nodes: {}", report.nodes);
    println!("  Edges: {}", report.edges);
    println!("  Chains: {}", report.chains);

    Ok(())
}

async fn handle_image_command(action: ImageAction) -> Result<(), ShiftError> {
    let image = match action {
        ImageAction::FromFamily {
            project,
            family,
            service,
        } => {
            let service = create_image_service(&service)?;
            service.image_from_family(&project, &family).await
        }
        ImageAction::Get {
            project,
            name,
            service,
        } => {
            let service = create_image_service(&service)?;
            service.image(&project, &name).await
        }
    }
    .map_err(|e| ShiftError::ImageApi {
        message: format!("{e:#}"),
    })?;

    println!("{}", serde_json::to_string_pretty(&image)?);

    Ok(())
}

fn handle_config_command(action: ConfigAction) -> Result<(), ShiftError> {
    match action {
        ConfigAction::Path => {
            println!("{}", ShiftConfig::config_path().display());
            Ok(())
        }
        ConfigAction::Init => {
            let path = ShiftConfig::config_path();
            if path.exists() {
                return Err(ShiftError::ConfigError {
                    reason: format!("Config file already exists: {}", path.display()),
                });
            }
            ShiftConfig::default().save()?;
            println!("{} Wrote {}", "✓".green(), path.display());
            Ok(())
        }
    }
}
