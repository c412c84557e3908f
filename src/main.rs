//! attrplan CLI entrypoint.
//!
//! This is the main entrypoint for the attrplan command-line tool.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use attrplan::cli::{Cli, Commands, OutputFormatter};
use attrplan::error::Result;
use attrplan::planner::PlanEngine;
use attrplan::schema::{find_schema_file, ProviderSchema, SchemaParser, SchemaValidator};
use attrplan::state::{load_plan_document, write_json_atomic, LocalStateStore, StateStore};

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    // ATTRPLAN_SCHEMA and RUST_LOG may come from a local .env
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    match dotenv {
        Ok(path) => debug!("Loaded environment from: {}", path.display()),
        Err(e) if e.not_found() => debug!(".env file not found"),
        Err(e) => {
            eprintln!("Failed to load .env file: {e}");
            return ExitCode::FAILURE;
        }
    }

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
///
/// `RUST_LOG` takes precedence over the verbosity flag.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    let formatter = OutputFormatter::new(cli.output);

    match cli.command {
        Commands::Init { path, force } => cmd_init(&path, force),
        Commands::Validate { warnings } => cmd_validate(cli.schema.as_ref(), warnings, &formatter),
        Commands::Rules => emit(&formatter.format_rules()),
        Commands::Plan {
            state,
            plan,
            out,
            detailed,
        } => {
            cmd_plan(
                cli.schema.as_ref(),
                &state,
                &plan,
                out.as_deref(),
                detailed,
                &formatter,
            )
            .await
        }
    }
}

/// Write a starter schema.
fn cmd_init(path: &Path, force: bool) -> Result<()> {
    info!("Initializing attrplan schema in: {}", path.display());

    let schema_path = path.join("attrplan.schema.yaml");

    if !force && schema_path.exists() {
        eprintln!("Schema file already exists: {}", schema_path.display());
        eprintln!("Use --force to overwrite.");
        return Ok(());
    }

    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }

    let template = include_str!("../templates/attrplan.schema.yaml");
    std::fs::write(&schema_path, template)?;
    eprintln!("Created: {}", schema_path.display());

    eprintln!("\nNext steps:");
    eprintln!("  1. Declare your resource types and their computed attributes");
    eprintln!("  2. Run 'attrplan validate' to check the schema");
    eprintln!("  3. Run 'attrplan plan --plan <tentative.json>' to reconcile a plan");

    Ok(())
}

/// Validate the schema.
fn cmd_validate(
    schema_path: Option<&PathBuf>,
    show_warnings: bool,
    formatter: &OutputFormatter,
) -> Result<()> {
    let schema = load_schema(schema_path)?;

    let result = SchemaValidator::new().check(&schema);
    emit(&formatter.format_validation(&schema, &result, show_warnings))?;

    // Surface the first error as the exit status.
    SchemaValidator::new().validate(&schema).map(|_| ())
}

/// Reconcile a tentative plan against recorded state.
async fn cmd_plan(
    schema_path: Option<&PathBuf>,
    state_path: &Path,
    plan_path: &Path,
    out: Option<&Path>,
    detailed: bool,
    formatter: &OutputFormatter,
) -> Result<()> {
    let schema = load_schema(schema_path)?;
    let validation = SchemaValidator::new().validate(&schema)?;
    for warning in &validation.warnings {
        debug!("Schema warning: {warning}");
    }

    let store = LocalStateStore::with_state_path(state_path);
    let state = store.load().await?;
    if state.is_none() {
        info!("No recorded state, every resource will be created");
    }

    let tentative = load_plan_document(plan_path).await?;

    let engine = Arc::new(PlanEngine::from_schema(&schema));
    let plan = engine.plan_documents(&tentative, state.as_ref()).await?;

    emit(&formatter.format_plan(&plan, detailed))?;

    if let Some(out) = out {
        write_json_atomic(out, &plan).await?;
        info!("Final plan written to: {}", out.display());
    }

    Ok(())
}

/// Resolves, loads and returns the schema.
fn load_schema(schema_path: Option<&PathBuf>) -> Result<ProviderSchema> {
    let schema_file = match schema_path {
        Some(path) => path.clone(),
        None => find_schema_file(std::env::current_dir()?)?,
    };

    SchemaParser::new().load_file(&schema_file)
}

/// Writes command output to stdout.
fn emit(output: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(())
}
