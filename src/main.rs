//! mysql-schema-lint CLI
//!
//! Entry point for the command-line tool.
//!
//! Exit codes:
//! - 0: No reports at or above the configured severity threshold
//! - 1: One or more reports at or above the threshold
//! - 2: Tool error (config error, snapshot parse failure, I/O error, etc.)

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;

use mysql_schema_lint::checks::{Check, CheckId};
use mysql_schema_lint::output::{JsonReporter, Reporter, TextReporter};
use mysql_schema_lint::{AuditPipeline, CheckRegistry, Config, Report, Severity, Snapshot};

/// Default config file name used when --config is not explicitly provided.
const DEFAULT_CONFIG_FILE: &str = "mysql-schema-lint.toml";

#[derive(Parser, Debug)]
#[command(name = "mysql-schema-lint")]
#[command(about = "Structural-health auditor for MySQL schemas", long_about = None)]
struct Args {
    /// Path to a schema snapshot (JSON dump of information_schema rows)
    snapshot: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Explain a specific check (e.g., --explain redundant_indexes)
    #[arg(long)]
    explain: Option<String>,

    /// Override output format (text, json)
    #[arg(long)]
    format: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(has_reports_above_threshold) => {
            if has_reports_above_threshold {
                std::process::exit(1);
            }
            // exit 0 is implicit
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(2);
        }
    }
}

/// Run the audit.
///
/// Returns `Ok(true)` if reports at or above the severity threshold were
/// found, `Ok(false)` if no reports met the threshold, or `Err` on tool
/// errors.
fn run(args: Args) -> Result<bool> {
    // Handle --explain early exit
    if let Some(check_id) = args.explain {
        explain_check(&check_id)?;
        return Ok(false);
    }

    // Load configuration.
    // If --config is explicitly provided and the file doesn't exist, that's a tool error.
    // If using the default path and it doesn't exist, use defaults.
    let config = load_config(&args.config)?;

    let Some(snapshot_path) = args.snapshot else {
        bail!("no snapshot file given (pass a path, or --explain <check-id>)");
    };

    // --- Step 1: Load the snapshot and build the entity model ---
    let snapshot = Snapshot::from_file(&snapshot_path)
        .with_context(|| format!("Failed to read snapshot {}", snapshot_path.display()))?;
    let schema = snapshot
        .build()
        .context("Failed to assemble schema from snapshot")?;

    // --- Step 2: Run the audit ---
    let checks = config.enabled_checks();
    let pipeline = AuditPipeline::new(config.policy());
    let reports = pipeline.run(&schema, &checks);

    // --- Step 3: Emit reports ---
    let formats: Vec<String> = match &args.format {
        Some(format) => vec![format.clone()],
        None => config.output.formats.clone(),
    };
    for format in &formats {
        let reporter: Box<dyn Reporter> = match format.as_str() {
            // --format text means stdout; configured text goes to a file.
            "text" => Box::new(TextReporter::new(args.format.is_some())),
            "json" => Box::new(JsonReporter::new()),
            other => bail!("unknown output format '{other}'. Valid values: text, json"),
        };
        reporter
            .emit(&reports, &config.output.dir)
            .with_context(|| format!("Failed to write {format} report"))?;
    }

    Ok(meets_threshold(&reports, &config.cli.fail_on))
}

/// Whether any report reaches the configured threshold severity.
fn meets_threshold(reports: &[Report], fail_on: &str) -> bool {
    if fail_on.eq_ignore_ascii_case("none") {
        return false;
    }
    // Config validation guarantees fail_on parses.
    match Severity::parse(fail_on) {
        Some(threshold) => reports.iter().any(|r| r.severity >= threshold),
        None => false,
    }
}

/// Print the explanation for a single check.
fn explain_check(check_id: &str) -> Result<()> {
    let id: CheckId = check_id
        .parse()
        .map_err(|_| anyhow::anyhow!("unknown check id '{check_id}'"))?;

    let mut registry = CheckRegistry::new();
    registry.register_defaults();
    let check = registry
        .get(id)
        .context("check registered but not found")?;

    println!("{}", check.explain());
    Ok(())
}

/// Load configuration from the given path, or fall back to defaults.
fn load_config(path: &Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default.exists() {
                Config::from_file(&default)
                    .with_context(|| format!("Failed to load config {}", default.display()))
            } else {
                Ok(Config::default())
            }
        }
    }
}
