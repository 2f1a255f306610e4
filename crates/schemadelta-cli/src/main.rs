use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use schemadelta_catalog::{fetch_pair, Snapshot, SnapshotSource};
use schemadelta_core::{Config, Report};
use schemadelta_engine::{normalize, DiffOptions, SchemaDiff};

mod render;

use render::OutputFormat;

/// SchemaDelta - Schema comparison across warehouse environments
#[derive(Parser)]
#[command(name = "schemadelta")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: schemadelta.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two environment catalogs and write a report
    Compare {
        /// Baseline snapshot file
        #[arg(long, value_name = "FILE")]
        baseline: Option<PathBuf>,

        /// Target snapshot file
        #[arg(long, value_name = "FILE")]
        target: Option<PathBuf>,

        /// Baseline environment label from the `[environments]` config table
        #[arg(long, value_name = "LABEL")]
        baseline_env: Option<String>,

        /// Target environment label from the `[environments]` config table
        #[arg(long, value_name = "LABEL")]
        target_env: Option<String>,

        /// Output file for report.json
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,

        /// Stdout rendering format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Exit with code 1 when discrepancies are found
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        fail_on_discrepancy: bool,
    },

    /// Re-render a previously saved report
    Render {
        /// Path to a report produced by compare
        report: PathBuf,

        /// Rendering format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Load config if specified
    let config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else if Path::new("schemadelta.toml").exists() {
        Config::from_file(Path::new("schemadelta.toml"))?
    } else {
        if cli.verbose {
            eprintln!("{}", "No config file found, using defaults".yellow());
        }
        Config::default()
    };

    match cli.command {
        Commands::Compare {
            baseline,
            target,
            baseline_env,
            target_env,
            output,
            format,
            fail_on_discrepancy,
        } => {
            compare_command(
                &config,
                baseline.as_deref(),
                baseline_env.as_deref(),
                target.as_deref(),
                target_env.as_deref(),
                &output,
                format,
                fail_on_discrepancy,
                cli.verbose,
            )
            .await
        }
        Commands::Render { report, format } => render_command(&report, format),
    }
}

/// Route library logs to stderr, honoring RUST_LOG when set
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Compare command - fetch both catalogs, normalize, diff, report
async fn compare_command(
    config: &Config,
    baseline: Option<&Path>,
    baseline_env: Option<&str>,
    target: Option<&Path>,
    target_env: Option<&str>,
    output: &Path,
    format: OutputFormat,
    fail_on_discrepancy: bool,
    verbose: bool,
) -> Result<()> {
    let (baseline_path, baseline_label) =
        resolve_snapshot(config, "baseline", baseline, baseline_env)?;
    let (target_path, target_label) = resolve_snapshot(config, "target", target, target_env)?;

    if verbose {
        eprintln!(
            "{} {}",
            "Loading baseline snapshot:".cyan(),
            baseline_path.display()
        );
        eprintln!(
            "{} {}",
            "Loading target snapshot:".cyan(),
            target_path.display()
        );
    }

    let baseline_snapshot = load_snapshot(&baseline_path, baseline_label.as_deref())?;
    let target_snapshot = load_snapshot(&target_path, target_label.as_deref())?;

    let baseline_label = baseline_snapshot.environment.clone();
    let target_label = target_snapshot.environment.clone();

    if baseline_label == target_label {
        anyhow::bail!(
            "Both snapshots declare environment '{}'. Re-export one side under \
             a distinct label so the report can tell the sides apart.",
            baseline_label
        );
    }

    let mut source = SnapshotSource::new();
    source.add(baseline_snapshot);
    source.add(target_snapshot);

    let (baseline_rows, target_rows) = fetch_pair(&source, &baseline_label, &target_label).await?;

    let filter = config.filter.build_filter();
    if verbose {
        eprintln!(
            "{} {} baseline rows, {} target rows ({} exclusion patterns)",
            "Normalizing:".cyan(),
            baseline_rows.len(),
            target_rows.len(),
            filter.pattern_count()
        );
    }

    let baseline = normalize(&baseline_label, baseline_rows, &filter)?;
    let target = normalize(&target_label, target_rows, &filter)?;

    let options = DiffOptions::from(&config.diff);
    let diff = SchemaDiff::compare(&baseline, &target, &options);

    if verbose {
        eprintln!(
            "{} {} tables, {} columns",
            "Compared:".cyan(),
            diff.tables_compared,
            diff.columns_compared
        );
    }

    let report = diff
        .into_report()
        .with_fingerprints(baseline.fingerprint(), target.fingerprint());

    report.save_to_file(output)?;
    if verbose {
        eprintln!("{} {}", "Report saved to:".green(), output.display());
    }

    println!("{}", render::render(&report, format)?);

    // Exit with error code for CI gates
    if fail_on_discrepancy && report.has_discrepancies() {
        std::process::exit(1);
    }

    Ok(())
}

/// Render command - re-render a saved report
fn render_command(path: &Path, format: OutputFormat) -> Result<()> {
    let report = Report::from_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to load report {}: {}", path.display(), e))?;

    println!("{}", render::render(&report, format)?);

    Ok(())
}

/// Resolve one side of the comparison to a snapshot path
///
/// Exactly one of the direct-path and config-label forms must be given.
/// Returns the requested label when the config form was used, so the
/// loaded snapshot can be checked against it.
fn resolve_snapshot(
    config: &Config,
    side: &str,
    path: Option<&Path>,
    label: Option<&str>,
) -> Result<(PathBuf, Option<String>)> {
    match (path, label) {
        (Some(path), None) => Ok((path.to_path_buf(), None)),
        (None, Some(label)) => {
            let path = config.snapshot_path(label).ok_or_else(|| {
                anyhow::anyhow!(
                    "No [environments.{}] entry in config. Add one with a snapshot path.",
                    label
                )
            })?;
            Ok((path, Some(label.to_string())))
        }
        (Some(_), Some(_)) => Err(anyhow::anyhow!(
            "Give either --{} or --{}-env, not both",
            side,
            side
        )),
        (None, None) => Err(anyhow::anyhow!(
            "Missing {} input: pass --{} <snapshot.json> or --{}-env <label>",
            side,
            side,
            side
        )),
    }
}

/// Load a snapshot and check any requested label against the declared one
fn load_snapshot(path: &Path, requested: Option<&str>) -> Result<Snapshot> {
    let snapshot = Snapshot::from_file(path)?;

    if let Some(requested) = requested {
        if snapshot.environment != requested {
            anyhow::bail!(
                "Snapshot {} declares environment '{}', expected '{}'",
                path.display(),
                snapshot.environment,
                requested
            );
        }
    }

    Ok(snapshot)
}
