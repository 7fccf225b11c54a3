//! Concordance Validation CLI
//!
//! # Usage
//!
//! ```bash
//! # Validate one or more snapshots (plain or gzipped)
//! concord-validate validate --out-dir validated drops/20240401.concordance.txt.gz
//!
//! # With a config file and a JSON summary of all runs
//! concord-validate validate --config engine.yaml --summary-json runs.json \
//!     --out-dir validated drops/20240401.concordance.txt
//!
//! # List snapshot dates that still need validation
//! concord-validate discover --raw-dir drops --validated-dir validated
//!
//! # Validate everything pending in one go
//! concord-validate discover --raw-dir drops --validated-dir validated --run
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use concord_engine::{
    discovery, validate_batch, EngineConfig, ValidationReport, ValidationRequest,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "concord-validate")]
#[command(about = "Resolve variant OCNs in concordance snapshots to canonical OCNs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate snapshot files
    Validate {
        /// Snapshot files to validate
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Directory for validated output and failure logs
        #[arg(short, long, default_value = "validated")]
        out_dir: PathBuf,

        /// YAML config file (defaults apply when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write all run reports as a JSON array to this path
        #[arg(long)]
        summary_json: Option<PathBuf>,
    },

    /// List snapshot dates with no validated output yet
    Discover {
        /// Directory of raw dated snapshots
        #[arg(long)]
        raw_dir: PathBuf,

        /// Directory of validated outputs
        #[arg(long)]
        validated_dir: PathBuf,

        /// Validate every pending snapshot instead of just listing it
        #[arg(long)]
        run: bool,

        /// YAML config file used with --run
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            inputs,
            out_dir,
            config,
            summary_json,
        } => {
            run_validate(inputs, out_dir, config, summary_json)?;
        }
        Commands::Discover {
            raw_dir,
            validated_dir,
            run,
            config,
        } => {
            let pending = pending_snapshots(&raw_dir, &validated_dir)?;
            if run {
                let inputs: Vec<PathBuf> = pending.into_iter().map(|(_, path)| path).collect();
                if inputs.is_empty() {
                    println!("nothing to validate");
                } else {
                    run_validate(inputs, validated_dir, config, None)?;
                }
            } else if pending.is_empty() {
                println!("nothing to validate");
            } else {
                for (date, path) in pending {
                    println!(
                        "{}\t{}",
                        date.format(discovery::DATE_FORMAT),
                        path.display()
                    );
                }
            }
        }
    }

    Ok(())
}

fn run_validate(
    inputs: Vec<PathBuf>,
    out_dir: PathBuf,
    config_path: Option<PathBuf>,
    summary_json: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config_path {
        Some(path) => EngineConfig::from_yaml(&path)?,
        None => EngineConfig::default(),
    };

    let requests: Vec<ValidationRequest> = inputs
        .iter()
        .map(|input| request_for(input, &out_dir))
        .collect();

    let results = validate_batch(&requests, &config);

    let mut reports: Vec<ValidationReport> = Vec::new();
    let mut failed = 0usize;
    for (request, result) in requests.iter().zip(results) {
        match result {
            Ok(report) => {
                println!(
                    "✅ {}: {} resolved, {} skipped ({} ms)",
                    request.input.display(),
                    report.resolved,
                    report.failure_count(),
                    report.duration_ms
                );
                reports.push(report);
            }
            Err(err) => {
                eprintln!("❌ {}: {err}", request.input.display());
                failed += 1;
            }
        }
    }

    if let Some(path) = summary_json {
        std::fs::write(&path, serde_json::to_string_pretty(&reports)?)?;
        println!("📄 Summary saved: {}", path.display());
    }

    if failed > 0 {
        eprintln!("{failed} file(s) failed validation");
        std::process::exit(1);
    }
    Ok(())
}

/// Derive the output pair for one input.
///
/// `20240401.concordance.txt.gz` becomes `20240401.concordance.validated.tsv`
/// and `20240401.concordance.failures.log` under the output directory.
fn request_for(input: &Path, out_dir: &Path) -> ValidationRequest {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "snapshot".to_string());
    let trimmed = name.strip_suffix(".gz").unwrap_or(&name);
    let stem = Path::new(trimmed)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| trimmed.to_string());
    ValidationRequest {
        input: input.to_path_buf(),
        output: out_dir.join(format!("{stem}.validated.tsv")),
        log: out_dir.join(format!("{stem}.failures.log")),
    }
}

/// Pending dates paired with the snapshot file each one lives in.
fn pending_snapshots(
    raw_dir: &Path,
    validated_dir: &Path,
) -> Result<Vec<(chrono::NaiveDate, PathBuf)>, Box<dyn std::error::Error>> {
    let mut pending = Vec::new();
    for date in discovery::dates_needing_validation(raw_dir, validated_dir)? {
        if let Some(path) = discovery::snapshot_for_date(raw_dir, date)? {
            pending.push((date, path));
        }
    }
    Ok(pending)
}
