//! Concordance Delta CLI
//!
//! # Usage
//!
//! ```bash
//! # Delta between two dated drops, stamped with today's date
//! concord-delta --old drops/20240401.concordance.txt.gz \
//!               --new drops/20240402.concordance.txt.gz \
//!               --out-dir deltas
//!
//! # Explicit date stamp and strict format check first
//! concord-delta --old old.txt --new new.txt --date 20240402 --verify
//! ```

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use concord_delta::{compute_delta, DeltaRequest};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "concord-delta")]
#[command(about = "Compute day-over-day adds/deletes between two concordance snapshots", long_about = None)]
struct Cli {
    /// Previous snapshot
    #[arg(long)]
    old: PathBuf,

    /// Current snapshot
    #[arg(long)]
    new: PathBuf,

    /// Directory for the dated .adds/.deletes pair
    #[arg(short, long, default_value = "deltas")]
    out_dir: PathBuf,

    /// Date stamp as YYYYMMDD (today in UTC when omitted)
    #[arg(long, value_parser = parse_compact_date)]
    date: Option<NaiveDate>,

    /// Run the strict format scan on both snapshots first
    #[arg(long)]
    verify: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn parse_compact_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y%m%d").map_err(|e| format!("invalid date {raw:?}: {e}"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verify {
        concord_engine::verify_format(&cli.old)?;
        concord_engine::verify_format(&cli.new)?;
    }

    let delta = compute_delta(&DeltaRequest {
        old_snapshot: cli.old,
        new_snapshot: cli.new,
        out_dir: cli.out_dir,
        date: cli.date,
    })?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&delta)?);
    } else {
        println!("✅ +{} lines: {}", delta.adds_count, delta.adds.display());
        println!("✅ -{} lines: {}", delta.deletes_count, delta.deletes.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compact_date() {
        assert_eq!(
            parse_compact_date("20240402"),
            Ok(NaiveDate::from_ymd_opt(2024, 4, 2).unwrap())
        );
        assert!(parse_compact_date("2024-04-02").is_err());
        assert!(parse_compact_date("20241341").is_err());
    }
}
