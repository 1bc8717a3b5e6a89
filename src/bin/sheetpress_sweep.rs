//! sheetpress-sweep: delete expired workbooks from an output directory
//!
//! Usage:
//!   # Remove artifacts older than one hour
//!   sheetpress-sweep ./output
//!
//!   # Custom age, list without deleting
//!   sheetpress-sweep ./output --max-age-secs 600 --dry-run

// Use MiMalloc allocator for better performance
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;
use sheetpress::store::is_expired;
use std::time::{Duration, SystemTime};

#[derive(Parser, Debug)]
#[command(name = "sheetpress-sweep")]
#[command(about = "Delete expired workbooks from an output directory", long_about = None)]
struct Args {
    /// Directory to sweep
    #[arg(value_name = "DIR")]
    dir: String,

    /// Age in seconds after which an artifact expires
    #[arg(long, default_value_t = 3600)]
    max_age_secs: u64,

    /// List expired files without deleting them
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(err) = run(args) {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let now = SystemTime::now();
    let ttl = Duration::from_secs(args.max_age_secs);
    let mut removed = 0usize;

    let entries = std::fs::read_dir(&args.dir)
        .with_context(|| format!("Failed to read directory {}", args.dir))?;

    for entry in entries {
        let entry = entry.context("Failed to read directory entry")?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }

        let modified = match entry.metadata().and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(err) => {
                warn!("skipping {}: {}", entry.path().display(), err);
                continue;
            }
        };
        let Some(expiry) = modified.checked_add(ttl) else {
            continue;
        };

        if is_expired(now, expiry) {
            if args.dry_run {
                println!("{}", entry.path().display());
            } else if let Err(err) = std::fs::remove_file(entry.path()) {
                warn!("failed to delete {}: {}", entry.path().display(), err);
            } else {
                removed += 1;
            }
        }
    }

    if !args.dry_run {
        println!("removed {} expired artifact(s)", removed);
    }

    Ok(())
}
