//! sheetpress-convert: turn a JSON document into an xlsx workbook
//!
//! Usage:
//!   # Read from file, publish into ./output
//!   sheetpress-convert data.json
//!
//!   # Read from stdin, choose the destination directory
//!   echo '[{"id": 1}, {"id": 2}]' | sheetpress-convert --output-dir ./converted
//!
//!   # Dotted compound keys and a machine-readable summary
//!   sheetpress-convert data.json --separator . --json

// Use MiMalloc allocator for better performance
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use sheetpress::convert::{ConversionPipeline, ConvertConfig, ConvertError, DirectorySink};
use std::io::Read;

#[derive(Parser, Debug)]
#[command(name = "sheetpress-convert")]
#[command(about = "Convert a JSON document into a spreadsheet workbook", long_about = None)]
struct Args {
    /// Input JSON file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Directory the finished workbook is published into
    #[arg(long, short = 'o', default_value = "output")]
    output_dir: String,

    /// Separator joining nested keys into column names (default: "_")
    #[arg(long)]
    separator: Option<String>,

    /// Worksheet name in the output workbook
    #[arg(long)]
    sheet_name: Option<String>,

    /// Maximum input size in bytes, 0 disables the limit
    #[arg(long, default_value_t = 5 * 1024 * 1024)]
    max_bytes: u64,

    /// Print a JSON summary of the published artifact
    #[arg(long)]
    json: bool,

    /// Suppress the human-readable summary
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(err) = run(args) {
        match err.downcast_ref::<ConvertError>() {
            Some(converted) => eprintln!("error ({}): {}", converted.kind().as_str(), converted),
            None => eprintln!("error: {:#}", err),
        }
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = ConvertConfig::default();
    if let Some(separator) = args.separator {
        config.separator = separator;
    }
    if let Some(sheet_name) = args.sheet_name {
        config.sheet_name = sheet_name;
    }
    config.max_input_bytes = args.max_bytes;

    let (bytes, name_hint) = match &args.input {
        Some(path) => read_file(path, config.max_input_bytes)?,
        None => read_stdin(config.max_input_bytes)?,
    };

    let sink = DirectorySink::new(&args.output_dir);
    let pipeline = ConversionPipeline::new(config);
    let artifact = pipeline.convert(&bytes, &name_hint, &sink)?;

    if args.json {
        println!("{}", serde_json::to_string(&artifact)?);
    } else if !args.quiet {
        println!(
            "{} rows x {} columns -> {}",
            artifact.rows, artifact.columns, artifact.reference
        );
    }

    Ok(())
}

fn read_file(path: &str, max_bytes: u64) -> Result<(Vec<u8>, String)> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read input file {}", path))?;
    if max_bytes > 0 && metadata.len() > max_bytes {
        bail!("input file {} exceeds the maximum size of {} bytes", path, max_bytes);
    }

    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read input file {}", path))?;
    let name_hint = std::path::Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("converted")
        .to_string();

    Ok((bytes, name_hint))
}

fn read_stdin(max_bytes: u64) -> Result<(Vec<u8>, String)> {
    let mut bytes = Vec::new();
    if max_bytes > 0 {
        std::io::stdin()
            .take(max_bytes.saturating_add(1))
            .read_to_end(&mut bytes)
            .context("Failed to read stdin")?;
        if bytes.len() as u64 > max_bytes {
            bail!("stdin input exceeds the maximum size of {} bytes", max_bytes);
        }
    } else {
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("Failed to read stdin")?;
    }

    Ok((bytes, String::from("stdin")))
}
