//! # Sheetpress - JSON to Spreadsheet Conversion
//!
//! A library for normalizing arbitrarily nested JSON into a flat table and
//! writing it out as a single-sheet xlsx workbook.
//!
//! ## Modules
//!
//! - **convert**: flattening, table building, workbook serialization, and
//!   the conversion pipeline
//! - **store**: expiry bookkeeping for published artifacts (glue layer)
//!
//! ## Quick Start
//!
//! ### Flattening and table building
//!
//! ```rust
//! use sheetpress::convert::{Flattener, TableBuilder};
//! use serde_json::json;
//!
//! let records = vec![
//!     json!({"id": 1, "tags": ["a", "b"]}),
//!     json!({"id": 2, "owner": {"name": "Alice"}}),
//! ];
//!
//! let flattener = Flattener::new("_");
//! let flat: Vec<_> = records.iter().map(|r| flattener.flatten(r, "")).collect();
//! let table = TableBuilder::build(&flat);
//!
//! // columns in first-seen order, one row per record
//! assert_eq!(table.columns, vec!["id", "tags_0", "tags_1", "owner_name"]);
//! assert_eq!(table.row_count(), 2);
//! ```
//!
//! ### Full conversion
//!
//! ```no_run
//! use sheetpress::{convert_file, ConvertConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let artifact = convert_file(
//!     "report.json".as_ref(),
//!     "output".as_ref(),
//!     ConvertConfig::default(),
//! )?;
//! println!("wrote {} ({} rows)", artifact.file_name, artifact.rows);
//! # Ok(())
//! # }
//! ```

use anyhow::{bail, Context, Result};
use std::path::Path;

pub mod convert;
pub mod store;

// Re-export commonly used types for convenience
pub use convert::{
    Artifact, ArtifactRef, ArtifactSink, ConversionPipeline, ConvertConfig, ConvertError,
    DirectorySink, ErrorKind, Flattener, Table, TableBuilder, WorkbookWriter,
};
pub use store::{is_expired, RetentionStore};

/// Main entry point: convert a JSON file into a workbook in `output_dir`.
///
/// Enforces `config.max_input_bytes` before parsing, derives the output
/// name from the input file name, and publishes through a
/// [`DirectorySink`]. Pipeline failures carry their [`ConvertError`]
/// through the anyhow chain for callers that need the kind.
pub fn convert_file(input: &Path, output_dir: &Path, config: ConvertConfig) -> Result<Artifact> {
    let metadata = std::fs::metadata(input)
        .with_context(|| format!("Failed to read input file {}", input.display()))?;
    if config.max_input_bytes > 0 && metadata.len() > config.max_input_bytes {
        bail!(
            "input file {} exceeds the maximum size of {} bytes",
            input.display(),
            config.max_input_bytes
        );
    }

    let bytes = std::fs::read(input)
        .with_context(|| format!("Failed to read input file {}", input.display()))?;
    let name_hint = input
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("converted");

    let sink = DirectorySink::new(output_dir);
    let pipeline = ConversionPipeline::new(config);
    Ok(pipeline.convert(&bytes, name_hint, &sink)?)
}
