//! JSON-to-spreadsheet conversion.
//!
//! This module turns one JSON document into a single-sheet xlsx workbook:
//! records are flattened into compound-key records, aligned into a
//! rectangular table, and serialized with typed cells. The pipeline ties
//! the stages together and reports failures as typed errors instead of
//! panicking on malformed input.

pub mod error;
pub mod flatten;
pub mod naming;
pub mod pipeline;
pub mod sink;
pub mod table;
pub mod types;
pub mod writer;

pub use error::{ConvertError, ErrorKind};
pub use flatten::Flattener;
pub use pipeline::ConversionPipeline;
pub use sink::{ArtifactSink, DirectorySink};
pub use table::TableBuilder;
pub use types::{Artifact, ArtifactRef, ConvertConfig, FlatRecord, Table};
pub use writer::WorkbookWriter;
