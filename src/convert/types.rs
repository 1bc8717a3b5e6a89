use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;

/// A single flattened record: compound key -> scalar value.
///
/// Insertion order follows traversal order of the source document. Values
/// are always scalars (string, number, boolean, null); nested structure has
/// been folded into the compound keys.
pub type FlatRecord = Map<String, Value>;

/// A rectangular table aligned to an ordered column set.
///
/// Every row has exactly `columns.len()` cells. A cell holding
/// `Value::Null` renders as a blank cell in the workbook, whether the
/// source record carried an explicit null or no entry at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column names in first-seen order across the input records
    pub columns: Vec<String>,

    /// One row per input record, aligned to `columns`
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the table carries no columns at all
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Reference to a published artifact
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ArtifactRef {
    /// Workbook published into a local directory
    File(PathBuf),
    /// Workbook handed off to an upload capability (e.g. an object store URL)
    Remote(String),
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactRef::File(path) => write!(f, "{}", path.display()),
            ArtifactRef::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// The output of a successful conversion
#[derive(Debug, Clone, Serialize)]
pub struct Artifact {
    /// Output file name, derived from the input name hint
    pub file_name: String,

    /// Where the workbook ended up
    pub reference: ArtifactRef,

    /// Number of data rows written (excluding the header row)
    pub rows: usize,

    /// Number of columns written
    pub columns: usize,
}

/// Configuration for the conversion process
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Separator joining nested keys and array indices into compound keys
    pub separator: String,

    /// Name of the single worksheet in the output workbook
    pub sheet_name: String,

    /// Maximum input size in bytes enforced before parsing (0 = unlimited).
    /// Checked by the file/stdin entry points, not by the pipeline itself.
    pub max_input_bytes: u64,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        ConvertConfig {
            separator: String::from("_"),
            sheet_name: String::from("Sheet1"),
            max_input_bytes: 5 * 1024 * 1024,
        }
    }
}
