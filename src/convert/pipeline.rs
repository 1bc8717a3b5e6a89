use crate::convert::error::ConvertError;
use crate::convert::flatten::Flattener;
use crate::convert::naming;
use crate::convert::sink::ArtifactSink;
use crate::convert::table::TableBuilder;
use crate::convert::types::{Artifact, ConvertConfig, FlatRecord};
use crate::convert::writer::WorkbookWriter;
use log::{debug, info, warn};
use serde_json::Value;

/// Orchestrates one conversion: parse, shape-validate, flatten, build,
/// serialize, publish.
///
/// Stateless and synchronous; each call owns its input, intermediate
/// records, and staging file exclusively, so concurrent conversions never
/// interact. Collision-free output naming keeps concurrent writers to the
/// same destination apart.
pub struct ConversionPipeline {
    config: ConvertConfig,
}

impl ConversionPipeline {
    pub fn new(config: ConvertConfig) -> Self {
        ConversionPipeline { config }
    }

    /// Convert raw JSON bytes into a published workbook.
    ///
    /// `name_hint` seeds the output file name (typically the uploaded
    /// file's name). Every failure comes back as a typed [`ConvertError`];
    /// nothing here panics on malformed input, and no partial artifact
    /// survives a failed run.
    pub fn convert(
        &self,
        input: &[u8],
        name_hint: &str,
        sink: &dyn ArtifactSink,
    ) -> Result<Artifact, ConvertError> {
        let value = parse(input)?;
        let records = normalize_shape(value)?;

        if records.is_empty() {
            warn!("rejecting {}: no records", name_hint);
            return Err(ConvertError::EmptyInput);
        }
        debug!("flattening {} record(s) from {}", records.len(), name_hint);

        let flattener = Flattener::new(self.config.separator.as_str());
        let flat: Vec<FlatRecord> = records
            .iter()
            .enumerate()
            .map(|(idx, record)| match record {
                Value::Object(_) | Value::Array(_) => flattener.flatten(record, ""),
                // a bare scalar element keeps its position as its only key
                scalar => flattener.flatten(scalar, &idx.to_string()),
            })
            .collect();

        let table = TableBuilder::build(&flat);
        if table.is_empty() {
            warn!("rejecting {}: records flattened to zero columns", name_hint);
            return Err(ConvertError::NoTabularData);
        }

        let file_name = naming::output_file_name(name_hint);
        let staged = std::env::temp_dir().join(naming::staging_file_name());

        let writer = WorkbookWriter::new(self.config.sheet_name.as_str());
        writer.serialize(&table, &staged)?;

        let published = sink.publish(&staged, &file_name);
        // the staging file is done with, whatever publish said
        let _ = std::fs::remove_file(&staged);

        let reference = published.map_err(|err| {
            warn!("publishing {} failed: {:#}", file_name, err);
            ConvertError::WriteFailure {
                detail: format!("{:#}", err),
            }
        })?;

        info!(
            "converted {} into {} ({} rows x {} columns)",
            name_hint,
            file_name,
            table.row_count(),
            table.column_count()
        );

        Ok(Artifact {
            file_name,
            reference,
            rows: table.row_count(),
            columns: table.column_count(),
        })
    }
}

fn parse(input: &[u8]) -> Result<Value, ConvertError> {
    serde_json::from_slice(input).map_err(|err| ConvertError::MalformedJson {
        detail: err.to_string(),
    })
}

/// Reduce the top-level value to a record sequence.
///
/// An object carrying a `data` array unwraps to that array; a bare array
/// is the sequence itself; any other object becomes a batch of one, taken
/// literally even when its values are themselves arrays. A top-level
/// scalar has no tabular reading and is rejected.
fn normalize_shape(value: Value) -> Result<Vec<Value>, ConvertError> {
    match value {
        Value::Object(mut map) => {
            if matches!(map.get("data"), Some(Value::Array(_))) {
                if let Some(Value::Array(records)) = map.remove("data") {
                    return Ok(records);
                }
            }
            Ok(vec![Value::Object(map)])
        }
        Value::Array(records) => Ok(records),
        other => Err(ConvertError::InvalidShape {
            found: json_type(&other).to_string(),
        }),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
