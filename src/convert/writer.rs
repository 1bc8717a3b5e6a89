use crate::convert::error::ConvertError;
use crate::convert::types::Table;
use log::debug;
use rust_xlsxwriter::Workbook;
use serde_json::{Number, Value};
use std::path::Path;

/// Serializes a table into a single-sheet xlsx workbook.
///
/// The header row carries the column names; data rows follow in table
/// order. String, number, and boolean values become typed cells; null and
/// missing values stay blank. On failure the target path is removed, so a
/// half-written workbook is never left behind.
pub struct WorkbookWriter {
    sheet_name: String,
}

impl WorkbookWriter {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        WorkbookWriter {
            sheet_name: sheet_name.into(),
        }
    }

    /// Write `table` as a complete workbook at `path`, or nothing at all.
    pub fn serialize(&self, table: &Table, path: &Path) -> Result<(), ConvertError> {
        debug!(
            "serializing {} rows x {} columns to {}",
            table.row_count(),
            table.column_count(),
            path.display()
        );

        match self.write_workbook(table, path) {
            Ok(()) => Ok(()),
            Err(err) => {
                let _ = std::fs::remove_file(path);
                Err(ConvertError::WriteFailure {
                    detail: err.to_string(),
                })
            }
        }
    }

    fn write_workbook(&self, table: &Table, path: &Path) -> Result<(), rust_xlsxwriter::XlsxError> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(&self.sheet_name)?;

        for (col, name) in table.columns.iter().enumerate() {
            sheet.write_string(0, col as u16, name)?;
        }

        for (idx, row) in table.rows.iter().enumerate() {
            let row_num = (idx + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                let col_num = col as u16;
                match cell {
                    Value::Null => {}
                    Value::Bool(b) => {
                        sheet.write_boolean(row_num, col_num, *b)?;
                    }
                    Value::Number(n) => match exact_f64(n) {
                        Some(f) => {
                            sheet.write_number(row_num, col_num, f)?;
                        }
                        None => {
                            sheet.write_string(row_num, col_num, n.to_string())?;
                        }
                    },
                    Value::String(s) => {
                        sheet.write_string(row_num, col_num, s)?;
                    }
                    other => {
                        sheet.write_string(row_num, col_num, other.to_string())?;
                    }
                }
            }
        }

        workbook.save(path)?;
        Ok(())
    }
}

/// Convert a JSON number to f64 only when the round trip is exact.
/// Integers beyond 2^53 fall back to text cells instead of losing digits.
fn exact_f64(n: &Number) -> Option<f64> {
    if let Some(i) = n.as_i64() {
        let f = i as f64;
        return (f as i64 == i).then_some(f);
    }
    if let Some(u) = n.as_u64() {
        let f = u as f64;
        return (f as u64 == u).then_some(f);
    }
    n.as_f64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::table::TableBuilder;
    use crate::convert::types::FlatRecord;
    use serde_json::json;

    fn sample_table() -> Table {
        let records: Vec<FlatRecord> = vec![
            serde_json::from_value(json!({"name": "Alice", "age": 30, "active": true})).unwrap(),
            serde_json::from_value(json!({"name": "Bob", "note": null})).unwrap(),
        ];
        TableBuilder::build(&records)
    }

    #[test]
    fn test_writes_complete_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");

        let writer = WorkbookWriter::new("Sheet1");
        writer.serialize(&sample_table(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(!bytes.is_empty());
        // xlsx is a zip container
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_failure_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.xlsx");

        let writer = WorkbookWriter::new("Sheet1");
        let err = writer.serialize(&sample_table(), &path).unwrap_err();

        assert!(matches!(err, ConvertError::WriteFailure { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_exact_f64_boundaries() {
        assert_eq!(exact_f64(&Number::from(3)), Some(3.0));
        assert_eq!(exact_f64(&Number::from(1u64 << 53)), Some(9007199254740992.0));
        // 2^53 + 1 cannot round-trip through f64
        assert_eq!(exact_f64(&Number::from((1u64 << 53) + 1)), None);
        assert_eq!(exact_f64(&Number::from_f64(1.5).unwrap()), Some(1.5));
    }
}
