use crate::convert::types::{FlatRecord, Table};
use serde_json::Value;
use std::collections::HashSet;

/// Aligns a batch of flat records into a rectangular table.
pub struct TableBuilder;

impl TableBuilder {
    /// Build a table from a sequence of flat records.
    ///
    /// The column set is the union of all keys, ordered by first
    /// appearance across the records (never alphabetical). Each record
    /// becomes one row; a key the record does not carry fills in as
    /// `Value::Null`, which the writer renders as a blank cell.
    ///
    /// Total function: empty input or all-empty records produce a table
    /// with zero columns, which the pipeline classifies. No data shape
    /// makes this fail.
    pub fn build(records: &[FlatRecord]) -> Table {
        let mut columns: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for record in records {
            for key in record.keys() {
                if seen.insert(key.clone()) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| record.get(column).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Table { columns, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> FlatRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_columns_in_first_seen_order() {
        let records = vec![
            record(json!({"b": 1, "a": 2})),
            record(json!({"a": 3, "c": 4})),
        ];

        let table = TableBuilder::build(&records);
        assert_eq!(table.columns, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_missing_keys_fill_as_null() {
        let records = vec![
            record(json!({"a": 1})),
            record(json!({"a": 2, "b": 3})),
        ];

        let table = TableBuilder::build(&records);
        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(table.rows[0], vec![json!(1), Value::Null]);
        assert_eq!(table.rows[1], vec![json!(2), json!(3)]);
    }

    #[test]
    fn test_rows_are_rectangular() {
        let records = vec![
            record(json!({"x": 1})),
            record(json!({"y": "two", "z": false})),
            record(json!({})),
        ];

        let table = TableBuilder::build(&records);
        for row in &table.rows {
            assert_eq!(row.len(), table.column_count());
        }
    }

    #[test]
    fn test_no_records_yields_empty_table() {
        let table = TableBuilder::build(&[]);
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_all_empty_records_yield_zero_columns() {
        let records = vec![FlatRecord::new(), FlatRecord::new()];

        let table = TableBuilder::build(&records);
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_values_survive_alignment() {
        let records = vec![record(json!({"n": 1.5, "b": true, "s": "hi", "v": null}))];

        let table = TableBuilder::build(&records);
        assert_eq!(table.rows[0], vec![json!(1.5), json!(true), json!("hi"), Value::Null]);
    }
}
