use crate::convert::types::FlatRecord;
use serde_json::Value;

/// Folds a nested JSON value into a single-level record of compound keys.
///
/// Object keys are visited in document order; array elements contribute
/// their 0-based index as a key segment. Pure computation: the same value
/// always flattens to the same record.
pub struct Flattener {
    separator: String,
}

impl Flattener {
    pub fn new(separator: impl Into<String>) -> Self {
        Flattener {
            separator: separator.into(),
        }
    }

    /// Flatten `value` into a record of compound key -> scalar.
    ///
    /// Traversal uses an explicit work stack so adversarially deep nesting
    /// cannot exhaust the call stack. Children are pushed in reverse, so
    /// pop order matches document order and the record's insertion order
    /// follows the traversal.
    ///
    /// Empty objects and arrays contribute nothing. A scalar paired with a
    /// non-empty prefix yields the single entry `{prefix: value}`; a scalar
    /// with an empty prefix yields an empty record (the pipeline validates
    /// top-level shape before this point). If two paths stringify to the
    /// same compound key (an object key that itself contains the
    /// separator), the later entry wins.
    pub fn flatten(&self, value: &Value, prefix: &str) -> FlatRecord {
        let mut record = FlatRecord::new();
        let mut stack: Vec<(String, &Value)> = vec![(prefix.to_string(), value)];

        while let Some((key, value)) = stack.pop() {
            match value {
                Value::Object(map) => {
                    for (child_key, child) in map.iter().rev() {
                        stack.push((self.join(&key, child_key), child));
                    }
                }
                Value::Array(items) => {
                    for (idx, child) in items.iter().enumerate().rev() {
                        stack.push((self.join(&key, &idx.to_string()), child));
                    }
                }
                scalar => {
                    if !key.is_empty() {
                        record.insert(key, scalar.clone());
                    }
                }
            }
        }

        record
    }

    fn join(&self, prefix: &str, segment: &str) -> String {
        if prefix.is_empty() {
            segment.to_string()
        } else {
            format!("{}{}{}", prefix, self.separator, segment)
        }
    }
}
