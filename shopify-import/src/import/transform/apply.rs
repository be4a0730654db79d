//! Row transform application logic

use crate::import::{FieldKind, FieldMapping, RawRow, TypedRecord, Value};

use super::convert::convert;

/// A field whose raw text did not convert and was written as null
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWarning {
    pub field: String,
    pub raw: String,
    pub kind: FieldKind,
}

impl std::fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: '{}' is not {}", self.field, self.raw, self.kind)
    }
}

/// Result of transforming one row
#[derive(Debug, Clone, PartialEq)]
pub struct RowTransform {
    pub record: TypedRecord,
    pub warnings: Vec<FieldWarning>,
}

#[cfg(test)]
impl RowTransform {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Apply a field mapping to a raw row.
///
/// Only columns present in the row are written; a present column with no
/// value becomes an explicit null.
pub fn transform_row(row: &RawRow, mapping: &FieldMapping) -> RowTransform {
    let mut record = TypedRecord::new();
    let mut warnings = Vec::new();

    for rule in mapping.rules() {
        let Some(raw) = row.field(&rule.source) else {
            continue;
        };

        let value = match convert(raw, rule.kind) {
            Ok(value) => value,
            Err(err) => {
                warnings.push(FieldWarning {
                    field: rule.target.clone(),
                    raw: err.raw,
                    kind: err.kind,
                });
                Value::Null
            }
        };
        record.insert(rule.target.as_str(), value);
    }

    RowTransform { record, warnings }
}
