//! Per-field value conversion driven by the declared field kind

use crate::import::{FieldKind, Value};

/// Raw text that could not be converted to the declared kind
///
/// The field is still written, as null; this only carries the detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertError {
    pub raw: String,
    pub kind: FieldKind,
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot read '{}' as {}", self.raw, self.kind)
    }
}

impl std::error::Error for ConvertError {}

/// Values read as `true` for boolean fields (compared lowercased)
const TRUE_LITERALS: &[&str] = &["true", "1", "yes"];

/// Convert a raw cell to a typed value.
///
/// Absent and whitespace-only input is null for every kind. A numeric
/// parse failure is an `Err`; callers store null for it.
pub fn convert(raw: Option<&str>, kind: FieldKind) -> Result<Value, ConvertError> {
    let text = match raw.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return Ok(Value::Null),
    };

    match kind {
        FieldKind::Text => Ok(Value::String(text.to_string())),
        FieldKind::Boolean => {
            let lowered = text.to_lowercase();
            Ok(Value::Bool(TRUE_LITERALS.contains(&lowered.as_str())))
        }
        FieldKind::Numeric => parse_number(text).ok_or_else(|| ConvertError {
            raw: text.to_string(),
            kind,
        }),
    }
}

/// Float when the text has a decimal point, integer otherwise.
///
/// Integers outside the `i64` range and non-finite floats are parse failures.
fn parse_number(text: &str) -> Option<Value> {
    if text.contains('.') {
        text.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Value::Float)
    } else {
        text.parse::<i64>().ok().map(Value::Int)
    }
}
