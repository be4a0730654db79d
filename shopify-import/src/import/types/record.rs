//! Raw input rows and typed output records

use std::collections::BTreeMap;

use serde::Serialize;

use super::Value;

/// One input line: header name -> optional cell text, in file column order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: Vec<(String, Option<String>)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from (header, value) pairs; later duplicates of a header are ignored
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<String>)>,
        K: Into<String>,
    {
        let mut row = Self::new();
        for (key, value) in pairs {
            row.push(key, value);
        }
        row
    }

    /// Append a column unless the header was already seen in this row
    pub fn push(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        if !self.contains(&key) {
            self.fields.push((key, value));
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    /// Look up a column.
    ///
    /// Returns `None` when the column is not part of the row, and
    /// `Some(None)` when it is present without a value.
    pub fn field(&self, key: &str) -> Option<Option<&str>> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_deref())
    }

    /// Column text, treating a missing column and a missing value alike
    pub fn text(&self, key: &str) -> Option<&str> {
        self.field(key).flatten()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

/// Destination column -> typed value, ready for insertion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypedRecord {
    fields: BTreeMap<String, Value>,
}

impl Serialize for TypedRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, &value.to_json())?;
        }
        map.end()
    }
}

impl TypedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }

}

#[cfg(test)]
impl TypedRecord {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|k| k.as_str())
    }
}
