//! Sink that prints records instead of inserting them

use std::io::Write;

use async_trait::async_trait;

use super::{RecordSink, SinkError};
use crate::import::TypedRecord;

/// Writes each record as one JSON line on stdout
#[derive(Debug, Default)]
pub struct DryRunSink;

impl DryRunSink {
    pub fn new() -> Self {
        Self
    }

    fn write_batch<W: Write>(out: &mut W, records: &[TypedRecord]) -> std::io::Result<()> {
        for record in records {
            serde_json::to_writer(&mut *out, record)?;
            writeln!(out)?;
        }
        out.flush()
    }
}

#[async_trait]
impl RecordSink for DryRunSink {
    async fn insert_batch(&self, table: &str, records: &[TypedRecord]) -> Result<(), SinkError> {
        log::info!("Dry run: {} record(s) for table '{}'", records.len(), table);

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        Self::write_batch(&mut out, records)
            .map_err(|e| SinkError::new(format!("Failed to write dry-run output: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::Value;

    #[test]
    fn test_writes_json_lines() {
        let mut first = TypedRecord::new();
        first.insert("handle", Value::String("a".into()));
        let mut second = TypedRecord::new();
        second.insert("variant_price", Value::Int(3));

        let mut out = Vec::new();
        DryRunSink::write_batch(&mut out, &[first, second]).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "{\"handle\":\"a\"}\n{\"variant_price\":3}\n");
    }

    #[tokio::test]
    async fn test_always_succeeds() {
        let sink = DryRunSink::new();
        assert!(sink.insert_batch("products", &[]).await.is_ok());
    }
}
