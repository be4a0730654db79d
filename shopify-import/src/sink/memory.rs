//! Recording sink for pipeline tests

use std::sync::Mutex;

use async_trait::async_trait;

use super::{RecordSink, SinkError};
use crate::import::TypedRecord;

/// Keeps every insert call; fails the calls whose index is in `fail_calls`
#[derive(Debug, Default)]
pub struct MemorySink {
    calls: Mutex<Vec<(String, Vec<TypedRecord>)>>,
    fail_calls: Vec<usize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(fail_calls: Vec<usize>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_calls,
        }
    }

    /// All calls so far, including failed ones
    pub fn calls(&self) -> Vec<(String, Vec<TypedRecord>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.calls().iter().map(|(_, records)| records.len()).collect()
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn insert_batch(&self, table: &str, records: &[TypedRecord]) -> Result<(), SinkError> {
        let mut calls = self.calls.lock().unwrap();
        let index = calls.len();
        calls.push((table.to_string(), records.to_vec()));

        if self.fail_calls.contains(&index) {
            return Err(SinkError::with_status(409, "duplicate key value"));
        }
        Ok(())
    }
}
