//! Destinations for typed records
//!
//! A sink accepts one batch at a time and either stores all of it or
//! reports a [`SinkError`]; there is no partial success.

pub mod rest;
pub mod dry_run;
#[cfg(test)]
pub mod memory;

pub use rest::RestSink;
pub use dry_run::DryRunSink;

use async_trait::async_trait;

use crate::import::TypedRecord;

/// Error from a batch insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkError {
    /// HTTP status, when the server answered
    pub status: Option<u16>,
    pub message: String,
}

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {}: {}", status, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for SinkError {}

/// Inserts batches of records into a named table
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn insert_batch(&self, table: &str, records: &[TypedRecord]) -> Result<(), SinkError>;
}
