//! Import pipeline: rows -> records -> batches -> sink

use anyhow::Result;

use crate::import::{
    BatchAccumulator, CatalogDefaults, FieldMapping, FieldWarning, HandleFilter, RawRow,
    SkipReason, TypedRecord, build_catalog_product, catalog::columns, transform_row,
};
use crate::sink::{RecordSink, SinkError};

/// Outcome of one sink call
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    Inserted { count: usize },
    Failed { count: usize, error: SinkError },
}

impl BatchOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, BatchOutcome::Failed { .. })
    }
}

/// A conversion warning tied to its input row (1-based, header excluded)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowWarning {
    pub row: usize,
    pub warning: FieldWarning,
}

/// Aggregated result of an import run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub table: String,
    pub rows_read: usize,
    pub records_built: usize,
    pub skipped_empty_handle: usize,
    pub skipped_duplicate: usize,
    pub batches: Vec<BatchOutcome>,
    pub warnings: Vec<RowWarning>,
}

impl ImportReport {
    fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            ..Self::default()
        }
    }

    pub fn records_inserted(&self) -> usize {
        self.batches
            .iter()
            .map(|b| match b {
                BatchOutcome::Inserted { count } => *count,
                BatchOutcome::Failed { .. } => 0,
            })
            .sum()
    }

    pub fn records_failed(&self) -> usize {
        self.batches
            .iter()
            .map(|b| match b {
                BatchOutcome::Failed { count, .. } => *count,
                BatchOutcome::Inserted { .. } => 0,
            })
            .sum()
    }

    pub fn failed_batches(&self) -> usize {
        self.batches.iter().filter(|b| b.is_failed()).count()
    }

    /// True when no sink call failed
    pub fn is_success(&self) -> bool {
        self.failed_batches() == 0
    }

    fn record_warnings(&mut self, row: usize, warnings: Vec<FieldWarning>) {
        for warning in warnings {
            log::warn!("Row {}: {}", row, warning);
            self.warnings.push(RowWarning { row, warning });
        }
    }

    fn record_skip(&mut self, row: usize, reason: SkipReason) {
        match reason {
            SkipReason::EmptyHandle => {
                log::debug!("Row {}: empty handle, skipped", row);
                self.skipped_empty_handle += 1;
            }
            SkipReason::Duplicate => {
                log::debug!("Row {}: handle already imported, skipped", row);
                self.skipped_duplicate += 1;
            }
        }
    }
}

/// Progress callback invoked after every sink call
pub trait ImportProgress {
    fn batch_done(&mut self, index: usize, outcome: &BatchOutcome);
}

impl<F: FnMut(usize, &BatchOutcome)> ImportProgress for F {
    fn batch_done(&mut self, index: usize, outcome: &BatchOutcome) {
        self(index, outcome)
    }
}

/// Send one batch and record its outcome; failures never stop the run
async fn flush(
    sink: &dyn RecordSink,
    report: &mut ImportReport,
    batch: Vec<TypedRecord>,
    progress: &mut dyn ImportProgress,
) {
    let count = batch.len();
    let outcome = match sink.insert_batch(&report.table, &batch).await {
        Ok(()) => {
            log::info!("Inserted batch of {} rows into '{}'", count, report.table);
            BatchOutcome::Inserted { count }
        }
        Err(error) => {
            log::error!(
                "Failed to insert batch of {} rows into '{}': {}",
                count,
                report.table,
                error
            );
            BatchOutcome::Failed { count, error }
        }
    };

    progress.batch_done(report.batches.len(), &outcome);
    report.batches.push(outcome);
}

/// Map every row through `mapping` and insert in batches of `batch_size`
pub async fn import_products<I>(
    rows: I,
    mapping: &FieldMapping,
    sink: &dyn RecordSink,
    table: &str,
    batch_size: usize,
    progress: &mut dyn ImportProgress,
) -> Result<ImportReport>
where
    I: IntoIterator<Item = Result<RawRow>>,
{
    let mut report = ImportReport::new(table);
    let mut batches = BatchAccumulator::new(batch_size);

    for (index, row) in rows.into_iter().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                log::error!(
                    "Row {}: unreadable input, dropping {} buffered record(s) not yet sent",
                    index + 1,
                    batches.pending()
                );
                return Err(e);
            }
        };
        let line = index + 1;
        report.rows_read += 1;

        let result = transform_row(&row, mapping);
        report.record_warnings(line, result.warnings);
        report.records_built += 1;

        if let Some(batch) = batches.push(result.record) {
            flush(sink, &mut report, batch, progress).await;
        }
    }

    if let Some(batch) = batches.finish() {
        flush(sink, &mut report, batch, progress).await;
    }

    Ok(report)
}

/// Insert one catalog product per distinct handle, one row per sink call
pub async fn import_catalog<I>(
    rows: I,
    defaults: &CatalogDefaults,
    sink: &dyn RecordSink,
    table: &str,
    progress: &mut dyn ImportProgress,
) -> Result<ImportReport>
where
    I: IntoIterator<Item = Result<RawRow>>,
{
    let mut report = ImportReport::new(table);
    let mut handles = HandleFilter::new();

    for (index, row) in rows.into_iter().enumerate() {
        let row = row?;
        let line = index + 1;
        report.rows_read += 1;

        let handle = row.text(columns::HANDLE);
        if let Err(reason) = handles.admit(handle) {
            report.record_skip(line, reason);
            continue;
        }
        let handle = handle.map(str::trim).unwrap_or_default();

        let (record, warnings) = build_catalog_product(&row, handle, defaults);
        report.record_warnings(line, warnings);
        report.records_built += 1;

        flush(sink, &mut report, vec![record], progress).await;
    }

    Ok(report)
}
