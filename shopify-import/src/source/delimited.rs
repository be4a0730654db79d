//! CSV export reader

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};

use super::RowIter;
use crate::import::RawRow;

/// Pair a record with the header row.
///
/// Columns missing at the end of a short record are present without a
/// value; cells beyond the header are dropped.
fn record_to_row(headers: &StringRecord, record: &StringRecord) -> RawRow {
    RawRow::from_pairs(
        headers
            .iter()
            .enumerate()
            .map(|(i, header)| (header, record.get(i).map(str::to_string))),
    )
}

/// Read a CSV file with a header row
pub fn read_csv(path: &Path) -> Result<RowIter> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(file);

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read CSV header row: {}", path.display()))?
        .clone();
    log::debug!("CSV header has {} columns", headers.len());

    let display = path.display().to_string();
    let rows = reader.into_records().enumerate().map(move |(i, record)| {
        let record = record
            .with_context(|| format!("Failed to read record {} of {}", i + 1, display))?;
        Ok(record_to_row(&headers, &record))
    });

    Ok(Box::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_reads_rows_in_order() {
        let file = write_csv("Handle,Title,Variant Price\na,Cake,12.5\nb,,3\n");
        let rows: Vec<RawRow> = read_csv(file.path())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text("Handle"), Some("a"));
        assert_eq!(rows[0].text("Variant Price"), Some("12.5"));
        assert_eq!(rows[1].field("Title"), Some(Some("")));
    }

    #[test]
    fn test_quoted_multiline_field() {
        let file = write_csv("Handle,Body (HTML)\na,\"<p>line one\nline \"\"two\"\"</p>\"\n");
        let rows: Vec<RawRow> = read_csv(file.path())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].text("Body (HTML)"),
            Some("<p>line one\nline \"two\"</p>")
        );
    }

    #[test]
    fn test_short_and_long_records() {
        let file = write_csv("Handle,Title,Tags\na\nb,Bone,chew,extra\n");
        let rows: Vec<RawRow> = read_csv(file.path())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(rows[0].field("Title"), Some(None));
        assert_eq!(rows[0].field("Tags"), Some(None));
        assert_eq!(rows[1].len(), 3);
        assert_eq!(rows[1].text("Tags"), Some("chew"));
    }

    #[test]
    fn test_header_only() {
        let file = write_csv("Handle,Title\n");
        assert_eq!(read_csv(file.path()).unwrap().count(), 0);
    }
}
