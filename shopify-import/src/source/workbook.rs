//! Read export rows from Excel workbooks
//!
//! The first row of the sheet is the header row. Cells are turned back into
//! the text a CSV export would contain, so the same conversion rules apply.

use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, Xlsx, open_workbook};

use super::RowIter;
use crate::import::RawRow;

/// Convert an Excel cell to export text
fn cell_to_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => {
            // Whole numbers print without a decimal point, as in the CSV export
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                Some((*f as i64).to_string())
            } else {
                Some(f.to_string())
            }
        }
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(format!("{}", dt)),
        Data::DateTimeIso(s) => Some(s.clone()),
        Data::DurationIso(s) => Some(s.clone()),
        Data::Error(_) => None,
    }
}

/// Read a sheet (default: the first one) of an `.xlsx` workbook
pub fn read_xlsx(path: &Path, sheet: Option<&str>) -> Result<RowIter> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let sheet_name = match sheet {
        Some(name) => {
            if !sheet_names.iter().any(|s| s == name) {
                bail!(
                    "Sheet '{}' not found in {} (available: {})",
                    name,
                    path.display(),
                    sheet_names.join(", ")
                );
            }
            name.to_string()
        }
        None => sheet_names
            .first()
            .cloned()
            .with_context(|| format!("Workbook has no sheets: {}", path.display()))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|c| cell_to_text(c).unwrap_or_default())
            .collect(),
        None => return Ok(Box::new(std::iter::empty())),
    };
    log::debug!(
        "Sheet '{}' header has {} columns",
        sheet_name,
        headers.len()
    );

    let mut parsed = Vec::new();
    for row in rows {
        // Skip fully empty rows, like the CSV reader does for blank lines
        if row.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }

        let mut raw = RawRow::new();
        for (col_idx, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            raw.push(header.as_str(), row.get(col_idx).and_then(cell_to_text));
        }
        parsed.push(Ok(raw));
    }

    Ok(Box::new(parsed.into_iter()))
}
