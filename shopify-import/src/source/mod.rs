//! Readers producing raw rows from export files

mod delimited;
mod workbook;

pub use delimited::read_csv;
pub use workbook::read_xlsx;

use std::path::Path;

use anyhow::{Result, bail};

use crate::import::RawRow;

/// Boxed row iterator; an `Err` item means the file could not be read further
pub type RowIter = Box<dyn Iterator<Item = Result<RawRow>>>;

/// Input file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Xlsx,
}

impl SourceFormat {
    /// Detect from the file extension; anything that is not a workbook is read as CSV
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("xlsx") | Some("xlsm") => SourceFormat::Xlsx,
            _ => SourceFormat::Csv,
        }
    }
}

/// Open an export file and return its data rows in file order
pub fn read_rows(path: &Path, sheet: Option<&str>) -> Result<RowIter> {
    if !path.exists() {
        bail!("Input file does not exist: {}", path.display());
    }

    match SourceFormat::from_path(path) {
        SourceFormat::Csv => {
            if sheet.is_some() {
                log::warn!("--sheet is ignored for CSV input");
            }
            read_csv(path)
        }
        SourceFormat::Xlsx => read_xlsx(path, sheet),
    }
}
