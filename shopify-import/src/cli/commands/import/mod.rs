//! Import command arguments

pub mod handler;

use std::path::PathBuf;

use clap::Args;

/// Options shared by both import modes
#[derive(Debug, Args)]
pub struct CommonImportArgs {
    /// Destination table (overrides the config file)
    #[arg(short, long)]
    pub table: Option<String>,

    /// Worksheet to read when the input is an Excel workbook
    #[arg(long)]
    pub sheet: Option<String>,

    /// Print records as JSON lines instead of inserting them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct ProductsArgs {
    /// Shopify export file (.csv or .xlsx)
    pub file: PathBuf,

    /// Records per insert call
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// TOML mapping file replacing the built-in column mapping
    #[arg(short, long)]
    pub mapping: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonImportArgs,
}

#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Shopify export file (.csv or .xlsx)
    pub file: PathBuf,

    #[command(flatten)]
    pub common: CommonImportArgs,
}

#[derive(Debug, Args)]
pub struct MappingArgs {
    /// Validate and print this mapping file instead of the effective one
    #[arg(short, long)]
    pub mapping: Option<PathBuf>,
}
