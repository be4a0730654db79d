//! Command-line interface

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::import::{CatalogArgs, MappingArgs, ProductsArgs};

#[derive(Debug, Parser)]
#[command(
    name = "shopify-import",
    version,
    about = "Import Shopify product exports into a hosted Postgres table"
)]
pub struct Cli {
    /// Config file (default: <config dir>/shopify-import/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Insert every export row into the products table using the column mapping
    Products(ProductsArgs),
    /// Insert one simplified storefront product per handle
    Catalog(CatalogArgs),
    /// Print the effective column mapping as TOML
    Mapping(MappingArgs),
}
