//! Import command handlers

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::*;

use super::{CatalogArgs, CommonImportArgs, MappingArgs, ProductsArgs};
use crate::config::Config;
use crate::import::{BatchOutcome, FieldMapping, ImportReport, import_catalog, import_products};
use crate::sink::{DryRunSink, RecordSink, RestSink};
use crate::source::read_rows;

/// Pick the mapping: CLI flag, then config file, then the built-in table
fn resolve_mapping(cli_path: Option<&Path>, config: &Config) -> Result<FieldMapping> {
    match cli_path.or(config.import.mapping_file.as_deref()) {
        Some(path) => {
            let mapping = FieldMapping::load(path)?;
            log::info!(
                "Loaded {} column mappings from {}",
                mapping.len(),
                path.display()
            );
            Ok(mapping)
        }
        None => Ok(FieldMapping::shopify_products()),
    }
}

fn build_sink(common: &CommonImportArgs, config: &Config) -> Result<Box<dyn RecordSink>> {
    if common.dry_run {
        return Ok(Box::new(DryRunSink::new()));
    }

    let (url, key) = config.database.credentials()?;
    let sink = RestSink::new(url, key, config.database.timeout())
        .context("Failed to set up database client")?;
    Ok(Box::new(sink))
}

/// Status lines go to stderr so dry-run JSON on stdout stays clean
fn print_batch(index: usize, outcome: &BatchOutcome) {
    match outcome {
        BatchOutcome::Inserted { count } => {
            eprintln!("{} batch {}: inserted {} rows", "✓".green(), index + 1, count);
        }
        BatchOutcome::Failed { count, error } => {
            eprintln!(
                "{} batch {}: {} rows failed: {}",
                "✗".red(),
                index + 1,
                count,
                error
            );
        }
    }
}

fn print_summary(report: &ImportReport, started: Instant) {
    eprintln!();
    eprintln!("Table:     {}", report.table.cyan());
    eprintln!("Rows read: {}", report.rows_read);
    if report.skipped_duplicate + report.skipped_empty_handle > 0 {
        eprintln!(
            "Skipped:   {} duplicate handle, {} empty handle",
            report.skipped_duplicate, report.skipped_empty_handle
        );
    }
    if !report.warnings.is_empty() {
        eprintln!(
            "Warnings:  {} value(s) could not be converted",
            report.warnings.len().to_string().yellow()
        );
    }
    eprintln!("Elapsed:   {:.2}s", started.elapsed().as_secs_f64());

    if report.is_success() {
        eprintln!(
            "{} Imported {} rows",
            "✓".green().bold(),
            report.records_inserted().to_string().bright_green().bold()
        );
    } else {
        eprintln!(
            "{} Imported {} rows, {} rows failed in {} batch(es)",
            "✗".red().bold(),
            report.records_inserted(),
            report.records_failed().to_string().red().bold(),
            report.failed_batches()
        );
    }
}

/// Handle `products`: mapped rows in batches
pub async fn handle_products(args: ProductsArgs, config: &Config) -> Result<ImportReport> {
    let mapping = resolve_mapping(args.mapping.as_deref(), config)?;
    let table = args
        .common
        .table
        .clone()
        .unwrap_or_else(|| config.import.products_table.clone());
    let batch_size = args.batch_size.unwrap_or(config.import.batch_size);

    let rows = read_rows(&args.file, args.common.sheet.as_deref())?;
    let sink = build_sink(&args.common, config)?;

    eprintln!(
        "Importing {} into {} (batches of {})",
        args.file.display().to_string().cyan(),
        table.bright_green().bold(),
        batch_size
    );

    let started = Instant::now();
    let report = import_products(
        rows,
        &mapping,
        sink.as_ref(),
        &table,
        batch_size,
        &mut print_batch,
    )
    .await
    .with_context(|| format!("Import of {} failed", args.file.display()))?;

    print_summary(&report, started);
    Ok(report)
}

/// Handle `catalog`: one product per handle
pub async fn handle_catalog(args: CatalogArgs, config: &Config) -> Result<ImportReport> {
    let table = args
        .common
        .table
        .clone()
        .unwrap_or_else(|| config.import.catalog_table.clone());

    let rows = read_rows(&args.file, args.common.sheet.as_deref())?;
    let sink = build_sink(&args.common, config)?;

    eprintln!(
        "Importing catalog products from {} into {}",
        args.file.display().to_string().cyan(),
        table.bright_green().bold()
    );

    let started = Instant::now();
    let report = import_catalog(
        rows,
        &config.catalog,
        sink.as_ref(),
        &table,
        &mut print_batch,
    )
    .await
    .with_context(|| format!("Import of {} failed", args.file.display()))?;

    print_summary(&report, started);
    Ok(report)
}

/// Handle `mapping`: print the mapping that `products` would use
pub fn handle_mapping(args: MappingArgs, config: &Config) -> Result<()> {
    let mapping = resolve_mapping(args.mapping.as_deref(), config)?;
    print!("{}", mapping.to_toml_string()?);
    Ok(())
}
