//! Product import from Shopify exports
//!
//! This module turns raw export rows into typed records using a field
//! mapping with per-column type tags, and drives them into a record sink.

pub mod types;
pub mod transform;
pub mod batch;
pub mod dedupe;
pub mod catalog;
pub mod pipeline;

pub use types::*;
pub use transform::{FieldWarning, transform_row};
pub use batch::{BatchAccumulator, DEFAULT_BATCH_SIZE};
pub use dedupe::{HandleFilter, SkipReason};
pub use catalog::{CatalogDefaults, build_catalog_product};
pub use pipeline::{BatchOutcome, ImportReport, import_catalog, import_products};
