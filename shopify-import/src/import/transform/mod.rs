//! Transform engine for turning raw export rows into typed records

mod convert;
mod apply;

pub use apply::{FieldWarning, transform_row};
