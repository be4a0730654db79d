//! Core types for product imports

mod value;
mod mapping;
mod record;

pub use value::*;
pub use mapping::*;
pub use record::*;
