//! Storage module
//!
//! Row representation and the base relation backends:
//! - Values and tuples
//! - Catalog scan

pub mod catalog_scan;
pub mod tuple;

pub use catalog_scan::CatalogScan;
pub use tuple::{Tuple, Value};
