//! Catalog module
//!
//! This module contains the relation registry, schema definitions, and type tags.

pub mod catalog;
pub mod schema;
pub mod types;

pub use catalog::{Catalog, CATALOG_RELATION, IDENTIFIER_FIELD};
pub use schema::{names_match, qualified_name, Field, RelationDef, Schema};
pub use types::DataType;
