//! CursorDB - a minimal in-memory SQL query engine built on pull-based cursors
//!
//! This library provides:
//! - SQL parsing (lexer, parser, AST)
//! - A catalog of relation names, queryable as the `TABLES` pseudo-relation
//! - Cursors: single row, catalog scan, rename, cross join, projection
//! - An expression compiler producing pure evaluators
//! - A planner and engine turning SQL text into a cursor tree
//!
//! ```
//! use cursordb::executor::ExecutionEngine;
//! use cursordb::storage::Value;
//!
//! let engine = ExecutionEngine::new();
//! let result = engine.collect("SELECT 1+2 AS sum").unwrap();
//! assert_eq!(result.rows[0].get("sum"), Some(&Value::Double(3.0)));
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod executor;
pub mod sql;
pub mod storage;

pub use config::EngineConfig;
pub use error::{Error, Result};
