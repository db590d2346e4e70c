//! Execution engine
//!
//! Front door of the crate: parses SQL, plans it against the catalog and
//! hands back a cursor, or drains the cursor into a [`QueryResult`].

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::{BoxedCursor, Cursor, CursorExt, Planner};
use crate::catalog::{Catalog, Field};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::sql::{Parser, Statement};
use crate::storage::Tuple;

/// Fully materialized query result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    /// Output schema
    pub columns: Vec<Field>,
    /// Result rows
    pub rows: Vec<Tuple>,
}

impl QueryResult {
    /// Drain `cursor` and close it
    pub fn from_cursor(cursor: &mut dyn Cursor) -> Self {
        let columns = cursor.schema().fields().to_vec();
        let rows = cursor.rows().collect();
        cursor.close();
        Self { columns, rows }
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Execution engine
pub struct ExecutionEngine {
    catalog: Arc<Catalog>,
    planner: Planner,
}

impl Default for ExecutionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionEngine {
    /// Create an engine with an empty catalog and default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_catalog(Arc::new(Catalog::new()), config)
    }

    /// Create an engine over an existing catalog. The catalog decides the
    /// name its pseudo-relation is queried under.
    pub fn with_catalog(catalog: Arc<Catalog>, config: EngineConfig) -> Self {
        let planner = Planner::with_config(catalog.clone(), config);
        Self { catalog, planner }
    }

    /// The catalog shared with every scan this engine opens
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Parse and plan `sql`, returning an unconsumed cursor
    pub fn query(&self, sql: &str) -> Result<BoxedCursor> {
        let stmt = Parser::new(sql)?.parse()?;
        self.execute(stmt)
    }

    /// Plan an already parsed statement
    pub fn execute(&self, stmt: Statement) -> Result<BoxedCursor> {
        debug!(kind = stmt.kind(), "executing statement");
        self.planner.plan(stmt)
    }

    /// Run `sql` to completion
    pub fn collect(&self, sql: &str) -> Result<QueryResult> {
        let mut cursor = self.query(sql)?;
        Ok(QueryResult::from_cursor(cursor.as_mut()))
    }
}
