//! Query Planner for CursorDB
//!
//! Turns a parsed statement into a tree of cursors:
//!
//! ```text
//! Projection
//!   CrossJoin
//!     CrossJoin
//!       Rename(t1) <- CatalogScan
//!       Rename(t2) <- CatalogScan
//!     Rename(t3) <- CatalogScan
//! ```
//!
//! FROM entries are folded left to right, the first one ending up as the
//! outermost loop. A SELECT without FROM reads from a single seed row.

use std::sync::Arc;

use tracing::debug;

use super::{BoxedCursor, CrossJoin, Cursor, Projection, Rename, SingleRow};
use crate::catalog::{names_match, qualified_name, Catalog, DataType, Schema};
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::sql::ast::*;
use crate::storage::{CatalogScan, Value};

/// Query planner
pub struct Planner {
    catalog: Arc<Catalog>,
    config: EngineConfig,
}

impl Planner {
    /// Create a new planner with the default configuration
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_config(catalog, EngineConfig::default())
    }

    pub fn with_config(catalog: Arc<Catalog>, config: EngineConfig) -> Self {
        Self { catalog, config }
    }

    /// Plan a statement. Only queries produce cursors; any other statement
    /// kind is reported as unsupported.
    pub fn plan(&self, stmt: Statement) -> Result<BoxedCursor> {
        match stmt {
            Statement::Select(select) => self.plan_select(select),
            Statement::ShowTables => {
                self.plan_select(SelectStatement::all_from(self.catalog.relation_name()))
            }
            other => Err(Error::UnsupportedQuery(other.kind().to_string())),
        }
    }

    fn plan_select(&self, select: SelectStatement) -> Result<BoxedCursor> {
        let tables = select.from.unwrap_or_default();

        let mut source: BoxedCursor = match tables.split_first() {
            Some((first, rest)) => self.plan_from(first, rest)?,
            None => Box::new(SingleRow::new(Value::Integer(1), DataType::Integer)),
        };

        let targets = match self.expand_columns(&select.columns, &tables, source.schema()) {
            Ok(targets) => targets,
            Err(err) => {
                source.close();
                return Err(err);
            }
        };
        let projection = Projection::new(source, targets)?;

        debug!(
            tables = tables.len(),
            columns = projection.columns().len(),
            "select planned"
        );
        Ok(Box::new(projection))
    }

    /// Rename every FROM entry by its alias and cross join them in order
    fn plan_from(&self, first: &TableRef, rest: &[TableRef]) -> Result<BoxedCursor> {
        let mut plan = self.plan_table(first)?;
        for table in rest {
            match self.plan_table(table) {
                Ok(right) => plan = Box::new(CrossJoin::new(plan, right)),
                Err(err) => {
                    plan.close();
                    return Err(err);
                }
            }
        }
        Ok(plan)
    }

    fn plan_table(&self, table: &TableRef) -> Result<BoxedCursor> {
        let base = self.resolve_relation(&table.name)?;
        Ok(Box::new(Rename::new(base, table.reference_name())))
    }

    /// Open a base cursor for a relation name
    fn resolve_relation(&self, name: &str) -> Result<BoxedCursor> {
        if self.catalog.is_catalog_relation(name) {
            return Ok(Box::new(CatalogScan::new(self.catalog.clone())));
        }
        Err(Error::RelationNotFound(name.to_string()))
    }

    /// Schema of a relation, resolved on its own
    fn relation_schema(&self, name: &str) -> Result<Schema> {
        let mut cursor = self.resolve_relation(name)?;
        let schema = cursor.schema().clone();
        cursor.close();
        Ok(schema)
    }

    /// Turn the select list into `(output name, expression)` pairs
    fn expand_columns(
        &self,
        items: &[SelectItem],
        tables: &[TableRef],
        source: &Schema,
    ) -> Result<Vec<(String, Expr)>> {
        let mut targets = Vec::new();

        for (index, item) in items.iter().enumerate() {
            match item {
                SelectItem::Wildcard => {
                    for field in source.fields().iter().filter(|f| f.is_qualified()) {
                        targets.push((field.name.clone(), Expr::ident(field.name.clone())));
                    }
                }
                SelectItem::QualifiedWildcard(reference) => {
                    // an alias from the FROM list, otherwise a relation name
                    let relation = tables
                        .iter()
                        .find(|t| names_match(t.reference_name(), reference))
                        .map(|t| t.name.as_str())
                        .unwrap_or(reference);

                    for field in &self.relation_schema(relation)? {
                        let name = qualified_name(reference, &field.name);
                        targets.push((name.clone(), Expr::ident(name)));
                    }
                }
                SelectItem::Expr { expr, alias } => {
                    let name = match (alias, expr) {
                        (Some(alias), _) => alias.clone(),
                        (None, Expr::Identifier(ident)) => ident.clone(),
                        (None, _) => self.config.anonymous_column(index),
                    };
                    targets.push((name, expr.clone()));
                }
            }
        }

        Ok(targets)
    }
}
