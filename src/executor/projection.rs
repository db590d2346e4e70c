//! Projection (adjunction)
//!
//! Computes output columns from the input row through compiled
//! expressions. All expressions are compiled when the cursor is built, so a
//! bad column reference is reported before any row is produced.

use tracing::trace;

use super::expression::{compile, CompiledExpr};
use super::{BoxedCursor, Cursor};
use crate::catalog::{Field, Schema};
use crate::error::Result;
use crate::sql::ast::Expr;
use crate::storage::Tuple;

/// Projection cursor
pub struct Projection {
    input: BoxedCursor,
    columns: Vec<CompiledExpr>,
    schema: Schema,
    closed: bool,
}

impl Projection {
    /// Build a projection of `(output name, expression)` pairs over `input`.
    /// On a compile error the input is closed and the error returned.
    pub fn new(mut input: BoxedCursor, targets: Vec<(String, Expr)>) -> Result<Self> {
        let compiled: Result<Vec<CompiledExpr>> = targets
            .iter()
            .map(|(name, expr)| compile(name.as_str(), expr, input.schema()))
            .collect();

        let columns = match compiled {
            Ok(columns) => columns,
            Err(err) => {
                input.close();
                return Err(err);
            }
        };

        let schema = columns
            .iter()
            .map(|c| Field::new(c.name(), c.data_type()))
            .collect();

        Ok(Self {
            input,
            columns,
            schema,
            closed: false,
        })
    }

    /// The compiled output columns
    pub fn columns(&self) -> &[CompiledExpr] {
        &self.columns
    }
}

impl Cursor for Projection {
    fn reset(&mut self) {
        trace!("projection reset");
        self.input.reset();
    }

    fn fetch(&mut self) -> Option<Tuple> {
        let row = self.input.fetch()?;

        let mut result = Tuple::with_capacity(self.columns.len());
        for column in &self.columns {
            result.insert(column.name(), column.evaluate(&row));
        }
        Some(result)
    }

    fn close(&mut self) {
        if !self.closed {
            trace!("projection closed");
            self.closed = true;
            self.input.close();
        }
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }
}
