//! In-memory cursor used by operator tests

use std::cell::Cell;
use std::rc::Rc;

use super::Cursor;
use crate::catalog::{DataType, Field, Schema};
use crate::storage::{Tuple, Value};

/// Replays a fixed list of rows and counts lifecycle calls
pub struct VecCursor {
    rows: Vec<Tuple>,
    schema: Schema,
    position: usize,
    closed: bool,
    pub resets: Rc<Cell<usize>>,
    pub closes: Rc<Cell<usize>>,
}

impl VecCursor {
    /// Single integer column `field` holding `values`
    pub fn ints(field: &str, values: &[i64]) -> Self {
        let rows: Vec<Tuple> = values
            .iter()
            .map(|v| std::iter::once((field, Value::Integer(*v))).collect::<Tuple>())
            .collect();
        let schema = Schema::from_fields(vec![Field::new(field, DataType::Integer)]);
        Self::new(schema, rows)
    }

    pub fn new(schema: Schema, rows: Vec<Tuple>) -> Self {
        Self {
            rows,
            schema,
            position: 0,
            closed: false,
            resets: Rc::new(Cell::new(0)),
            closes: Rc::new(Cell::new(0)),
        }
    }
}

impl Cursor for VecCursor {
    fn reset(&mut self) {
        self.resets.set(self.resets.get() + 1);
        self.position = 0;
    }

    fn fetch(&mut self) -> Option<Tuple> {
        if self.closed {
            return None;
        }
        let row = self.rows.get(self.position).cloned();
        if row.is_some() {
            self.position += 1;
        }
        row
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.closes.set(self.closes.get() + 1);
        }
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }
}
