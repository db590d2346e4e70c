//! Single-row source for SELECT without FROM

use tracing::trace;

use super::Cursor;
use crate::catalog::{DataType, Field, Schema};
use crate::storage::{Tuple, Value};

/// Name of the field produced by [`SingleRow`]
pub const VALUE_FIELD: &str = "VALUE";

/// Emits one row `{VALUE: value}`, then nothing until reset
pub struct SingleRow {
    value: Value,
    schema: Schema,
    emitted: bool,
    closed: bool,
}

impl SingleRow {
    pub fn new(value: Value, data_type: DataType) -> Self {
        Self {
            value,
            schema: Schema::from_fields(vec![Field::new(VALUE_FIELD, data_type)]),
            emitted: false,
            closed: false,
        }
    }
}

impl Cursor for SingleRow {
    fn reset(&mut self) {
        trace!("single row reset");
        self.emitted = false;
    }

    fn fetch(&mut self) -> Option<Tuple> {
        if self.emitted || self.closed {
            return None;
        }
        self.emitted = true;

        let mut tuple = Tuple::with_capacity(1);
        tuple.insert(VALUE_FIELD, self.value.clone());
        Some(tuple)
    }

    fn close(&mut self) {
        self.closed = true;
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }
}
