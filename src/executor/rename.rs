//! Alias qualification
//!
//! Adds an `alias.field` copy of every field next to the unqualified
//! originals, so that a projection may use either spelling and `alias.*`
//! can pick out exactly the qualified names.

use tracing::trace;

use super::{BoxedCursor, Cursor};
use crate::catalog::{qualified_name, Schema};
use crate::storage::Tuple;

/// Schema-rename cursor
pub struct Rename {
    input: BoxedCursor,
    alias: String,
    schema: Schema,
    closed: bool,
}

impl Rename {
    pub fn new(input: BoxedCursor, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        let base = input.schema();
        let schema = base.concat(&base.qualify(&alias));
        Self {
            input,
            alias,
            schema,
            closed: false,
        }
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }
}

impl Cursor for Rename {
    fn reset(&mut self) {
        trace!(alias = %self.alias, "rename reset");
        self.input.reset();
    }

    fn fetch(&mut self) -> Option<Tuple> {
        let row = self.input.fetch()?;

        let mut renamed = Tuple::with_capacity(row.len() * 2);
        for (name, value) in row.iter() {
            renamed.insert(name, value.clone());
        }
        for (name, value) in row {
            renamed.insert(qualified_name(&self.alias, &name), value);
        }
        Some(renamed)
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.input.close();
        }
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }
}
