//! The cursor protocol
//!
//! Every relational operator and every storage backend is a cursor. A
//! cursor is pull-driven: nothing is computed until the consumer calls
//! [`Cursor::fetch`]. Composite cursors own their children outright, so a
//! pipeline is a tree of boxed cursors and `reset`/`close` simply recurse.

use crate::catalog::Schema;
use crate::storage::Tuple;

/// Shared contract of all operators.
pub trait Cursor {
    /// Return to the initial state, resetting owned children first. A full
    /// iteration after `reset` yields the same rows in the same order.
    fn reset(&mut self);

    /// Next row, or `None` once exhausted. Calling again after exhaustion
    /// keeps returning `None`.
    fn fetch(&mut self) -> Option<Tuple>;

    /// Release resources and close owned children. Idempotent; a closed
    /// cursor only ever returns `None` from `fetch`.
    fn close(&mut self);

    /// Output schema. Stable for the lifetime of the cursor.
    fn schema(&self) -> &Schema;
}

/// An owned cursor of any kind
pub type BoxedCursor = Box<dyn Cursor>;

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    fn reset(&mut self) {
        (**self).reset()
    }

    fn fetch(&mut self) -> Option<Tuple> {
        (**self).fetch()
    }

    fn close(&mut self) {
        (**self).close()
    }

    fn schema(&self) -> &Schema {
        (**self).schema()
    }
}

/// Adapter that drains a cursor as an [`Iterator`].
pub struct Rows<'a, C: Cursor + ?Sized> {
    cursor: &'a mut C,
}

impl<C: Cursor + ?Sized> Iterator for Rows<'_, C> {
    type Item = Tuple;

    fn next(&mut self) -> Option<Tuple> {
        self.cursor.fetch()
    }
}

/// Convenience methods available on every cursor
pub trait CursorExt: Cursor {
    /// Iterate over the remaining rows
    fn rows(&mut self) -> Rows<'_, Self> {
        Rows { cursor: self }
    }
}

impl<C: Cursor + ?Sized> CursorExt for C {}
