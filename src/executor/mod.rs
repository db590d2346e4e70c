//! Query execution module
//!
//! Cursors, the expression compiler, the planner that wires them together
//! and the engine facade on top.

pub mod cursor;
pub mod engine;
pub mod expression;
pub mod join;
pub mod literal;
pub mod planner;
pub mod projection;
pub mod rename;

#[cfg(test)]
mod testing;

pub use cursor::{BoxedCursor, Cursor, CursorExt, Rows};
pub use engine::{ExecutionEngine, QueryResult};
pub use expression::{compile, CompiledExpr, Evaluator};
pub use join::CrossJoin;
pub use literal::{SingleRow, VALUE_FIELD};
pub use planner::Planner;
pub use projection::Projection;
pub use rename::Rename;
