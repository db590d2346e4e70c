//! Cross join
//!
//! Nested loop with the left child as the outer loop: the left side
//! advances slowest, the right side fastest. One left row is always held
//! as lookahead, so building or resetting the join pulls from the left child
//! immediately.

use tracing::trace;

use super::{BoxedCursor, Cursor};
use crate::catalog::Schema;
use crate::storage::Tuple;

/// Cartesian product of two cursors
pub struct CrossJoin {
    left: BoxedCursor,
    right: BoxedCursor,
    schema: Schema,
    /// Left row paired with the rows the right child is producing
    current_left: Option<Tuple>,
    closed: bool,
}

impl CrossJoin {
    pub fn new(left: BoxedCursor, right: BoxedCursor) -> Self {
        let schema = left.schema().concat(right.schema());
        let mut join = Self {
            left,
            right,
            schema,
            current_left: None,
            closed: false,
        };
        join.rewind();
        join
    }

    fn rewind(&mut self) {
        self.left.reset();
        self.current_left = self.left.fetch();
        self.right.reset();
    }
}

impl Cursor for CrossJoin {
    fn reset(&mut self) {
        trace!("cross join reset");
        self.rewind();
    }

    fn fetch(&mut self) -> Option<Tuple> {
        if self.closed || self.current_left.is_none() {
            return None;
        }

        let right_row = match self.right.fetch() {
            Some(row) => row,
            None => {
                // inner loop finished: advance the outer one
                self.current_left = self.left.fetch();
                self.current_left.as_ref()?;
                self.right.reset();
                match self.right.fetch() {
                    Some(row) => row,
                    None => {
                        // right side is empty, so is the product
                        self.current_left = None;
                        return None;
                    }
                }
            }
        };

        self.current_left
            .as_ref()
            .map(|left_row| left_row.merge(&right_row))
    }

    fn close(&mut self) {
        if !self.closed {
            trace!("cross join closed");
            self.closed = true;
            self.current_left = None;
            self.left.close();
            self.right.close();
        }
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DataType;
    use crate::executor::testing::VecCursor;
    use crate::executor::{CursorExt, SingleRow};
    use crate::storage::Value;

    fn pairs(join: &mut CrossJoin) -> Vec<(i64, i64)> {
        join.rows()
            .map(|t| {
                (
                    t.get("l").unwrap().as_i64().unwrap(),
                    t.get("r").unwrap().as_i64().unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn test_row_major_order() {
        let mut join = CrossJoin::new(
            Box::new(VecCursor::ints("l", &[1, 2])),
            Box::new(VecCursor::ints("r", &[10, 20, 30])),
        );

        assert_eq!(
            pairs(&mut join),
            vec![(1, 10), (1, 20), (1, 30), (2, 10), (2, 20), (2, 30)]
        );
        assert!(join.fetch().is_none());
        assert!(join.fetch().is_none());
    }

    #[test]
    fn test_reset_replays_rows() {
        let mut join = CrossJoin::new(
            Box::new(VecCursor::ints("l", &[1, 2, 3])),
            Box::new(VecCursor::ints("r", &[7, 8])),
        );
        let first = pairs(&mut join);

        join.reset();
        assert_eq!(pairs(&mut join), first);

        // reset halfway through
        join.reset();
        join.fetch();
        join.fetch();
        join.fetch();
        join.reset();
        assert_eq!(pairs(&mut join), first);
    }

    #[test]
    fn test_empty_sides() {
        let mut join = CrossJoin::new(
            Box::new(VecCursor::ints("l", &[])),
            Box::new(VecCursor::ints("r", &[1, 2])),
        );
        assert!(join.fetch().is_none());

        let mut join = CrossJoin::new(
            Box::new(VecCursor::ints("l", &[1, 2, 3])),
            Box::new(VecCursor::ints("r", &[])),
        );
        assert!(join.fetch().is_none());
        assert!(join.fetch().is_none());
        assert!(join.fetch().is_none());
    }

    #[test]
    fn test_schema_concat_and_collision() {
        let mut join = CrossJoin::new(
            Box::new(SingleRow::new(Value::Integer(1), DataType::Integer)),
            Box::new(SingleRow::new(Value::from("right"), DataType::String)),
        );

        let schema = join.schema().clone();
        assert_eq!(schema.field_names(), vec!["VALUE", "VALUE"]);
        assert_eq!(schema.fields()[1].data_type, DataType::String);

        let row = join.fetch().unwrap();
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("VALUE"), Some(&Value::from("right")));
        assert!(join.fetch().is_none());
        assert_eq!(join.schema(), &schema);
    }

    #[test]
    fn test_close_propagates_once() {
        let left = VecCursor::ints("l", &[1]);
        let right = VecCursor::ints("r", &[1]);
        let (left_closes, right_closes) = (left.closes.clone(), right.closes.clone());

        let mut join = CrossJoin::new(Box::new(left), Box::new(right));
        join.close();
        join.close();

        assert_eq!(left_closes.get(), 1);
        assert_eq!(right_closes.get(), 1);
        assert!(join.fetch().is_none());
    }

    #[test]
    fn test_reset_resets_children() {
        let left = VecCursor::ints("l", &[1]);
        let right = VecCursor::ints("r", &[1]);
        let (left_resets, right_resets) = (left.resets.clone(), right.resets.clone());

        let mut join = CrossJoin::new(Box::new(left), Box::new(right));
        assert_eq!((left_resets.get(), right_resets.get()), (1, 1));

        join.reset();
        assert_eq!((left_resets.get(), right_resets.get()), (2, 2));
    }
}
