//! Type tags attached to schema fields

use serde::Serialize;
use std::fmt;

/// Type tag of a field.
///
/// The set is closed and deliberately small. Arithmetic always produces
/// `Number`, whatever the operand tags were.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DataType {
    /// Integer value
    Integer,
    /// Double-precision floating point
    Double,
    /// Result of an arithmetic expression
    Number,
    /// Text stored in a relation (catalog names)
    Text,
    /// Text produced by a string literal
    String,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Integer => write!(f, "INTEGER"),
            DataType::Double => write!(f, "DOUBLE"),
            DataType::Number => write!(f, "NUMBER"),
            DataType::Text => write!(f, "TEXT"),
            DataType::String => write!(f, "STRING"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(DataType::Number.to_string(), "NUMBER");
        assert_eq!(DataType::Text.to_string(), "TEXT");
    }
}
