//! Error types for CursorDB
//!
//! Every error is raised while a query is parsed, compiled or planned.
//! Once a cursor pipeline exists, iterating it cannot fail.

use thiserror::Error;

/// The main error type for CursorDB
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ========== Lexer Errors ==========
    #[error("Lexer error: unexpected character '{0}' at position {1}")]
    UnexpectedCharacter(char, usize),

    #[error("Lexer error: unterminated string literal starting at position {0}")]
    UnterminatedString(usize),

    #[error("Lexer error: invalid number format at position {0}")]
    InvalidNumber(usize),

    // ========== Parser Errors ==========
    #[error("Parse error: unexpected token '{found}', expected {expected}")]
    UnexpectedToken { expected: String, found: String },

    // ========== Resolution Errors ==========
    #[error("Resolution error: unknown identifier '{0}'")]
    UnresolvedIdentifier(String),

    #[error("Resolution error: relation '{0}' does not exist")]
    RelationNotFound(String),

    // ========== Unsupported Constructs ==========
    #[error("Unsupported: operator '{0}' is not implemented")]
    UnsupportedOperator(String),

    #[error("Unsupported: {0} queries cannot be executed")]
    UnsupportedQuery(String),

    // ========== Catalog Errors ==========
    #[error("Catalog error: relation '{0}' already exists")]
    RelationAlreadyExists(String),
}

/// Result type alias for CursorDB operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::RelationNotFound("person".to_string());
        assert_eq!(
            err.to_string(),
            "Resolution error: relation 'person' does not exist"
        );

        let err = Error::UnexpectedCharacter('@', 5);
        assert_eq!(
            err.to_string(),
            "Lexer error: unexpected character '@' at position 5"
        );

        let err = Error::UnsupportedQuery("INSERT".to_string());
        assert_eq!(
            err.to_string(),
            "Unsupported: INSERT queries cannot be executed"
        );
    }
}
