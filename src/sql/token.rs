//! SQL Token definitions

use std::fmt;

/// SQL Token types
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // ========== Keywords ==========
    Select,
    From,
    As,
    Show,
    Create,
    Table,
    If,
    Not,
    Exists,
    Insert,
    Into,
    Values,
    Default,
    Primary,
    Key,
    AutoIncrement,
    Comment,

    // ========== Literals ==========
    /// Integer literal
    IntegerLiteral(i64),
    /// Float literal
    FloatLiteral(f64),
    /// String literal (single-quoted)
    StringLiteral(String),
    /// Identifier, bare or quoted
    Identifier(String),

    // ========== Operators ==========
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Asterisk,
    /// /
    Slash,
    /// ^
    Caret,
    /// ?
    Question,

    // ========== Delimiters ==========
    LParen,
    RParen,
    Comma,
    Semicolon,
    Dot,

    /// End of input
    Eof,
}

impl Token {
    /// Try to parse a keyword from a string
    pub fn from_keyword(s: &str) -> Option<Token> {
        match s.to_uppercase().as_str() {
            "SELECT" => Some(Token::Select),
            "FROM" => Some(Token::From),
            "AS" => Some(Token::As),
            "SHOW" => Some(Token::Show),
            "CREATE" => Some(Token::Create),
            "TABLE" => Some(Token::Table),
            "IF" => Some(Token::If),
            "NOT" => Some(Token::Not),
            "EXISTS" => Some(Token::Exists),
            "INSERT" => Some(Token::Insert),
            "INTO" => Some(Token::Into),
            "VALUES" => Some(Token::Values),
            "DEFAULT" => Some(Token::Default),
            "PRIMARY" => Some(Token::Primary),
            "KEY" => Some(Token::Key),
            "AUTO_INCREMENT" => Some(Token::AutoIncrement),
            "COMMENT" => Some(Token::Comment),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Select => write!(f, "SELECT"),
            Token::From => write!(f, "FROM"),
            Token::As => write!(f, "AS"),
            Token::Show => write!(f, "SHOW"),
            Token::Create => write!(f, "CREATE"),
            Token::Table => write!(f, "TABLE"),
            Token::If => write!(f, "IF"),
            Token::Not => write!(f, "NOT"),
            Token::Exists => write!(f, "EXISTS"),
            Token::Insert => write!(f, "INSERT"),
            Token::Into => write!(f, "INTO"),
            Token::Values => write!(f, "VALUES"),
            Token::Default => write!(f, "DEFAULT"),
            Token::Primary => write!(f, "PRIMARY"),
            Token::Key => write!(f, "KEY"),
            Token::AutoIncrement => write!(f, "AUTO_INCREMENT"),
            Token::Comment => write!(f, "COMMENT"),
            Token::IntegerLiteral(n) => write!(f, "{}", n),
            Token::FloatLiteral(n) => write!(f, "{}", n),
            Token::StringLiteral(s) => write!(f, "'{}'", s),
            Token::Identifier(s) => write!(f, "{}", s),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Asterisk => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Caret => write!(f, "^"),
            Token::Question => write!(f, "?"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Semicolon => write!(f, ";"),
            Token::Dot => write!(f, "."),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_ignore_case() {
        assert_eq!(Token::from_keyword("select"), Some(Token::Select));
        assert_eq!(Token::from_keyword("Auto_Increment"), Some(Token::AutoIncrement));
        // usable as a relation name
        assert_eq!(Token::from_keyword("tables"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Token::StringLiteral("x".into()).to_string(), "'x'");
        assert_eq!(Token::Caret.to_string(), "^");
        assert_eq!(Token::Eof.to_string(), "EOF");
    }
}
