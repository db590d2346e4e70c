//! SQL Lexer (Tokenizer)
//!
//! This module converts SQL strings into a stream of tokens. A leading `-`
//! is always its own token; negative numbers are built by the parser.

use super::token::Token;
use crate::error::{Error, Result};

/// SQL Lexer
pub struct Lexer {
    /// Input characters
    input: Vec<char>,
    /// Current position in input
    position: usize,
}

impl Lexer {
    /// Create a new lexer for the given input
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let done = token == Token::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();
        self.skip_comments();

        let Some(ch) = self.current_char() else {
            return Ok(Token::Eof);
        };

        let single = match ch {
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            ',' => Some(Token::Comma),
            ';' => Some(Token::Semicolon),
            '.' => Some(Token::Dot),
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '*' => Some(Token::Asterisk),
            '/' => Some(Token::Slash),
            '^' => Some(Token::Caret),
            '?' => Some(Token::Question),
            _ => None,
        };
        if let Some(token) = single {
            self.advance();
            return Ok(token);
        }

        match ch {
            '\'' => self.read_string(),
            '"' | '`' => self.read_quoted_identifier(ch),
            c if c.is_ascii_digit() => self.read_number(),
            c if c.is_ascii_alphabetic() => Ok(self.read_identifier()),
            c => Err(Error::UnexpectedCharacter(c, self.position)),
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Skip SQL comments (-- and /* */) and the whitespace after them
    fn skip_comments(&mut self) {
        loop {
            match (self.current_char(), self.peek_char()) {
                (Some('-'), Some('-')) => {
                    while self.current_char().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                (Some('/'), Some('*')) => {
                    self.position += 2;
                    while let Some(c) = self.current_char() {
                        if c == '*' && self.peek_char() == Some('/') {
                            self.position += 2;
                            break;
                        }
                        self.advance();
                    }
                }
                _ => return,
            }
            self.skip_whitespace();
        }
    }

    /// Read a single-quoted string. `''` and `\'` both stand for a quote.
    fn read_string(&mut self) -> Result<Token> {
        let start_pos = self.position;
        self.advance(); // skip opening quote

        let mut value = String::new();

        while let Some(ch) = self.current_char() {
            match ch {
                '\\' if self.peek_char() == Some('\'') => {
                    value.push('\'');
                    self.position += 2;
                }
                '\'' if self.peek_char() == Some('\'') => {
                    value.push('\'');
                    self.position += 2;
                }
                '\'' => {
                    self.advance(); // skip closing quote
                    return Ok(Token::StringLiteral(value));
                }
                _ => {
                    value.push(ch);
                    self.advance();
                }
            }
        }

        Err(Error::UnterminatedString(start_pos))
    }

    /// Read an identifier quoted with `"` or a backtick. Doubling the quote
    /// escapes it.
    fn read_quoted_identifier(&mut self, quote: char) -> Result<Token> {
        let start_pos = self.position;
        self.advance(); // skip opening quote

        let mut value = String::new();

        while let Some(ch) = self.current_char() {
            if ch == quote {
                if self.peek_char() == Some(quote) {
                    value.push(quote);
                    self.position += 2;
                } else {
                    self.advance(); // skip closing quote
                    return Ok(Token::Identifier(value));
                }
            } else {
                value.push(ch);
                self.advance();
            }
        }

        Err(Error::UnterminatedString(start_pos))
    }

    /// Read a number (integer or float)
    fn read_number(&mut self) -> Result<Token> {
        let start_pos = self.position;
        let mut value = String::new();
        let mut is_float = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                value.push(ch);
                self.advance();
            } else if ch == '.' && !is_float && self.peek_char().is_some_and(|c| c.is_ascii_digit())
            {
                is_float = true;
                value.push(ch);
                self.advance();
            } else if ch == 'e' || ch == 'E' {
                // Scientific notation
                is_float = true;
                value.push(ch);
                self.advance();

                if let Some(sign @ ('+' | '-')) = self.current_char() {
                    value.push(sign);
                    self.advance();
                }
            } else {
                break;
            }
        }

        if is_float {
            value
                .parse::<f64>()
                .map(Token::FloatLiteral)
                .map_err(|_| Error::InvalidNumber(start_pos))
        } else {
            // too wide for i64: keep the magnitude as a double
            value
                .parse::<i64>()
                .map(Token::IntegerLiteral)
                .or_else(|_| value.parse::<f64>().map(Token::FloatLiteral))
                .map_err(|_| Error::InvalidNumber(start_pos))
        }
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self) -> Token {
        let mut value = String::new();

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                value.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::from_keyword(&value).unwrap_or(Token::Identifier(value))
    }
}
