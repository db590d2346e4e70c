//! SQL Parser
//!
//! This module parses SQL tokens into an AST. Operator precedence, lowest
//! first: `+ -`, then `* /`, then `^`, then unary `-`.

use super::ast::*;
use super::lexer::Lexer;
use super::token::Token;
use crate::error::{Error, Result};

/// SQL Parser
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    /// Number of `?` placeholders seen so far
    parameters: usize,
}

impl Parser {
    /// Create a new parser from a SQL string
    pub fn new(sql: &str) -> Result<Self> {
        let mut lexer = Lexer::new(sql);
        let tokens = lexer.tokenize()?;

        Ok(Self {
            tokens,
            position: 0,
            parameters: 0,
        })
    }

    /// Parse a single SQL statement. An optional trailing semicolon is
    /// accepted; anything after it is an error.
    pub fn parse(&mut self) -> Result<Statement> {
        let stmt = self.parse_statement()?;

        if self.check(&Token::Semicolon) {
            self.advance();
        }
        self.expect(&Token::Eof)?;

        Ok(stmt)
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        match self.current() {
            Token::Select => self.parse_select().map(Statement::Select),
            Token::Show => self.parse_show(),
            Token::Create => self.parse_create_table().map(Statement::CreateTable),
            Token::Insert => self.parse_insert().map(Statement::Insert),
            _ => Err(Error::UnexpectedToken {
                expected: "SELECT, SHOW, CREATE or INSERT".to_string(),
                found: format!("{}", self.current()),
            }),
        }
    }

    // ========== SELECT Statement ==========

    fn parse_select(&mut self) -> Result<SelectStatement> {
        self.expect(&Token::Select)?;

        let columns = self.parse_comma_separated(Self::parse_select_item)?;

        let from = if self.check(&Token::From) {
            self.advance();
            Some(self.parse_comma_separated(Self::parse_table_ref)?)
        } else {
            None
        };

        Ok(SelectStatement { columns, from })
    }

    fn parse_select_item(&mut self) -> Result<SelectItem> {
        if self.check(&Token::Asterisk) {
            self.advance();
            return Ok(SelectItem::Wildcard);
        }

        // table.*
        if let Token::Identifier(name) = self.current().clone() {
            if self.peek() == Some(&Token::Dot) && self.peek_at(2) == Some(&Token::Asterisk) {
                self.position += 3;
                return Ok(SelectItem::QualifiedWildcard(name));
            }
        }

        let expr = self.parse_expr()?;

        let alias = if self.check(&Token::As) {
            self.advance();
            Some(self.expect_identifier()?)
        } else {
            None
        };

        Ok(SelectItem::Expr { expr, alias })
    }

    fn parse_table_ref(&mut self) -> Result<TableRef> {
        let name = self.expect_identifier()?;

        let alias = if self.check(&Token::As) {
            self.advance();
            Some(self.expect_identifier()?)
        } else if let Token::Identifier(alias) = self.current().clone() {
            self.advance();
            Some(alias)
        } else {
            None
        };

        Ok(TableRef { name, alias })
    }

    // ========== SHOW TABLES ==========

    fn parse_show(&mut self) -> Result<Statement> {
        self.expect(&Token::Show)?;

        match self.current() {
            Token::Identifier(word) if word.eq_ignore_ascii_case("TABLES") => {
                self.advance();
                Ok(Statement::ShowTables)
            }
            other => Err(Error::UnexpectedToken {
                expected: "TABLES".to_string(),
                found: format!("{}", other),
            }),
        }
    }

    // ========== CREATE TABLE Statement ==========

    fn parse_create_table(&mut self) -> Result<CreateTableStatement> {
        self.expect(&Token::Create)?;
        self.expect(&Token::Table)?;

        let if_not_exists = if self.check(&Token::If) {
            self.advance();
            self.expect(&Token::Not)?;
            self.expect(&Token::Exists)?;
            true
        } else {
            false
        };

        let table_name = self.expect_identifier()?;

        self.expect(&Token::LParen)?;
        let columns = if self.check(&Token::RParen) {
            Vec::new()
        } else {
            self.parse_comma_separated(Self::parse_column_def)?
        };
        self.expect(&Token::RParen)?;

        Ok(CreateTableStatement {
            table_name,
            columns,
            if_not_exists,
        })
    }

    fn parse_column_def(&mut self) -> Result<ColumnDef> {
        let name = self.expect_identifier()?;
        let type_name = self.expect_identifier()?;

        let mut column = ColumnDef {
            name,
            type_name,
            default: None,
            primary_key: false,
            auto_increment: false,
            comment: None,
        };

        // Column options, in any order
        loop {
            match self.current().clone() {
                Token::Default => {
                    self.advance();
                    column.default = Some(self.parse_expr()?);
                }
                Token::Primary => {
                    self.advance();
                    self.expect(&Token::Key)?;
                    column.primary_key = true;
                }
                Token::AutoIncrement => {
                    self.advance();
                    column.auto_increment = true;
                }
                Token::Comment => {
                    self.advance();
                    match self.current().clone() {
                        Token::StringLiteral(text) => {
                            self.advance();
                            column.comment = Some(text);
                        }
                        other => {
                            return Err(Error::UnexpectedToken {
                                expected: "string".to_string(),
                                found: format!("{}", other),
                            })
                        }
                    }
                }
                _ => break,
            }
        }

        Ok(column)
    }

    // ========== INSERT Statement ==========

    fn parse_insert(&mut self) -> Result<InsertStatement> {
        self.expect(&Token::Insert)?;
        self.expect(&Token::Into)?;

        let table_name = self.expect_identifier()?;

        self.expect(&Token::LParen)?;
        let columns = if self.check(&Token::RParen) {
            Vec::new()
        } else {
            self.parse_comma_separated(Self::expect_identifier)?
        };
        self.expect(&Token::RParen)?;

        self.expect(&Token::Values)?;

        let values = self.parse_comma_separated(|parser| {
            parser.expect(&Token::LParen)?;
            let row = parser.parse_comma_separated(Self::parse_expr)?;
            parser.expect(&Token::RParen)?;
            Ok(row)
        })?;

        Ok(InsertStatement {
            table_name,
            columns,
            values,
        })
    }

    // ========== Expressions ==========

    fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_additive_expr()
    }

    fn parse_additive_expr(&mut self) -> Result<Expr> {
        let mut left = self.parse_multiplicative_expr()?;

        loop {
            let op = match self.current() {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative_expr()?;
            left = Expr::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_multiplicative_expr(&mut self) -> Result<Expr> {
        let mut left = self.parse_power_expr()?;

        loop {
            let op = match self.current() {
                Token::Asterisk => BinaryOperator::Mul,
                Token::Slash => BinaryOperator::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_power_expr()?;
            left = Expr::binary(left, op, right);
        }

        Ok(left)
    }

    /// `^` is right associative
    fn parse_power_expr(&mut self) -> Result<Expr> {
        let base = self.parse_unary_expr()?;

        if self.check(&Token::Caret) {
            self.advance();
            let exponent = self.parse_power_expr()?;
            return Ok(Expr::binary(base, BinaryOperator::Pow, exponent));
        }

        Ok(base)
    }

    fn parse_unary_expr(&mut self) -> Result<Expr> {
        if self.check(&Token::Minus) {
            self.advance();
            let expr = self.parse_unary_expr()?;
            return Ok(Expr::UnaryOp {
                op: UnaryOperator::Minus,
                expr: Box::new(expr),
            });
        }
        self.parse_primary_expr()
    }

    fn parse_primary_expr(&mut self) -> Result<Expr> {
        match self.current().clone() {
            Token::IntegerLiteral(n) => {
                self.advance();
                Ok(Expr::number(n as f64))
            }
            Token::FloatLiteral(n) => {
                self.advance();
                Ok(Expr::number(n))
            }
            Token::StringLiteral(s) => {
                self.advance();
                Ok(Expr::string(s))
            }
            Token::Question => {
                self.advance();
                let index = self.parameters;
                self.parameters += 1;
                Ok(Expr::Parameter(index))
            }
            Token::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(&Token::RParen)?;
                Ok(expr)
            }
            Token::Identifier(name) => {
                self.advance();

                // alias.field
                if self.check(&Token::Dot) {
                    self.advance();
                    let field = self.expect_identifier()?;
                    Ok(Expr::ident(format!("{}.{}", name, field)))
                } else {
                    Ok(Expr::ident(name))
                }
            }
            _ => Err(Error::UnexpectedToken {
                expected: "expression".to_string(),
                found: format!("{}", self.current()),
            }),
        }
    }

    // ========== Helper Methods ==========

    fn parse_comma_separated<T>(
        &mut self,
        mut parse_item: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let mut items = vec![parse_item(self)?];

        while self.check(&Token::Comma) {
            self.advance();
            items.push(parse_item(self)?);
        }

        Ok(items)
    }

    fn current(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&Token::Eof)
    }

    fn peek(&self) -> Option<&Token> {
        self.peek_at(1)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.position + offset)
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(self.current()) == std::mem::discriminant(token)
    }

    fn expect(&mut self, token: &Token) -> Result<()> {
        if self.check(token) {
            self.advance();
            Ok(())
        } else {
            Err(Error::UnexpectedToken {
                expected: format!("{}", token),
                found: format!("{}", self.current()),
            })
        }
    }

    fn expect_identifier(&mut self) -> Result<String> {
        match self.current().clone() {
            Token::Identifier(name) => {
                self.advance();
                Ok(name)
            }
            _ => Err(Error::UnexpectedToken {
                expected: "identifier".to_string(),
                found: format!("{}", self.current()),
            }),
        }
    }
}
