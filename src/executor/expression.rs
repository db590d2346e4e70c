//! Expression compiler
//!
//! Turns an expression AST into a [`CompiledExpr`] bound to an input
//! schema. All name resolution happens here, so evaluating a compiled
//! expression can never fail: it only reads fields that are known to exist.
//!
//! Evaluators are plain immutable trees. They hold resolved field names and
//! sub-evaluators, never a reference to the cursor they came from.

use tracing::warn;

use crate::catalog::{DataType, Schema};
use crate::error::{Error, Result};
use crate::sql::ast::{BinaryOperator, Expr, Literal, UnaryOperator};
use crate::storage::{Tuple, Value};

/// Constant produced for expressions the compiler has no rule for
const FALLBACK_VALUE: i64 = 1;

/// A compiled, typed expression with its output name
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledExpr {
    name: String,
    data_type: DataType,
    evaluator: Evaluator,
}

impl CompiledExpr {
    /// Output field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Output type tag
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Evaluate against one input row
    pub fn evaluate(&self, tuple: &Tuple) -> Value {
        self.evaluator.evaluate(tuple)
    }
}

/// Evaluation tree of a compiled expression
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluator {
    /// Always the same value
    Constant(Value),
    /// Read a field by its exact schema name
    Field(String),
    Unary {
        op: UnaryOperator,
        operand: Box<Evaluator>,
    },
    Binary {
        op: BinaryOperator,
        left: Box<Evaluator>,
        right: Box<Evaluator>,
    },
}

impl Evaluator {
    /// Evaluate against a row. Operand combinations an operator has no
    /// meaning for (a string minus a number, anything with NULL) yield NULL.
    pub fn evaluate(&self, tuple: &Tuple) -> Value {
        match self {
            Evaluator::Constant(value) => value.clone(),
            Evaluator::Field(name) => tuple.get(name).cloned().unwrap_or(Value::Null),
            Evaluator::Unary { op, operand } => {
                let value = operand.evaluate(tuple);
                let result = match op {
                    UnaryOperator::Minus => value.neg(),
                };
                result.unwrap_or(Value::Null)
            }
            Evaluator::Binary { op, left, right } => {
                let l = left.evaluate(tuple);
                let r = right.evaluate(tuple);
                let result = match op {
                    BinaryOperator::Add => l.add(&r),
                    BinaryOperator::Sub => l.sub(&r),
                    BinaryOperator::Mul => l.mul(&r),
                    BinaryOperator::Div => l.div(&r),
                    // rejected by the compiler
                    BinaryOperator::Pow => None,
                };
                result.unwrap_or(Value::Null)
            }
        }
    }
}

/// Compile `expr` against `schema`, naming the result `name`.
pub fn compile(name: impl Into<String>, expr: &Expr, schema: &Schema) -> Result<CompiledExpr> {
    let (data_type, evaluator) = compile_node(expr, schema)?;
    Ok(CompiledExpr {
        name: name.into(),
        data_type,
        evaluator,
    })
}

fn compile_node(expr: &Expr, schema: &Schema) -> Result<(DataType, Evaluator)> {
    match expr {
        Expr::Identifier(ident) => {
            let field = schema
                .resolve(ident)
                .ok_or_else(|| Error::UnresolvedIdentifier(ident.clone()))?;
            Ok((field.data_type, Evaluator::Field(field.name.clone())))
        }

        Expr::BinaryOp { left, op, right } => {
            let (_, left) = compile_node(left, schema)?;
            let (_, right) = compile_node(right, schema)?;
            if !is_implemented(*op) {
                return Err(Error::UnsupportedOperator(op.to_string()));
            }
            Ok((
                DataType::Number,
                Evaluator::Binary {
                    op: *op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
            ))
        }

        Expr::UnaryOp { op, expr } => {
            let (_, operand) = compile_node(expr, schema)?;
            Ok((
                DataType::Number,
                Evaluator::Unary {
                    op: *op,
                    operand: Box::new(operand),
                },
            ))
        }

        Expr::Literal(Literal::Number(n)) => {
            Ok((DataType::Double, Evaluator::Constant(Value::Double(*n))))
        }

        Expr::Literal(Literal::String(s)) => {
            Ok((DataType::String, Evaluator::Constant(Value::String(s.clone()))))
        }

        other => {
            warn!(expr = ?other, "no compilation rule, substituting a constant");
            Ok((
                DataType::Integer,
                Evaluator::Constant(Value::Integer(FALLBACK_VALUE)),
            ))
        }
    }
}

fn is_implemented(op: BinaryOperator) -> bool {
    matches!(
        op,
        BinaryOperator::Add | BinaryOperator::Sub | BinaryOperator::Mul | BinaryOperator::Div
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Field;

    fn schema() -> Schema {
        Schema::from_fields(vec![
            Field::new("Age", DataType::Integer),
            Field::new("Name", DataType::String),
            Field::new("p.Age", DataType::Integer),
        ])
    }

    fn row() -> Tuple {
        vec![
            ("Age", Value::Integer(40)),
            ("Name", Value::from("Hans")),
            ("p.Age", Value::Integer(40)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_identifier_case_insensitive() {
        let compiled = compile("a", &Expr::ident("AGE"), &schema()).unwrap();
        assert_eq!(compiled.data_type(), DataType::Integer);
        assert_eq!(compiled.evaluator(), &Evaluator::Field("Age".to_string()));
        assert_eq!(compiled.evaluate(&row()), Value::Integer(40));

        let qualified = compile("b", &Expr::ident("P.age"), &schema()).unwrap();
        assert_eq!(qualified.evaluate(&row()), Value::Integer(40));
    }

    #[test]
    fn test_unresolved_identifier() {
        let err = compile("x", &Expr::ident("salary"), &schema()).unwrap_err();
        assert_eq!(err, Error::UnresolvedIdentifier("salary".to_string()));

        // nested operands are checked as well
        let expr = Expr::binary(Expr::number(1.0), BinaryOperator::Add, Expr::ident("Salary"));
        let err = compile("x", &expr, &schema()).unwrap_err();
        assert_eq!(err, Error::UnresolvedIdentifier("Salary".to_string()));
    }

    #[test]
    fn test_literals() {
        let n = compile("n", &Expr::number(2.5), &Schema::new()).unwrap();
        assert_eq!(n.data_type(), DataType::Double);
        assert_eq!(n.evaluate(&Tuple::new()), Value::Double(2.5));

        let s = compile("s", &Expr::string("hi"), &Schema::new()).unwrap();
        assert_eq!(s.data_type(), DataType::String);
        assert_eq!(s.evaluate(&Tuple::new()), Value::from("hi"));
    }

    #[test]
    fn test_arithmetic_is_number_typed() {
        let cases = [
            (BinaryOperator::Add, Value::Integer(42)),
            (BinaryOperator::Sub, Value::Integer(38)),
            (BinaryOperator::Mul, Value::Integer(80)),
            (BinaryOperator::Div, Value::Double(20.0)),
        ];
        let two = Expr::binary(Expr::number(1.0), BinaryOperator::Add, Expr::number(1.0));

        for (op, expected) in cases {
            // Age (INTEGER) op 2 where 2 = 1 + 1 is DOUBLE-valued
            let expr = Expr::binary(Expr::ident("age"), op, two.clone());
            let compiled = compile("r", &expr, &schema()).unwrap();
            assert_eq!(compiled.data_type(), DataType::Number);
            assert_eq!(compiled.evaluate(&row()).as_f64(), expected.as_f64());
        }
    }

    #[test]
    fn test_negation() {
        let expr = Expr::UnaryOp {
            op: UnaryOperator::Minus,
            expr: Box::new(Expr::ident("age")),
        };
        let compiled = compile("neg", &expr, &schema()).unwrap();
        assert_eq!(compiled.data_type(), DataType::Number);
        assert_eq!(compiled.evaluate(&row()), Value::Integer(-40));
    }

    #[test]
    fn test_meaningless_arithmetic_is_null() {
        let expr = Expr::binary(Expr::ident("name"), BinaryOperator::Mul, Expr::number(2.0));
        let compiled = compile("x", &expr, &schema()).unwrap();
        assert_eq!(compiled.evaluate(&row()), Value::Null);

        let concat = Expr::binary(Expr::ident("name"), BinaryOperator::Add, Expr::string("!"));
        let compiled = compile("x", &concat, &schema()).unwrap();
        assert_eq!(compiled.evaluate(&row()), Value::from("Hans!"));
    }

    #[test]
    fn test_unsupported_operator() {
        let expr = Expr::binary(Expr::number(2.0), BinaryOperator::Pow, Expr::number(3.0));
        let err = compile("x", &expr, &Schema::new()).unwrap_err();
        assert_eq!(err, Error::UnsupportedOperator("^".to_string()));
    }

    #[test]
    fn test_parameter_uses_degenerate_fallback() {
        // Placeholders are never bound; the compiler stays total by
        // substituting INTEGER 1. Do not rely on this value.
        let compiled = compile("p", &Expr::Parameter(0), &Schema::new()).unwrap();
        assert_eq!(compiled.data_type(), DataType::Integer);
        assert_eq!(compiled.evaluate(&Tuple::new()), Value::Integer(FALLBACK_VALUE));
    }

    #[test]
    fn test_evaluation_is_pure() {
        let expr = Expr::binary(Expr::ident("age"), BinaryOperator::Add, Expr::number(1.0));
        let compiled = compile("x", &expr, &schema()).unwrap();

        let first = row();
        let second = row();
        assert_eq!(compiled.evaluate(&first), compiled.evaluate(&second));
        assert_eq!(compiled.evaluate(&first), compiled.evaluate(&first));
    }
}
