//! Tuple and Value types for CursorDB
//!
//! A tuple maps field names to values and remembers insertion order, which
//! is the order rows are displayed in.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// A value flowing through a cursor pipeline
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// NULL value
    Null,
    /// Integer value (64-bit)
    Integer(i64),
    /// Double-precision float
    Double(f64),
    /// String value
    String(String),
}

// Floats compare bitwise so that a value always equals itself
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Value {
    /// Try to convert to i64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Double(f) => Some(*f as i64),
            _ => None,
        }
    }

    /// Try to convert to f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Double(f) => Some(*f),
            _ => None,
        }
    }

    /// Add two values. Two strings are concatenated.
    pub fn add(&self, other: &Value) -> Option<Value> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(
                a.checked_add(*b)
                    .map(Value::Integer)
                    .unwrap_or(Value::Double(*a as f64 + *b as f64)),
            ),
            (Value::String(a), Value::String(b)) => Some(Value::String(format!("{}{}", a, b))),
            (a, b) => Some(Value::Double(a.as_f64()? + b.as_f64()?)),
        }
    }

    /// Subtract two values
    pub fn sub(&self, other: &Value) -> Option<Value> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(
                a.checked_sub(*b)
                    .map(Value::Integer)
                    .unwrap_or(Value::Double(*a as f64 - *b as f64)),
            ),
            (a, b) => Some(Value::Double(a.as_f64()? - b.as_f64()?)),
        }
    }

    /// Multiply two values
    pub fn mul(&self, other: &Value) -> Option<Value> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(
                a.checked_mul(*b)
                    .map(Value::Integer)
                    .unwrap_or(Value::Double(*a as f64 * *b as f64)),
            ),
            (a, b) => Some(Value::Double(a.as_f64()? * b.as_f64()?)),
        }
    }

    /// Divide two values. The quotient is always a Double, so `1/0` is
    /// infinity rather than an error.
    pub fn div(&self, other: &Value) -> Option<Value> {
        Some(Value::Double(self.as_f64()? / other.as_f64()?))
    }

    /// Arithmetic negation
    pub fn neg(&self) -> Option<Value> {
        match self {
            Value::Integer(i) => Some(
                i.checked_neg()
                    .map(Value::Integer)
                    .unwrap_or(Value::Double(-(*i as f64))),
            ),
            Value::Double(f) => Some(Value::Double(-f)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Double(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

/// A row: field name to value, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tuple {
    fields: IndexMap<String, Value>,
}

impl Tuple {
    /// Create an empty tuple
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    /// Create an empty tuple with room for `capacity` fields
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    /// Get a value by exact field name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Set a field. An existing field keeps its position and gets the new
    /// value; the previous value is returned.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(name.into(), value)
    }

    /// Get number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if tuple has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over (name, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Field names in order
    pub fn names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    /// A new tuple holding the fields of `self` followed by those of
    /// `other`. On a name collision the value from `other` wins.
    pub fn merge(&self, other: &Tuple) -> Tuple {
        let mut merged = Tuple::with_capacity(self.len() + other.len());
        for (name, value) in self.fields.iter().chain(other.fields.iter()) {
            merged.fields.insert(name.clone(), value.clone());
        }
        merged
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Tuple {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut tuple = Tuple::new();
        for (name, value) in iter {
            tuple.insert(name, value);
        }
        tuple
    }
}

impl IntoIterator for Tuple {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_arithmetic() {
        assert_eq!(
            Value::Integer(5).add(&Value::Integer(3)),
            Some(Value::Integer(8))
        );
        assert_eq!(
            Value::Double(1.0).add(&Value::Double(2.0)),
            Some(Value::Double(3.0))
        );
        assert_eq!(
            Value::Integer(2).mul(&Value::Double(1.5)),
            Some(Value::Double(3.0))
        );
        assert_eq!(
            Value::Integer(3).div(&Value::Integer(4)),
            Some(Value::Double(0.75))
        );
        assert_eq!(
            Value::from("ab").add(&Value::from("cd")),
            Some(Value::from("abcd"))
        );
        assert_eq!(Value::from("ab").sub(&Value::Integer(1)), None);
        assert_eq!(Value::Null.add(&Value::Integer(1)), None);
    }

    #[test]
    fn test_integer_overflow_promotes() {
        assert_eq!(
            Value::Integer(i64::MAX).add(&Value::Integer(1)),
            Some(Value::Double(i64::MAX as f64 + 1.0))
        );
        assert_eq!(
            Value::Integer(i64::MIN).neg(),
            Some(Value::Double(-(i64::MIN as f64)))
        );
    }

    #[test]
    fn test_division_by_zero_is_infinite() {
        let q = Value::Integer(1).div(&Value::Integer(0)).unwrap();
        assert_eq!(q.as_f64(), Some(f64::INFINITY));
    }

    #[test]
    fn test_tuple_merge_last_write_wins() {
        let left: Tuple = vec![("a", Value::Integer(1)), ("b", Value::Integer(2))]
            .into_iter()
            .collect();
        let right: Tuple = vec![("b", Value::Integer(20)), ("c", Value::Integer(30))]
            .into_iter()
            .collect();

        let merged = left.merge(&right);
        assert_eq!(merged.names(), vec!["a", "b", "c"]);
        assert_eq!(merged.get("b"), Some(&Value::Integer(20)));
        // inputs are untouched
        assert_eq!(left.get("b"), Some(&Value::Integer(2)));
    }

    #[test]
    fn test_tuple_serializes_as_object() {
        let tuple: Tuple = vec![("sum", Value::Double(3.0)), ("name", Value::from("x"))]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&tuple).unwrap();
        assert_eq!(json, r#"{"sum":3.0,"name":"x"}"#);
    }
}
