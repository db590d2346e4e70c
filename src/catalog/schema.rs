//! Schema definitions for CursorDB
//!
//! A schema is an ordered list of fields. Order is what wildcard expansion
//! and result display follow, so fields are kept in a `Vec` and looked up
//! linearly. Names are not required to be unique: a cross join of a relation
//! with itself repeats every field.

use super::types::DataType;
use serde::Serialize;
use std::fmt;

/// A single (name, type) entry of a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Field name, possibly qualified (`alias.name`)
    pub name: String,
    /// Type tag
    pub data_type: DataType,
}

impl Field {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }

    /// Is this an alias-qualified field name?
    pub fn is_qualified(&self) -> bool {
        self.name.contains('.')
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)
    }
}

/// Output shape of a cursor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Create a new empty schema
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Create a schema from a list of fields
    pub fn from_fields(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Get all fields in order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in schema order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Find a field by name ignoring case, Unicode letters included. The
    /// first match in schema order wins when several fields only differ by
    /// case or are duplicated.
    pub fn resolve(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| names_match(&f.name, name))
    }

    /// This schema followed by `other`
    pub fn concat(&self, other: &Schema) -> Schema {
        let mut fields = self.fields.clone();
        fields.extend(other.fields.iter().cloned());
        Schema { fields }
    }

    /// Copies of every field renamed to `alias.name`, in the same order
    pub fn qualify(&self, alias: &str) -> Schema {
        self.fields
            .iter()
            .map(|f| Field::new(qualified_name(alias, &f.name), f.data_type))
            .collect()
    }
}

impl FromIterator<Field> for Schema {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Schema::from_fields(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Case-insensitive name comparison using full Unicode case mapping
pub fn names_match(a: &str, b: &str) -> bool {
    a == b || a.to_uppercase() == b.to_uppercase()
}

/// Build `alias.name`
pub fn qualified_name(alias: &str, name: &str) -> String {
    format!("{}.{}", alias, name)
}

/// A relation registered in the catalog
#[derive(Debug, Clone, Serialize)]
pub struct RelationDef {
    /// Relation name
    pub name: String,
    /// Declared schema
    pub schema: Schema,
}

impl RelationDef {
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Schema {
        Schema::from_fields(vec![
            Field::new("ID", DataType::Integer),
            Field::new("Name", DataType::String),
        ])
    }

    #[test]
    fn test_resolve_ignores_case() {
        let schema = sample();
        assert_eq!(schema.resolve("name").unwrap().name, "Name");
        assert_eq!(schema.resolve("id").unwrap().data_type, DataType::Integer);
        assert!(schema.resolve("age").is_none());
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let schema = Schema::from_fields(vec![
            Field::new("value", DataType::Integer),
            Field::new("VALUE", DataType::Text),
        ]);
        assert_eq!(schema.resolve("Value").unwrap().data_type, DataType::Integer);
    }

    #[test]
    fn test_resolve_folds_non_ascii_case() {
        let schema = Schema::from_fields(vec![
            Field::new("Äpfel", DataType::Integer),
            Field::new("größe", DataType::Text),
        ]);
        assert_eq!(schema.resolve("äPFEL").unwrap().name, "Äpfel");
        assert_eq!(schema.resolve("GRÖSSE").unwrap().name, "größe");
        assert!(schema.resolve("apfel").is_none());
    }

    #[test]
    fn test_qualify_and_concat() {
        let schema = sample();
        let qualified = schema.qualify("p");
        assert_eq!(qualified.field_names(), vec!["p.ID", "p.Name"]);
        assert!(qualified.fields().iter().all(Field::is_qualified));

        let both = schema.concat(&qualified);
        assert_eq!(both.field_names(), vec!["ID", "Name", "p.ID", "p.Name"]);
    }
}
