//! System Catalog for CursorDB
//!
//! The catalog is the registry of known relations. It is also exposed to
//! queries as a pseudo-relation (named `TABLES` by default) whose rows are
//! the relation names themselves.

use super::schema::{names_match, Field, RelationDef, Schema};
use super::types::DataType;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Default name of the catalog pseudo-relation
pub const CATALOG_RELATION: &str = "TABLES";

/// Name of the only field of the catalog pseudo-relation
pub const IDENTIFIER_FIELD: &str = "IDENTIFIER";

/// System Catalog - ordered registry of relation definitions
#[derive(Debug)]
pub struct Catalog {
    /// Name under which the catalog itself can be queried
    relation_name: String,
    /// Relation definitions in registration order
    relations: RwLock<IndexMap<String, Arc<RelationDef>>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::with_relation_name(CATALOG_RELATION)
    }

    /// Create an empty catalog queryable under a custom pseudo-relation name
    pub fn with_relation_name(name: impl Into<String>) -> Self {
        Self {
            relation_name: name.into(),
            relations: RwLock::new(IndexMap::new()),
        }
    }

    /// Name of the catalog pseudo-relation
    pub fn relation_name(&self) -> &str {
        &self.relation_name
    }

    /// Does `name` refer to the catalog pseudo-relation? Matching ignores case.
    pub fn is_catalog_relation(&self, name: &str) -> bool {
        names_match(&self.relation_name, name)
    }

    /// Schema of the catalog pseudo-relation
    pub fn scan_schema(&self) -> Schema {
        Schema::from_fields(vec![Field::new(IDENTIFIER_FIELD, DataType::Text)])
    }

    /// Register a new relation
    pub fn create_relation(&self, name: &str, schema: Schema) -> Result<Arc<RelationDef>> {
        if self.is_catalog_relation(name) {
            return Err(Error::RelationAlreadyExists(name.to_string()));
        }

        let mut relations = self.relations.write().unwrap_or_else(PoisonError::into_inner);
        if relations.contains_key(name) {
            return Err(Error::RelationAlreadyExists(name.to_string()));
        }

        let def = Arc::new(RelationDef::new(name, schema));
        relations.insert(name.to_string(), def.clone());
        debug!(relation = name, "relation registered");
        Ok(def)
    }

    /// Get a relation by name
    pub fn get_relation(&self, name: &str) -> Result<Arc<RelationDef>> {
        let relations = self.relations.read().unwrap_or_else(PoisonError::into_inner);
        relations
            .get(name)
            .cloned()
            .ok_or_else(|| Error::RelationNotFound(name.to_string()))
    }

    /// Check if a relation exists
    pub fn relation_exists(&self, name: &str) -> bool {
        let relations = self.relations.read().unwrap_or_else(PoisonError::into_inner);
        relations.contains_key(name)
    }

    /// Drop a relation
    pub fn drop_relation(&self, name: &str) -> Result<()> {
        let mut relations = self.relations.write().unwrap_or_else(PoisonError::into_inner);
        if relations.shift_remove(name).is_none() {
            return Err(Error::RelationNotFound(name.to_string()));
        }
        debug!(relation = name, "relation dropped");
        Ok(())
    }

    /// List relation names in registration order
    pub fn list_relations(&self) -> Vec<String> {
        let relations = self.relations.read().unwrap_or_else(PoisonError::into_inner);
        relations.keys().cloned().collect()
    }

    /// Describe a relation (for the `.schema` command)
    pub fn relation_info(&self, name: &str) -> Result<String> {
        let schema = if self.is_catalog_relation(name) {
            self.scan_schema()
        } else {
            self.get_relation(name)?.schema.clone()
        };

        let mut info = format!("Relation: {}\n", name);
        info.push_str("Fields:\n");
        for field in &schema {
            info.push_str(&format!("  {}\n", field));
        }
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person_schema() -> Schema {
        Schema::from_fields(vec![
            Field::new("ID", DataType::Integer),
            Field::new("Name", DataType::String),
        ])
    }

    #[test]
    fn test_create_and_list_in_order() {
        let catalog = Catalog::new();
        catalog.create_relation("person", person_schema()).unwrap();
        catalog.create_relation("address", Schema::new()).unwrap();
        catalog.create_relation("city", Schema::new()).unwrap();

        assert_eq!(catalog.list_relations(), vec!["person", "address", "city"]);
        assert!(catalog.relation_exists("person"));
        assert_eq!(catalog.get_relation("person").unwrap().schema.len(), 2);
    }

    #[test]
    fn test_duplicate_relation() {
        let catalog = Catalog::new();
        catalog.create_relation("person", Schema::new()).unwrap();
        assert_eq!(
            catalog.create_relation("person", Schema::new()).unwrap_err(),
            Error::RelationAlreadyExists("person".to_string())
        );
        assert!(matches!(
            catalog.create_relation("tables", Schema::new()),
            Err(Error::RelationAlreadyExists(_))
        ));
    }

    #[test]
    fn test_drop_keeps_order() {
        let catalog = Catalog::new();
        catalog.create_relation("a", Schema::new()).unwrap();
        catalog.create_relation("b", Schema::new()).unwrap();
        catalog.create_relation("c", Schema::new()).unwrap();

        catalog.drop_relation("b").unwrap();
        assert_eq!(catalog.list_relations(), vec!["a", "c"]);
        assert!(matches!(
            catalog.drop_relation("b"),
            Err(Error::RelationNotFound(_))
        ));
    }

    #[test]
    fn test_catalog_relation_name() {
        let catalog = Catalog::with_relation_name("RELATIONS");
        assert!(catalog.is_catalog_relation("relations"));
        assert!(!catalog.is_catalog_relation("TABLES"));
        assert!(Catalog::with_relation_name("ÜBERSICHT").is_catalog_relation("übersicht"));
        assert_eq!(catalog.scan_schema().field_names(), vec![IDENTIFIER_FIELD]);

        let info = catalog.relation_info("relations").unwrap();
        assert!(info.contains("IDENTIFIER TEXT"));
    }
}
