//! Catalog scan - the only base relation backend
//!
//! Lists the catalog pseudo-relation itself, then every registered relation
//! name in registration order.

use std::sync::Arc;

use tracing::trace;

use super::tuple::{Tuple, Value};
use crate::catalog::{Catalog, Schema, IDENTIFIER_FIELD};
use crate::executor::Cursor;

/// Cursor over the names of all known relations
pub struct CatalogScan {
    catalog: Arc<Catalog>,
    schema: Schema,
    /// Names captured at construction or the last reset
    names: Vec<String>,
    position: usize,
    closed: bool,
}

impl CatalogScan {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let schema = catalog.scan_schema();
        let mut scan = Self {
            catalog,
            schema,
            names: Vec::new(),
            position: 0,
            closed: false,
        };
        scan.snapshot();
        scan
    }

    fn snapshot(&mut self) {
        self.names.clear();
        self.names.push(self.catalog.relation_name().to_string());
        self.names.extend(self.catalog.list_relations());
        self.position = 0;
    }

    /// Is the relation still registered? The pseudo-relation always is.
    fn is_live(&self, name: &str) -> bool {
        self.catalog.is_catalog_relation(name) || self.catalog.relation_exists(name)
    }
}

impl Cursor for CatalogScan {
    fn reset(&mut self) {
        trace!("catalog scan reset");
        self.snapshot();
    }

    fn fetch(&mut self) -> Option<Tuple> {
        if self.closed {
            return None;
        }

        while self.position < self.names.len() {
            let index = self.position;
            self.position += 1;

            let name = &self.names[index];
            if !self.is_live(name) {
                trace!(relation = %name, "skipping dropped relation");
                continue;
            }

            let mut tuple = Tuple::with_capacity(1);
            tuple.insert(IDENTIFIER_FIELD, Value::String(name.clone()));
            return Some(tuple);
        }

        None
    }

    fn close(&mut self) {
        if !self.closed {
            trace!("catalog scan closed");
            self.closed = true;
            self.names.clear();
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
    use crate::executor::CursorExt;

    fn names(scan: &mut CatalogScan) -> Vec<String> {
        scan.rows()
            .map(|t| t.get(IDENTIFIER_FIELD).unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_empty_catalog_lists_itself() {
        let mut scan = CatalogScan::new(Arc::new(Catalog::new()));
        assert_eq!(names(&mut scan), vec!["TABLES"]);
        assert!(scan.fetch().is_none());
        assert!(scan.fetch().is_none());
    }

    #[test]
    fn test_lists_relations_in_order() {
        let catalog = Arc::new(Catalog::new());
        catalog.create_relation("person", Schema::new()).unwrap();
        catalog.create_relation("address", Schema::new()).unwrap();

        let mut scan = CatalogScan::new(catalog);
        assert_eq!(names(&mut scan), vec!["TABLES", "person", "address"]);
    }

    #[test]
    fn test_skips_relations_dropped_after_snapshot() {
        let catalog = Arc::new(Catalog::new());
        catalog.create_relation("a", Schema::new()).unwrap();
        catalog.create_relation("b", Schema::new()).unwrap();

        let mut scan = CatalogScan::new(catalog.clone());
        catalog.drop_relation("a").unwrap();
        // created after the snapshot, invisible until reset
        catalog.create_relation("c", Schema::new()).unwrap();

        assert_eq!(names(&mut scan), vec!["TABLES", "b"]);

        scan.reset();
        assert_eq!(names(&mut scan), vec!["TABLES", "b", "c"]);
    }

    #[test]
    fn test_schema_and_close() {
        let mut scan = CatalogScan::new(Arc::new(Catalog::new()));
        let schema = scan.schema().clone();
        assert_eq!(schema.fields()[0].data_type, DataType::Text);

        scan.close();
        scan.close();
        assert!(scan.fetch().is_none());
        assert_eq!(scan.schema(), &schema);
    }
}
