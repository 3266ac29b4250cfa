use crate::schema::{RecordType, SchemaCatalog};

/// Schema introspection capability required by the core.
///
/// Any concrete record-type representation plugs in by exposing its record
/// types in the canonical [`RecordType`] shape. Relationship traversal goes
/// through [`SchemaSource::record_type`] using each attribute's `related_to`.
pub trait SchemaSource: Send + Sync {
    /// Look up a record type by name.
    fn record_type(&self, name: &str) -> Option<&RecordType>;

    /// Names of every known record type, in declaration order.
    fn record_type_names(&self) -> Vec<&str>;
}

impl SchemaSource for SchemaCatalog {
    fn record_type(&self, name: &str) -> Option<&RecordType> {
        SchemaCatalog::record_type(self, name)
    }

    fn record_type_names(&self) -> Vec<&str> {
        self.record_types
            .iter()
            .map(|record| record.name.as_str())
            .collect()
    }
}
