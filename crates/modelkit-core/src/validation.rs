use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::schema::SchemaCatalog;

/// Validate internal consistency of a schema catalog.
///
/// This checks:
/// - duplicate record types/attributes
/// - primary key and natural key attributes exist
/// - relationship attributes name a known target record type
pub fn validate_catalog(catalog: &SchemaCatalog) -> Result<()> {
    let mut index: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();

    for record in &catalog.record_types {
        if index.contains_key(record.name.as_str()) {
            return Err(Error::InvalidSchema(format!(
                "duplicate record type: {}",
                record.name
            )));
        }

        let mut attributes = BTreeSet::new();
        for attribute in &record.attributes {
            if !attributes.insert(attribute.name.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "duplicate attribute: {}.{}",
                    record.name, attribute.name
                )));
            }
        }

        index.insert(record.name.as_str(), attributes);
    }

    for record in &catalog.record_types {
        let attributes = index.get(record.name.as_str()).ok_or_else(|| {
            Error::InvalidSchema(format!("missing record type in index: {}", record.name))
        })?;

        if !attributes.contains(record.primary_key.as_str()) {
            return Err(Error::InvalidSchema(format!(
                "primary key attribute not found: {}.{}",
                record.name, record.primary_key
            )));
        }

        for key in &record.natural_key {
            if !attributes.contains(key.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "natural key attribute not found: {}.{}",
                    record.name, key
                )));
            }
        }

        for attribute in &record.attributes {
            if !attribute.kind.is_relationship() {
                continue;
            }

            let target = attribute.related_to.as_deref().ok_or_else(|| {
                Error::InvalidSchema(format!(
                    "relationship without target: {}.{}",
                    record.name, attribute.name
                ))
            })?;

            if !index.contains_key(target) {
                return Err(Error::InvalidSchema(format!(
                    "relationship target not found: {}.{} -> {}",
                    record.name, attribute.name, target
                )));
            }
        }
    }

    Ok(())
}
