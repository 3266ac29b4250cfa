use std::sync::Arc;

use regex::Regex;

use modelkit_core::{
    Attribute, AttributeKind, Error, FieldValidationError, RecordType, RelationshipPath,
    ResolvedPath, Result, SchemaSource, closest_match, resolve_path,
};

use crate::options::InspectOptions;

/// An attribute reference (plain name or relationship path) that resolved.
#[derive(Debug, Clone)]
pub struct ResolvedField<'a> {
    /// The name as written in the configuration.
    pub name: String,
    /// The terminal attribute.
    pub attribute: &'a Attribute,
    /// Record type owning the terminal attribute.
    pub owner: &'a RecordType,
    /// Traversal details when `name` crosses relationships.
    pub path: Option<ResolvedPath<'a>>,
}

impl ResolvedField<'_> {
    pub fn kind(&self) -> AttributeKind {
        self.attribute.kind
    }

    pub fn is_path(&self) -> bool {
        self.path.is_some()
    }

    /// Segments a renderer follows to reach the value.
    pub fn accessor(&self) -> Vec<String> {
        RelationshipPath::parse(&self.name).segments().to_vec()
    }
}

/// Compiled classification rules, shared by every inspector built from them.
#[derive(Debug, Clone)]
pub struct InspectRules {
    technical_attributes: Vec<String>,
    pointer_pattern: Option<Regex>,
}

impl Default for InspectRules {
    fn default() -> Self {
        let options = InspectOptions::default();
        Self {
            technical_attributes: options.technical_attributes,
            pointer_pattern: Regex::new(&options.pointer_pattern).ok(),
        }
    }
}

impl InspectRules {
    pub fn compile(options: &InspectOptions) -> Result<Self> {
        let pointer_pattern = Regex::new(&options.pointer_pattern).map_err(|err| {
            Error::Configuration(format!(
                "invalid pointer pattern '{}': {err}",
                options.pointer_pattern
            ))
        })?;

        Ok(Self {
            technical_attributes: options.technical_attributes.clone(),
            pointer_pattern: Some(pointer_pattern),
        })
    }
}

/// Read-only view over a schema source that classifies attributes.
pub struct SchemaInspector<'a> {
    source: &'a dyn SchemaSource,
    rules: Arc<InspectRules>,
}

impl<'a> SchemaInspector<'a> {
    pub fn new(source: &'a dyn SchemaSource, options: &InspectOptions) -> Result<Self> {
        Ok(Self::with_rules(
            source,
            Arc::new(InspectRules::compile(options)?),
        ))
    }

    /// Inspector over already compiled rules.
    pub fn with_rules(source: &'a dyn SchemaSource, rules: Arc<InspectRules>) -> Self {
        Self { source, rules }
    }

    pub fn source(&self) -> &'a dyn SchemaSource {
        self.source
    }

    /// Look up a record type, suggesting a close name when it is unknown.
    pub fn record_type(&self, name: &str) -> Result<&'a RecordType> {
        self.source.record_type(name).ok_or_else(|| {
            let known = self.source.record_type_names();
            let hint = closest_match(name, &known)
                .map(|suggestion| format!("; did you mean '{suggestion}'?"))
                .unwrap_or_default();
            Error::Configuration(format!("unknown record type '{name}'{hint}"))
        })
    }

    /// Every attribute name in declaration order.
    pub fn get_all_attribute_names(&self, record: &RecordType) -> Vec<String> {
        record.attribute_names().map(str::to_string).collect()
    }

    pub fn get_attribute<'r>(&self, record: &'r RecordType, name: &str) -> Option<&'r Attribute> {
        record.attribute(name)
    }

    /// Identity key, polymorphic discriminators, inheritance pointers, and
    /// attributes explicitly flagged `technical`.
    pub fn is_technical(&self, record: &RecordType, attribute: &Attribute) -> bool {
        attribute.technical
            || attribute.name == record.primary_key
            || self
                .rules
                .technical_attributes
                .iter()
                .any(|name| name == &attribute.name)
            || self
                .rules
                .pointer_pattern
                .as_ref()
                .is_some_and(|pattern| pattern.is_match(&attribute.name))
    }

    /// Attribute names minus technical-internal ones; the expansion of `"__all__"`.
    pub fn get_visible_attributes(&self, record: &RecordType) -> Vec<String> {
        record
            .attributes
            .iter()
            .filter(|attribute| !self.is_technical(record, attribute))
            .map(|attribute| attribute.name.clone())
            .collect()
    }

    /// Attributes that are safe to expose by default.
    ///
    /// Drops technical-internal and auto-managed attributes, and non-editable
    /// attributes unless they are relationships.
    pub fn get_default_safe_attributes(&self, record: &RecordType) -> Vec<String> {
        record
            .attributes
            .iter()
            .filter(|attribute| !self.is_technical(record, attribute))
            .filter(|attribute| !attribute.auto_managed)
            .filter(|attribute| attribute.editable || attribute.kind.is_relationship())
            .map(|attribute| attribute.name.clone())
            .collect()
    }

    /// Resolve a plain attribute name or relationship path against `record`.
    pub fn resolve_field(
        &self,
        record: &'a RecordType,
        name: &str,
    ) -> std::result::Result<ResolvedField<'a>, FieldValidationError> {
        if RelationshipPath::is_traversal(name) {
            let path = RelationshipPath::parse(name);
            let resolved = resolve_path(self.source, record, &path)?;
            return Ok(ResolvedField {
                name: name.to_string(),
                attribute: resolved.terminal(),
                owner: resolved.terminal_owner(),
                path: Some(resolved),
            });
        }

        match record.attribute(name) {
            Some(attribute) => Ok(ResolvedField {
                name: name.to_string(),
                attribute,
                owner: record,
                path: None,
            }),
            None => Err(FieldValidationError::unknown_attribute(name, &record.name)
                .with_candidates(record.attribute_names())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelkit_core::SchemaCatalog;

    #[test]
    fn invalid_pointer_pattern_is_a_configuration_error() {
        let catalog = SchemaCatalog::new(Vec::new());
        let options = InspectOptions {
            pointer_pattern: "(".to_string(),
            ..InspectOptions::default()
        };

        let result = SchemaInspector::new(&catalog, &options);
        assert!(matches!(result, Err(Error::Configuration(_))));
        assert!(matches!(
            InspectRules::compile(&options),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn inspectors_share_compiled_rules() {
        let catalog = SchemaCatalog::new(vec![RecordType::new(
            "Place",
            vec![
                Attribute::new("id", AttributeKind::Integer),
                Attribute::new("name", AttributeKind::Text),
                Attribute::relationship("site_ptr", AttributeKind::RelationshipSingle, "Place"),
            ],
        )]);
        let rules = Arc::new(InspectRules::default());

        for _ in 0..2 {
            let inspector = SchemaInspector::with_rules(&catalog, Arc::clone(&rules));
            let record = inspector.record_type("Place").expect("place");
            assert_eq!(inspector.get_visible_attributes(record), ["name"]);
        }
        assert_eq!(Arc::strong_count(&rules), 1);
    }

    #[test]
    fn unknown_record_type_suggests_close_name() {
        let catalog = SchemaCatalog::new(vec![RecordType::new(
            "Sample",
            vec![Attribute::new("id", AttributeKind::Integer)],
        )]);
        let options = InspectOptions::default();
        let inspector = SchemaInspector::new(&catalog, &options).expect("inspector");

        let err = inspector.record_type("Smaple").expect_err("unknown");
        assert!(err.to_string().contains("did you mean 'Sample'?"));
    }
}
