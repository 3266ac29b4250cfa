use std::collections::BTreeSet;

use tracing::debug;

use modelkit_config::{AttributeSelection, ModelConfig};
use modelkit_core::{ArtifactKind, AttributeKind, RecordType, RelationshipPath, Result};
use modelkit_introspect::{ResolvedField, SchemaInspector};

/// Default cap on smart-default table columns.
pub const DEFAULT_TABLE_CAP: usize = 5;

/// Names that identify a record, in preference order.
const IDENTITY_NAMES: &[&str] = &["name", "title", "label", "code", "slug", "username", "email"];
/// Names that carry workflow state.
const STATUS_NAMES: &[&str] = &["status", "state", "is_active", "active", "is_published"];
/// Names that carry the most relevant timestamp.
const TEMPORAL_NAMES: &[&str] = &[
    "created_at",
    "updated_at",
    "published_at",
    "created",
    "modified",
    "date",
];

/// Which fallback tier produced an attribute list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Per-artifact list (including `"__all__"`).
    Artifact,
    /// `shared_attributes`.
    Shared,
    /// Smart defaults derived from the schema.
    Default,
}

/// Resolved attribute list for one artifact.
#[derive(Debug, Clone)]
pub struct Resolution<'a> {
    pub tier: Tier,
    pub fields: Vec<ResolvedField<'a>>,
}

impl Resolution<'_> {
    pub fn names(&self) -> Vec<String> {
        self.fields.iter().map(|field| field.name.clone()).collect()
    }
}

/// Three-tier attribute list resolution.
#[derive(Clone, Copy)]
pub struct FieldResolver<'i, 'a> {
    inspector: &'i SchemaInspector<'a>,
    table_cap: usize,
}

impl<'i, 'a> FieldResolver<'i, 'a> {
    pub fn new(inspector: &'i SchemaInspector<'a>) -> Self {
        Self {
            inspector,
            table_cap: DEFAULT_TABLE_CAP,
        }
    }

    pub fn with_table_cap(mut self, table_cap: usize) -> Self {
        self.table_cap = table_cap;
        self
    }

    /// Names for `kind`, after filtering, exclusion, and validation.
    pub fn resolve(&self, config: &ModelConfig, kind: ArtifactKind) -> Result<Vec<String>> {
        let record = self.inspector.record_type(&config.record_type)?;
        Ok(self.resolve_fields(record, config, kind)?.names())
    }

    /// Resolve and validate the attribute list of `kind` against `record`.
    pub fn resolve_fields(
        &self,
        record: &'a RecordType,
        config: &ModelConfig,
        kind: ArtifactKind,
    ) -> Result<Resolution<'a>> {
        let (tier, candidates) = self.candidates(record, config, kind);
        debug!(
            record_type = %record.name,
            artifact = %kind,
            tier = ?tier,
            count = candidates.len(),
            "resolved attribute tier"
        );

        let mut seen = BTreeSet::new();
        let mut fields = Vec::with_capacity(candidates.len());
        for name in candidates {
            if kind.drops_relationship_paths() && RelationshipPath::is_traversal(&name) {
                debug!(record_type = %record.name, artifact = %kind, field = %name, "dropping relationship path");
                continue;
            }
            if config.is_excluded(&name) {
                continue;
            }
            if !seen.insert(name.clone()) {
                continue;
            }
            fields.push(self.inspector.resolve_field(record, &name)?);
        }

        Ok(Resolution { tier, fields })
    }

    fn candidates(
        &self,
        record: &RecordType,
        config: &ModelConfig,
        kind: ArtifactKind,
    ) -> (Tier, Vec<String>) {
        // A custom artifact makes its own list inert, including for the admin
        // listing that reads the table and filter lists.
        let selection = config
            .artifact_attributes(kind)
            .filter(|_| config.custom_artifact(kind).is_none());
        if let Some(selection) = selection {
            let names = match selection {
                AttributeSelection::All => self.inspector.get_visible_attributes(record),
                AttributeSelection::Named(names) => names.clone(),
            };
            return (Tier::Artifact, names);
        }

        if !config.shared_attributes.is_empty() {
            return (Tier::Shared, config.shared_attributes.clone());
        }

        (Tier::Default, self.default_attributes(record, kind))
    }

    /// Smart default attribute list for `kind`.
    pub fn default_attributes(&self, record: &RecordType, kind: ArtifactKind) -> Vec<String> {
        match kind {
            ArtifactKind::Table => {
                let mut names = self.prioritized(record, is_displayable, |_| true);
                names.truncate(self.table_cap);
                names
            }
            ArtifactKind::Filter => self.prioritized(record, is_filterable, |kind| {
                kind.is_temporal()
                    || kind == AttributeKind::Boolean
                    || kind == AttributeKind::RelationshipSingle
            }),
            ArtifactKind::Form
            | ArtifactKind::Serializer
            | ArtifactKind::Resource
            | ArtifactKind::Admin => self.inspector.get_default_safe_attributes(record),
        }
    }

    /// Priority names first, then the remaining attributes admitted by `rest`.
    ///
    /// Choice-bearing attributes always count as admitted.
    fn prioritized(
        &self,
        record: &RecordType,
        eligible: fn(AttributeKind) -> bool,
        rest: impl Fn(AttributeKind) -> bool,
    ) -> Vec<String> {
        let visible: Vec<_> = record
            .attributes
            .iter()
            .filter(|attribute| !self.inspector.is_technical(record, attribute))
            .filter(|attribute| eligible(attribute.kind))
            .collect();

        let mut names: Vec<String> = IDENTITY_NAMES
            .iter()
            .chain(STATUS_NAMES)
            .chain(TEMPORAL_NAMES)
            .filter(|name| visible.iter().any(|attribute| attribute.name == **name))
            .map(|name| name.to_string())
            .collect();

        for attribute in &visible {
            if names.contains(&attribute.name) {
                continue;
            }
            if attribute.has_choices() || rest(attribute.kind) {
                names.push(attribute.name.clone());
            }
        }
        names
    }
}

fn is_displayable(kind: AttributeKind) -> bool {
    !matches!(
        kind,
        AttributeKind::RelationshipMany | AttributeKind::StructuredData
    )
}

fn is_filterable(kind: AttributeKind) -> bool {
    !matches!(
        kind,
        AttributeKind::File | AttributeKind::Image | AttributeKind::StructuredData
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelkit_core::{Attribute, SchemaCatalog};
    use modelkit_introspect::InspectOptions;

    fn catalog() -> SchemaCatalog {
        SchemaCatalog::new(vec![RecordType::new(
            "Ticket",
            vec![
                Attribute::new("id", AttributeKind::Integer).read_only(),
                Attribute::new("summary", AttributeKind::Text),
                Attribute::new("body", AttributeKind::LongText),
                Attribute::new("priority", AttributeKind::Integer),
                Attribute::new("is_urgent", AttributeKind::Boolean),
                Attribute::new("due_on", AttributeKind::Date),
                Attribute::new("payload", AttributeKind::StructuredData),
                Attribute::new("status", AttributeKind::Text)
                    .with_choices([("open", "Open"), ("closed", "Closed")]),
                Attribute::new("created_at", AttributeKind::DateTime).auto_managed(),
            ],
        )])
    }

    #[test]
    fn table_default_puts_priority_names_first_and_caps() {
        let catalog = catalog();
        let options = InspectOptions::default();
        let inspector = SchemaInspector::new(&catalog, &options).expect("inspector");
        let record = catalog.record_type("Ticket").expect("ticket");
        let resolver = FieldResolver::new(&inspector);

        assert_eq!(
            resolver.default_attributes(record, ArtifactKind::Table),
            vec!["status", "created_at", "summary", "body", "priority"]
        );
        assert_eq!(
            resolver
                .with_table_cap(2)
                .default_attributes(record, ArtifactKind::Table),
            vec!["status", "created_at"]
        );
    }

    #[test]
    fn filter_default_keeps_filterable_kinds() {
        let catalog = catalog();
        let options = InspectOptions::default();
        let inspector = SchemaInspector::new(&catalog, &options).expect("inspector");
        let record = catalog.record_type("Ticket").expect("ticket");

        assert_eq!(
            FieldResolver::new(&inspector).default_attributes(record, ArtifactKind::Filter),
            vec!["status", "created_at", "is_urgent", "due_on"]
        );
    }
}
