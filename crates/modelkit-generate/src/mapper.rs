use std::fmt;

use serde::Serialize;

use modelkit_config::AttributeOverride;
use modelkit_core::{
    ArtifactKind, Attribute, AttributeKind, ColumnKind, FilterKind, LookupOperator, RecordType,
    SchemaSource, WidgetKind,
};
use modelkit_introspect::ResolvedField;

/// Choice sets up to this size render as radio buttons.
pub const RADIO_CHOICE_LIMIT: usize = 5;

/// An attribute kind that has no representation in an artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incompatible {
    pub attribute: String,
    pub kind: AttributeKind,
    pub artifact: ArtifactKind,
}

impl fmt::Display for Incompatible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} attribute '{}' is not supported by the {}",
            self.kind, self.attribute, self.artifact
        )
    }
}

/// Filter kind plus the lookups the query layer applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterMapping {
    pub kind: FilterKind,
    pub lookups: Vec<LookupOperator>,
}

impl FilterMapping {
    fn new(kind: FilterKind) -> Self {
        Self {
            kind,
            lookups: kind.lookups(),
        }
    }
}

/// How an API schema represents a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValueRepresentation {
    String,
    Integer,
    /// Decimal rendered as a string to keep precision.
    Decimal,
    Boolean,
    /// ISO 8601 date.
    Date,
    /// ISO 8601 date-time.
    DateTime,
    /// Primary key of the related record(s).
    PrimaryKey { many: bool },
    FileUrl,
    Json,
}

/// How a bulk import/export file represents a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExternalRepresentation {
    /// The value as-is.
    Plain,
    /// Reference to related record(s) by natural key, or by primary key when
    /// the related type has none.
    NaturalKey {
        record_type: String,
        keys: Vec<String>,
        many: bool,
    },
    /// Path of the stored file.
    FilePath,
}

/// Per-artifact mapping for one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mapping {
    Widget(WidgetKind),
    Filter(FilterMapping),
    Column(ColumnKind),
    Value(ValueRepresentation),
    External(ExternalRepresentation),
}

/// Maps attribute kinds to widgets, filters, and columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeMapper;

impl TypeMapper {
    pub fn new() -> Self {
        Self
    }

    /// Mapping of `field` for `artifact`, honoring the override hook.
    ///
    /// Admin listings map like tables. `source` supplies the related record
    /// type's keys for resources.
    pub fn map(
        &self,
        source: &dyn SchemaSource,
        field: &ResolvedField<'_>,
        artifact: ArtifactKind,
        hook: Option<&AttributeOverride>,
    ) -> Result<Mapping, Incompatible> {
        match artifact {
            ArtifactKind::Form => Ok(Mapping::Widget(self.widget(field.attribute, hook))),
            ArtifactKind::Filter => self.filter(field, hook).map(Mapping::Filter),
            ArtifactKind::Table | ArtifactKind::Admin => {
                self.column(field, artifact, hook).map(Mapping::Column)
            }
            ArtifactKind::Serializer => Ok(Mapping::Value(self.value(field.attribute))),
            ArtifactKind::Resource => Ok(Mapping::External(
                self.external(field, &related_keys(source, field.attribute)),
            )),
        }
    }

    pub fn widget(&self, attribute: &Attribute, hook: Option<&AttributeOverride>) -> WidgetKind {
        if let Some(widget) = hook.and_then(|hook| hook.widget) {
            return widget;
        }
        if attribute.has_choices() {
            return if attribute.choices.len() <= RADIO_CHOICE_LIMIT {
                WidgetKind::RadioSelect
            } else {
                WidgetKind::Select
            };
        }
        match attribute.kind {
            AttributeKind::Text => WidgetKind::TextInput,
            AttributeKind::LongText => WidgetKind::Textarea,
            AttributeKind::Integer | AttributeKind::Decimal => WidgetKind::NumberInput,
            AttributeKind::Boolean => WidgetKind::Checkbox,
            AttributeKind::Date => WidgetKind::DatePicker,
            AttributeKind::DateTime => WidgetKind::DateTimePicker,
            AttributeKind::RelationshipSingle => WidgetKind::SearchableSelect,
            AttributeKind::RelationshipMany => WidgetKind::MultiSelect,
            AttributeKind::File => WidgetKind::FileUpload,
            AttributeKind::Image => WidgetKind::ImageUpload,
            AttributeKind::StructuredData => WidgetKind::StructuredEditor,
        }
    }

    pub fn filter(
        &self,
        field: &ResolvedField<'_>,
        hook: Option<&AttributeOverride>,
    ) -> Result<FilterMapping, Incompatible> {
        if let Some(kind) = hook.and_then(|hook| hook.filter) {
            return Ok(FilterMapping::new(kind));
        }
        let attribute = field.attribute;
        let exact = hook.is_some_and(|hook| hook.exact_match);
        let kind = match attribute.kind {
            AttributeKind::RelationshipSingle => FilterKind::Choice,
            AttributeKind::RelationshipMany => FilterKind::MultipleChoice,
            AttributeKind::File | AttributeKind::Image | AttributeKind::StructuredData => {
                return Err(incompatible(field, ArtifactKind::Filter));
            }
            _ if attribute.has_choices() => FilterKind::Choice,
            AttributeKind::Text | AttributeKind::LongText if exact => FilterKind::Exact,
            AttributeKind::Text | AttributeKind::LongText => FilterKind::Substring,
            AttributeKind::Integer | AttributeKind::Decimal => FilterKind::Range,
            AttributeKind::Boolean => FilterKind::Boolean,
            AttributeKind::Date | AttributeKind::DateTime => FilterKind::DateRange,
        };
        Ok(FilterMapping::new(kind))
    }

    pub fn column(
        &self,
        field: &ResolvedField<'_>,
        artifact: ArtifactKind,
        hook: Option<&AttributeOverride>,
    ) -> Result<ColumnKind, Incompatible> {
        if let Some(column) = hook.and_then(|hook| hook.column) {
            return Ok(column);
        }
        let column = match field.kind() {
            AttributeKind::Text | AttributeKind::LongText => ColumnKind::Text,
            AttributeKind::Integer | AttributeKind::Decimal if field.attribute.has_choices() => {
                ColumnKind::Text
            }
            AttributeKind::Integer | AttributeKind::Decimal => ColumnKind::Number,
            AttributeKind::Boolean => ColumnKind::BooleanIcon,
            AttributeKind::Date => ColumnKind::Date,
            AttributeKind::DateTime => ColumnKind::DateTime,
            AttributeKind::RelationshipSingle => ColumnKind::Link,
            AttributeKind::File => ColumnKind::FileLink,
            AttributeKind::Image => ColumnKind::Thumbnail,
            AttributeKind::RelationshipMany | AttributeKind::StructuredData => {
                return Err(incompatible(field, artifact));
            }
        };
        Ok(column)
    }

    pub fn value(&self, attribute: &Attribute) -> ValueRepresentation {
        match attribute.kind {
            AttributeKind::Text | AttributeKind::LongText => ValueRepresentation::String,
            AttributeKind::Integer => ValueRepresentation::Integer,
            AttributeKind::Decimal => ValueRepresentation::Decimal,
            AttributeKind::Boolean => ValueRepresentation::Boolean,
            AttributeKind::Date => ValueRepresentation::Date,
            AttributeKind::DateTime => ValueRepresentation::DateTime,
            AttributeKind::RelationshipSingle => ValueRepresentation::PrimaryKey { many: false },
            AttributeKind::RelationshipMany => ValueRepresentation::PrimaryKey { many: true },
            AttributeKind::File | AttributeKind::Image => ValueRepresentation::FileUrl,
            AttributeKind::StructuredData => ValueRepresentation::Json,
        }
    }

    /// External representation; `keys` are the related record type's
    /// natural key, or its primary key when it has none.
    pub fn external(&self, field: &ResolvedField<'_>, keys: &[String]) -> ExternalRepresentation {
        let attribute = field.attribute;
        match attribute.kind {
            AttributeKind::RelationshipSingle | AttributeKind::RelationshipMany => {
                ExternalRepresentation::NaturalKey {
                    record_type: attribute.related_to.clone().unwrap_or_default(),
                    keys: keys.to_vec(),
                    many: attribute.kind == AttributeKind::RelationshipMany,
                }
            }
            AttributeKind::File | AttributeKind::Image => ExternalRepresentation::FilePath,
            _ => ExternalRepresentation::Plain,
        }
    }
}

/// Natural key, or the primary key when there is none.
pub fn identity_keys(record: &RecordType) -> Vec<String> {
    if record.natural_key.is_empty() {
        vec![record.primary_key.clone()]
    } else {
        record.natural_key.clone()
    }
}

/// Identity keys of the record type `attribute` points at; empty for plain attributes.
pub fn related_keys(source: &dyn SchemaSource, attribute: &Attribute) -> Vec<String> {
    attribute
        .related_to
        .as_deref()
        .and_then(|name| source.record_type(name))
        .map(identity_keys)
        .unwrap_or_default()
}

fn incompatible(field: &ResolvedField<'_>, artifact: ArtifactKind) -> Incompatible {
    Incompatible {
        attribute: field.name.clone(),
        kind: field.kind(),
        artifact,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelkit_core::RecordType;

    fn field<'a>(record: &'a RecordType, name: &str) -> ResolvedField<'a> {
        let attribute = record.attribute(name).expect("attribute");
        ResolvedField {
            name: name.to_string(),
            attribute,
            owner: record,
            path: None,
        }
    }

    fn record() -> RecordType {
        RecordType::new(
            "Sample",
            vec![
                Attribute::new("name", AttributeKind::Text),
                Attribute::new("notes", AttributeKind::LongText),
                Attribute::new("collected_on", AttributeKind::Date),
                Attribute::relationship("project", AttributeKind::RelationshipSingle, "Project"),
                Attribute::relationship("tags", AttributeKind::RelationshipMany, "Tag"),
                Attribute::new("photo", AttributeKind::Image),
                Attribute::new("payload", AttributeKind::StructuredData),
                Attribute::new("grade", AttributeKind::Integer).with_choices(
                    (1..=6).map(|grade| (grade.to_string(), format!("Grade {grade}"))),
                ),
                Attribute::new("status", AttributeKind::Text)
                    .with_choices([("new", "New"), ("done", "Done")]),
            ],
        )
    }

    #[test]
    fn filters_follow_attribute_kinds() {
        let record = record();
        let mapper = TypeMapper::new();

        let filter = |name| mapper.filter(&field(&record, name), None);
        assert_eq!(filter("name").map(|m| m.kind), Ok(FilterKind::Substring));
        assert_eq!(filter("collected_on").map(|m| m.kind), Ok(FilterKind::DateRange));
        assert_eq!(filter("project").map(|m| m.kind), Ok(FilterKind::Choice));
        assert_eq!(filter("tags").map(|m| m.kind), Ok(FilterKind::MultipleChoice));
        assert_eq!(filter("status").map(|m| m.kind), Ok(FilterKind::Choice));
        assert!(filter("photo").is_err());
        assert!(filter("payload").is_err());
    }

    #[test]
    fn exact_match_switches_text_filter() {
        let record = record();
        let hook = AttributeOverride {
            exact_match: true,
            ..AttributeOverride::default()
        };

        let mapping = TypeMapper::new()
            .filter(&field(&record, "name"), Some(&hook))
            .expect("filter");
        assert_eq!(mapping.kind, FilterKind::Exact);
        assert_eq!(mapping.lookups, vec![LookupOperator::Exact]);
    }

    #[test]
    fn choice_count_selects_radio_or_dropdown() {
        let record = record();
        let mapper = TypeMapper::new();

        let status = record.attribute("status").expect("status");
        let grade = record.attribute("grade").expect("grade");
        assert_eq!(mapper.widget(status, None), WidgetKind::RadioSelect);
        assert_eq!(mapper.widget(grade, None), WidgetKind::Select);
    }

    #[test]
    fn table_drops_many_relationships_and_structured_data() {
        let record = record();
        let mapper = TypeMapper::new();

        let err = mapper
            .column(&field(&record, "tags"), ArtifactKind::Table, None)
            .expect_err("many relationship");
        assert_eq!(
            err.to_string(),
            "relationship_many attribute 'tags' is not supported by the table"
        );
        assert!(
            mapper
                .column(&field(&record, "payload"), ArtifactKind::Table, None)
                .is_err()
        );
        assert_eq!(
            mapper.column(&field(&record, "photo"), ArtifactKind::Table, None),
            Ok(ColumnKind::Thumbnail)
        );
    }

    #[test]
    fn override_hook_wins() {
        let record = record();
        let hook = AttributeOverride {
            widget: Some(WidgetKind::Textarea),
            column: Some(ColumnKind::Text),
            ..AttributeOverride::default()
        };
        let mapper = TypeMapper::new();

        let name = record.attribute("name").expect("name");
        assert_eq!(mapper.widget(name, Some(&hook)), WidgetKind::Textarea);
        assert_eq!(
            mapper.column(&field(&record, "payload"), ArtifactKind::Table, Some(&hook)),
            Ok(ColumnKind::Text)
        );
    }
}
