use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::{AttributeKind, RecordFamily};

/// Top-level snapshot of every record type known to an application.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SchemaCatalog {
    /// Contract version for this catalog format.
    pub schema_version: String,
    /// Record types in declaration order.
    pub record_types: Vec<RecordType>,
}

impl SchemaCatalog {
    pub fn new(record_types: Vec<RecordType>) -> Self {
        Self {
            schema_version: crate::SCHEMA_VERSION.to_string(),
            record_types,
        }
    }

    pub fn record_type(&self, name: &str) -> Option<&RecordType> {
        self.record_types.iter().find(|record| record.name == name)
    }
}

/// A record type (model/entity definition) as seen by the core.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RecordType {
    pub name: String,
    #[serde(default)]
    pub family: RecordFamily,
    /// Human-readable name; defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Name of the identity attribute.
    #[serde(default = "default_primary_key")]
    pub primary_key: String,
    /// Attributes that identify a record without its primary key.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub natural_key: Vec<String>,
    pub attributes: Vec<Attribute>,
}

fn default_primary_key() -> String {
    "id".to_string()
}

impl RecordType {
    pub fn new(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            name: name.into(),
            family: RecordFamily::Model,
            label: None,
            primary_key: default_primary_key(),
            natural_key: Vec::new(),
            attributes,
        }
    }

    pub fn with_family(mut self, family: RecordFamily) -> Self {
        self.family = family;
        self
    }

    pub fn with_natural_key<I, S>(mut self, natural_key: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.natural_key = natural_key.into_iter().map(Into::into).collect();
        self
    }

    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| attribute.name == name)
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|attribute| attribute.name.as_str())
    }
}

/// A named, typed field on a record type.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Attribute {
    pub name: String,
    pub kind: AttributeKind,
    #[serde(default = "default_true")]
    pub editable: bool,
    /// Maintained by the storage layer (creation/modification timestamps).
    #[serde(default)]
    pub auto_managed: bool,
    /// Internal plumbing that is never shown (discriminators, inheritance pointers).
    #[serde(default)]
    pub technical: bool,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    /// Target record type for relationship attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Attribute {
    pub fn new(name: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            editable: true,
            auto_managed: false,
            technical: false,
            nullable: false,
            choices: Vec::new(),
            related_to: None,
            max_length: None,
            label: None,
            help_text: None,
        }
    }

    /// Relationship attribute pointing at `target`.
    pub fn relationship(
        name: impl Into<String>,
        kind: AttributeKind,
        target: impl Into<String>,
    ) -> Self {
        let mut attribute = Self::new(name, kind);
        attribute.related_to = Some(target.into());
        attribute
    }

    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    pub fn auto_managed(mut self) -> Self {
        self.auto_managed = true;
        self.editable = false;
        self
    }

    pub fn technical(mut self) -> Self {
        self.technical = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_choices<I, V, L>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        self.choices = choices
            .into_iter()
            .map(|(value, label)| Choice {
                value: value.into(),
                label: label.into(),
            })
            .collect();
        self
    }

    pub fn has_choices(&self) -> bool {
        !self.choices.is_empty()
    }

    /// Label shown to users; falls back to a humanized attribute name.
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => humanize(&self.name),
        }
    }
}

/// One entry of a fixed choice set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

/// Turn `collected_on` into `Collected on`.
pub fn humanize(name: &str) -> String {
    let spaced = name.replace("__", " ").replace(['_', '.'], " ");
    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
