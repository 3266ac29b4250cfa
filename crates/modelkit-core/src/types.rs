use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Classification of an attribute's stored value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    Text,
    LongText,
    Integer,
    Decimal,
    Boolean,
    Date,
    DateTime,
    RelationshipSingle,
    RelationshipMany,
    File,
    Image,
    /// Opaque structured payload (JSON and friends).
    StructuredData,
}

impl AttributeKind {
    pub fn is_relationship(self) -> bool {
        matches!(
            self,
            AttributeKind::RelationshipSingle | AttributeKind::RelationshipMany
        )
    }

    pub fn is_text(self) -> bool {
        matches!(self, AttributeKind::Text | AttributeKind::LongText)
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, AttributeKind::Integer | AttributeKind::Decimal)
    }

    pub fn is_temporal(self) -> bool {
        matches!(self, AttributeKind::Date | AttributeKind::DateTime)
    }

    pub fn is_file(self) -> bool {
        matches!(self, AttributeKind::File | AttributeKind::Image)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AttributeKind::Text => "text",
            AttributeKind::LongText => "long_text",
            AttributeKind::Integer => "integer",
            AttributeKind::Decimal => "decimal",
            AttributeKind::Boolean => "boolean",
            AttributeKind::Date => "date",
            AttributeKind::DateTime => "date_time",
            AttributeKind::RelationshipSingle => "relationship_single",
            AttributeKind::RelationshipMany => "relationship_many",
            AttributeKind::File => "file",
            AttributeKind::Image => "image",
            AttributeKind::StructuredData => "structured_data",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six artifacts derived from a configuration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Form,
    Table,
    Filter,
    Serializer,
    Resource,
    Admin,
}

impl ArtifactKind {
    /// Every artifact kind, in accessor order.
    pub const ALL: [ArtifactKind; 6] = [
        ArtifactKind::Form,
        ArtifactKind::Table,
        ArtifactKind::Filter,
        ArtifactKind::Serializer,
        ArtifactKind::Resource,
        ArtifactKind::Admin,
    ];

    /// Stable position of this kind inside [`ArtifactKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            ArtifactKind::Form => 0,
            ArtifactKind::Table => 1,
            ArtifactKind::Filter => 2,
            ArtifactKind::Serializer => 3,
            ArtifactKind::Resource => 4,
            ArtifactKind::Admin => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::Form => "form",
            ArtifactKind::Table => "table",
            ArtifactKind::Filter => "filter",
            ArtifactKind::Serializer => "serializer",
            ArtifactKind::Resource => "resource",
            ArtifactKind::Admin => "admin",
        }
    }

    /// Edit-oriented artifacts cannot write across a relationship boundary.
    pub fn drops_relationship_paths(self) -> bool {
        matches!(self, ArtifactKind::Form | ArtifactKind::Serializer)
    }

    /// Capability a custom class must declare to stand in for this artifact.
    pub fn required_capability(self) -> Capability {
        match self {
            ArtifactKind::Form => Capability::ModelForm,
            ArtifactKind::Table => Capability::Table,
            ArtifactKind::Filter => Capability::FilterSet,
            ArtifactKind::Serializer => Capability::ModelSerializer,
            ArtifactKind::Resource => Capability::ImportExportResource,
            ArtifactKind::Admin => Capability::ModelAdmin,
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ArtifactKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| format!("unknown artifact kind '{value}'"))
    }
}

/// Base capability a custom artifact class may provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Editable model form.
    ModelForm,
    Table,
    FilterSet,
    ModelSerializer,
    ImportExportResource,
    ModelAdmin,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::ModelForm => "model_form",
            Capability::Table => "table",
            Capability::FilterSet => "filter_set",
            Capability::ModelSerializer => "model_serializer",
            Capability::ImportExportResource => "import_export_resource",
            Capability::ModelAdmin => "model_admin",
        };
        f.write_str(name)
    }
}

/// Base family a record type belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RecordFamily {
    /// Concrete, persisted record type.
    #[default]
    Model,
    /// Alternate view over another model's storage.
    Proxy,
    /// Schema-only base that is never stored.
    Abstract,
    /// Read-only projection (database view and similar).
    View,
}

impl fmt::Display for RecordFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordFamily::Model => "model",
            RecordFamily::Proxy => "proxy",
            RecordFamily::Abstract => "abstract",
            RecordFamily::View => "view",
        };
        f.write_str(name)
    }
}
