//! Generated artifact definitions handed to the component library.

use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use modelkit_config::CustomArtifact;
use modelkit_core::{Alignment, ArtifactKind, Choice, ColumnKind, WidgetKind};

use crate::mapper::{ExternalRepresentation, FilterMapping, ValueRepresentation};

/// An attribute left out of an artifact, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OmittedField {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    pub widget: WidgetKind,
    pub required: bool,
    /// Shown but not editable (read-only relationships).
    pub disabled: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
}

/// Edit form.
#[derive(Debug, Clone, Serialize)]
pub struct FormSpec {
    pub record_type: String,
    pub fields: Vec<FormField>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub omitted: Vec<OmittedField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableColumn {
    pub name: String,
    pub label: String,
    pub kind: ColumnKind,
    pub alignment: Alignment,
    /// Segments followed to reach the value.
    pub accessor: Vec<String>,
}

/// Tabular listing.
#[derive(Debug, Clone, Serialize)]
pub struct TableSpec {
    pub record_type: String,
    pub columns: Vec<TableColumn>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub omitted: Vec<OmittedField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterField {
    pub name: String,
    pub label: String,
    #[serde(flatten)]
    pub mapping: FilterMapping,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
}

/// Query/filter definition.
#[derive(Debug, Clone, Serialize)]
pub struct FilterSetSpec {
    pub record_type: String,
    pub filters: Vec<FilterField>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub omitted: Vec<OmittedField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SerializerField {
    pub name: String,
    pub representation: ValueRepresentation,
    pub read_only: bool,
    pub required: bool,
}

/// API serialization schema.
#[derive(Debug, Clone, Serialize)]
pub struct SerializerSpec {
    pub record_type: String,
    pub fields: Vec<SerializerField>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub omitted: Vec<OmittedField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceField {
    pub name: String,
    /// Column header in import/export files.
    pub header: String,
    pub representation: ExternalRepresentation,
}

/// Bulk import/export field mapping.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceSpec {
    pub record_type: String,
    /// Fields that identify an existing record on import.
    pub import_id_fields: Vec<String>,
    pub fields: Vec<ResourceField>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub omitted: Vec<OmittedField>,
}

/// Administrative management definition.
#[derive(Debug, Clone, Serialize)]
pub struct AdminSpec {
    pub record_type: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub list_display: Vec<TableColumn>,
    pub list_filter: Vec<FilterField>,
    pub search_fields: Vec<String>,
    pub fields: Vec<String>,
    pub readonly_fields: Vec<String>,
    pub ordering: Vec<String>,
    pub list_per_page: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub omitted: Vec<OmittedField>,
}

/// A synthesized artifact.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "artifact", rename_all = "snake_case")]
pub enum GeneratedArtifact {
    Form(FormSpec),
    Table(TableSpec),
    Filter(FilterSetSpec),
    Serializer(SerializerSpec),
    Resource(ResourceSpec),
    Admin(AdminSpec),
}

impl GeneratedArtifact {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            GeneratedArtifact::Form(_) => ArtifactKind::Form,
            GeneratedArtifact::Table(_) => ArtifactKind::Table,
            GeneratedArtifact::Filter(_) => ArtifactKind::Filter,
            GeneratedArtifact::Serializer(_) => ArtifactKind::Serializer,
            GeneratedArtifact::Resource(_) => ArtifactKind::Resource,
            GeneratedArtifact::Admin(_) => ArtifactKind::Admin,
        }
    }

    /// Attributes dropped during generation.
    pub fn omitted(&self) -> &[OmittedField] {
        match self {
            GeneratedArtifact::Form(spec) => &spec.omitted,
            GeneratedArtifact::Table(spec) => &spec.omitted,
            GeneratedArtifact::Filter(spec) => &spec.omitted,
            GeneratedArtifact::Serializer(spec) => &spec.omitted,
            GeneratedArtifact::Resource(spec) => &spec.omitted,
            GeneratedArtifact::Admin(spec) => &spec.omitted,
        }
    }

    /// Attribute names the artifact presents, in order.
    pub fn field_names(&self) -> Vec<&str> {
        match self {
            GeneratedArtifact::Form(spec) => spec.fields.iter().map(|f| f.name.as_str()).collect(),
            GeneratedArtifact::Table(spec) => {
                spec.columns.iter().map(|c| c.name.as_str()).collect()
            }
            GeneratedArtifact::Filter(spec) => {
                spec.filters.iter().map(|f| f.name.as_str()).collect()
            }
            GeneratedArtifact::Serializer(spec) => {
                spec.fields.iter().map(|f| f.name.as_str()).collect()
            }
            GeneratedArtifact::Resource(spec) => {
                spec.fields.iter().map(|f| f.name.as_str()).collect()
            }
            GeneratedArtifact::Admin(spec) => spec
                .list_display
                .iter()
                .map(|c| c.name.as_str())
                .chain(spec.list_filter.iter().map(|f| f.name.as_str()))
                .chain(spec.fields.iter().map(String::as_str))
                .chain(spec.readonly_fields.iter().map(String::as_str))
                .collect(),
        }
    }
}

/// What an accessor returns: the caller's custom artifact or a generated one.
#[derive(Debug, Clone)]
pub enum Artifact {
    Custom(Arc<dyn CustomArtifact>),
    Generated(GeneratedArtifact),
}

impl Artifact {
    pub fn is_custom(&self) -> bool {
        matches!(self, Artifact::Custom(_))
    }

    pub fn custom(&self) -> Option<&Arc<dyn CustomArtifact>> {
        match self {
            Artifact::Custom(custom) => Some(custom),
            Artifact::Generated(_) => None,
        }
    }

    pub fn generated(&self) -> Option<&GeneratedArtifact> {
        match self {
            Artifact::Custom(_) => None,
            Artifact::Generated(generated) => Some(generated),
        }
    }

    pub fn as_form(&self) -> Option<&FormSpec> {
        match self.generated()? {
            GeneratedArtifact::Form(spec) => Some(spec),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&TableSpec> {
        match self.generated()? {
            GeneratedArtifact::Table(spec) => Some(spec),
            _ => None,
        }
    }

    pub fn as_filter(&self) -> Option<&FilterSetSpec> {
        match self.generated()? {
            GeneratedArtifact::Filter(spec) => Some(spec),
            _ => None,
        }
    }

    pub fn as_serializer(&self) -> Option<&SerializerSpec> {
        match self.generated()? {
            GeneratedArtifact::Serializer(spec) => Some(spec),
            _ => None,
        }
    }

    pub fn as_resource(&self) -> Option<&ResourceSpec> {
        match self.generated()? {
            GeneratedArtifact::Resource(spec) => Some(spec),
            _ => None,
        }
    }

    pub fn as_admin(&self) -> Option<&AdminSpec> {
        match self.generated()? {
            GeneratedArtifact::Admin(spec) => Some(spec),
            _ => None,
        }
    }
}

impl Serialize for Artifact {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Artifact::Generated(generated) => generated.serialize(serializer),
            Artifact::Custom(custom) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("custom", custom.name())?;
                map.serialize_entry("capabilities", custom.capabilities())?;
                map.end()
            }
        }
    }
}
