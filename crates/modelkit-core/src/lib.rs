//! Core contracts and helpers for modelkit.
//!
//! This crate defines the canonical record-type schema, the schema
//! introspection capability, relationship-path traversal, and the error
//! taxonomy shared across the inspector, configuration, and generation crates.

pub mod components;
pub mod error;
pub mod graph;
pub mod path;
pub mod schema;
pub mod source;
pub mod suggest;
pub mod types;
pub mod validation;

pub use components::{Alignment, ColumnKind, FilterKind, LookupOperator, WidgetKind};
pub use error::{
    Error, FieldErrorReason, FieldValidationError, MAX_ALTERNATIVES, RegistrationSite, Result,
};
pub use graph::{RelationshipGraphReport, RelationshipGraphSummary, build_relationship_graph_report};
pub use path::{RelationshipPath, ResolvedPath, resolve_path};
pub use schema::{Attribute, Choice, RecordType, SchemaCatalog, humanize};
pub use source::SchemaSource;
pub use suggest::closest_match;
pub use types::{ArtifactKind, AttributeKind, Capability, RecordFamily};
pub use validation::validate_catalog;

/// Current contract version for catalog (`schema.json`) artifacts.
pub const SCHEMA_VERSION: &str = "0.1";
