//! Schema inspection for modelkit.
//!
//! Classifies the attributes of record types exposed through a
//! [`SchemaSource`], and provides adapters that build a canonical catalog.

pub mod adapter;
pub mod inspector;
pub mod options;
pub mod snapshot;

pub use adapter::Adapter;
pub use inspector::{InspectRules, ResolvedField, SchemaInspector};
pub use options::{DEFAULT_POINTER_PATTERN, InspectOptions};
pub use snapshot::{SnapshotAdapter, kind_from_field_type, load_catalog};

pub use modelkit_core::{SchemaCatalog, SchemaSource};
