//! Component generation for modelkit.
//!
//! A [`Registry`] holds one [`ModelConfig`](modelkit_config::ModelConfig) per
//! record type. Each registration lazily synthesizes form, table, filter,
//! serializer, resource, and admin specifications from the record type's
//! schema, memoizing every artifact after its first access.

pub mod artifacts;
pub mod components;
pub mod factories;
pub mod mapper;
pub mod registry;
pub mod report;
pub mod resolver;

pub use artifacts::{
    AdminSpec, Artifact, FilterField, FilterSetSpec, FormField, FormSpec, GeneratedArtifact,
    OmittedField, ResourceField, ResourceSpec, SerializerField, SerializerSpec, TableColumn,
    TableSpec,
};
pub use components::ModelComponents;
pub use factories::{ArtifactFactory, GenerationContext, factory_for};
pub use mapper::{
    ExternalRepresentation, FilterMapping, Incompatible, Mapping, RADIO_CHOICE_LIMIT, TypeMapper,
    ValueRepresentation, identity_keys, related_keys,
};
pub use registry::{Registry, RegistryOptions, RegistryState};
pub use report::render_check_report;
pub use resolver::{DEFAULT_TABLE_CAP, FieldResolver, Resolution, Tier};
