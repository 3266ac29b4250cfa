//! One factory per artifact kind.
//!
//! A configured custom artifact is returned untouched; otherwise the factory
//! resolves the attribute list and maps each attribute for its artifact.

use std::sync::Arc;

use tracing::{debug, info, warn};

use modelkit_config::{AttributeOverride, ModelConfig, checks};
use modelkit_core::{ArtifactKind, Error, RecordType, Result, humanize};
use modelkit_introspect::{ResolvedField, SchemaInspector};

use crate::artifacts::{Artifact, GeneratedArtifact, OmittedField};
use crate::mapper::{Incompatible, TypeMapper};
use crate::resolver::{FieldResolver, Resolution};

mod admin;
mod filter;
mod form;
mod resource;
mod serializer;
mod table;

pub use admin::AdminFactory;
pub use filter::FilterFactory;
pub use form::FormFactory;
pub use resource::ResourceFactory;
pub use serializer::SerializerFactory;
pub use table::TableFactory;

/// Synthesizes one artifact kind from a model config.
pub trait ArtifactFactory: Send + Sync {
    fn kind(&self) -> ArtifactKind;

    fn synthesize(&self, ctx: &GenerationContext<'_, '_>) -> Result<GeneratedArtifact>;
}

/// Everything a factory reads while generating.
pub struct GenerationContext<'i, 'a> {
    pub inspector: &'i SchemaInspector<'a>,
    pub record: &'a RecordType,
    pub config: &'i ModelConfig,
    pub resolver: FieldResolver<'i, 'a>,
    pub mapper: TypeMapper,
}

impl<'i, 'a> GenerationContext<'i, 'a> {
    pub fn new(
        inspector: &'i SchemaInspector<'a>,
        config: &'i ModelConfig,
        table_cap: usize,
    ) -> Result<Self> {
        let record = inspector.record_type(&config.record_type)?;
        Ok(Self {
            inspector,
            record,
            config,
            resolver: FieldResolver::new(inspector).with_table_cap(table_cap),
            mapper: TypeMapper::new(),
        })
    }

    pub fn resolve(&self, kind: ArtifactKind) -> Result<Resolution<'a>> {
        self.resolver.resolve_fields(self.record, self.config, kind)
    }

    pub fn hook(&self, field: &ResolvedField<'_>) -> Option<&'i AttributeOverride> {
        self.config.attribute_override(&field.name)
    }

    /// Label from the override hook, the attribute, or the humanized path.
    pub fn label(&self, field: &ResolvedField<'_>) -> String {
        if let Some(label) = self.hook(field).and_then(|hook| hook.label.clone()) {
            return label;
        }
        if field.is_path() {
            humanize(&field.name)
        } else {
            field.attribute.display_label()
        }
    }

    pub fn help_text(&self, field: &ResolvedField<'_>) -> Option<String> {
        self.hook(field)
            .and_then(|hook| hook.help_text.clone())
            .or_else(|| field.attribute.help_text.clone())
    }

    /// Record an attribute dropped for kind incompatibility.
    pub fn omit(&self, omitted: &mut Vec<OmittedField>, incompatible: Incompatible) {
        warn!(
            record_type = %self.record.name,
            artifact = %incompatible.artifact,
            attribute = %incompatible.attribute,
            kind = %incompatible.kind,
            check = %checks::INCOMPATIBLE_ATTRIBUTE,
            "dropping incompatible attribute"
        );
        omitted.push(OmittedField {
            name: incompatible.attribute.clone(),
            reason: incompatible.to_string(),
        });
    }
}

pub fn factory_for(kind: ArtifactKind) -> &'static dyn ArtifactFactory {
    match kind {
        ArtifactKind::Form => &FormFactory,
        ArtifactKind::Table => &TableFactory,
        ArtifactKind::Filter => &FilterFactory,
        ArtifactKind::Serializer => &SerializerFactory,
        ArtifactKind::Resource => &ResourceFactory,
        ArtifactKind::Admin => &AdminFactory,
    }
}

/// Produce the `kind` artifact: the custom one when configured, else a generated one.
pub fn generate(ctx: &GenerationContext<'_, '_>, kind: ArtifactKind) -> Result<Artifact> {
    let record_type = ctx.record.name.as_str();

    if let Some(custom) = ctx.config.custom_artifact(kind) {
        let capability = kind.required_capability();
        if !custom.supports(capability) {
            return Err(Error::Configuration(format!(
                "custom {kind} '{}' does not support {capability}",
                custom.name()
            ))
            .during_generation(kind, record_type));
        }
        if ctx.config.artifact_attributes(kind).is_some() {
            warn!(
                record_type,
                artifact = %kind,
                custom = custom.name(),
                check = %checks::CUSTOM_WITH_ATTRIBUTES,
                "custom artifact set, ignoring attribute list"
            );
        }
        debug!(record_type, artifact = %kind, custom = custom.name(), "using custom artifact");
        return Ok(Artifact::Custom(Arc::clone(custom)));
    }

    let generated = factory_for(kind)
        .synthesize(ctx)
        .map_err(|err| err.during_generation(kind, record_type))?;
    info!(
        record_type,
        artifact = %kind,
        fields = generated.field_names().len(),
        omitted = generated.omitted().len(),
        "generated artifact"
    );
    Ok(Artifact::Generated(generated))
}
