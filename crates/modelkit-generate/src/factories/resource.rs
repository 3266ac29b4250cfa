use modelkit_core::{ArtifactKind, Result};

use crate::artifacts::{GeneratedArtifact, ResourceField, ResourceSpec};
use crate::mapper::{identity_keys, related_keys};

use super::{ArtifactFactory, GenerationContext};

pub struct ResourceFactory;

impl ArtifactFactory for ResourceFactory {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Resource
    }

    fn synthesize(&self, ctx: &GenerationContext<'_, '_>) -> Result<GeneratedArtifact> {
        let resolution = ctx.resolve(ArtifactKind::Resource)?;
        let source = ctx.inspector.source();

        let fields = resolution
            .fields
            .iter()
            .map(|field| ResourceField {
                name: field.name.clone(),
                header: field.name.clone(),
                representation: ctx
                    .mapper
                    .external(field, &related_keys(source, field.attribute)),
            })
            .collect();

        Ok(GeneratedArtifact::Resource(ResourceSpec {
            record_type: ctx.record.name.clone(),
            import_id_fields: identity_keys(ctx.record),
            fields,
            omitted: Vec::new(),
        }))
    }
}

