use modelkit_core::{ArtifactKind, Result};

use crate::artifacts::{GeneratedArtifact, SerializerField, SerializerSpec};

use super::{ArtifactFactory, GenerationContext};

pub struct SerializerFactory;

impl ArtifactFactory for SerializerFactory {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Serializer
    }

    fn synthesize(&self, ctx: &GenerationContext<'_, '_>) -> Result<GeneratedArtifact> {
        let resolution = ctx.resolve(ArtifactKind::Serializer)?;

        let fields = resolution
            .fields
            .iter()
            .map(|field| {
                let attribute = field.attribute;
                let read_only = !attribute.editable || attribute.auto_managed || field.is_path();
                SerializerField {
                    name: field.name.clone(),
                    representation: ctx.mapper.value(attribute),
                    read_only,
                    required: !read_only && !attribute.nullable,
                }
            })
            .collect();

        Ok(GeneratedArtifact::Serializer(SerializerSpec {
            record_type: ctx.record.name.clone(),
            fields,
            omitted: Vec::new(),
        }))
    }
}
