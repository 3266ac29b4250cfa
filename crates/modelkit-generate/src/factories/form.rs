use modelkit_core::{ArtifactKind, AttributeKind, Result};

use crate::artifacts::{FormField, FormSpec, GeneratedArtifact};

use super::{ArtifactFactory, GenerationContext};

pub struct FormFactory;

impl ArtifactFactory for FormFactory {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Form
    }

    fn synthesize(&self, ctx: &GenerationContext<'_, '_>) -> Result<GeneratedArtifact> {
        let resolution = ctx.resolve(ArtifactKind::Form)?;

        let fields = resolution
            .fields
            .iter()
            .map(|field| {
                let attribute = field.attribute;
                FormField {
                    name: field.name.clone(),
                    label: ctx.label(field),
                    help_text: ctx.help_text(field),
                    widget: ctx.mapper.widget(attribute, ctx.hook(field)),
                    required: attribute.editable
                        && !attribute.nullable
                        && attribute.kind != AttributeKind::Boolean,
                    disabled: !attribute.editable,
                    choices: attribute.choices.clone(),
                }
            })
            .collect();

        Ok(GeneratedArtifact::Form(FormSpec {
            record_type: ctx.record.name.clone(),
            fields,
            omitted: Vec::new(),
        }))
    }
}
