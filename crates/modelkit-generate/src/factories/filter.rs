use modelkit_core::{ArtifactKind, Result};

use crate::artifacts::{FilterField, FilterSetSpec, GeneratedArtifact, OmittedField};
use crate::resolver::Resolution;

use super::{ArtifactFactory, GenerationContext};

pub struct FilterFactory;

impl ArtifactFactory for FilterFactory {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Filter
    }

    fn synthesize(&self, ctx: &GenerationContext<'_, '_>) -> Result<GeneratedArtifact> {
        let resolution = ctx.resolve(ArtifactKind::Filter)?;
        let mut omitted = Vec::new();
        let filters = filters(ctx, &resolution, &mut omitted);

        Ok(GeneratedArtifact::Filter(FilterSetSpec {
            record_type: ctx.record.name.clone(),
            filters,
            omitted,
        }))
    }
}

pub(super) fn filters(
    ctx: &GenerationContext<'_, '_>,
    resolution: &Resolution<'_>,
    omitted: &mut Vec<OmittedField>,
) -> Vec<FilterField> {
    let mut filters = Vec::with_capacity(resolution.fields.len());
    for field in &resolution.fields {
        match ctx.mapper.filter(field, ctx.hook(field)) {
            Ok(mapping) => filters.push(FilterField {
                name: field.name.clone(),
                label: ctx.label(field),
                mapping,
                choices: field.attribute.choices.clone(),
            }),
            Err(incompatible) => ctx.omit(omitted, incompatible),
        }
    }
    filters
}
