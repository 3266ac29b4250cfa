use modelkit_core::{ArtifactKind, Result};

use crate::artifacts::{GeneratedArtifact, OmittedField, TableColumn, TableSpec};
use crate::resolver::Resolution;

use super::{ArtifactFactory, GenerationContext};

pub struct TableFactory;

impl ArtifactFactory for TableFactory {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Table
    }

    fn synthesize(&self, ctx: &GenerationContext<'_, '_>) -> Result<GeneratedArtifact> {
        let resolution = ctx.resolve(ArtifactKind::Table)?;
        let mut omitted = Vec::new();
        let columns = columns(ctx, &resolution, ArtifactKind::Table, &mut omitted);

        Ok(GeneratedArtifact::Table(TableSpec {
            record_type: ctx.record.name.clone(),
            columns,
            omitted,
        }))
    }
}

/// Listing columns for `resolution`; shared with the admin listing.
pub(super) fn columns(
    ctx: &GenerationContext<'_, '_>,
    resolution: &Resolution<'_>,
    artifact: ArtifactKind,
    omitted: &mut Vec<OmittedField>,
) -> Vec<TableColumn> {
    let mut columns = Vec::with_capacity(resolution.fields.len());
    for field in &resolution.fields {
        match ctx.mapper.column(field, artifact, ctx.hook(field)) {
            Ok(kind) => columns.push(TableColumn {
                name: field.name.clone(),
                label: ctx.label(field),
                kind,
                alignment: kind.alignment(),
                accessor: field.accessor(),
            }),
            Err(incompatible) => ctx.omit(omitted, incompatible),
        }
    }
    columns
}
