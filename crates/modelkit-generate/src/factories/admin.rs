use modelkit_core::{ArtifactKind, Result};

use crate::artifacts::{AdminSpec, GeneratedArtifact};

use super::filter::filters;
use super::table::columns;
use super::{ArtifactFactory, GenerationContext};

/// Rows per listing page when the config does not say.
pub const DEFAULT_LIST_PER_PAGE: u32 = 100;

pub struct AdminFactory;

impl ArtifactFactory for AdminFactory {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Admin
    }

    fn synthesize(&self, ctx: &GenerationContext<'_, '_>) -> Result<GeneratedArtifact> {
        let mut omitted = Vec::new();
        let listing = ctx.resolve(ArtifactKind::Table)?;
        let list_display = columns(ctx, &listing, ArtifactKind::Admin, &mut omitted);
        let list_filter = filters(ctx, &ctx.resolve(ArtifactKind::Filter)?, &mut omitted);

        let mut fields = Vec::new();
        let mut readonly_fields = Vec::new();
        for field in ctx.resolve(ArtifactKind::Admin)?.fields {
            if field.is_path() || !field.attribute.editable {
                readonly_fields.push(field.name);
            } else {
                fields.push(field.name);
            }
        }

        let admin = &ctx.config.admin;
        let search_fields = if admin.search_fields.is_empty() {
            listing
                .fields
                .iter()
                .filter(|field| field.kind().is_text() && !field.attribute.has_choices())
                .map(|field| field.name.clone())
                .collect()
        } else {
            admin.search_fields.clone()
        };

        Ok(GeneratedArtifact::Admin(AdminSpec {
            record_type: ctx.record.name.clone(),
            display_name: ctx
                .config
                .display_name
                .clone()
                .unwrap_or_else(|| ctx.record.display_name().to_string()),
            description: ctx.config.description.clone(),
            list_display,
            list_filter,
            search_fields,
            fields,
            readonly_fields,
            ordering: admin.ordering.clone(),
            list_per_page: admin.list_per_page.unwrap_or(DEFAULT_LIST_PER_PAGE),
            omitted,
        }))
    }
}
