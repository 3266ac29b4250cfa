use modelkit_core::{Result, SchemaCatalog};

use crate::options::InspectOptions;

/// Trait implemented by adapters that can produce a canonical schema catalog.
pub trait Adapter {
    /// Returns the source identifier (e.g. `snapshot`).
    fn engine(&self) -> &'static str;

    /// Introspect the source and return a catalog snapshot.
    fn introspect(&self, opts: &InspectOptions) -> Result<SchemaCatalog>;
}
