use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use modelkit_config::ModelConfig;
use modelkit_core::{ArtifactKind, RegistrationSite, Result, SchemaSource};
use modelkit_introspect::{InspectRules, SchemaInspector};

use crate::artifacts::Artifact;
use crate::factories::{self, GenerationContext};
use crate::registry::RegistryOptions;

/// Once-computed slot for one artifact kind.
///
/// Generation runs outside the lock; when two threads race, the first stored
/// value wins and both callers receive it.
#[derive(Debug, Default)]
struct MemoCell {
    value: RwLock<Option<Arc<Artifact>>>,
}

impl MemoCell {
    fn get(&self) -> Option<Arc<Artifact>> {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store(&self, artifact: Arc<Artifact>) -> Arc<Artifact> {
        let mut slot = self.value.write().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(existing) => Arc::clone(existing),
            None => {
                *slot = Some(Arc::clone(&artifact));
                artifact
            }
        }
    }

    fn clear(&self) {
        *self.value.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// A registered model config with lazily generated, memoized artifacts.
pub struct ModelComponents {
    config: ModelConfig,
    source: Arc<dyn SchemaSource>,
    options: Arc<RegistryOptions>,
    rules: Arc<InspectRules>,
    site: RegistrationSite,
    cells: [MemoCell; 6],
}

impl ModelComponents {
    /// Standalone components; fails when the inspector options are invalid.
    #[track_caller]
    pub fn new(
        config: ModelConfig,
        source: Arc<dyn SchemaSource>,
        options: Arc<RegistryOptions>,
    ) -> Result<Self> {
        let site = RegistrationSite::caller();
        let rules = Arc::new(InspectRules::compile(&options.inspect)?);
        Ok(Self::at(config, source, options, rules, site))
    }

    pub(crate) fn at(
        config: ModelConfig,
        source: Arc<dyn SchemaSource>,
        options: Arc<RegistryOptions>,
        rules: Arc<InspectRules>,
        site: RegistrationSite,
    ) -> Self {
        Self {
            config,
            source,
            options,
            rules,
            site,
            cells: Default::default(),
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn record_type(&self) -> &str {
        &self.config.record_type
    }

    /// Where this config was registered.
    pub fn site(&self) -> RegistrationSite {
        self.site
    }

    pub fn form(&self) -> Result<Arc<Artifact>> {
        self.artifact(ArtifactKind::Form)
    }

    pub fn table(&self) -> Result<Arc<Artifact>> {
        self.artifact(ArtifactKind::Table)
    }

    pub fn filter(&self) -> Result<Arc<Artifact>> {
        self.artifact(ArtifactKind::Filter)
    }

    pub fn serializer(&self) -> Result<Arc<Artifact>> {
        self.artifact(ArtifactKind::Serializer)
    }

    pub fn resource(&self) -> Result<Arc<Artifact>> {
        self.artifact(ArtifactKind::Resource)
    }

    pub fn admin(&self) -> Result<Arc<Artifact>> {
        self.artifact(ArtifactKind::Admin)
    }

    /// Memoized artifact of `kind`, generated on first access.
    pub fn artifact(&self, kind: ArtifactKind) -> Result<Arc<Artifact>> {
        let cell = &self.cells[kind.index()];
        if let Some(artifact) = cell.get() {
            debug!(record_type = %self.config.record_type, artifact = %kind, "artifact cache hit");
            return Ok(artifact);
        }

        let artifact = Arc::new(self.generate(kind)?);
        Ok(cell.store(artifact))
    }

    /// Generate `kind` without touching the cache.
    pub fn generate(&self, kind: ArtifactKind) -> Result<Artifact> {
        let inspector =
            SchemaInspector::with_rules(self.source.as_ref(), Arc::clone(&self.rules));
        let ctx = GenerationContext::new(&inspector, &self.config, self.options.table_cap)
            .map_err(|err| err.during_generation(kind, &self.config.record_type))?;
        factories::generate(&ctx, kind)
    }

    pub fn is_cached(&self, kind: ArtifactKind) -> bool {
        self.cells[kind.index()].get().is_some()
    }

    /// Drop every memoized artifact. Meant for test isolation.
    pub fn clear_cache(&self) {
        for cell in &self.cells {
            cell.clear();
        }
    }
}

impl fmt::Debug for ModelComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelComponents")
            .field("record_type", &self.config.record_type)
            .field("site", &self.site)
            .finish_non_exhaustive()
    }
}
