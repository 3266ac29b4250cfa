use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tracing::{info, warn};

use modelkit_config::{
    IssueSeverity, ModelConfig, ValidationIssue, ValidationOptions, ValidationReport, checks,
    check_configs, check_model_config, validate_model_config,
};
use modelkit_core::{
    ArtifactKind, Error, RecordFamily, RecordType, RegistrationSite, Result, SchemaSource,
    build_relationship_graph_report,
};
use modelkit_introspect::{InspectOptions, InspectRules};

use crate::artifacts::Artifact;
use crate::components::ModelComponents;
use crate::resolver::DEFAULT_TABLE_CAP;

/// Settings shared by the registry and every registered model.
#[derive(Debug, Clone)]
pub struct RegistryOptions {
    /// Record families that may be registered.
    pub allowed_families: Vec<RecordFamily>,
    pub inspect: InspectOptions,
    /// Cap on smart-default table columns.
    pub table_cap: usize,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            allowed_families: ValidationOptions::default().allowed_families,
            inspect: InspectOptions::default(),
            table_cap: DEFAULT_TABLE_CAP,
        }
    }
}

impl RegistryOptions {
    pub fn validation(&self) -> ValidationOptions {
        ValidationOptions {
            allowed_families: self.allowed_families.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryState {
    Empty,
    Populated,
}

/// Append-only store of model configs, one per record type.
///
/// Populate it once during startup, then share it read-only.
pub struct Registry {
    source: Arc<dyn SchemaSource>,
    options: Arc<RegistryOptions>,
    rules: Arc<InspectRules>,
    entries: Vec<Arc<ModelComponents>>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn new(source: Arc<dyn SchemaSource>) -> Self {
        Self::assemble(source, RegistryOptions::default(), InspectRules::default())
    }

    /// Registry with custom options; fails when the inspector options are invalid.
    pub fn with_options(source: Arc<dyn SchemaSource>, options: RegistryOptions) -> Result<Self> {
        let rules = InspectRules::compile(&options.inspect)?;
        Ok(Self::assemble(source, options, rules))
    }

    fn assemble(
        source: Arc<dyn SchemaSource>,
        options: RegistryOptions,
        rules: InspectRules,
    ) -> Self {
        Self {
            source,
            options: Arc::new(options),
            rules: Arc::new(rules),
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn source(&self) -> &dyn SchemaSource {
        self.source.as_ref()
    }

    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    pub fn state(&self) -> RegistryState {
        if self.entries.is_empty() {
            RegistryState::Empty
        } else {
            RegistryState::Populated
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate and store `config`, failing on the first blocker.
    #[track_caller]
    pub fn register(&mut self, config: ModelConfig) -> Result<()> {
        let site = RegistrationSite::caller();

        if let Some(existing) = self.get(&config.record_type) {
            return Err(Error::DuplicateRegistration {
                record_type: config.record_type.clone(),
                original: existing.site(),
                duplicate: site,
            });
        }

        let warnings = validate_model_config(
            self.source.as_ref(),
            &config,
            &self.options.validation(),
        )?;
        log_warnings(&config.record_type, &warnings);

        self.insert(config, site);
        Ok(())
    }

    /// Register a batch, or nothing at all when any config has errors.
    #[track_caller]
    pub fn register_all(
        &mut self,
        configs: Vec<ModelConfig>,
    ) -> std::result::Result<(), ValidationReport> {
        let site = RegistrationSite::caller();
        let mut report = check_configs(self.source.as_ref(), &configs, &self.options.validation());

        for (idx, config) in configs.iter().enumerate() {
            if let Some(existing) = self.get(&config.record_type) {
                report.push_error(ValidationIssue::new(
                    IssueSeverity::Error,
                    checks::DUPLICATE_REGISTRATION.code(),
                    format!("/models/{idx}/record_type"),
                    format!(
                        "record type '{}' is already registered (at {})",
                        config.record_type,
                        existing.site()
                    ),
                    None,
                ));
            }
        }

        if !report.is_ok() {
            warn!(
                errors = report.errors.len(),
                warnings = report.warnings.len(),
                "registration rejected"
            );
            return Err(report);
        }

        log_warnings("*", &report.warnings);
        for config in configs {
            self.insert(config, site);
        }
        Ok(())
    }

    fn insert(&mut self, config: ModelConfig, site: RegistrationSite) {
        info!(record_type = %config.record_type, site = %site, "registered model config");
        let record_type = config.record_type.clone();
        let components = ModelComponents::at(
            config,
            Arc::clone(&self.source),
            Arc::clone(&self.options),
            Arc::clone(&self.rules),
            site,
        );
        self.index.insert(record_type, self.entries.len());
        self.entries.push(Arc::new(components));
    }

    pub fn get(&self, record_type: &str) -> Option<&Arc<ModelComponents>> {
        self.index
            .get(record_type)
            .and_then(|idx| self.entries.get(*idx))
    }

    /// Every registration, in registration order.
    pub fn all(&self) -> impl Iterator<Item = (&str, &Arc<ModelComponents>)> {
        self.entries
            .iter()
            .map(|components| (components.record_type(), components))
    }

    /// Re-check every registered config and dry-run every artifact.
    pub fn check(&self) -> ValidationReport {
        let validation = self.options.validation();
        let mut report = ValidationReport::default();

        for (idx, components) in self.entries.iter().enumerate() {
            let base_path = format!("/models/{idx}");
            let config = components.config();

            let config_report =
                check_model_config(self.source.as_ref(), config, &validation, &base_path);
            let blocked = !config_report.is_ok();
            report.merge(config_report);
            if blocked {
                continue;
            }

            let mut used = BTreeSet::new();
            let mut every_generated = true;
            for kind in ArtifactKind::ALL {
                match components.generate(kind) {
                    Ok(Artifact::Generated(generated)) => {
                        used.extend(generated.field_names().into_iter().map(str::to_string));
                        for omitted in generated.omitted() {
                            report.push_warning(ValidationIssue::new(
                                IssueSeverity::Warning,
                                checks::INCOMPATIBLE_ATTRIBUTE.code(),
                                format!("{base_path}/{kind}/{}", omitted.name),
                                omitted.reason.clone(),
                                Some(format!(
                                    "remove '{}' from the {kind} attribute list",
                                    omitted.name
                                )),
                            ));
                        }
                    }
                    Ok(Artifact::Custom(_)) => every_generated = false,
                    Err(err) => {
                        every_generated = false;
                        report.push_error(ValidationIssue::new(
                            IssueSeverity::Error,
                            checks::GENERATION_FAILED.code(),
                            format!("{base_path}/{kind}"),
                            err.to_string(),
                            None,
                        ));
                    }
                }
            }

            if every_generated {
                for name in config.overrides.keys() {
                    if !used.contains(name) {
                        report.push_warning(ValidationIssue::new(
                            IssueSeverity::Warning,
                            checks::UNUSED_OVERRIDE.code(),
                            format!("{base_path}/overrides/{name}"),
                            format!(
                                "override for '{name}' is not used by any artifact of '{}'",
                                config.record_type
                            ),
                            Some(format!("add '{name}' to an attribute list or drop the override")),
                        ));
                    }
                }
            }
        }

        report
    }

    /// Registered record types ordered so relationship targets come first.
    pub fn import_order(&self) -> Result<Vec<String>> {
        let records: Vec<&RecordType> = self
            .entries
            .iter()
            .filter_map(|components| self.source.record_type(components.record_type()))
            .collect();
        let report = build_relationship_graph_report(records);

        match report.topo_order {
            Some(order) => Ok(order
                .into_iter()
                .filter(|name| self.index.contains_key(name))
                .collect()),
            None => Err(Error::Configuration(format!(
                "relationship cycle between {}",
                report.cycle.unwrap_or_default().join(", ")
            ))),
        }
    }
}

fn log_warnings(record_type: &str, warnings: &[ValidationIssue]) {
    for issue in warnings {
        warn!(
            record_type,
            code = %issue.code,
            path = %issue.path,
            hint = issue.hint.as_deref().unwrap_or(""),
            "{}",
            issue.message
        );
    }
}
