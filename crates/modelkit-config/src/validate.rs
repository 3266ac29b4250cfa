use std::collections::BTreeMap;

use jsonschema::JSONSchema;
use serde_json::Value;
use tracing::debug;

use modelkit_core::{
    AttributeKind, Error, FieldErrorReason, FieldValidationError, RecordFamily, RecordType,
    RelationshipPath, SchemaSource, closest_match, resolve_path,
};

use crate::checks::{self, CheckId};
use crate::errors::{ConfigError, IssueSeverity, ValidationIssue, ValidationReport};
use crate::model::{AttributeSelection, ConfigDocument, ModelConfig};
use crate::schema::config_json_schema;

/// Options for registration-time validation.
#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// Record families that may be registered.
    pub allowed_families: Vec<RecordFamily>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            allowed_families: vec![RecordFamily::Model, RecordFamily::Proxy],
        }
    }
}

/// Config document with accumulated warnings.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub document: ConfigDocument,
    pub warnings: Vec<ValidationIssue>,
}

/// One outcome of checking a model config.
#[derive(Debug)]
pub enum Finding {
    Error {
        id: CheckId,
        path: String,
        error: Error,
        hint: Option<String>,
    },
    Warning(ValidationIssue),
}

impl Finding {
    fn field(id: CheckId, path: String, error: FieldValidationError) -> Self {
        let hint = error.hint();
        Finding::Error {
            id,
            path,
            error: Error::FieldValidation(error),
            hint,
        }
    }

    fn warning(id: CheckId, path: String, message: String, hint: Option<String>) -> Self {
        Finding::Warning(ValidationIssue::new(
            IssueSeverity::Warning,
            id.code(),
            path,
            message,
            hint,
        ))
    }

    pub fn into_issue(self) -> ValidationIssue {
        match self {
            Finding::Error {
                id,
                path,
                error,
                hint,
            } => ValidationIssue::new(IssueSeverity::Error, id.code(), path, error.to_string(), hint),
            Finding::Warning(issue) => issue,
        }
    }
}

/// Validate a config JSON document against the config JSON Schema.
pub fn validate_config_json(config_json: &Value) -> Result<ValidationReport, ConfigError> {
    let schema = serde_json::to_value(config_json_schema())?;
    let compiled =
        JSONSchema::compile(&schema).map_err(|err| ConfigError::Schema(err.to_string()))?;

    let mut report = ValidationReport::default();

    if let Err(errors) = compiled.validate(config_json) {
        for error in errors {
            let path = normalized_json_pointer(&error.instance_path.to_string());
            report.push_error(ValidationIssue::new(
                IssueSeverity::Error,
                "schema_violation",
                path,
                error.to_string(),
                None,
            ));
        }
    }

    Ok(report)
}

/// Check one model config against the schema, in configuration order.
///
/// Errors are registration blockers; warnings never are.
pub fn findings(
    source: &dyn SchemaSource,
    config: &ModelConfig,
    options: &ValidationOptions,
    base_path: &str,
) -> Vec<Finding> {
    let mut out = Vec::new();

    let Some(record) = source.record_type(&config.record_type) else {
        let suggestion = closest_match(&config.record_type, &source.record_type_names());
        out.push(Finding::Error {
            id: checks::UNKNOWN_RECORD_TYPE,
            path: format!("{base_path}/record_type"),
            error: Error::Configuration(format!(
                "unknown record type '{}'",
                config.record_type
            )),
            hint: suggestion.map(|suggestion| format!("did you mean '{suggestion}'?")),
        });
        return out;
    };

    if !options.allowed_families.contains(&record.family) {
        let allowed: Vec<String> = options
            .allowed_families
            .iter()
            .map(ToString::to_string)
            .collect();
        out.push(Finding::Error {
            id: checks::FAMILY_NOT_ALLOWED,
            path: format!("{base_path}/record_type"),
            error: Error::Configuration(format!(
                "record type '{}' is a {} and cannot be registered",
                record.name, record.family
            )),
            hint: Some(format!("allowed families: {}", allowed.join(", "))),
        });
    }

    for (kind, artifact) in config.custom_artifacts() {
        let capability = kind.required_capability();
        if !artifact.supports(capability) {
            out.push(Finding::Error {
                id: checks::MISSING_CAPABILITY,
                path: format!("{base_path}/custom/{kind}"),
                error: Error::Configuration(format!(
                    "custom {kind} '{}' for '{}' does not support {capability}",
                    artifact.name(),
                    record.name
                )),
                hint: Some(format!("implement the {capability} capability")),
            });
        }
        if config.artifact_attributes(kind).is_some() {
            out.push(Finding::warning(
                checks::CUSTOM_WITH_ATTRIBUTES,
                format!("{base_path}/artifacts/{kind}"),
                format!(
                    "custom {kind} '{}' is set; the attribute list for {kind} is ignored",
                    artifact.name()
                ),
                Some(format!("remove artifacts.{kind} or the custom {kind}")),
            ));
        }
    }

    for (idx, name) in config.shared_attributes.iter().enumerate() {
        check_name(
            source,
            record,
            name,
            format!("{base_path}/shared_attributes/{idx}"),
            &mut out,
        );
    }

    for (kind, selection) in &config.artifacts {
        if config.custom_artifact(*kind).is_some() {
            continue;
        }
        if let AttributeSelection::Named(names) = selection {
            for (idx, name) in names.iter().enumerate() {
                check_name(
                    source,
                    record,
                    name,
                    format!("{base_path}/artifacts/{kind}/{idx}"),
                    &mut out,
                );
            }
        }
    }

    for (idx, name) in config.exclude.iter().enumerate() {
        if let Err(error) = lookup(source, record, name) {
            out.push(Finding::warning(
                checks::UNKNOWN_EXCLUSION,
                format!("{base_path}/exclude/{idx}"),
                format!("exclusion has no effect: {error}"),
                error.hint(),
            ));
        }
    }

    for (name, hook) in &config.overrides {
        let path = format!("{base_path}/overrides/{name}");
        match lookup(source, record, name) {
            Ok(kind) => {
                if hook.exact_match && !kind.is_text() {
                    out.push(Finding::warning(
                        checks::EXACT_MATCH_NON_TEXT,
                        format!("{path}/exact_match"),
                        format!(
                            "exact_match on '{name}' has no effect: attribute kind is {kind}"
                        ),
                        None,
                    ));
                }
            }
            Err(error) => out.push(Finding::field(id_for(&error), path, error)),
        }
    }

    for (idx, name) in config.admin.search_fields.iter().enumerate() {
        check_name(
            source,
            record,
            name,
            format!("{base_path}/admin/search_fields/{idx}"),
            &mut out,
        );
    }

    for (idx, name) in config.admin.ordering.iter().enumerate() {
        check_name(
            source,
            record,
            name.trim_start_matches('-'),
            format!("{base_path}/admin/ordering/{idx}"),
            &mut out,
        );
    }

    out
}

/// Validate one model config, failing on the first registration blocker.
///
/// Returns the warnings when the config can be registered.
pub fn validate_model_config(
    source: &dyn SchemaSource,
    config: &ModelConfig,
    options: &ValidationOptions,
) -> Result<Vec<ValidationIssue>, Error> {
    let mut warnings = Vec::new();
    for finding in findings(source, config, options, "") {
        match finding {
            Finding::Error { error, .. } => return Err(error),
            Finding::Warning(issue) => warnings.push(issue),
        }
    }
    Ok(warnings)
}

/// Check one model config, collecting every issue.
pub fn check_model_config(
    source: &dyn SchemaSource,
    config: &ModelConfig,
    options: &ValidationOptions,
    base_path: &str,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    for finding in findings(source, config, options, base_path) {
        report.push(finding.into_issue());
    }
    report
}

/// Check a batch of model configs before any of them is registered.
pub fn check_configs(
    source: &dyn SchemaSource,
    configs: &[ModelConfig],
    options: &ValidationOptions,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();

    for (idx, config) in configs.iter().enumerate() {
        let base_path = format!("/models/{idx}");
        debug!(record_type = %config.record_type, path = %base_path, "checking model config");

        if let Some(first) = seen.get(config.record_type.as_str()) {
            report.push_error(ValidationIssue::new(
                IssueSeverity::Error,
                checks::DUPLICATE_REGISTRATION.code(),
                format!("{base_path}/record_type"),
                format!(
                    "record type '{}' is configured more than once (first at /models/{first})",
                    config.record_type
                ),
                Some("merge duplicate configs into a single entry".to_string()),
            ));
            continue;
        }
        seen.insert(config.record_type.as_str(), idx);

        report.merge(check_model_config(source, config, options, &base_path));
    }

    report
}

/// Validate a config document end-to-end, returning structured issues on failure.
pub fn validate_config(
    config_json: &Value,
    source: &dyn SchemaSource,
    options: &ValidationOptions,
) -> Result<ValidatedConfig, ValidationReport> {
    let structural = match validate_config_json(config_json) {
        Ok(report) => report,
        Err(err) => {
            let mut report = ValidationReport::default();
            report.push_error(ValidationIssue::new(
                IssueSeverity::Error,
                "schema_validation_error",
                "/",
                err.to_string(),
                None,
            ));
            return Err(report);
        }
    };

    if !structural.is_ok() {
        return Err(structural);
    }

    let document: ConfigDocument = match serde_json::from_value(config_json.clone()) {
        Ok(document) => document,
        Err(err) => {
            let mut report = ValidationReport::default();
            report.push_error(ValidationIssue::new(
                IssueSeverity::Error,
                "invalid_config_json",
                "/",
                err.to_string(),
                None,
            ));
            return Err(report);
        }
    };

    let report = check_configs(source, &document.models, options);
    if !report.is_ok() {
        return Err(report);
    }

    Ok(ValidatedConfig {
        document,
        warnings: report.warnings,
    })
}

fn check_name(
    source: &dyn SchemaSource,
    record: &RecordType,
    name: &str,
    path: String,
    out: &mut Vec<Finding>,
) {
    if let Err(error) = lookup(source, record, name) {
        out.push(Finding::field(id_for(&error), path, error));
    }
}

/// Resolve a plain name or relationship path to the kind of its terminal attribute.
fn lookup(
    source: &dyn SchemaSource,
    record: &RecordType,
    name: &str,
) -> Result<AttributeKind, FieldValidationError> {
    if RelationshipPath::is_traversal(name) {
        let path = RelationshipPath::parse(name);
        return resolve_path(source, record, &path).map(|resolved| resolved.terminal().kind);
    }
    record
        .attribute(name)
        .map(|attribute| attribute.kind)
        .ok_or_else(|| {
            FieldValidationError::unknown_attribute(name, &record.name)
                .with_candidates(record.attribute_names())
        })
}

fn id_for(error: &FieldValidationError) -> CheckId {
    if error.segment.is_some() || error.reason != FieldErrorReason::UnknownAttribute {
        checks::INVALID_PATH
    } else {
        checks::UNKNOWN_ATTRIBUTE
    }
}

fn normalized_json_pointer(pointer: &str) -> String {
    if pointer.is_empty() {
        "/".to_string()
    } else {
        pointer.to_string()
    }
}
