//! Declarative per-record-type configuration and registration-time checks.

pub mod checks;
pub mod custom;
pub mod errors;
pub mod model;
pub mod schema;
pub mod validate;

pub use checks::{CheckId, NAMESPACE};
pub use custom::CustomArtifact;
pub use errors::{ConfigError, IssueSeverity, Result, ValidationIssue, ValidationReport};
pub use model::{
    ALL_ATTRIBUTES, AdminOptions, AttributeOverride, AttributeSelection, CONFIG_VERSION,
    ConfigDocument, ModelConfig, ModelConfigBuilder,
};
pub use schema::config_json_schema;
pub use validate::{
    Finding, ValidatedConfig, ValidationOptions, check_configs, check_model_config, findings,
    validate_config, validate_config_json, validate_model_config,
};
