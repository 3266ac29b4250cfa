use std::collections::BTreeMap;
use std::sync::Arc;

use schemars::JsonSchema;
use schemars::r#gen::SchemaGenerator;
use schemars::schema::Schema;
use serde::{Deserialize, Serialize};

use modelkit_core::{ArtifactKind, ColumnKind, FilterKind, WidgetKind};

use crate::custom::CustomArtifact;

/// Current contract version of config documents.
pub const CONFIG_VERSION: &str = "0.1";

/// Sentinel selecting every non-technical attribute.
pub const ALL_ATTRIBUTES: &str = "__all__";

/// Attribute list for one artifact: explicit names or every attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSelection", into = "RawSelection")]
pub enum AttributeSelection {
    All,
    Named(Vec<String>),
}

impl AttributeSelection {
    pub fn named<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AttributeSelection::Named(names.into_iter().map(Into::into).collect())
    }

    /// Explicit names; empty for [`AttributeSelection::All`].
    pub fn names(&self) -> &[String] {
        match self {
            AttributeSelection::All => &[],
            AttributeSelection::Named(names) => names,
        }
    }
}

/// Wire shape of [`AttributeSelection`]: `"__all__"` or a list of names.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
enum RawSelection {
    /// Must be `"__all__"`.
    Sentinel(String),
    Names(Vec<String>),
}

impl TryFrom<RawSelection> for AttributeSelection {
    type Error = String;

    fn try_from(raw: RawSelection) -> Result<Self, Self::Error> {
        match raw {
            RawSelection::Sentinel(value) if value == ALL_ATTRIBUTES => Ok(AttributeSelection::All),
            RawSelection::Sentinel(value) => Err(format!(
                "expected \"{ALL_ATTRIBUTES}\" or a list of attribute names, got '{value}'"
            )),
            RawSelection::Names(names) => Ok(AttributeSelection::Named(names)),
        }
    }
}

impl From<AttributeSelection> for RawSelection {
    fn from(selection: AttributeSelection) -> Self {
        match selection {
            AttributeSelection::All => RawSelection::Sentinel(ALL_ATTRIBUTES.to_string()),
            AttributeSelection::Named(names) => RawSelection::Names(names),
        }
    }
}

impl JsonSchema for AttributeSelection {
    fn schema_name() -> String {
        "AttributeSelection".to_string()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        RawSelection::json_schema(generator)
    }
}

/// Per-attribute presentation hooks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AttributeOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<WidgetKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<ColumnKind>,
    /// Filter text with exact matching instead of substring matching.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub exact_match: bool,
}

/// Options for the administrative definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AdminOptions {
    /// Attribute names, `-` prefix for descending.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ordering: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_per_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_fields: Vec<String>,
}

impl AdminOptions {
    pub fn is_empty(&self) -> bool {
        self == &AdminOptions::default()
    }
}

/// Declarative settings for one record type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Name of the configured record type.
    pub record_type: String,
    /// Attribute list used by every artifact without its own list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shared_attributes: Vec<String>,
    /// Names removed after resolution (exact match).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
    /// Per-artifact attribute lists.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub artifacts: BTreeMap<ArtifactKind, AttributeSelection>,
    /// Per-attribute presentation hooks keyed by attribute name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<String, AttributeOverride>,
    #[serde(default, skip_serializing_if = "AdminOptions::is_empty")]
    pub admin: AdminOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip)]
    custom_artifacts: BTreeMap<ArtifactKind, Arc<dyn CustomArtifact>>,
}

impl ModelConfig {
    pub fn new(record_type: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            ..Self::default()
        }
    }

    pub fn builder(record_type: impl Into<String>) -> ModelConfigBuilder {
        ModelConfigBuilder {
            config: Self::new(record_type),
        }
    }

    pub fn artifact_attributes(&self, kind: ArtifactKind) -> Option<&AttributeSelection> {
        self.artifacts.get(&kind)
    }

    pub fn custom_artifact(&self, kind: ArtifactKind) -> Option<&Arc<dyn CustomArtifact>> {
        self.custom_artifacts.get(&kind)
    }

    pub fn custom_artifacts(&self) -> impl Iterator<Item = (ArtifactKind, &Arc<dyn CustomArtifact>)> {
        self.custom_artifacts
            .iter()
            .map(|(kind, artifact)| (*kind, artifact))
    }

    /// Attach a custom artifact after loading the config from a document.
    pub fn set_custom_artifact(&mut self, kind: ArtifactKind, artifact: Arc<dyn CustomArtifact>) {
        self.custom_artifacts.insert(kind, artifact);
    }

    pub fn attribute_override(&self, name: &str) -> Option<&AttributeOverride> {
        self.overrides.get(name)
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|excluded| excluded == name)
    }

    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.record_type)
    }
}

/// Fluent construction of a [`ModelConfig`].
#[derive(Debug, Clone)]
pub struct ModelConfigBuilder {
    config: ModelConfig,
}

impl ModelConfigBuilder {
    pub fn shared_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.shared_attributes = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn artifact_attributes<I, S>(mut self, kind: ArtifactKind, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .artifacts
            .insert(kind, AttributeSelection::named(names));
        self
    }

    /// Use every non-technical attribute for `kind`.
    pub fn all_attributes(mut self, kind: ArtifactKind) -> Self {
        self.config.artifacts.insert(kind, AttributeSelection::All);
        self
    }

    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.exclude = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn override_attribute(mut self, name: impl Into<String>, hook: AttributeOverride) -> Self {
        self.config.overrides.insert(name.into(), hook);
        self
    }

    pub fn exact_match(mut self, name: impl Into<String>) -> Self {
        self.config.overrides.entry(name.into()).or_default().exact_match = true;
        self
    }

    pub fn custom_artifact(mut self, kind: ArtifactKind, artifact: Arc<dyn CustomArtifact>) -> Self {
        self.config.set_custom_artifact(kind, artifact);
        self
    }

    pub fn admin(mut self, admin: AdminOptions) -> Self {
        self.config.admin = admin;
        self
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.config.display_name = Some(display_name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.config.description = Some(description.into());
        self
    }

    pub fn build(self) -> ModelConfig {
        self.config
    }
}

/// A file holding the configs of several record types.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ConfigDocument {
    /// Contract version for the config format.
    #[serde(default = "default_config_version")]
    pub config_version: String,
    #[serde(default)]
    pub models: Vec<ModelConfig>,
}

fn default_config_version() -> String {
    CONFIG_VERSION.to_string()
}

impl ConfigDocument {
    pub fn new(models: Vec<ModelConfig>) -> Self {
        Self {
            config_version: default_config_version(),
            models,
        }
    }

    pub fn from_toml_str(contents: &str) -> crate::errors::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_json_str(contents: &str) -> crate::errors::Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Convert a TOML document into the JSON value checked by the config schema.
    pub fn toml_to_json(contents: &str) -> crate::errors::Result<serde_json::Value> {
        let value: toml::Value = toml::from_str(contents)?;
        Ok(serde_json::to_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_accepts_sentinel_and_lists() {
        let all: AttributeSelection = serde_json::from_str("\"__all__\"").expect("sentinel");
        assert_eq!(all, AttributeSelection::All);

        let named: AttributeSelection = serde_json::from_str("[\"name\"]").expect("list");
        assert_eq!(named.names(), ["name".to_string()]);

        let err = serde_json::from_str::<AttributeSelection>("\"name\"").expect_err("bad sentinel");
        assert!(err.to_string().contains("__all__"));
    }

    #[test]
    fn selection_serializes_back_to_wire_shape() {
        let value = serde_json::to_value(AttributeSelection::All).expect("serialize");
        assert_eq!(value, serde_json::json!("__all__"));
    }

    #[test]
    fn builder_marks_exact_match_without_clobbering_other_hooks() {
        let config = ModelConfig::builder("Sample")
            .override_attribute(
                "name",
                AttributeOverride {
                    label: Some("Sample name".to_string()),
                    ..AttributeOverride::default()
                },
            )
            .exact_match("name")
            .build();

        let hook = config.attribute_override("name").expect("override");
        assert!(hook.exact_match);
        assert_eq!(hook.label.as_deref(), Some("Sample name"));
    }
}
