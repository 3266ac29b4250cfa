use serde::Deserialize;

/// ORM model dump as produced by an application's schema export command.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSnapshot {
    #[serde(default)]
    pub app: Option<String>,
    pub models: Vec<RawModel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawModel {
    pub name: String,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub proxy: bool,
    /// `false` for unmanaged models backed by database views.
    #[serde(default)]
    pub managed: Option<bool>,
    #[serde(default)]
    pub verbose_name: Option<String>,
    #[serde(default)]
    pub natural_key: Vec<String>,
    pub fields: Vec<RawField>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawField {
    pub name: String,
    /// ORM field class name, e.g. `CharField` or `ForeignKey`.
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub editable: Option<bool>,
    #[serde(default)]
    pub auto_now: bool,
    #[serde(default)]
    pub auto_now_add: bool,
    #[serde(default)]
    pub null: bool,
    #[serde(default)]
    pub parent_link: bool,
    /// `[value, label]` pairs.
    #[serde(default)]
    pub choices: Vec<(String, String)>,
    #[serde(default)]
    pub related_model: Option<String>,
    #[serde(default)]
    pub max_length: Option<u32>,
    #[serde(default)]
    pub verbose_name: Option<String>,
    #[serde(default)]
    pub help_text: Option<String>,
}
