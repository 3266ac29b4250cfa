use modelkit_core::RecordFamily;

/// Default pattern for multi-table-inheritance pointer attributes.
pub const DEFAULT_POINTER_PATTERN: &str = r"^.+_ptr(_id)?$";

/// Options that control how record types are inspected.
#[derive(Debug, Clone)]
pub struct InspectOptions {
    /// Attribute names that are always technical-internal, in addition to the
    /// primary key and attributes flagged `technical`.
    pub technical_attributes: Vec<String>,
    /// Regex matching inheritance pointer attributes (`*_ptr`, `*_ptr_id`).
    pub pointer_pattern: String,
    /// Record families loaded by adapters; others are skipped.
    pub families: Vec<RecordFamily>,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            technical_attributes: vec![
                "polymorphic_ctype".to_string(),
                "polymorphic_ctype_id".to_string(),
            ],
            pointer_pattern: DEFAULT_POINTER_PATTERN.to_string(),
            families: vec![
                RecordFamily::Model,
                RecordFamily::Proxy,
                RecordFamily::Abstract,
                RecordFamily::View,
            ],
        }
    }
}
