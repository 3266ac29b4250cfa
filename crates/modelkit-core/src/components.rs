//! Vocabulary shared with the downstream component library.
//!
//! These enums name what a renderer or query layer should build; the core
//! never renders or executes them itself.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input widget for an edit form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    TextInput,
    Textarea,
    NumberInput,
    Checkbox,
    DatePicker,
    DateTimePicker,
    /// Exclusive choice rendered as radio buttons (small choice sets).
    RadioSelect,
    /// Dropdown for larger choice sets.
    Select,
    /// Searchable single choice over related records.
    SearchableSelect,
    MultiSelect,
    FileUpload,
    /// File upload with image preview.
    ImageUpload,
    /// Raw editor for opaque structured data.
    StructuredEditor,
}

/// Filter shape for a query/filter definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Case-insensitive substring match.
    Substring,
    Exact,
    /// Numeric min/max.
    Range,
    /// Date from/to.
    DateRange,
    Boolean,
    /// Exact match against a choice set or related record.
    Choice,
    /// Any-of match against several choices or related records.
    MultipleChoice,
}

impl FilterKind {
    /// Lookup operators a query layer applies for this filter.
    pub fn lookups(self) -> Vec<LookupOperator> {
        match self {
            FilterKind::Substring => vec![LookupOperator::IContains],
            FilterKind::Exact | FilterKind::Boolean | FilterKind::Choice => {
                vec![LookupOperator::Exact]
            }
            FilterKind::Range | FilterKind::DateRange => {
                vec![LookupOperator::Gte, LookupOperator::Lte]
            }
            FilterKind::MultipleChoice => vec![LookupOperator::In],
        }
    }
}

/// Query lookup operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LookupOperator {
    Exact,
    IContains,
    Gte,
    Lte,
    In,
}

/// Column renderer for a tabular listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Text,
    Number,
    BooleanIcon,
    Date,
    DateTime,
    /// String representation of a related record, linked to it.
    Link,
    FileLink,
    Thumbnail,
}

impl ColumnKind {
    pub fn alignment(self) -> Alignment {
        match self {
            ColumnKind::Number => Alignment::Right,
            ColumnKind::BooleanIcon | ColumnKind::Thumbnail => Alignment::Center,
            _ => Alignment::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
    Right,
}
