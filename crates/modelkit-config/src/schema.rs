use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::model::ConfigDocument;

/// Emit the JSON Schema for config documents.
pub fn config_json_schema() -> RootSchema {
    schema_for!(ConfigDocument)
}
