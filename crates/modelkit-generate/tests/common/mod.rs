#![allow(dead_code)]

use std::any::Any;
use std::path::PathBuf;
use std::sync::Arc;

use modelkit_config::{ConfigDocument, CustomArtifact, ModelConfig};
use modelkit_core::{Capability, SchemaCatalog, SchemaSource};

fn golden(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../modelkit-config/tests/golden")
        .join(name)
}

pub fn lab_source() -> Arc<dyn SchemaSource> {
    let contents =
        std::fs::read_to_string(golden("lab.schema.json")).expect("read lab catalog");
    let catalog: SchemaCatalog = serde_json::from_str(&contents).expect("parse lab catalog");
    Arc::new(catalog)
}

pub fn lab_configs() -> Vec<ModelConfig> {
    let contents =
        std::fs::read_to_string(golden("lab.modelkit.toml")).expect("read lab config");
    ConfigDocument::from_toml_str(&contents)
        .expect("parse lab config")
        .models
}

/// The `Sample` entry of the lab config.
pub fn sample_config() -> ModelConfig {
    lab_configs()
        .into_iter()
        .find(|config| config.record_type == "Sample")
        .expect("sample config")
}

#[derive(Debug)]
pub struct HandWritten {
    pub name: &'static str,
    pub capabilities: Vec<Capability>,
}

impl CustomArtifact for HandWritten {
    fn name(&self) -> &str {
        self.name
    }

    fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
