use std::path::{Path, PathBuf};

use modelkit_core::SchemaCatalog;

pub fn golden(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden")
        .join(name)
}

pub fn lab_catalog() -> SchemaCatalog {
    let contents = std::fs::read_to_string(golden("lab.schema.json")).expect("read lab catalog");
    serde_json::from_str(&contents).expect("parse lab catalog")
}
