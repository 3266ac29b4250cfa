use std::path::{Path, PathBuf};

use modelkit_core::{Error, Result, SCHEMA_VERSION, SchemaCatalog, validate_catalog};

use crate::adapter::Adapter;
use crate::options::InspectOptions;

mod mapper;
mod raw;

pub use mapper::kind_from_field_type;
pub use raw::{RawField, RawModel, RawSnapshot};

/// Where a snapshot is read from.
#[derive(Debug, Clone)]
enum SnapshotSource {
    Path(PathBuf),
    Json(serde_json::Value),
}

/// Adapter for ORM model dumps (JSON).
#[derive(Debug, Clone)]
pub struct SnapshotAdapter {
    source: SnapshotSource,
}

impl SnapshotAdapter {
    /// Read the snapshot from a file at introspection time.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: SnapshotSource::Path(path.into()),
        }
    }

    /// Use an already-parsed JSON document.
    pub fn from_value(value: serde_json::Value) -> Self {
        Self {
            source: SnapshotSource::Json(value),
        }
    }

    fn load(&self) -> Result<RawSnapshot> {
        let value = match &self.source {
            SnapshotSource::Json(value) => value.clone(),
            SnapshotSource::Path(path) => read_json(path)?,
        };
        serde_json::from_value(value).map_err(|err| Error::Snapshot(err.to_string()))
    }
}

impl Adapter for SnapshotAdapter {
    fn engine(&self) -> &'static str {
        "snapshot"
    }

    fn introspect(&self, opts: &InspectOptions) -> Result<SchemaCatalog> {
        let snapshot = self.load()?;
        let record_types = mapper::map_models(snapshot.models, opts);
        let catalog = SchemaCatalog {
            schema_version: SCHEMA_VERSION.to_string(),
            record_types,
        };
        validate_catalog(&catalog)?;
        Ok(catalog)
    }
}

/// Load a canonical catalog (`schema.json`) and check its consistency.
pub fn load_catalog(path: &Path) -> Result<SchemaCatalog> {
    let value = read_json(path)?;
    let catalog: SchemaCatalog =
        serde_json::from_value(value).map_err(|err| Error::Snapshot(err.to_string()))?;
    if catalog.schema_version != SCHEMA_VERSION {
        return Err(Error::Snapshot(format!(
            "unsupported schema_version '{}' (expected '{}')",
            catalog.schema_version, SCHEMA_VERSION
        )));
    }
    validate_catalog(&catalog)?;
    Ok(catalog)
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    let contents = std::fs::read_to_string(path)
        .map_err(|err| Error::Snapshot(format!("reading {}: {err}", path.display())))?;
    serde_json::from_str(&contents)
        .map_err(|err| Error::Snapshot(format!("parsing {}: {err}", path.display())))
}
