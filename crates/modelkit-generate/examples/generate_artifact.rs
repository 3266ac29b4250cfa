use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use modelkit_config::ModelConfig;
use modelkit_core::ArtifactKind;
use modelkit_generate::Registry;
use modelkit_introspect::load_catalog;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut schema_path: Option<PathBuf> = None;
    let mut record_type: Option<String> = None;
    let mut artifact = ArtifactKind::Form;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--schema" => schema_path = args.next().map(PathBuf::from),
            "--artifact" => {
                let value = args.next().ok_or("missing --artifact value")?;
                artifact = value.parse()?;
            }
            _ => {
                if record_type.is_none() {
                    record_type = Some(arg);
                } else {
                    return Err("unexpected argument".into());
                }
            }
        }
    }

    let schema_path = schema_path.ok_or("missing --schema path")?;
    let record_type = record_type.ok_or("missing record type")?;

    let mut registry = Registry::new(Arc::new(load_catalog(&schema_path)?));
    registry.register(ModelConfig::new(record_type.clone()))?;

    let components = registry.get(&record_type).ok_or("record type not registered")?;
    let generated = components.artifact(artifact)?;
    println!("{}", serde_json::to_string_pretty(&*generated)?);
    Ok(())
}
