use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::info;

use modelkit_config::{ConfigDocument, ModelConfig, ValidationReport, config_json_schema, validate_config};
use modelkit_core::{SchemaCatalog, SchemaSource};
use modelkit_generate::{Registry, RegistryOptions, render_check_report};
use modelkit_introspect::{Adapter, InspectOptions, SchemaInspector, SnapshotAdapter, load_catalog};

use crate::output::{CheckOutput, GenerateOutput, emit_json, render_inspection};
use crate::{
    CheckArgs, CliError, ConfigSchemaArgs, GenerateArgs, InspectArgs, RegistryArgs, SourceArgs,
};

pub fn run_inspect(args: InspectArgs) -> Result<(), CliError> {
    let options = inspect_options(&args.source);
    let catalog = load_source(&args.source, &options)?;

    if args.json {
        return emit_json(None, &catalog);
    }

    let inspector = SchemaInspector::new(&catalog, &options)?;
    println!(
        "{}",
        render_inspection(&catalog, &inspector, args.record_type.as_deref())?
    );
    Ok(())
}

pub fn run_check(args: CheckArgs) -> Result<(), CliError> {
    let timer = Instant::now();
    let options = registry_options(&args.source, &args.registry);
    let source: Arc<dyn SchemaSource> = Arc::new(load_source(&args.source, &options.inspect)?);
    let config_json = read_config(&args.config)?;

    info!(event = "check_started", config = %args.config.display());

    let report = match validate_config(&config_json, source.as_ref(), &options.validation()) {
        Err(report) => report,
        Ok(validated) => {
            let mut registry = Registry::with_options(Arc::clone(&source), options)?;
            match registry.register_all(validated.document.models) {
                Err(report) => report,
                Ok(()) => registry.check(),
            }
        }
    };

    info!(
        event = "check_finished",
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        duration_ms = timer.elapsed().as_millis()
    );

    if args.json {
        emit_json(None, &CheckOutput::new(&report, chrono::Utc::now()))?;
    } else {
        println!("{}", render_check_report(&report));
    }

    if report.is_ok() {
        Ok(())
    } else {
        Err(CliError::CheckFailed(report.errors.len()))
    }
}

pub fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let options = registry_options(&args.source, &args.registry);
    let source: Arc<dyn SchemaSource> = Arc::new(load_source(&args.source, &options.inspect)?);

    let mut models = match &args.config {
        Some(path) => {
            let config_json = read_config(path)?;
            validate_config(&config_json, source.as_ref(), &options.validation())
                .map_err(report_error)?
                .document
                .models
        }
        None => Vec::new(),
    };
    if !models
        .iter()
        .any(|config| config.record_type == args.record_type)
    {
        info!(event = "using_defaults", record_type = %args.record_type);
        models.push(ModelConfig::new(args.record_type.clone()));
    }

    let mut registry = Registry::with_options(source, options)?;
    registry.register_all(models).map_err(report_error)?;

    let components = registry.get(&args.record_type).ok_or_else(|| {
        CliError::InvalidConfig(format!("record type '{}' is not registered", args.record_type))
    })?;
    let artifact = components.artifact(args.artifact)?;

    let output = GenerateOutput {
        record_type: &args.record_type,
        artifact: args.artifact,
        generated_at: chrono::Utc::now().to_rfc3339(),
        spec: &artifact,
    };
    emit_json(args.out.as_deref(), &output)?;
    info!(event = "artifact_written", record_type = %args.record_type, artifact = %args.artifact);
    Ok(())
}

pub fn run_config_schema(args: ConfigSchemaArgs) -> Result<(), CliError> {
    emit_json(args.out.as_deref(), &config_json_schema())
}

fn inspect_options(args: &SourceArgs) -> InspectOptions {
    let mut options = InspectOptions::default();
    options.technical_attributes.extend(args.technical.iter().cloned());
    options
}

fn registry_options(source: &SourceArgs, args: &RegistryArgs) -> RegistryOptions {
    let mut options = RegistryOptions {
        inspect: inspect_options(source),
        table_cap: args.table_cap,
        ..RegistryOptions::default()
    };
    if !args.allow_family.is_empty() {
        options.allowed_families = args.allow_family.clone();
    }
    options
}

fn load_source(args: &SourceArgs, options: &InspectOptions) -> Result<SchemaCatalog, CliError> {
    let catalog = if args.snapshot {
        let adapter = SnapshotAdapter::from_path(&args.schema);
        info!(event = "introspection_started", engine = adapter.engine());
        adapter.introspect(options)?
    } else {
        load_catalog(&args.schema)?
    };
    info!(
        event = "catalog_loaded",
        path = %args.schema.display(),
        record_types = catalog.record_types.len()
    );
    Ok(catalog)
}

/// Config document as JSON, converting TOML by extension.
fn read_config(path: &Path) -> Result<Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(serde_json::from_str(&contents)?)
    } else {
        Ok(ConfigDocument::toml_to_json(&contents)?)
    }
}

fn report_error(report: ValidationReport) -> CliError {
    eprintln!("{}", render_check_report(&report));
    CliError::CheckFailed(report.errors.len())
}
