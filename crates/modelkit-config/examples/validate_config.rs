use std::env;
use std::path::{Path, PathBuf};

use modelkit_config::{ConfigDocument, ValidationOptions, ValidationReport, validate_config};
use modelkit_core::SchemaCatalog;
use serde_json::Value;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let mut config_path: Option<PathBuf> = None;
    let mut schema_path: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--schema" => {
                schema_path = args.next().map(PathBuf::from);
            }
            _ => {
                if config_path.is_none() {
                    config_path = Some(PathBuf::from(arg));
                } else {
                    return Err("unexpected argument".into());
                }
            }
        }
    }

    let config_path = config_path.ok_or("missing config path")?;
    let schema_path = schema_path.ok_or("missing --schema path")?;

    let config_json = load_config(&config_path)?;
    let catalog: SchemaCatalog = serde_json::from_str(&std::fs::read_to_string(&schema_path)?)?;

    let validated = match validate_config(&config_json, &catalog, &ValidationOptions::default()) {
        Ok(validated) => validated,
        Err(report) => {
            eprintln!("config validation failed");
            print_report(&report);
            std::process::exit(1);
        }
    };

    if !validated.warnings.is_empty() {
        eprintln!("config validated with warnings:");
        print_report(&ValidationReport {
            errors: Vec::new(),
            warnings: validated.warnings,
        });
    } else {
        println!(
            "config validated successfully ({} models)",
            validated.document.models.len()
        );
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    if path.extension().is_some_and(|ext| ext == "toml") {
        Ok(ConfigDocument::toml_to_json(&contents)?)
    } else {
        Ok(serde_json::from_str(&contents)?)
    }
}

fn print_report(report: &ValidationReport) {
    for issue in &report.errors {
        eprintln!("error {} {}: {}", issue.code, issue.path, issue.message);
        if let Some(hint) = &issue.hint {
            eprintln!("  hint: {hint}");
        }
    }
    for issue in &report.warnings {
        eprintln!("warning {} {}: {}", issue.code, issue.path, issue.message);
        if let Some(hint) = &issue.hint {
            eprintln!("  hint: {hint}");
        }
    }
}
