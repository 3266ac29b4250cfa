use std::fs::{OpenOptions, create_dir_all};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use modelkit_config::{ValidationIssue, ValidationReport};
use modelkit_core::{ArtifactKind, SchemaCatalog, build_relationship_graph_report};
use modelkit_generate::Artifact;
use modelkit_introspect::SchemaInspector;

use crate::CliError;

/// JSON form of a check report.
#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub checked_at: String,
    pub status: &'static str,
    pub errors: Vec<IssueOutput>,
    pub warnings: Vec<IssueOutput>,
}

#[derive(Debug, Serialize)]
pub struct IssueOutput {
    pub code: String,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl From<&ValidationIssue> for IssueOutput {
    fn from(issue: &ValidationIssue) -> Self {
        Self {
            code: issue.code.clone(),
            path: issue.path.clone(),
            message: issue.message.clone(),
            hint: issue.hint.clone(),
        }
    }
}

impl CheckOutput {
    pub fn new(report: &ValidationReport, checked_at: DateTime<Utc>) -> Self {
        Self {
            checked_at: checked_at.to_rfc3339(),
            status: if report.is_ok() { "ok" } else { "failed" },
            errors: report.errors.iter().map(IssueOutput::from).collect(),
            warnings: report.warnings.iter().map(IssueOutput::from).collect(),
        }
    }
}

/// JSON envelope around one generated artifact.
#[derive(Debug, Serialize)]
pub struct GenerateOutput<'a> {
    pub record_type: &'a str,
    pub artifact: ArtifactKind,
    pub generated_at: String,
    pub spec: &'a Artifact,
}

/// Markdown overview of record types, their attributes, and import order.
pub fn render_inspection(
    catalog: &SchemaCatalog,
    inspector: &SchemaInspector<'_>,
    only: Option<&str>,
) -> Result<String, CliError> {
    let records = match only {
        Some(name) => vec![inspector.record_type(name)?],
        None => catalog.record_types.iter().collect(),
    };

    let mut lines = Vec::new();
    for record in &records {
        lines.push(format!("## {} ({})", record.name, record.family));
        if let Some(label) = &record.label {
            lines.push(format!("- label: {label}"));
        }
        if !record.natural_key.is_empty() {
            lines.push(format!("- natural_key: {}", record.natural_key.join(", ")));
        }
        lines.push(String::new());
        lines.push("| attribute | kind | related_to | flags |".to_string());
        lines.push("| --- | --- | --- | --- |".to_string());
        for attribute in &record.attributes {
            let mut flags = Vec::new();
            if inspector.is_technical(record, attribute) {
                flags.push("technical");
            }
            if !attribute.editable {
                flags.push("read_only");
            }
            if attribute.auto_managed {
                flags.push("auto");
            }
            if attribute.nullable {
                flags.push("nullable");
            }
            if attribute.has_choices() {
                flags.push("choices");
            }
            lines.push(format!(
                "| {} | {} | {} | {} |",
                attribute.name,
                attribute.kind,
                attribute.related_to.as_deref().unwrap_or("-"),
                if flags.is_empty() {
                    "-".to_string()
                } else {
                    flags.join(", ")
                }
            ));
        }
        lines.push(String::new());
        lines.push(format!(
            "- default-safe: {}",
            inspector.get_default_safe_attributes(record).join(", ")
        ));
        lines.push(String::new());
    }

    let graph = build_relationship_graph_report(catalog.record_types.iter());
    lines.push("## Import order".to_string());
    match graph.topo_order {
        Some(order) => {
            for (idx, name) in order
                .iter()
                .filter(|name| catalog.record_type(name).is_some())
                .enumerate()
            {
                lines.push(format!("{}. {name}", idx + 1));
            }
        }
        None => lines.push(format!(
            "- cycle: {}",
            graph.cycle.unwrap_or_default().join(", ")
        )),
    }

    Ok(lines.join("\n"))
}

/// Pretty JSON to `path`, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(file, value).map_err(CliError::from)
}

/// Pretty JSON to `out` when given, else stdout.
pub fn emit_json<T: Serialize>(out: Option<&Path>, value: &T) -> Result<(), CliError> {
    match out {
        Some(path) => write_json(path, value),
        None => {
            println!("{}", serde_json::to_string_pretty(value)?);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelkit_core::{Attribute, AttributeKind, RecordType};
    use modelkit_introspect::InspectOptions;

    fn catalog() -> SchemaCatalog {
        SchemaCatalog::new(vec![
            RecordType::new(
                "Sample",
                vec![
                    Attribute::new("id", AttributeKind::Integer).read_only(),
                    Attribute::new("name", AttributeKind::Text),
                    Attribute::relationship("project", AttributeKind::RelationshipSingle, "Project"),
                ],
            ),
            RecordType::new(
                "Project",
                vec![
                    Attribute::new("id", AttributeKind::Integer).read_only(),
                    Attribute::new("title", AttributeKind::Text),
                ],
            ),
        ])
    }

    #[test]
    fn inspection_lists_attributes_and_import_order() {
        let catalog = catalog();
        let options = InspectOptions::default();
        let inspector = SchemaInspector::new(&catalog, &options).expect("inspector");

        let rendered = render_inspection(&catalog, &inspector, None).expect("render");
        assert!(rendered.contains("## Sample (model)"));
        assert!(rendered.contains("| id | integer | - | technical, read_only |"));
        assert!(rendered.contains("| project | relationship_single | Project | - |"));
        assert!(rendered.contains("- default-safe: name, project"));
        assert!(rendered.contains("1. Project\n2. Sample"));
    }

    #[test]
    fn inspection_of_unknown_record_type_fails() {
        let catalog = catalog();
        let options = InspectOptions::default();
        let inspector = SchemaInspector::new(&catalog, &options).expect("inspector");

        assert!(render_inspection(&catalog, &inspector, Some("Smaple")).is_err());
    }

    #[test]
    fn check_output_reports_status() {
        let output = CheckOutput::new(&ValidationReport::default(), Utc::now());
        assert_eq!(output.status, "ok");
        assert!(output.errors.is_empty());
    }
}
