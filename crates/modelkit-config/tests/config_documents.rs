mod common;

use modelkit_config::{
    AttributeSelection, ConfigDocument, ValidationOptions, config_json_schema, validate_config,
    validate_config_json,
};
use modelkit_core::ArtifactKind;
use serde_json::json;

use common::{golden, lab_catalog};

fn lab_toml() -> String {
    std::fs::read_to_string(golden("lab.modelkit.toml")).expect("read lab config")
}

#[test]
fn toml_document_loads() {
    let document = ConfigDocument::from_toml_str(&lab_toml()).expect("parse toml");
    assert_eq!(document.config_version, "0.1");
    assert_eq!(document.models.len(), 2);

    let sample = &document.models[0];
    assert_eq!(sample.record_type, "Sample");
    assert_eq!(sample.display_name(), "Lab sample");
    assert_eq!(
        sample.artifact_attributes(ArtifactKind::Serializer),
        Some(&AttributeSelection::All)
    );
    assert_eq!(
        sample
            .artifact_attributes(ArtifactKind::Table)
            .map(AttributeSelection::names),
        Some(
            &[
                "name".to_string(),
                "collected_on".to_string(),
                "project.title".to_string(),
                "status".to_string()
            ][..]
        )
    );
    assert!(sample.is_excluded("photo"));
    assert_eq!(sample.admin.list_per_page, Some(50));
    assert!(
        sample
            .attribute_override("name")
            .is_some_and(|hook| hook.exact_match)
    );

    let project = &document.models[1];
    assert_eq!(project.display_name(), "Project");
    assert_eq!(project.description.as_deref(), Some("Research projects"));
}

#[test]
fn toml_and_json_documents_agree() {
    let value = ConfigDocument::toml_to_json(&lab_toml()).expect("toml to json");
    let from_json =
        ConfigDocument::from_json_str(&value.to_string()).expect("parse converted json");
    let from_toml = ConfigDocument::from_toml_str(&lab_toml()).expect("parse toml");

    assert_eq!(
        serde_json::to_value(&from_json).expect("serialize"),
        serde_json::to_value(&from_toml).expect("serialize")
    );
}

#[test]
fn lab_document_passes_schema_and_checks() {
    let value = ConfigDocument::toml_to_json(&lab_toml()).expect("toml to json");
    let structural = validate_config_json(&value).expect("compile config schema");
    assert!(structural.is_ok(), "{:?}", structural.errors);

    let catalog = lab_catalog();
    let validated = validate_config(&value, &catalog, &ValidationOptions::default())
        .expect("lab config should validate");
    assert!(validated.warnings.is_empty(), "{:?}", validated.warnings);
}

#[test]
fn unknown_keys_are_schema_violations() {
    let value = json!({
        "models": [{"record_type": "Sample", "shared_atributes": ["name"]}]
    });

    let report = validate_config_json(&value).expect("compile config schema");
    assert!(!report.is_ok());
    assert!(report.errors.iter().all(|issue| issue.code == "schema_violation"));
    assert_eq!(report.errors[0].path, "/models/0");
}

#[test]
fn bad_sentinel_fails_decoding() {
    let value = json!({
        "models": [{"record_type": "Sample", "artifacts": {"table": "everything"}}]
    });

    let report = validate_config(&value, &lab_catalog(), &ValidationOptions::default())
        .expect_err("sentinel must be __all__");
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].code, "invalid_config_json");
    assert!(report.errors[0].message.contains("__all__"));
}

#[test]
fn config_schema_lists_models() {
    let schema = serde_json::to_value(config_json_schema()).expect("serialize schema");
    assert_eq!(schema["title"], "ConfigDocument");
    assert!(schema["properties"]["models"].is_object());
    assert!(schema["definitions"]["ModelConfig"].is_object());
}
