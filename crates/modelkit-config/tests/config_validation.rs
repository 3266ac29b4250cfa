mod common;

use std::any::Any;
use std::sync::Arc;

use modelkit_config::{
    AdminOptions, CustomArtifact, ModelConfig, ValidationOptions, check_configs,
    validate_model_config,
};
use modelkit_core::{ArtifactKind, Capability, Error, RecordFamily};

use common::lab_catalog;

#[derive(Debug)]
struct SampleForm {
    capabilities: Vec<Capability>,
}

impl CustomArtifact for SampleForm {
    fn name(&self) -> &str {
        "SampleForm"
    }

    fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn typo_suggests_published_at() {
    let catalog = lab_catalog();
    let config = ModelConfig::builder("Sample")
        .shared_attributes(["name", "publihsed_at"])
        .build();

    let err = validate_model_config(&catalog, &config, &ValidationOptions::default())
        .expect_err("typo must fail");
    assert!(matches!(err, Error::FieldValidation(_)));
    assert!(err.to_string().contains("published_at"));

    let report = check_configs(&catalog, &[config], &ValidationOptions::default());
    assert_eq!(report.errors.len(), 1);
    let issue = &report.errors[0];
    assert_eq!(issue.code, "modelkit.E004");
    assert_eq!(issue.path, "/models/0/shared_attributes/1");
    assert_eq!(issue.hint.as_deref(), Some("did you mean 'published_at'?"));
}

#[test]
fn relationship_path_reports_failing_segment() {
    let catalog = lab_catalog();
    let config = ModelConfig::builder("Sample")
        .artifact_attributes(ArtifactKind::Table, ["name", "project.ownr.name"])
        .build();

    let report = check_configs(&catalog, &[config], &ValidationOptions::default());
    assert_eq!(report.errors.len(), 1);
    let issue = &report.errors[0];
    assert_eq!(issue.code, "modelkit.E005");
    assert_eq!(issue.path, "/models/0/artifacts/table/1");
    assert!(issue.message.contains("segment 'ownr'"));
    assert!(issue.message.contains("resolved so far: 'project'"));
    assert_eq!(issue.hint.as_deref(), Some("did you mean 'owner'?"));
}

#[test]
fn unknown_record_type_and_family_are_errors() {
    let catalog = lab_catalog();
    let configs = vec![ModelConfig::new("Smaple"), ModelConfig::new("SampleSummary")];

    let report = check_configs(&catalog, &configs, &ValidationOptions::default());
    let codes: Vec<&str> = report.errors.iter().map(|issue| issue.code.as_str()).collect();
    assert_eq!(codes, vec!["modelkit.E001", "modelkit.E002"]);
    assert_eq!(
        report.errors[0].hint.as_deref(),
        Some("did you mean 'Sample'?")
    );

    let views = ValidationOptions {
        allowed_families: vec![RecordFamily::Model, RecordFamily::View],
    };
    let report = check_configs(&catalog, &[ModelConfig::new("SampleSummary")], &views);
    assert!(report.is_ok());
}

#[test]
fn every_issue_is_reported_in_one_pass() {
    let catalog = lab_catalog();
    let configs = vec![
        ModelConfig::builder("Sample")
            .shared_attributes(["nam", "colected_on"])
            .build(),
        ModelConfig::builder("Project")
            .shared_attributes(["titel"])
            .build(),
        ModelConfig::new("Sample"),
    ];

    let report = check_configs(&catalog, &configs, &ValidationOptions::default());
    let paths: Vec<&str> = report.errors.iter().map(|issue| issue.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "/models/0/shared_attributes/0",
            "/models/0/shared_attributes/1",
            "/models/1/shared_attributes/0",
            "/models/2/record_type",
        ]
    );
    assert_eq!(report.errors[3].code, "modelkit.E003");
}

#[test]
fn custom_artifact_needs_matching_capability() {
    let catalog = lab_catalog();
    let config = ModelConfig::builder("Sample")
        .custom_artifact(
            ArtifactKind::Form,
            Arc::new(SampleForm {
                capabilities: vec![Capability::Table],
            }),
        )
        .build();

    let err = validate_model_config(&catalog, &config, &ValidationOptions::default())
        .expect_err("capability mismatch");
    assert!(matches!(err, Error::Configuration(_)));
    assert!(err.to_string().contains("model_form"));
}

#[test]
fn custom_artifact_with_attribute_list_warns() {
    let catalog = lab_catalog();
    let config = ModelConfig::builder("Sample")
        .artifact_attributes(ArtifactKind::Form, ["not_an_attribute"])
        .custom_artifact(
            ArtifactKind::Form,
            Arc::new(SampleForm {
                capabilities: vec![Capability::ModelForm],
            }),
        )
        .build();

    let warnings = validate_model_config(&catalog, &config, &ValidationOptions::default())
        .expect("ignored list is not validated");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code, "modelkit.W001");
    assert_eq!(warnings[0].path, "/artifacts/form");
}

#[test]
fn exclusions_and_exact_match_produce_warnings() {
    let catalog = lab_catalog();
    let config = ModelConfig::builder("Sample")
        .exclude(["photo", "colour"])
        .exact_match("collected_on")
        .build();

    let warnings = validate_model_config(&catalog, &config, &ValidationOptions::default())
        .expect("warnings only");
    let codes: Vec<&str> = warnings.iter().map(|issue| issue.code.as_str()).collect();
    assert_eq!(codes, vec!["modelkit.W003", "modelkit.W005"]);
    assert_eq!(warnings[0].path, "/exclude/1");
}

#[test]
fn admin_fields_are_validated() {
    let catalog = lab_catalog();
    let config = ModelConfig::builder("Sample")
        .admin(AdminOptions {
            ordering: vec!["-collectd_on".to_string()],
            list_per_page: None,
            search_fields: vec!["project__title".to_string()],
        })
        .build();

    let report = check_configs(&catalog, &[config], &ValidationOptions::default());
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].path, "/models/0/admin/ordering/0");
    assert_eq!(
        report.errors[0].hint.as_deref(),
        Some("did you mean 'collected_on'?")
    );
}
