use modelkit_core::{Attribute, AttributeKind, RecordType, SchemaCatalog};

#[test]
fn serializes_catalog_deterministically() {
    let catalog = SchemaCatalog::new(vec![RecordType::new(
        "Project",
        vec![
            Attribute::new("id", AttributeKind::Integer).read_only(),
            Attribute::new("title", AttributeKind::Text),
        ],
    )]);

    let json = serde_json::to_string_pretty(&catalog).expect("serialize catalog");
    let expected = r#"{
  "schema_version": "0.1",
  "record_types": [
    {
      "name": "Project",
      "family": "model",
      "primary_key": "id",
      "attributes": [
        {
          "name": "id",
          "kind": "integer",
          "editable": false,
          "auto_managed": false,
          "technical": false,
          "nullable": false
        },
        {
          "name": "title",
          "kind": "text",
          "editable": true,
          "auto_managed": false,
          "technical": false,
          "nullable": false
        }
      ]
    }
  ]
}"#;
    assert_eq!(json, expected);
}

#[test]
fn deserializes_with_defaults() {
    let json = serde_json::json!({
        "schema_version": "0.1",
        "record_types": [{
            "name": "Sample",
            "attributes": [
                {"name": "id", "kind": "integer"},
                {"name": "project", "kind": "relationship_single", "related_to": "Project"}
            ]
        }]
    });

    let catalog: SchemaCatalog = serde_json::from_value(json).expect("parse catalog");
    let sample = catalog.record_type("Sample").expect("sample exists");
    assert_eq!(sample.primary_key, "id");
    assert_eq!(sample.family, modelkit_core::RecordFamily::Model);
    let project = sample.attribute("project").expect("project attribute");
    assert!(project.editable);
    assert_eq!(project.related_to.as_deref(), Some("Project"));
}
