use modelkit_core::{Attribute, AttributeKind, Error, RecordType, SchemaCatalog, validate_catalog};

fn id() -> Attribute {
    Attribute::new("id", AttributeKind::Integer).read_only()
}

#[test]
fn accepts_consistent_catalog() {
    let catalog = SchemaCatalog::new(vec![
        RecordType::new(
            "Sample",
            vec![
                id(),
                Attribute::relationship("project", AttributeKind::RelationshipSingle, "Project"),
            ],
        ),
        RecordType::new("Project", vec![id(), Attribute::new("code", AttributeKind::Text)])
            .with_natural_key(["code"]),
    ]);

    validate_catalog(&catalog).expect("catalog is valid");
}

#[test]
fn rejects_duplicate_attribute() {
    let catalog = SchemaCatalog::new(vec![RecordType::new(
        "Sample",
        vec![id(), Attribute::new("id", AttributeKind::Text)],
    )]);

    let err = validate_catalog(&catalog).expect_err("duplicate attribute");
    assert!(matches!(err, Error::InvalidSchema(message) if message.contains("Sample.id")));
}

#[test]
fn rejects_unknown_relationship_target() {
    let catalog = SchemaCatalog::new(vec![RecordType::new(
        "Sample",
        vec![
            id(),
            Attribute::relationship("project", AttributeKind::RelationshipSingle, "Project"),
        ],
    )]);

    let err = validate_catalog(&catalog).expect_err("unknown target");
    assert!(matches!(err, Error::InvalidSchema(message) if message.contains("-> Project")));
}

#[test]
fn rejects_missing_natural_key_attribute() {
    let catalog = SchemaCatalog::new(vec![
        RecordType::new("Project", vec![id()]).with_natural_key(["code"]),
    ]);

    assert!(validate_catalog(&catalog).is_err());
}
