use modelkit_core::{
    Attribute, AttributeKind, FieldErrorReason, RelationshipPath, RecordType, SchemaCatalog,
    SchemaSource, resolve_path,
};

fn catalog() -> SchemaCatalog {
    SchemaCatalog::new(vec![
        RecordType::new(
            "Sample",
            vec![
                Attribute::new("id", AttributeKind::Integer).read_only(),
                Attribute::new("name", AttributeKind::Text),
                Attribute::new("collected_on", AttributeKind::Date),
                Attribute::relationship("project", AttributeKind::RelationshipSingle, "Project"),
            ],
        ),
        RecordType::new(
            "Project",
            vec![
                Attribute::new("id", AttributeKind::Integer).read_only(),
                Attribute::new("title", AttributeKind::Text),
                Attribute::relationship("owner", AttributeKind::RelationshipSingle, "Person"),
                Attribute::relationship("members", AttributeKind::RelationshipMany, "Person"),
            ],
        ),
        RecordType::new(
            "Person",
            vec![
                Attribute::new("id", AttributeKind::Integer).read_only(),
                Attribute::new("name", AttributeKind::Text),
                Attribute::new("email", AttributeKind::Text),
            ],
        ),
    ])
}

fn sample(catalog: &SchemaCatalog) -> &RecordType {
    catalog.record_type("Sample").expect("sample exists")
}

#[test]
fn parses_dotted_and_double_underscore_paths() {
    let dotted = RelationshipPath::parse("project.owner.name");
    let underscored = RelationshipPath::parse("project__owner__name");
    assert_eq!(dotted.segments(), underscored.segments());
    assert_eq!(dotted.len(), 3);
    assert!(RelationshipPath::is_traversal("project.owner"));
    assert!(RelationshipPath::is_traversal("project__owner"));
    assert!(!RelationshipPath::is_traversal("collected_on"));
}

#[test]
fn resolves_multi_hop_path() {
    let catalog = catalog();
    let path = RelationshipPath::parse("project.owner.email");
    let resolved = resolve_path(&catalog, sample(&catalog), &path).expect("path resolves");

    assert_eq!(resolved.terminal().name, "email");
    assert_eq!(resolved.terminal_owner().name, "Person");
    assert_eq!(resolved.owners.len(), 3);
    assert!(!resolved.crosses_many());
}

#[test]
fn reports_many_hops() {
    let catalog = catalog();
    let path = RelationshipPath::parse("project__members__name");
    let resolved = resolve_path(&catalog, sample(&catalog), &path).expect("path resolves");
    assert!(resolved.crosses_many());
}

#[test]
fn names_failing_segment_and_resolved_prefix() {
    let catalog = catalog();
    let path = RelationshipPath::parse("project.ownr.name");
    let err = resolve_path(&catalog, sample(&catalog), &path).expect_err("path must fail");

    assert_eq!(err.reason, FieldErrorReason::UnknownAttribute);
    assert_eq!(err.segment.as_deref(), Some("ownr"));
    assert_eq!(err.resolved, vec!["project".to_string()]);
    assert_eq!(err.segment_owner.as_deref(), Some("Project"));
    assert_eq!(err.suggestion.as_deref(), Some("owner"));
    let message = err.to_string();
    assert!(message.contains("'ownr'"), "{message}");
    assert!(message.contains("resolved so far: 'project'"), "{message}");
}

#[test]
fn rejects_non_relationship_hop() {
    let catalog = catalog();
    let path = RelationshipPath::parse("name.length");
    let err = resolve_path(&catalog, sample(&catalog), &path).expect_err("path must fail");

    assert_eq!(err.reason, FieldErrorReason::NotARelationship);
    assert_eq!(err.segment.as_deref(), Some("name"));
    assert!(err.resolved.is_empty());
    assert_eq!(err.alternatives, vec!["project".to_string()]);
}

#[test]
fn single_segment_uses_plain_attribute_error() {
    let catalog = catalog();
    let path = RelationshipPath::parse("colected_on");
    let err = resolve_path(&catalog, sample(&catalog), &path).expect_err("must fail");

    assert_eq!(err.segment, None);
    assert_eq!(err.suggestion.as_deref(), Some("collected_on"));
    assert!(err.to_string().contains("did you mean 'collected_on'?"));
}

#[test]
fn catalog_implements_schema_source() {
    let catalog = catalog();
    assert_eq!(
        catalog.record_type_names(),
        vec!["Sample", "Project", "Person"]
    );
}
