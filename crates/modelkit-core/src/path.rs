use std::fmt;

use crate::error::{FieldErrorReason, FieldValidationError};
use crate::schema::{Attribute, RecordType};
use crate::source::SchemaSource;

/// A chain of attribute names crossing relationship boundaries.
///
/// Both `project.owner.name` and `project__owner__name` are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipPath {
    raw: String,
    segments: Vec<String>,
}

impl RelationshipPath {
    pub fn parse(raw: &str) -> Self {
        let segments = raw
            .split('.')
            .flat_map(|part| part.split("__"))
            .map(str::to_string)
            .collect();
        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    /// True when `name` crosses at least one relationship.
    pub fn is_traversal(name: &str) -> bool {
        name.contains('.') || name.contains("__")
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for RelationshipPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A relationship path whose every segment resolved.
#[derive(Debug, Clone)]
pub struct ResolvedPath<'a> {
    /// Record type owning each segment; `owners[0]` is the root.
    pub owners: Vec<&'a RecordType>,
    /// Attribute matched by each segment.
    pub attributes: Vec<&'a Attribute>,
}

impl<'a> ResolvedPath<'a> {
    /// Attribute named by the last segment.
    pub fn terminal(&self) -> &'a Attribute {
        self.attributes[self.attributes.len() - 1]
    }

    /// Record type that owns the terminal attribute.
    pub fn terminal_owner(&self) -> &'a RecordType {
        self.owners[self.owners.len() - 1]
    }

    /// True when any hop crosses a many-relationship.
    pub fn crosses_many(&self) -> bool {
        self.attributes[..self.attributes.len() - 1]
            .iter()
            .any(|attribute| attribute.kind == crate::types::AttributeKind::RelationshipMany)
    }
}

/// Walk `path` from `root`, following relationship attributes.
///
/// Every non-terminal segment must be a relationship on the current record
/// type; the terminal segment may be any attribute of the final record type.
/// The error names the exact failing segment and the segments resolved before it.
pub fn resolve_path<'a, S>(
    source: &'a S,
    root: &'a RecordType,
    path: &RelationshipPath,
) -> Result<ResolvedPath<'a>, FieldValidationError>
where
    S: SchemaSource + ?Sized,
{
    let mut owners = Vec::with_capacity(path.len());
    let mut attributes = Vec::with_capacity(path.len());
    let mut current = root;
    let last = path.len().saturating_sub(1);

    for (idx, segment) in path.segments().iter().enumerate() {
        let Some(attribute) = current.attribute(segment) else {
            let candidates: Vec<&str> = if idx < last {
                relationship_names(current)
            } else {
                current.attribute_names().collect()
            };
            return Err(segment_error(
                path,
                root,
                current,
                segment,
                idx,
                FieldErrorReason::UnknownAttribute,
            )
            .with_candidates(candidates));
        };

        owners.push(current);
        attributes.push(attribute);

        if idx == last {
            break;
        }

        if !attribute.kind.is_relationship() {
            return Err(segment_error(
                path,
                root,
                current,
                segment,
                idx,
                FieldErrorReason::NotARelationship,
            )
            .with_candidates(relationship_names(current)));
        }

        let target = attribute
            .related_to
            .as_deref()
            .and_then(|name| source.record_type(name));
        current = match target {
            Some(target) => target,
            None => {
                return Err(segment_error(
                    path,
                    root,
                    current,
                    segment,
                    idx,
                    FieldErrorReason::UnknownRelatedType,
                ));
            }
        };
    }

    if attributes.is_empty() {
        return Err(FieldValidationError::unknown_attribute(path.as_str(), &root.name)
            .with_candidates(root.attribute_names()));
    }

    Ok(ResolvedPath { owners, attributes })
}

fn relationship_names(record: &RecordType) -> Vec<&str> {
    record
        .attributes
        .iter()
        .filter(|attribute| attribute.kind.is_relationship())
        .map(|attribute| attribute.name.as_str())
        .collect()
}

fn segment_error(
    path: &RelationshipPath,
    root: &RecordType,
    owner: &RecordType,
    segment: &str,
    idx: usize,
    reason: FieldErrorReason,
) -> FieldValidationError {
    let mut error = FieldValidationError::unknown_attribute(path.as_str(), &root.name);
    error.reason = reason;
    if path.len() > 1 {
        error.segment = Some(segment.to_string());
        error.resolved = path.segments()[..idx].to_vec();
        error.segment_owner = Some(owner.name.clone());
    }
    error
}
