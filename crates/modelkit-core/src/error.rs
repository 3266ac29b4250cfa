use std::fmt;
use std::panic::Location;

use thiserror::Error;

use crate::types::ArtifactKind;

/// Core error type shared across modelkit crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Structural misconfiguration (missing record type, wrong family, bad custom class).
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A named attribute or relationship path does not resolve.
    #[error(transparent)]
    FieldValidation(#[from] FieldValidationError),
    /// The same record type was registered twice.
    #[error(
        "record type '{record_type}' is already registered (first at {original}, again at {duplicate})"
    )]
    DuplicateRegistration {
        record_type: String,
        original: RegistrationSite,
        duplicate: RegistrationSite,
    },
    /// A factory failed to synthesize an artifact.
    #[error("failed to generate {artifact} for '{record_type}': {source}")]
    ComponentGeneration {
        artifact: ArtifactKind,
        record_type: String,
        #[source]
        source: Box<Error>,
    },
    /// The schema catalog violates internal invariants.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
    /// A schema snapshot could not be read or decoded.
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl Error {
    /// Wrap `self` as the cause of a failed artifact generation.
    pub fn during_generation(self, artifact: ArtifactKind, record_type: impl Into<String>) -> Self {
        Error::ComponentGeneration {
            artifact,
            record_type: record_type.into(),
            source: Box::new(self),
        }
    }
}

/// Convenience alias for results returned by modelkit crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Maximum number of valid alternatives carried by a [`FieldValidationError`].
pub const MAX_ALTERNATIVES: usize = 10;

/// Why a field reference failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorReason {
    /// The segment is not an attribute of the current record type.
    UnknownAttribute,
    /// A non-terminal segment exists but is not a relationship.
    NotARelationship,
    /// A relationship points at a record type the schema does not know.
    UnknownRelatedType,
}

/// A named attribute or relationship path that does not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidationError {
    /// The full name as written in the configuration.
    pub name: String,
    /// The record type the name was resolved against.
    pub record_type: String,
    pub reason: FieldErrorReason,
    /// The failing segment when `name` is a relationship path.
    pub segment: Option<String>,
    /// Segments successfully resolved before `segment`.
    pub resolved: Vec<String>,
    /// Record type that owns the failing segment.
    pub segment_owner: Option<String>,
    pub suggestion: Option<String>,
    /// Valid names at the failing position, truncated to [`MAX_ALTERNATIVES`].
    pub alternatives: Vec<String>,
}

impl FieldValidationError {
    /// Error for a plain attribute name that is not present on `record_type`.
    pub fn unknown_attribute(name: impl Into<String>, record_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            reason: FieldErrorReason::UnknownAttribute,
            segment: None,
            resolved: Vec::new(),
            segment_owner: None,
            suggestion: None,
            alternatives: Vec::new(),
        }
    }

    /// Attach a suggestion and the (truncated) list of valid alternatives.
    pub fn with_candidates<I, S>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let candidates: Vec<String> = candidates
            .into_iter()
            .map(|candidate| candidate.as_ref().to_string())
            .collect();
        let needle = self.segment.as_deref().unwrap_or(&self.name);
        self.suggestion = crate::suggest::closest_match(needle, &candidates);
        self.alternatives = candidates.into_iter().take(MAX_ALTERNATIVES).collect();
        self
    }

    /// Human-readable hint, e.g. `did you mean 'published_at'?`.
    pub fn hint(&self) -> Option<String> {
        self.suggestion
            .as_ref()
            .map(|suggestion| format!("did you mean '{suggestion}'?"))
    }
}

impl fmt::Display for FieldValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.segment {
            Some(segment) => {
                let owner = self.segment_owner.as_deref().unwrap_or(&self.record_type);
                write!(
                    f,
                    "invalid relationship path '{}' on '{}': segment '{}' ",
                    self.name, self.record_type, segment
                )?;
                match self.reason {
                    FieldErrorReason::UnknownAttribute => {
                        write!(f, "is not an attribute of '{owner}'")?
                    }
                    FieldErrorReason::NotARelationship => {
                        write!(f, "is not a relationship on '{owner}'")?
                    }
                    FieldErrorReason::UnknownRelatedType => {
                        write!(f, "on '{owner}' points at an unknown record type")?
                    }
                }
                if self.resolved.is_empty() {
                    write!(f, " (nothing resolved)")?;
                } else {
                    write!(f, " (resolved so far: '{}')", self.resolved.join("."))?;
                }
            }
            None => {
                write!(
                    f,
                    "'{}' is not a valid attribute of '{}'",
                    self.name, self.record_type
                )?;
            }
        }

        if let Some(hint) = self.hint() {
            write!(f, "; {hint}")?;
        }
        if !self.alternatives.is_empty() {
            write!(f, " (valid: {})", self.alternatives.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldValidationError {}

/// Source location of a `register` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationSite(&'static Location<'static>);

impl RegistrationSite {
    /// Capture the location of the caller (propagated through `#[track_caller]`).
    #[track_caller]
    pub fn caller() -> Self {
        Self(Location::caller())
    }

    pub fn file(&self) -> &'static str {
        self.0.file()
    }

    pub fn line(&self) -> u32 {
        self.0.line()
    }
}

impl fmt::Display for RegistrationSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.0.file(), self.0.line(), self.0.column())
    }
}
