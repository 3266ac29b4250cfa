//! Stable identifiers for configuration health checks.

use std::fmt;

use crate::errors::IssueSeverity;

/// Namespace prefix shared by every check identifier.
pub const NAMESPACE: &str = "modelkit";

/// `<namespace>.<E|W><NNN>`, e.g. `modelkit.E004`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CheckId {
    pub severity: IssueSeverity,
    pub sequence: u16,
}

impl CheckId {
    pub const fn error(sequence: u16) -> Self {
        Self {
            severity: IssueSeverity::Error,
            sequence,
        }
    }

    pub const fn warning(sequence: u16) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            sequence,
        }
    }

    pub fn code(self) -> String {
        self.to_string()
    }

    pub fn summary(self) -> &'static str {
        match (self.severity, self.sequence) {
            (IssueSeverity::Error, 1) => "unknown record type",
            (IssueSeverity::Error, 2) => "record family not allowed",
            (IssueSeverity::Error, 3) => "duplicate registration",
            (IssueSeverity::Error, 4) => "unknown attribute",
            (IssueSeverity::Error, 5) => "invalid relationship path",
            (IssueSeverity::Error, 6) => "custom artifact lacks required capability",
            (IssueSeverity::Error, 7) => "artifact generation failed",
            (IssueSeverity::Warning, 1) => "custom artifact overrides attribute list",
            (IssueSeverity::Warning, 2) => "attribute incompatible with artifact",
            (IssueSeverity::Warning, 3) => "exclusion names unknown attribute",
            (IssueSeverity::Warning, 4) => "override targets unused attribute",
            (IssueSeverity::Warning, 5) => "exact match on non-text attribute",
            _ => "unknown check",
        }
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{NAMESPACE}.{}{:03}",
            self.severity.letter(),
            self.sequence
        )
    }
}

pub const UNKNOWN_RECORD_TYPE: CheckId = CheckId::error(1);
pub const FAMILY_NOT_ALLOWED: CheckId = CheckId::error(2);
pub const DUPLICATE_REGISTRATION: CheckId = CheckId::error(3);
pub const UNKNOWN_ATTRIBUTE: CheckId = CheckId::error(4);
pub const INVALID_PATH: CheckId = CheckId::error(5);
pub const MISSING_CAPABILITY: CheckId = CheckId::error(6);
pub const GENERATION_FAILED: CheckId = CheckId::error(7);

pub const CUSTOM_WITH_ATTRIBUTES: CheckId = CheckId::warning(1);
pub const INCOMPATIBLE_ATTRIBUTE: CheckId = CheckId::warning(2);
pub const UNKNOWN_EXCLUSION: CheckId = CheckId::warning(3);
pub const UNUSED_OVERRIDE: CheckId = CheckId::warning(4);
pub const EXACT_MATCH_NON_TEXT: CheckId = CheckId::warning(5);

/// Every check in identifier order.
pub const ALL: [CheckId; 12] = [
    UNKNOWN_RECORD_TYPE,
    FAMILY_NOT_ALLOWED,
    DUPLICATE_REGISTRATION,
    UNKNOWN_ATTRIBUTE,
    INVALID_PATH,
    MISSING_CAPABILITY,
    GENERATION_FAILED,
    CUSTOM_WITH_ATTRIBUTES,
    INCOMPATIBLE_ATTRIBUTE,
    UNKNOWN_EXCLUSION,
    UNUSED_OVERRIDE,
    EXACT_MATCH_NON_TEXT,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_namespace_letter_and_sequence() {
        assert_eq!(UNKNOWN_ATTRIBUTE.to_string(), "modelkit.E004");
        assert_eq!(EXACT_MATCH_NON_TEXT.to_string(), "modelkit.W005");
    }

    #[test]
    fn every_check_has_a_summary() {
        for id in ALL {
            assert_ne!(id.summary(), "unknown check", "{id}");
        }
    }
}
