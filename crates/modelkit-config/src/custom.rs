use std::any::Any;
use std::fmt;

use modelkit_core::Capability;

/// A caller-supplied artifact that replaces the generated one.
///
/// Custom artifacts are returned as-is: they own their field configuration
/// and never see the attribute lists of the model config.
pub trait CustomArtifact: fmt::Debug + Send + Sync {
    /// Name reported in logs and check findings.
    fn name(&self) -> &str;

    /// Capabilities this artifact implements.
    fn capabilities(&self) -> &[Capability];

    fn supports(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Downcast hook for the code that consumes the artifact.
    fn as_any(&self) -> &dyn Any;
}
