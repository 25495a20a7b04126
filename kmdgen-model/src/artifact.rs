//! Resolved dependency artifacts.

use std::path::PathBuf;

use crate::{DEFINITION_RESOURCE_DIR, DEFINITION_SUFFIX};

/// A dependency artifact as resolved by the host build system.
///
/// Not every dependency is a schema module: only artifacts that embed a
/// definition file under the fixed resource path
/// `<contents>/kmd/<module_name>.kmd.json` take part in generation, the
/// rest are skipped by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyArtifact {
    /// Artifact identity as the host names it, e.g. `org.example:player:1.2.0`.
    pub id: String,
    /// Module name declared in the artifact metadata.
    pub module_name: String,
    /// Directory the artifact contents were unpacked to.
    pub contents: PathBuf,
}

impl DependencyArtifact {
    /// Create an artifact record.
    pub fn new(
        id: impl Into<String>,
        module_name: impl Into<String>,
        contents: impl Into<PathBuf>,
    ) -> Self {
        Self {
            id: id.into(),
            module_name: module_name.into(),
            contents: contents.into(),
        }
    }

    /// The convention path where this artifact's embedded definition file
    /// must live. Whether anything actually exists there is for the
    /// registry to check.
    pub fn definition_path(&self) -> PathBuf {
        self.contents
            .join(DEFINITION_RESOURCE_DIR)
            .join(format!("{}{}", self.module_name, DEFINITION_SUFFIX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_path_follows_convention() {
        let artifact = DependencyArtifact::new("org.example:player:1.0", "player", "/deps/player");
        assert_eq!(
            artifact.definition_path(),
            PathBuf::from("/deps/player/kmd/player.kmd.json")
        );
    }
}
