//! Dependency modules and their generation scope.

use std::path::PathBuf;

use serde::Serialize;

/// Per-module classification deciding how its types reach generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Scope {
    /// Types are freshly compiled during this build.
    Generate,
    /// Types are assumed already compiled by the artifact that declared
    /// them and are handed to the generator as external references.
    ReferenceOnly,
}

impl Scope {
    /// Returns true if modules with this scope are compiled this build.
    pub fn is_generate(&self) -> bool {
        matches!(self, Scope::Generate)
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Generate => write!(f, "generate"),
            Scope::ReferenceOnly => write!(f, "reference-only"),
        }
    }
}

/// A uniquely named unit of schema contributed by one dependency artifact.
///
/// At most one module with a given name may exist per build; a second
/// artifact declaring the same name is a configuration error, not a
/// silent overwrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    /// Declared module name.
    pub name: String,
    /// Path to the module's definition file.
    pub definition: PathBuf,
    /// Identity of the artifact that declared this module, kept for
    /// conflict reporting.
    pub artifact: String,
}

impl Module {
    /// Create a module record.
    pub fn new(
        name: impl Into<String>,
        definition: impl Into<PathBuf>,
        artifact: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            definition: definition.into(),
            artifact: artifact.into(),
        }
    }
}
