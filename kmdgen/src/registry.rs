//! Dependency module graph resolution.

use indexmap::IndexMap;
use kmdgen_model::{DependencyArtifact, Module};
use tracing::debug;

use crate::{Error, Result};

/// The modules contributed by the build's resolved dependencies, keyed by
/// module name.
///
/// Iteration follows artifact input order, which keeps conflict detection
/// and downstream request assembly stable across platforms.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: IndexMap<String, Module>,
}

impl ModuleRegistry {
    /// Build the registry from the host's resolved dependency artifacts.
    ///
    /// Artifacts without an embedded definition resource are skipped: not
    /// every dependency is a schema module.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModuleConflict`] when two artifacts declare the
    /// same module name, identifying both. Silently picking one would make
    /// builds non-reproducible, so this is fatal before scope resolution.
    pub fn from_artifacts(artifacts: &[DependencyArtifact]) -> Result<Self> {
        let mut modules: IndexMap<String, Module> = IndexMap::new();

        for artifact in artifacts {
            let definition = artifact.definition_path();
            if !definition.is_file() {
                debug!(
                    "dependency '{}' carries no definition resource, skipping",
                    artifact.id
                );
                continue;
            }

            if let Some(existing) = modules.get(&artifact.module_name) {
                return Err(Error::ModuleConflict {
                    name: artifact.module_name.clone(),
                    first: existing.artifact.clone(),
                    second: artifact.id.clone(),
                });
            }

            debug!(
                "registered module '{}' from '{}'",
                artifact.module_name, artifact.id
            );
            modules.insert(
                artifact.module_name.clone(),
                Module::new(&artifact.module_name, definition, &artifact.id),
            );
        }

        Ok(Self { modules })
    }

    /// Look up a module by name.
    pub fn get(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    /// Whether a module with this name is known.
    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// All known modules, in registration order.
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    /// Number of known modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether no dependency contributed a module.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
