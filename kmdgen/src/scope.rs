//! Generation scope resolution.

use std::collections::BTreeSet;
use std::path::PathBuf;

use kmdgen_model::{Module, Scope};

use crate::registry::ModuleRegistry;
use crate::{Error, Result};

/// A dependency module together with its resolved generation scope.
#[derive(Debug, Clone)]
pub struct ScopedModule {
    pub module: Module,
    pub scope: Scope,
}

/// The resolved partition of one build: definitions freshly compiled this
/// build versus definitions whose types already exist elsewhere.
///
/// The two sides are disjoint by construction.
#[derive(Debug, Default)]
pub struct GenerationPlan {
    sources: BTreeSet<PathBuf>,
    modules: Vec<ScopedModule>,
}

impl GenerationPlan {
    /// Classify every known module.
    ///
    /// Own definition files are unconditionally generate scope.
    /// Dependency modules named in `generate_modules` are promoted to
    /// generate scope; all others stay reference-only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownModule`] when `generate_modules` names a
    /// module absent from the registry. Resolution fails before the
    /// generator is ever invoked, so a typo can't waste generation work.
    pub fn resolve(
        sources: BTreeSet<PathBuf>,
        registry: &ModuleRegistry,
        generate_modules: &[String],
    ) -> Result<Self> {
        for name in generate_modules {
            if !registry.contains(name) {
                return Err(Error::UnknownModule { name: name.clone() });
            }
        }

        let modules = registry
            .modules()
            .map(|module| {
                let scope = if generate_modules.iter().any(|name| name == &module.name) {
                    Scope::Generate
                } else {
                    Scope::ReferenceOnly
                };
                ScopedModule {
                    module: module.clone(),
                    scope,
                }
            })
            .collect();

        Ok(Self { sources, modules })
    }

    /// Own definition files, always compiled this build.
    pub fn sources(&self) -> &BTreeSet<PathBuf> {
        &self.sources
    }

    /// Dependency modules promoted to generate scope.
    pub fn generated_modules(&self) -> impl Iterator<Item = &Module> {
        self.modules
            .iter()
            .filter(|scoped| scoped.scope.is_generate())
            .map(|scoped| &scoped.module)
    }

    /// Dependency modules whose types are external references.
    pub fn referenced_modules(&self) -> impl Iterator<Item = &Module> {
        self.modules
            .iter()
            .filter(|scoped| !scoped.scope.is_generate())
            .map(|scoped| &scoped.module)
    }

    /// Whether anything needs the generator this build.
    pub fn requires_generation(&self) -> bool {
        !self.sources.is_empty() || self.modules.iter().any(|scoped| scoped.scope.is_generate())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use kmdgen_model::{DEFINITION_RESOURCE_DIR, DEFINITION_SUFFIX, DependencyArtifact};
    use tempfile::TempDir;

    use super::*;

    fn schema_artifact(root: &Path, id: &str, module: &str) -> DependencyArtifact {
        let contents = root.join(module);
        let definition = contents
            .join(DEFINITION_RESOURCE_DIR)
            .join(format!("{module}{DEFINITION_SUFFIX}"));
        fs::create_dir_all(definition.parent().unwrap()).unwrap();
        fs::write(&definition, "{}").unwrap();
        DependencyArtifact::new(id, module, contents)
    }

    fn registry(temp: &TempDir, modules: &[(&str, &str)]) -> ModuleRegistry {
        let artifacts: Vec<DependencyArtifact> = modules
            .iter()
            .map(|(id, module)| schema_artifact(temp.path(), id, module))
            .collect();
        ModuleRegistry::from_artifacts(&artifacts).unwrap()
    }

    #[test]
    fn test_unpromoted_dependencies_stay_reference_only() {
        let temp = TempDir::new().unwrap();
        let registry = registry(&temp, &[("org.example:player:1.0", "player")]);

        let plan = GenerationPlan::resolve(BTreeSet::new(), &registry, &[]).unwrap();

        assert_eq!(plan.generated_modules().count(), 0);
        let referenced: Vec<&str> = plan.referenced_modules().map(|m| m.name.as_str()).collect();
        assert_eq!(referenced, vec!["player"]);
        assert!(!plan.requires_generation());
    }

    #[test]
    fn test_promoted_module_moves_to_generate_scope() {
        let temp = TempDir::new().unwrap();
        let registry = registry(
            &temp,
            &[
                ("org.example:player:1.0", "player"),
                ("org.example:recorder:1.0", "recorder"),
            ],
        );

        let plan =
            GenerationPlan::resolve(BTreeSet::new(), &registry, &["player".to_string()]).unwrap();

        let generated: Vec<&str> = plan.generated_modules().map(|m| m.name.as_str()).collect();
        let referenced: Vec<&str> = plan.referenced_modules().map(|m| m.name.as_str()).collect();
        assert_eq!(generated, vec!["player"]);
        assert_eq!(referenced, vec!["recorder"]);
        assert!(plan.requires_generation());
    }

    #[test]
    fn test_unknown_promoted_module_is_rejected() {
        let temp = TempDir::new().unwrap();
        let registry = registry(&temp, &[("org.example:player:1.0", "player")]);

        let err = GenerationPlan::resolve(BTreeSet::new(), &registry, &["mixer".to_string()])
            .unwrap_err();

        match err {
            Error::UnknownModule { name } => assert_eq!(name, "mixer"),
            other => panic!("expected UnknownModule, got {other:?}"),
        }
    }

    #[test]
    fn test_own_sources_require_generation() {
        let temp = TempDir::new().unwrap();
        let registry = registry(&temp, &[]);
        let sources: BTreeSet<PathBuf> = [temp.path().join("own.kmd.json")].into();

        let plan = GenerationPlan::resolve(sources, &registry, &[]).unwrap();

        assert!(plan.requires_generation());
        assert_eq!(plan.sources().len(), 1);
    }
}
