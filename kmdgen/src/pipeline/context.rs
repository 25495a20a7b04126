//! Per-invocation pipeline state.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::config::BuildConfig;
use crate::registry::ModuleRegistry;
use crate::scope::GenerationPlan;

/// State accumulated while one build invocation moves through the
/// pipeline stages.
#[derive(Debug)]
pub struct GenerationContext {
    /// Configuration for this invocation.
    pub config: BuildConfig,
    /// Own definition files (populated by the scan stage).
    pub sources: BTreeSet<PathBuf>,
    /// Dependency module registry (populated by the registry stage).
    pub registry: Option<ModuleRegistry>,
    /// Resolved generation plan (populated by the scope stage).
    pub plan: Option<GenerationPlan>,
    /// Files written by the generator (populated on generation success).
    pub generated: Vec<PathBuf>,
    /// Files copied into the publish directory.
    pub published: Vec<PathBuf>,
}

impl GenerationContext {
    /// Create a fresh context for one invocation.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            sources: BTreeSet::new(),
            registry: None,
            plan: None,
            generated: Vec::new(),
            published: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_context_is_empty() {
        let ctx = GenerationContext::new(BuildConfig::for_project("."));

        assert!(ctx.sources.is_empty());
        assert!(ctx.registry.is_none());
        assert!(ctx.plan.is_none());
        assert!(ctx.generated.is_empty());
        assert!(ctx.published.is_empty());
    }
}
