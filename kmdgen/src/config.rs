//! Build configuration.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Default source directory for own definition files, relative to the
/// project root.
pub const DEFAULT_SOURCE_DIR: &str = "src/kmd";

/// Default target directory for generated source files.
pub const DEFAULT_OUTPUT_DIR: &str = "target/generated-sources/kmd";

/// Default target directory for the published definition mirror.
pub const DEFAULT_PUBLISH_DIR: &str = "target/kmd";

/// Options forwarded to the definition generator unmodified.
///
/// The recognized set is fixed; an option the generator doesn't know
/// cannot be expressed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GeneratorOptions {
    /// Expand operation parameters into individual method parameters.
    pub expand_ops_params: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            expand_ops_params: true,
        }
    }
}

/// Configuration for one pipeline invocation.
///
/// Every field has a safe default; [`BuildConfig::for_project`] computes
/// the conventional layout under a project root and the `with_*` methods
/// override individual pieces.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Root directory to scan for own definition files.
    pub source_dir: PathBuf,
    /// Include glob patterns; empty means all definition files recursively.
    pub includes: Vec<String>,
    /// Exclude glob patterns; exclusion wins over inclusion.
    pub excludes: Vec<String>,
    /// Dependency modules promoted to generate scope.
    pub generate_modules: Vec<String>,
    /// Target directory for generated sources.
    pub output_dir: PathBuf,
    /// Target directory for the published definition mirror.
    pub publish_dir: PathBuf,
    /// Options forwarded to the generator.
    pub options: GeneratorOptions,
}

impl BuildConfig {
    /// Create a configuration with the conventional layout under a
    /// project root.
    pub fn for_project(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            source_dir: root.join(DEFAULT_SOURCE_DIR),
            includes: Vec::new(),
            excludes: Vec::new(),
            generate_modules: Vec::new(),
            output_dir: root.join(DEFAULT_OUTPUT_DIR),
            publish_dir: root.join(DEFAULT_PUBLISH_DIR),
            options: GeneratorOptions::default(),
        }
    }

    /// Override the source directory.
    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.includes.push(pattern.into());
        self
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.excludes.push(pattern.into());
        self
    }

    /// Promote a dependency module to generate scope.
    pub fn generate_module(mut self, name: impl Into<String>) -> Self {
        self.generate_modules.push(name.into());
        self
    }

    /// Override the generated-source directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Override the publish directory.
    pub fn with_publish_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.publish_dir = dir.into();
        self
    }

    /// Override the generator options.
    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }
}
