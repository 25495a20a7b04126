//! Test doubles for pipeline consumers.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use eyre::eyre;
use kmdgen_model::{
    DEFINITION_RESOURCE_DIR, DEFINITION_SUFFIX, DependencyArtifact, GeneratorError,
};

use crate::config::{BuildConfig, DEFAULT_SOURCE_DIR};
use crate::generator::{DefinitionGenerator, GenerationOutcome, GenerationRequest};
use crate::host::BuildHost;

/// What a [`ScriptedGenerator`] does when invoked.
#[derive(Debug, Clone)]
pub enum Script {
    /// Report success, claiming these files were written.
    Succeed(Vec<PathBuf>),
    /// Report the given structured errors.
    Fail(Vec<GeneratorError>),
    /// Fail with an internal fault.
    Explode(String),
}

/// A generator double that replays a fixed outcome and records every
/// request it sees.
pub struct ScriptedGenerator {
    script: Script,
    requests: RefCell<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    /// Create a generator that follows the given script.
    pub fn new(script: Script) -> Self {
        Self {
            script,
            requests: RefCell::new(Vec::new()),
        }
    }

    /// A generator that succeeds claiming no files were written.
    pub fn succeeding() -> Self {
        Self::new(Script::Succeed(Vec::new()))
    }

    /// How many times the generator was invoked.
    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    /// The requests received so far.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.borrow().clone()
    }
}

impl DefinitionGenerator for ScriptedGenerator {
    fn generate(&self, request: &GenerationRequest) -> eyre::Result<GenerationOutcome> {
        self.requests.borrow_mut().push(request.clone());
        match &self.script {
            Script::Succeed(files) => Ok(GenerationOutcome::Success {
                files: files.clone(),
            }),
            Script::Fail(errors) => Ok(GenerationOutcome::Failure {
                errors: errors.clone(),
            }),
            Script::Explode(message) => Err(eyre!("{message}")),
        }
    }
}

/// A host double recording source roots and change notifications.
#[derive(Debug, Default)]
pub struct RecordingHost {
    /// Directories registered as compilable source roots, in call order.
    pub source_roots: Vec<PathBuf>,
    /// Paths reported to the incremental change tracker, in call order.
    pub changed: Vec<PathBuf>,
}

impl RecordingHost {
    /// Create an empty recording host.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BuildHost for RecordingHost {
    fn add_source_root(&mut self, dir: &Path) {
        self.source_roots.push(dir.to_path_buf());
    }

    fn notify_changed(&mut self, path: &Path) {
        self.changed.push(path.to_path_buf());
    }
}

/// A scratch project layout on disk: source tree and dependency artifact
/// directories under one temp root, cleaned up on drop.
pub struct TempProject {
    root: tempfile::TempDir,
}

impl TempProject {
    /// Create an empty scratch project.
    pub fn new() -> Self {
        Self {
            root: tempfile::TempDir::new().expect("create temp project"),
        }
    }

    /// The project root.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Default configuration rooted at this project.
    pub fn config(&self) -> BuildConfig {
        BuildConfig::for_project(self.root())
    }

    /// Write an own definition file under the default source directory.
    /// `name` may contain subdirectories.
    pub fn add_definition(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join(DEFAULT_SOURCE_DIR).join(name);
        fs::create_dir_all(path.parent().expect("definition has a parent"))
            .expect("create source directory");
        fs::write(&path, content).expect("write definition");
        path
    }

    /// Lay out a dependency artifact carrying an embedded definition.
    pub fn add_artifact(&self, id: &str, module: &str) -> DependencyArtifact {
        let contents = self.artifact_contents(id);
        let definition = contents
            .join(DEFINITION_RESOURCE_DIR)
            .join(format!("{module}{DEFINITION_SUFFIX}"));
        fs::create_dir_all(definition.parent().expect("resource dir has a parent"))
            .expect("create artifact resource directory");
        fs::write(&definition, format!("{{\"name\":\"{module}\"}}")).expect("write definition");
        DependencyArtifact::new(id, module, contents)
    }

    /// Lay out a dependency artifact without a definition resource.
    pub fn add_plain_artifact(&self, id: &str, module: &str) -> DependencyArtifact {
        let contents = self.artifact_contents(id);
        fs::create_dir_all(&contents).expect("create artifact directory");
        DependencyArtifact::new(id, module, contents)
    }

    fn artifact_contents(&self, id: &str) -> PathBuf {
        self.root().join("deps").join(id.replace(':', "-"))
    }
}

impl Default for TempProject {
    fn default() -> Self {
        Self::new()
    }
}
