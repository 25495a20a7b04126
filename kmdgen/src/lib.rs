//! Build-time orchestration for media element definition files.
//!
//! Given a source tree of `*.kmd.json` definitions and the build's
//! resolved dependency artifacts, this crate decides which definitions
//! are freshly compiled into source code and which are merely referenced
//! from already-published dependencies, drives the external generator
//! once per invocation, and keeps the generated and published directories
//! correct across repeated incremental builds.
//!
//! # Module Organization
//!
//! - [`config`] - Build configuration with defaults (BuildConfig, GeneratorOptions)
//! - [`scanner`] - Definition file discovery (DefinitionScanner)
//! - [`registry`] - Dependency module graph (ModuleRegistry)
//! - [`scope`] - Generation scope resolution (GenerationPlan)
//! - [`generator`] - External generator interface (DefinitionGenerator)
//! - [`host`] - Host build system interface (BuildHost)
//! - [`publisher`] - Published artifact set maintenance (ArtifactPublisher)
//! - [`pipeline`] - The per-invocation orchestrator (Pipeline)
//! - [`testing`] - Test doubles (feature-gated)
//!
//! # Example
//!
//! ```ignore
//! use kmdgen::{BuildConfig, Pipeline};
//!
//! let mut pipeline = Pipeline::new(&generator, &mut host);
//! let report = pipeline.run(BuildConfig::for_project("."), &artifacts)?;
//! println!("generated {} file(s)", report.generated_files.len());
//! ```

pub mod config;
mod error;
pub mod generator;
pub mod host;
pub mod pipeline;
pub mod publisher;
pub mod registry;
pub mod scanner;
pub mod scope;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::{BuildConfig, GeneratorOptions};
pub use error::{Error, Result};
pub use generator::{DefinitionGenerator, GenerationOutcome, GenerationRequest};
pub use host::BuildHost;
pub use kmdgen_model::{DependencyArtifact, GeneratorError, Module, Scope, SourceLocation};
pub use pipeline::{BuildReport, GenerationContext, Pipeline};
