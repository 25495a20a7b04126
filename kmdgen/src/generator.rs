//! The external generator interface.

use std::path::PathBuf;

use kmdgen_model::GeneratorError;
use serde::Serialize;

use crate::config::GeneratorOptions;

/// The definition bundle handed to the generator for one invocation.
///
/// `to_generate` and `to_reference` are disjoint by construction: a
/// definition is either compiled this build or assumed already compiled,
/// never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    /// Definition files compiled into source code this build.
    pub to_generate: Vec<PathBuf>,
    /// Definition files whose types are external references.
    pub to_reference: Vec<PathBuf>,
    /// Directory generated sources are written to.
    pub output_dir: PathBuf,
    /// Options forwarded unmodified.
    pub options: GeneratorOptions,
}

/// What one generator invocation produced.
///
/// Generation is never partially successful: a single reported error
/// fails the whole request.
#[derive(Debug, Clone)]
pub enum GenerationOutcome {
    /// All definitions compiled; the listed files were written.
    Success { files: Vec<PathBuf> },
    /// The generator reported problems, in discovery order.
    Failure { errors: Vec<GeneratorError> },
}

/// An external service that turns definition files into source code.
///
/// Implementations are synchronous and stateless per call. Problems with
/// the definitions themselves are reported through
/// [`GenerationOutcome::Failure`]; the `Err` branch is reserved for
/// faults inside the generator and is surfaced to callers as a distinct
/// failure category.
pub trait DefinitionGenerator {
    fn generate(&self, request: &GenerationRequest) -> eyre::Result<GenerationOutcome>;
}
