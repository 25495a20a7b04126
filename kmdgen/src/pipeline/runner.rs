//! Pipeline orchestrator.

use std::fs;
use std::path::{Path, PathBuf};

use kmdgen_model::DependencyArtifact;
use tracing::{debug, error, info};

use super::GenerationContext;
use crate::config::BuildConfig;
use crate::generator::{DefinitionGenerator, GenerationOutcome, GenerationRequest};
use crate::host::BuildHost;
use crate::publisher::ArtifactPublisher;
use crate::registry::ModuleRegistry;
use crate::scanner::DefinitionScanner;
use crate::scope::GenerationPlan;
use crate::{Error, Result};

/// Summary of what one invocation did.
#[derive(Debug)]
pub struct BuildReport {
    /// Own definition files found by the scanner, sorted by path.
    pub sources: Vec<PathBuf>,
    /// Dependency modules compiled this build.
    pub generated_modules: Vec<String>,
    /// Dependency modules passed as external references.
    pub referenced_modules: Vec<String>,
    /// Files written by the generator.
    pub generated_files: Vec<PathBuf>,
    /// Files copied into the publish directory.
    pub published_files: Vec<PathBuf>,
    /// The directory registered as a compilable source root, when
    /// generation ran.
    pub source_root: Option<PathBuf>,
}

/// The generation pipeline orchestrator.
///
/// Drives one build invocation through scanning, registry construction,
/// scope resolution, generation, and publishing, strictly in that order.
/// Validation failures abort before the generator is invoked; generation
/// and I/O failures abort the invocation as a unit.
///
/// # Example
///
/// ```ignore
/// let mut pipeline = Pipeline::new(&generator, &mut host);
/// let report = pipeline.run(BuildConfig::for_project("."), &artifacts)?;
/// ```
pub struct Pipeline<'a> {
    generator: &'a dyn DefinitionGenerator,
    host: &'a mut dyn BuildHost,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline around the external collaborators.
    pub fn new(generator: &'a dyn DefinitionGenerator, host: &'a mut dyn BuildHost) -> Self {
        Self { generator, host }
    }

    /// Run one build invocation.
    ///
    /// Every failure is logged before it propagates; the generation stage
    /// additionally logs each reported error individually.
    pub fn run(
        &mut self,
        config: BuildConfig,
        artifacts: &[DependencyArtifact],
    ) -> Result<BuildReport> {
        self.execute(config, artifacts).inspect_err(|err| error!("{err}"))
    }

    fn execute(
        &mut self,
        config: BuildConfig,
        artifacts: &[DependencyArtifact],
    ) -> Result<BuildReport> {
        for pattern in &config.includes {
            debug!("include: {pattern}");
        }
        for pattern in &config.excludes {
            debug!("exclude: {pattern}");
        }
        debug!("output: {}", config.output_dir.display());

        let mut ctx = GenerationContext::new(config);

        self.scan(&mut ctx)?;
        self.resolve_registry(&mut ctx, artifacts)?;
        self.resolve_scopes(&mut ctx)?;
        let source_root = self.generate(&mut ctx)?;
        self.publish(&mut ctx)?;

        let plan = ctx.plan.take().expect("plan resolved above");
        Ok(BuildReport {
            sources: ctx.sources.iter().cloned().collect(),
            generated_modules: plan.generated_modules().map(|m| m.name.clone()).collect(),
            referenced_modules: plan.referenced_modules().map(|m| m.name.clone()).collect(),
            generated_files: ctx.generated,
            published_files: ctx.published,
            source_root,
        })
    }

    fn scan(&self, ctx: &mut GenerationContext) -> Result<()> {
        let scanner = DefinitionScanner::new(
            &ctx.config.source_dir,
            &ctx.config.includes,
            &ctx.config.excludes,
        )?;
        ctx.sources = scanner.scan()?;
        Ok(())
    }

    fn resolve_registry(
        &self,
        ctx: &mut GenerationContext,
        artifacts: &[DependencyArtifact],
    ) -> Result<()> {
        ctx.registry = Some(ModuleRegistry::from_artifacts(artifacts)?);
        Ok(())
    }

    fn resolve_scopes(&self, ctx: &mut GenerationContext) -> Result<()> {
        let registry = ctx.registry.as_ref().expect("registry resolved above");
        ctx.plan = Some(GenerationPlan::resolve(
            ctx.sources.clone(),
            registry,
            &ctx.config.generate_modules,
        )?);
        Ok(())
    }

    /// Drive the generator and register the source root. Skipped entirely
    /// when nothing requires generation.
    fn generate(&mut self, ctx: &mut GenerationContext) -> Result<Option<PathBuf>> {
        let request = {
            let plan = ctx.plan.as_ref().expect("plan resolved above");
            if !plan.requires_generation() {
                info!("no definition files to process in the project");
                return Ok(None);
            }
            assemble_request(&ctx.config, plan)
        };

        prepare_output_dir(&ctx.config.output_dir)?;

        info!("preparing code generation:");
        for file in &request.to_generate {
            info!("  definition file to generate code: {}", file.display());
        }
        for file in &request.to_reference {
            info!("  dependency definition as reference: {}", file.display());
        }

        match self.generator.generate(&request) {
            Ok(GenerationOutcome::Success { files }) => {
                info!("generation success");
                ctx.generated = files;
                self.host.add_source_root(&ctx.config.output_dir);
                Ok(Some(ctx.config.output_dir.clone()))
            }
            Ok(GenerationOutcome::Failure { errors }) => {
                error!("generation failed");
                for err in &errors {
                    error!("  {err}");
                }
                Err(Error::Generation { errors })
            }
            Err(report) => {
                error!("generator fault during code generation: {report:#}");
                Err(Error::Unexpected {
                    message: format!("{report:#}"),
                })
            }
        }
    }

    fn publish(&mut self, ctx: &mut GenerationContext) -> Result<()> {
        let publisher = ArtifactPublisher::new(&ctx.config.publish_dir);
        ctx.published = publisher.publish(&ctx.sources, self.host)?;
        Ok(())
    }
}

fn assemble_request(config: &BuildConfig, plan: &GenerationPlan) -> GenerationRequest {
    GenerationRequest {
        to_generate: plan
            .sources()
            .iter()
            .cloned()
            .chain(plan.generated_modules().map(|m| m.definition.clone()))
            .collect(),
        to_reference: plan.referenced_modules().map(|m| m.definition.clone()).collect(),
        output_dir: config.output_dir.clone(),
        options: config.options,
    }
}

fn prepare_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| Error::io("create directory", dir, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingHost, ScriptedGenerator, TempProject};

    #[test]
    fn test_unknown_promoted_module_never_reaches_generator() {
        let project = TempProject::new();
        project.add_definition("player.kmd.json", "{}");
        let config = project.config().generate_module("mixer");

        let generator = ScriptedGenerator::succeeding();
        let mut host = RecordingHost::new();
        let err = Pipeline::new(&generator, &mut host)
            .run(config, &[])
            .unwrap_err();

        assert!(matches!(err, Error::UnknownModule { .. }));
        assert_eq!(generator.calls(), 0);
        assert!(host.source_roots.is_empty());
    }

    #[test]
    fn test_module_conflict_never_reaches_generator() {
        let project = TempProject::new();
        let artifacts = vec![
            project.add_artifact("org.example:player:1.0", "player"),
            project.add_artifact("org.example:player-fork:2.0", "player"),
        ];

        let generator = ScriptedGenerator::succeeding();
        let mut host = RecordingHost::new();
        let err = Pipeline::new(&generator, &mut host)
            .run(project.config(), &artifacts)
            .unwrap_err();

        assert!(matches!(err, Error::ModuleConflict { .. }));
        assert_eq!(generator.calls(), 0);
    }

    #[test]
    fn test_nothing_to_generate_skips_generator_and_source_root() {
        let project = TempProject::new();

        let generator = ScriptedGenerator::succeeding();
        let mut host = RecordingHost::new();
        let report = Pipeline::new(&generator, &mut host)
            .run(project.config(), &[])
            .unwrap();

        assert_eq!(generator.calls(), 0);
        assert!(host.source_roots.is_empty());
        assert!(report.source_root.is_none());
        assert!(!project.config().output_dir.exists());
    }
}
