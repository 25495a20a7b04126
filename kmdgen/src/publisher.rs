//! Published artifact set maintenance.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::host::BuildHost;
use crate::{Error, Result};

/// Maintains the published definition mirror for runtime consumers.
///
/// The publish directory is a derived, disposable projection: it is
/// deleted and rebuilt on every invocation, so definitions from previous
/// builds can never accumulate. Partial state left behind by a failed run
/// is cleaned up by the next invocation's clear.
#[derive(Debug)]
pub struct ArtifactPublisher {
    dir: PathBuf,
}

impl ArtifactPublisher {
    /// Create a publisher owning the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Rebuild the mirror from the build's own definition files.
    ///
    /// Clears the directory, recreates it only when there is something to
    /// publish, copies every file in by bare file name (replacing on
    /// collision), and notifies the host tracker per copied file. Returns
    /// the published paths in copy order.
    pub fn publish(
        &self,
        sources: &BTreeSet<PathBuf>,
        host: &mut dyn BuildHost,
    ) -> Result<Vec<PathBuf>> {
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir)
                .map_err(|source| Error::io("remove directory", &self.dir, source))?;
        }

        if sources.is_empty() {
            debug!("no definition files to publish");
            return Ok(Vec::new());
        }

        fs::create_dir_all(&self.dir)
            .map_err(|source| Error::io("create directory", &self.dir, source))?;

        let mut published = Vec::new();
        for source in sources {
            let Some(name) = source.file_name() else {
                debug!("skipping definition without a file name: {}", source.display());
                continue;
            };
            let target = self.dir.join(name);
            if target.exists() {
                debug!("replacing previously published '{}'", target.display());
            }
            fs::copy(source, &target).map_err(|err| Error::io("copy", source, err))?;
            host.notify_changed(&target);
            published.push(target);
        }

        info!(
            "published {} definition file(s) to '{}'",
            published.len(),
            self.dir.display()
        );
        Ok(published)
    }
}
