//! Host build system interface.

use std::path::Path;

/// The surrounding build orchestrator.
///
/// The pipeline calls back into the host twice: to register the
/// generated-source directory as compilable, and to tell the incremental
/// change tracker about every published definition file.
pub trait BuildHost {
    /// Register a directory as a new compilable source root.
    fn add_source_root(&mut self, dir: &Path);

    /// Notify the incremental build tracker that a file was created or
    /// replaced.
    fn notify_changed(&mut self, path: &Path);
}
