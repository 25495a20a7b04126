//! Definition file discovery.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use kmdgen_model::DEFINITION_SUFFIX;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::{Error, Result};

/// Default include pattern selecting all definition files recursively.
pub const DEFAULT_INCLUDE: &str = "**/*.kmd.json";

/// Discovers definition files under a source tree.
///
/// A file is selected when its name ends with [`DEFINITION_SUFFIX`], its
/// path relative to the root matches at least one include pattern, and no
/// exclude pattern. With no include patterns the scanner behaves as if
/// given [`DEFAULT_INCLUDE`].
#[derive(Debug)]
pub struct DefinitionScanner {
    root: PathBuf,
    includes: GlobSet,
    excludes: GlobSet,
}

impl DefinitionScanner {
    /// Compile the include and exclude patterns for a source root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] for a malformed pattern. Pattern
    /// compilation happens before any filesystem access, so a bad pattern
    /// never triggers partial generation work.
    pub fn new(root: impl Into<PathBuf>, includes: &[String], excludes: &[String]) -> Result<Self> {
        let includes = if includes.is_empty() {
            debug!("no include patterns supplied, defaulting to {DEFAULT_INCLUDE}");
            compile(&[DEFAULT_INCLUDE.to_string()])?
        } else {
            compile(includes)?
        };

        Ok(Self {
            root: root.into(),
            includes,
            excludes: compile(excludes)?,
        })
    }

    /// Walk the source tree and collect matching definition files.
    ///
    /// An absent root directory yields the empty set; downstream stages
    /// treat "nothing to generate" as a valid state, not an error. The
    /// result is sorted by path, so identical filesystem state always
    /// produces identical output.
    pub fn scan(&self) -> Result<BTreeSet<PathBuf>> {
        if !self.root.is_dir() {
            info!(
                "the folder for definition files is '{}', but it doesn't exist",
                self.root.display()
            );
            return Ok(BTreeSet::new());
        }

        info!("searching for definition files in '{}'", self.root.display());

        let mut files = BTreeSet::new();
        for entry in WalkDir::new(&self.root) {
            let entry = entry.map_err(|err| {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone());
                let source = err
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
                Error::io("scan", path, source)
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            if self.matches(entry.path()) {
                info!("  found definition file: {}", entry.path().display());
                files.insert(entry.path().to_path_buf());
            }
        }

        if files.is_empty() {
            info!("no definition files found in the project");
        }

        Ok(files)
    }

    fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            return false;
        };
        if !name.ends_with(DEFINITION_SUFFIX) {
            return false;
        }
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.includes.is_match(relative) && !self.excludes.is_match(relative)
    }
}

fn compile(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| Error::InvalidPattern {
        pattern: source.glob().unwrap_or_default().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "{}").unwrap();
    }

    fn scan(root: &Path, includes: &[&str], excludes: &[&str]) -> Vec<PathBuf> {
        let includes: Vec<String> = includes.iter().map(|s| s.to_string()).collect();
        let excludes: Vec<String> = excludes.iter().map(|s| s.to_string()).collect();
        let scanner = DefinitionScanner::new(root, &includes, &excludes).unwrap();
        scanner.scan().unwrap().into_iter().collect()
    }

    #[test]
    fn test_empty_includes_defaults_to_all_definitions() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "player.kmd.json");
        write(temp.path(), "nested/recorder.kmd.json");
        write(temp.path(), "notes.txt");

        let found = scan(temp.path(), &[], &[]);

        assert_eq!(
            found,
            vec![
                temp.path().join("nested/recorder.kmd.json"),
                temp.path().join("player.kmd.json"),
            ]
        );
    }

    #[test]
    fn test_exclusion_wins_over_inclusion() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "core/player.kmd.json");
        write(temp.path(), "core/experimental/mixer.kmd.json");

        let found = scan(temp.path(), &["core/**"], &["core/experimental/**"]);

        assert_eq!(found, vec![temp.path().join("core/player.kmd.json")]);
    }

    #[test]
    fn test_suffix_gate_applies_even_with_broad_includes() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "player.kmd.json");
        write(temp.path(), "player.json");
        write(temp.path(), "README.md");

        let found = scan(temp.path(), &["**/*"], &[]);

        assert_eq!(found, vec![temp.path().join("player.kmd.json")]);
    }

    #[test]
    fn test_absent_root_yields_empty_set() {
        let temp = TempDir::new().unwrap();
        let found = scan(&temp.path().join("does-not-exist"), &[], &[]);
        assert!(found.is_empty());
    }

    #[test]
    fn test_malformed_pattern_is_a_configuration_error() {
        let err = DefinitionScanner::new("/tmp", &["[".to_string()], &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
        assert!(err.is_config());
    }

    #[test]
    fn test_duplicate_discovery_is_deduplicated() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "player.kmd.json");

        // Two include patterns matching the same file must not double it.
        let found = scan(temp.path(), &["**/*.kmd.json", "player.*"], &[]);

        assert_eq!(found, vec![temp.path().join("player.kmd.json")]);
    }
}
