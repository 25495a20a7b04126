use std::path::PathBuf;

use kmdgen_model::GeneratorError;
use miette::Diagnostic;
use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The closed set of ways one build invocation can fail.
///
/// Configuration errors abort before any external call; generation and
/// I/O errors abort the invocation as a unit. Callers branch on the
/// variant, not on string contents.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("invalid pattern '{pattern}'")]
    #[diagnostic(
        code(kmdgen::invalid_pattern),
        help("include and exclude patterns use glob syntax, e.g. `**/*.kmd.json`")
    )]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("module '{name}' is declared by both '{first}' and '{second}'")]
    #[diagnostic(
        code(kmdgen::module_conflict),
        help("every dependency must declare a distinct module name; drop one of the artifacts")
    )]
    ModuleConflict {
        name: String,
        first: String,
        second: String,
    },

    #[error("the module to generate code '{name}' doesn't exist in dependencies")]
    #[diagnostic(code(kmdgen::unknown_module))]
    UnknownModule { name: String },

    #[error("failed to {op} '{path}'")]
    #[diagnostic(code(kmdgen::io))]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("code generation failed with {} error(s)", .errors.len())]
    #[diagnostic(code(kmdgen::generation))]
    Generation { errors: Vec<GeneratorError> },

    #[error("generator failed unexpectedly: {message}")]
    #[diagnostic(
        code(kmdgen::unexpected),
        help("this is a fault inside the generator, not a problem with the definitions")
    )]
    Unexpected { message: String },
}

impl Error {
    /// Wrap an I/O failure with the operation and path it happened on.
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Returns true for failures caused by configuration rather than by
    /// generation or the filesystem.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::InvalidPattern { .. } | Error::ModuleConflict { .. } | Error::UnknownModule { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_names_both_sources() {
        let err = Error::ModuleConflict {
            name: "player".into(),
            first: "org.example:player:1.0".into(),
            second: "org.example:player-legacy:0.9".into(),
        };
        let message = err.to_string();
        assert!(message.contains("org.example:player:1.0"));
        assert!(message.contains("org.example:player-legacy:0.9"));
        assert!(err.is_config());
    }

    #[test]
    fn test_generation_summarizes_count() {
        let err = Error::Generation {
            errors: vec![
                GeneratorError::new("first"),
                GeneratorError::new("second"),
            ],
        };
        assert_eq!(err.to_string(), "code generation failed with 2 error(s)");
        assert!(!err.is_config());
    }

    #[test]
    fn test_io_carries_operation_and_path() {
        let err = Error::io(
            "copy",
            "/tmp/foo.kmd.json",
            std::io::Error::other("disk full"),
        );
        assert_eq!(err.to_string(), "failed to copy '/tmp/foo.kmd.json'");
    }
}
