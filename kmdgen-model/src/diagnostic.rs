//! Structured errors reported by a definition generator.

use std::path::PathBuf;

use serde::Serialize;

/// Location of a problem within a definition file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    /// The definition file the problem was found in.
    pub file: PathBuf,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number.
    pub column: u32,
}

impl SourceLocation {
    /// Create a source location.
    pub fn new(file: impl Into<PathBuf>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// A problem reported by the generator for one generation request.
///
/// Generators report every problem they find; a single error fails the
/// whole request. The order of errors is the order of discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorError {
    /// Human-readable description of the problem.
    pub message: String,
    /// Where the problem was found, when the generator can tell.
    pub location: Option<SourceLocation>,
}

impl GeneratorError {
    /// Create an error without a location.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    /// Attach a source location to this error.
    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }
}

impl std::fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(location) = &self.location {
            write!(f, " (at {})", location)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_without_location() {
        let err = GeneratorError::new("unknown element type 'Mixer'");
        assert_eq!(err.to_string(), "unknown element type 'Mixer'");
    }

    #[test]
    fn test_error_with_location() {
        let err = GeneratorError::new("duplicate property 'uri'")
            .at(SourceLocation::new("player.kmd.json", 12, 3));
        assert_eq!(
            err.to_string(),
            "duplicate property 'uri' (at player.kmd.json:12:3)"
        );
    }
}
