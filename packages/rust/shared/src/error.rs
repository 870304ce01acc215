//! Error types for docbinder.
//!
//! Library crates use [`DocbinderError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all docbinder operations.
#[derive(Debug, thiserror::Error)]
pub enum DocbinderError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invocation precondition not met (missing source, wrong output extension).
    #[error("precondition failed: {message}")]
    Precondition { message: String },

    /// External converter failed to start or exited unsuccessfully.
    #[error("{tool} failed: {message}")]
    Converter { tool: String, message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocbinderError>;

impl DocbinderError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a precondition error from any displayable message.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition {
            message: msg.into(),
        }
    }

    /// Create a converter error for the named tool.
    pub fn converter(tool: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Converter {
            tool: tool.into(),
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = DocbinderError::precondition("output must end with .pdf");
        assert_eq!(err.to_string(), "precondition failed: output must end with .pdf");

        let err = DocbinderError::converter("pandoc", "exit status: 64");
        assert_eq!(err.to_string(), "pandoc failed: exit status: 64");
    }

    #[test]
    fn io_error_keeps_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = DocbinderError::io("/docs/a.md", source);
        assert!(err.to_string().contains("/docs/a.md"));
        assert!(err.to_string().contains("gone"));
    }
}
