//! Error types for docsplice.
//!
//! Library crates use [`DocspliceError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all docsplice operations.
#[derive(Debug, thiserror::Error)]
pub enum DocspliceError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// The same sample name was declared twice.
    #[error("duplicate sample name '{name}' (declared in {first:?} and {second:?})")]
    DuplicateSample {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// A directive references a sample that was never declared.
    #[error("unknown sample '{name}' referenced from {document:?}")]
    MissingSample { name: String, document: PathBuf },

    /// A sample start marker has no matching end marker.
    #[error("sample '{name}' in {path:?} has no `// end sample` marker")]
    UnterminatedSample { name: String, path: PathBuf },

    /// The API version argument is malformed.
    #[error("invalid version '{version}': expected a string starting with 'v' (e.g. v1.0.0)")]
    InvalidVersion { version: String },

    /// An external tool could not be started.
    #[error("failed to run `{program}`: {source}")]
    ToolSpawn {
        program: String,
        source: std::io::Error,
    },

    /// An external tool ran but exited unsuccessfully.
    #[error("`{program}` exited with status {}", .code.map_or_else(|| "<signal>".to_string(), |c| c.to_string()))]
    ExternalTool { program: String, code: Option<i32> },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocspliceError>;

impl DocspliceError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
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

    /// Convert a directory-walk failure, keeping the offending path when known.
    pub fn walk(root: impl Into<PathBuf>, err: walkdir::Error) -> Self {
        let path = err.path().map(PathBuf::from).unwrap_or_else(|| root.into());
        let source = err
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
        Self::Io { path, source }
    }
}
