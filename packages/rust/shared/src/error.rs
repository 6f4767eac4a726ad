//! Error types for ScriptForge.
//!
//! Library crates use [`ScriptForgeError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all ScriptForge operations.
#[derive(Debug, thiserror::Error)]
pub enum ScriptForgeError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error talking to an external service.
    #[error("network error: {0}")]
    Network(String),

    /// A service response could not be decoded.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// State file read/write error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (bad search term, malformed record, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// The upstream content fetch failed. Nothing downstream ran.
    #[error("content fetch failed for {search_term:?}: {source}")]
    Fetch {
        search_term: String,
        source: Box<ScriptForgeError>,
    },

    /// Keyword extraction failed for the sentence at `index` (0-based).
    ///
    /// Sentences before `index` keep the keywords they already received.
    #[error("keyword extraction failed on sentence {index}: {source}")]
    ExternalService {
        index: usize,
        source: Box<ScriptForgeError>,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScriptForgeError>;

impl ScriptForgeError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
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

    /// Wrap a collaborator error as a content fetch failure.
    pub fn fetch(search_term: impl Into<String>, source: ScriptForgeError) -> Self {
        Self::Fetch {
            search_term: search_term.into(),
            source: Box::new(source),
        }
    }

    /// Wrap a collaborator error as a keyword extraction failure.
    pub fn external_service(index: usize, source: ScriptForgeError) -> Self {
        Self::ExternalService {
            index,
            source: Box::new(source),
        }
    }
}
