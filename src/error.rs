//! Error types for batch transpilation.
//!
//! Errors fall into two tiers:
//!
//! - [`BatchError`]: fatal, pre-batch. Nothing has been compiled yet and the
//!   run cannot proceed (missing source root, engine failed to load).
//! - [`UnitError`]: per-unit, recoverable. Recorded in the
//!   [`BatchReport`](crate::report::BatchReport) while the batch continues
//!   with the remaining files.
//!
//! [`EngineError`] is the error half of the [`Engine`](crate::engine::Engine)
//! contract and is mapped into the two tiers at the call sites: a load
//! failure becomes [`BatchError::EngineLoad`], a compile failure becomes
//! [`UnitError::Compilation`].

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for fatal batch errors.
pub type BatchResult<T> = Result<T, BatchError>;

/// Fatal error that aborts a run before any unit is attempted.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The configured source root does not exist or is not a directory.
    #[error("source directory not found: {path}")]
    SourceRootNotFound {
        /// The missing source root.
        path: PathBuf,
    },

    /// The transpiler engine resource could not be loaded or initialized.
    #[error("failed to load transpiler engine: {message}")]
    EngineLoad {
        /// Message from the engine loader.
        message: String,
    },

    /// Source tree traversal failed.
    #[error("failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Recoverable error for a single source unit.
///
/// A `UnitError` marks one file as failed in the batch report; it never
/// crosses the per-file boundary as control flow.
#[derive(Debug, Error)]
pub enum UnitError {
    /// An output path is occupied by an existing directory.
    #[error("cannot write {path}: a directory with the same name exists")]
    PathConflict {
        /// The colliding output path.
        path: PathBuf,
    },

    /// The engine rejected the source text.
    #[error("{message}")]
    Compilation {
        /// The engine's error message.
        message: String,
    },

    /// Reading the source or writing an output artifact failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The path being read or written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl UnitError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<EngineError> for UnitError {
    fn from(err: EngineError) -> Self {
        // Any engine error raised mid-batch counts as a compilation failure
        // for the unit being processed.
        match err {
            EngineError::Compilation { message } | EngineError::Load { message } => {
                Self::Compilation { message }
            }
        }
    }
}

/// Error reported by a transpiler engine implementation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine resource could not be loaded or initialized.
    #[error("{message}")]
    Load {
        /// Loader failure message.
        message: String,
    },

    /// The engine reported a syntax or semantic error in the source text.
    #[error("{message}")]
    Compilation {
        /// The engine's diagnostic message.
        message: String,
    },
}

impl EngineError {
    /// Create a load error.
    pub fn load(message: impl Into<String>) -> Self {
        Self::Load {
            message: message.into(),
        }
    }

    /// Create a compilation error.
    pub fn compilation(message: impl Into<String>) -> Self {
        Self::Compilation {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_error_display_names_the_conflicting_path() {
        let err = UnitError::PathConflict {
            path: PathBuf::from("out/widgets/a.gen"),
        };
        let text = err.to_string();
        assert!(text.contains("out/widgets/a.gen"));
        assert!(text.contains("directory"));
    }

    #[test]
    fn engine_error_maps_into_unit_compilation() {
        let err: UnitError = EngineError::compilation("unexpected token").into();
        assert!(matches!(err, UnitError::Compilation { ref message } if message == "unexpected token"));
    }
}
