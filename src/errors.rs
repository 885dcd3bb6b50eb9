//! Error taxonomy for the generator driver.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VkGenError {
    /// Invocation-shape problems: an empty filter list with no default, a
    /// missing target name. Detected before any generation is attempted.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The registry document could not be read or parsed. Always fatal.
    #[error("failed to load registry {}: {reason}", path.display())]
    RegistryLoad { path: PathBuf, reason: String },

    /// A generator strategy failed while rendering its artifact. The run
    /// controller treats this as fatal: a partial artifact is worse than none.
    #[error("generation of target '{target}' ({filename}) failed: {reason}")]
    Generation {
        target: String,
        filename: String,
        reason: String,
    },

    /// Could not open a diagnostic/error stream or write the artifact.
    #[error("cannot open {}: {source}", path.display())]
    Stream {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type VkGenResult<T> = Result<T, VkGenError>;

/// An inconsistency found by the registry's group validation pass.
/// Reported on the error/warning stream, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    pub message: String,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "warning: {}", self.message)
    }
}
