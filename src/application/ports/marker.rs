//! Readiness marker port
//!
//! The marker is a sentinel whose existence means "the game finished
//! loading". Content is never inspected.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors around the readiness marker
#[derive(Error, Debug)]
pub enum MarkerError {
    /// The running executable's location could not be determined
    #[error("Cannot locate the running executable: {0}")]
    ExecutableUnknown(#[source] std::io::Error),

    /// The marker exists but could not be removed
    #[error("Failed to remove marker {}: {source}", path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The marker could not be written
    #[error("Failed to write marker {}: {source}", path.display())]
    Publish {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Port for observing and consuming the readiness marker
pub trait ReadinessProbe {
    /// Whether the marker currently exists. I/O errors count as absent.
    fn is_ready(&self) -> bool;

    /// Remove the marker. A marker that is already gone is not an error.
    fn consume(&self) -> Result<(), MarkerError>;

    /// Where the marker is expected
    fn location(&self) -> &Path;
}
