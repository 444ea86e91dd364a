//! Filesystem readiness marker adapter

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::application::ports::{MarkerError, ReadinessProbe};

/// File name of the marker next to the executable
pub const MARKER_FILE_NAME: &str = ".ready";

/// What the game writes into the marker (readers ignore it)
pub const MARKER_CONTENT: &str = "ready";

/// Readiness marker backed by a plain file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsReadyMarker {
    path: PathBuf,
}

impl FsReadyMarker {
    /// Marker at an explicit path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Marker inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::with_path(dir.as_ref().join(MARKER_FILE_NAME))
    }

    /// Marker in the directory of the running executable.
    ///
    /// Symlinks are resolved so a launcher started through a link still
    /// watches the install directory.
    pub fn beside_executable() -> Result<Self, MarkerError> {
        let exe = env::current_exe().map_err(MarkerError::ExecutableUnknown)?;
        let exe = fs::canonicalize(&exe).unwrap_or(exe);
        let dir = exe.parent().ok_or_else(|| {
            MarkerError::ExecutableUnknown(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} has no parent directory", exe.display()),
            ))
        })?;
        Ok(Self::in_dir(dir))
    }

    /// Explicit path if given, otherwise next to the executable
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self, MarkerError> {
        match explicit {
            Some(path) => Ok(Self::with_path(path)),
            None => Self::beside_executable(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the marker, as the game does once it has finished loading.
    pub fn publish(&self) -> Result<(), MarkerError> {
        fs::write(&self.path, MARKER_CONTENT).map_err(|source| MarkerError::Publish {
            path: self.path.clone(),
            source,
        })
    }
}

impl ReadinessProbe for FsReadyMarker {
    fn is_ready(&self) -> bool {
        self.path.try_exists().unwrap_or(false)
    }

    fn consume(&self) -> Result<(), MarkerError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(MarkerError::Cleanup {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
