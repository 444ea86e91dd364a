//! Readiness marker adapters

mod fs;

pub use fs::{FsReadyMarker, MARKER_CONTENT, MARKER_FILE_NAME};
