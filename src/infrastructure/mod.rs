//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces:
//! the TOML config file, the filesystem marker and the terminal spinner.

pub mod config;
pub mod marker;
pub mod surface;

// Re-export adapters
pub use config::XdgConfigStore;
pub use marker::{FsReadyMarker, MARKER_FILE_NAME};
pub use surface::TerminalSurface;
