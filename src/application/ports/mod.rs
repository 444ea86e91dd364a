//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod marker;
pub mod surface;

// Re-export common types
pub use config::ConfigStore;
pub use marker::{MarkerError, ReadinessProbe};
pub use surface::{LoadingSurface, SurfaceError};
