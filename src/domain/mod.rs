//! Domain layer - Core launcher logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod launcher;
pub mod schedule;
pub mod window;

// Re-export common types
pub use config::{LauncherConfig, WindowConfig};
pub use error::*;
pub use launcher::{LauncherSession, LauncherState, SurfaceBackend};
pub use schedule::{PollInterval, Ticker};
pub use window::{IndeterminateBar, Rect, Size, SplashContent, WindowGeometry};
