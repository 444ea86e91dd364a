//! Loading surface port
//!
//! A surface owns whatever the platform needs to keep an indeterminate
//! progress indicator on screen. All methods are called from the launcher
//! loop thread; implementations need not be `Send`.

use std::time::Duration;

use thiserror::Error;

use crate::domain::window::SplashContent;

/// Errors reported by a loading surface
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// The display system is missing or lacks a required protocol
    #[error("Display unavailable: {0}")]
    Unavailable(String),

    /// The display server took the surface away
    #[error("Surface was closed by the display server")]
    Closed,

    /// Any other backend failure
    #[error("Surface error: {0}")]
    Backend(String),
}

/// Port trait for the on-screen loading indicator
pub trait LoadingSurface {
    /// Short backend name for diagnostics
    fn name(&self) -> &'static str;

    /// Put the indicator on screen with the given text.
    fn show(&mut self, content: &SplashContent) -> Result<(), SurfaceError>;

    /// Advance the indeterminate animation to `elapsed` since `show`.
    fn animate(&mut self, elapsed: Duration) -> Result<(), SurfaceError>;

    /// Process pending platform events, waiting at most `timeout`.
    fn pump(&mut self, timeout: Duration) -> Result<(), SurfaceError>;

    /// Tear the indicator down. Safe to call more than once.
    fn close(&mut self);
}
