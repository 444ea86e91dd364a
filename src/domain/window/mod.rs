//! Presentational window model: placement and animation

pub mod geometry;
pub mod progress;

pub use geometry::{Rect, Size, WindowGeometry, SPLASH_HEIGHT, SPLASH_WIDTH};
pub use progress::IndeterminateBar;

/// Default window title
pub const DEFAULT_TITLE: &str = "Loading";

/// Default caption under the progress bar
pub const DEFAULT_CAPTION: &str = "Loading The Inverse Path...";

/// Static text shown by a loading surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplashContent {
    pub title: String,
    pub caption: String,
}

impl Default for SplashContent {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            caption: DEFAULT_CAPTION.to_string(),
        }
    }
}
