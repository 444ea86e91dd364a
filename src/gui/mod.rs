//! GUI module for the loading window
//!
//! Two windowed surfaces share one software renderer: a Wayland layer-shell
//! overlay (Linux only) and a winit window for everything else.

pub mod font;
pub mod render;

#[cfg(target_os = "linux")]
pub mod layer_shell;
#[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
pub mod window;

#[cfg(target_os = "linux")]
pub use layer_shell::{LayerShellError, LayerShellSurface};
#[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
pub use window::{WindowError, WindowSurface};
