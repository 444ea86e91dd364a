//! Surface backend selection value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidBackendError;

/// All selectable backends
pub const ALL_BACKENDS: &[SurfaceBackend] = &[
    SurfaceBackend::Auto,
    SurfaceBackend::LayerShell,
    SurfaceBackend::Window,
    SurfaceBackend::Terminal,
];

/// Where the loading indicator is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SurfaceBackend {
    /// First windowed surface that starts, terminal spinner otherwise
    #[default]
    Auto,
    /// Wayland layer-shell overlay window (Linux only)
    LayerShell,
    /// Always-on-top desktop window (X11, Wayland, macOS, Windows)
    Window,
    /// Spinner on stderr
    Terminal,
}

impl SurfaceBackend {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::LayerShell => "layer-shell",
            Self::Window => "window",
            Self::Terminal => "terminal",
        }
    }
}

impl FromStr for SurfaceBackend {
    type Err = InvalidBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "layer-shell" | "layer_shell" | "wayland" => Ok(Self::LayerShell),
            "window" | "winit" => Ok(Self::Window),
            "terminal" | "tty" => Ok(Self::Terminal),
            _ => Err(InvalidBackendError { input: s.to_string() }),
        }
    }
}

impl fmt::Display for SurfaceBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
