//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::launcher::SurfaceBackend;
use crate::domain::schedule::PollInterval;
use crate::domain::window::SplashContent;

/// ready-splash - loading window for The Inverse Path
#[derive(Parser, Debug)]
#[command(name = "ready-splash")]
#[command(version)]
#[command(about = "Shows a loading window until the game drops its readiness marker")]
#[command(long_about = None)]
pub struct Cli {
    /// Readiness marker to wait for (default: .ready next to this executable)
    #[arg(short = 'm', long, value_name = "PATH")]
    pub marker: Option<PathBuf>,

    /// How often to look for the marker (e.g., 100ms, 1s)
    #[arg(short = 'i', long, value_name = "TIME")]
    pub poll_interval: Option<String>,

    /// Window title
    #[arg(short = 't', long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Caption under the progress bar
    #[arg(short = 'c', long, value_name = "TEXT")]
    pub caption: Option<String>,

    /// Where to draw the indicator
    #[arg(short = 'b', long, value_name = "BACKEND")]
    pub backend: Option<BackendArg>,

    /// TrueType font for the window text
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Print diagnostics to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Write the readiness marker (what the game does once it has loaded)
    Signal {
        /// Marker to write (default: same resolution as the launcher)
        #[arg(short = 'm', long, value_name = "PATH")]
        marker: Option<PathBuf>,
    },
    /// Print the marker path the launcher would watch
    MarkerPath,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Backend argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    Auto,
    LayerShell,
    Window,
    Terminal,
}

impl From<BackendArg> for SurfaceBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Auto => SurfaceBackend::Auto,
            BackendArg::LayerShell => SurfaceBackend::LayerShell,
            BackendArg::Window => SurfaceBackend::Window,
            BackendArg::Terminal => SurfaceBackend::Terminal,
        }
    }
}

/// Parsed launcher options
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Explicit marker path; None means next to the executable
    pub marker: Option<PathBuf>,
    pub poll_interval: PollInterval,
    pub backend: SurfaceBackend,
    pub content: SplashContent,
    pub font: Option<PathBuf>,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "marker",
    "poll_interval",
    "backend",
    "window.title",
    "window.caption",
    "window.font",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
