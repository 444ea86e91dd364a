//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! and the launcher runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;
pub mod signal_cmd;
pub mod signals;

// Re-export commonly used types
pub use app::{
    load_merged_config, run_launcher, EXIT_ERROR, EXIT_INTERRUPTED, EXIT_SUCCESS,
    EXIT_USAGE_ERROR,
};
pub use args::{Cli, Commands, ConfigAction, LaunchOptions};
pub use presenter::Presenter;
