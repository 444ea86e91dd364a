pub mod launcher_config;

pub use launcher_config::{LauncherConfig, WindowConfig};
