//! Launcher configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::launcher::SurfaceBackend;
use crate::domain::schedule::PollInterval;
use crate::domain::window::{SplashContent, DEFAULT_CAPTION, DEFAULT_TITLE};

/// Window text and font configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub title: Option<String>,
    pub caption: Option<String>,
    pub font: Option<String>,
}

/// Launcher configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherConfig {
    pub marker: Option<String>,
    pub poll_interval: Option<String>,
    pub backend: Option<String>,
    pub window: Option<WindowConfig>,
}

impl LauncherConfig {
    /// Create config with default values.
    ///
    /// `marker` stays unset: its default depends on where the executable
    /// lives and is resolved at launch.
    pub fn defaults() -> Self {
        Self {
            marker: None,
            poll_interval: Some(PollInterval::default_poll().to_string()),
            backend: Some(SurfaceBackend::Auto.to_string()),
            window: Some(WindowConfig {
                title: Some(DEFAULT_TITLE.to_string()),
                caption: Some(DEFAULT_CAPTION.to_string()),
                font: None,
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            marker: other.marker.or(self.marker),
            poll_interval: other.poll_interval.or(self.poll_interval),
            backend: other.backend.or(self.backend),
            window: Self::merge_window_config(self.window, other.window),
        }
    }

    fn merge_window_config(
        base: Option<WindowConfig>,
        other: Option<WindowConfig>,
    ) -> Option<WindowConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(WindowConfig {
                title: o.title.or(b.title),
                caption: o.caption.or(b.caption),
                font: o.font.or(b.font),
            }),
        }
    }

    /// Explicit marker path, if one was configured
    pub fn marker_path(&self) -> Option<PathBuf> {
        self.marker
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
    }

    /// Get poll interval, or 100ms if not set/invalid
    pub fn poll_interval_or_default(&self) -> PollInterval {
        self.poll_interval
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get backend, or auto if not set/invalid
    pub fn backend_or_default(&self) -> SurfaceBackend {
        self.backend
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Window title and caption, falling back to the built-in text
    pub fn content_or_default(&self) -> SplashContent {
        let window = self.window.as_ref();
        let defaults = SplashContent::default();
        SplashContent {
            title: window
                .and_then(|w| w.title.clone())
                .unwrap_or(defaults.title),
            caption: window
                .and_then(|w| w.caption.clone())
                .unwrap_or(defaults.caption),
        }
    }

    /// Caption font path, if configured
    pub fn font_path(&self) -> Option<PathBuf> {
        self.window
            .as_ref()
            .and_then(|w| w.font.as_deref())
            .map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = LauncherConfig::defaults();
        assert!(config.marker.is_none());
        assert_eq!(config.poll_interval, Some("100ms".to_string()));
        assert_eq!(config.backend, Some("auto".to_string()));
        let window = config.window.as_ref().unwrap();
        assert_eq!(window.title.as_deref(), Some("Loading"));
        assert_eq!(window.caption.as_deref(), Some("Loading The Inverse Path..."));
        assert!(window.font.is_none());
    }

    #[test]
    fn empty_has_all_none() {
        let config = LauncherConfig::empty();
        assert!(config.marker.is_none());
        assert!(config.poll_interval.is_none());
        assert!(config.backend.is_none());
        assert!(config.window.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = LauncherConfig {
            marker: Some("/opt/game/.ready".to_string()),
            poll_interval: Some("100ms".to_string()),
            ..Default::default()
        };
        let other = LauncherConfig {
            marker: None,
            poll_interval: Some("50ms".to_string()),
            backend: Some("terminal".to_string()),
            ..Default::default()
        };

        let merged = base.merge(other);
        assert_eq!(merged.marker, Some("/opt/game/.ready".to_string()));
        assert_eq!(merged.poll_interval, Some("50ms".to_string()));
        assert_eq!(merged.backend, Some("terminal".to_string()));
    }

    #[test]
    fn merge_window_sections_field_by_field() {
        let base = LauncherConfig::defaults();
        let other = LauncherConfig {
            window: Some(WindowConfig {
                caption: Some("Almost there...".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let merged = base.merge(other);
        let content = merged.content_or_default();
        assert_eq!(content.title, "Loading");
        assert_eq!(content.caption, "Almost there...");
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = LauncherConfig {
            poll_interval: Some("soon".to_string()),
            backend: Some("cocoa".to_string()),
            ..Default::default()
        };
        assert_eq!(config.poll_interval_or_default(), PollInterval::default_poll());
        assert_eq!(config.backend_or_default(), SurfaceBackend::Auto);
    }

    #[test]
    fn blank_marker_is_ignored() {
        let config = LauncherConfig {
            marker: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(config.marker_path().is_none());
    }

    #[test]
    fn content_defaults_without_window_section() {
        assert_eq!(LauncherConfig::empty().content_or_default(), SplashContent::default());
    }
}
