//! Terminal loading surface
//!
//! Draws an indicatif spinner on stderr. The spinner is ticked from the
//! launcher loop instead of a steady-tick thread, so animation and marker
//! checks share one thread like the windowed surface.

use std::thread;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::application::ports::{LoadingSurface, SurfaceError};
use crate::domain::window::SplashContent;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ";

/// Spinner-based loading indicator
pub struct TerminalSurface {
    spinner: Option<ProgressBar>,
    hidden: bool,
}

impl TerminalSurface {
    /// Spinner drawn to stderr
    pub fn new() -> Self {
        Self {
            spinner: None,
            hidden: false,
        }
    }

    /// Spinner that never draws anything
    pub fn hidden() -> Self {
        Self {
            spinner: None,
            hidden: true,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.spinner.is_some()
    }

    /// Current spinner message, if shown
    pub fn message(&self) -> Option<String> {
        self.spinner.as_ref().map(|s| s.message())
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingSurface for TerminalSurface {
    fn name(&self) -> &'static str {
        "terminal"
    }

    fn show(&mut self, content: &SplashContent) -> Result<(), SurfaceError> {
        let style = ProgressStyle::default_spinner()
            .tick_chars(TICK_CHARS)
            .template("{spinner:.cyan} {prefix:.bold} {msg}")
            .map_err(|e| SurfaceError::Backend(e.to_string()))?;

        let target = if self.hidden {
            ProgressDrawTarget::hidden()
        } else {
            ProgressDrawTarget::stderr()
        };

        let spinner = ProgressBar::with_draw_target(None, target);
        spinner.set_style(style);
        spinner.set_prefix(content.title.clone());
        spinner.set_message(content.caption.clone());
        spinner.tick();
        self.spinner = Some(spinner);
        Ok(())
    }

    fn animate(&mut self, _elapsed: Duration) -> Result<(), SurfaceError> {
        if let Some(ref spinner) = self.spinner {
            spinner.tick();
        }
        Ok(())
    }

    fn pump(&mut self, timeout: Duration) -> Result<(), SurfaceError> {
        // No event source to wait on.
        thread::sleep(timeout);
        Ok(())
    }

    fn close(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        self.close();
    }
}
