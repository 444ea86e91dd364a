//! Wait-for-ready use case
//!
//! Keeps a loading surface on screen and checks the readiness marker on a
//! fixed period, all on the calling thread. Returns once the marker has been
//! seen (and removed) or a shutdown was requested.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::domain::launcher::{LauncherSession, LauncherState};
use crate::domain::schedule::{PollInterval, Ticker};
use crate::domain::window::SplashContent;

use super::ports::{LoadingSurface, MarkerError, ReadinessProbe, SurfaceError};

/// Default animation frame period (~30 fps)
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Errors from the wait-for-ready use case
#[derive(Debug, Error)]
pub enum WaitError {
    #[error("Loading surface failed: {0}")]
    Surface(#[from] SurfaceError),
}

/// How a wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The marker appeared and the launcher is terminating
    Ready,
    /// Shutdown was requested before the marker appeared
    Interrupted,
}

/// Timing parameters for the wait loop
#[derive(Debug, Clone)]
pub struct WaitOptions {
    pub poll_interval: PollInterval,
    pub frame_interval: Duration,
    pub content: SplashContent,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            poll_interval: PollInterval::default_poll(),
            frame_interval: DEFAULT_FRAME_INTERVAL,
            content: SplashContent::default(),
        }
    }
}

/// Callbacks for status updates
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct WaitCallbacks {
    /// Called once the surface is on screen, with the backend name
    pub on_shown: Option<Box<dyn Fn(&str) + Send + Sync>>,
    /// Called when the marker is first observed
    pub on_marker_detected: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called when the marker could not be removed (termination continues)
    pub on_cleanup_failed: Option<Box<dyn Fn(&MarkerError) + Send + Sync>>,
    /// Called when the display server closed the surface (polling continues)
    pub on_surface_lost: Option<Box<dyn Fn() + Send + Sync>>,
}

/// Wait-for-ready use case
pub struct WaitForReadyUseCase<P, S>
where
    P: ReadinessProbe,
    S: LoadingSurface,
{
    probe: P,
    surface: S,
    options: WaitOptions,
    session: LauncherSession,
    surface_lost: bool,
}

impl<P, S> WaitForReadyUseCase<P, S>
where
    P: ReadinessProbe,
    S: LoadingSurface,
{
    /// Create a new use case instance
    pub fn new(probe: P, surface: S, options: WaitOptions) -> Self {
        Self {
            probe,
            surface,
            options,
            session: LauncherSession::new(),
            surface_lost: false,
        }
    }

    /// Current launcher state
    pub fn state(&self) -> LauncherState {
        self.session.state()
    }

    /// Number of marker checks performed
    pub fn checks(&self) -> u64 {
        self.session.observations()
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// One poll tick: look for the marker and consume it if present.
    ///
    /// Returns true once the session is terminating. Removal failures are
    /// reported through the callback and never block termination.
    pub fn check(&mut self, callbacks: &WaitCallbacks) -> bool {
        if self.session.is_terminating() {
            return true;
        }

        let present = self.probe.is_ready();
        if self.session.observe(present) {
            if let Some(ref cb) = callbacks.on_marker_detected {
                cb();
            }
            if let Err(e) = self.probe.consume() {
                if let Some(ref cb) = callbacks.on_cleanup_failed {
                    cb(&e);
                }
            }
        }

        self.session.is_terminating()
    }

    /// Show the surface and loop until ready or `shutdown` is set.
    pub fn run(
        &mut self,
        shutdown: &AtomicBool,
        callbacks: &WaitCallbacks,
    ) -> Result<WaitOutcome, WaitError> {
        self.surface.show(&self.options.content)?;
        if let Some(ref cb) = callbacks.on_shown {
            cb(self.surface.name());
        }

        let start = Instant::now();
        let mut poll = Ticker::new(self.options.poll_interval.as_std(), start);
        let mut frame = Ticker::new(self.options.frame_interval, start);

        let outcome = loop {
            if shutdown.load(Ordering::SeqCst) {
                break WaitOutcome::Interrupted;
            }

            let now = Instant::now();
            if frame.poll(now) && !self.surface_lost {
                let animated = self.surface.animate(now.duration_since(start));
                self.absorb(animated, callbacks)?;
            }

            if poll.poll(now) && self.check(callbacks) {
                break WaitOutcome::Ready;
            }

            let now = Instant::now();
            let wait = poll.remaining(now).min(frame.remaining(now));
            if self.surface_lost {
                std::thread::sleep(wait);
            } else {
                let pumped = self.surface.pump(wait);
                self.absorb(pumped, callbacks)?;
            }
        };

        self.surface.close();
        Ok(outcome)
    }

    /// Turn a lost surface into headless polling; propagate other errors.
    fn absorb(
        &mut self,
        result: Result<(), SurfaceError>,
        callbacks: &WaitCallbacks,
    ) -> Result<(), WaitError> {
        match result {
            Ok(()) => Ok(()),
            Err(SurfaceError::Closed) => {
                self.surface_lost = true;
                if let Some(ref cb) = callbacks.on_surface_lost {
                    cb();
                }
                Ok(())
            }
            Err(e) => {
                self.surface.close();
                Err(WaitError::Surface(e))
            }
        }
    }
}
