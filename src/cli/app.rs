//! Launcher runner

use std::env;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;

use crate::application::ports::{ConfigStore, LoadingSurface, MarkerError, ReadinessProbe};
use crate::application::{
    WaitCallbacks, WaitForReadyUseCase, WaitOptions, WaitOutcome, DEFAULT_FRAME_INTERVAL,
};
use crate::domain::config::LauncherConfig;
use crate::domain::launcher::SurfaceBackend;
use crate::gui;
use crate::infrastructure::{FsReadyMarker, TerminalSurface, XdgConfigStore};

use super::args::LaunchOptions;
use super::presenter::Presenter;
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;
pub const EXIT_INTERRUPTED: u8 = 130;

/// Environment override for the marker path
pub const MARKER_ENV: &str = "READY_SPLASH_MARKER";

const NO_FONT: &str = "No usable font found; window text is skipped";

/// Show the loading surface until the marker appears.
///
/// The wait loop owns the surface and stays on the main thread, which some
/// windowing systems require; the runtime workers only service the signal
/// listeners.
pub async fn run_launcher(options: LaunchOptions, presenter: Presenter) -> ExitCode {
    let shutdown = ShutdownSignal::new();
    if let Err(e) = shutdown.setup().await {
        presenter.error(&format!("Failed to setup signal handler: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    let flag = shutdown.flag();
    tokio::task::block_in_place(move || launch(options, presenter, &flag))
}

fn launch(options: LaunchOptions, presenter: Presenter, shutdown: &AtomicBool) -> ExitCode {
    let marker = match FsReadyMarker::resolve(options.marker.clone()) {
        Ok(marker) => marker,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    presenter.debug(&format!(
        "Watching {} every {}",
        marker.location().display(),
        options.poll_interval
    ));

    let wait = WaitOptions {
        poll_interval: options.poll_interval,
        frame_interval: DEFAULT_FRAME_INTERVAL,
        content: options.content.clone(),
    };

    match options.backend {
        SurfaceBackend::Terminal => wait_on(TerminalSurface::new(), marker, wait, presenter, shutdown),
        SurfaceBackend::LayerShell => launch_layer_shell(&options, marker, wait, presenter, shutdown),
        SurfaceBackend::Window => launch_window(&options, marker, wait, presenter, shutdown),
        SurfaceBackend::Auto => launch_auto(&options, marker, wait, presenter, shutdown),
    }
}

#[cfg(target_os = "linux")]
fn launch_layer_shell(
    options: &LaunchOptions,
    marker: FsReadyMarker,
    wait: WaitOptions,
    presenter: Presenter,
    shutdown: &AtomicBool,
) -> ExitCode {
    match gui::LayerShellSurface::connect(options.font.as_deref()) {
        Ok(surface) => {
            if !surface.has_font() {
                presenter.debug(NO_FONT);
            }
            wait_on(surface, marker, wait, presenter, shutdown)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

#[cfg(not(target_os = "linux"))]
fn launch_layer_shell(
    _options: &LaunchOptions,
    _marker: FsReadyMarker,
    _wait: WaitOptions,
    presenter: Presenter,
    _shutdown: &AtomicBool,
) -> ExitCode {
    presenter.error("The layer-shell backend needs Linux with a Wayland compositor");
    ExitCode::from(EXIT_ERROR)
}

#[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
fn launch_window(
    options: &LaunchOptions,
    marker: FsReadyMarker,
    wait: WaitOptions,
    presenter: Presenter,
    shutdown: &AtomicBool,
) -> ExitCode {
    match gui::WindowSurface::connect(options.font.as_deref()) {
        Ok(surface) => {
            if !surface.has_font() {
                presenter.debug(NO_FONT);
            }
            wait_on(surface, marker, wait, presenter, shutdown)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn launch_window(
    _options: &LaunchOptions,
    _marker: FsReadyMarker,
    _wait: WaitOptions,
    presenter: Presenter,
    _shutdown: &AtomicBool,
) -> ExitCode {
    presenter.error("The window backend is not supported on this platform");
    ExitCode::from(EXIT_ERROR)
}

/// Layer-shell overlay, then a desktop window, then the terminal spinner.
fn launch_auto(
    options: &LaunchOptions,
    marker: FsReadyMarker,
    wait: WaitOptions,
    presenter: Presenter,
    shutdown: &AtomicBool,
) -> ExitCode {
    #[cfg(target_os = "linux")]
    {
        match gui::LayerShellSurface::connect(options.font.as_deref()) {
            Ok(surface) => return wait_on(surface, marker, wait, presenter, shutdown),
            Err(e) => presenter.debug(&format!("Layer-shell unavailable ({}), trying a window", e)),
        }
    }

    #[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
    {
        match gui::WindowSurface::connect(options.font.as_deref()) {
            Ok(surface) => return wait_on(surface, marker, wait, presenter, shutdown),
            Err(e) => presenter.warn(&format!(
                "No loading window available ({}); showing progress in the terminal",
                e
            )),
        }
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    let _ = options;

    wait_on(TerminalSurface::new(), marker, wait, presenter, shutdown)
}

fn wait_on<S: LoadingSurface>(
    surface: S,
    marker: FsReadyMarker,
    options: WaitOptions,
    presenter: Presenter,
    shutdown: &AtomicBool,
) -> ExitCode {
    let callbacks = launch_callbacks(presenter);
    let mut use_case = WaitForReadyUseCase::new(marker, surface, options);

    match use_case.run(shutdown, &callbacks) {
        Ok(WaitOutcome::Ready) => {
            presenter.debug(&format!("Ready after {} checks", use_case.checks()));
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(WaitOutcome::Interrupted) => {
            presenter.debug("Interrupted before the marker appeared");
            ExitCode::from(EXIT_INTERRUPTED)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Marker problems are diagnostics only; they never change the outcome.
fn launch_callbacks(presenter: Presenter) -> WaitCallbacks {
    WaitCallbacks {
        on_shown: Some(Box::new(move |backend: &str| {
            presenter.debug(&format!("Showing loading indicator ({})", backend));
        })),
        on_marker_detected: Some(Box::new(move || {
            presenter.debug("Readiness marker found");
        })),
        on_cleanup_failed: Some(Box::new(move |e: &MarkerError| {
            presenter.debug(&e.to_string());
        })),
        on_surface_lost: Some(Box::new(move || {
            presenter.debug("Window closed by the compositor; still waiting for the marker");
        })),
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: LauncherConfig) -> LauncherConfig {
    let store = XdgConfigStore::new();
    let file_config = store
        .load()
        .await
        .unwrap_or_else(|_| LauncherConfig::empty());

    let env_config = LauncherConfig {
        marker: env::var(MARKER_ENV).ok().filter(|s| !s.trim().is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    LauncherConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::domain::schedule::PollInterval;
    use crate::domain::window::SplashContent;

    fn options(marker: std::path::PathBuf) -> LaunchOptions {
        LaunchOptions {
            marker: Some(marker),
            poll_interval: PollInterval::from_millis(5),
            backend: SurfaceBackend::Terminal,
            content: SplashContent::default(),
            font: None,
        }
    }

    #[test]
    fn launch_exits_success_when_marker_present() {
        let dir = tempfile::tempdir().unwrap();
        let marker = FsReadyMarker::in_dir(dir.path());
        marker.publish().unwrap();

        let shutdown = AtomicBool::new(false);
        let code = wait_on(
            TerminalSurface::hidden(),
            marker.clone(),
            WaitOptions {
                poll_interval: PollInterval::from_millis(5),
                frame_interval: Duration::from_millis(5),
                content: SplashContent::default(),
            },
            Presenter::new(),
            &shutdown,
        );

        assert_eq!(code, ExitCode::from(EXIT_SUCCESS));
        assert!(!marker.is_ready());
    }

    #[test]
    fn launch_reports_interrupt() {
        let dir = tempfile::tempdir().unwrap();
        let shutdown = AtomicBool::new(true);
        let code = launch(options(dir.path().join(".ready")), Presenter::new(), &shutdown);
        assert_eq!(code, ExitCode::from(EXIT_INTERRUPTED));
    }
}
