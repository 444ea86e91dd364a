//! ready-splash CLI entry point

use std::process::ExitCode;

use clap::Parser;

use ready_splash::cli::{
    app::{load_merged_config, run_launcher, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands, LaunchOptions},
    config_cmd::handle_config_command,
    presenter::Presenter,
    signal_cmd::{handle_marker_path_command, handle_signal_command},
};
use ready_splash::domain::config::{LauncherConfig, WindowConfig};
use ready_splash::domain::launcher::SurfaceBackend;
use ready_splash::domain::schedule::PollInterval;
use ready_splash::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::verbose(cli.verbose);

    // Build CLI config from args
    let window = if cli.title.is_some() || cli.caption.is_some() || cli.font.is_some() {
        Some(WindowConfig {
            title: cli.title.clone(),
            caption: cli.caption.clone(),
            font: cli.font.as_ref().map(|p| p.to_string_lossy().into_owned()),
        })
    } else {
        None
    };
    let cli_config = LauncherConfig {
        marker: cli.marker.as_ref().map(|p| p.to_string_lossy().into_owned()),
        poll_interval: cli.poll_interval.clone(),
        backend: cli.backend.map(|b| SurfaceBackend::from(b).to_string()),
        window,
    };

    // Handle subcommands
    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Signal { marker }) => {
            let config = load_merged_config(cli_config).await;
            let target = marker.or_else(|| config.marker_path());
            if let Err(e) = handle_signal_command(target, &presenter) {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::MarkerPath) => {
            let config = load_merged_config(cli_config).await;
            if let Err(e) = handle_marker_path_command(config.marker_path(), &presenter) {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        None => {}
    }

    // Merge config
    let config = load_merged_config(cli_config).await;

    // Invalid values given on the command line are usage errors; bad file
    // values fall back to the defaults.
    let poll_interval = match cli.poll_interval.as_deref() {
        Some(s) => match s.parse::<PollInterval>() {
            Ok(interval) => interval,
            Err(e) => {
                presenter.error(&format!("Invalid poll-interval: {}", e));
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
        },
        None => config.poll_interval_or_default(),
    };

    let options = LaunchOptions {
        marker: config.marker_path(),
        poll_interval,
        backend: config.backend_or_default(),
        content: config.content_or_default(),
        font: config.font_path(),
    };

    run_launcher(options, presenter).await
}
