//! ready-splash - loading window for The Inverse Path
//!
//! Shows a small always-on-top "Loading" window with an indeterminate
//! progress bar until the game writes its readiness marker, then removes
//! the marker and exits.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Launcher state, poll scheduling, window geometry, config, and errors
//! - **Application**: The wait-for-ready use case and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (marker file, XDG config, terminal spinner)
//! - **CLI**: Command-line interface, argument parsing, and signal handling
//! - **GUI**: Loading window (Wayland layer-shell overlay on Linux, winit window elsewhere)

pub mod application;
pub mod cli;
pub mod domain;
pub mod gui;
pub mod infrastructure;
