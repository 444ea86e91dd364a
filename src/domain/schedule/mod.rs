//! Timing value objects

pub mod interval;
pub mod ticker;

pub use interval::{PollInterval, DEFAULT_POLL_INTERVAL_MS};
pub use ticker::Ticker;
