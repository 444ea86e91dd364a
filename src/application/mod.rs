//! Application layer - Use cases and port interfaces
//!
//! Contains the core launcher operation and trait definitions
//! for external system interactions.

pub mod ports;
pub mod wait_ready;

// Re-export use cases
pub use wait_ready::{
    WaitCallbacks, WaitError, WaitForReadyUseCase, WaitOptions, WaitOutcome,
    DEFAULT_FRAME_INTERVAL,
};
