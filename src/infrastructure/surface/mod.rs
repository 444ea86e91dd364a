//! Loading surface adapters available on every platform

mod terminal;

pub use terminal::TerminalSurface;
