pub mod backend;
pub mod session;

pub use backend::{SurfaceBackend, ALL_BACKENDS};
pub use session::{LauncherSession, LauncherState};
