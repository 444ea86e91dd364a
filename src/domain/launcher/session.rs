//! Launcher session state machine

use std::fmt;

/// Launcher states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LauncherState {
    #[default]
    Displaying,
    Terminating,
}

impl LauncherState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Displaying => "displaying",
            Self::Terminating => "terminating",
        }
    }
}

impl fmt::Display for LauncherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Launcher session entity.
///
/// State machine:
///   DISPLAYING -> DISPLAYING  (tick, marker absent)
///   DISPLAYING -> TERMINATING (tick, marker present)
///
/// TERMINATING is terminal; observations after it are ignored.
#[derive(Debug, Default)]
pub struct LauncherSession {
    state: LauncherState,
    observations: u64,
}

impl LauncherSession {
    /// Create a new session in the displaying state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state
    pub fn state(&self) -> LauncherState {
        self.state
    }

    pub fn is_displaying(&self) -> bool {
        self.state == LauncherState::Displaying
    }

    pub fn is_terminating(&self) -> bool {
        self.state == LauncherState::Terminating
    }

    /// Number of marker checks recorded while displaying
    pub fn observations(&self) -> u64 {
        self.observations
    }

    /// Record the result of one marker check.
    ///
    /// Returns true only for the observation that moves the session into
    /// TERMINATING.
    pub fn observe(&mut self, marker_present: bool) -> bool {
        if self.state == LauncherState::Terminating {
            return false;
        }

        self.observations += 1;
        if marker_present {
            self.state = LauncherState::Terminating;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_displaying() {
        let session = LauncherSession::new();
        assert!(session.is_displaying());
        assert!(!session.is_terminating());
        assert_eq!(session.observations(), 0);
    }

    #[test]
    fn absent_marker_keeps_displaying() {
        let mut session = LauncherSession::new();
        for _ in 0..50 {
            assert!(!session.observe(false));
        }
        assert!(session.is_displaying());
        assert_eq!(session.observations(), 50);
    }

    #[test]
    fn present_marker_terminates() {
        let mut session = LauncherSession::new();
        assert!(!session.observe(false));
        assert!(session.observe(true));
        assert_eq!(session.state(), LauncherState::Terminating);
    }

    #[test]
    fn terminating_is_terminal() {
        let mut session = LauncherSession::new();
        assert!(session.observe(true));
        assert!(!session.observe(true));
        assert!(!session.observe(false));
        assert!(session.is_terminating());
        assert_eq!(session.observations(), 1);
    }

    #[test]
    fn state_display() {
        assert_eq!(LauncherState::Displaying.to_string(), "displaying");
        assert_eq!(LauncherState::Terminating.to_string(), "terminating");
    }
}
