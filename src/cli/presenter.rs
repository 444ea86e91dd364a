//! CLI presenter for output formatting

use colored::*;

/// Presenter for CLI output formatting.
///
/// Status goes to stderr; stdout only carries command output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Presenter {
    verbose: bool,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self::default()
    }

    /// Presenter that also prints debug messages
    pub fn verbose(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Print a diagnostic to stderr (only with --verbose)
    pub fn debug(&self, message: &str) {
        if self.verbose {
            eprintln!("{} {}", "·".dimmed(), message.dimmed());
        }
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}
