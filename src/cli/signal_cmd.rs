//! Marker subcommands: `signal` and `marker-path`

use std::path::PathBuf;

use crate::application::ports::{MarkerError, ReadinessProbe};
use crate::infrastructure::FsReadyMarker;

use super::presenter::Presenter;

/// Write the readiness marker the launcher is waiting for
pub fn handle_signal_command(
    marker: Option<PathBuf>,
    presenter: &Presenter,
) -> Result<(), MarkerError> {
    let marker = FsReadyMarker::resolve(marker)?;
    marker.publish()?;
    presenter.success(&format!("Signalled {}", marker.location().display()));
    Ok(())
}

/// Print the marker path the launcher would watch
pub fn handle_marker_path_command(
    marker: Option<PathBuf>,
    presenter: &Presenter,
) -> Result<(), MarkerError> {
    let marker = FsReadyMarker::resolve(marker)?;
    presenter.output(&marker.location().to_string_lossy());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn signal_writes_marker() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".ready");

        handle_signal_command(Some(path.clone()), &Presenter::new()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "ready");
    }

    #[test]
    fn signal_fails_when_directory_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(".ready");

        let result = handle_signal_command(Some(path), &Presenter::new());
        assert!(matches!(result, Err(MarkerError::Publish { .. })));
    }
}
