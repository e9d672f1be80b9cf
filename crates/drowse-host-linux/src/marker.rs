//! The "just woke up" marker file
//!
//! A resume hook (e.g. a systemd sleep hook) creates the file after the
//! machine comes back from suspend; the daemon consumes it on its next tick.

use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct WokeUpMarker {
    path: PathBuf,
}

impl WokeUpMarker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns whether the marker was present, deleting it if so.
    ///
    /// A marker that cannot be deleted still counts as present.
    pub fn take(&self) -> bool {
        self.take_with(|path| std::fs::remove_file(path))
    }

    fn take_with(&self, remove: impl FnOnce(&Path) -> io::Result<()>) -> bool {
        if !self.path.is_file() {
            return false;
        }

        info!(path = %self.path.display(), "Found woke-up marker");
        if let Err(e) = remove(&self.path) {
            warn!(path = %self.path.display(), error = %e, "Failed to remove woke-up marker");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_marker() {
        let dir = tempfile::tempdir().unwrap();
        let marker = WokeUpMarker::new(dir.path().join("woke"));
        assert!(!marker.take());
    }

    #[test]
    fn marker_is_consumed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("woke");
        std::fs::write(&path, b"").unwrap();

        let marker = WokeUpMarker::new(&path);
        assert!(marker.take());
        assert!(!path.exists());
        assert!(!marker.take());
    }

    #[test]
    fn directory_is_not_a_marker() {
        let dir = tempfile::tempdir().unwrap();
        let marker = WokeUpMarker::new(dir.path());
        assert!(!marker.take());
        assert!(dir.path().exists());
    }

    #[test]
    fn undeletable_marker_still_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("woke");
        std::fs::write(&path, b"").unwrap();

        let marker = WokeUpMarker::new(&path);
        let taken = marker.take_with(|_| Err(io::Error::from(io::ErrorKind::PermissionDenied)));
        assert!(taken);
        assert!(path.exists());

        // Still there, so the next tick sees it again
        assert!(marker.take());
        assert!(!path.exists());
    }

    #[test]
    fn procfs_marker_cannot_be_removed() {
        // procfs entries are regular files that not even root may unlink
        let marker = WokeUpMarker::new("/proc/version");
        if !marker.path().is_file() {
            return;
        }
        assert!(marker.take());
        assert!(marker.path().exists());
    }
}
