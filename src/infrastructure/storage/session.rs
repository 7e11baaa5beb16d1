use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// Temp files belonging to one combine request.
///
/// Every path handed out is registered and removed when the value is
/// dropped, together with any stray file in the temp root carrying the
/// session prefix (downloader `.part` files and the like). Removal errors
/// are logged and otherwise ignored.
#[derive(Debug)]
pub struct SessionFiles {
    token: Uuid,
    root: PathBuf,
    tracked: Vec<PathBuf>,
}

impl SessionFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            token: Uuid::new_v4(),
            root: root.into(),
            tracked: Vec::new(),
        }
    }

    pub fn token(&self) -> Uuid {
        self.token
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<token>_<index>.mp4`
    pub fn download_path(&mut self, index: usize) -> PathBuf {
        self.track(format!("{}_{}.mp4", self.token, index))
    }

    /// `<root>/<token>_list.txt`
    pub fn manifest_path(&mut self) -> PathBuf {
        self.track(format!("{}_list.txt", self.token))
    }

    /// `<root>/<token>_output.mp4`
    pub fn output_path(&mut self) -> PathBuf {
        self.track(format!("{}_output.mp4", self.token))
    }

    fn track(&mut self, name: String) -> PathBuf {
        let path = self.root.join(name);
        if !self.tracked.contains(&path) {
            self.tracked.push(path.clone());
        }
        path
    }

    /// Deletes a file early. It stays tracked, so a failure here is retried
    /// on drop.
    pub fn remove_now(&self, path: &Path) {
        Self::remove(path);
    }

    fn remove(path: &Path) {
        match fs::remove_file(path) {
            Ok(()) => debug!("Removed {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("Error deleting file {}: {}", path.display(), e),
        }
    }

    fn sweep_prefixed(&self) {
        let prefix = format!("{}_", self.token);
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Could not scan {} for leftovers: {}", self.root.display(), e);
                return;
            }
        };

        for entry in entries.flatten() {
            if entry.file_name().to_string_lossy().starts_with(&prefix) {
                Self::remove(&entry.path());
            }
        }
    }
}

impl Drop for SessionFiles {
    fn drop(&mut self) {
        for path in &self.tracked {
            Self::remove(path);
        }
        self.sweep_prefixed();
        debug!("Session {} cleaned up", self.token);
    }
}
