use std::path::{Path, PathBuf};

/// Input list for ffmpeg's concat demuxer (`-f concat`).
///
/// Each entry becomes a `file '<path>'` line. Single quotes inside a path are
/// closed, escaped and reopened (`'\''`); line breaks and NUL cannot be
/// expressed in the format at all and are refused.
#[derive(Debug, Clone, Default)]
pub struct ConcatManifest {
    entries: Vec<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Path cannot be listed in a concat manifest: {0:?}")]
    UnrepresentablePath(PathBuf),

    #[error("Concat manifest needs absolute paths, got {0:?}")]
    RelativePath(PathBuf),
}

impl ConcatManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<PathBuf>) {
        self.entries.push(path.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn render(&self) -> Result<String, ManifestError> {
        let mut out = String::new();
        for path in &self.entries {
            out.push_str("file ");
            out.push_str(&quote_path(path)?);
            out.push('\n');
        }
        Ok(out)
    }
}

fn quote_path(path: &Path) -> Result<String, ManifestError> {
    if !path.is_absolute() {
        return Err(ManifestError::RelativePath(path.to_path_buf()));
    }
    let raw = path
        .to_str()
        .ok_or_else(|| ManifestError::UnrepresentablePath(path.to_path_buf()))?;
    if raw.contains(['\n', '\r', '\0']) {
        return Err(ManifestError::UnrepresentablePath(path.to_path_buf()));
    }

    let mut quoted = String::with_capacity(raw.len() + 2);
    quoted.push('\'');
    for ch in raw.chars() {
        if ch == '\'' {
            quoted.push_str("'\\''");
        } else {
            quoted.push(ch);
        }
    }
    quoted.push('\'');
    Ok(quoted)
}
