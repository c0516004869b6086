//! Destinations for exported artifacts

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;

/// Receives a finished export, the way a browser receives a download.
#[cfg_attr(test, automock)]
pub trait DownloadSink: Send + Sync {
    /// Stores `content` under `filename` and returns where it ended up.
    fn deliver(
        &self,
        filename: &str,
        mime_type: &str,
        content: &[u8],
    ) -> Result<PathBuf, std::io::Error>;
}

/// Writes exports into a directory, creating it if needed. Existing files are overwritten.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(
        &self,
        filename: &str,
        _mime_type: &str,
        content: &[u8],
    ) -> Result<PathBuf, std::io::Error> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);
        fs::write(&path, content)?;
        Ok(path)
    }
}
