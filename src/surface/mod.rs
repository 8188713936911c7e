//! Text surfaces: where the document being edited lives
//!
//! A surface hands out its full text and accepts a full replacement. The
//! session never keeps its own copy of the document between operations.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Surface is read-only")]
    ReadOnly,
}

/// Editable text owned outside the reconciler
#[cfg_attr(test, mockall::automock)]
pub trait TextSurface {
    fn read_text(&self) -> Result<String, SurfaceError>;
    fn write_text(&mut self, text: &str) -> Result<(), SurfaceError>;
}

/// A UTF-8 file on disk.
#[derive(Debug, Clone)]
pub struct FileSurface {
    path: PathBuf,
}

impl FileSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TextSurface for FileSurface {
    fn read_text(&self) -> Result<String, SurfaceError> {
        debug!("Reading text from {}", self.path.display());
        fs::read_to_string(&self.path).map_err(|source| SurfaceError::Read {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn write_text(&mut self, text: &str) -> Result<(), SurfaceError> {
        debug!("Writing {} bytes to {}", text.len(), self.path.display());
        fs::write(&self.path, text).map_err(|source| SurfaceError::Write {
            path: self.path.display().to_string(),
            source,
        })
    }
}

/// In-memory buffer, used for previews and by the CLI when not editing in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySurface {
    text: String,
    read_only: bool,
}

impl MemorySurface {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            read_only: false,
        }
    }

    /// A buffer that rejects every write with `SurfaceError::ReadOnly`.
    pub fn read_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            read_only: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl TextSurface for MemorySurface {
    fn read_text(&self) -> Result<String, SurfaceError> {
        Ok(self.text.clone())
    }

    fn write_text(&mut self, text: &str) -> Result<(), SurfaceError> {
        if self.read_only {
            return Err(SurfaceError::ReadOnly);
        }
        self.text = text.to_string();
        Ok(())
    }
}
