use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirexError {
    // Lookup
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    // Platform
    #[error("unsupported host path convention")]
    UnsupportedPlatform,

    // Filesystem
    #[error("IO error at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DirexError {
    /// The path this error occurred at, if applicable.
    /// Callers use this to report "failed at: <path>" without pattern
    /// matching on variants.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound(p) | Self::NotADirectory(p) | Self::Io { path: p, .. } => Some(p),
            Self::UnsupportedPlatform => None,
        }
    }

    /// Wrap a `std::io::Error` with the path the failing call was given.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
