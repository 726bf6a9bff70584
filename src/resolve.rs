use std::path::PathBuf;

use crate::error::DirexError;

// ---------------------------------------------------------------------------
// OsFamily
// ---------------------------------------------------------------------------

/// The host's path-separator convention.
///
/// This is the entire interface direx needs from the operating system family:
/// whether paths are written with backslashes or forward slashes. Everything
/// else about the host is irrelevant to resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    /// Backslash-separated paths (Windows).
    Backslash,

    /// Forward-slash-separated paths (Unix and friends).
    ForwardSlash,
}

impl OsFamily {
    /// Detect the host's family at compile time.
    ///
    /// Returns `None` on targets that are neither Windows nor Unix —
    /// callers treat that as a resolution failure
    /// ([`DirexError::UnsupportedPlatform`]).
    pub fn host() -> Option<OsFamily> {
        if cfg!(windows) {
            Some(OsFamily::Backslash)
        } else if cfg!(unix) {
            Some(OsFamily::ForwardSlash)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Normalize `path` for the given family. Pure and stateless.
///
/// On a [`Backslash`](OsFamily::Backslash) host every `/` becomes `\`; on a
/// [`ForwardSlash`](OsFamily::ForwardSlash) host the path is returned
/// unchanged. Nothing further is done — no `..`/`.` collapsing, no symlink
/// resolution, no absolutization. The result is the canonical form used as
/// the registry cache key.
pub fn resolve_for(family: OsFamily, path: &str) -> String {
    match family {
        OsFamily::Backslash => path.replace('/', "\\"),
        OsFamily::ForwardSlash => path.to_string(),
    }
}

/// Normalize `path` for the host OS.
///
/// # Errors
///
/// [`DirexError::UnsupportedPlatform`] when the host's path convention
/// cannot be classified.
pub fn resolve(path: &str) -> Result<PathBuf, DirexError> {
    let family = OsFamily::host().ok_or(DirexError::UnsupportedPlatform)?;
    Ok(PathBuf::from(resolve_for(family, path)))
}
