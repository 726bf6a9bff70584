use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::entity::Entity;
use crate::error::DirexError;
use crate::resolve;

// ---------------------------------------------------------------------------
// EntityRegistry
// ---------------------------------------------------------------------------

/// Identity cache mapping canonical path → [`Entity`].
///
/// The registry guarantees at most one live entity per canonical path for as
/// long as it lives: repeated lookups return clones of the same
/// [`Arc<Entity>`], never a re-probed object. It is an explicit value the
/// caller owns and passes around — there is no hidden global cache, so cache
/// lifetime is whatever the caller makes it.
///
/// # Thread Safety
///
/// The core contract is single-threaded and sequential. Entities are
/// immutable once constructed, so the registry itself is the only shared
/// mutable state; a concurrent caller wraps the whole registry in a `Mutex`
/// so that two lookups for the same uncached path cannot construct two
/// entities.
///
/// # Staleness
///
/// Entities record the filesystem as it was at construction. The registry
/// never evicts on its own — after deleting or replacing paths, call
/// [`reset()`](EntityRegistry::reset) and re-resolve.
#[derive(Default)]
pub struct EntityRegistry {
    entries: HashMap<PathBuf, Arc<Entity>>,
}

impl EntityRegistry {
    /// Create an empty registry.
    pub fn new() -> EntityRegistry {
        EntityRegistry::default()
    }

    /// Look up `path`, constructing and caching its entity on first sight.
    ///
    /// The path is normalized through the resolver first; the resolved form
    /// is the cache key. Lookup and insertion behave as a single
    /// insert-if-absent: a cached entity is returned as-is, an uncached path
    /// is probed (existence, kind, name parts) and stored before returning.
    ///
    /// # Errors
    ///
    /// [`DirexError::NotFound`] when the path is empty or does not exist at
    /// call time; [`DirexError::UnsupportedPlatform`] when the host path
    /// convention is unknown; [`DirexError::Io`] when the probe itself fails.
    pub fn get_or_create(&mut self, path: &str) -> Result<Arc<Entity>, DirexError> {
        if path.trim().is_empty() {
            return Err(DirexError::NotFound(PathBuf::from(path)));
        }

        let resolved = resolve::resolve(path)?;
        self.get_or_create_resolved(resolved)
    }

    /// Insert-if-absent on an already-resolved path.
    ///
    /// Internal recursion (deletion walking into subdirectories) comes
    /// through here with raw `PathBuf`s from `read_dir`, which keeps
    /// non-UTF-8 names intact instead of round-tripping them through a
    /// lossy string.
    pub(crate) fn get_or_create_resolved(
        &mut self,
        resolved: PathBuf,
    ) -> Result<Arc<Entity>, DirexError> {
        if let Some(cached) = self.entries.get(&resolved) {
            return Ok(Arc::clone(cached));
        }

        let entity = Arc::new(Entity::probe(resolved.clone())?);
        self.entries.insert(resolved, Arc::clone(&entity));
        Ok(entity)
    }

    /// Create the directory at `path` and return its entity.
    ///
    /// Idempotent by design: if the resolved path already exists this is just
    /// a lookup, never an error. Otherwise every missing intermediate
    /// directory is created (`mkdir -p`), with `mode` applied to each one on
    /// Unix (ignored elsewhere).
    ///
    /// # Errors
    ///
    /// [`DirexError::Io`] when creation or the mode change fails.
    pub fn create_dir(&mut self, path: &str, mode: u32) -> Result<Arc<Entity>, DirexError> {
        let resolved = resolve::resolve(path)?;

        if !resolved.exists() {
            make_dir_all(&resolved, Some(mode))?;
        }

        self.get_or_create(path)
    }

    /// Whether `path` currently exists on the filesystem. Plain probe, no
    /// caching, no registration.
    pub fn exists(path: &str) -> bool {
        Path::new(path).exists()
    }

    /// Drop every cached entity.
    ///
    /// Required for test isolation and for long-running processes whose
    /// filesystem has drifted from the cached metadata.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Number of cached entities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Directory scaffolding helpers
// ---------------------------------------------------------------------------

/// `mkdir -p` that applies `mode` to every directory it actually creates,
/// intermediates included. Shared with the tree copier's destination setup.
pub(crate) fn make_dir_all(dest: &Path, mode: Option<u32>) -> Result<(), DirexError> {
    let mut missing: Vec<PathBuf> = Vec::new();
    let mut cursor = dest.to_path_buf();

    while !cursor.exists() {
        missing.push(cursor.clone());
        match cursor.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => cursor = parent.to_path_buf(),
            _ => break,
        }
    }

    // Deepest missing directory was pushed first; create top-down.
    for dir in missing.iter().rev() {
        fs::create_dir(dir).map_err(|e| DirexError::io(dir.clone(), e))?;
        if let Some(mode) = mode {
            apply_mode(dir, mode)?;
        }
    }

    Ok(())
}

#[cfg(unix)]
pub(crate) fn apply_mode(path: &Path, mode: u32) -> Result<(), DirexError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .map_err(|e| DirexError::io(path.to_path_buf(), e))
}

#[cfg(not(unix))]
pub(crate) fn apply_mode(_path: &Path, _mode: u32) -> Result<(), DirexError> {
    Ok(())
}
