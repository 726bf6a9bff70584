use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DirexError;
use crate::format::human_size;
use crate::registry::EntityRegistry;

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// What a resolved path pointed at when its entity was constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A regular file.
    File,

    /// A directory.
    Directory,
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// One filesystem path, resolved and probed exactly once.
///
/// An `Entity` records a path's kind and derived name parts as they were at
/// construction time. Nothing on it is re-probed implicitly: [`kind`](Entity::kind)
/// and the name parts are fixed for the object's lifetime, while
/// [`size()`](Entity::size) always re-reads the filesystem. Entities are
/// handed out by [`EntityRegistry::get_or_create`], which guarantees at most
/// one live entity per canonical path.
///
/// The filesystem can change underneath a constructed entity — a deleted
/// directory's entity stays alive but its operations will fail. Callers
/// re-resolve after mutating the tree ([`EntityRegistry::reset`]).
#[derive(Debug)]
pub struct Entity {
    canonical_path: PathBuf,
    dir_part:       PathBuf,
    base_name:      String,
    stem:           String,
    extension:      Option<String>,
    kind:           EntityKind,
}

impl Entity {
    /// Probe `canonical` and build an entity for it.
    ///
    /// The path must exist at this instant; the registry checks existence
    /// before calling, but a racing delete still surfaces here as `NotFound`.
    pub(crate) fn probe(canonical: PathBuf) -> Result<Entity, DirexError> {
        let meta = fs::metadata(&canonical).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DirexError::NotFound(canonical.clone())
            } else {
                DirexError::io(canonical.clone(), e)
            }
        })?;

        let kind = if meta.is_dir() {
            EntityKind::Directory
        } else {
            EntityKind::File
        };

        let dir_part = canonical.parent().unwrap_or(Path::new("")).to_path_buf();
        let base_name = canonical
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        // Extension is the substring after the last dot of the base name,
        // and only files have one.
        let (stem, extension) = match (kind, base_name.rfind('.')) {
            (EntityKind::File, Some(dot)) => (
                base_name[..dot].to_string(),
                Some(base_name[dot + 1..].to_string()),
            ),
            _ => (base_name.clone(), None),
        };

        Ok(Entity {
            canonical_path: canonical,
            dir_part,
            base_name,
            stem,
            extension,
            kind,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// The resolved path this entity was constructed from.
    pub fn path(&self) -> &Path {
        &self.canonical_path
    }

    /// Parent directory component: `/www/files` for `/www/files/file.html`.
    pub fn dir_part(&self) -> &Path {
        &self.dir_part
    }

    /// Final component with extension: `file.html`.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Final component without extension: `file`.
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Extension without the dot: `html`. `None` for directories and for
    /// files whose base name has no dot.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// The kind probed at construction time.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// `true` if the path was a regular file at construction time.
    pub fn is_file(&self) -> bool {
        self.kind == EntityKind::File
    }

    /// `true` if the path was a directory at construction time.
    pub fn is_dir(&self) -> bool {
        self.kind == EntityKind::Directory
    }

    // ── Size ──────────────────────────────────────────────────────────────

    /// Current size in bytes, re-read from the filesystem on every call.
    ///
    /// Files re-stat their byte length. Directories recursively sum the byte
    /// lengths of every descendant file (empty subdirectories contribute 0).
    /// The walk operates on paths directly — it does not populate the
    /// registry — and memoizes nothing across calls, so a directory size is
    /// O(descendant count) each time.
    ///
    /// # Errors
    ///
    /// [`DirexError::Io`] at the first unreadable entry; the walk does not
    /// continue past it.
    pub fn size(&self) -> Result<u64, DirexError> {
        match self.kind {
            EntityKind::File => {
                let meta = fs::metadata(&self.canonical_path)
                    .map_err(|e| DirexError::io(self.canonical_path.clone(), e))?;
                Ok(meta.len())
            }
            EntityKind::Directory => dir_size(&self.canonical_path),
        }
    }

    /// Like [`size()`](Entity::size), rendered through
    /// [`human_size`](crate::human_size): `"1.5 KB"`, `"3 MB"`.
    pub fn size_human(&self) -> Result<String, DirexError> {
        Ok(human_size(self.size()?))
    }

    // ── Delete ────────────────────────────────────────────────────────────

    /// Recursively delete this directory and everything under it, bottom-up.
    ///
    /// Each subdirectory is re-resolved through a fresh `registry` lookup so
    /// nested entries are classified by the filesystem, not guessed from
    /// names; files are removed directly. Once a directory is empty it is
    /// removed itself.
    ///
    /// Deletion is **not transactional**: a failure partway through (say, a
    /// permission error on one nested file) leaves everything already removed
    /// gone, keeps that file and its ancestor directories, and surfaces the
    /// failing child's error. This entity — and any registry entries under
    /// it — remain constructed but point at nothing; re-resolve after a
    /// [`reset()`](EntityRegistry::reset) before touching the path again.
    ///
    /// # Errors
    ///
    /// [`DirexError::NotADirectory`] if this entity is a file;
    /// [`DirexError::Io`] from the first failing filesystem call.
    pub fn delete_dir(&self, registry: &mut EntityRegistry) -> Result<(), DirexError> {
        if !self.is_dir() {
            return Err(DirexError::NotADirectory(self.canonical_path.clone()));
        }

        let entries = fs::read_dir(&self.canonical_path)
            .map_err(|e| DirexError::io(self.canonical_path.clone(), e))?;

        for entry in entries {
            let entry = entry.map_err(|e| DirexError::io(self.canonical_path.clone(), e))?;
            let child = entry.path();
            let ft = entry
                .file_type()
                .map_err(|e| DirexError::io(child.clone(), e))?;

            if ft.is_dir() {
                // Raw PathBuf, not a string round-trip: child names need not
                // be valid UTF-8.
                let nested = registry.get_or_create_resolved(child)?;
                nested.delete_dir(registry)?;
            } else {
                fs::remove_file(&child).map_err(|e| DirexError::io(child.clone(), e))?;
            }
        }

        fs::remove_dir(&self.canonical_path)
            .map_err(|e| DirexError::io(self.canonical_path.clone(), e))
    }
}

// ---------------------------------------------------------------------------
// Directory size walk
// ---------------------------------------------------------------------------

/// Sum the byte lengths of every file under `dir`, recursively.
fn dir_size(dir: &Path) -> Result<u64, DirexError> {
    let mut total = 0u64;

    for entry in walkdir::WalkDir::new(dir) {
        let entry = entry.map_err(|e| walk_err(dir, e))?;
        if entry.file_type().is_file() {
            let meta = entry.metadata().map_err(|e| walk_err(entry.path(), e))?;
            total += meta.len();
        }
    }

    Ok(total)
}

/// Map a walkdir error to [`DirexError::Io`], keeping the path it names
/// (or `fallback` when it names none).
fn walk_err(fallback: &Path, e: walkdir::Error) -> DirexError {
    let path = e
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| fallback.to_path_buf());
    match e.into_io_error() {
        Some(io) => DirexError::io(path, io),
        None => DirexError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::Other, "walk error"),
        ),
    }
}
