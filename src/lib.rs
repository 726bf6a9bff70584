//! # direx
//!
//! Filesystem entity cache and recursive tree operations.
//!
//! direx represents a file or directory as a resolved, cached [`Entity`] and
//! builds recursive directory operations on top: fresh size computation,
//! bottom-up deletion, and filtered copying. It owns the path resolver, the
//! identity cache ([`EntityRegistry`]), the tree copier, and the error type.
//! It does **not** own any outer surface — no CLI, no network, no
//! serialization — those belong to the caller.
//!
//! # Quick Start
//!
//! ```rust
//! use std::fs;
//!
//! let dir = tempfile::tempdir()?;
//! fs::write(dir.path().join("report.html"), "<html></html>")?;
//!
//! let mut registry = direx::registry();
//! let report = registry.get_or_create(&dir.path().join("report.html").to_string_lossy())?;
//!
//! assert!(report.is_file());
//! assert_eq!(report.extension(), Some("html"));
//! assert_eq!(report.base_name(), "report.html");
//! println!("{}", report.size_human()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Filtered Copies
//!
//! [`copy_directory`] walks a source tree and selectively materializes it at
//! a destination — extension allow-list, exclusion patterns, depth budget:
//!
//! ```rust
//! use std::fs;
//! use direx::{copy_directory, CopyOptions};
//!
//! let tmp = tempfile::tempdir()?;
//! let src = tmp.path().join("src");
//! fs::create_dir(&src)?;
//! fs::write(src.join("a.txt"), "keep")?;
//! fs::write(src.join("b.csv"), "skip")?;
//!
//! let dest = tmp.path().join("dest");
//! copy_directory(&src, &dest, &CopyOptions::new().extensions(["txt"]))?;
//!
//! assert!(dest.join("a.txt").exists());
//! assert!(!dest.join("b.csv").exists());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # The Cache Contract
//!
//! The registry hands out at most one live [`Entity`] per canonical path —
//! two lookups for the same path return the same object, never a re-probed
//! one. Entities are snapshots: kind and name parts are fixed at
//! construction, only [`Entity::size`] re-reads the filesystem. direx is
//! single-threaded by contract and never coordinates with other processes;
//! a path deleted underneath a cached entity surfaces as an error on next
//! use, not as a special case. After mutating the tree, call
//! [`EntityRegistry::reset`] and re-resolve.

#![forbid(unsafe_code)]

pub mod resolve;

mod copy;
mod entity;
mod error;
mod format;
mod registry;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use copy::{copy_directory, CopyOptions};
pub use entity::{Entity, EntityKind};
pub use error::DirexError;
pub use format::human_size;
pub use registry::EntityRegistry;
pub use resolve::OsFamily;

// ── Entry points ──────────────────────────────────────────────────────────────

/// Create an empty [`EntityRegistry`].
///
/// The registry is a value the caller owns — construct one per scope that
/// needs a consistent view of the filesystem, and drop (or
/// [`reset`](EntityRegistry::reset)) it when that view goes stale.
pub fn registry() -> EntityRegistry {
    EntityRegistry::new()
}

/// Extension of the final path component, without the dot.
///
/// Works on plain strings — nothing is resolved or probed. Returns `None`
/// when the final component has no dot.
///
/// ```rust
/// assert_eq!(direx::extension_of("/www/files/index.html"), Some("html"));
/// assert_eq!(direx::extension_of("archive.tar.gz"), Some("gz"));
/// assert_eq!(direx::extension_of("/etc/hosts"), None);
/// ```
pub fn extension_of(path: &str) -> Option<&str> {
    let base = path.rsplit(['/', '\\']).next().unwrap_or(path);
    base.rfind('.').map(|dot| &base[dot + 1..])
}
