use std::fs;
use std::path::Path;

use crate::error::DirexError;
use crate::registry::{apply_mode, make_dir_all};

// ---------------------------------------------------------------------------
// CopyOptions
// ---------------------------------------------------------------------------

/// Configuration for [`copy_directory`]. Every field has a permissive
/// default; configure with chained setters:
///
/// ```rust
/// use direx::CopyOptions;
///
/// let opts = CopyOptions::new()
///     .extensions(["txt", "md"])
///     .exclude(["cache"])
///     .max_depth(2)
///     .file_mode(0o644)
///     .dir_mode(0o755);
/// ```
#[derive(Debug, Clone)]
pub struct CopyOptions {
    allowed_extensions: Vec<String>,
    exclude:            Vec<String>,
    max_depth:          i64,
    file_mode:          Option<u32>,
    dir_mode:           Option<u32>,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            allowed_extensions: Vec::new(),
            exclude:            Vec::new(),
            max_depth:          -1,
            file_mode:          None,
            dir_mode:           None,
        }
    }
}

impl CopyOptions {
    /// All files, all depths, host-default permissions.
    pub fn new() -> CopyOptions {
        CopyOptions::default()
    }

    /// Only copy files whose extension (without the dot) is in this list.
    ///
    /// An empty list — the default — allows every file. With a non-empty
    /// list, extensionless files never qualify.
    pub fn extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_extensions = exts.into_iter().map(Into::into).collect();
        self
    }

    /// Skip entries matching any of these patterns.
    ///
    /// An entry is excluded when its name exactly equals a pattern, or when
    /// its path relative to the copy root starts with a pattern as a plain
    /// string prefix. The prefix match is not segment-aware: excluding
    /// `"ab"` also excludes `"abc"`. An excluded directory is skipped
    /// entirely — neither created at the destination nor descended into.
    pub fn exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// How many directory levels below the source root to descend into.
    ///
    /// `-1` — the default — means unlimited. `0` copies the root's immediate
    /// files only, skipping every subdirectory.
    pub fn max_depth(mut self, depth: i64) -> Self {
        self.max_depth = depth;
        self
    }

    /// Permission bits applied to every copied file (Unix only).
    pub fn file_mode(mut self, mode: u32) -> Self {
        self.file_mode = Some(mode);
        self
    }

    /// Permission bits applied to every created directory, including
    /// intermediate directories created en route to the destination root
    /// (Unix only).
    pub fn dir_mode(mut self, mode: u32) -> Self {
        self.dir_mode = Some(mode);
        self
    }
}

// ---------------------------------------------------------------------------
// copy_directory
// ---------------------------------------------------------------------------

/// Recursively copy `src` into `dest`, filtered by `options`.
///
/// The destination directory (and any missing intermediate directories) is
/// created first, then the source tree is walked entry by entry. Files pass
/// the extension filter and are copied byte-for-byte; directories are
/// descended into while the depth budget lasts. Exclusion patterns are
/// matched against each entry's name and its root-relative path — see
/// [`CopyOptions::exclude`] for the exact (and intentionally literal)
/// semantics.
///
/// The walk never consults an [`EntityRegistry`](crate::EntityRegistry):
/// copies produce new, unrelated paths.
///
/// # Errors
///
/// [`DirexError::Io`] from the first unrecoverable filesystem failure —
/// unreadable source, uncreatable directory, unwritable file. The walk stops
/// there; whatever was already copied stays, and the error names the path it
/// failed at.
pub fn copy_directory(
    src: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    options: &CopyOptions,
) -> Result<(), DirexError> {
    let src = src.as_ref();
    let dest = dest.as_ref();

    if !dest.is_dir() {
        make_dir_all(dest, options.dir_mode)?;
    }

    copy_recursive(src, dest, "", options, options.max_depth)
}

fn copy_recursive(
    src: &Path,
    dest: &Path,
    base: &str,
    options: &CopyOptions,
    level: i64,
) -> Result<(), DirexError> {
    if !dest.is_dir() {
        fs::create_dir(dest).map_err(|e| DirexError::io(dest.to_path_buf(), e))?;
        if let Some(mode) = options.dir_mode {
            apply_mode(dest, mode)?;
        }
    }

    let entries = fs::read_dir(src).map_err(|e| DirexError::io(src.to_path_buf(), e))?;

    for entry in entries {
        let entry = entry.map_err(|e| DirexError::io(src.to_path_buf(), e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let path = entry.path();
        let is_file = path.is_file();

        // Path relative to the copy root, used only for exclusion matching.
        let relative = if base.is_empty() {
            name.clone()
        } else {
            format!("{base}/{name}")
        };

        if !qualifies(&name, &relative, is_file, options) {
            continue;
        }

        if is_file {
            let target = dest.join(&name);
            fs::copy(&path, &target).map_err(|e| DirexError::io(target.clone(), e))?;
            if let Some(mode) = options.file_mode {
                apply_mode(&target, mode)?;
            }
        } else if level != 0 {
            // -1 stays -1 forever: unlimited depth never exhausts.
            copy_recursive(&path, &dest.join(&name), &relative, options, level - 1)?;
        }
    }

    Ok(())
}

/// Exclusion and extension filtering for one directory entry.
fn qualifies(name: &str, relative: &str, is_file: bool, options: &CopyOptions) -> bool {
    for pattern in &options.exclude {
        if name == pattern || relative.starts_with(pattern.as_str()) {
            return false;
        }
    }

    if !is_file || options.allowed_extensions.is_empty() {
        return true;
    }

    match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() => {
            let ext = &name[dot + 1..];
            options.allowed_extensions.iter().any(|a| a == ext)
        }
        _ => false,
    }
}
