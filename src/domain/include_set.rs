use anyhow::{Context, Result};
use rustc_hash::FxHashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Absolute paths of every file the project owns. Diagnostics are only reported inside these.
#[derive(Debug, Default, Clone)]
pub struct IncludeSet {
    files: FxHashSet<PathBuf>,
}

impl IncludeSet {
    /// Enumerate every regular file below each base directory.
    /// A missing or unreadable directory is an error: an empty set would silence every diagnostic.
    pub fn build<P: AsRef<Path>>(base_dirs: &[P]) -> Result<Self> {
        let mut files = FxHashSet::default();
        for base_dir in base_dirs {
            let base_dir = base_dir.as_ref();
            if !base_dir.is_dir() {
                anyhow::bail!("Include root is not a directory: {}", base_dir.display());
            }
            Self::collect_recursive(base_dir, &mut files)?;
        }
        tracing::info!(files = files.len(), roots = base_dirs.len(), "built include set");
        Ok(Self { files })
    }

    fn collect_recursive(dir: &Path, out: &mut FxHashSet<PathBuf>) -> Result<()> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read include directory {}", dir.display()))?;

        for entry in entries {
            let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
            let path = entry.path();
            let file_type = entry
                .file_type()
                .with_context(|| format!("Failed to stat {}", path.display()))?;

            if file_type.is_dir() {
                Self::collect_recursive(&path, out)?;
            } else if file_type.is_file() || (file_type.is_symlink() && path.is_file()) {
                // Symlinked directories are not followed, symlinked files are.
                out.insert(absolute_path(&path));
            }
        }
        Ok(())
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FromIterator<PathBuf> for IncludeSet {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().map(|path| absolute_path(&path)).collect(),
        }
    }
}

/// Resolve `path` to the absolute form used as include-set key.
/// Files that cannot be canonicalized (already deleted, virtual) fall back to a plain absolute path.
pub fn absolute_path(path: &Path) -> PathBuf {
    fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
