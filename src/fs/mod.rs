//! Hierarchical file namespace the resolver operates over.
//!
//! Everything that touches files goes through [`FileSystem`], so the local
//! disk ([`OsFileSystem`]) can be swapped for an in-memory tree
//! ([`MemoryFileSystem`]) in tests.

use crate::error::Result;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

pub mod memory;
pub mod os;

pub use memory::MemoryFileSystem;
pub use os::OsFileSystem;

/// Lexically normalizes a path: `.` components are dropped and `..` removes
/// the component before it. A `..` above the root is dropped; a leading `..`
/// in a relative path is kept. The empty result is `.`.
///
/// Symlinks are not resolved, so `a/link/..` becomes `a`.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    let mut normal = 0usize;
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir if normal > 0 => {
                cleaned.pop();
                normal -= 1;
            }
            Component::ParentDir => {
                if !cleaned.has_root() {
                    cleaned.push("..");
                }
            }
            Component::Normal(part) => {
                cleaned.push(part);
                normal += 1;
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}

/// Writable handle returned by [`FileSystem::create`].
pub type FileWriter = Box<dyn Write + Send>;

/// Capability interface over a file namespace.
pub trait FileSystem: Send + Sync {
    /// Returns whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Returns whether `path` is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Reads the whole file.
    ///
    /// # Errors
    /// * `Error::NotFound` if nothing exists at `path`
    /// * `Error::ReadError` if it exists but cannot be read
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Creates or truncates a file with the given permission mode. The parent
    /// directory must already exist.
    ///
    /// # Errors
    /// * `Error::WriteError` if the file cannot be created
    fn create(&self, path: &Path, mode: u32) -> Result<FileWriter>;

    /// Creates `path` and any missing ancestors.
    ///
    /// # Errors
    /// * `Error::WriteError` if a directory cannot be created
    fn mkdir_all(&self, path: &Path) -> Result<()>;

    /// Lists every regular file under `root`, in ascending path order.
    /// Symlinks to files are listed; symlinked directories are not entered.
    ///
    /// Entries for which `prune` returns true are skipped; for directories
    /// that means the whole subtree is left unvisited.
    ///
    /// # Errors
    /// * `Error::NotFound` if `root` does not exist
    /// * `Error::ReadError` if a visited directory cannot be listed
    fn walk(&self, root: &Path, prune: &dyn Fn(&Path) -> bool) -> Result<Vec<PathBuf>>;

    /// Returns every file or directory matching `pattern`. A pattern that
    /// matches nothing yields an empty list.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the pattern is malformed
    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>>;
}
