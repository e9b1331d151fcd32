//! [`FileSystem`] backed by the local disk.

use crate::error::{Error, Result};
use crate::fs::{FileSystem, FileWriter};
use crate::glob::{compile_glob, literal_base};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The local file system. Relative paths resolve against the current directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl OsFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| Error::read(path, e))
    }

    fn create(&self, path: &Path, mode: u32) -> Result<FileWriter> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(mode);
        }
        #[cfg(not(unix))]
        let _ = mode;

        let file = options.open(path).map_err(|e| Error::write(path, e))?;
        Ok(Box::new(file))
    }

    fn mkdir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|e| Error::write(path, e))
    }

    fn walk(&self, root: &Path, prune: &dyn Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
        if !root.exists() {
            return Err(Error::not_found(root));
        }

        let mut files = Vec::new();
        let entries = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !prune(entry.path()));
        for entry in entries {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                Error::read(&path, e.into())
            })?;
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if is_file {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }

    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let matcher = compile_glob(pattern)?;
        let (base, depth) = literal_base(pattern);
        if depth == Some(0) {
            return Ok(if base.exists() { vec![base] } else { Vec::new() });
        }

        // Unanchored patterns are matched against paths relative to the current directory.
        let anchored = !base.as_os_str().is_empty();
        let walk_root = if anchored { base } else { PathBuf::from(".") };
        if !walk_root.is_dir() {
            return Ok(Vec::new());
        }

        let mut walker = WalkDir::new(&walk_root).min_depth(1);
        if let Some(depth) = depth {
            walker = walker.max_depth(depth);
        }

        // Unreadable directories are skipped rather than failing the expansion.
        let matches = walker
            .into_iter()
            .filter_map(|entry| entry.ok())
            .map(|entry| {
                let path = entry.into_path();
                if anchored {
                    path
                } else {
                    path.strip_prefix(".").map(Path::to_path_buf).unwrap_or(path)
                }
            })
            .filter(|path| matcher.is_match(path))
            .collect();
        Ok(matches)
    }
}
