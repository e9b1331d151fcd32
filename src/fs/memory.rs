//! In-memory [`FileSystem`], used to substitute the local disk in tests.

use crate::constants::DEFAULT_FILE_MODE;
use crate::error::{Error, Result};
use crate::fs::{clean_path, FileSystem, FileWriter};
use crate::glob::compile_glob;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File { data: Vec<u8>, mode: u32 },
}

type Nodes = BTreeMap<PathBuf, Node>;

/// A file tree held in memory. Clones share the same tree.
///
/// The root (`/`, or the empty path or `.` for relative names) always exists.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    nodes: Arc<Mutex<Nodes>>,
}

fn is_root(path: &Path) -> bool {
    path.as_os_str().is_empty() || path == Path::new("/") || path == Path::new(".")
}

fn lock(nodes: &Mutex<Nodes>) -> MutexGuard<'_, Nodes> {
    nodes.lock().unwrap_or_else(PoisonError::into_inner)
}

fn register_parents(nodes: &mut Nodes, path: &Path) {
    for ancestor in path.ancestors().skip(1).filter(|a| !is_root(a)) {
        nodes.insert(ancestor.to_path_buf(), Node::Dir);
    }
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a file with the default mode, creating missing parent
    /// directories.
    pub fn add_file<P: AsRef<Path>, C: AsRef<[u8]>>(&self, path: P, contents: C) {
        let path = path.as_ref();
        let mut nodes = lock(&self.nodes);
        register_parents(&mut nodes, path);
        nodes.insert(
            path.to_path_buf(),
            Node::File { data: contents.as_ref().to_vec(), mode: DEFAULT_FILE_MODE },
        );
    }

    /// Creates a directory and its missing ancestors.
    pub fn add_dir<P: AsRef<Path>>(&self, path: P) {
        let path = path.as_ref();
        let mut nodes = lock(&self.nodes);
        register_parents(&mut nodes, path);
        if !is_root(path) {
            nodes.insert(path.to_path_buf(), Node::Dir);
        }
    }

    /// Returns the bytes of a file, or `None` if no file exists at `path`.
    pub fn contents<P: AsRef<Path>>(&self, path: P) -> Option<Vec<u8>> {
        match lock(&self.nodes).get(path.as_ref()) {
            Some(Node::File { data, .. }) => Some(data.clone()),
            _ => None,
        }
    }

    /// Returns the permission mode a file was created with.
    pub fn file_mode<P: AsRef<Path>>(&self, path: P) -> Option<u32> {
        match lock(&self.nodes).get(path.as_ref()) {
            Some(Node::File { mode, .. }) => Some(*mode),
            _ => None,
        }
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        is_root(path) || lock(&self.nodes).contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        is_root(path) || matches!(lock(&self.nodes).get(path), Some(Node::Dir))
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        match lock(&self.nodes).get(path) {
            Some(Node::File { data, .. }) => Ok(data.clone()),
            Some(Node::Dir) => Err(Error::read(path, io::Error::other("is a directory"))),
            None if is_root(path) => Err(Error::read(path, io::Error::other("is a directory"))),
            None => Err(Error::not_found(path)),
        }
    }

    fn create(&self, path: &Path, mode: u32) -> Result<FileWriter> {
        let mut nodes = lock(&self.nodes);
        let parent_exists = match path.parent() {
            Some(parent) if !is_root(parent) => matches!(nodes.get(parent), Some(Node::Dir)),
            _ => true,
        };
        if !parent_exists {
            return Err(Error::write(
                path,
                io::Error::new(io::ErrorKind::NotFound, "parent directory does not exist"),
            ));
        }
        if is_root(path) || matches!(nodes.get(path), Some(Node::Dir)) {
            return Err(Error::write(path, io::Error::other("is a directory")));
        }

        nodes.insert(path.to_path_buf(), Node::File { data: Vec::new(), mode });
        Ok(Box::new(MemoryFile { nodes: Arc::clone(&self.nodes), path: path.to_path_buf() }))
    }

    fn mkdir_all(&self, path: &Path) -> Result<()> {
        let mut nodes = lock(&self.nodes);
        let missing: Vec<&Path> = path.ancestors().filter(|a| !is_root(a)).collect();
        for dir in missing.into_iter().rev() {
            match nodes.get(dir) {
                Some(Node::Dir) => {}
                Some(Node::File { .. }) => {
                    return Err(Error::write(
                        dir,
                        io::Error::new(io::ErrorKind::AlreadyExists, "not a directory"),
                    ));
                }
                None => {
                    nodes.insert(dir.to_path_buf(), Node::Dir);
                }
            }
        }
        Ok(())
    }

    fn walk(&self, root: &Path, prune: &dyn Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
        // Relative names are stored without a leading `./`.
        let root = if root == Path::new(".") { Path::new("") } else { root };
        let nodes = lock(&self.nodes);
        match nodes.get(root) {
            Some(Node::File { .. }) => {
                return Ok(if prune(root) { Vec::new() } else { vec![root.to_path_buf()] });
            }
            None if !is_root(root) => return Err(Error::not_found(root)),
            _ => {}
        }

        let files = nodes
            .iter()
            .filter(|(path, node)| {
                matches!(node, Node::File { .. })
                    && path.has_root() == root.has_root()
                    && path.starts_with(root)
                    && path.as_path() != root
            })
            .map(|(path, _)| path)
            .filter(|path| !path.ancestors().take_while(|a| a.starts_with(root)).any(prune))
            .cloned()
            .collect();
        Ok(files)
    }

    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let matcher = compile_glob(&clean_path(Path::new(pattern)).to_string_lossy())?;
        Ok(lock(&self.nodes).keys().filter(|path| matcher.is_match(path)).cloned().collect())
    }
}

/// Write handle into a [`MemoryFileSystem`] file.
struct MemoryFile {
    nodes: Arc<Mutex<Nodes>>,
    path: PathBuf,
}

impl Write for MemoryFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match lock(&self.nodes).get_mut(&self.path) {
            Some(Node::File { data, .. }) => {
                data.extend_from_slice(buf);
                Ok(buf.len())
            }
            _ => Err(io::Error::new(io::ErrorKind::NotFound, "file was removed")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_file_registers_parents() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/tmp/one/a", "file a");

        assert!(fs.is_dir(Path::new("/tmp")));
        assert!(fs.is_dir(Path::new("/tmp/one")));
        assert!(!fs.is_dir(Path::new("/tmp/one/a")));
        assert_eq!(fs.contents("/tmp/one/a"), Some(b"file a".to_vec()));
    }

    #[test]
    fn test_create_requires_parent() {
        let fs = MemoryFileSystem::new();
        let err = fs.create(Path::new("/missing/out"), 0o600).err().unwrap();
        assert!(matches!(err, Error::WriteError { .. }));

        fs.add_dir("/out");
        let mut file = fs.create(Path::new("/out/file"), 0o600).unwrap();
        file.write_all(b"hello").unwrap();
        assert_eq!(fs.contents("/out/file"), Some(b"hello".to_vec()));
        assert_eq!(fs.file_mode("/out/file"), Some(0o600));
    }

    #[test]
    fn test_create_truncates() {
        let fs = MemoryFileSystem::new();
        fs.add_file("out", "old contents");
        fs.create(Path::new("out"), 0o644).unwrap();
        assert_eq!(fs.contents("out"), Some(Vec::new()));
    }

    #[test]
    fn test_walk_prunes_subtrees() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/in/a/1", "");
        fs.add_file("/in/a/2", "");
        fs.add_file("/in/b/3", "");
        fs.add_file("/other/4", "");

        let files = fs.walk(Path::new("/in"), &|p| p == Path::new("/in/b")).unwrap();
        assert_eq!(files, vec![PathBuf::from("/in/a/1"), PathBuf::from("/in/a/2")]);
    }

    #[test]
    fn test_walk_relative_root() {
        let fs = MemoryFileSystem::new();
        fs.add_file("a/1", "");
        fs.add_file("b", "");
        fs.add_file("/abs/2", "");

        let files = fs.walk(Path::new("."), &|_| false).unwrap();
        assert_eq!(files, vec![PathBuf::from("a/1"), PathBuf::from("b")]);
    }

    #[test]
    fn test_glob_cleans_pattern() {
        let fs = MemoryFileSystem::new();
        fs.add_file("in/skip/x", "");

        let found = fs.glob("./in/../in/sk*").unwrap();
        assert_eq!(found, vec![PathBuf::from("in/skip")]);
    }

    #[test]
    fn test_mkdir_all_over_file_fails() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/a", "");
        assert!(fs.mkdir_all(Path::new("/a/b")).is_err());
        assert!(fs.mkdir_all(Path::new("/c/d")).is_ok());
        assert!(fs.is_dir(Path::new("/c")));
    }
}
