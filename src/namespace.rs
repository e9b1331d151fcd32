//! Reading template sources and opening output targets.
//!
//! A [`Namespace`] pairs the file tree with the standard streams, so that the
//! `-` path resolves to stdin or stdout instead of a file.

use crate::constants::STDIO_SENTINEL;
use crate::error::{Error, Result};
use crate::fs::{FileSystem, OsFileSystem};
use crate::streams::{Streams, Target};
use log::debug;
use std::io;
use std::path::Path;
use std::sync::Arc;

/// Returns whether `path` is the stdin/stdout sentinel.
pub fn is_stdio(path: &Path) -> bool {
    path == Path::new(STDIO_SENTINEL)
}

/// File tree plus standard stream bindings.
#[derive(Clone)]
pub struct Namespace {
    fs: Arc<dyn FileSystem>,
    streams: Streams,
}

impl std::fmt::Debug for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Namespace").field("streams", &self.streams).finish_non_exhaustive()
    }
}

impl Namespace {
    pub fn new(fs: Arc<dyn FileSystem>, streams: Streams) -> Self {
        Self { fs, streams }
    }

    pub fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    pub fn streams(&self) -> &Streams {
        &self.streams
    }

    /// Reads the whole source at `path`; `-` drains standard input.
    ///
    /// # Arguments
    /// * `path` - Source file, or `-`
    ///
    /// # Returns
    /// * `Result<String>` - Source text, byte for byte
    ///
    /// # Errors
    /// * `Error::NotFound` if the file does not exist
    /// * `Error::ReadError` if it cannot be read or is not valid UTF-8
    pub fn read_input(&self, path: &Path) -> Result<String> {
        let bytes = if is_stdio(path) {
            debug!("Reading template from standard input");
            self.streams.read_stdin().map_err(|e| Error::read(path, e))?
        } else {
            debug!("Reading template '{}'", path.display());
            self.fs.read(path)?
        };
        String::from_utf8(bytes)
            .map_err(|e| Error::read(path, io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// Opens the destination at `path`; `-` returns standard output.
    ///
    /// Files are created or truncated with `mode`. Parent directories are not
    /// created.
    ///
    /// # Errors
    /// * `Error::WriteError` if the file cannot be created
    pub fn open_out_file(&self, path: &Path, mode: u32) -> Result<Target> {
        if is_stdio(path) {
            return Ok(Target::Stdout(Arc::clone(self.streams.stdout())));
        }
        debug!("Opening output '{}' with mode {:o}", path.display(), mode);
        Ok(Target::File(self.fs.create(path, mode)?))
    }
}

impl Default for Namespace {
    /// The local file system with the process streams.
    fn default() -> Self {
        Self::new(Arc::new(OsFileSystem::new()), Streams::default())
    }
}
