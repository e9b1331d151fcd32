//! Standard input/output bindings and destination sinks.
//!
//! The process streams are held behind shared handles so callers can swap
//! them for in-memory buffers in tests.

use crate::fs::FileWriter;
use std::fmt;
use std::io::{self, Read, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Shared handle to the stream read for the `-` input path.
pub type SharedReader = Arc<Mutex<dyn Read + Send>>;

/// Shared handle to the stream written for the `-` output path.
pub type SharedWriter = Arc<Mutex<dyn Write + Send>>;

/// Standard input and output as seen by the resolver.
#[derive(Clone)]
pub struct Streams {
    stdin: SharedReader,
    stdout: SharedWriter,
}

impl Streams {
    /// Binds custom streams. The writer is taken as a shared handle so the
    /// caller can keep a clone and inspect what was written.
    pub fn new<R, W>(stdin: R, stdout: Arc<Mutex<W>>) -> Self
    where
        R: Read + Send + 'static,
        W: Write + Send + 'static,
    {
        Self { stdin: Arc::new(Mutex::new(stdin)), stdout }
    }

    pub fn stdin(&self) -> &SharedReader {
        &self.stdin
    }

    pub fn stdout(&self) -> &SharedWriter {
        &self.stdout
    }

    /// Drains the input stream.
    pub fn read_stdin(&self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.stdin.lock().unwrap_or_else(PoisonError::into_inner).read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Returns whether `target` writes to this binding's output stream.
    pub fn is_stdout(&self, target: &Target) -> bool {
        match target {
            Target::Stdout(writer) => Arc::ptr_eq(writer, &self.stdout),
            Target::File(_) => false,
        }
    }
}

impl Default for Streams {
    /// The process-wide standard input and output.
    fn default() -> Self {
        Self::new(io::stdin(), Arc::new(Mutex::new(io::stdout())))
    }
}

impl fmt::Debug for Streams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Streams").finish_non_exhaustive()
    }
}

/// Where a rendered template is written.
pub enum Target {
    /// The bound standard output. Never closed by the resolver.
    Stdout(SharedWriter),
    /// A file owned by the job it was opened for.
    File(FileWriter),
}

impl Target {
    pub fn is_stdout(&self) -> bool {
        matches!(self, Target::Stdout(_))
    }
}

impl Write for Target {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Target::Stdout(writer) => {
                writer.lock().unwrap_or_else(PoisonError::into_inner).write(buf)
            }
            Target::File(file) => file.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Target::Stdout(writer) => writer.lock().unwrap_or_else(PoisonError::into_inner).flush(),
            Target::File(file) => file.flush(),
        }
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Stdout(_) => f.write_str("Target::Stdout"),
            Target::File(_) => f.write_str("Target::File"),
        }
    }
}
