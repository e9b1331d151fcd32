//! Template jobs: one source paired with one destination.
//!
//! A job starts with identifiers only. [`TemplateJob::load_contents`] and
//! [`TemplateJob::add_target`] consume it and hand it back populated, so a
//! half-initialized job is never shared.

use crate::constants::{INLINE_TEMPLATE_NAME, STDIO_SENTINEL};
use crate::error::Result;
use crate::namespace::Namespace;
use crate::streams::Target;
use log::debug;
use std::path::{Path, PathBuf};

/// A resolved source/destination pairing awaiting rendering.
#[derive(Debug)]
pub struct TemplateJob {
    name: PathBuf,
    target_path: PathBuf,
    contents: Option<String>,
    target: Option<Target>,
}

impl TemplateJob {
    /// Creates a job reading `name` and writing `target_path`.
    pub fn new<N: Into<PathBuf>, T: Into<PathBuf>>(name: N, target_path: T) -> Self {
        Self { name: name.into(), target_path: target_path.into(), contents: None, target: None }
    }

    /// Creates a job for template text given inline; it writes to standard
    /// output until another target path is set.
    pub fn inline<S: Into<String>>(contents: S) -> Self {
        Self {
            name: PathBuf::from(INLINE_TEMPLATE_NAME),
            target_path: PathBuf::from(STDIO_SENTINEL),
            contents: Some(contents.into()),
            target: None,
        }
    }

    pub fn with_target_path<T: Into<PathBuf>>(mut self, target_path: T) -> Self {
        self.target_path = target_path.into();
        self
    }

    pub fn name(&self) -> &Path {
        &self.name
    }

    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Loaded source text, if any.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    pub fn target_mut(&mut self) -> Option<&mut Target> {
        self.target.as_mut()
    }

    /// Hands over the destination, leaving the job without one.
    pub fn take_target(&mut self) -> Option<Target> {
        self.target.take()
    }

    /// Reads the source named by the job. Contents that are already present
    /// are kept as they are.
    ///
    /// # Errors
    /// * `Error::NotFound` / `Error::ReadError` from [`Namespace::read_input`]
    pub fn load_contents(mut self, ns: &Namespace) -> Result<Self> {
        if self.contents.is_none() {
            self.contents = Some(ns.read_input(&self.name)?);
        }
        Ok(self)
    }

    /// Opens the job's destination. A target that is already attached is kept.
    ///
    /// # Errors
    /// * `Error::WriteError` from [`Namespace::open_out_file`]
    pub fn add_target(mut self, ns: &Namespace, mode: u32) -> Result<Self> {
        if self.target.is_none() {
            self.target = Some(ns.open_out_file(&self.target_path, mode)?);
        }
        Ok(self)
    }

    /// Creates the parent directories of the destination. Directory-mode jobs
    /// need this before [`TemplateJob::add_target`].
    pub fn ensure_target_dir(&self, ns: &Namespace) -> Result<()> {
        match self.target_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !ns.fs().is_dir(parent) => {
                debug!("Creating directory '{}'", parent.display());
                ns.fs().mkdir_all(parent)
            }
            _ => Ok(()),
        }
    }
}
