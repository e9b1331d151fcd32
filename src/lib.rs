//! tmpl-gather resolves template sources and their output targets.
//! Given an input/output configuration it decides which files take part,
//! where each one is written, and which sub-paths are excluded, before any
//! template content is rendered.

/// Resolver configuration and mode selection
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling
pub mod error;

/// File namespace abstraction
/// Implemented for the local disk and for an in-memory tree
pub mod fs;

/// Source gathering entry point
pub mod gather;

/// Exclusion pattern expansion and combination
pub mod glob;

/// Logger setup for host binaries
pub mod logger;

/// Reading sources and opening targets, including the `-` sentinel
pub mod namespace;

/// Standard stream bindings and output sinks
pub mod streams;

/// Template jobs
pub mod template;

/// Recursive directory mode
pub mod walker;

pub use config::{Config, Mode};
pub use error::{Error, ErrorKind, Result};
pub use gather::gather_templates;
pub use namespace::Namespace;
pub use streams::{Streams, Target};
pub use template::TemplateJob;
