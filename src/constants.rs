//! Common constants used throughout tmpl-gather.

/// Path value standing for standard input when reading and standard output when writing
pub const STDIO_SENTINEL: &str = "-";

/// Name given to a template supplied inline rather than read from a file
pub const INLINE_TEMPLATE_NAME: &str = "<arg>";

/// Permission mode for created destination files when none is configured
pub const DEFAULT_FILE_MODE: u32 = 0o644;
