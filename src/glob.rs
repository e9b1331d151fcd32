//! Exclusion pattern handling.
//! Expands glob patterns against a [`FileSystem`] and combines the results
//! into a single deduplicated, sorted [`MatchSet`].

use crate::error::{Error, Result};
use crate::fs::{clean_path, FileSystem};
use globset::{GlobBuilder, GlobMatcher};
use log::{debug, trace};
use std::path::{Component, Path, PathBuf};

const GLOB_META: [char; 5] = ['*', '?', '[', '{', '\\'];

/// Compiles a single pattern. Wildcards never cross a path separator; only
/// `**` spans directories.
///
/// # Errors
/// * `Error::ConfigError` if the pattern is malformed
pub fn compile_glob(pattern: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| Error::ConfigError(format!("invalid glob pattern '{}': {}", pattern, e)))
}

/// Splits a pattern into the literal directory it is anchored at and the
/// number of path components left to match below it.
///
/// The depth is `None` when the pattern contains `**`.
pub(crate) fn literal_base(pattern: &str) -> (PathBuf, Option<usize>) {
    let mut base = PathBuf::new();
    let mut components = Path::new(pattern).components().peekable();
    while let Some(component) = components.peek() {
        let literal = match component {
            Component::Normal(part) => !part.to_string_lossy().contains(&GLOB_META[..]),
            _ => true,
        };
        if !literal {
            break;
        }
        base.push(component.as_os_str());
        components.next();
    }
    let rest: Vec<_> = components.collect();
    let recursive = rest.iter().any(|c| c.as_os_str() == "**");
    (base, if recursive { None } else { Some(rest.len()) })
}

/// Deduplicated set of paths matched by exclusion patterns.
///
/// Paths are stored lexically cleaned and sorted by their byte string, so
/// `/a-c` comes before `/a/b`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    paths: Vec<PathBuf>,
}

impl MatchSet {
    /// Returns whether `path`, once cleaned, is in the set.
    pub fn contains(&self, path: &Path) -> bool {
        let path = clean_path(path);
        self.paths.binary_search_by(|p| p.as_os_str().cmp(path.as_os_str())).is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn into_paths(self) -> Vec<PathBuf> {
        self.paths
    }
}

impl FromIterator<PathBuf> for MatchSet {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        let mut paths: Vec<PathBuf> = iter.into_iter().map(|p| clean_path(&p)).collect();
        paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        paths.dedup();
        Self { paths }
    }
}

/// Expands every pattern against the namespace and returns the union of the
/// matches.
///
/// # Arguments
/// * `fs` - Namespace to expand the patterns against
/// * `patterns` - Glob patterns, in any order
///
/// # Returns
/// * `Result<MatchSet>` - Cleaned matched paths, without duplicates, in
///   ascending byte order
///
/// # Errors
/// * `Error::ConfigError` if any pattern is malformed
pub fn execute_combined_glob<S: AsRef<str>>(
    fs: &dyn FileSystem,
    patterns: &[S],
) -> Result<MatchSet> {
    let mut matches = Vec::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let found = fs.glob(pattern)?;
        trace!("Pattern '{}' matched {} path(s)", pattern, found.len());
        matches.extend(found);
    }
    let set: MatchSet = matches.into_iter().collect();
    if !set.is_empty() {
        debug!("Excluding {} path(s)", set.len());
    }
    Ok(set)
}
