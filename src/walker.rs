//! Recursive directory mode: maps every file under an input root to a job
//! writing the same relative path under an output root.

use crate::error::{Error, Result};
use crate::fs::{clean_path, FileSystem};
use crate::glob::execute_combined_glob;
use crate::template::TemplateJob;
use log::debug;
use std::path::Path;

/// Walks `in_dir` and plans one job per file.
///
/// The input root, the matched exclusions and the walked paths are compared
/// after lexical cleaning, so `./in`, `in` and `x/../in` name the same tree.
/// Job names are the cleaned paths. If an exclusion matches `in_dir` itself
/// or one of its ancestors, the whole tree is skipped.
///
/// # Arguments
/// * `fs` - Namespace holding the input tree
/// * `in_dir` - Root of the templates
/// * `out_dir` - Root the targets are placed under
/// * `excludes` - Glob patterns; matched files are skipped and matched
///   directories are not descended into
///
/// # Returns
/// * `Result<Vec<TemplateJob>>` - Jobs sorted by source path, nothing loaded
///   or opened yet
///
/// # Errors
/// * `Error::NotFound` if `in_dir` is missing or not a directory
/// * `Error::ConfigError` if an exclusion pattern is malformed
pub fn walk_dir<S: AsRef<str>>(
    fs: &dyn FileSystem,
    in_dir: &Path,
    out_dir: &Path,
    excludes: &[S],
) -> Result<Vec<TemplateJob>> {
    let in_dir = clean_path(in_dir);
    if !fs.is_dir(&in_dir) {
        return Err(Error::not_found(&in_dir));
    }

    let excluded = execute_combined_glob(fs, excludes)?;
    if let Some(ancestor) = in_dir.ancestors().find(|a| excluded.contains(a)) {
        debug!("Skipping '{}', '{}' is excluded", in_dir.display(), ancestor.display());
        return Ok(Vec::new());
    }

    let prune = |path: &Path| {
        let skip = excluded.contains(path);
        if skip {
            debug!("Skipping excluded path '{}'", path.display());
        }
        skip
    };

    let mut templates = Vec::new();
    for file in fs.walk(&in_dir, &prune)? {
        let file = clean_path(&file);
        let relative = if in_dir == Path::new(".") {
            file.as_path()
        } else {
            file.strip_prefix(&in_dir).map_err(|e| {
                Error::ConfigError(format!(
                    "'{}' is outside '{}': {}",
                    file.display(),
                    in_dir.display(),
                    e
                ))
            })?
        };
        let target = out_dir.join(relative);
        debug!("Planned '{}' -> '{}'", file.display(), target.display());
        templates.push(TemplateJob::new(file, target));
    }

    templates.sort_by(|a, b| a.name().cmp(b.name()));
    Ok(templates)
}
