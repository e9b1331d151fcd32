//! Entry point of the resolver: turns a [`Config`] into the ordered list of
//! jobs handed to the renderer.

use crate::config::{Config, Mode};
use crate::error::Result;
use crate::namespace::Namespace;
use crate::template::TemplateJob;
use crate::walker::walk_dir;
use log::debug;

/// Produces the template jobs described by `config`.
///
/// Inline and explicit-file jobs come back with contents loaded and targets
/// open. Directory jobs carry only their paths; the caller loads and opens
/// them one by one, so a bad file does not stop the rest of the tree.
///
/// # Arguments
/// * `ns` - Namespace to read from and write to
/// * `config` - Resolved input/output settings
///
/// # Returns
/// * `Result<Vec<TemplateJob>>` - Jobs in processing order; empty if no input
///   is configured
///
/// # Errors
/// * `Error::ConfigError` if the configuration is inconsistent
/// * Any read or open error of the first failing explicit file
/// * `Error::NotFound` if the input directory is missing
pub fn gather_templates(ns: &Namespace, config: &Config) -> Result<Vec<TemplateJob>> {
    let file_mode = config.out_mode();
    match config.mode()? {
        Mode::None => {
            debug!("No templates configured");
            Ok(Vec::new())
        }
        Mode::Single { input, output } => {
            debug!("Gathering inline template");
            let mut job = TemplateJob::inline(input);
            if let Some(output) = output {
                job = job.with_target_path(output);
            }
            Ok(vec![job.add_target(ns, file_mode)?])
        }
        Mode::Files { inputs, outputs } => {
            debug!("Gathering {} template file(s)", inputs.len());
            inputs
                .iter()
                .zip(outputs)
                .map(|(input, output)| {
                    TemplateJob::new(input, output).load_contents(ns)?.add_target(ns, file_mode)
                })
                .collect()
        }
        Mode::Directory { input_dir, output_dir, excludes } => {
            debug!(
                "Gathering templates from '{}' into '{}'",
                input_dir.display(),
                output_dir.display()
            );
            walk_dir(ns.fs(), input_dir, output_dir, excludes)
        }
    }
}
