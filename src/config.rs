//! Resolver configuration.
//! The host CLI fills in a [`Config`]; [`Config::mode`] decides which
//! acquisition mode it describes.

use crate::constants::DEFAULT_FILE_MODE;
use crate::error::{Error, Result};
use log::debug;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

/// Input/output settings consumed by the gatherer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Literal template text
    #[serde(alias = "in")]
    pub input: Option<String>,
    /// Explicit template files, `-` for standard input
    pub input_files: Vec<PathBuf>,
    /// Destinations, positionally aligned with `input_files`
    pub output_files: Vec<PathBuf>,
    /// Root of a template tree
    pub input_dir: Option<PathBuf>,
    /// Root the rendered tree is written under
    pub output_dir: Option<PathBuf>,
    /// Patterns excluded from directory mode
    #[serde(alias = "excludes")]
    pub exclude_glob: Vec<String>,
    /// Permission mode for created files; octal strings such as `"0600"` are accepted
    #[serde(deserialize_with = "deserialize_mode")]
    pub out_mode: Option<u32>,
}

/// The acquisition mode a configuration selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode<'a> {
    /// Nothing to do.
    None,
    /// One inline template.
    Single { input: &'a str, output: Option<&'a Path> },
    /// Positional pairs of source and destination files.
    Files { inputs: &'a [PathBuf], outputs: &'a [PathBuf] },
    /// A template tree mirrored under an output root.
    Directory { input_dir: &'a Path, output_dir: &'a Path, excludes: &'a [String] },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMode {
    Number(u32),
    Octal(String),
}

fn deserialize_mode<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<u32>, D::Error> {
    match Option::<RawMode>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawMode::Number(mode)) => Ok(Some(mode)),
        Some(RawMode::Octal(s)) => {
            let digits = s.trim_start_matches("0o");
            u32::from_str_radix(digits, 8)
                .map(Some)
                .map_err(|e| serde::de::Error::custom(format!("invalid file mode '{}': {}", s, e)))
        }
    }
}

fn non_empty(path: &Option<PathBuf>) -> Option<&Path> {
    path.as_deref().filter(|p| !p.as_os_str().is_empty())
}

impl Config {
    /// Parses a configuration document.
    ///
    /// # Arguments
    /// * `content` - JSON or YAML text
    ///
    /// # Errors
    /// * `Error::ConfigError` if the content is neither valid JSON nor YAML
    pub fn parse(content: &str) -> Result<Self> {
        match serde_json::from_str(content) {
            Ok(config) => Ok(config),
            Err(_) => serde_yaml::from_str(content)
                .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {}", e))),
        }
    }

    /// Mode for created destination files.
    pub fn out_mode(&self) -> u32 {
        self.out_mode.unwrap_or(DEFAULT_FILE_MODE)
    }

    /// Determines the active acquisition mode.
    ///
    /// # Errors
    /// * `Error::ConfigError` if more than one input kind is set, a directory
    ///   is given without its counterpart, or the explicit lists do not line up
    ///
    /// Output files given without any input select [`Mode::None`].
    pub fn mode(&self) -> Result<Mode<'_>> {
        let input = self.input.as_deref().filter(|s| !s.is_empty());
        let input_dir = non_empty(&self.input_dir);
        let output_dir = non_empty(&self.output_dir);

        let selected = [input.is_some(), !self.input_files.is_empty(), input_dir.is_some()]
            .into_iter()
            .filter(|set| *set)
            .count();
        if selected > 1 {
            return Err(Error::ConfigError(
                "only one of input, input files or input directory may be set".to_string(),
            ));
        }

        match (input_dir, output_dir) {
            (Some(input_dir), Some(output_dir)) => {
                if !self.output_files.is_empty() {
                    return Err(Error::ConfigError(
                        "output files cannot be combined with an input directory".to_string(),
                    ));
                }
                return Ok(Mode::Directory { input_dir, output_dir, excludes: &self.exclude_glob });
            }
            (Some(_), None) => {
                return Err(Error::ConfigError(
                    "an input directory requires an output directory".to_string(),
                ));
            }
            (None, Some(_)) => {
                return Err(Error::ConfigError(
                    "an output directory requires an input directory".to_string(),
                ));
            }
            (None, None) => {}
        }

        if let Some(input) = input {
            if self.output_files.len() > 1 {
                return Err(Error::ConfigError(format!(
                    "an inline template has one output, got {}",
                    self.output_files.len()
                )));
            }
            return Ok(Mode::Single { input, output: self.output_files.first().map(PathBuf::as_path) });
        }

        if self.input_files.is_empty() {
            if !self.output_files.is_empty() {
                debug!("ignoring {} output files with no inputs", self.output_files.len());
            }
            return Ok(Mode::None);
        }
        if self.input_files.len() != self.output_files.len() {
            return Err(Error::ConfigError(format!(
                "{} input files but {} output files",
                self.input_files.len(),
                self.output_files.len()
            )));
        }
        Ok(Mode::Files { inputs: &self.input_files, outputs: &self.output_files })
    }
}
