use std::path::{Path, PathBuf};

use tmpl_gather::constants::DEFAULT_FILE_MODE;
use tmpl_gather::error::Error;
use tmpl_gather::{Config, Mode};

#[test]
fn test_empty_config_has_no_mode() {
    assert_eq!(Config::default().mode().unwrap(), Mode::None);
    assert_eq!(Config::default().out_mode(), DEFAULT_FILE_MODE);
}

#[test]
fn test_empty_strings_are_unset() {
    let config = Config {
        input: Some(String::new()),
        input_dir: Some(PathBuf::new()),
        ..Default::default()
    };
    assert_eq!(config.mode().unwrap(), Mode::None);
}

#[test]
fn test_single_mode() {
    let config = Config { input: Some("hi".to_string()), ..Default::default() };
    assert_eq!(config.mode().unwrap(), Mode::Single { input: "hi", output: None });

    let config = Config {
        input: Some("hi".to_string()),
        output_files: vec![PathBuf::from("out")],
        ..Default::default()
    };
    assert_eq!(config.mode().unwrap(), Mode::Single { input: "hi", output: Some(Path::new("out")) });

    let config = Config {
        input: Some("hi".to_string()),
        output_files: vec![PathBuf::from("a"), PathBuf::from("b")],
        ..Default::default()
    };
    assert!(matches!(config.mode(), Err(Error::ConfigError(_))));
}

#[test]
fn test_directory_mode_requires_both_roots() {
    let config = Config { input_dir: Some(PathBuf::from("in")), ..Default::default() };
    assert!(matches!(config.mode(), Err(Error::ConfigError(_))));

    let config = Config { output_dir: Some(PathBuf::from("out")), ..Default::default() };
    assert!(matches!(config.mode(), Err(Error::ConfigError(_))));

    let config = Config {
        input_dir: Some(PathBuf::from("in")),
        output_dir: Some(PathBuf::from("out")),
        exclude_glob: vec!["in/skip".to_string()],
        ..Default::default()
    };
    match config.mode().unwrap() {
        Mode::Directory { input_dir, output_dir, excludes } => {
            assert_eq!(input_dir, Path::new("in"));
            assert_eq!(output_dir, Path::new("out"));
            assert_eq!(excludes, ["in/skip".to_string()]);
        }
        other => panic!("Expected directory mode, got {:?}", other),
    }
}

#[test]
fn test_modes_are_exclusive() {
    let config = Config {
        input: Some("hi".to_string()),
        input_files: vec![PathBuf::from("a")],
        output_files: vec![PathBuf::from("b")],
        ..Default::default()
    };
    assert!(matches!(config.mode(), Err(Error::ConfigError(_))));

    let config = Config {
        input_files: vec![PathBuf::from("a")],
        input_dir: Some(PathBuf::from("in")),
        output_dir: Some(PathBuf::from("out")),
        ..Default::default()
    };
    assert!(matches!(config.mode(), Err(Error::ConfigError(_))));
}

#[test]
fn test_output_files_without_inputs() {
    let config = Config { output_files: vec![PathBuf::from("out")], ..Default::default() };
    assert_eq!(config.mode().unwrap(), Mode::None);
}

#[test]
fn test_parse_json() {
    let config = Config::parse(
        r#"{"inputFiles": ["a", "b"], "outputFiles": ["x", "y"], "outMode": 384}"#,
    )
    .unwrap();
    assert_eq!(config.input_files, vec![PathBuf::from("a"), PathBuf::from("b")]);
    assert_eq!(config.output_files, vec![PathBuf::from("x"), PathBuf::from("y")]);
    assert_eq!(config.out_mode(), 0o600);
}

#[test]
fn test_parse_yaml() {
    let config = Config::parse(
        "inputDir: templates\noutputDir: build\nexcludes:\n  - templates/*.bak\noutMode: \"0640\"\n",
    )
    .unwrap();
    assert_eq!(config.input_dir, Some(PathBuf::from("templates")));
    assert_eq!(config.output_dir, Some(PathBuf::from("build")));
    assert_eq!(config.exclude_glob, vec!["templates/*.bak".to_string()]);
    assert_eq!(config.out_mode, Some(0o640));
}

#[test]
fn test_parse_inline_alias() {
    let config = Config::parse(r#"{"in": "hello {{ name }}"}"#).unwrap();
    assert_eq!(config.input.as_deref(), Some("hello {{ name }}"));
}

#[test]
fn test_parse_invalid() {
    let result = Config::parse("inputFiles: [unterminated");
    assert!(matches!(result, Err(Error::ConfigError(_))));

    let result = Config::parse(r#"{"outMode": "rwx"}"#);
    assert!(matches!(result, Err(Error::ConfigError(_))));
}
