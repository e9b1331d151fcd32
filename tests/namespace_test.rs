use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tmpl_gather::error::Error;
use tmpl_gather::fs::{FileSystem, MemoryFileSystem};
use tmpl_gather::{Namespace, Streams};

fn memory_namespace(stdin: &str) -> (MemoryFileSystem, Arc<Mutex<Vec<u8>>>, Namespace) {
    let fs = MemoryFileSystem::new();
    let stdout = Arc::new(Mutex::new(Vec::new()));
    let streams = Streams::new(Cursor::new(stdin.as_bytes().to_vec()), Arc::clone(&stdout));
    let ns = Namespace::new(Arc::new(fs.clone()), streams);
    (fs, stdout, ns)
}

#[test]
fn test_read_input() {
    let (fs, _, ns) = memory_namespace("bar");
    fs.add_dir("/tmp");
    fs.add_file("/tmp/foo", "foo");

    assert_eq!(ns.read_input(Path::new("/tmp/foo")).unwrap(), "foo");
    assert_eq!(ns.read_input(Path::new("-")).unwrap(), "bar");

    let err = ns.read_input(Path::new("bogus")).unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[test]
fn test_read_input_directory_is_read_error() {
    let (fs, _, ns) = memory_namespace("");
    fs.add_dir("/tmp/dir");

    let err = ns.read_input(Path::new("/tmp/dir")).unwrap_err();
    assert!(matches!(err, Error::ReadError { .. }));
}

#[test]
fn test_read_input_rejects_invalid_utf8() {
    let (fs, _, ns) = memory_namespace("");
    fs.add_file("/bin.dat", [0xff, 0xfe, 0x00]);

    let err = ns.read_input(Path::new("/bin.dat")).unwrap_err();
    assert!(matches!(err, Error::ReadError { .. }));
}

#[test]
fn test_open_out_file() {
    let (fs, _, ns) = memory_namespace("");
    fs.add_dir("/tmp");

    let target = ns.open_out_file(Path::new("/tmp/foo"), 0o644).unwrap();
    assert!(!target.is_stdout());
    assert!(fs.exists(Path::new("/tmp/foo")));
    assert_eq!(fs.file_mode("/tmp/foo"), Some(0o644));
}

#[test]
fn test_open_out_file_stdout() {
    let (_, stdout, ns) = memory_namespace("");

    let mut target = ns.open_out_file(Path::new("-"), 0o644).unwrap();
    assert!(target.is_stdout());
    assert!(ns.streams().is_stdout(&target));

    target.write_all(b"rendered").unwrap();
    assert_eq!(stdout.lock().unwrap().as_slice(), b"rendered");
}

#[test]
fn test_open_out_file_missing_parent() {
    let (_, _, ns) = memory_namespace("");

    let err = ns.open_out_file(Path::new("/nowhere/foo"), 0o644).unwrap_err();
    assert!(matches!(err, Error::WriteError { .. }));
}

#[test]
fn test_open_out_file_truncates() {
    let (fs, _, ns) = memory_namespace("");
    fs.add_file("/out", "previous contents");

    let mut target = ns.open_out_file(Path::new("/out"), 0o600).unwrap();
    target.write_all(b"new").unwrap();
    assert_eq!(fs.contents("/out"), Some(b"new".to_vec()));
}
