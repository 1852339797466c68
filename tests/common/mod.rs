use std::fs;

use assert_cmd::Command;
use tempfile::TempDir;

/// Writes `source` to a temp file and returns the directory (kept alive by the
/// caller) plus the file path, mirroring the CLI's single-file-argument shape.
pub fn write_source(source: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("input.fl");
    fs::write(&path, source).expect("write source");
    (dir, path)
}

/// A `compile` invocation against the built binary, ready for further
/// argument/assertion chaining.
pub fn compile_cmd(path: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("ferrolite").expect("ferrolite binary");
    cmd.arg("compile").arg(path);
    cmd
}
