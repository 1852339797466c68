//! The diagnostic message format (`§6`): severity/category, file:line:column,
//! and the caret-annotated source excerpt.

mod common;

use common::{compile_cmd, write_source};
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
#[case("fn main() { missing_name; }", "error")]
#[case("let x = 1; { let x = 2; }", "warning")]
fn diagnostic_lines_carry_file_and_position(#[case] source: &str, #[case] severity_word: &str) {
    let (_dir, path) = write_source(source);
    compile_cmd(&path)
        .assert()
        .stderr(predicate::str::contains(severity_word))
        .stderr(predicate::str::contains("input.fl:1:"));
}

#[test]
fn verbose_flag_raises_tracing_output_without_changing_diagnostics() {
    let (_dir, path) = write_source("let x = 1;");
    let quiet = compile_cmd(&path).assert().success();
    let quiet_stdout = String::from_utf8(quiet.get_output().stdout.clone()).unwrap();

    let (_dir2, path2) = write_source("let x = 1;");
    let verbose = compile_cmd(&path2).arg("-vv").assert().success();
    let verbose_stdout = String::from_utf8(verbose.get_output().stdout.clone()).unwrap();

    assert_eq!(quiet_stdout, verbose_stdout);
}
