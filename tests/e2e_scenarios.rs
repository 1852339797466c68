//! The six literal end-to-end scenarios from the compiler's testable-properties
//! section, run against the real `ferrolite compile` binary rather than the
//! library entry points unit tests already exercise.

mod common;

use common::{compile_cmd, write_source};
use predicates::prelude::*;

#[test]
fn s1_constant_folded_arithmetic_emits_no_diagnostics() {
    let (_dir, path) = write_source("let x = 1 + 2 * 3;");
    compile_cmd(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("assign x"))
        .stdout(predicate::str::contains("const 7"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn s2_type_error_still_reaches_lowering() {
    let (_dir, path) = write_source("let x: bool = 1 + 2;");
    compile_cmd(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("1 error"))
        .stdout(predicate::str::contains("assign x"))
        .stdout(predicate::str::contains("const 3"));
}

#[test]
fn s3_syntax_error_recovers_and_still_lowers_the_next_statement() {
    let (_dir, path) = write_source("let x = ; let y = 42;");
    compile_cmd(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("1 error"))
        .stdout(predicate::str::contains("assign y"))
        .stdout(predicate::str::contains("const 42"));
}

#[test]
fn s4_undefined_variable_reports_exactly_one_semantic_error() {
    let (_dir, path) = write_source("fn main() { undefined_variable; }");
    compile_cmd(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("1 error"));
}

#[test]
fn s5_dead_code_elimination_drops_the_unreachable_second_return() {
    let (_dir, path) = write_source("fn f() -> i32 { return 1; return 2; }");
    compile_cmd(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("const 1"))
        .stdout(predicate::str::contains("const 2").not());
}

#[test]
fn s6_shadowing_in_a_nested_block_is_a_warning_not_an_error() {
    let (_dir, path) = write_source("let x = 1; { let x = 2; }");
    compile_cmd(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("1 warning"))
        .stderr(predicate::str::contains("error").not());
}
