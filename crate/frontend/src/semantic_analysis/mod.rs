//! Scope resolution, bidirectional type checking, and AST-to-IR lowering
//! (`§4.5`-`§4.7`), consolidated from the sprawling per-concern module tree
//! this crate's ancestor used into three passes: hoist, check, lower.

pub mod checker;
pub mod hoisting;
pub mod lowering;
pub mod operators;
pub mod type_resolution;

use ferrolite_ir::ast::Program;
use ferrolite_ir::IrNode;
use ferrolite_shared::{CompilationContext, DiagnosticEngine};

use checker::Checker;

/// Runs the full semantic pipeline over a parsed program: hoist every
/// top-level signature, type-check every statement and expression in place,
/// then lower the result to IR. Returns the lowered tree regardless of
/// whether diagnostics were reported — callers decide whether to proceed to
/// optimization based on `diagnostics.has_errors()` (`§4.1`).
pub fn analyze(mut program: Program, context: &mut CompilationContext, diagnostics: &mut DiagnosticEngine) -> IrNode {
    hoisting::hoist(&program, context, diagnostics);
    Checker::new(context, diagnostics).check_program(&mut program);
    lowering::lower_program(&program)
}
