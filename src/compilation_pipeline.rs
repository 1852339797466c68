//! A composable compilation pipeline over the front end and optimizer
//! (`§2`, `§7`). Every stage is total — it reports into the diagnostics sink
//! rather than failing outright — so the only early exit is a `Fatal`
//! diagnostic, checked between stages exactly as `§7` describes the driver's
//! contract with the sink.

use ferrolite_frontend::{analyze, parse, tokenize};
use ferrolite_ir::{IrNode, print_asm, print_ir};
use ferrolite_optimizer::standard_pipeline;
use ferrolite_shared::{CompilationContext, DiagnosticEngine, MacroRegistry};

use crate::cli::Emit;

/// A compilation pipeline over a single source file's text.
pub struct CompilationPipeline<'a> {
    context: CompilationContext,
    diagnostics: DiagnosticEngine,
    macros: MacroRegistry,
    source: &'a str,
}

impl<'a> CompilationPipeline<'a> {
    /// Creates a pipeline configured from the CLI's diagnostics-related flags.
    pub fn new(source: &'a str, file_name: Option<String>, max_errors: usize, recovery_mode: bool) -> Self {
        let mut diagnostics = DiagnosticEngine::new();
        if let Some(name) = file_name {
            diagnostics.set_file_name(name);
        }
        diagnostics.set_max_errors(max_errors);
        diagnostics.set_recovery_mode(recovery_mode);

        CompilationPipeline { context: CompilationContext::new(), diagnostics, macros: MacroRegistry::new(), source }
    }

    /// Registers a macro to expand before lexing (`§4.9`). Builder-style so
    /// callers can chain registrations onto `new` before `run`.
    pub fn with_macro(mut self, name: impl Into<String>, pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.macros.register(name, pattern, replacement);
        self
    }

    /// Runs macro expansion, tokenizing, parsing, semantic analysis and
    /// lowering, then the standard optimizer pipeline. Stops early only if a
    /// stage's diagnostics turn fatal; otherwise runs every stage to
    /// completion, per `§7`'s "a plain `Error` degrades later stages, it
    /// doesn't stop them".
    pub fn run(mut self) -> CompilationResult {
        let expanded = self.macros.expand(self.source);

        let tokens = tokenize(&expanded, &mut self.diagnostics);
        if !self.diagnostics.can_recover() {
            return self.finish();
        }

        let program = parse(&tokens, &mut self.diagnostics);
        if !self.diagnostics.can_recover() {
            return self.finish();
        }

        let mut ir = analyze(program, &mut self.context, &mut self.diagnostics);
        if !self.diagnostics.can_recover() {
            return self.finish();
        }

        standard_pipeline().run(&mut ir);

        CompilationResult { ir: Some(ir), diagnostics: self.diagnostics }
    }

    fn finish(self) -> CompilationResult {
        CompilationResult { ir: None, diagnostics: self.diagnostics }
    }
}

/// The pipeline's outcome: the optimized IR if lowering was reached, plus
/// every diagnostic collected along the way.
pub struct CompilationResult {
    pub ir: Option<IrNode>,
    pub diagnostics: DiagnosticEngine,
}

/// Renders `ir` in the form requested by `--emit` (`§6`'s "IR surface").
pub fn render(ir: &IrNode, emit: Emit) -> String {
    match emit {
        Emit::Ir => print_ir(ir),
        Emit::Asm => print_asm(ir),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_source_reaches_lowering_with_no_errors() {
        let source = "fn main() { let x = 1 + 2; }";
        let result = CompilationPipeline::new(source, None, 100, true).run();
        assert!(result.ir.is_some());
        assert!(!result.diagnostics.has_errors());
    }

    #[test]
    fn undefined_variable_still_reaches_lowering() {
        let source = "fn main() { undefined_variable; }";
        let result = CompilationPipeline::new(source, None, 100, true).run();
        assert!(result.ir.is_some());
        assert_eq!(result.diagnostics.error_count(), 1);
    }

    #[test]
    fn registered_macros_expand_before_lexing() {
        let source = "fn main() { let x = TWO; }";
        let result = CompilationPipeline::new(source, None, 100, true).with_macro("two", "TWO", "2").run();
        assert!(result.ir.is_some());
        assert!(!result.diagnostics.has_errors());
    }

    #[test]
    fn stdlib_calls_are_not_rejected_as_undefined() {
        let source = "fn main() { println(\"hi\"); }";
        let result = CompilationPipeline::new(source, None, 100, true).run();
        assert!(result.ir.is_some());
        assert!(!result.diagnostics.diagnostics().iter().any(|d| d.error_code == ferrolite_error::ErrorCode::UndefinedFunction));
    }
}
