use colored::Colorize;
use ferrolite_error::{ErrorCode, LineInfo, Severity};
use ferrolite_ir::Span;

/// A single user-visible compiler message (`§3.7`).
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub error_code: ErrorCode,
    pub message: String,
    pub span: Span,
    pub suggestions: Vec<Suggestion>,
    pub related: Vec<Diagnostic>,
    /// Set once the stage that raised this has resynchronized past it; a
    /// clear-pass (`§4.1`) drops recovered messages from the printed summary.
    pub recovered: bool,
}

#[derive(Debug, Clone)]
pub struct Suggestion {
    pub message: String,
    pub replacement: Option<String>,
    pub span: Option<Span>,
}

/// The diagnostics sink (`§4.1`): every stage reports into this instead of
/// raising, and the driver consults it between stages to decide whether to
/// continue. One instance is created per compilation and discarded with it.
pub struct DiagnosticEngine {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    warning_count: usize,
    max_errors: usize,
    recovery_mode: bool,
    too_many_errors_reported: bool,
    file_name: Option<String>,
}

impl Default for DiagnosticEngine {
    fn default() -> Self {
        DiagnosticEngine::new()
    }
}

impl DiagnosticEngine {
    pub fn new() -> Self {
        DiagnosticEngine {
            diagnostics: Vec::new(),
            error_count: 0,
            warning_count: 0,
            max_errors: 100,
            recovery_mode: false,
            too_many_errors_reported: false,
            file_name: None,
        }
    }

    /// Appends a diagnostic; returns `false` once the cap has been reached, at
    /// which point the message is dropped (after one "too many errors" warning
    /// is queued the first time the cap is crossed).
    pub fn report(
        &mut self,
        error_code: ErrorCode,
        severity: Severity,
        message: impl Into<String>,
        span: Span,
        suggestion: Option<Suggestion>,
    ) -> bool {
        if self.diagnostics.len() >= self.max_errors {
            self.emit_too_many_errors();
            return false;
        }

        let diagnostic = Diagnostic {
            severity,
            error_code,
            message: message.into(),
            span,
            suggestions: suggestion.into_iter().collect(),
            related: Vec::new(),
            recovered: false,
        };
        tracing::debug!(code = %diagnostic.error_code, severity = %diagnostic.severity, "diagnostic reported");
        match severity {
            Severity::Error | Severity::Fatal => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
            Severity::Info => {}
        }
        self.diagnostics.push(diagnostic);
        true
    }

    pub fn emit_error(&mut self, error_code: ErrorCode, message: impl Into<String>, span: Span) -> bool {
        self.report(error_code, Severity::Error, message, span, None)
    }

    pub fn emit_warning(&mut self, error_code: ErrorCode, message: impl Into<String>, span: Span) -> bool {
        self.report(error_code, Severity::Warning, message, span, None)
    }

    pub fn emit_fatal(&mut self, error_code: ErrorCode, message: impl Into<String>, span: Span) -> bool {
        self.report(error_code, Severity::Fatal, message, span, None)
    }

    pub fn emit_with_suggestion(
        &mut self,
        error_code: ErrorCode,
        message: impl Into<String>,
        span: Span,
        suggestion: Suggestion,
    ) -> bool {
        self.report(error_code, Severity::Error, message, span, Some(suggestion))
    }

    /// True iff no `Fatal` has been reported, the cap has not been reached,
    /// and either recovery mode is on or nothing has gone wrong yet (`§4.1`).
    /// The driver consults this between stages to decide whether to continue
    /// (`§6`'s `--recovery`/`--no-recovery`, `§7`'s "driver checks the sink
    /// between stages").
    pub fn can_recover(&self) -> bool {
        let has_fatal = self.diagnostics.iter().any(|d| d.severity == Severity::Fatal);
        let blocked_by_errors = !self.recovery_mode && self.has_errors();
        !has_fatal && !blocked_by_errors && self.diagnostics.len() < self.max_errors
    }

    /// A stage's recovery decision for a given diagnostic kind; the mapping is
    /// stage-defined (`§7`), but every stage shares the same baseline rule: keep
    /// going unless a `Fatal` has already shut the pipeline down.
    pub fn try_recover(&mut self, error_code: ErrorCode) -> bool {
        let recover = self.can_recover();
        if recover {
            if let Some(last) = self.diagnostics.iter_mut().rev().find(|d| d.error_code == error_code && !d.recovered) {
                last.recovered = true;
            }
        }
        recover
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn set_recovery_mode(&mut self, enabled: bool) {
        self.recovery_mode = enabled;
    }

    pub fn is_recovery_mode(&self) -> bool {
        self.recovery_mode
    }

    pub fn set_file_name(&mut self, file_name: String) {
        self.file_name = Some(file_name);
    }

    pub fn set_max_errors(&mut self, max_errors: usize) {
        self.max_errors = max_errors;
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Drops every diagnostic marked `recovered`, as called for by the
    /// clear-pass in `§4.1` before printing a final summary.
    pub fn clear_recovered(&mut self) {
        self.diagnostics.retain(|d| !d.recovered);
    }

    /// Renders every diagnostic to stderr, rustc-style, followed by a summary line.
    pub fn report_all(&self, source: &str) {
        let line_info = LineInfo::new(source);
        for diagnostic in &self.diagnostics {
            self.report_diagnostic(diagnostic, source, &line_info);
        }
        if self.error_count > 0 || self.warning_count > 0 {
            self.report_summary();
        }
    }

    fn emit_too_many_errors(&mut self) {
        if self.too_many_errors_reported {
            return;
        }
        self.too_many_errors_reported = true;
        tracing::warn!(max = self.max_errors, "too many diagnostics, dropping the rest");
        self.diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            error_code: ErrorCode::GenericCompileError,
            message: format!("too many errors ({}), stopping compilation", self.max_errors),
            span: Span::point(Default::default()),
            suggestions: Vec::new(),
            related: Vec::new(),
            recovered: false,
        });
    }

    fn report_diagnostic(&self, diagnostic: &Diagnostic, source: &str, line_info: &LineInfo) {
        let severity_str = match diagnostic.severity {
            Severity::Fatal => "fatal".red().bold(),
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Info => "note".blue().bold(),
        };

        let line = diagnostic.span.start.line;
        let col = diagnostic.span.start.column;
        let current_line_text = line_info.line_text(source, line);
        let file = self.file_name.as_deref().unwrap_or("<source>");

        eprintln!("{} {}: {}", severity_str, diagnostic.error_code.to_string().bold(), diagnostic.message);
        eprintln!("  {} {}:{}:{}", "-->".blue(), file, line, col);

        let line_num_str = line.to_string();
        let indent = " ".repeat(line_num_str.len() + 1);
        let pipe = "|".blue();

        eprintln!("{indent}{pipe}");
        eprintln!("{} {} {}", line_num_str.blue(), pipe, current_line_text);

        let caret = "^".repeat(diagnostic.span.len.max(1));
        let marker = " ".repeat(col.saturating_sub(1)) + &caret.red().bold().to_string();
        eprintln!("{indent}{pipe} {marker}");

        for suggestion in &diagnostic.suggestions {
            eprintln!("{indent}{pipe} {}: {}", "help".green().bold(), suggestion.message);
        }
        eprintln!();
    }

    fn report_summary(&self) {
        let mut parts = Vec::new();
        if self.error_count > 0 {
            let word = if self.error_count == 1 { "error" } else { "errors" };
            parts.push(format!("{} {}", self.error_count, word).red().to_string());
        }
        if self.warning_count > 0 {
            let word = if self.warning_count == 1 { "warning" } else { "warnings" };
            parts.push(format!("{} {}", self.warning_count, word).yellow().to_string());
        }
        if !parts.is_empty() {
            eprintln!("compilation finished with {}", parts.join(", "));
        }
    }
}
