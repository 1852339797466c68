use std::fmt;

use thiserror::Error;

use crate::error_codes::ErrorCode;
use crate::severity::Severity;

/// A single compiler-internal error, carrying enough positional information for the
/// diagnostics sink to render a caret-underlined snippet without re-deriving it.
///
/// `position` is a byte offset into the source text; `line`/`column` are the
/// 1-based human-facing coordinates derived from it via `LineInfo`.
#[derive(Debug, Clone, Error)]
#[error("{error_code}: {message}")]
pub struct CompilerError {
    pub error_code: ErrorCode,
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub position: usize,
    pub token_length: usize,
    pub severity: Severity,
    pub suggestion: Option<String>,
    /// Set once a panic-mode parser has resynchronized past this error, so the
    /// pipeline can tell "still broken" apart from "recorded and moved on".
    pub recovered: bool,
}

impl CompilerError {
    pub fn new(
        error_code: ErrorCode,
        message: impl Into<String>,
        line: usize,
        column: usize,
        position: usize,
        token_length: usize,
    ) -> Self {
        CompilerError {
            error_code,
            message: message.into(),
            line,
            column,
            position,
            token_length,
            severity: Severity::Error,
            suggestion: None,
            recovered: false,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn mark_recovered(mut self) -> Self {
        self.recovered = true;
        self
    }
}

/// Result alias used throughout the frontend and optimizer for fallible passes that
/// collect every error they find rather than bailing on the first one.
pub type CompileResult<T> = Result<T, Vec<CompilerError>>;

/// Maps byte offsets in a source file to 1-based `(line, column)` pairs.
///
/// Built once per file from the raw source text; lexer and parser both consult it
/// when constructing `CompilerError`s so line/column math lives in exactly one place.
#[derive(Debug, Clone)]
pub struct LineInfo {
    /// Byte offset of the first character of each line.
    line_starts: Vec<usize>,
}

impl LineInfo {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (offset, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(offset + 1);
            }
        }
        LineInfo { line_starts }
    }

    /// Returns the 1-based `(line, column)` for a byte offset into the source.
    pub fn line_col(&self, position: usize) -> (usize, usize) {
        let line_index = match self.line_starts.binary_search(&position) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        let line_start = self.line_starts[line_index];
        (line_index + 1, position - line_start + 1)
    }

    /// Returns the full text of the given 1-based line, without its trailing newline.
    pub fn line_text<'a>(&self, source: &'a str, line: usize) -> &'a str {
        let start = self.line_starts.get(line - 1).copied().unwrap_or(source.len());
        let end = self
            .line_starts
            .get(line)
            .map(|&s| s.saturating_sub(1))
            .unwrap_or(source.len());
        source.get(start..end).unwrap_or("")
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

/// Accumulates errors across a compilation stage that wants to keep going after a
/// failure (panic-mode recovery) instead of aborting at the first problem.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<CompilerError>,
    max_errors: Option<usize>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        ErrorCollector { errors: Vec::new(), max_errors: None }
    }

    pub fn with_max_errors(max_errors: usize) -> Self {
        ErrorCollector { errors: Vec::new(), max_errors: Some(max_errors) }
    }

    /// Records an error; returns `false` once `max_errors` has been reached, which
    /// callers should treat as a signal to stop recovering and bail out entirely.
    pub fn push(&mut self, error: CompilerError) -> bool {
        self.errors.push(error);
        match self.max_errors {
            Some(max) => self.errors.len() < max,
            None => true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[CompilerError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<CompilerError> {
        self.errors
    }

    pub fn into_result<T>(self, value: T) -> CompileResult<T> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self.errors)
        }
    }
}

impl fmt::Display for CompilerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} at {}:{}: {}",
            self.severity, self.error_code, self.line, self.column, self.message
        )
    }
}

/// Writes a plain, colorless summary of the given errors to stderr.
///
/// This is the fallback reporter used when a stage fails before a full
/// `DiagnosticEngine` (with source text and file name) is available; the rich,
/// caret-annotated rendering lives in `ferrolite_shared::diagnostic_engine`.
pub fn report_errors(errors: &[CompilerError]) {
    for error in errors {
        eprintln!("{error}");
        if let Some(suggestion) = &error.suggestion {
            eprintln!("  help: {suggestion}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_info_tracks_line_starts() {
        let info = LineInfo::new("let a = 1;\nlet b = 2;\n");
        assert_eq!(info.line_col(0), (1, 1));
        assert_eq!(info.line_col(11), (2, 1));
        assert_eq!(info.line_count(), 3);
    }

    #[test]
    fn line_info_extracts_line_text() {
        let source = "fn main() {\n    let x = 1;\n}\n";
        let info = LineInfo::new(source);
        assert_eq!(info.line_text(source, 2), "    let x = 1;");
    }

    #[test]
    fn error_collector_stops_at_max() {
        let mut collector = ErrorCollector::with_max_errors(2);
        assert!(collector.push(CompilerError::new(ErrorCode::UnexpectedToken, "a", 1, 1, 0, 1)));
        assert!(!collector.push(CompilerError::new(ErrorCode::UnexpectedToken, "b", 1, 1, 0, 1)));
        assert_eq!(collector.len(), 2);
    }
}
