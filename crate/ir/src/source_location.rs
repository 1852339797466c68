/// A location in the source code: byte offset plus the 1-based line/column it maps
/// to. Every token, AST node, IR node, and diagnostic carries one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// The position in the source code (byte offset)
    pub position: usize,
    /// The line number (1-based)
    pub line: usize,
    /// The column number (1-based)
    pub column: usize,
}

impl SourceLocation {
    pub fn new(position: usize, line: usize, column: usize) -> Self {
        Self { position, line, column }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self { position: 0, line: 1, column: 1 }
    }
}

/// A start location plus a byte length, used by the parser and diagnostics to
/// underline a specific range of source text rather than a single point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: SourceLocation,
    pub len: usize,
}

impl Span {
    pub fn new(start: SourceLocation, len: usize) -> Self {
        Span { start, len }
    }

    /// A zero-width span at a single location, for nodes synthesized during
    /// recovery that have no real source extent.
    pub fn point(start: SourceLocation) -> Self {
        Span { start, len: 0 }
    }

    /// The smallest span enclosing both `self` and `other`, used when building a
    /// parent node's span from its children's spans (`§4.3`'s well-formedness
    /// invariant: a parent's span always contains its children's).
    pub fn to(&self, other: Span) -> Span {
        let end = other.start.position + other.len;
        Span { start: self.start, len: end.saturating_sub(self.start.position) }
    }
}
