/// A registered textual macro: `pattern` is matched literally (no hygiene, no
/// parameter binding — `§4.9` scopes this to plain substitution).
#[derive(Debug, Clone)]
pub struct MacroDefinition {
    pub name: String,
    pub pattern: String,
    pub replacement: String,
}

/// Runs source text through a single expansion pre-pass before it reaches the
/// lexer (`§4.9`): `source text -> expanded text -> lexer`.
///
/// Expansion is a single left-to-right scan. For each registered macro, in
/// registration order, only its *first* remaining occurrence in the text is
/// replaced — this is what resolves the "first occurrence per macro per pass"
/// wording when two patterns overlap: whichever macro was registered first
/// claims the match.
pub struct MacroRegistry {
    macros: Vec<MacroDefinition>,
}

impl Default for MacroRegistry {
    fn default() -> Self {
        MacroRegistry::new()
    }
}

impl MacroRegistry {
    pub fn new() -> Self {
        MacroRegistry { macros: Vec::new() }
    }

    /// Registers a macro; later calls are lower priority than earlier ones when
    /// two patterns would otherwise both match at the same position.
    pub fn register(&mut self, name: impl Into<String>, pattern: impl Into<String>, replacement: impl Into<String>) {
        self.macros.push(MacroDefinition { name: name.into(), pattern: pattern.into(), replacement: replacement.into() });
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    /// Applies the single expansion pre-pass and returns the expanded text.
    pub fn expand(&self, source: &str) -> String {
        let mut text = source.to_string();
        for definition in &self.macros {
            if let Some(position) = text.find(&definition.pattern) {
                text.replace_range(position..position + definition.pattern.len(), &definition.replacement);
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_first_occurrence_is_replaced() {
        let mut registry = MacroRegistry::new();
        registry.register("double_zero", "0", "00");
        let expanded = registry.expand("a0b0");
        assert_eq!(expanded, "a00b0");
    }

    #[test]
    fn earlier_registration_wins_on_overlap() {
        let mut registry = MacroRegistry::new();
        registry.register("first", "ab", "X");
        registry.register("second", "a", "Y");
        let expanded = registry.expand("ab");
        assert_eq!(expanded, "X");
    }

    #[test]
    fn unmatched_macro_leaves_text_untouched() {
        let registry = MacroRegistry::new();
        assert_eq!(registry.expand("unchanged"), "unchanged");
    }
}
