use std::collections::HashMap;

use ferrolite_types::TypeId;

/// The role a symbol plays, used both for diagnostics ("function already
/// defined") and by the semantic analyzer to decide what's callable vs.
/// assignable (`§3.5`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// A primitive or registered type name, resolvable directly to a `TypeId`.
    Type,
    Variable { mutable: bool },
    Function,
    Struct,
    Enum,
    TypeAlias,
    Const,
}

impl SymbolKind {
    pub fn description(&self) -> &'static str {
        match self {
            SymbolKind::Type => "type",
            SymbolKind::Variable { .. } => "variable",
            SymbolKind::Function => "function",
            SymbolKind::Struct => "struct",
            SymbolKind::Enum => "enum",
            SymbolKind::TypeAlias => "type alias",
            SymbolKind::Const => "constant",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub type_id: TypeId,
}

struct ScopeNode {
    parent: Option<usize>,
    symbols: HashMap<String, Symbol>,
}

/// A stack of lexical scopes (`§3.5`, `§9`).
///
/// Scopes live in a flat, append-only arena indexed by `usize` rather than
/// linked by heap pointers: a scope references its parent by arena index, which
/// sidesteps the ownership-cycle problem a doubly-linked scope tree would
/// otherwise create. `current` tracks which arena slot is presently active;
/// `begin_scope`/`end_scope` push and pop along the parent chain, strictly
/// LIFO, so the arena never needs to shrink.
pub struct SymbolTable {
    scopes: Vec<ScopeNode>,
    current: usize,
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable { scopes: vec![ScopeNode { parent: None, symbols: HashMap::new() }], current: 0 }
    }

    /// Opens a new scope nested under the current one.
    pub fn begin_scope(&mut self) {
        self.scopes.push(ScopeNode { parent: Some(self.current), symbols: HashMap::new() });
        self.current = self.scopes.len() - 1;
    }

    /// Closes the current scope, returning to its parent.
    ///
    /// Panics if called on the root scope — callers must balance every
    /// `begin_scope` with exactly one `end_scope` (`§5`'s resource discipline).
    pub fn end_scope(&mut self) {
        self.current = self.scopes[self.current]
            .parent
            .expect("end_scope called without a matching begin_scope");
    }

    pub fn current_depth(&self) -> usize {
        let mut depth = 0;
        let mut node = self.current;
        while let Some(parent) = self.scopes[node].parent {
            depth += 1;
            node = parent;
        }
        depth
    }

    /// Defines `name` in the *current* scope only. Redefining a name already
    /// present in this same scope is an error; shadowing a name from an
    /// enclosing scope is allowed (the caller decides whether to additionally
    /// warn about it, per `§4.6`).
    pub fn define(&mut self, name: String, kind: SymbolKind, type_id: TypeId) -> Result<(), String> {
        let scope = &mut self.scopes[self.current];
        if let Some(existing) = scope.symbols.get(&name) {
            return Err(format!(
                "{} '{}' is already defined in this scope",
                existing.kind.description(),
                name
            ));
        }
        scope.symbols.insert(name.clone(), Symbol { name, kind, type_id });
        Ok(())
    }

    /// Looks up `name` starting at the current scope and searching outward.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        let mut node = Some(self.current);
        while let Some(index) = node {
            if let Some(symbol) = self.scopes[index].symbols.get(name) {
                return Some(symbol);
            }
            node = self.scopes[index].parent;
        }
        None
    }

    /// Looks up `name` only in the current scope, ignoring ancestors — used to
    /// detect same-scope redefinition before a `define` call.
    pub fn lookup_local(&self, name: &str) -> Option<&Symbol> {
        self.scopes[self.current].symbols.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tid() -> TypeId {
        TypeId::new()
    }

    #[test]
    fn lookup_searches_outward() {
        let mut table = SymbolTable::new();
        table.define("x".into(), SymbolKind::Variable { mutable: false }, tid()).unwrap();
        table.begin_scope();
        assert!(table.lookup("x").is_some());
        table.end_scope();
    }

    #[test]
    fn redefinition_in_same_scope_is_an_error() {
        let mut table = SymbolTable::new();
        table.define("x".into(), SymbolKind::Variable { mutable: false }, tid()).unwrap();
        assert!(table.define("x".into(), SymbolKind::Variable { mutable: false }, tid()).is_err());
    }

    #[test]
    fn shadowing_in_nested_scope_is_allowed() {
        let mut table = SymbolTable::new();
        table.define("x".into(), SymbolKind::Variable { mutable: false }, tid()).unwrap();
        table.begin_scope();
        assert!(table.define("x".into(), SymbolKind::Variable { mutable: true }, tid()).is_ok());
        table.end_scope();
        assert!(table.lookup_local("x").is_none());
    }

    #[test]
    fn scope_discipline_restores_depth() {
        let mut table = SymbolTable::new();
        let start = table.current_depth();
        table.begin_scope();
        table.begin_scope();
        table.end_scope();
        table.end_scope();
        assert_eq!(table.current_depth(), start);
    }
}
