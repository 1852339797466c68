//! Cross-phase shared state: the compilation context (types + symbols), the
//! diagnostics sink, and the process-wide stdlib/macro registries.

pub mod compilation_context;
pub mod diagnostic_engine;
pub mod macro_registry;
pub mod stdlib_registry;
pub mod symbol_table;

pub use compilation_context::CompilationContext;
pub use diagnostic_engine::{Diagnostic, DiagnosticEngine, Suggestion};
pub use macro_registry::{MacroDefinition, MacroRegistry};
pub use stdlib_registry::{StdlibRegistry, StdlibSignature};
pub use symbol_table::{Symbol, SymbolKind, SymbolTable};
