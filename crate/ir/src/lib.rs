//! The AST (`§3.3`) produced by the parser, and the IR (`§3.6`) it lowers to
//! after semantic analysis.

#[cfg(feature = "print-ast")]
pub mod ast_printer;
pub mod ast;
pub mod ir_node;
pub mod ir_printer;
pub mod source_location;
pub mod visitor;

pub use ir_node::{IrKind, IrNode, IrValue};
pub use ir_printer::{print_asm, print_ir};
pub use source_location::{SourceLocation, Span};
pub use visitor::Visitor;
