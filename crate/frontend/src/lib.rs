//! The front half of the pipeline: turns source text into a type-checked,
//! scope-resolved AST ready for lowering to IR (`§2`).

pub mod lexer;
pub mod parser;
pub mod semantic_analysis;
pub mod token;

#[cfg(feature = "print-tokens")]
pub mod token_printer;

pub use lexer::tokenize;
pub use parser::parse;
pub use semantic_analysis::analyze;
pub use token::{Token, TokenKind};

#[cfg(feature = "print-tokens")]
pub use token_printer::TokenPrinter;
