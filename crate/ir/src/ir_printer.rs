use std::fmt::Write as _;

use crate::ir_node::{IrKind, IrNode, IrValue};

/// Renders an IR tree as the depth-first, tagged-node text format described in
/// `§6` ("IR surface"), for the CLI's `--emit ir` flag and for snapshotting in
/// tests.
pub fn print_ir(root: &IrNode) -> String {
    let mut out = String::new();
    write_node(&mut out, root, 0);
    out
}

fn write_node(out: &mut String, node: &IrNode, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{indent}{}", kind_label(&node.kind));
    if let Some(ty) = node.ty {
        let _ = write!(out, " : ty#{}", ty.0);
    }
    out.push('\n');
    for child in &node.children {
        write_node(out, child, depth + 1);
    }
}

fn kind_label(kind: &IrKind) -> String {
    match kind {
        IrKind::Block => "block".to_string(),
        IrKind::Assign { name } => format!("assign {name}"),
        IrKind::Const { value } => format!("const {}", format_value(value)),
        IrKind::Var { name } => format!("var {name}"),
        IrKind::BinOp { op } => format!("binop {op}"),
        IrKind::Call { name } => format!("call {name}"),
        IrKind::Return => "return".to_string(),
        IrKind::Load { name } => format!("load {name}"),
        IrKind::Store { name } => format!("store {name}"),
        IrKind::Jump { label } => format!("jump {label}"),
        IrKind::JumpIfFalse { label } => format!("jump_if_false {label}"),
        IrKind::Label { name } => format!("label {name}"),
        IrKind::Nop => "nop".to_string(),
    }
}

/// Renders an IR tree as a flat, assembly-like instruction stream — the
/// other `--emit` option in `§6`. Operands are linearized depth-first ahead
/// of the operation that consumes them, stack-machine style.
pub fn print_asm(root: &IrNode) -> String {
    let mut out = String::new();
    emit_asm(&mut out, root);
    out
}

fn emit_asm(out: &mut String, node: &IrNode) {
    match &node.kind {
        IrKind::Block => {
            for child in &node.children {
                emit_asm(out, child);
            }
        }
        IrKind::Assign { name } => {
            for child in &node.children {
                emit_asm(out, child);
            }
            let _ = writeln!(out, "ASSIGN {name}");
        }
        IrKind::Const { value } => {
            let _ = writeln!(out, "CONST {}", format_value(value));
        }
        IrKind::Var { name } => {
            let _ = writeln!(out, "VAR {name}");
        }
        IrKind::BinOp { op } => {
            for child in &node.children {
                emit_asm(out, child);
            }
            let _ = writeln!(out, "BINOP {op}");
        }
        IrKind::Call { name } => {
            for child in &node.children {
                emit_asm(out, child);
            }
            let _ = writeln!(out, "CALL {name} {}", node.children.len());
        }
        IrKind::Return => {
            for child in &node.children {
                emit_asm(out, child);
            }
            let _ = writeln!(out, "RETURN");
        }
        IrKind::Load { name } => {
            let _ = writeln!(out, "LOAD {name}");
        }
        IrKind::Store { name } => {
            for child in &node.children {
                emit_asm(out, child);
            }
            let _ = writeln!(out, "STORE {name}");
        }
        IrKind::Jump { label } => {
            let _ = writeln!(out, "JUMP {label}");
        }
        IrKind::JumpIfFalse { label } => {
            let _ = writeln!(out, "JUMP_IF_FALSE {label}");
        }
        IrKind::Label { name } => {
            let _ = writeln!(out, "{name}:");
        }
        IrKind::Nop => {
            let _ = writeln!(out, "NOP");
        }
    }
}

fn format_value(value: &IrValue) -> String {
    match value {
        IrValue::Integer(i) => i.to_string(),
        IrValue::Float(f) => f.to_string(),
        IrValue::String(s) => format!("{s:?}"),
        IrValue::Bool(b) => b.to_string(),
        IrValue::Unit => "()".to_string(),
    }
}
