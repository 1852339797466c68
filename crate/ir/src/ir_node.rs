use ferrolite_types::TypeId;

use crate::ast::BinaryOperator;

/// A constant folded or lowered into the IR (`§4.8`'s constant folding produces
/// these in place of a `BinOp` of two `Const`s).
#[derive(Debug, Clone, PartialEq)]
pub enum IrValue {
    Integer(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Unit,
}

/// The tag of an IR node (`§3.6`). Distinct from the AST: by the time lowering
/// produces these, every name has been resolved and control flow is explicit
/// (`If`/`While`/`For` become `Jump`/`Label` skeletons, see `§4.7`).
#[derive(Debug, Clone, PartialEq)]
pub enum IrKind {
    /// A sequence of child nodes evaluated in order.
    Block,
    /// Binds `name` to the (single) child's value.
    Assign { name: String },
    /// A literal value; never has children.
    Const { value: IrValue },
    /// A reference to a bound name; never has children.
    Var { name: String },
    /// A binary operation over exactly two children, left then right.
    BinOp { op: BinaryOperator },
    /// A call to `name` with children as arguments in order.
    Call { name: String },
    /// Returns the (optional) single child's value from the enclosing function.
    Return,
    /// Reads the current value of `name` (distinct from `Var`: emitted by
    /// lowering steps that need an explicit load they can later eliminate, e.g.
    /// redundant-load elimination in `§4.8`).
    Load { name: String },
    /// Writes the single child's value to `name`.
    Store { name: String },
    /// Unconditionally transfers control to `label`.
    Jump { label: String },
    /// Conditionally transfers control to `label` when the single child is falsy.
    JumpIfFalse { label: String },
    /// A jump target.
    Label { name: String },
    /// A no-op placeholder, emitted for declarations (symbol-table-only) and for
    /// ill-typed inputs so lowering stays total (`§4.7`).
    Nop,
}

/// An intermediate representation node (`§3.6`). Tree-shaped with children in
/// evaluation order; carries a `TypeId` once the lowering pass has one available.
#[derive(Debug, Clone)]
pub struct IrNode {
    pub kind: IrKind,
    pub children: Vec<IrNode>,
    pub ty: Option<TypeId>,
}

impl IrNode {
    pub fn new(kind: IrKind, children: Vec<IrNode>) -> Self {
        IrNode { kind, children, ty: None }
    }

    pub fn leaf(kind: IrKind) -> Self {
        IrNode { kind, children: Vec::new(), ty: None }
    }

    pub fn with_ty(mut self, ty: TypeId) -> Self {
        self.ty = Some(ty);
        self
    }

    pub fn block(children: Vec<IrNode>) -> Self {
        IrNode::new(IrKind::Block, children)
    }

    pub fn is_const(&self) -> bool {
        matches!(self.kind, IrKind::Const { .. })
    }

    pub fn as_const(&self) -> Option<&IrValue> {
        match &self.kind {
            IrKind::Const { value } => Some(value),
            _ => None,
        }
    }

    /// Names referenced anywhere in this node's subtree — by `Var`, `Load`, or
    /// `Store` — used by dead-code elimination's conservative liveness check
    /// (`§4.8`: "a name used anywhere in a descendant... is treated as live").
    pub fn referenced_names(&self, out: &mut std::collections::HashSet<String>) {
        match &self.kind {
            IrKind::Var { name } | IrKind::Load { name } | IrKind::Store { name } => {
                out.insert(name.clone());
            }
            _ => {}
        }
        for child in &self.children {
            child.referenced_names(out);
        }
    }
}
