//! Redundant-load elimination (`§4.8`, sketch): within a straight-line block,
//! a second `Load` of a name not intervened by a `Store` of that name or any
//! `Call` is replaced by a `Var` reference to the already-available value,
//! matching the distinction `ir_node` draws between an explicit `Load` and a
//! plain name reference.

use std::collections::HashSet;

use ferrolite_ir::{IrKind, IrNode};

use crate::pass::Pass;

pub struct RedundantLoadElimination;

impl Pass for RedundantLoadElimination {
    fn name(&self) -> &'static str {
        "redundant-load-elimination"
    }

    fn run(&mut self, node: &mut IrNode) -> bool {
        let mut available = HashSet::new();
        eliminate(node, &mut available)
    }
}

fn eliminate(node: &mut IrNode, available: &mut HashSet<String>) -> bool {
    // A nested block starts its own straight-line run; availability from the
    // enclosing sequence doesn't carry in or out of it.
    if matches!(node.kind, IrKind::Block) {
        let mut nested = HashSet::new();
        let mut changed = false;
        for child in &mut node.children {
            changed |= eliminate(child, &mut nested);
        }
        return changed;
    }

    let mut changed = false;
    for child in &mut node.children {
        changed |= eliminate(child, available);
    }

    match &node.kind {
        IrKind::Load { name } => {
            if available.contains(name) {
                node.kind = IrKind::Var { name: name.clone() };
                changed = true;
            } else {
                available.insert(name.clone());
            }
        }
        IrKind::Store { name } => {
            available.remove(name);
        }
        IrKind::Call { .. } => {
            available.clear();
        }
        _ => {}
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrolite_ir::ast::BinaryOperator;
    use ferrolite_ir::IrValue;

    #[test]
    fn second_load_of_same_name_becomes_a_var_reference() {
        let mut block = IrNode::block(vec![
            IrNode::leaf(IrKind::Load { name: "x".into() }),
            IrNode::leaf(IrKind::Load { name: "x".into() }),
        ]);
        assert!(RedundantLoadElimination.run(&mut block));
        assert!(matches!(block.children[0].kind, IrKind::Load { .. }));
        assert!(matches!(block.children[1].kind, IrKind::Var { .. }));
    }

    #[test]
    fn store_between_loads_keeps_the_second_load() {
        let mut block = IrNode::block(vec![
            IrNode::leaf(IrKind::Load { name: "x".into() }),
            IrNode::new(IrKind::Store { name: "x".into() }, vec![IrNode::leaf(IrKind::Const { value: IrValue::Integer(5) })]),
            IrNode::leaf(IrKind::Load { name: "x".into() }),
        ]);
        assert!(!RedundantLoadElimination.run(&mut block));
        assert!(matches!(block.children[2].kind, IrKind::Load { .. }));
    }

    #[test]
    fn call_between_loads_keeps_the_second_load() {
        let mut block = IrNode::block(vec![
            IrNode::leaf(IrKind::Load { name: "x".into() }),
            IrNode::new(IrKind::Call { name: "f".into() }, vec![]),
            IrNode::leaf(IrKind::Load { name: "x".into() }),
        ]);
        assert!(!RedundantLoadElimination.run(&mut block));
        assert!(matches!(block.children[2].kind, IrKind::Load { .. }));
    }

    #[test]
    fn redundant_load_inside_a_binop_is_replaced() {
        let mut block = IrNode::block(vec![
            IrNode::leaf(IrKind::Load { name: "x".into() }),
            IrNode::new(IrKind::BinOp { op: BinaryOperator::Add }, vec![IrNode::leaf(IrKind::Load { name: "x".into() }), IrNode::leaf(IrKind::Const { value: IrValue::Integer(1) })]),
        ]);
        assert!(RedundantLoadElimination.run(&mut block));
        assert!(matches!(block.children[1].children[0].kind, IrKind::Var { .. }));
    }
}
