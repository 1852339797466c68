//! Code-size pass (`§4.8`): removes `Nop` children of any node and collapses
//! singleton `Block`s — a `Block` with exactly one child is replaced by that
//! child.

use ferrolite_ir::{IrKind, IrNode};

use crate::pass::Pass;

pub struct CodeSizePass;

impl Pass for CodeSizePass {
    fn name(&self) -> &'static str {
        "code-size"
    }

    fn run(&mut self, node: &mut IrNode) -> bool {
        let mut changed = false;
        for child in &mut node.children {
            changed |= self.run(child);
        }

        let before = node.children.len();
        node.children.retain(|child| !matches!(child.kind, IrKind::Nop));
        changed |= node.children.len() != before;

        for child in &mut node.children {
            if matches!(child.kind, IrKind::Block) && child.children.len() == 1 {
                *child = child.children.pop().expect("just checked len == 1");
                changed = true;
            }
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrolite_ir::IrValue;

    #[test]
    fn removes_nop_children() {
        let mut block = IrNode::block(vec![
            IrNode::leaf(IrKind::Nop),
            IrNode::leaf(IrKind::Const { value: IrValue::Integer(1) }),
            IrNode::leaf(IrKind::Nop),
        ]);
        assert!(CodeSizePass.run(&mut block));
        assert_eq!(block.children.len(), 1);
    }

    #[test]
    fn collapses_singleton_block_child() {
        let singleton = IrNode::block(vec![IrNode::leaf(IrKind::Const { value: IrValue::Integer(7) })]);
        let mut outer = IrNode::block(vec![singleton]);
        assert!(CodeSizePass.run(&mut outer));
        assert!(matches!(outer.children[0].kind, IrKind::Const { .. }));
    }

    #[test]
    fn leaves_multi_child_block_alone() {
        let mut outer = IrNode::block(vec![IrNode::block(vec![IrNode::leaf(IrKind::Const { value: IrValue::Integer(1) }), IrNode::leaf(IrKind::Const { value: IrValue::Integer(2) })])]);
        assert!(!CodeSizePass.run(&mut outer));
        assert!(matches!(outer.children[0].kind, IrKind::Block));
    }
}
