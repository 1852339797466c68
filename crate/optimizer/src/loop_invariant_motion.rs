//! Loop-invariant code motion (`§4.8`, sketch): within a `While`/`For`
//! skeleton — `Label(start), condition, JumpIfFalse(end), body, ...` as
//! produced by lowering — identify direct children of `body` that are pure
//! (a `Const`, or a `BinOp` of pure children referencing no name modified
//! anywhere in the body) and hoist them ahead of the loop, preserving their
//! relative order.

use std::collections::HashSet;

use ferrolite_ir::{IrKind, IrNode};

use crate::pass::Pass;

pub struct LoopInvariantMotion;

impl Pass for LoopInvariantMotion {
    fn name(&self) -> &'static str {
        "loop-invariant-motion"
    }

    fn run(&mut self, node: &mut IrNode) -> bool {
        let mut changed = false;
        for child in &mut node.children {
            changed |= self.run(child);
        }

        if matches!(node.kind, IrKind::Block) {
            changed |= hoist_invariants(node);
        }

        changed
    }
}

fn is_loop_start_label(name: &str) -> bool {
    name.starts_with("loop_") || name.starts_with("forloop_")
}

/// Loop body sits three slots after its start label in both skeletons:
/// `condition`, `JumpIfFalse`, then `body`.
const BODY_OFFSET: usize = 3;

fn hoist_invariants(block: &mut IrNode) -> bool {
    let mut changed = false;
    let mut i = 0;
    while i < block.children.len() {
        let is_loop_label = matches!(&block.children[i].kind, IrKind::Label { name } if is_loop_start_label(name));
        if !is_loop_label {
            i += 1;
            continue;
        }

        let body_index = i + BODY_OFFSET;
        if body_index >= block.children.len() || !matches!(block.children[body_index].kind, IrKind::Block) {
            i += 1;
            continue;
        }

        let mut modified = HashSet::new();
        collect_modified(&block.children[body_index], &mut modified);

        let mut hoisted = Vec::new();
        {
            let body = &mut block.children[body_index];
            let mut j = 0;
            while j < body.children.len() {
                if is_invariant(&body.children[j], &modified) {
                    hoisted.push(body.children.remove(j));
                } else {
                    j += 1;
                }
            }
        }

        if !hoisted.is_empty() {
            changed = true;
            let count = hoisted.len();
            for (offset, hoisted_node) in hoisted.into_iter().enumerate() {
                block.children.insert(i + offset, hoisted_node);
            }
            i += count;
        }

        i += 1;
    }
    changed
}

fn collect_modified(node: &IrNode, out: &mut HashSet<String>) {
    if let IrKind::Assign { name } | IrKind::Store { name } = &node.kind {
        out.insert(name.clone());
    }
    for child in &node.children {
        collect_modified(child, out);
    }
}

fn is_invariant(node: &IrNode, modified: &HashSet<String>) -> bool {
    match &node.kind {
        IrKind::Const { .. } => true,
        IrKind::Var { name } | IrKind::Load { name } => !modified.contains(name),
        IrKind::BinOp { .. } => node.children.len() == 2 && node.children.iter().all(|c| is_invariant(c, modified)),
        _ => false,
    }
}
