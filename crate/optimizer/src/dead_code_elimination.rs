//! Dead-code elimination (`§4.8`): (i) anything textually following a
//! `Return`, or a loop-exiting `Break`/`Continue`, within the same `Block` is
//! removed; (ii) an `Assign` whose name is never read again within its
//! enclosing block is removed. Liveness is intra-block and conservative: a
//! name read anywhere in a sibling (including nested blocks) keeps the
//! `Assign` alive, per `§8`'s dead-code-conservatism invariant.

use std::collections::HashSet;

use ferrolite_ir::{IrKind, IrNode};

use crate::pass::Pass;

pub struct DeadCodeElimination;

impl Pass for DeadCodeElimination {
    fn name(&self) -> &'static str {
        "dead-code-elimination"
    }

    fn run(&mut self, node: &mut IrNode) -> bool {
        let mut changed = false;
        for child in &mut node.children {
            changed |= self.run(child);
        }

        if matches!(node.kind, IrKind::Block) {
            changed |= truncate_after_terminator(node);
            changed |= remove_dead_assigns(node);
        }

        changed
    }
}

fn is_terminator(node: &IrNode) -> bool {
    match &node.kind {
        IrKind::Return => true,
        IrKind::Jump { label } => label == "break" || label == "continue",
        _ => false,
    }
}

fn truncate_after_terminator(block: &mut IrNode) -> bool {
    match block.children.iter().position(is_terminator) {
        Some(cut) if cut + 1 < block.children.len() => {
            block.children.truncate(cut + 1);
            true
        }
        _ => false,
    }
}

/// Names this subtree reads: `Var`/`Load` references and `Call` targets.
/// Deliberately broader than `IrNode::referenced_names` (which skips `Call`)
/// so a function `Assign` stays live as long as something still calls it.
fn collect_used(node: &IrNode, out: &mut HashSet<String>) {
    match &node.kind {
        IrKind::Var { name } | IrKind::Load { name } | IrKind::Call { name } => {
            out.insert(name.clone());
        }
        _ => {}
    }
    for child in &node.children {
        collect_used(child, out);
    }
}

fn remove_dead_assigns(block: &mut IrNode) -> bool {
    let mut changed = false;
    let mut i = 0;
    while i < block.children.len() {
        let name = match &block.children[i].kind {
            IrKind::Assign { name } => name.clone(),
            _ => {
                i += 1;
                continue;
            }
        };

        let mut used = HashSet::new();
        for (j, other) in block.children.iter().enumerate() {
            if j != i {
                collect_used(other, &mut used);
            }
        }

        if used.contains(&name) {
            i += 1;
        } else {
            block.children.remove(i);
            changed = true;
        }
    }
    changed
}
