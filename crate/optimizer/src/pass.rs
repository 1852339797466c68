//! Pass manager (`§4.8`): runs an ordered list of passes over already-lowered
//! IR, tracking whether any pass changed the tree. The manager does not
//! iterate a pass to a fixed point on its own — enqueue it more than once for
//! that effect.

use ferrolite_ir::IrNode;

/// A single optimization pass over an IR subtree. Implementations mutate
/// `node` in place and report whether they changed anything, so the manager
/// can track `modified` without re-diffing the tree itself.
pub trait Pass {
    fn name(&self) -> &'static str;

    fn run(&mut self, node: &mut IrNode) -> bool;
}

/// Runs a fixed, ordered sequence of passes once each.
pub struct PassManager {
    passes: Vec<Box<dyn Pass>>,
    modified: bool,
}

impl PassManager {
    pub fn new() -> Self {
        PassManager { passes: Vec::new(), modified: false }
    }

    pub fn enqueue(&mut self, pass: Box<dyn Pass>) -> &mut Self {
        self.passes.push(pass);
        self
    }

    /// Runs every enqueued pass once, in declaration order, over `node`.
    /// Returns whether any pass reported a change.
    pub fn run(&mut self, node: &mut IrNode) -> bool {
        self.modified = false;
        for pass in &mut self.passes {
            let changed = pass.run(node);
            if changed {
                tracing::debug!(pass = pass.name(), "pass modified IR");
            }
            self.modified |= changed;
        }
        self.modified
    }

    pub fn modified(&self) -> bool {
        self.modified
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

/// The standard optimization pipeline (`§4.8`), in the order the section
/// lists them: fold constants, eliminate dead code, hoist loop invariants,
/// eliminate redundant loads, then clean up the resulting node shapes.
pub fn standard_pipeline() -> PassManager {
    let mut manager = PassManager::new();
    manager
        .enqueue(Box::new(crate::constant_folding::ConstantFolding))
        .enqueue(Box::new(crate::dead_code_elimination::DeadCodeElimination))
        .enqueue(Box::new(crate::loop_invariant_motion::LoopInvariantMotion))
        .enqueue(Box::new(crate::redundant_load_elimination::RedundantLoadElimination))
        .enqueue(Box::new(crate::code_size::CodeSizePass));
    manager
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrolite_ir::{IrKind, IrValue};

    struct AlwaysChanges;

    impl Pass for AlwaysChanges {
        fn name(&self) -> &'static str {
            "always-changes"
        }

        fn run(&mut self, _node: &mut IrNode) -> bool {
            true
        }
    }

    #[test]
    fn manager_reports_modified_when_any_pass_changes() {
        let mut manager = PassManager::new();
        manager.enqueue(Box::new(AlwaysChanges));
        let mut node = IrNode::leaf(IrKind::Const { value: IrValue::Unit });
        assert!(manager.run(&mut node));
        assert!(manager.modified());
    }

    #[test]
    fn empty_manager_reports_no_modification() {
        let mut manager = PassManager::new();
        let mut node = IrNode::leaf(IrKind::Nop);
        assert!(!manager.run(&mut node));
    }
}
