//! Constant folding (`§4.8`): when both children of a `BinOp` are `Const`,
//! replace the node in place with the folded value. Integer arithmetic wraps
//! on overflow to match the type universe's fixed-width integers; float
//! arithmetic keeps ordinary IEEE 754 semantics.

use ferrolite_ir::ast::BinaryOperator;
use ferrolite_ir::{IrKind, IrNode, IrValue};

use crate::pass::Pass;

pub struct ConstantFolding;

impl Pass for ConstantFolding {
    fn name(&self) -> &'static str {
        "constant-folding"
    }

    fn run(&mut self, node: &mut IrNode) -> bool {
        let mut changed = false;
        for child in &mut node.children {
            changed |= self.run(child);
        }

        if let IrKind::BinOp { op } = node.kind {
            let folded = match (node.children.first().and_then(IrNode::as_const), node.children.get(1).and_then(IrNode::as_const)) {
                (Some(left), Some(right)) => fold(op, left, right),
                _ => None,
            };
            if let Some(value) = folded {
                node.kind = IrKind::Const { value };
                node.children.clear();
                changed = true;
            }
        }

        changed
    }
}

fn fold(op: BinaryOperator, left: &IrValue, right: &IrValue) -> Option<IrValue> {
    match (left, right) {
        (IrValue::Integer(a), IrValue::Integer(b)) => fold_integer(op, *a, *b),
        (IrValue::Float(a), IrValue::Float(b)) => fold_float(op, *a, *b),
        (IrValue::Bool(a), IrValue::Bool(b)) => fold_bool(op, *a, *b),
        (IrValue::String(a), IrValue::String(b)) => fold_string(op, a, b),
        _ => None,
    }
}

fn fold_integer(op: BinaryOperator, a: i64, b: i64) -> Option<IrValue> {
    use BinaryOperator::*;
    let value = match op {
        Add => IrValue::Integer(a.wrapping_add(b)),
        Subtract => IrValue::Integer(a.wrapping_sub(b)),
        Multiply => IrValue::Integer(a.wrapping_mul(b)),
        Divide if b != 0 => IrValue::Integer(a.wrapping_div(b)),
        Modulo if b != 0 => IrValue::Integer(a.wrapping_rem(b)),
        Divide | Modulo => return None,
        GreaterThan => IrValue::Bool(a > b),
        LessThan => IrValue::Bool(a < b),
        GreaterThanOrEqual => IrValue::Bool(a >= b),
        LessThanOrEqual => IrValue::Bool(a <= b),
        Equal => IrValue::Bool(a == b),
        NotEqual => IrValue::Bool(a != b),
        BitAnd => IrValue::Integer(a & b),
        BitOr => IrValue::Integer(a | b),
        BitXor => IrValue::Integer(a ^ b),
        ShiftLeft => IrValue::Integer(a.wrapping_shl(b as u32)),
        ShiftRight => IrValue::Integer(a.wrapping_shr(b as u32)),
        And | Or => return None,
    };
    Some(value)
}

fn fold_float(op: BinaryOperator, a: f64, b: f64) -> Option<IrValue> {
    use BinaryOperator::*;
    let value = match op {
        Add => IrValue::Float(a + b),
        Subtract => IrValue::Float(a - b),
        Multiply => IrValue::Float(a * b),
        Divide => IrValue::Float(a / b),
        Modulo => IrValue::Float(a % b),
        GreaterThan => IrValue::Bool(a > b),
        LessThan => IrValue::Bool(a < b),
        GreaterThanOrEqual => IrValue::Bool(a >= b),
        LessThanOrEqual => IrValue::Bool(a <= b),
        Equal => IrValue::Bool(a == b),
        NotEqual => IrValue::Bool(a != b),
        _ => return None,
    };
    Some(value)
}

fn fold_bool(op: BinaryOperator, a: bool, b: bool) -> Option<IrValue> {
    use BinaryOperator::*;
    let value = match op {
        And => IrValue::Bool(a && b),
        Or => IrValue::Bool(a || b),
        BitAnd => IrValue::Bool(a & b),
        BitOr => IrValue::Bool(a | b),
        BitXor => IrValue::Bool(a ^ b),
        Equal => IrValue::Bool(a == b),
        NotEqual => IrValue::Bool(a != b),
        _ => return None,
    };
    Some(value)
}

fn fold_string(op: BinaryOperator, a: &str, b: &str) -> Option<IrValue> {
    use BinaryOperator::*;
    let value = match op {
        Add => IrValue::String(format!("{a}{b}")),
        Equal => IrValue::Bool(a == b),
        NotEqual => IrValue::Bool(a != b),
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_binop(op: BinaryOperator, a: i64, b: i64) -> IrNode {
        IrNode::new(
            IrKind::BinOp { op },
            vec![IrNode::leaf(IrKind::Const { value: IrValue::Integer(a) }), IrNode::leaf(IrKind::Const { value: IrValue::Integer(b) })],
        )
    }

    #[test]
    fn folds_addition_of_two_constants() {
        let mut node = int_binop(BinaryOperator::Add, 1, 2);
        assert!(ConstantFolding.run(&mut node));
        assert_eq!(node.as_const(), Some(&IrValue::Integer(3)));
        assert!(node.children.is_empty());
    }

    #[test]
    fn folds_nested_expression_bottom_up() {
        // (1 + 2) * 3
        let inner = int_binop(BinaryOperator::Add, 1, 2);
        let mut outer = IrNode::new(IrKind::BinOp { op: BinaryOperator::Multiply }, vec![inner, IrNode::leaf(IrKind::Const { value: IrValue::Integer(3) })]);
        assert!(ConstantFolding.run(&mut outer));
        assert_eq!(outer.as_const(), Some(&IrValue::Integer(9)));
    }

    #[test]
    fn integer_addition_wraps_on_overflow() {
        let mut node = int_binop(BinaryOperator::Add, i64::MAX, 1);
        ConstantFolding.run(&mut node);
        assert_eq!(node.as_const(), Some(&IrValue::Integer(i64::MIN)));
    }

    #[test]
    fn division_by_zero_is_left_unfolded() {
        let mut node = int_binop(BinaryOperator::Divide, 1, 0);
        assert!(!ConstantFolding.run(&mut node));
        assert!(!node.is_const());
    }

    #[test]
    fn non_const_operands_are_left_alone() {
        let mut node = IrNode::new(
            IrKind::BinOp { op: BinaryOperator::Add },
            vec![IrNode::leaf(IrKind::Var { name: "x".into() }), IrNode::leaf(IrKind::Const { value: IrValue::Integer(1) })],
        );
        assert!(!ConstantFolding.run(&mut node));
    }
}
