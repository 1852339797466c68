use ferrolite_error::ErrorCode;
use ferrolite_ir::ast::{BinaryOperator, UnaryOperator};
use ferrolite_ir::Span;
use ferrolite_shared::{CompilationContext, DiagnosticEngine};
use ferrolite_types::{PrimitiveType, TypeId};

fn unknown(context: &CompilationContext) -> TypeId {
    let _ = context;
    TypeId::from_primitive(PrimitiveType::Unknown)
}

fn bool_ty() -> TypeId {
    TypeId::from_primitive(PrimitiveType::Bool)
}

fn is_unspecified(context: &CompilationContext, ty: TypeId) -> bool {
    matches!(
        context.get_primitive_type_from_id(&ty),
        Some(PrimitiveType::UnspecifiedInt) | Some(PrimitiveType::UnspecifiedFloat)
    )
}

/// Resolves the result type of a binary operation, reporting a diagnostic and
/// returning `Unknown` when the operand types are incompatible. Dispatches on
/// the operator's category (`§4.5`); the category predicates live on
/// `BinaryOperator` itself in the AST crate.
pub fn check_binary_operation(
    context: &mut CompilationContext,
    diagnostics: &mut DiagnosticEngine,
    operator: BinaryOperator,
    left: TypeId,
    right: TypeId,
    span: Span,
) -> TypeId {
    if operator.is_arithmetic() {
        check_arithmetic(context, diagnostics, operator, left, right, span)
    } else if operator.is_comparison() {
        check_relational(context, diagnostics, operator, left, right, span)
    } else if operator.is_logical() {
        check_logical(context, diagnostics, operator, left, right, span)
    } else if operator.is_bitwise() || operator.is_shift() {
        check_integer_operation(context, diagnostics, operator, left, right, span)
    } else {
        unreachable!("every BinaryOperator variant is one of arithmetic, comparison, logical, bitwise, or shift")
    }
}

/// Numeric arithmetic, or `String`/`Str` concatenation via `Add`. Neither
/// operand's own width survives: the result is `f64` if either side is
/// floating-point, else `i32` (`§4.5`) — the same promote-to-`f64`,
/// else-default-to-`i32` rule a literal-typed front end without an untyped
/// numeric stage needs.
fn check_arithmetic(
    context: &mut CompilationContext,
    diagnostics: &mut DiagnosticEngine,
    operator: BinaryOperator,
    left: TypeId,
    right: TypeId,
    span: Span,
) -> TypeId {
    let is_string_concat = operator == BinaryOperator::Add
        && context.types_equal(&left, &right)
        && context.type_fulfills(&left, |info| matches!(info.kind, ferrolite_types::TypeKind::String | ferrolite_types::TypeKind::Str));

    if is_string_concat {
        return left;
    }

    if !context.is_numeric_type(&left) || !context.is_numeric_type(&right) {
        report_operation_mismatch(context, diagnostics, operator, left, right, span);
        return unknown(context);
    }

    if context.is_float_type(&left) || context.is_float_type(&right) {
        TypeId::from_primitive(PrimitiveType::F64)
    } else {
        TypeId::from_primitive(PrimitiveType::I32)
    }
}

/// Comparisons require both operands numeric; the result is always `bool`
/// (`§4.5`), regardless of the operands' concrete widths.
fn check_relational(
    context: &mut CompilationContext,
    diagnostics: &mut DiagnosticEngine,
    operator: BinaryOperator,
    left: TypeId,
    right: TypeId,
    span: Span,
) -> TypeId {
    if !context.is_numeric_type(&left) || !context.is_numeric_type(&right) {
        report_operation_mismatch(context, diagnostics, operator, left, right, span);
    }
    bool_ty()
}

fn check_logical(
    context: &mut CompilationContext,
    diagnostics: &mut DiagnosticEngine,
    operator: BinaryOperator,
    left: TypeId,
    right: TypeId,
    span: Span,
) -> TypeId {
    let bool_id = bool_ty();
    if !context.types_equal(&left, &bool_id) || !context.types_equal(&right, &bool_id) {
        diagnostics.emit_error(
            ErrorCode::LogicalOperatorTypeMismatch,
            format!("'{operator}' requires boolean operands, found '{}' and '{}'", context.get_type_name(&left), context.get_type_name(&right)),
            span,
        );
    }
    bool_id
}

fn check_integer_operation(
    context: &mut CompilationContext,
    diagnostics: &mut DiagnosticEngine,
    operator: BinaryOperator,
    left: TypeId,
    right: TypeId,
    span: Span,
) -> TypeId {
    if !context.is_integer_type(&left) || !context.is_integer_type(&right) {
        report_operation_mismatch(context, diagnostics, operator, left, right, span);
        return unknown(context);
    }
    if context.types_equal(&left, &right) {
        left
    } else if is_unspecified(context, left) {
        right
    } else {
        left
    }
}

fn report_operation_mismatch(
    context: &CompilationContext,
    diagnostics: &mut DiagnosticEngine,
    operator: BinaryOperator,
    left: TypeId,
    right: TypeId,
    span: Span,
) {
    diagnostics.emit_error(
        ErrorCode::OperationTypeMismatch,
        format!("cannot apply '{operator}' to '{}' and '{}'", context.get_type_name(&left), context.get_type_name(&right)),
        span,
    );
}

/// `-` requires a numeric operand; `!` requires `bool` (`§4.5`).
pub fn check_unary_operation(
    context: &mut CompilationContext,
    diagnostics: &mut DiagnosticEngine,
    operator: UnaryOperator,
    operand: TypeId,
    span: Span,
) -> TypeId {
    match operator {
        UnaryOperator::Negate => {
            if context.is_numeric_type(&operand) {
                operand
            } else {
                diagnostics.emit_error(
                    ErrorCode::InvalidUnaryOperation,
                    format!("cannot negate a value of type '{}'", context.get_type_name(&operand)),
                    span,
                );
                unknown(context)
            }
        }
        UnaryOperator::Not => {
            let bool_id = bool_ty();
            if context.types_equal(&operand, &bool_id) {
                bool_id
            } else {
                diagnostics.emit_error(
                    ErrorCode::InvalidUnaryOperation,
                    format!("cannot apply '!' to a value of type '{}'", context.get_type_name(&operand)),
                    span,
                );
                unknown(context)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrolite_ir::SourceLocation;

    fn span() -> Span {
        Span::point(SourceLocation::new(0, 1, 1))
    }

    #[test]
    fn same_type_addition_is_allowed() {
        let mut context = CompilationContext::new();
        let mut diagnostics = DiagnosticEngine::new();
        let i32_id = TypeId::from_primitive(PrimitiveType::I32);
        let result = check_binary_operation(&mut context, &mut diagnostics, BinaryOperator::Add, i32_id, i32_id, span());
        assert_eq!(result, i32_id);
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn bool_arithmetic_is_rejected() {
        let mut context = CompilationContext::new();
        let mut diagnostics = DiagnosticEngine::new();
        let bool_id = TypeId::from_primitive(PrimitiveType::Bool);
        check_binary_operation(&mut context, &mut diagnostics, BinaryOperator::Add, bool_id, bool_id, span());
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn mixed_width_integer_addition_defaults_to_i32() {
        let mut context = CompilationContext::new();
        let mut diagnostics = DiagnosticEngine::new();
        let i64_id = TypeId::from_primitive(PrimitiveType::I64);
        let i32_id = TypeId::from_primitive(PrimitiveType::I32);
        let result = check_binary_operation(&mut context, &mut diagnostics, BinaryOperator::Add, i64_id, i64_id, span());
        assert_eq!(result, i32_id);
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn addition_with_a_float_operand_promotes_to_f64() {
        let mut context = CompilationContext::new();
        let mut diagnostics = DiagnosticEngine::new();
        let i32_id = TypeId::from_primitive(PrimitiveType::I32);
        let f64_id = TypeId::from_primitive(PrimitiveType::F64);
        let result = check_binary_operation(&mut context, &mut diagnostics, BinaryOperator::Add, i32_id, f64_id, span());
        assert_eq!(result, f64_id);
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn string_concatenation_keeps_the_string_type() {
        let mut context = CompilationContext::new();
        let mut diagnostics = DiagnosticEngine::new();
        let string_id = TypeId::from_primitive(PrimitiveType::String);
        let result = check_binary_operation(&mut context, &mut diagnostics, BinaryOperator::Add, string_id, string_id, span());
        assert_eq!(result, string_id);
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn relational_comparison_of_non_numeric_types_is_rejected() {
        let mut context = CompilationContext::new();
        let mut diagnostics = DiagnosticEngine::new();
        let bool_id = TypeId::from_primitive(PrimitiveType::Bool);
        check_binary_operation(&mut context, &mut diagnostics, BinaryOperator::Equal, bool_id, bool_id, span());
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn relational_comparison_of_numeric_types_yields_bool() {
        let mut context = CompilationContext::new();
        let mut diagnostics = DiagnosticEngine::new();
        let i32_id = TypeId::from_primitive(PrimitiveType::I32);
        let f64_id = TypeId::from_primitive(PrimitiveType::F64);
        let bool_id = TypeId::from_primitive(PrimitiveType::Bool);
        let result = check_binary_operation(&mut context, &mut diagnostics, BinaryOperator::LessThan, i32_id, f64_id, span());
        assert_eq!(result, bool_id);
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn logical_and_requires_booleans() {
        let mut context = CompilationContext::new();
        let mut diagnostics = DiagnosticEngine::new();
        let i32_id = TypeId::from_primitive(PrimitiveType::I32);
        check_binary_operation(&mut context, &mut diagnostics, BinaryOperator::And, i32_id, i32_id, span());
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn negate_requires_numeric() {
        let mut context = CompilationContext::new();
        let mut diagnostics = DiagnosticEngine::new();
        let bool_id = TypeId::from_primitive(PrimitiveType::Bool);
        check_unary_operation(&mut context, &mut diagnostics, UnaryOperator::Negate, bool_id, span());
        assert!(diagnostics.has_errors());
    }
}
