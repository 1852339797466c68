use ferrolite_error::ErrorCode;
use ferrolite_ir::ast::{
    BlockExpr, ElseBranch, EnumDecl, Expression, ForStmt, FunctionDecl, IfExpr, ImplBlock, LiteralValue, Program,
    ReturnStmt, Statement, StructDecl, VariableDecl, WhileStmt,
};
use ferrolite_ir::Span;
use ferrolite_shared::{CompilationContext, DiagnosticEngine, SymbolKind};
use ferrolite_types::{PrimitiveType, TypeId};

use super::operators::{check_binary_operation, check_unary_operation};
use super::type_resolution::resolve_type_annotation;

/// Walks an already-hoisted program, resolving every expression's type in
/// place (`Expression::set_ty`) and reporting every violation it finds. Scope
/// discipline mirrors a straightforward block-scoped language: a new scope
/// opens for each function body, loop body, and bare block, and closes on exit.
pub struct Checker<'a> {
    context: &'a mut CompilationContext,
    diagnostics: &'a mut DiagnosticEngine,
    current_return_type: Option<TypeId>,
    loop_depth: usize,
}

impl<'a> Checker<'a> {
    pub fn new(context: &'a mut CompilationContext, diagnostics: &'a mut DiagnosticEngine) -> Self {
        Checker { context, diagnostics, current_return_type: None, loop_depth: 0 }
    }

    pub fn check_program(&mut self, program: &mut Program) {
        for statement in &mut program.statements {
            self.check_statement(statement);
        }
    }

    fn check_statement(&mut self, statement: &mut Statement) {
        match statement {
            Statement::FunctionDecl(decl) => self.check_function(decl),
            Statement::VariableDecl(decl) => self.check_variable_decl(decl),
            Statement::Block(block) => {
                self.context.begin_scope();
                self.check_block(block);
                self.context.end_scope();
            }
            Statement::If(if_expr) => self.check_if(if_expr),
            Statement::While(while_stmt) => self.check_while(while_stmt),
            Statement::For(for_stmt) => self.check_for(for_stmt),
            Statement::Return(return_stmt) => self.check_return(return_stmt),
            Statement::Break(span) => self.check_loop_control(ErrorCode::BreakOutsideLoop, *span),
            Statement::Continue(span) => self.check_loop_control(ErrorCode::ContinueOutsideLoop, *span),
            Statement::StructDecl(decl) => self.check_struct_decl(decl),
            Statement::EnumDecl(decl) => self.check_enum_decl(decl),
            Statement::ImplBlock(block) => self.check_impl(block),
            Statement::Expression(expr_stmt) => {
                self.check_expression(&mut expr_stmt.expr);
            }
        }
    }

    fn check_loop_control(&mut self, code: ErrorCode, span: Span) {
        if self.loop_depth == 0 {
            self.diagnostics.emit_error(code, "used outside of a loop", span);
        }
    }

    fn check_function(&mut self, decl: &mut FunctionDecl) {
        self.context.begin_scope();
        for param in &decl.parameters {
            let param_ty = resolve_type_annotation(self.context, &param.type_annotation, self.diagnostics);
            if self.context.define_symbol(param.name.clone(), SymbolKind::Variable { mutable: false }, param_ty).is_err() {
                self.diagnostics.emit_error(ErrorCode::VariableRedefinition, format!("duplicate parameter '{}'", param.name), param.span);
            }
        }
        let return_ty = decl
            .return_type
            .as_ref()
            .map(|ann| resolve_type_annotation(self.context, ann, self.diagnostics))
            .unwrap_or(TypeId::from_primitive(PrimitiveType::Unit));

        let previous_return = self.current_return_type.replace(return_ty);
        self.check_block(&mut decl.body);

        let body_ty = decl.body.trailing.as_ref().map(|e| e.ty()).unwrap_or(TypeId::from_primitive(PrimitiveType::Unit));
        if decl.body.trailing.is_some() && !self.context.types_equal(&body_ty, &return_ty) {
            self.diagnostics.emit_error(
                ErrorCode::ReturnTypeMismatch,
                format!("function '{}' returns '{}' but its body evaluates to '{}'", decl.name, self.context.get_type_name(&return_ty), self.context.get_type_name(&body_ty)),
                decl.body.span,
            );
        }

        self.current_return_type = previous_return;
        self.context.end_scope();
    }

    fn check_variable_decl(&mut self, decl: &mut VariableDecl) {
        let declared_ty = decl.type_annotation.as_ref().map(|ann| resolve_type_annotation(self.context, ann, self.diagnostics));

        let value_ty = decl.value.as_mut().map(|value| self.check_expression(value));

        let resolved_ty = match (declared_ty, value_ty) {
            (Some(declared), Some(value_ty)) => {
                if !self.context.types_equal(&declared, &value_ty) {
                    self.diagnostics.emit_error(
                        ErrorCode::TypeMismatch,
                        format!("'{}' declared as '{}' but initialized with '{}'", decl.name, self.context.get_type_name(&declared), self.context.get_type_name(&value_ty)),
                        decl.span,
                    );
                }
                declared
            }
            (Some(declared), None) => declared,
            (None, Some(value_ty)) => value_ty,
            (None, None) => TypeId::from_primitive(PrimitiveType::Unknown),
        };

        if self.context.shadows_outer_scope(&decl.name) {
            self.diagnostics.emit_warning(ErrorCode::VariableShadowing, format!("'{}' shadows a variable from an outer scope", decl.name), decl.span);
        }

        let kind = SymbolKind::Variable { mutable: decl.is_mutable };
        if self.context.define_symbol(decl.name.clone(), kind, resolved_ty).is_err() {
            self.diagnostics.emit_error(ErrorCode::VariableRedefinition, format!("'{}' is already defined in this scope", decl.name), decl.span);
        }
    }

    fn check_block(&mut self, block: &mut BlockExpr) {
        for statement in &mut block.statements {
            self.check_statement(statement);
        }
        block.ty = match &mut block.trailing {
            Some(trailing) => self.check_expression(trailing),
            None => TypeId::from_primitive(PrimitiveType::Unit),
        };
    }

    fn check_if(&mut self, if_expr: &mut IfExpr) {
        if_expr.ty = self.check_if_expr(if_expr);
    }

    fn check_if_expr(&mut self, if_expr: &mut IfExpr) -> TypeId {
        let condition_ty = self.check_expression(&mut if_expr.condition);
        let bool_id = TypeId::from_primitive(PrimitiveType::Bool);
        if !self.context.types_equal(&condition_ty, &bool_id) {
            self.diagnostics.emit_error(
                ErrorCode::ConditionMustBeBoolean,
                format!("if condition must be 'bool', found '{}'", self.context.get_type_name(&condition_ty)),
                if_expr.condition.span(),
            );
        }

        self.context.begin_scope();
        self.check_block(&mut if_expr.then_branch);
        self.context.end_scope();
        let then_ty = if_expr.then_branch.ty;

        let else_ty = match &mut if_expr.else_branch {
            Some(ElseBranch::Block(block)) => {
                self.context.begin_scope();
                self.check_block(block);
                self.context.end_scope();
                Some(block.ty)
            }
            Some(ElseBranch::If(nested)) => Some(self.check_if_expr(nested)),
            None => None,
        };

        match else_ty {
            Some(else_ty) if !self.context.types_equal(&then_ty, &else_ty) => {
                self.diagnostics.emit_error(
                    ErrorCode::BranchTypeMismatch,
                    format!("if/else branches have incompatible types: '{}' vs '{}'", self.context.get_type_name(&then_ty), self.context.get_type_name(&else_ty)),
                    if_expr.span,
                );
                TypeId::from_primitive(PrimitiveType::Unknown)
            }
            Some(_) => then_ty,
            None => TypeId::from_primitive(PrimitiveType::Unit),
        }
    }

    fn check_while(&mut self, while_stmt: &mut WhileStmt) {
        let condition_ty = self.check_expression(&mut while_stmt.condition);
        let bool_id = TypeId::from_primitive(PrimitiveType::Bool);
        if !self.context.types_equal(&condition_ty, &bool_id) {
            self.diagnostics.emit_error(
                ErrorCode::ConditionMustBeBoolean,
                format!("while condition must be 'bool', found '{}'", self.context.get_type_name(&condition_ty)),
                while_stmt.condition.span(),
            );
        }
        self.loop_depth += 1;
        self.context.begin_scope();
        self.check_block(&mut while_stmt.body);
        self.context.end_scope();
        self.loop_depth -= 1;
    }

    fn check_for(&mut self, for_stmt: &mut ForStmt) {
        let start_ty = self.check_expression(&mut for_stmt.start);
        let end_ty = self.check_expression(&mut for_stmt.end);
        if !self.context.is_integer_type(&start_ty) || !self.context.is_integer_type(&end_ty) {
            self.diagnostics.emit_error(ErrorCode::TypeMismatch, "for-loop range bounds must be integers", for_stmt.span);
        }

        self.loop_depth += 1;
        self.context.begin_scope();
        if self.context.define_symbol(for_stmt.variable.clone(), SymbolKind::Variable { mutable: false }, start_ty).is_err() {
            self.diagnostics.emit_error(ErrorCode::VariableRedefinition, format!("'{}' is already defined in this scope", for_stmt.variable), for_stmt.span);
        }
        self.check_block(&mut for_stmt.body);
        self.context.end_scope();
        self.loop_depth -= 1;
    }

    fn check_return(&mut self, return_stmt: &mut ReturnStmt) {
        let Some(expected) = self.current_return_type else {
            self.diagnostics.emit_error(ErrorCode::ReturnOutsideFunction, "'return' outside of a function", return_stmt.span);
            return;
        };

        let actual = match &mut return_stmt.value {
            Some(value) => self.check_expression(value),
            None => TypeId::from_primitive(PrimitiveType::Unit),
        };

        if !self.context.types_equal(&actual, &expected) {
            self.diagnostics.emit_error(
                ErrorCode::ReturnTypeMismatch,
                format!("expected return type '{}', found '{}'", self.context.get_type_name(&expected), self.context.get_type_name(&actual)),
                return_stmt.span,
            );
        }
    }

    fn check_struct_decl(&mut self, decl: &StructDecl) {
        // Signature already registered during hoisting; nothing left to check here.
        let _ = decl;
    }

    fn check_enum_decl(&mut self, decl: &EnumDecl) {
        let _ = decl;
    }

    fn check_impl(&mut self, block: &mut ImplBlock) {
        for method in &mut block.methods {
            self.check_function(method);
        }
    }

    fn check_expression(&mut self, expression: &mut Expression) -> TypeId {
        let ty = match expression {
            Expression::Literal(literal) => self.literal_type(&literal.value),
            Expression::Identifier(identifier) => match self.context.lookup_symbol(&identifier.name) {
                Some(symbol) => symbol.type_id,
                None => {
                    self.diagnostics.emit_error(ErrorCode::UndefinedVariable, format!("undefined name '{}'", identifier.name), identifier.span);
                    TypeId::from_primitive(PrimitiveType::Unknown)
                }
            },
            Expression::BinaryOp(bin_op) => {
                let left_ty = self.check_expression(&mut bin_op.left);
                let right_ty = self.check_expression(&mut bin_op.right);
                check_binary_operation(self.context, self.diagnostics, bin_op.operator, left_ty, right_ty, bin_op.span)
            }
            Expression::UnaryOp(unary_op) => {
                let operand_ty = self.check_expression(&mut unary_op.operand);
                check_unary_operation(self.context, self.diagnostics, unary_op.operator, operand_ty, unary_op.span)
            }
            Expression::FunctionCall(call) => self.check_call(call),
            Expression::Block(block) => {
                self.context.begin_scope();
                self.check_block(block);
                self.context.end_scope();
                block.ty
            }
            Expression::If(if_expr) => self.check_if_expr(if_expr),
            Expression::Assignment(assignment) => self.check_assignment(assignment),
        };
        expression.set_ty(ty);
        ty
    }

    fn check_call(&mut self, call: &mut ferrolite_ir::ast::FunctionCallExpr) -> TypeId {
        let Some(symbol) = self.context.lookup_symbol(&call.callee).cloned() else {
            self.diagnostics.emit_error(ErrorCode::UndefinedFunction, format!("undefined function '{}'", call.callee), call.span);
            for arg in &mut call.arguments {
                self.check_expression(arg);
            }
            return TypeId::from_primitive(PrimitiveType::Unknown);
        };

        let Some(function_ty) = self.context.get_function_type(&symbol.type_id).cloned() else {
            self.diagnostics.emit_error(ErrorCode::UndefinedFunction, format!("'{}' is not callable", call.callee), call.span);
            for arg in &mut call.arguments {
                self.check_expression(arg);
            }
            return TypeId::from_primitive(PrimitiveType::Unknown);
        };

        if function_ty.params.len() != call.arguments.len() {
            self.diagnostics.emit_error(
                ErrorCode::ArgumentCountMismatch,
                format!("'{}' expects {} argument(s), found {}", call.callee, function_ty.params.len(), call.arguments.len()),
                call.span,
            );
        }

        for (index, arg) in call.arguments.iter_mut().enumerate() {
            let arg_ty = self.check_expression(arg);
            if let Some(expected) = function_ty.params.get(index) {
                if !self.context.types_equal(expected, &arg_ty) {
                    self.diagnostics.emit_error(
                        ErrorCode::ArgumentTypeMismatch,
                        format!("argument {} to '{}' expected '{}', found '{}'", index + 1, call.callee, self.context.get_type_name(expected), self.context.get_type_name(&arg_ty)),
                        arg.span(),
                    );
                }
            }
        }

        function_ty.return_type
    }

    fn check_assignment(&mut self, assignment: &mut ferrolite_ir::ast::AssignmentExpr) -> TypeId {
        let value_ty = self.check_expression(&mut assignment.value);

        let Expression::Identifier(target) = assignment.target.as_ref() else {
            self.diagnostics.emit_error(ErrorCode::InvalidExpression, "assignment target must be a variable", assignment.span);
            return value_ty;
        };

        let Some(symbol) = self.context.lookup_symbol(&target.name).cloned() else {
            self.diagnostics.emit_error(ErrorCode::UndefinedVariable, format!("undefined name '{}'", target.name), target.span);
            return value_ty;
        };

        if !matches!(symbol.kind, SymbolKind::Variable { mutable: true }) {
            self.diagnostics.emit_error(ErrorCode::AssignmentToImmutableVariable, format!("cannot assign to immutable variable '{}'", target.name), assignment.span);
        }

        let resolved_value_ty = match assignment.operator {
            Some(op) => check_binary_operation(self.context, self.diagnostics, op, symbol.type_id, value_ty, assignment.span),
            None => value_ty,
        };

        if !self.context.types_equal(&symbol.type_id, &resolved_value_ty) {
            self.diagnostics.emit_error(
                ErrorCode::TypeMismatch,
                format!("cannot assign '{}' to '{}' of type '{}'", self.context.get_type_name(&resolved_value_ty), target.name, self.context.get_type_name(&symbol.type_id)),
                assignment.span,
            );
        }

        symbol.type_id
    }

    /// Integer literals are `i32` when the value fits, else `i64`; float
    /// literals are always `f64` (`§4.5`) — there is no untyped-literal stage.
    fn literal_type(&self, value: &LiteralValue) -> TypeId {
        match value {
            LiteralValue::Integer(v) => {
                let primitive = if i32::try_from(*v).is_ok() { PrimitiveType::I32 } else { PrimitiveType::I64 };
                TypeId::from_primitive(primitive)
            }
            LiteralValue::Float(_) => TypeId::from_primitive(PrimitiveType::F64),
            LiteralValue::String(_) => TypeId::from_primitive(PrimitiveType::String),
            LiteralValue::Char(_) => TypeId::from_primitive(PrimitiveType::Char),
            LiteralValue::Bool(_) => TypeId::from_primitive(PrimitiveType::Bool),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::parse;
    use crate::semantic_analysis::hoisting::hoist;

    fn check(source: &str) -> DiagnosticEngine {
        let mut diagnostics = DiagnosticEngine::new();
        let tokens = tokenize(source, &mut diagnostics);
        let mut program = parse(&tokens, &mut diagnostics);
        let mut context = CompilationContext::new();
        hoist(&program, &mut context, &mut diagnostics);
        Checker::new(&mut context, &mut diagnostics).check_program(&mut program);
        diagnostics
    }

    #[test]
    fn well_typed_function_has_no_errors() {
        let diagnostics = check("fn add(a: i32, b: i32) -> i32 { a + b }");
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn mismatched_return_type_is_an_error() {
        let diagnostics = check("fn broken() -> i32 { true }");
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn undefined_variable_is_an_error() {
        let diagnostics = check("fn f() -> i32 { y }");
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn assigning_to_immutable_variable_is_an_error() {
        let diagnostics = check("fn f() { let x: i32 = 1; x = 2; }");
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn shadowing_in_a_nested_block_warns_without_erroring() {
        let diagnostics = check("fn f() { let x = 1; { let x = 2; } }");
        assert!(!diagnostics.has_errors());
        assert_eq!(diagnostics.warning_count(), 1);
    }

    #[test]
    fn redefinition_in_the_same_scope_is_still_an_error_not_a_warning() {
        let diagnostics = check("fn f() { let x = 1; let x = 2; }");
        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.warning_count(), 0);
    }

    #[test]
    fn break_outside_loop_is_an_error() {
        let diagnostics = check("fn f() { break; }");
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn wrong_argument_count_is_an_error() {
        let diagnostics = check("fn add(a: i32, b: i32) -> i32 { a + b } fn g() -> i32 { add(1) }");
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn integer_literal_in_range_is_typed_i32() {
        let diagnostics = check("fn f() { let x: i32 = 1; }");
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn integer_literal_out_of_i32_range_is_typed_i64() {
        let diagnostics = check("fn f() { let x: i64 = 3000000000; }");
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn out_of_range_integer_literal_mismatches_an_i32_annotation() {
        let diagnostics = check("fn f() { let x: i32 = 3000000000; }");
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn float_literal_is_typed_f64() {
        let diagnostics = check("fn f() { let x: f64 = 1.5; }");
        assert!(!diagnostics.has_errors());
    }
}
