use crate::ast::{
    AssignmentExpr, BinaryOpExpr, BlockExpr, EnumDecl, Expression, ForStmt, FunctionCallExpr,
    FunctionDecl, IdentifierExpr, IfExpr, ImplBlock, LiteralExpr, ReturnStmt, Statement,
    StructDecl, UnaryOpExpr, VariableDecl, WhileStmt,
};

/// Visitor pattern over the AST (`§9`'s "dynamic dispatch via tagged variants" —
/// exhaustive matches, not a class hierarchy). The generic `T` is the return type
/// produced by visiting any single node; `visit_statement`/`visit_expression`
/// provide the default dispatch so implementors only need the per-kind methods.
pub trait Visitor<T> {
    fn visit_statement(&mut self, stmt: &Statement) -> T {
        match stmt {
            Statement::FunctionDecl(s) => self.visit_function_decl(s),
            Statement::VariableDecl(s) => self.visit_variable_decl(s),
            Statement::Block(s) => self.visit_block_expression(s),
            Statement::If(s) => self.visit_if(s),
            Statement::While(s) => self.visit_while(s),
            Statement::For(s) => self.visit_for(s),
            Statement::Return(s) => self.visit_return(s),
            Statement::Break(span) => self.visit_break(*span),
            Statement::Continue(span) => self.visit_continue(*span),
            Statement::StructDecl(s) => self.visit_struct_decl(s),
            Statement::EnumDecl(s) => self.visit_enum_decl(s),
            Statement::ImplBlock(s) => self.visit_impl_block(s),
            Statement::Expression(s) => self.visit_expression(&s.expr),
        }
    }

    fn visit_function_decl(&mut self, stmt: &FunctionDecl) -> T;
    fn visit_variable_decl(&mut self, stmt: &VariableDecl) -> T;
    fn visit_if(&mut self, stmt: &IfExpr) -> T;
    fn visit_while(&mut self, stmt: &WhileStmt) -> T;
    fn visit_for(&mut self, stmt: &ForStmt) -> T;
    fn visit_return(&mut self, stmt: &ReturnStmt) -> T;
    fn visit_break(&mut self, span: crate::source_location::Span) -> T;
    fn visit_continue(&mut self, span: crate::source_location::Span) -> T;
    fn visit_struct_decl(&mut self, stmt: &StructDecl) -> T;
    fn visit_enum_decl(&mut self, stmt: &EnumDecl) -> T;
    fn visit_impl_block(&mut self, stmt: &ImplBlock) -> T;

    fn visit_expression(&mut self, expr: &Expression) -> T {
        match expr {
            Expression::Literal(e) => self.visit_literal(e),
            Expression::Identifier(e) => self.visit_identifier(e),
            Expression::BinaryOp(e) => self.visit_binary_op(e),
            Expression::UnaryOp(e) => self.visit_unary_op(e),
            Expression::FunctionCall(e) => self.visit_call(e),
            Expression::Block(e) => self.visit_block_expression(e),
            Expression::If(e) => self.visit_if(e),
            Expression::Assignment(e) => self.visit_assignment(e),
        }
    }

    fn visit_literal(&mut self, expr: &LiteralExpr) -> T;
    fn visit_identifier(&mut self, expr: &IdentifierExpr) -> T;
    fn visit_binary_op(&mut self, expr: &BinaryOpExpr) -> T;
    fn visit_unary_op(&mut self, expr: &UnaryOpExpr) -> T;
    fn visit_call(&mut self, expr: &FunctionCallExpr) -> T;
    fn visit_block_expression(&mut self, expr: &BlockExpr) -> T;
    fn visit_assignment(&mut self, expr: &AssignmentExpr) -> T;
}
