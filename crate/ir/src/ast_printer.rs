use crate::Visitor;
use crate::ast::{
    AssignmentExpr, BinaryOpExpr, BlockExpr, ElseBranch, EnumDecl, Expression, ForStmt,
    FunctionCallExpr, FunctionDecl, IdentifierExpr, IfExpr, ImplBlock, LiteralExpr, LiteralValue,
    Program, ReturnStmt, Statement, StructDecl, UnaryOpExpr, VariableDecl, WhileStmt,
};
use crate::source_location::Span;

/// A visitor implementation that prints the AST in a human-readable, indented
/// form, enabled behind the `print-ast` feature for debugging the pipeline.
pub struct AstPrinter {
    indent_level: usize,
}

impl AstPrinter {
    pub fn new() -> Self {
        AstPrinter { indent_level: 0 }
    }

    pub fn print(&mut self, program: &Program) {
        println!("Program");
        self.indent_level = 1;
        for stmt in &program.statements {
            self.visit_statement(stmt);
        }
    }

    fn indent(&self) -> String {
        " ".repeat(self.indent_level * 2)
    }
}

impl Default for AstPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl Visitor<()> for AstPrinter {
    fn visit_function_decl(&mut self, stmt: &FunctionDecl) {
        println!("{}fn {}(...)", self.indent(), stmt.name);
        self.indent_level += 1;
        for param in &stmt.parameters {
            println!("{}param {}", self.indent(), param.name);
        }
        self.visit_block_expression(&stmt.body);
        self.indent_level -= 1;
    }

    fn visit_variable_decl(&mut self, stmt: &VariableDecl) {
        println!(
            "{}let{} {} =",
            self.indent(),
            if stmt.is_mutable { " mut" } else { "" },
            stmt.name
        );
        if let Some(value) = &stmt.value {
            self.indent_level += 1;
            self.visit_expression(value);
            self.indent_level -= 1;
        }
    }

    fn visit_if(&mut self, stmt: &IfExpr) {
        println!("{}if", self.indent());
        self.indent_level += 1;
        self.visit_expression(&stmt.condition);
        self.indent_level -= 1;
        self.visit_block_expression(&stmt.then_branch);
        if let Some(branch) = &stmt.else_branch {
            println!("{}else", self.indent());
            self.indent_level += 1;
            match branch {
                ElseBranch::Block(block) => self.visit_block_expression(block),
                ElseBranch::If(nested) => self.visit_if(nested),
            }
            self.indent_level -= 1;
        }
    }

    fn visit_while(&mut self, stmt: &WhileStmt) {
        println!("{}while", self.indent());
        self.indent_level += 1;
        self.visit_expression(&stmt.condition);
        self.indent_level -= 1;
        self.visit_block_expression(&stmt.body);
    }

    fn visit_for(&mut self, stmt: &ForStmt) {
        println!("{}for {} in .. ", self.indent(), stmt.variable);
        self.indent_level += 1;
        self.visit_expression(&stmt.start);
        self.visit_expression(&stmt.end);
        self.indent_level -= 1;
        self.visit_block_expression(&stmt.body);
    }

    fn visit_return(&mut self, stmt: &ReturnStmt) {
        println!("{}return", self.indent());
        if let Some(value) = &stmt.value {
            self.indent_level += 1;
            self.visit_expression(value);
            self.indent_level -= 1;
        }
    }

    fn visit_break(&mut self, _span: Span) {
        println!("{}break", self.indent());
    }

    fn visit_continue(&mut self, _span: Span) {
        println!("{}continue", self.indent());
    }

    fn visit_struct_decl(&mut self, stmt: &StructDecl) {
        println!("{}struct {}", self.indent(), stmt.name);
        self.indent_level += 1;
        for (name, _) in &stmt.fields {
            println!("{}field {}", self.indent(), name);
        }
        self.indent_level -= 1;
    }

    fn visit_enum_decl(&mut self, stmt: &EnumDecl) {
        println!("{}enum {}", self.indent(), stmt.name);
        self.indent_level += 1;
        for variant in &stmt.variants {
            println!("{}variant {}", self.indent(), variant.name);
        }
        self.indent_level -= 1;
    }

    fn visit_impl_block(&mut self, stmt: &ImplBlock) {
        println!("{}impl {}", self.indent(), stmt.type_name);
        self.indent_level += 1;
        for method in &stmt.methods {
            self.visit_function_decl(method);
        }
        self.indent_level -= 1;
    }

    fn visit_literal(&mut self, expr: &LiteralExpr) {
        match &expr.value {
            LiteralValue::Integer(i) => println!("{}int {}", self.indent(), i),
            LiteralValue::Float(f) => println!("{}float {}", self.indent(), f),
            LiteralValue::String(s) => println!("{}string {:?}", self.indent(), s),
            LiteralValue::Char(c) => println!("{}char {:?}", self.indent(), c),
            LiteralValue::Bool(b) => println!("{}bool {}", self.indent(), b),
        }
    }

    fn visit_identifier(&mut self, expr: &IdentifierExpr) {
        println!("{}ident {}", self.indent(), expr.name);
    }

    fn visit_binary_op(&mut self, expr: &BinaryOpExpr) {
        println!("{}op {}", self.indent(), expr.operator);
        self.indent_level += 1;
        self.visit_expression(&expr.left);
        self.visit_expression(&expr.right);
        self.indent_level -= 1;
    }

    fn visit_unary_op(&mut self, expr: &UnaryOpExpr) {
        println!("{}unary {}", self.indent(), expr.operator);
        self.indent_level += 1;
        self.visit_expression(&expr.operand);
        self.indent_level -= 1;
    }

    fn visit_call(&mut self, expr: &FunctionCallExpr) {
        println!("{}call {}", self.indent(), expr.callee);
        self.indent_level += 1;
        for arg in &expr.arguments {
            self.visit_expression(arg);
        }
        self.indent_level -= 1;
    }

    fn visit_block_expression(&mut self, expr: &BlockExpr) {
        println!("{}block", self.indent());
        self.indent_level += 1;
        for stmt in &expr.statements {
            self.visit_statement(stmt);
        }
        if let Some(trailing) = &expr.trailing {
            self.visit_expression(trailing);
        }
        self.indent_level -= 1;
    }

    fn visit_assignment(&mut self, expr: &AssignmentExpr) {
        match &expr.operator {
            Some(op) => println!("{}assign {}=", self.indent(), op),
            None => println!("{}assign =", self.indent()),
        }
        self.indent_level += 1;
        self.visit_expression(&expr.target);
        self.visit_expression(&expr.value);
        self.indent_level -= 1;
    }
}
