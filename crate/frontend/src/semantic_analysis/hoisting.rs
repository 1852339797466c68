use ferrolite_error::ErrorCode;
use ferrolite_ir::ast::{EnumDecl, FunctionDecl, ImplBlock, Program, Statement, StructDecl};
use ferrolite_shared::{CompilationContext, DiagnosticEngine, SymbolKind};

use super::type_resolution::resolve_type_annotation;

/// Registers every top-level declaration's *signature* before any body is
/// checked, so forward references (a function calling one declared later,
/// a struct naming another struct that follows it) resolve correctly.
pub fn hoist(program: &Program, context: &mut CompilationContext, diagnostics: &mut DiagnosticEngine) {
    for statement in &program.statements {
        match statement {
            Statement::StructDecl(decl) => hoist_struct(decl, context, diagnostics),
            Statement::EnumDecl(decl) => hoist_enum(decl, context, diagnostics),
            _ => {}
        }
    }
    for statement in &program.statements {
        match statement {
            Statement::FunctionDecl(decl) => hoist_function(decl, context, diagnostics),
            Statement::ImplBlock(block) => hoist_impl(block, context, diagnostics),
            _ => {}
        }
    }
}

fn hoist_struct(decl: &StructDecl, context: &mut CompilationContext, diagnostics: &mut DiagnosticEngine) {
    let mut seen = std::collections::HashSet::new();
    let mut fields = Vec::new();
    for (name, annotation) in &decl.fields {
        if !seen.insert(name.clone()) {
            diagnostics.emit_error(ErrorCode::DuplicateStructField, format!("duplicate field '{name}' in struct '{}'", decl.name), decl.span);
            continue;
        }
        let field_ty = resolve_type_annotation(context, annotation, diagnostics);
        fields.push((name.clone(), field_ty));
    }
    if context.register_struct_type(decl.name.clone(), fields).is_err() {
        diagnostics.emit_error(ErrorCode::SymbolRedefinition, format!("'{}' is already defined", decl.name), decl.span);
    }
}

fn hoist_enum(decl: &EnumDecl, context: &mut CompilationContext, diagnostics: &mut DiagnosticEngine) {
    let mut seen = std::collections::HashSet::new();
    let mut variants = Vec::new();
    for variant in &decl.variants {
        if !seen.insert(variant.name.clone()) {
            diagnostics.emit_error(ErrorCode::DuplicateEnumVariant, format!("duplicate variant '{}' in enum '{}'", variant.name, decl.name), decl.span);
            continue;
        }
        let payload = variant.payload.iter().map(|ann| resolve_type_annotation(context, ann, diagnostics)).collect();
        variants.push((variant.name.clone(), payload));
    }
    let type_id = context.type_registry_mut().register_enum_type(decl.name.clone(), variants);
    if context.define_symbol(decl.name.clone(), SymbolKind::Enum, type_id).is_err() {
        diagnostics.emit_error(ErrorCode::SymbolRedefinition, format!("'{}' is already defined", decl.name), decl.span);
    }
}

fn hoist_function(decl: &FunctionDecl, context: &mut CompilationContext, diagnostics: &mut DiagnosticEngine) {
    let param_types = decl.parameters.iter().map(|p| resolve_type_annotation(context, &p.type_annotation, diagnostics)).collect();
    let return_type = decl
        .return_type
        .as_ref()
        .map(|ann| resolve_type_annotation(context, ann, diagnostics))
        .unwrap_or(ferrolite_types::TypeId::from_primitive(ferrolite_types::PrimitiveType::Unit));
    let function_ty = context.register_function_type(param_types, return_type);
    if context.define_symbol(decl.name.clone(), SymbolKind::Function, function_ty).is_err() {
        diagnostics.emit_error(ErrorCode::SymbolRedefinition, format!("function '{}' is already defined", decl.name), decl.span);
    }
}

fn hoist_impl(block: &ImplBlock, context: &mut CompilationContext, diagnostics: &mut DiagnosticEngine) {
    if context.lookup_symbol(&block.type_name).is_none() {
        diagnostics.emit_error(ErrorCode::UnknownType, format!("unknown type '{}' in impl block", block.type_name), block.span);
    }
    for method in &block.methods {
        hoist_function(method, context, diagnostics);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrolite_ir::ast::{Parameter, TypeAnnotation};
    use ferrolite_ir::SourceLocation;

    fn span() -> ferrolite_ir::Span {
        ferrolite_ir::Span::point(SourceLocation::new(0, 1, 1))
    }

    #[test]
    fn hoisted_function_is_callable_before_its_declaration_site() {
        let mut context = CompilationContext::new();
        let mut diagnostics = DiagnosticEngine::new();
        let decl = FunctionDecl {
            name: "add".into(),
            parameters: vec![Parameter { name: "a".into(), type_annotation: TypeAnnotation::Named("i32".into(), span()), span: span() }],
            return_type: Some(TypeAnnotation::Named("i32".into(), span())),
            body: ferrolite_ir::ast::BlockExpr { statements: vec![], trailing: None, ty: ferrolite_types::TypeId::from_primitive(ferrolite_types::PrimitiveType::Unit), span: span() },
            span: span(),
        };
        let program = Program { statements: vec![Statement::FunctionDecl(decl)] };
        hoist(&program, &mut context, &mut diagnostics);
        assert!(!diagnostics.has_errors());
        assert!(context.lookup_symbol("add").is_some());
    }
}
