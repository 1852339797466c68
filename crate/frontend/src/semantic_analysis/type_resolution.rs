use ferrolite_error::ErrorCode;
use ferrolite_ir::ast::TypeAnnotation;
use ferrolite_shared::{CompilationContext, DiagnosticEngine};
use ferrolite_types::{PrimitiveType, TypeId};

/// Resolves surface syntax (`TypeAnnotation`) to a registered `TypeId`,
/// registering compound types (arrays, tuples, refs, ...) on the fly. An
/// unresolvable name reports `UnknownType` and falls back to `Unknown` so
/// callers can keep walking instead of aborting (`§4.1`'s "report, don't raise").
pub fn resolve_type_annotation(
    context: &mut CompilationContext,
    annotation: &TypeAnnotation,
    diagnostics: &mut DiagnosticEngine,
) -> TypeId {
    match annotation {
        TypeAnnotation::Unit(_) => TypeId::from_primitive(PrimitiveType::Unit),
        TypeAnnotation::Named(name, span) => match context.lookup_symbol(name) {
            Some(symbol) => symbol.type_id,
            None => {
                diagnostics.emit_error(ErrorCode::UnknownType, format!("unknown type '{name}'"), *span);
                TypeId::from_primitive(PrimitiveType::Unknown)
            }
        },
        TypeAnnotation::Generic(name, args, _) => {
            let arg_ids = args.iter().map(|arg| resolve_type_annotation(context, arg, diagnostics)).collect();
            context.type_registry_mut().register_generic_type(name.clone(), arg_ids)
        }
        TypeAnnotation::Array(element, len, _) => {
            let element_id = resolve_type_annotation(context, element, diagnostics);
            context.type_registry_mut().register_array_type(element_id, *len)
        }
        TypeAnnotation::Slice(element, _) => {
            let element_id = resolve_type_annotation(context, element, diagnostics);
            context.type_registry_mut().register_slice_type(element_id)
        }
        TypeAnnotation::Tuple(elements, _) => {
            let element_ids = elements.iter().map(|elem| resolve_type_annotation(context, elem, diagnostics)).collect();
            context.type_registry_mut().register_tuple_type(element_ids)
        }
        TypeAnnotation::Ref(inner, mutable, _) => {
            let inner_id = resolve_type_annotation(context, inner, diagnostics);
            context.type_registry_mut().register_ref_type(inner_id, *mutable)
        }
        TypeAnnotation::Pointer(inner, mutable, _) => {
            let inner_id = resolve_type_annotation(context, inner, diagnostics);
            context.type_registry_mut().register_pointer_type(inner_id, *mutable)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrolite_ir::SourceLocation;

    fn span() -> ferrolite_ir::Span {
        ferrolite_ir::Span::point(SourceLocation::new(0, 1, 1))
    }

    #[test]
    fn named_primitive_resolves() {
        let mut context = CompilationContext::new();
        let mut diagnostics = DiagnosticEngine::new();
        let annotation = TypeAnnotation::Named("i32".into(), span());
        let resolved = resolve_type_annotation(&mut context, &annotation, &mut diagnostics);
        assert_eq!(resolved, TypeId::from_primitive(PrimitiveType::I32));
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn unknown_name_reports_and_falls_back() {
        let mut context = CompilationContext::new();
        let mut diagnostics = DiagnosticEngine::new();
        let annotation = TypeAnnotation::Named("Bogus".into(), span());
        let resolved = resolve_type_annotation(&mut context, &annotation, &mut diagnostics);
        assert_eq!(resolved, TypeId::from_primitive(PrimitiveType::Unknown));
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn array_type_registers_with_length() {
        let mut context = CompilationContext::new();
        let mut diagnostics = DiagnosticEngine::new();
        let annotation = TypeAnnotation::Array(Box::new(TypeAnnotation::Named("i32".into(), span())), 4, span());
        let resolved = resolve_type_annotation(&mut context, &annotation, &mut diagnostics);
        assert_eq!(context.get_type_name(&resolved), "[i32; 4]");
    }
}
