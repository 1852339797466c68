use ferrolite_types::{PrimitiveType, TypeId, TypeRegistry};

/// A pre-populated standard-library signature: parameter types, return type,
/// and the native symbol a downstream code generator should link against
/// (`§4.9`). Generic stdlib functions (`Vec::new`, `push`, `get`, `Result::Ok`,
/// `Result::Err`) use `Unknown` as a structural stand-in for their type
/// parameter — monomorphization is out of scope.
#[derive(Debug, Clone)]
pub struct StdlibSignature {
    pub qualified_name: &'static str,
    pub params: Vec<TypeId>,
    pub return_type: TypeId,
    pub native_symbol: &'static str,
}

/// Process-wide, read-only after construction: the registry of stdlib
/// function signatures available to every compilation (`§5`'s shared-resources
/// note — this is immutable once built, so no locking is needed).
pub struct StdlibRegistry {
    signatures: Vec<StdlibSignature>,
}

impl StdlibRegistry {
    pub fn new(types: &TypeRegistry) -> Self {
        let str_id = TypeId::from_primitive(PrimitiveType::Str);
        let unit_id = TypeId::from_primitive(PrimitiveType::Unit);
        let usize_id = TypeId::from_primitive(PrimitiveType::Usize);
        let string_id = TypeId::from_primitive(PrimitiveType::String);
        let unknown_id = TypeId::from_primitive(PrimitiveType::Unknown);
        let _ = types;

        let signatures = vec![
            StdlibSignature {
                qualified_name: "print",
                params: vec![str_id],
                return_type: unit_id,
                native_symbol: "ferrolite_rt_print",
            },
            StdlibSignature {
                qualified_name: "println",
                params: vec![str_id],
                return_type: unit_id,
                native_symbol: "ferrolite_rt_println",
            },
            StdlibSignature {
                qualified_name: "len",
                params: vec![str_id],
                return_type: usize_id,
                native_symbol: "ferrolite_rt_len",
            },
            StdlibSignature {
                qualified_name: "concat",
                params: vec![str_id, str_id],
                return_type: string_id,
                native_symbol: "ferrolite_rt_concat",
            },
            StdlibSignature {
                qualified_name: "Vec::new",
                params: vec![],
                return_type: unknown_id,
                native_symbol: "ferrolite_rt_vec_new",
            },
            StdlibSignature {
                qualified_name: "push",
                params: vec![unknown_id, unknown_id],
                return_type: unit_id,
                native_symbol: "ferrolite_rt_vec_push",
            },
            StdlibSignature {
                qualified_name: "get",
                params: vec![unknown_id, usize_id],
                return_type: unknown_id,
                native_symbol: "ferrolite_rt_vec_get",
            },
            StdlibSignature {
                qualified_name: "Result::Ok",
                params: vec![unknown_id],
                return_type: unknown_id,
                native_symbol: "ferrolite_rt_result_ok",
            },
            StdlibSignature {
                qualified_name: "Result::Err",
                params: vec![unknown_id],
                return_type: unknown_id,
                native_symbol: "ferrolite_rt_result_err",
            },
        ];

        StdlibRegistry { signatures }
    }

    pub fn lookup(&self, qualified_name: &str) -> Option<&StdlibSignature> {
        self.signatures.iter().find(|sig| sig.qualified_name == qualified_name)
    }

    pub fn is_known(&self, qualified_name: &str) -> bool {
        self.lookup(qualified_name).is_some()
    }

    pub fn signatures(&self) -> &[StdlibSignature] {
        &self.signatures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn println_is_registered() {
        let types = TypeRegistry::new_instance();
        let registry = StdlibRegistry::new(&types);
        let sig = registry.lookup("println").expect("println should be registered");
        assert_eq!(sig.params.len(), 1);
    }

    #[test]
    fn unknown_symbol_is_absent() {
        let types = TypeRegistry::new_instance();
        let registry = StdlibRegistry::new(&types);
        assert!(!registry.is_known("does_not_exist"));
    }
}
