use ferrolite_types::{FunctionType, PrimitiveType, StructType, TypeId, TypeInfo, TypeKind, TypeRegistry};

use crate::stdlib_registry::StdlibRegistry;
use crate::symbol_table::{Symbol, SymbolKind, SymbolTable};

/// Owns everything a single compilation needs about types and names: the type
/// registry and the symbol table, bundled so later phases (type checker,
/// semantic analyzer) can share one mutable handle instead of threading two.
pub struct CompilationContext {
    type_registry: TypeRegistry,
    symbol_table: SymbolTable,
}

impl Default for CompilationContext {
    fn default() -> Self {
        CompilationContext::new()
    }
}

impl CompilationContext {
    /// Creates a fresh context with every primitive type and every `§4.9`
    /// stdlib signature pre-registered in the root scope of the symbol table,
    /// so `print`, `len`, `Vec::new`, and the rest resolve like any other
    /// callable instead of tripping the undefined-function path.
    pub fn new() -> Self {
        let mut type_registry = TypeRegistry::new_instance();
        let mut symbol_table = SymbolTable::new();

        let mut define_primitive = |ptype: PrimitiveType| {
            let type_id = TypeId::from_primitive(ptype);
            symbol_table
                .define(ptype.name().to_string(), SymbolKind::Type, type_id)
                .unwrap_or_else(|_| {
                    panic!("failed to define primitive type symbol for '{}'", ptype.name())
                });
        };

        for ptype in PrimitiveType::iter() {
            define_primitive(ptype);
        }

        let stdlib = StdlibRegistry::new(&type_registry);
        for signature in stdlib.signatures() {
            let function_ty = type_registry.register_function_type(signature.params.clone(), signature.return_type);
            symbol_table
                .define(signature.qualified_name.to_string(), SymbolKind::Function, function_ty)
                .unwrap_or_else(|_| panic!("failed to define stdlib symbol for '{}'", signature.qualified_name));
        }

        CompilationContext { type_registry, symbol_table }
    }

    pub fn type_registry(&self) -> &TypeRegistry {
        &self.type_registry
    }

    pub fn type_registry_mut(&mut self) -> &mut TypeRegistry {
        &mut self.type_registry
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbol_table
    }

    pub fn symbol_table_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbol_table
    }

    pub fn get_type_info(&self, id: &TypeId) -> Option<&TypeInfo> {
        self.type_registry.get_type_info(id)
    }

    pub fn get_type_name(&self, type_id: &TypeId) -> String {
        self.type_registry.get_type_name(type_id)
    }

    pub fn get_primitive_type_from_id(&self, id: &TypeId) -> Option<PrimitiveType> {
        self.type_registry.get_primitive_type(id)
    }

    pub fn is_primitive_type(&self, id: &TypeId) -> bool {
        self.type_registry.is_primitive_type(id)
    }

    pub fn type_fulfills<F>(&self, type_id: &TypeId, predicate: F) -> bool
    where
        F: Fn(&TypeInfo) -> bool,
    {
        self.get_type_info(type_id).is_some_and(predicate)
    }

    pub fn is_numeric_type(&self, type_id: &TypeId) -> bool {
        self.type_registry.is_numeric_type(type_id)
    }

    pub fn is_integer_type(&self, type_id: &TypeId) -> bool {
        self.type_registry.is_integer_type(type_id)
    }

    pub fn is_float_type(&self, type_id: &TypeId) -> bool {
        self.type_registry.is_float_type(type_id)
    }

    pub fn is_signed_integer_type(&self, type_id: &TypeId) -> bool {
        self.get_primitive_type_from_id(type_id).is_some_and(|pt| pt.is_signed_integer())
    }

    pub fn is_unsigned_integer_type(&self, type_id: &TypeId) -> bool {
        self.get_primitive_type_from_id(type_id).is_some_and(|pt| pt.is_unsigned_integer())
    }

    pub fn get_bit_width(&self, type_id: &TypeId) -> u8 {
        self.get_primitive_type_from_id(type_id).map_or(0, |pt| pt.bit_width())
    }

    pub fn check_value_in_range(&self, value: &i64, type_id: &TypeId) -> bool {
        self.type_registry.check_value_in_range(value, type_id)
    }

    pub fn check_float_value_in_range(&self, value: &f64, type_id: &TypeId) -> bool {
        self.type_registry.check_float_value_in_range(value, type_id)
    }

    pub fn types_equal(&self, a: &TypeId, b: &TypeId) -> bool {
        self.type_registry.types_equal(a, b)
    }

    /// Defines a symbol in the *current* scope. Same-scope redefinition is
    /// rejected; shadowing an outer scope is left to the caller to allow.
    pub fn define_symbol(
        &mut self,
        name: String,
        kind: SymbolKind,
        type_id: TypeId,
    ) -> Result<(), String> {
        self.symbol_table.define(name, kind, type_id)
    }

    pub fn lookup_symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbol_table.lookup(name)
    }

    /// True if `name` is bound in an enclosing scope but not the current one —
    /// the condition under which defining it here shadows rather than
    /// redefines (`§4.6`, `§8` S6).
    pub fn shadows_outer_scope(&self, name: &str) -> bool {
        self.symbol_table.lookup_local(name).is_none() && self.symbol_table.lookup(name).is_some()
    }

    pub fn begin_scope(&mut self) {
        self.symbol_table.begin_scope();
    }

    pub fn end_scope(&mut self) {
        self.symbol_table.end_scope();
    }

    /// Registers a brand-new named type (struct, enum, ...) and binds its name
    /// in the current scope in one step — the name must be free in both the
    /// symbol table and the registry.
    pub fn register_custom_type(&mut self, name: &str, kind: SymbolKind, type_kind: TypeKind) -> Result<TypeId, String> {
        if self.symbol_table.lookup_local(name).is_some() {
            return Err(format!("symbol '{name}' is already defined in this scope"));
        }
        let type_id = self.type_registry.register_type(name, type_kind);
        self.symbol_table.define(name.to_string(), kind, type_id)?;
        Ok(type_id)
    }

    pub fn register_struct_type(&mut self, name: String, fields: Vec<(String, TypeId)>) -> Result<TypeId, String> {
        let struct_type = StructType::new(name.clone(), fields);
        self.register_custom_type(&name.clone(), SymbolKind::Struct, TypeKind::Struct(struct_type))
    }

    pub fn register_function_type(&mut self, param_types: Vec<TypeId>, return_type: TypeId) -> TypeId {
        self.type_registry.register_function_type(param_types, return_type)
    }

    pub fn is_function_type(&self, type_id: &TypeId) -> bool {
        self.type_registry.is_function_type(type_id)
    }

    pub fn get_function_type(&self, type_id: &TypeId) -> Option<&FunctionType> {
        self.type_registry.get_function_type(type_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_are_resolvable_by_name() {
        let ctx = CompilationContext::new();
        let symbol = ctx.lookup_symbol("i32").expect("i32 should be pre-registered");
        assert_eq!(symbol.kind, SymbolKind::Type);
    }

    #[test]
    fn stdlib_functions_are_resolvable_by_qualified_name() {
        let ctx = CompilationContext::new();
        let symbol = ctx.lookup_symbol("println").expect("println should be pre-registered");
        assert_eq!(symbol.kind, SymbolKind::Function);
        assert!(ctx.is_function_type(&symbol.type_id));

        let vec_new = ctx.lookup_symbol("Vec::new").expect("Vec::new should be pre-registered");
        assert_eq!(vec_new.kind, SymbolKind::Function);
    }

    #[test]
    fn struct_registration_binds_name_once() {
        let mut ctx = CompilationContext::new();
        let bool_id = TypeId::from_primitive(PrimitiveType::Bool);
        ctx.register_struct_type("Point".into(), vec![("flag".into(), bool_id)]).unwrap();
        assert!(ctx.register_struct_type("Point".into(), vec![]).is_err());
    }

    #[test]
    fn shadows_outer_scope_only_once_nested() {
        let mut ctx = CompilationContext::new();
        let unit_id = TypeId::from_primitive(PrimitiveType::Unit);
        ctx.define_symbol("x".into(), SymbolKind::Variable { mutable: false }, unit_id).unwrap();
        assert!(!ctx.shadows_outer_scope("x"));

        ctx.begin_scope();
        assert!(ctx.shadows_outer_scope("x"));
        ctx.define_symbol("x".into(), SymbolKind::Variable { mutable: false }, unit_id).unwrap();
        assert!(!ctx.shadows_outer_scope("x"));
        ctx.end_scope();
    }
}
