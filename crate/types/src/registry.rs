use std::collections::HashMap;

use crate::primitive::PrimitiveType;
use crate::types::{
    ArrayType, EnumType, FloatType, FunctionType, GenericType, IntegerType, PointerType, RefType,
    SliceType, StructType, TupleType, TypeId, TypeInfo, TypeKind,
};

/// Owns every type registered during a compilation: the built-in primitives,
/// registered at startup, plus whatever structs, enums, functions, and compound
/// types the semantic analyzer registers as it walks declarations.
///
/// Types are value objects once registered (`clone()` is cheap — `TypeId` is a
/// `Copy` handle); the registry is the only place that owns the heavier
/// `TypeInfo` payload.
pub struct TypeRegistry {
    types: HashMap<TypeId, TypeInfo>,
    function_type_cache: HashMap<FunctionType, TypeId>,
}

impl TypeRegistry {
    pub fn new_instance() -> Self {
        let mut registry = TypeRegistry {
            types: HashMap::new(),
            function_type_cache: HashMap::new(),
        };
        registry.register_built_in_types();
        registry
    }

    fn register_built_in_types(&mut self) {
        for ptype in PrimitiveType::iter() {
            let id = TypeId::from_primitive(ptype);
            let kind = primitive_to_type_kind(ptype);
            self.insert(id, ptype.name().to_string(), kind);
        }
    }

    fn insert(&mut self, id: TypeId, name: String, kind: TypeKind) {
        self.types.insert(id, TypeInfo { id, name, kind });
    }

    /// Registers an arbitrary, not-yet-deduplicated type under a fresh id.
    pub fn register_type(&mut self, name: &str, kind: TypeKind) -> TypeId {
        let id = TypeId::new();
        self.insert(id, name.to_string(), kind);
        id
    }

    pub fn get_type_info(&self, id: &TypeId) -> Option<&TypeInfo> {
        self.types.get(id)
    }

    pub fn get_primitive_type(&self, id: &TypeId) -> Option<PrimitiveType> {
        self.get_type_info(id).and_then(|info| PrimitiveType::from_str(&info.name))
    }

    pub fn is_primitive_type(&self, id: &TypeId) -> bool {
        id.is_primitive_range()
    }

    /// Checks whether an integer value fits in the range of the given type.
    pub fn check_value_in_range(&self, value: &i64, type_id: &TypeId) -> bool {
        let type_info = match self.get_type_info(type_id) {
            Some(info) => info,
            None => return false,
        };

        match &type_info.kind {
            TypeKind::Integer(int_type) => match (int_type.signed, int_type.bits) {
                (true, 8) => *value >= i8::MIN as i64 && *value <= i8::MAX as i64,
                (true, 16) => *value >= i16::MIN as i64 && *value <= i16::MAX as i64,
                (true, 32) => *value >= i32::MIN as i64 && *value <= i32::MAX as i64,
                (true, _) => true,
                (false, 8) => *value >= 0 && *value <= u8::MAX as i64,
                (false, 16) => *value >= 0 && *value <= u16::MAX as i64,
                (false, 32) => *value >= 0 && *value <= u32::MAX as i64,
                (false, _) => *value >= 0,
            },
            TypeKind::Float(float_type) => match float_type.bits {
                32 => *value >= f32::MIN as i64 && *value <= f32::MAX as i64,
                _ => true,
            },
            _ => false,
        }
    }

    /// Checks whether a float value fits in the range of the given type.
    pub fn check_float_value_in_range(&self, value: &f64, type_id: &TypeId) -> bool {
        let type_info = match self.get_type_info(type_id) {
            Some(info) => info,
            None => return false,
        };

        match &type_info.kind {
            TypeKind::Float(float_type) => match float_type.bits {
                32 => *value >= f32::MIN as f64 && *value <= f32::MAX as f64,
                _ => true,
            },
            _ => false,
        }
    }

    pub fn register_struct_type(&mut self, name: String, fields: Vec<(String, TypeId)>) -> TypeId {
        let struct_type = StructType::new(name.clone(), fields);
        self.register_type(&name, TypeKind::Struct(struct_type))
    }

    pub fn register_enum_type(
        &mut self,
        name: String,
        variants: Vec<(String, Vec<TypeId>)>,
    ) -> TypeId {
        let enum_type = EnumType::new(name.clone(), variants);
        self.register_type(&name, TypeKind::Enum(enum_type))
    }

    pub fn register_array_type(&mut self, element: TypeId, len: usize) -> TypeId {
        let element_name = self.get_type_name(&element);
        let name = format!("[{element_name}; {len}]");
        self.register_type(&name, TypeKind::Array(ArrayType { element, len }))
    }

    pub fn register_slice_type(&mut self, element: TypeId) -> TypeId {
        let element_name = self.get_type_name(&element);
        let name = format!("[{element_name}]");
        self.register_type(&name, TypeKind::Slice(SliceType { element }))
    }

    pub fn register_tuple_type(&mut self, elements: Vec<TypeId>) -> TypeId {
        let names: Vec<String> = elements.iter().map(|id| self.get_type_name(id)).collect();
        let name = format!("({})", names.join(", "));
        self.register_type(&name, TypeKind::Tuple(TupleType { elements }))
    }

    pub fn register_ref_type(&mut self, inner: TypeId, mutable: bool) -> TypeId {
        let inner_name = self.get_type_name(&inner);
        let name = if mutable { format!("&mut {inner_name}") } else { format!("&{inner_name}") };
        self.register_type(&name, TypeKind::Ref(RefType { inner, mutable }))
    }

    pub fn register_pointer_type(&mut self, inner: TypeId, mutable: bool) -> TypeId {
        let inner_name = self.get_type_name(&inner);
        let name =
            if mutable { format!("*mut {inner_name}") } else { format!("*const {inner_name}") };
        self.register_type(&name, TypeKind::Pointer(PointerType { inner, mutable }))
    }

    pub fn register_generic_type(&mut self, name: String, args: Vec<TypeId>) -> TypeId {
        let arg_names: Vec<String> = args.iter().map(|id| self.get_type_name(id)).collect();
        let display = if arg_names.is_empty() {
            name.clone()
        } else {
            format!("{name}<{}>", arg_names.join(", "))
        };
        self.register_type(&display, TypeKind::Generic(GenericType { name, args }))
    }

    /// Registers a function type, returning the existing id if an identical
    /// signature has already been registered.
    pub fn register_function_type(&mut self, param_types: Vec<TypeId>, return_type: TypeId) -> TypeId {
        let signature = FunctionType::new(param_types.clone(), return_type);

        if let Some(existing) = self.function_type_cache.get(&signature) {
            return *existing;
        }

        let param_names: Vec<String> = param_types.iter().map(|id| self.get_type_name(id)).collect();
        let return_name = self.get_type_name(&return_type);
        let name = format!("fn({}) -> {}", param_names.join(", "), return_name);

        let type_id = self.register_type(&name, TypeKind::Function(signature.clone()));
        self.function_type_cache.insert(signature, type_id);
        type_id
    }

    pub fn is_function_type(&self, id: &TypeId) -> bool {
        self.get_type_info(id).map(|info| matches!(info.kind, TypeKind::Function(_))).unwrap_or(false)
    }

    pub fn get_function_type(&self, id: &TypeId) -> Option<&FunctionType> {
        self.get_type_info(id).and_then(|info| match &info.kind {
            TypeKind::Function(func_type) => Some(func_type),
            _ => None,
        })
    }

    pub fn get_type_name(&self, id: &TypeId) -> String {
        self.get_type_info(id).map(|info| info.name.clone()).unwrap_or_else(|| format!("<unregistered:{}>", id.0))
    }

    pub fn is_numeric_type(&self, id: &TypeId) -> bool {
        self.get_type_info(id)
            .map(|info| matches!(info.kind, TypeKind::Integer(_) | TypeKind::Float(_)))
            .unwrap_or(false)
    }

    pub fn is_integer_type(&self, id: &TypeId) -> bool {
        self.get_type_info(id).map(|info| matches!(info.kind, TypeKind::Integer(_))).unwrap_or(false)
    }

    pub fn is_float_type(&self, id: &TypeId) -> bool {
        self.get_type_info(id).map(|info| matches!(info.kind, TypeKind::Float(_))).unwrap_or(false)
    }

    pub fn is_boolean_type(&self, id: &TypeId) -> bool {
        self.get_type_info(id).map(|info| matches!(info.kind, TypeKind::Bool)).unwrap_or(false)
    }

    pub fn is_unit_type(&self, id: &TypeId) -> bool {
        self.get_type_info(id).map(|info| matches!(info.kind, TypeKind::Unit)).unwrap_or(false)
    }

    pub fn is_reference_type(&self, id: &TypeId) -> bool {
        self.get_type_info(id).map(|info| matches!(info.kind, TypeKind::Ref(_))).unwrap_or(false)
    }

    pub fn is_pointer_type(&self, id: &TypeId) -> bool {
        self.get_type_info(id).map(|info| matches!(info.kind, TypeKind::Pointer(_))).unwrap_or(false)
    }

    /// Structural or nominal size of a type, in bytes. `0` for unsized kinds.
    pub fn size_of(&self, id: &TypeId) -> usize {
        let Some(info) = self.get_type_info(id) else { return 0 };
        match &info.kind {
            TypeKind::Unit => 0,
            TypeKind::Bool => 1,
            TypeKind::Integer(int_type) => (int_type.bits as usize) / 8,
            TypeKind::Float(float_type) => (float_type.bits as usize) / 8,
            TypeKind::Char => 4,
            TypeKind::Str | TypeKind::String => 0,
            TypeKind::Array(array_type) => self.size_of(&array_type.element) * array_type.len,
            TypeKind::Slice(_) => 0,
            TypeKind::Tuple(tuple_type) => tuple_type.elements.iter().map(|id| self.size_of(id)).sum(),
            TypeKind::Struct(struct_type) => {
                struct_type.fields.iter().map(|(_, id)| self.size_of(id)).sum()
            }
            TypeKind::Enum(enum_type) => enum_type
                .variants
                .iter()
                .map(|(_, payload)| payload.iter().map(|id| self.size_of(id)).sum::<usize>())
                .max()
                .unwrap_or(0),
            TypeKind::Function(_) => 0,
            TypeKind::Ref(_) | TypeKind::Pointer(_) => std::mem::size_of::<usize>(),
            TypeKind::Generic(_) | TypeKind::Unknown => 0,
        }
    }

    /// Whether the type has a statically known, non-zero-by-unsizedness size.
    pub fn is_sized(&self, id: &TypeId) -> bool {
        let Some(info) = self.get_type_info(id) else { return false };
        match &info.kind {
            TypeKind::Str | TypeKind::Slice(_) | TypeKind::Function(_) | TypeKind::Unknown => false,
            TypeKind::Tuple(tuple_type) => {
                tuple_type.elements.iter().all(|id| self.is_sized(id))
            }
            TypeKind::Struct(struct_type) => {
                struct_type.fields.iter().all(|(_, id)| self.is_sized(id))
            }
            TypeKind::Enum(enum_type) => enum_type
                .variants
                .iter()
                .all(|(_, payload)| payload.iter().all(|id| self.is_sized(id))),
            TypeKind::Generic(_) => false,
            _ => true,
        }
    }

    /// Whether a value of this type is implicitly copied rather than moved.
    /// Primitives, fixed-size arrays of `Copy` elements, and tuples of `Copy`
    /// elements are `Copy`; `String`, structs, enums, and anything unsized are not.
    pub fn is_copy(&self, id: &TypeId) -> bool {
        let Some(info) = self.get_type_info(id) else { return false };
        match &info.kind {
            TypeKind::Unit
            | TypeKind::Bool
            | TypeKind::Integer(_)
            | TypeKind::Float(_)
            | TypeKind::Char => true,
            TypeKind::Array(array_type) => self.is_copy(&array_type.element),
            TypeKind::Tuple(tuple_type) => tuple_type.elements.iter().all(|id| self.is_copy(id)),
            TypeKind::Ref(ref_type) => !ref_type.mutable,
            TypeKind::Pointer(_) => true,
            _ => false,
        }
    }

    /// Structural equality except for `Struct`/`Enum`, which compare nominally by
    /// name (two structs with identical fields but different names differ).
    pub fn types_equal(&self, a: &TypeId, b: &TypeId) -> bool {
        if a == b {
            return true;
        }
        let (Some(a_info), Some(b_info)) = (self.get_type_info(a), self.get_type_info(b)) else {
            return false;
        };
        match (&a_info.kind, &b_info.kind) {
            (TypeKind::Unit, TypeKind::Unit)
            | (TypeKind::Bool, TypeKind::Bool)
            | (TypeKind::Char, TypeKind::Char)
            | (TypeKind::Str, TypeKind::Str)
            | (TypeKind::String, TypeKind::String)
            | (TypeKind::Unknown, TypeKind::Unknown) => true,
            (TypeKind::Integer(x), TypeKind::Integer(y)) => x.signed == y.signed && x.bits == y.bits,
            (TypeKind::Float(x), TypeKind::Float(y)) => x.bits == y.bits,
            (TypeKind::Array(x), TypeKind::Array(y)) => {
                x.len == y.len && self.types_equal(&x.element, &y.element)
            }
            (TypeKind::Slice(x), TypeKind::Slice(y)) => self.types_equal(&x.element, &y.element),
            (TypeKind::Tuple(x), TypeKind::Tuple(y)) => {
                x.elements.len() == y.elements.len()
                    && x.elements.iter().zip(&y.elements).all(|(a, b)| self.types_equal(a, b))
            }
            (TypeKind::Struct(x), TypeKind::Struct(y)) => x.name == y.name,
            (TypeKind::Enum(x), TypeKind::Enum(y)) => x.name == y.name,
            (TypeKind::Function(x), TypeKind::Function(y)) => {
                x.params.len() == y.params.len()
                    && self.types_equal(&x.return_type, &y.return_type)
                    && x.params.iter().zip(&y.params).all(|(a, b)| self.types_equal(a, b))
            }
            (TypeKind::Ref(x), TypeKind::Ref(y)) => {
                x.mutable == y.mutable && self.types_equal(&x.inner, &y.inner)
            }
            (TypeKind::Pointer(x), TypeKind::Pointer(y)) => {
                x.mutable == y.mutable && self.types_equal(&x.inner, &y.inner)
            }
            (TypeKind::Generic(x), TypeKind::Generic(y)) => {
                x.name == y.name
                    && x.args.len() == y.args.len()
                    && x.args.iter().zip(&y.args).all(|(a, b)| self.types_equal(a, b))
            }
            _ => false,
        }
    }
}

fn primitive_to_type_kind(ptype: PrimitiveType) -> TypeKind {
    match ptype {
        PrimitiveType::Unit => TypeKind::Unit,
        PrimitiveType::Bool => TypeKind::Bool,
        PrimitiveType::Char => TypeKind::Char,
        PrimitiveType::Str => TypeKind::Str,
        PrimitiveType::String => TypeKind::String,
        PrimitiveType::Unknown => TypeKind::Unknown,
        PrimitiveType::UnspecifiedInt => TypeKind::Integer(IntegerType {
            signed: true,
            bits: 32,
            is_unspecified: true,
        }),
        PrimitiveType::UnspecifiedFloat => TypeKind::Float(FloatType { bits: 64, is_unspecified: true }),
        _ if ptype.is_integer() => TypeKind::Integer(IntegerType {
            signed: ptype.is_signed_integer(),
            bits: ptype.bit_width(),
            is_unspecified: false,
        }),
        _ if ptype.is_float() => {
            TypeKind::Float(FloatType { bits: ptype.bit_width(), is_unspecified: false })
        }
        _ => unreachable!("every PrimitiveType variant is handled above"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_are_pre_registered() {
        let registry = TypeRegistry::new_instance();
        let i32_id = TypeId::from_primitive(PrimitiveType::I32);
        assert_eq!(registry.get_type_name(&i32_id), "i32");
        assert!(registry.is_integer_type(&i32_id));
        assert_eq!(registry.size_of(&i32_id), 4);
    }

    #[test]
    fn struct_size_is_sum_of_fields() {
        let mut registry = TypeRegistry::new_instance();
        let i32_id = TypeId::from_primitive(PrimitiveType::I32);
        let f64_id = TypeId::from_primitive(PrimitiveType::F64);
        let struct_id =
            registry.register_struct_type("Point".into(), vec![("x".into(), i32_id), ("y".into(), f64_id)]);
        assert_eq!(registry.size_of(&struct_id), 12);
        assert!(registry.is_sized(&struct_id));
        assert!(!registry.is_copy(&struct_id));
    }

    #[test]
    fn enum_size_is_max_variant() {
        let mut registry = TypeRegistry::new_instance();
        let i32_id = TypeId::from_primitive(PrimitiveType::I32);
        let i64_id = TypeId::from_primitive(PrimitiveType::I64);
        let enum_id = registry.register_enum_type(
            "Shape".into(),
            vec![("Circle".into(), vec![i32_id]), ("Big".into(), vec![i64_id, i64_id])],
        );
        assert_eq!(registry.size_of(&enum_id), 16);
    }

    #[test]
    fn function_type_registration_deduplicates() {
        let mut registry = TypeRegistry::new_instance();
        let i32_id = TypeId::from_primitive(PrimitiveType::I32);
        let bool_id = TypeId::from_primitive(PrimitiveType::Bool);
        let a = registry.register_function_type(vec![i32_id], bool_id);
        let b = registry.register_function_type(vec![i32_id], bool_id);
        assert_eq!(a, b);
    }

    #[test]
    fn struct_equality_is_nominal() {
        let mut registry = TypeRegistry::new_instance();
        let i32_id = TypeId::from_primitive(PrimitiveType::I32);
        let a = registry.register_struct_type("A".into(), vec![("x".into(), i32_id)]);
        let b = registry.register_struct_type("B".into(), vec![("x".into(), i32_id)]);
        assert!(!registry.types_equal(&a, &b));
    }
}
