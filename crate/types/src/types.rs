use std::sync::atomic::{AtomicUsize, Ordering};

use crate::primitive::{ALL_PRIMITIVE_TYPES, PrimitiveType};

/// A unique identifier for a type registered in a `TypeRegistry`.
///
/// Primitive types get stable ids assigned by their position in
/// `ALL_PRIMITIVE_TYPES`; every other type gets the next id off a shared counter
/// that starts well past the primitive range so the two numbering schemes never
/// collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub usize);

const FIRST_DYNAMIC_ID: usize = 1000;

impl Default for TypeId {
    fn default() -> Self {
        TypeId::new()
    }
}

impl TypeId {
    /// Allocates a fresh id for a non-primitive type.
    pub fn new() -> Self {
        static NEXT_ID: AtomicUsize = AtomicUsize::new(FIRST_DYNAMIC_ID);
        TypeId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The stable id for a primitive type, derived from its registration order.
    pub fn from_primitive(primitive: PrimitiveType) -> Self {
        let index = ALL_PRIMITIVE_TYPES
            .iter()
            .position(|p| *p == primitive)
            .expect("every PrimitiveType variant appears in ALL_PRIMITIVE_TYPES");
        TypeId(index)
    }

    pub fn is_primitive_range(&self) -> bool {
        self.0 < FIRST_DYNAMIC_ID
    }
}

/// An integer type's signedness and width. `is_unspecified` marks the inference
/// placeholder used for integer literals before a concrete width is picked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntegerType {
    pub signed: bool,
    pub bits: u8,
    pub is_unspecified: bool,
}

/// A floating-point type's width, with the same unspecified-literal placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FloatType {
    pub bits: u8,
    pub is_unspecified: bool,
}

/// `[elem; len]` — a fixed-size array type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayType {
    pub element: TypeId,
    pub len: usize,
}

/// `[elem]` — an unsized slice type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SliceType {
    pub element: TypeId,
}

/// `(T0, T1, ...)` — a tuple type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TupleType {
    pub elements: Vec<TypeId>,
}

/// A named struct type with ordered, named fields. Equality is nominal (by name),
/// never structural — two structs with identical fields but different names are
/// distinct types.
#[derive(Debug, Clone)]
pub struct StructType {
    pub name: String,
    pub fields: Vec<(String, TypeId)>,
}

impl StructType {
    pub fn new(name: String, fields: Vec<(String, TypeId)>) -> Self {
        StructType { name, fields }
    }
}

/// A named enum type. Each variant optionally carries a tuple of payload types,
/// mirroring the grammar's `IDENT ('(' type,* ')')?` variant form.
#[derive(Debug, Clone)]
pub struct EnumType {
    pub name: String,
    pub variants: Vec<(String, Vec<TypeId>)>,
}

impl EnumType {
    pub fn new(name: String, variants: Vec<(String, Vec<TypeId>)>) -> Self {
        EnumType { name, variants }
    }
}

/// `fn(params) -> return_type`. Hashable/equatable structurally so the registry can
/// deduplicate identical signatures through `function_type_cache`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionType {
    pub params: Vec<TypeId>,
    pub return_type: TypeId,
}

impl FunctionType {
    pub fn new(params: Vec<TypeId>, return_type: TypeId) -> Self {
        FunctionType { params, return_type }
    }
}

/// `&T` / `&mut T`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RefType {
    pub inner: TypeId,
    pub mutable: bool,
}

/// `*const T` / `*mut T`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PointerType {
    pub inner: TypeId,
    pub mutable: bool,
}

/// A named generic instantiation, e.g. `Vec<T>` or `Option<T>`. Monomorphization is
/// out of scope (see Non-goals); this is a structural placeholder that lets the
/// stdlib registry and type checker talk about generic signatures without
/// instantiating them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenericType {
    pub name: String,
    pub args: Vec<TypeId>,
}

/// The full tagged union of type kinds (`§3.4`).
///
/// Signed and unsigned integers share the `Integer` kind, distinguished by
/// `IntegerType::signed`, rather than splitting into separate `Int`/`UInt` kinds —
/// this keeps the match arms that only care "is this an integer" from having to
/// enumerate both variants every time.
#[derive(Debug, Clone)]
pub enum TypeKind {
    Unit,
    Bool,
    Integer(IntegerType),
    Float(FloatType),
    Char,
    Str,
    String,
    Array(ArrayType),
    Slice(SliceType),
    Tuple(TupleType),
    Struct(StructType),
    Enum(EnumType),
    Function(FunctionType),
    Ref(RefType),
    Pointer(PointerType),
    Generic(GenericType),
    Unknown,
}

/// Full information about a registered type: its id, display name, and kind.
#[derive(Debug)]
pub struct TypeInfo {
    pub id: TypeId,
    pub name: String,
    pub kind: TypeKind,
}
