//! The type universe (`§3.4`/`§4.4`): primitive types, compound type constructors,
//! and the registry that owns every type registered during a compilation.

pub mod primitive;
pub mod registry;
pub mod types;

pub use primitive::{
    ALL_PRIMITIVE_TYPES, PrimitiveType, TYPE_NAME_BOOL, TYPE_NAME_CHAR, TYPE_NAME_F32,
    TYPE_NAME_F64, TYPE_NAME_FLOAT, TYPE_NAME_I16, TYPE_NAME_I32, TYPE_NAME_I64, TYPE_NAME_I8,
    TYPE_NAME_INT, TYPE_NAME_ISIZE, TYPE_NAME_STR, TYPE_NAME_STRING, TYPE_NAME_U16, TYPE_NAME_U32,
    TYPE_NAME_U64, TYPE_NAME_U8, TYPE_NAME_UNIT, TYPE_NAME_UNKNOWN, TYPE_NAME_USIZE,
};
pub use registry::TypeRegistry;
pub use types::{
    ArrayType, EnumType, FloatType, FunctionType, GenericType, IntegerType, PointerType, RefType,
    SliceType, StructType, TupleType, TypeId, TypeInfo, TypeKind,
};
