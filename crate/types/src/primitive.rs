use ferrolite_derive::NamedEnum;

// Type name constants, mirrored for the driver and diagnostics to print without
// importing the enum itself.
pub const TYPE_NAME_UNIT: &str = PrimitiveType::Unit.name();
pub const TYPE_NAME_BOOL: &str = PrimitiveType::Bool.name();
pub const TYPE_NAME_I8: &str = PrimitiveType::I8.name();
pub const TYPE_NAME_I16: &str = PrimitiveType::I16.name();
pub const TYPE_NAME_I32: &str = PrimitiveType::I32.name();
pub const TYPE_NAME_I64: &str = PrimitiveType::I64.name();
pub const TYPE_NAME_ISIZE: &str = PrimitiveType::Isize.name();
pub const TYPE_NAME_U8: &str = PrimitiveType::U8.name();
pub const TYPE_NAME_U16: &str = PrimitiveType::U16.name();
pub const TYPE_NAME_U32: &str = PrimitiveType::U32.name();
pub const TYPE_NAME_U64: &str = PrimitiveType::U64.name();
pub const TYPE_NAME_USIZE: &str = PrimitiveType::Usize.name();
pub const TYPE_NAME_F32: &str = PrimitiveType::F32.name();
pub const TYPE_NAME_F64: &str = PrimitiveType::F64.name();
pub const TYPE_NAME_CHAR: &str = PrimitiveType::Char.name();
pub const TYPE_NAME_STR: &str = PrimitiveType::Str.name();
pub const TYPE_NAME_STRING: &str = PrimitiveType::String.name();
pub const TYPE_NAME_INT: &str = PrimitiveType::UnspecifiedInt.name();
pub const TYPE_NAME_FLOAT: &str = PrimitiveType::UnspecifiedFloat.name();
pub const TYPE_NAME_UNKNOWN: &str = PrimitiveType::Unknown.name();

/// Every primitive (built-in, always-registered) type in the language.
///
/// `UnspecifiedInt`/`UnspecifiedFloat` are test/coercion helpers used directly by callers
/// that need a bare "any integer"/"any float" type; no expression's resolved type is ever
/// one of these two, since `§4.5`'s literal typing rule types every literal to a concrete
/// width (`I32`/`I64`/`F64`) up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, NamedEnum)]
pub enum PrimitiveType {
    Unit,
    Bool,
    I8,
    I16,
    I32,
    I64,
    #[name = "isize"]
    Isize,
    U8,
    U16,
    U32,
    U64,
    #[name = "usize"]
    Usize,
    F32,
    F64,
    Char,
    Str,
    String,
    #[name = "int"]
    UnspecifiedInt,
    #[name = "float"]
    UnspecifiedFloat,
    Unknown,
}

/// Fixed registration order; also the order the registry assigns primitive `TypeId`s.
pub const ALL_PRIMITIVE_TYPES: [PrimitiveType; 20] = [
    PrimitiveType::Unit,
    PrimitiveType::Bool,
    PrimitiveType::I8,
    PrimitiveType::I16,
    PrimitiveType::I32,
    PrimitiveType::I64,
    PrimitiveType::Isize,
    PrimitiveType::U8,
    PrimitiveType::U16,
    PrimitiveType::U32,
    PrimitiveType::U64,
    PrimitiveType::Usize,
    PrimitiveType::F32,
    PrimitiveType::F64,
    PrimitiveType::Char,
    PrimitiveType::Str,
    PrimitiveType::String,
    PrimitiveType::UnspecifiedInt,
    PrimitiveType::UnspecifiedFloat,
    PrimitiveType::Unknown,
];

impl PrimitiveType {
    pub fn iter() -> impl Iterator<Item = PrimitiveType> {
        ALL_PRIMITIVE_TYPES.iter().copied()
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            PrimitiveType::I8
                | PrimitiveType::I16
                | PrimitiveType::I32
                | PrimitiveType::I64
                | PrimitiveType::Isize
                | PrimitiveType::U8
                | PrimitiveType::U16
                | PrimitiveType::U32
                | PrimitiveType::U64
                | PrimitiveType::Usize
                | PrimitiveType::UnspecifiedInt
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(
            self,
            PrimitiveType::F32 | PrimitiveType::F64 | PrimitiveType::UnspecifiedFloat
        )
    }

    pub fn is_signed_integer(&self) -> bool {
        matches!(
            self,
            PrimitiveType::I8
                | PrimitiveType::I16
                | PrimitiveType::I32
                | PrimitiveType::I64
                | PrimitiveType::Isize
                | PrimitiveType::UnspecifiedInt
        )
    }

    pub fn is_unsigned_integer(&self) -> bool {
        matches!(
            self,
            PrimitiveType::U8
                | PrimitiveType::U16
                | PrimitiveType::U32
                | PrimitiveType::U64
                | PrimitiveType::Usize
        )
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, PrimitiveType::UnspecifiedInt | PrimitiveType::UnspecifiedFloat)
    }

    /// Bit width for fixed-width scalar types; pointer-sized types report the
    /// platform pointer width, `0` for types with no meaningful bit width.
    pub fn bit_width(&self) -> u8 {
        match self {
            PrimitiveType::I8 | PrimitiveType::U8 => 8,
            PrimitiveType::I16 | PrimitiveType::U16 => 16,
            PrimitiveType::I32 | PrimitiveType::U32 | PrimitiveType::F32 => 32,
            PrimitiveType::I64 | PrimitiveType::U64 | PrimitiveType::F64 => 64,
            PrimitiveType::Isize | PrimitiveType::Usize => (std::mem::size_of::<usize>() * 8) as u8,
            PrimitiveType::Bool => 1,
            PrimitiveType::Char => 32,
            _ => 0,
        }
    }
}
