use crate::metamodel::key::{TypeKey, ARRAY_ERASURE};

/// The closed set of built-in type kinds seeded into every registry at bootstrap.
///
/// Built-ins cover the engine's own vocabulary: atomic primitives, the string and enum
/// scalars, well-known value types, the raw container/map/optional classes that serve as
/// inference prototypes for parameterized keys, the single generic array shape, and the
/// `object-id` reference used by the dehydration translator. Host applications register
/// their own classes on top of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    /// The top type; a singleton value mapping outside the general cache
    Object,
    /// Boolean scalar
    Bool,
    /// Character scalar
    Char,
    /// 8-bit signed integer
    I8,
    /// 16-bit signed integer
    I16,
    /// 32-bit signed integer; also the implicit container position type
    I32,
    /// 64-bit signed integer
    I64,
    /// 32-bit floating point
    F32,
    /// 64-bit floating point
    F64,
    /// String scalar
    String,
    /// Enumeration scalar
    Enum,
    /// Arbitrary-precision decimal value
    Decimal,
    /// Calendar date value
    Date,
    /// Wall-clock time value
    Time,
    /// Combined date-time value
    DateTime,
    /// Point on the absolute time line
    Instant,
    /// Elapsed-time value
    Duration,
    /// Universally unique identifier value
    Uuid,
    /// URI value
    Uri,
    /// URL value
    Url,
    /// Filesystem path value
    Path,
    /// Wire-level identity reference produced by dehydration
    ObjectId,
    /// Raw ordered container class
    List,
    /// Raw unordered container class
    Set,
    /// Raw associative container class
    Map,
    /// Raw nullable-wrapper class
    Optional,
    /// The single generic array shape
    Array,
}

impl BuiltinKind {
    /// Canonical class name of this built-in.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            BuiltinKind::Object => "object",
            BuiltinKind::Bool => "bool",
            BuiltinKind::Char => "char",
            BuiltinKind::I8 => "i8",
            BuiltinKind::I16 => "i16",
            BuiltinKind::I32 => "i32",
            BuiltinKind::I64 => "i64",
            BuiltinKind::F32 => "f32",
            BuiltinKind::F64 => "f64",
            BuiltinKind::String => "string",
            BuiltinKind::Enum => "enum",
            BuiltinKind::Decimal => "decimal",
            BuiltinKind::Date => "date",
            BuiltinKind::Time => "time",
            BuiltinKind::DateTime => "date-time",
            BuiltinKind::Instant => "instant",
            BuiltinKind::Duration => "duration",
            BuiltinKind::Uuid => "uuid",
            BuiltinKind::Uri => "uri",
            BuiltinKind::Url => "url",
            BuiltinKind::Path => "path",
            BuiltinKind::ObjectId => "object-id",
            BuiltinKind::List => "list",
            BuiltinKind::Set => "set",
            BuiltinKind::Map => "map",
            BuiltinKind::Optional => "optional",
            BuiltinKind::Array => ARRAY_ERASURE,
        }
    }

    /// The native type key this built-in is registered under.
    ///
    /// All built-ins are raw class keys except [`BuiltinKind::Array`], which is the array
    /// shape over `object`.
    #[must_use]
    pub fn key(self) -> TypeKey {
        match self {
            BuiltinKind::Array => TypeKey::array(BuiltinKind::Object.key()),
            kind => TypeKey::class(kind.name()),
        }
    }
}
