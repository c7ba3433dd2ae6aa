use std::fmt;

use serde::{Deserialize, Serialize};

/// Integer type variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntType {
    U8,
    U16,
    U32,
    U64,
    Usize,
    I8,
    I16,
    I32,
    I64,
    Isize,
}

impl IntType {
    /// Rust spelling of the type, e.g. `u32`.
    pub fn rust_name(self) -> &'static str {
        match self {
            IntType::U8 => "u8",
            IntType::U16 => "u16",
            IntType::U32 => "u32",
            IntType::U64 => "u64",
            IntType::Usize => "usize",
            IntType::I8 => "i8",
            IntType::I16 => "i16",
            IntType::I32 => "i32",
            IntType::I64 => "i64",
            IntType::Isize => "isize",
        }
    }
}

/// Floating-point type variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloatType {
    F32,
    F64,
}

impl FloatType {
    pub fn rust_name(self) -> &'static str {
        match self {
            FloatType::F32 => "f32",
            FloatType::F64 => "f64",
        }
    }
}

/// Declared type of a bean attribute.
///
/// Kinds describe what an attribute holds so descriptors can be inspected and
/// printed. They are never consulted to coerce a value: assignment goes
/// through [`PropertyValue::from_value`](crate::PropertyValue::from_value)
/// and fails on any mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Bool,
    Char,
    /// UTF-8 text.
    Text,
    Bytes,
    Int(IntType),
    Float(FloatType),
    /// Value that may be absent (`Option<T>`).
    Optional(Box<Kind>),
    /// Homogeneous list.
    Sequence(Box<Kind>),
    /// String-keyed map with homogeneous values.
    Map(Box<Kind>),
    /// Any value; accepted as-is.
    Any,
}

impl Kind {
    pub fn optional(inner: Kind) -> Self {
        Kind::Optional(Box::new(inner))
    }

    pub fn sequence(inner: Kind) -> Self {
        Kind::Sequence(Box::new(inner))
    }

    pub fn map(value: Kind) -> Self {
        Kind::Map(Box::new(value))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Bool => f.write_str("bool"),
            Kind::Char => f.write_str("char"),
            Kind::Text => f.write_str("text"),
            Kind::Bytes => f.write_str("bytes"),
            Kind::Int(int) => f.write_str(int.rust_name()),
            Kind::Float(float) => f.write_str(float.rust_name()),
            Kind::Optional(inner) => write!(f, "optional<{inner}>"),
            Kind::Sequence(inner) => write!(f, "sequence<{inner}>"),
            Kind::Map(value) => write!(f, "map<text, {value}>"),
            Kind::Any => f.write_str("any"),
        }
    }
}
