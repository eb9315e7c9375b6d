//! # Primitive Types — The `type` Form Vocabulary
//!
//! Defines `Type`, the closed set of primitive type names a schema's `type`
//! keyword may carry. This is the one definition used by both the encoding
//! layer and the validation engine; every `match` on `Type` is exhaustive,
//! so adding a primitive forces every consumer to handle it.
//!
//! The integral types carry their inclusive bounds here rather than in the
//! engine, so the range table exists in exactly one place.

use serde::{Deserialize, Serialize};

/// The primitive types an instance can be checked against.
///
/// Wire names are the lowercase spellings of the variants.
///
/// | Type | Accepts |
/// |------|---------|
/// | `boolean` | JSON `true` / `false` |
/// | `float32`, `float64` | any JSON number |
/// | `int8` … `uint32` | a JSON number that is integral and within the width's range |
/// | `string` | any JSON string |
/// | `timestamp` | a JSON string holding an RFC 3339 date-time |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    /// JSON boolean.
    Boolean,
    /// Any JSON number; JSON carries no width information to check.
    Float32,
    /// Any JSON number.
    Float64,
    /// Integral number in `[-128, 127]`.
    Int8,
    /// Integral number in `[0, 255]`.
    Uint8,
    /// Integral number in `[-32768, 32767]`.
    Int16,
    /// Integral number in `[0, 65535]`.
    Uint16,
    /// Integral number in `[-2147483648, 2147483647]`.
    Int32,
    /// Integral number in `[0, 4294967295]`.
    Uint32,
    /// JSON string.
    String,
    /// JSON string holding an RFC 3339 date-time.
    Timestamp,
}

impl Type {
    /// Inclusive `[min, max]` bounds for the integral types; `None` for the
    /// types with no range restriction.
    pub fn integer_bounds(self) -> Option<(f64, f64)> {
        match self {
            Type::Int8 => Some((-128.0, 127.0)),
            Type::Uint8 => Some((0.0, 255.0)),
            Type::Int16 => Some((-32768.0, 32767.0)),
            Type::Uint16 => Some((0.0, 65535.0)),
            Type::Int32 => Some((-2_147_483_648.0, 2_147_483_647.0)),
            Type::Uint32 => Some((0.0, 4_294_967_295.0)),
            Type::Boolean | Type::Float32 | Type::Float64 | Type::String | Type::Timestamp => None,
        }
    }

    /// The wire name of this type.
    pub fn as_str(self) -> &'static str {
        match self {
            Type::Boolean => "boolean",
            Type::Float32 => "float32",
            Type::Float64 => "float64",
            Type::Int8 => "int8",
            Type::Uint8 => "uint8",
            Type::Int16 => "int16",
            Type::Uint16 => "uint16",
            Type::Int32 => "int32",
            Type::Uint32 => "uint32",
            Type::String => "string",
            Type::Timestamp => "timestamp",
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
