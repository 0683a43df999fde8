//! [`Value`]: the decoded MessagePack value tree.

use std::fmt;

use crate::constants::TIMESTAMP_EXT_TYPE;

/// Largest integer magnitude an `f64` holds exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// A decoded MessagePack value.
///
/// Every variant owns its payload; a parent array or map exclusively owns
/// its children.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `nil`
    Nil,
    Bool(bool),
    /// Any integer in the union of the `u64` and `i64` ranges.
    Integer(Integer),
    F32(f32),
    F64(f64),
    /// UTF-8 text.
    String(String),
    /// Opaque bytes.
    Binary(Vec<u8>),
    Array(Vec<Value>),
    /// Key/value pairs in wire order. Duplicate keys are kept; keyed lookup
    /// resolves to the last pair.
    Map(Vec<(Value, Value)>),
    Extension(Extension),
}

impl Value {
    /// Returns `true` for `nil`.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// The boolean, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer, if this is an `Integer`.
    pub fn as_integer(&self) -> Option<Integer> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// The integer as `i64`, if it is one and fits.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_integer().and_then(|n| n.as_i64())
    }

    /// The integer as `u64`, if it is one and is non-negative.
    pub fn as_u64(&self) -> Option<u64> {
        self.as_integer().and_then(|n| n.as_u64())
    }

    /// Numeric value as `f64`. Integers beyond [`MAX_SAFE_INTEGER`] round.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(n.as_f64()),
            Value::F32(f) => Some(f64::from(*f)),
            Value::F64(f) => Some(*f),
            _ => None,
        }
    }

    /// The text, if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The payload, if this is `Binary`.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Binary(b) => Some(b),
            _ => None,
        }
    }

    /// The elements, if this is an `Array`.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The pairs in wire order, if this is a `Map`.
    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(pairs) => Some(pairs),
            _ => None,
        }
    }

    /// The extension, if this is an `Extension`.
    pub fn as_extension(&self) -> Option<&Extension> {
        match self {
            Value::Extension(ext) => Some(ext),
            _ => None,
        }
    }

    /// Looks up a string key in a map. When a key repeats, the last pair wins.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()?
            .iter()
            .rev()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }

    /// Looks up an arbitrary key in a map, last pair wins.
    pub fn get_key(&self, key: &Value) -> Option<&Value> {
        self.as_map()?
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::F32(_) => "float32",
            Value::F64(_) => "float64",
            Value::String(_) => "string",
            Value::Binary(_) => "binary",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Extension(_) => "extension",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::F32(f)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::F64(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Binary(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Vec<(Value, Value)>> for Value {
    fn from(pairs: Vec<(Value, Value)>) -> Self {
        Value::Map(pairs)
    }
}

impl From<Extension> for Value {
    fn from(ext: Extension) -> Self {
        Value::Extension(ext)
    }
}

impl From<Integer> for Value {
    fn from(n: Integer) -> Self {
        Value::Integer(n)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Integer {
                fn from(n: $ty) -> Self {
                    Integer::from_i128(n as i128)
                }
            }

            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Integer(Integer::from(n))
                }
            }
        )*
    };
}

impl_from_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// An integer decoded from any of the MessagePack integer encodings.
///
/// Non-negative values always use the unsigned representation, so equality
/// is numeric: `0x05`, `0xcc 0x05` and `0xd0 0x05` decode to equal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Integer(pub(crate) IntRepr);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum IntRepr {
    PosInt(u64),
    /// Always negative.
    NegInt(i64),
}

impl Integer {
    /// Integer from an unsigned value.
    pub const fn from_u64(n: u64) -> Self {
        Integer(IntRepr::PosInt(n))
    }

    /// Integer from a signed value; non-negative values normalize to unsigned.
    pub const fn from_i64(n: i64) -> Self {
        if n < 0 {
            Integer(IntRepr::NegInt(n))
        } else {
            Integer(IntRepr::PosInt(n as u64))
        }
    }

    // Only reached from the lossless conversions above.
    const fn from_i128(n: i128) -> Self {
        if n < 0 {
            Integer(IntRepr::NegInt(n as i64))
        } else {
            Integer(IntRepr::PosInt(n as u64))
        }
    }

    /// Returns `true` below zero.
    pub fn is_negative(&self) -> bool {
        matches!(self.0, IntRepr::NegInt(_))
    }

    /// The value as `u64`, `None` when negative.
    pub fn as_u64(&self) -> Option<u64> {
        match self.0 {
            IntRepr::PosInt(n) => Some(n),
            IntRepr::NegInt(_) => None,
        }
    }

    /// The value as `i64`, `None` above `i64::MAX`.
    pub fn as_i64(&self) -> Option<i64> {
        match self.0 {
            IntRepr::PosInt(n) => i64::try_from(n).ok(),
            IntRepr::NegInt(n) => Some(n),
        }
    }

    /// Widening conversion, always exact.
    pub fn as_i128(&self) -> i128 {
        match self.0 {
            IntRepr::PosInt(n) => i128::from(n),
            IntRepr::NegInt(n) => i128::from(n),
        }
    }

    /// Rounds to the nearest `f64`; exact only within ±[`MAX_SAFE_INTEGER`].
    pub fn as_f64(&self) -> f64 {
        match self.0 {
            IntRepr::PosInt(n) => n as f64,
            IntRepr::NegInt(n) => n as f64,
        }
    }

    /// `f64` value when the conversion is exact, `None` past the 2^53 boundary.
    pub fn as_safe_f64(&self) -> Option<f64> {
        let magnitude = match self.0 {
            IntRepr::PosInt(n) => n,
            IntRepr::NegInt(n) => n.unsigned_abs(),
        };
        (magnitude <= MAX_SAFE_INTEGER).then(|| self.as_f64())
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            IntRepr::PosInt(n) => n.fmt(f),
            IntRepr::NegInt(n) => n.fmt(f),
        }
    }
}

/// An application-defined extension: a one-byte type tag and opaque payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Extension {
    /// The type byte as it appears on the wire.
    pub tag: u8,
    pub data: Vec<u8>,
}

impl Extension {
    /// Creates an extension from its wire type byte and payload.
    pub fn new(tag: u8, data: Vec<u8>) -> Self {
        Self { tag, data }
    }

    /// The type byte read as the signed value the format defines
    /// (negative types are reserved).
    pub fn signed_tag(&self) -> i8 {
        self.tag as i8
    }

    /// Decodes the predefined timestamp extension (type -1).
    ///
    /// Accepts the 32-bit, 64-bit and 96-bit layouts. Returns `None` for any
    /// other type, payload size, or an out-of-range nanosecond field.
    pub fn timestamp(&self) -> Option<Timestamp> {
        if self.signed_tag() != TIMESTAMP_EXT_TYPE {
            return None;
        }
        let (seconds, nanoseconds) = match self.data.len() {
            4 => {
                let secs = u32::from_be_bytes(self.data[..4].try_into().ok()?);
                (i64::from(secs), 0)
            }
            8 => {
                let raw = u64::from_be_bytes(self.data[..8].try_into().ok()?);
                // 30-bit nanoseconds above 34-bit seconds
                ((raw & 0x3_ffff_ffff) as i64, (raw >> 34) as u32)
            }
            12 => {
                let nanos = u32::from_be_bytes(self.data[..4].try_into().ok()?);
                let secs = i64::from_be_bytes(self.data[4..12].try_into().ok()?);
                (secs, nanos)
            }
            _ => return None,
        };
        (nanoseconds < 1_000_000_000).then_some(Timestamp {
            seconds,
            nanoseconds,
        })
    }
}

/// Point in time carried by the timestamp extension, relative to the Unix
/// epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanoseconds: u32,
}
