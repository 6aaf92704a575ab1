//! A high-level abstraction over a decoded (or to-be-encoded) scalar TLV value.
//!
//! Container values (structures, arrays, lists) are not represented here; the record layer
//! in the `tlv` crate hands those back as sub-records rather than as a `Value` variant, since
//! a container's contents are schema-typed and not meaningfully a single scalar.

/// A scalar TLV value, as produced by a decode or accepted by a write.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A signed integer, widened to `i64` regardless of its on-wire width.
    Signed(i64),
    /// An unsigned integer, widened to `u64` regardless of its on-wire width.
    Unsigned(u64),
    /// A single-precision float.
    Float32(f32),
    /// A double-precision float.
    Float64(f64),
    /// A boolean.
    Bool(bool),
    /// A UTF-8 string.
    Utf8(String),
    /// A raw byte string.
    Octet(Vec<u8>),
    /// The null value.
    Null,
}

impl Value {
    /// The value as a signed integer, if this is a [`Value::Signed`].
    pub fn as_signed(&self) -> Option<i64> {
        match self {
            Value::Signed(v) => Some(*v),
            _ => None,
        }
    }

    /// The value as an unsigned integer, if this is a [`Value::Unsigned`].
    pub fn as_unsigned(&self) -> Option<u64> {
        match self {
            Value::Unsigned(v) => Some(*v),
            _ => None,
        }
    }

    /// The value as an `f64`, if this is a [`Value::Float32`] or [`Value::Float64`].
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float32(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// The value as a `bool`, if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// The value as a string slice, if this is a [`Value::Utf8`].
    pub fn as_utf8(&self) -> Option<&str> {
        match self {
            Value::Utf8(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// The value as a byte slice, if this is a [`Value::Octet`].
    pub fn as_octet(&self) -> Option<&[u8]> {
        match self {
            Value::Octet(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Whether this value is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn casting_accessors_reject_mismatched_variants() {
        let v = Value::Signed(-1);
        assert_eq!(v.as_signed(), Some(-1));
        assert_eq!(v.as_unsigned(), None);
        assert_eq!(v.as_bool(), None);
    }
}
