//! Field descriptors: the schema layer's per-field metadata, binding a tag to an element
//! kind and knowing how to decode, encode, validate, and render a value of that kind.

use std::sync::Arc;

use tlv_core::codec::{self, Header};
use tlv_core::error::{Error, Result};
use tlv_core::kind::{ElementKind, FloatWidth, IntWidth, LengthWidth};
use tlv_core::tag::Tag;
use tlv_core::value::Value;

use crate::schema::Schema;
use tlv_core::limits::ARRAY_MAX_OCTETS;

/// The element-kind family a field is declared as, together with its kind-specific
/// constraints. This is a closed, tagged variant rather than a trait-object hierarchy: the
/// same choice the element layer makes for `ElementKind` itself, avoiding dynamic dispatch
/// on the decode/encode hot path.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// A fixed-width integer.
    Int {
        /// Whether the field is signed or unsigned.
        signed: bool,
        /// Declared width in octets; always the width used when encoding.
        octets: usize,
        /// Optional additional lower bound, tighter than the type's natural range.
        min: Option<i128>,
        /// Optional additional upper bound, tighter than the type's natural range.
        max: Option<i128>,
    },
    /// A 2-octet unsigned integer field specialized to a closed enumeration.
    Enum {
        /// `(wire value, variant name)` pairs for validation and rendering.
        variants: &'static [(u16, &'static str)],
    },
    /// A floating point field.
    Float {
        /// Declared width in octets: 4 or 8.
        octets: usize,
    },
    /// A boolean field.
    Bool,
    /// A UTF-8 string field.
    Utf8 {
        /// Maximum encodable length in bytes.
        max_length: usize,
    },
    /// A raw byte-string field.
    Octet {
        /// Maximum encodable length in bytes.
        max_length: usize,
    },
    /// A nested structure field.
    Struct {
        /// The inner record's schema.
        schema: Arc<Schema>,
    },
    /// An array field: zero or more elements of the inner schema.
    Array {
        /// The inner element schema (struct- or list-kind).
        inner: Arc<Schema>,
    },
    /// A placeholder field used during schema development. Always nullable, never
    /// optional; writes null and nothing else.
    Any,
}

/// A single field of a [`Schema`]: a tag, its element-kind family, and its
/// optionality/nullability.
#[derive(Debug, Clone)]
pub struct Field {
    /// The field's tag.
    pub tag: Tag,
    /// The field's element-kind family and constraints.
    pub kind: FieldKind,
    /// Whether the field may be entirely absent from the encoding.
    pub optional: bool,
    /// Whether the field may be present but encoded as NULL.
    pub nullable: bool,
}

impl Field {
    /// Declare a required, non-nullable field. Fails with [`Error::UnsupportedWidth`] if
    /// an `Int` or `Float` field declares a width the wire format doesn't support (legal
    /// widths are 1, 2, 4, or 8 octets for integers; 4 or 8 for floats) — this is a
    /// schema-construction error, not something deferred to the first encode.
    pub fn new(tag: Tag, kind: FieldKind) -> Result<Field> {
        match &kind {
            FieldKind::Int { octets, .. } => validate_int_octets(*octets)?,
            FieldKind::Float { octets } => validate_float_octets(*octets)?,
            _ => {}
        }
        let nullable = matches!(kind, FieldKind::Any);
        Ok(Field {
            tag,
            kind,
            optional: false,
            nullable,
        })
    }

    /// Mark this field optional (may be entirely absent). A no-op on `Any` fields, which
    /// are always nullable and never optional regardless of how they're built.
    pub fn optional(mut self) -> Field {
        if !matches!(self.kind, FieldKind::Any) {
            self.optional = true;
        }
        self
    }

    /// Mark this field nullable (may be present but NULL).
    pub fn nullable(mut self) -> Field {
        self.nullable = true;
        self
    }

    /// The maximum number of bytes this field can occupy once encoded: one control octet,
    /// the tag's header width, and the kind's maximum payload.
    pub fn max_length(&self) -> usize {
        1 + self.tag.own_header_width() + self.value_max_len()
    }

    fn value_max_len(&self) -> usize {
        match &self.kind {
            FieldKind::Int { octets, .. } => *octets,
            FieldKind::Enum { .. } => 2,
            FieldKind::Float { octets } => *octets,
            FieldKind::Bool => 0,
            FieldKind::Utf8 { max_length } | FieldKind::Octet { max_length } => {
                LengthWidth::smallest_for(*max_length).octets() + *max_length
            }
            // +1 for the trailing end-of-container byte.
            FieldKind::Struct { schema } => schema.max_length() + 1,
            FieldKind::Array { .. } => ARRAY_MAX_OCTETS + 1,
            FieldKind::Any => 0,
        }
    }

    /// The `ElementKind` this field encodes `value` as. Integer and float fields always use
    /// their declared width, never a narrower on-wire form.
    pub fn element_kind_for(&self, value: &Value) -> Result<ElementKind> {
        match (&self.kind, value) {
            (FieldKind::Int { signed: true, octets, .. }, Value::Signed(_)) => {
                Ok(ElementKind::SignedInt(IntWidth::from_octets(*octets)))
            }
            (FieldKind::Int { signed: false, octets, .. }, Value::Unsigned(_)) => {
                Ok(ElementKind::UnsignedInt(IntWidth::from_octets(*octets)))
            }
            (FieldKind::Enum { .. }, Value::Unsigned(_)) => {
                Ok(ElementKind::UnsignedInt(IntWidth::W2))
            }
            (FieldKind::Float { octets }, Value::Float32(_) | Value::Float64(_)) => {
                Ok(ElementKind::Float(float_width(*octets)))
            }
            (FieldKind::Bool, Value::Bool(b)) => Ok(ElementKind::Bool(*b)),
            (FieldKind::Utf8 { max_length }, Value::Utf8(_)) => Ok(ElementKind::Utf8String(
                LengthWidth::smallest_for(*max_length),
            )),
            (FieldKind::Octet { max_length }, Value::Octet(_)) => Ok(ElementKind::OctetString(
                LengthWidth::smallest_for(*max_length),
            )),
            _ => Err(Error::InternalInvariant(
                "value does not match the field's declared kind",
            )),
        }
    }

    /// Validate `value` against this field's constraints without writing it anywhere.
    pub fn validate(&self, value: &Value) -> Result<()> {
        match (&self.kind, value) {
            (FieldKind::Int { signed, octets, min, max }, _) => {
                let v = signed_value(*signed, value).ok_or(Error::InternalInvariant(
                    "integer value does not match the field's signedness",
                ))?;
                let (natural_min, natural_max) = representable_range(*signed, *octets);
                if v < natural_min || v > natural_max {
                    return Err(Error::IntOutOfRange(self.tag, v));
                }
                if let (Some(lo), Some(hi)) = (min, max) {
                    if v < *lo || v > *hi {
                        return Err(Error::RangeConstraintViolated(self.tag, v, *lo, *hi));
                    }
                }
                Ok(())
            }
            (FieldKind::Enum { variants }, Value::Unsigned(v)) => {
                let v16 = u16::try_from(*v).map_err(|_| {
                    Error::EnumMembershipViolated(self.tag, u16::MAX)
                })?;
                if variants.iter().any(|(value, _)| *value == v16) {
                    Ok(())
                } else {
                    Err(Error::EnumMembershipViolated(self.tag, v16))
                }
            }
            (FieldKind::Float { .. }, Value::Float32(_) | Value::Float64(_)) => Ok(()),
            (FieldKind::Bool, Value::Bool(_)) => Ok(()),
            (FieldKind::Utf8 { max_length }, Value::Utf8(s)) => {
                if s.len() > *max_length {
                    Err(Error::LengthExceedsMax(self.tag, s.len(), *max_length))
                } else {
                    Ok(())
                }
            }
            (FieldKind::Octet { max_length }, Value::Octet(b)) => {
                if b.len() > *max_length {
                    Err(Error::LengthExceedsMax(self.tag, b.len(), *max_length))
                } else {
                    Ok(())
                }
            }
            (FieldKind::Any, Value::Null) => Ok(()),
            (FieldKind::Any, _) => Err(Error::InternalInvariant(
                "an Any field may only ever be written as null",
            )),
            _ => Err(Error::InternalInvariant(
                "value does not match the field's declared kind",
            )),
        }
    }

    /// Decode this field's value from the payload described by `header`. Callers must only
    /// invoke this for a header whose kind corresponds to a scalar element; null handling
    /// and container fields (`Struct`, `Array`) are handled upstream by the record layer.
    pub fn decode(&self, header: &Header, buf: &[u8]) -> Result<Value> {
        match (&self.kind, header.kind) {
            (FieldKind::Int { signed: false, .. }, ElementKind::UnsignedInt(w)) => {
                Ok(Value::Unsigned(codec::read_unsigned(header.payload(buf), w)?))
            }
            (FieldKind::Int { signed: true, .. }, ElementKind::SignedInt(w)) => {
                Ok(Value::Signed(codec::read_signed(header.payload(buf), w)?))
            }
            (FieldKind::Enum { .. }, ElementKind::UnsignedInt(w)) => {
                Ok(Value::Unsigned(codec::read_unsigned(header.payload(buf), w)?))
            }
            (FieldKind::Float { .. }, ElementKind::Float(FloatWidth::Single)) => Ok(
                Value::Float32(codec::read_float(header.payload(buf), FloatWidth::Single)? as f32),
            ),
            (FieldKind::Float { .. }, ElementKind::Float(FloatWidth::Double)) => Ok(
                Value::Float64(codec::read_float(header.payload(buf), FloatWidth::Double)?),
            ),
            (FieldKind::Bool, ElementKind::Bool(b)) => Ok(Value::Bool(b)),
            (FieldKind::Utf8 { max_length }, ElementKind::Utf8String(_)) => {
                let bytes = header.payload(buf);
                if bytes.len() > *max_length {
                    return Err(Error::LengthExceedsMax(self.tag, bytes.len(), *max_length));
                }
                let s = std::str::from_utf8(bytes)
                    .map_err(|_| Error::InvalidUtf8(header.payload_offset))?
                    .to_owned();
                Ok(Value::Utf8(s))
            }
            (FieldKind::Octet { max_length }, ElementKind::OctetString(_)) => {
                let bytes = header.payload(buf);
                if bytes.len() > *max_length {
                    return Err(Error::LengthExceedsMax(self.tag, bytes.len(), *max_length));
                }
                Ok(Value::Octet(bytes.to_vec()))
            }
            // A placeholder field used during schema development: whatever is actually on
            // the wire at this tag, reading it always succeeds as the sentinel value.
            (FieldKind::Any, _) => Ok(Value::Null),
            _ => Err(Error::InternalInvariant(
                "on-wire element kind does not match the field's declared kind",
            )),
        }
    }

    /// Append this field's control octet, tag header, and value payload to `out`. Returns
    /// nothing; callers slice the buffer down after every field has been emitted.
    pub fn encode_value(&self, out: &mut Vec<u8>, value: &Value) -> Result<()> {
        let element_kind = self.element_kind_for(value)?;
        tlv_core::codec::encode_control_and_tag(out, self.tag, element_kind);
        match (&self.kind, value) {
            (FieldKind::Int { signed: true, octets, .. }, Value::Signed(v)) => {
                codec::write_signed(out, IntWidth::from_octets(*octets), *v)
            }
            (FieldKind::Int { signed: false, octets, .. }, Value::Unsigned(v)) => {
                codec::write_unsigned(out, IntWidth::from_octets(*octets), *v)
            }
            (FieldKind::Enum { .. }, Value::Unsigned(v)) => {
                codec::write_unsigned(out, IntWidth::W2, *v)
            }
            (FieldKind::Float { octets }, Value::Float32(v)) => {
                codec::write_float(out, float_width(*octets), *v as f64)
            }
            (FieldKind::Float { octets }, Value::Float64(v)) => {
                codec::write_float(out, float_width(*octets), *v)
            }
            (FieldKind::Bool, Value::Bool(_)) => {}
            (FieldKind::Utf8 { .. }, Value::Utf8(s)) => {
                let width = match element_kind {
                    ElementKind::Utf8String(w) => w,
                    _ => unreachable!(),
                };
                codec::encode_length(out, width, s.len());
                out.extend_from_slice(s.as_bytes());
            }
            (FieldKind::Octet { .. }, Value::Octet(b)) => {
                let width = match element_kind {
                    ElementKind::OctetString(w) => w,
                    _ => unreachable!(),
                };
                codec::encode_length(out, width, b.len());
                out.extend_from_slice(b);
            }
            _ => {
                return Err(Error::InternalInvariant(
                    "value does not match the field's declared kind",
                ))
            }
        }
        Ok(())
    }

    /// Render this field's value as a human-readable fragment (not round-trippable).
    pub fn render(&self, value: &Value) -> String {
        match (&self.kind, value) {
            (FieldKind::Int { signed: true, .. }, Value::Signed(v)) => format!("{}", v),
            (FieldKind::Int { signed: false, .. }, Value::Unsigned(v)) => format!("{}", v),
            (FieldKind::Enum { variants }, Value::Unsigned(v)) => {
                let v16 = *v as u16;
                match variants.iter().find(|(value, _)| *value == v16) {
                    Some((_, name)) => (*name).to_string(),
                    None => format!("<unknown enum value {}>", v16),
                }
            }
            (FieldKind::Float { .. }, Value::Float32(v)) => format!("{}", v),
            (FieldKind::Float { .. }, Value::Float64(v)) => format!("{}", v),
            (FieldKind::Bool, Value::Bool(v)) => format!("{}", v),
            (FieldKind::Utf8 { .. }, Value::Utf8(s)) => format!("{:?}", s),
            (FieldKind::Octet { .. }, Value::Octet(b)) => {
                let hex: Vec<String> = b.iter().map(|byte| format!("{:02x}", byte)).collect();
                format!("hex({})", hex.join(""))
            }
            (_, Value::Null) => "null".to_owned(),
            _ => "<unrenderable>".to_owned(),
        }
    }
}

fn validate_int_octets(octets: usize) -> Result<()> {
    match octets {
        1 | 2 | 4 | 8 => Ok(()),
        other => Err(Error::UnsupportedWidth(other)),
    }
}

fn validate_float_octets(octets: usize) -> Result<()> {
    match octets {
        4 | 8 => Ok(()),
        other => Err(Error::UnsupportedWidth(other)),
    }
}

fn float_width(octets: usize) -> FloatWidth {
    if octets == 8 {
        FloatWidth::Double
    } else {
        FloatWidth::Single
    }
}

fn signed_value(signed: bool, value: &Value) -> Option<i128> {
    match (signed, value) {
        (true, Value::Signed(v)) => Some(*v as i128),
        (false, Value::Unsigned(v)) => Some(*v as i128),
        _ => None,
    }
}

fn representable_range(signed: bool, octets: usize) -> (i128, i128) {
    let bits = (octets * 8) as u32;
    if signed {
        (-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1)
    } else {
        (0, (1i128 << bits) - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_range_rejects_out_of_bounds() {
        let field = Field::new(
            Tag::Context(2),
            FieldKind::Int {
                signed: true,
                octets: 1,
                min: None,
                max: None,
            },
        )
        .unwrap();
        assert!(field.validate(&Value::Signed(127)).is_ok());
        assert_eq!(
            field.validate(&Value::Signed(128)).unwrap_err(),
            Error::IntOutOfRange(Tag::Context(2), 128)
        );
    }

    #[test]
    fn user_supplied_range_is_tighter_than_natural_range() {
        let field = Field::new(
            Tag::Context(2),
            FieldKind::Int {
                signed: false,
                octets: 1,
                min: Some(10),
                max: Some(20),
            },
        )
        .unwrap();
        assert!(field.validate(&Value::Unsigned(15)).is_ok());
        assert!(field.validate(&Value::Unsigned(21)).is_err());
    }

    #[test]
    fn enum_field_rejects_non_member_values() {
        let field = Field::new(
            Tag::Context(3),
            FieldKind::Enum {
                variants: &[(0, "Off"), (1, "On")],
            },
        )
        .unwrap();
        assert!(field.validate(&Value::Unsigned(1)).is_ok());
        assert_eq!(
            field.validate(&Value::Unsigned(2)).unwrap_err(),
            Error::EnumMembershipViolated(Tag::Context(3), 2)
        );
    }

    #[test]
    fn utf8_field_rejects_strings_past_max_length() {
        let field = Field::new(Tag::Context(5), FieldKind::Utf8 { max_length: 3 }).unwrap();
        assert!(field.validate(&Value::Utf8("abc".to_owned())).is_ok());
        assert_eq!(
            field.validate(&Value::Utf8("abcd".to_owned())).unwrap_err(),
            Error::LengthExceedsMax(Tag::Context(5), 4, 3)
        );
    }

    #[test]
    fn any_field_is_nullable_and_never_optional_by_default() {
        let field = Field::new(Tag::Context(9), FieldKind::Any).unwrap();
        assert!(field.nullable);
        assert!(!field.optional);
        assert!(field.validate(&Value::Null).is_ok());
        assert!(field.validate(&Value::Unsigned(1)).is_err());
    }

    #[test]
    fn any_field_rejects_becoming_optional() {
        let field = Field::new(Tag::Context(9), FieldKind::Any).unwrap().optional();
        assert!(!field.optional);
        assert!(field.nullable);
    }

    #[test]
    fn int_field_rejects_an_unsupported_width() {
        let err = Field::new(
            Tag::Context(1),
            FieldKind::Int {
                signed: false,
                octets: 3,
                min: None,
                max: None,
            },
        )
        .unwrap_err();
        assert_eq!(err, Error::UnsupportedWidth(3));
    }

    #[test]
    fn float_field_rejects_an_unsupported_width() {
        let err = Field::new(Tag::Context(1), FieldKind::Float { octets: 2 }).unwrap_err();
        assert_eq!(err, Error::UnsupportedWidth(2));
    }

    #[test]
    fn any_field_decodes_unconditionally() {
        let field = Field::new(Tag::Context(1), FieldKind::Any).unwrap();
        let buf = [0x24, 0x01, 0x2A];
        let header = codec::decode_header(&buf, 0).unwrap();
        assert_eq!(field.decode(&header, &buf).unwrap(), Value::Null);
    }
}
