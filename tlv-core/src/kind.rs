//! The element kind: the low 5 bits of every control octet, naming the wire
//! representation of the value that follows.

use crate::error::Error;

/// Width, in octets, of an integer or float payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    /// 1 octet.
    W1,
    /// 2 octets.
    W2,
    /// 4 octets.
    W4,
    /// 8 octets.
    W8,
}

impl IntWidth {
    /// The width in octets.
    pub fn octets(self) -> usize {
        match self {
            IntWidth::W1 => 1,
            IntWidth::W2 => 2,
            IntWidth::W4 => 4,
            IntWidth::W8 => 8,
        }
    }

    /// The `log2(octets)` value packed into the low 2 bits of an integer element kind.
    pub fn log2(self) -> u8 {
        match self {
            IntWidth::W1 => 0,
            IntWidth::W2 => 1,
            IntWidth::W4 => 2,
            IntWidth::W8 => 3,
        }
    }

    /// Recover a width from its packed `log2(octets)` value (0..=3).
    pub fn from_log2(bits: u8) -> IntWidth {
        match bits & 0b11 {
            0 => IntWidth::W1,
            1 => IntWidth::W2,
            2 => IntWidth::W4,
            _ => IntWidth::W8,
        }
    }

    /// The width covering a declared `octets` count (1, 2, 4, or 8); panics on any other
    /// value, as field descriptors validate `octets` at construction time.
    pub fn from_octets(octets: usize) -> IntWidth {
        match octets {
            1 => IntWidth::W1,
            2 => IntWidth::W2,
            4 => IntWidth::W4,
            8 => IntWidth::W8,
            other => panic!("unsupported integer width: {} octets", other),
        }
    }
}

/// Width, in octets, of a float payload: 4 (single) or 8 (double).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatWidth {
    /// Single precision, 4 octets.
    Single,
    /// Double precision, 8 octets.
    Double,
}

impl FloatWidth {
    /// The width in octets.
    pub fn octets(self) -> usize {
        match self {
            FloatWidth::Single => 4,
            FloatWidth::Double => 8,
        }
    }

    fn log2(self) -> u8 {
        match self {
            FloatWidth::Single => 0,
            FloatWidth::Double => 1,
        }
    }

    fn from_log2(bit: u8) -> FloatWidth {
        if bit & 1 == 0 {
            FloatWidth::Single
        } else {
            FloatWidth::Double
        }
    }
}

/// Width, in octets, of the length prefix of a string element: `1 << log2(octets)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthWidth {
    /// 1-octet length prefix (max_length up to 255).
    W1,
    /// 2-octet length prefix (max_length up to 65535).
    W2,
    /// 4-octet length prefix.
    W4,
    /// 8-octet length prefix.
    W8,
}

impl LengthWidth {
    /// The width in octets.
    pub fn octets(self) -> usize {
        match self {
            LengthWidth::W1 => 1,
            LengthWidth::W2 => 2,
            LengthWidth::W4 => 4,
            LengthWidth::W8 => 8,
        }
    }

    fn log2(self) -> u8 {
        match self {
            LengthWidth::W1 => 0,
            LengthWidth::W2 => 1,
            LengthWidth::W4 => 2,
            LengthWidth::W8 => 3,
        }
    }

    fn from_log2(bits: u8) -> LengthWidth {
        match bits & 0b11 {
            0 => LengthWidth::W1,
            1 => LengthWidth::W2,
            2 => LengthWidth::W4,
            _ => LengthWidth::W8,
        }
    }

    /// The smallest length-width able to represent byte counts up to `max_length`,
    /// i.e. `⌊log_256(max_length)⌋` rounded up to a power-of-two width.
    pub fn smallest_for(max_length: usize) -> LengthWidth {
        if max_length <= 0xFF {
            LengthWidth::W1
        } else if max_length <= 0xFFFF {
            LengthWidth::W2
        } else if max_length <= 0xFFFF_FFFF {
            LengthWidth::W4
        } else {
            LengthWidth::W8
        }
    }
}

/// The element kind: the closed set of wire representations a TLV value may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A two's-complement signed integer.
    SignedInt(IntWidth),
    /// An unsigned integer.
    UnsignedInt(IntWidth),
    /// A boolean; the value is carried in the kind byte itself.
    Bool(bool),
    /// An IEEE-754 float.
    Float(FloatWidth),
    /// A UTF-8 string with the given length-prefix width.
    Utf8String(LengthWidth),
    /// A raw byte string with the given length-prefix width.
    OctetString(LengthWidth),
    /// The null value; zero-width payload.
    Null,
    /// An ordered, fixed-field container: the struct TLV opener.
    Structure,
    /// A homogeneous sequence container: the array TLV opener.
    Array,
    /// A heterogeneous, tag-addressed sequence container: the list TLV opener.
    List,
    /// Terminates the innermost open container.
    EndOfContainer,
}

/// The wire byte for end-of-container, 0x18.
pub const END_OF_CONTAINER: u8 = 0x18;

impl ElementKind {
    /// Whether this kind opens a nested container (struct, array, or list).
    pub fn is_container_opener(self) -> bool {
        matches!(
            self,
            ElementKind::Structure | ElementKind::Array | ElementKind::List
        )
    }

    /// Pack this element kind into the low 5 bits of a control octet.
    pub fn to_bits(self) -> u8 {
        match self {
            ElementKind::SignedInt(w) => w.log2(),
            ElementKind::UnsignedInt(w) => 0x04 | w.log2(),
            ElementKind::Bool(v) => 0x08 | (v as u8),
            ElementKind::Float(w) => 0x0A | w.log2(),
            ElementKind::Utf8String(w) => 0x0C | w.log2(),
            ElementKind::OctetString(w) => 0x10 | w.log2(),
            ElementKind::Null => 0x14,
            ElementKind::Structure => 0x15,
            ElementKind::Array => 0x16,
            ElementKind::List => 0x17,
            ElementKind::EndOfContainer => 0x18,
        }
    }

    /// Unpack a 5-bit element-kind field. Bit patterns not defined by the TLV grammar
    /// (0x19..=0x1F) are rejected as an internal invariant violation: this codec's callers
    /// are expected to only ever encounter well-formed Matter TLV on the wire.
    pub fn from_bits(bits: u8) -> Result<ElementKind, Error> {
        let bits = bits & 0b0001_1111;
        Ok(match bits {
            0x00..=0x03 => ElementKind::SignedInt(IntWidth::from_log2(bits)),
            0x04..=0x07 => ElementKind::UnsignedInt(IntWidth::from_log2(bits)),
            0x08 => ElementKind::Bool(false),
            0x09 => ElementKind::Bool(true),
            0x0A | 0x0B => ElementKind::Float(FloatWidth::from_log2(bits & 1)),
            0x0C..=0x0F => ElementKind::Utf8String(LengthWidth::from_log2(bits)),
            0x10..=0x13 => ElementKind::OctetString(LengthWidth::from_log2(bits)),
            0x14 => ElementKind::Null,
            0x15 => ElementKind::Structure,
            0x16 => ElementKind::Array,
            0x17 => ElementKind::List,
            0x18 => ElementKind::EndOfContainer,
            _ => return Err(Error::InternalInvariant("reserved element kind bits")),
        })
    }
}

/// Split a control octet into its 3-bit tag-control value and 5-bit element-kind bits.
pub fn split_control(control: u8) -> (u8, u8) {
    (control >> 5, control & 0b0001_1111)
}

/// Combine a 3-bit tag-control value and a packed element kind into a control octet.
pub fn pack_control(tag_control: u8, kind: ElementKind) -> u8 {
    (tag_control << 5) | kind.to_bits()
}
