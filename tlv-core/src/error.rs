//! This module aggregates the closed set of errors that may emerge from the codec.
//!
//! A single enum is shared by every layer (element, schema, record) rather than each crate
//! defining its own, since the set of failure modes is closed by the TLV wire format and the
//! schema language built on top of it.

use crate::tag::Tag;
use quick_error::quick_error;
use std::result;

quick_error! {
    /// The main data type for errors in the codec.
    #[derive(Debug, PartialEq, Eq, Clone)]
    pub enum Error {
        /// A tag-control value naming a common-profile or implicit-profile tag was
        /// encountered. These forms are recognized by the grammar but not implemented.
        UnsupportedTag(control: u8) {
            description("unsupported tag-control value")
            display("unsupported tag-control value {:#05b}", control)
        }
        /// The buffer ended before a complete element (header or payload) could be read.
        TruncatedBuffer(offset: usize) {
            description("buffer truncated while reading an element")
            display("buffer truncated at offset {}", offset)
        }
        /// A container was opened but no matching end-of-container byte was found.
        TruncatedContainer(offset: usize) {
            description("container opened without a matching end-of-container")
            display("unterminated container opened at offset {}", offset)
        }
        /// A UTF-8 string element's payload was not valid UTF-8.
        InvalidUtf8(offset: usize) {
            description("payload is not valid UTF-8")
            display("invalid UTF-8 in string element at offset {}", offset)
        }
        /// A string element's length exceeds the field's declared `max_length`.
        LengthExceedsMax(tag: Tag, length: usize, max: usize) {
            description("string length exceeds field max_length")
            display("field {:?}: length {} exceeds max_length {}", tag, length, max)
        }
        /// An integer value does not fit in the field's declared (signed, octets) range.
        IntOutOfRange(tag: Tag, value: i128) {
            description("integer value out of the declared representable range")
            display("field {:?}: value {} out of representable range", tag, value)
        }
        /// An integer value fits its declared width but violates a user-supplied [min, max].
        RangeConstraintViolated(tag: Tag, value: i128, min: i128, max: i128) {
            description("integer value violates a user-supplied range constraint")
            display("field {:?}: value {} outside [{}, {}]", tag, value, min, max)
        }
        /// A null was written to, or read for, a field declared non-nullable.
        NotNullable(tag: Tag) {
            description("field is not nullable")
            display("field {:?} is not nullable", tag)
        }
        /// A non-optional, non-nullable field had no value at encode time.
        MissingRequired(tag: Tag) {
            description("required field missing at encode time")
            display("required field {:?} was never written", tag)
        }
        /// An integer written to an enum field is not one of the enumeration's variants.
        EnumMembershipViolated(tag: Tag, value: u16) {
            description("value is not a member of the declared enumeration")
            display("field {:?}: value {} is not a valid enum member", tag, value)
        }
        /// A field was declared with an integer or float width the wire format does not
        /// support (legal widths are 1, 2, 4, or 8 octets for integers; 4 or 8 for floats).
        UnsupportedWidth(octets: usize) {
            description("declared field width is not a supported wire width")
            display("unsupported field width: {} octets", octets)
        }
        /// An invariant internal to the codec was violated; this indicates a codec bug
        /// rather than a malformed buffer or an invalid write.
        InternalInvariant(message: &'static str) {
            description("internal codec invariant violated")
            display("internal invariant violated: {}", message)
        }
    }
}

/// Type alias for a result from this codec.
pub type Result<T> = result::Result<T, Error>;
