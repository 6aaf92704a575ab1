#![deny(trivial_casts, trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    unused_import_braces
)]

//! Element-layer primitives for the Matter TLV binary codec.
//!
//! This crate parses and emits individual TLV elements: a control octet, an optional tag,
//! an optional length, and a value payload. It has no notion of a record schema; it is the
//! lowest layer that the `tlv` crate builds a typed, cached `Record` on top of.

pub mod codec;
pub mod error;
pub mod kind;
pub mod limits;
pub mod tag;
pub mod value;

pub use error::{Error, Result};
pub use kind::ElementKind;
pub use tag::{Tag, TagNumber};
pub use value::Value;
