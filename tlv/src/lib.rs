#![deny(trivial_casts, trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    unused_import_braces
)]

//! Schema and record layers for the Matter TLV binary codec.
//!
//! A [`Schema`] declares a record type as an ordered list of [`Field`] descriptors, each
//! binding a tag to an element-kind family with optionality and nullability. A [`Record`]
//! couples a schema with either a backing buffer (decode mode) or nothing (build mode),
//! lazily indexing tags as they're requested and caching typed values behind a
//! write-through cache, mirroring the stateful decoder/encoder split in `dicom-parser` this
//! crate is built from.

pub mod field;
pub mod record;
pub mod render;
pub mod schema;

pub use field::{Field, FieldKind};
pub use record::{ArrayIter, ListIter, ListValue, Record};
pub use schema::{Schema, SchemaKind};

pub use tlv_core::{Error, Result, Tag, TagNumber, Value};
