//! The record layer: a schema-typed, lazily-indexed, write-through-cached view over a TLV
//! buffer (or an empty buffer, in build mode).

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, trace};

use tlv_core::codec::{self, Header};
use tlv_core::error::{Error, Result};
use tlv_core::kind::{ElementKind, END_OF_CONTAINER};
use tlv_core::tag::Tag;
use tlv_core::value::Value;

use crate::field::{Field, FieldKind};
use crate::schema::{Schema, SchemaKind};

#[derive(Debug, Clone)]
enum CachedValue<'a> {
    Scalar(Value),
    Struct(Box<Record<'a>>),
    Array(Vec<Record<'a>>),
}

/// Presence state of a field, distinguishing an absent field from one explicitly written
/// (or decoded) as NULL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Absent,
    Null,
    Present,
}

/// A schema-typed view over a TLV buffer.
///
/// Created either from a backing buffer (decode mode, via [`Record::from_buffer`]) or empty
/// (build mode, via [`Record::new`]). Reads lazily scan the buffer forward from the last
/// scanned position, indexing every tag they pass over; writes populate a write-through
/// cache that shadows the buffer on read. `encode` materializes cache and buffer into a
/// fresh octet image.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    schema: Arc<Schema>,
    buffer: Option<&'a [u8]>,
    tag_value_offset: HashMap<Tag, usize>,
    tag_value_length: HashMap<Tag, usize>,
    null_tags: HashSet<Tag>,
    element_headers: HashMap<Tag, Header>,
    cached_values: HashMap<Tag, CachedValue<'a>>,
    scan_cursor: usize,
}

impl<'a> Record<'a> {
    /// Create an empty record in build mode: every field starts absent until `set`.
    pub fn new(schema: Arc<Schema>) -> Record<'a> {
        Record {
            schema,
            buffer: None,
            tag_value_offset: HashMap::new(),
            tag_value_length: HashMap::new(),
            null_tags: HashSet::new(),
            element_headers: HashMap::new(),
            cached_values: HashMap::new(),
            scan_cursor: 0,
        }
    }

    /// Create a record in decode mode over a backing buffer. No scanning happens until a
    /// field is first requested.
    pub fn from_buffer(schema: Arc<Schema>, buffer: &'a [u8]) -> Record<'a> {
        Record {
            schema,
            buffer: Some(buffer),
            tag_value_offset: HashMap::new(),
            tag_value_length: HashMap::new(),
            null_tags: HashSet::new(),
            element_headers: HashMap::new(),
            cached_values: HashMap::new(),
            scan_cursor: 0,
        }
    }

    /// The schema this record was built or decoded against.
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// The maximum number of bytes this record could occupy once encoded.
    pub fn max_length(&self) -> usize {
        self.schema.max_length()
    }

    /// The on-wire payload length of an already-indexed tag, if any. Does not trigger
    /// indexing; call `get`/`get_struct`/`iter_array` first to guarantee `tag` is indexed.
    pub fn indexed_value_length(&self, tag: Tag) -> Option<usize> {
        self.tag_value_length.get(&tag).copied()
    }

    /// Scan forward from `scan_cursor` until `tag` has been indexed or the buffer is
    /// exhausted. A no-op in build mode (no backing buffer) or once `tag` is already
    /// indexed or cached.
    fn ensure_indexed(&mut self, tag: Tag) -> Result<()> {
        if self.cached_values.contains_key(&tag) || self.tag_value_offset.contains_key(&tag) {
            return Ok(());
        }
        let buf = match self.buffer {
            Some(b) => b,
            None => return Ok(()),
        };
        while self.scan_cursor < buf.len() {
            let header = codec::decode_header(buf, self.scan_cursor)?;
            let next_cursor = header.end_offset();
            if !self.tag_value_offset.contains_key(&header.tag) {
                trace!(tag = ?header.tag, offset = header.control_offset, "indexing tag");
                self.tag_value_offset.insert(header.tag, header.payload_offset);
                self.tag_value_length.insert(header.tag, header.payload_len);
                if header.kind == ElementKind::Null {
                    self.null_tags.insert(header.tag);
                }
                self.element_headers.insert(header.tag, header);
            }
            self.scan_cursor = next_cursor;
            if header.tag == tag {
                break;
            }
        }
        Ok(())
    }

    fn presence(&mut self, tag: Tag) -> Result<Presence> {
        if self.cached_values.contains_key(&tag) {
            return Ok(Presence::Present);
        }
        self.ensure_indexed(tag)?;
        if self.null_tags.contains(&tag) {
            return Ok(Presence::Null);
        }
        if self.tag_value_offset.contains_key(&tag) {
            return Ok(Presence::Present);
        }
        Ok(Presence::Absent)
    }

    /// Read a scalar field's value. Returns `Ok(None)` if the field is absent (optional) or
    /// decodes to NULL on a nullable field. Fails with [`Error::NotNullable`] if the field
    /// is NULL but not declared nullable.
    ///
    /// `field` must be a scalar kind (`Int`, `Enum`, `Float`, `Bool`, `Utf8`, `Octet`, or
    /// `Any`); calling this on a `Struct` or `Array` field is a programming error.
    pub fn get(&mut self, field: &Field) -> Result<Option<Value>> {
        if matches!(field.kind, FieldKind::Struct { .. } | FieldKind::Array { .. }) {
            return Err(Error::InternalInvariant(
                "container field: use get_struct or iter_array",
            ));
        }
        if let Some(CachedValue::Scalar(v)) = self.cached_values.get(&field.tag) {
            return Ok(Some(v.clone()));
        }
        self.ensure_indexed(field.tag)?;
        if self.null_tags.contains(&field.tag) {
            return if field.nullable {
                Ok(None)
            } else {
                Err(Error::NotNullable(field.tag))
            };
        }
        let header = match self.element_headers.get(&field.tag) {
            Some(h) => *h,
            None => return Ok(None),
        };
        let buf = self
            .buffer
            .expect("an indexed tag only exists when a buffer is present");
        let value = field.decode(&header, buf)?;
        self.cached_values
            .insert(field.tag, CachedValue::Scalar(value.clone()));
        Ok(Some(value))
    }

    /// Write a scalar field's value, validating it first. No buffer mutation occurs; the
    /// value is only staged in the write-through cache until `encode`.
    pub fn set(&mut self, field: &Field, value: Value) -> Result<()> {
        if matches!(field.kind, FieldKind::Struct { .. } | FieldKind::Array { .. }) {
            return Err(Error::InternalInvariant(
                "container field: use set_struct or set_array",
            ));
        }
        if matches!(value, Value::Null) {
            return self.set_null(field);
        }
        field.validate(&value)?;
        self.cached_values.insert(field.tag, CachedValue::Scalar(value));
        Ok(())
    }

    /// Explicitly write NULL to a nullable field of any kind.
    pub fn set_null(&mut self, field: &Field) -> Result<()> {
        if !field.nullable {
            return Err(Error::NotNullable(field.tag));
        }
        self.cached_values
            .insert(field.tag, CachedValue::Scalar(Value::Null));
        Ok(())
    }

    /// Read a `Struct` field's value as a sub-record over its payload slice.
    pub fn get_struct(&mut self, field: &Field) -> Result<Option<Record<'a>>> {
        let inner_schema = match &field.kind {
            FieldKind::Struct { schema } => schema.clone(),
            _ => return Err(Error::InternalInvariant("field is not a Struct field")),
        };
        if let Some(CachedValue::Struct(inner)) = self.cached_values.get(&field.tag) {
            return Ok(Some((**inner).clone()));
        }
        self.ensure_indexed(field.tag)?;
        if self.null_tags.contains(&field.tag) {
            return if field.nullable {
                Ok(None)
            } else {
                Err(Error::NotNullable(field.tag))
            };
        }
        let header = match self.element_headers.get(&field.tag) {
            Some(h) => *h,
            None => return Ok(None),
        };
        if header.kind != ElementKind::Structure {
            return Err(Error::InternalInvariant(
                "on-wire element is not a structure",
            ));
        }
        let buf = self
            .buffer
            .expect("an indexed tag only exists when a buffer is present");
        let inner = Record::from_buffer(inner_schema, header.payload(buf));
        self.cached_values
            .insert(field.tag, CachedValue::Struct(Box::new(inner.clone())));
        Ok(Some(inner))
    }

    /// Write a `Struct` field's value from an already-built sub-record. The sub-record's
    /// schema must be the same `Arc` as the field's declared inner schema.
    pub fn set_struct(&mut self, field: &Field, inner: Record<'a>) -> Result<()> {
        match &field.kind {
            FieldKind::Struct { schema } if Arc::ptr_eq(schema, &inner.schema) => {}
            FieldKind::Struct { .. } => {
                return Err(Error::InternalInvariant(
                    "sub-record's schema does not match the field's declared inner schema",
                ))
            }
            _ => return Err(Error::InternalInvariant("field is not a Struct field")),
        }
        self.cached_values
            .insert(field.tag, CachedValue::Struct(Box::new(inner)));
        Ok(())
    }

    /// Iterate an `Array` field's elements lazily, yielding one sub-record per element.
    pub fn iter_array(&mut self, field: &Field) -> Result<ArrayIter<'a>> {
        let inner_schema = match &field.kind {
            FieldKind::Array { inner } => inner.clone(),
            _ => return Err(Error::InternalInvariant("field is not an Array field")),
        };
        if let Some(CachedValue::Array(elements)) = self.cached_values.get(&field.tag) {
            return Ok(ArrayIter::Cached(elements.clone().into_iter()));
        }
        self.ensure_indexed(field.tag)?;
        if self.null_tags.contains(&field.tag) {
            return if field.nullable {
                Ok(ArrayIter::Cached(Vec::new().into_iter()))
            } else {
                Err(Error::NotNullable(field.tag))
            };
        }
        let header = match self.element_headers.get(&field.tag) {
            Some(h) => *h,
            None => return Ok(ArrayIter::Cached(Vec::new().into_iter())),
        };
        if header.kind != ElementKind::Array {
            return Err(Error::InternalInvariant("on-wire element is not an array"));
        }
        let buf = self
            .buffer
            .expect("an indexed tag only exists when a buffer is present");
        Ok(ArrayIter::Buffer {
            inner_schema,
            buf: header.payload(buf),
            cursor: 0,
        })
    }

    /// Write an `Array` field's value from already-built element sub-records. Every
    /// element's schema must be the same `Arc` as the field's declared inner schema.
    pub fn set_array(&mut self, field: &Field, elements: Vec<Record<'a>>) -> Result<()> {
        let inner = match &field.kind {
            FieldKind::Array { inner } => inner.clone(),
            _ => return Err(Error::InternalInvariant("field is not an Array field")),
        };
        for element in &elements {
            if !Arc::ptr_eq(&inner, &element.schema) {
                return Err(Error::InternalInvariant(
                    "array element's schema does not match the field's declared inner schema",
                ));
            }
        }
        self.cached_values
            .insert(field.tag, CachedValue::Array(elements));
        Ok(())
    }

    /// Iterate every element of a list-kind record's payload in wire order, including
    /// repeated tags. Only meaningful when `self.schema().kind == SchemaKind::List`, but
    /// works (trivially, one item per field) on a struct-kind record too.
    pub fn iter_list(&self) -> Result<ListIter<'a>> {
        let buf = self
            .buffer
            .ok_or(Error::InternalInvariant("list record has no backing buffer"))?;
        Ok(ListIter {
            schema: self.schema.clone(),
            buf,
            cursor: 0,
        })
    }

    /// Encode this record's fields, in schema declaration order, into a freshly allocated
    /// buffer sized to `max_length()`.
    pub fn encode(&mut self) -> Result<Vec<u8>> {
        debug!(max_length = self.max_length(), "encoding record");
        let schema = self.schema.clone();
        let mut out = Vec::with_capacity(schema.max_length());
        for field in &schema.fields {
            self.encode_field(field, &mut out)?;
        }
        Ok(out)
    }

    /// Encode this record into `dest[offset..]`, returning the number of bytes written.
    /// Fails with [`Error::InternalInvariant`] if `dest` is too short.
    pub fn encode_into(&mut self, dest: &mut [u8], offset: usize) -> Result<usize> {
        let bytes = self.encode()?;
        if dest.len() < offset + bytes.len() {
            return Err(Error::InternalInvariant(
                "destination buffer too short for encoded record",
            ));
        }
        dest[offset..offset + bytes.len()].copy_from_slice(&bytes);
        Ok(bytes.len())
    }

    fn encode_field(&mut self, field: &Field, out: &mut Vec<u8>) -> Result<()> {
        match &field.kind {
            FieldKind::Struct { .. } => match self.get_struct(field)? {
                Some(mut inner) => {
                    codec::encode_control_and_tag(out, field.tag, ElementKind::Structure);
                    out.extend_from_slice(&inner.encode()?);
                    out.push(END_OF_CONTAINER);
                    Ok(())
                }
                None => self.encode_absent(field, out),
            },
            FieldKind::Array { .. } => match self.presence(field.tag)? {
                Presence::Present => {
                    codec::encode_control_and_tag(out, field.tag, ElementKind::Array);
                    let mut payload = Vec::new();
                    for element in self.iter_array(field)? {
                        let mut element = element?;
                        payload.extend_from_slice(&wrap_array_element(&mut element)?);
                    }
                    if payload.len() > tlv_core::limits::ARRAY_MAX_OCTETS {
                        return Err(Error::LengthExceedsMax(
                            field.tag,
                            payload.len(),
                            tlv_core::limits::ARRAY_MAX_OCTETS,
                        ));
                    }
                    out.extend_from_slice(&payload);
                    out.push(END_OF_CONTAINER);
                    Ok(())
                }
                Presence::Null | Presence::Absent => self.encode_absent(field, out),
            },
            _ => match self.get(field)? {
                Some(value) => field.encode_value(out, &value),
                None => self.encode_absent(field, out),
            },
        }
    }

    fn encode_absent(&self, field: &Field, out: &mut Vec<u8>) -> Result<()> {
        if field.optional {
            return Ok(());
        }
        if field.nullable {
            codec::encode_control_and_tag(out, field.tag, ElementKind::Null);
            return Ok(());
        }
        Err(Error::MissingRequired(field.tag))
    }

    /// Render this record as a human-readable, indented tree. Not round-trippable;
    /// intended for diagnostics.
    pub fn render(&mut self) -> Result<String> {
        crate::render::render_record(self, 0)
    }
}

fn wrap_array_element(element: &mut Record<'_>) -> Result<Vec<u8>> {
    let opener = match element.schema.kind {
        SchemaKind::List => ElementKind::List,
        SchemaKind::Struct => ElementKind::Structure,
    };
    let mut out = Vec::new();
    codec::encode_control_and_tag(&mut out, Tag::Anonymous, opener);
    out.extend_from_slice(&element.encode()?);
    out.push(END_OF_CONTAINER);
    Ok(out)
}

/// Lazy iterator over an `Array` field's elements.
#[derive(Debug)]
pub enum ArrayIter<'a> {
    /// Elements already materialized in the write-through cache (build mode, or a
    /// previously-read array re-read from cache).
    Cached(std::vec::IntoIter<Record<'a>>),
    /// Elements not yet materialized; decoded lazily from a buffer slice as the iterator
    /// advances.
    Buffer {
        inner_schema: Arc<Schema>,
        buf: &'a [u8],
        cursor: usize,
    },
}

impl<'a> Iterator for ArrayIter<'a> {
    type Item = Result<Record<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            ArrayIter::Cached(it) => it.next().map(Ok),
            ArrayIter::Buffer {
                inner_schema,
                buf,
                cursor,
            } => {
                if *cursor >= buf.len() {
                    return None;
                }
                match codec::decode_header(buf, *cursor) {
                    Ok(header) => {
                        if header.kind == ElementKind::EndOfContainer {
                            *cursor = buf.len();
                            return None;
                        }
                        *cursor = header.end_offset();
                        Some(Ok(Record::from_buffer(inner_schema.clone(), header.payload(buf))))
                    }
                    Err(e) => {
                        *cursor = buf.len();
                        Some(Err(e))
                    }
                }
            }
        }
    }
}

/// One element of a list-kind record, as produced by [`Record::iter_list`].
#[derive(Debug)]
pub enum ListValue<'a> {
    /// A scalar field's value.
    Scalar(Tag, Value),
    /// A field explicitly present as NULL.
    Null(Tag),
    /// A `Struct`-kind field's value.
    Struct(Tag, Record<'a>),
    /// An `Array`-kind field's value.
    Array(Tag, ArrayIter<'a>),
}

/// Lazy iterator yielding one [`ListValue`] per element of a list-kind record's payload, in
/// wire order, including repeated tags.
#[derive(Debug)]
pub struct ListIter<'a> {
    schema: Arc<Schema>,
    buf: &'a [u8],
    cursor: usize,
}

impl<'a> Iterator for ListIter<'a> {
    type Item = Result<ListValue<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.buf.len() {
            return None;
        }
        let header = match codec::decode_header(self.buf, self.cursor) {
            Ok(h) => h,
            Err(e) => {
                self.cursor = self.buf.len();
                return Some(Err(e));
            }
        };
        if header.kind == ElementKind::EndOfContainer {
            self.cursor = self.buf.len();
            return None;
        }
        self.cursor = header.end_offset();
        Some(resolve_list_element(&self.schema, self.buf, &header))
    }
}

fn resolve_list_element<'a>(
    schema: &Arc<Schema>,
    buf: &'a [u8],
    header: &Header,
) -> Result<ListValue<'a>> {
    let field = schema
        .field(header.tag)
        .ok_or(Error::InternalInvariant("tag is not declared in this list's schema"))?;
    if header.kind == ElementKind::Null {
        return if field.nullable {
            Ok(ListValue::Null(header.tag))
        } else {
            Err(Error::NotNullable(header.tag))
        };
    }
    match &field.kind {
        FieldKind::Struct { schema: inner } => {
            if header.kind != ElementKind::Structure {
                return Err(Error::InternalInvariant("on-wire element is not a structure"));
            }
            Ok(ListValue::Struct(
                header.tag,
                Record::from_buffer(inner.clone(), header.payload(buf)),
            ))
        }
        FieldKind::Array { inner } => {
            if header.kind != ElementKind::Array {
                return Err(Error::InternalInvariant("on-wire element is not an array"));
            }
            Ok(ListValue::Array(
                header.tag,
                ArrayIter::Buffer {
                    inner_schema: inner.clone(),
                    buf: header.payload(buf),
                    cursor: 0,
                },
            ))
        }
        _ => Ok(ListValue::Scalar(header.tag, field.decode(header, buf)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;

    fn u1(tag: u8) -> Field {
        Field::new(
            Tag::Context(tag),
            FieldKind::Int {
                signed: false,
                octets: 1,
                min: None,
                max: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn s1_round_trip() {
        let schema = Arc::new(Schema::struct_of(vec![u1(1)]));
        let mut record = Record::new(schema.clone());
        record.set(&u1(1), Value::Unsigned(42)).unwrap();
        let bytes = record.encode().unwrap();
        assert_eq!(bytes, vec![0x24, 0x01, 0x2A]);

        let mut decoded = Record::from_buffer(schema, &bytes);
        assert_eq!(decoded.get(&u1(1)).unwrap(), Some(Value::Unsigned(42)));
    }

    #[test]
    fn idempotent_encode() {
        let schema = Arc::new(Schema::struct_of(vec![u1(1)]));
        let mut record = Record::new(schema);
        record.set(&u1(1), Value::Unsigned(7)).unwrap();
        let a = record.encode().unwrap();
        let b = record.encode().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_required_field_fails_at_encode() {
        let schema = Arc::new(Schema::struct_of(vec![u1(1)]));
        let mut record = Record::new(schema);
        assert_eq!(
            record.encode().unwrap_err(),
            Error::MissingRequired(Tag::Context(1))
        );
    }

    #[test]
    fn optional_absent_field_is_elided() {
        let field = Field::new(
            Tag::Context(1),
            FieldKind::Int {
                signed: false,
                octets: 1,
                min: None,
                max: None,
            },
        )
        .unwrap()
        .optional();
        let schema = Arc::new(Schema::struct_of(vec![field]));
        let mut record = Record::new(schema);
        assert_eq!(record.encode().unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn nullable_absent_field_is_emitted_as_null() {
        let field = Field::new(
            Tag::Context(7),
            FieldKind::Int {
                signed: false,
                octets: 1,
                min: None,
                max: None,
            },
        )
        .unwrap()
        .nullable();
        let schema = Arc::new(Schema::struct_of(vec![field]));
        let mut record = Record::new(schema);
        assert_eq!(record.encode().unwrap(), vec![0x34, 0x07]);
    }

    #[test]
    fn s5_nested_structure_round_trip() {
        let inner_field = u1(0);
        let inner_schema = Arc::new(Schema::struct_of(vec![inner_field.clone()]));
        let outer_field = Field::new(
            Tag::Context(9),
            FieldKind::Struct {
                schema: inner_schema.clone(),
            },
        )
        .unwrap();
        let outer_schema = Arc::new(Schema::struct_of(vec![outer_field.clone()]));

        let mut inner = Record::new(inner_schema.clone());
        inner.set(&inner_field, Value::Unsigned(1)).unwrap();
        let mut outer = Record::new(outer_schema.clone());
        outer.set_struct(&outer_field, inner).unwrap();
        let bytes = outer.encode().unwrap();
        assert_eq!(bytes, vec![0x35, 0x09, 0x24, 0x00, 0x01, 0x18]);

        let mut decoded = Record::from_buffer(outer_schema, &bytes);
        let mut inner_decoded = decoded.get_struct(&outer_field).unwrap().unwrap();
        assert_eq!(
            inner_decoded.get(&inner_field).unwrap(),
            Some(Value::Unsigned(1))
        );
    }

    #[test]
    fn lazy_indexing_stops_once_target_tag_is_found() {
        let schema = Arc::new(Schema::struct_of(vec![u1(1), u1(2), u1(3)]));
        let mut record = Record::new(schema.clone());
        record.set(&u1(1), Value::Unsigned(10)).unwrap();
        record.set(&u1(2), Value::Unsigned(20)).unwrap();
        record.set(&u1(3), Value::Unsigned(30)).unwrap();
        let bytes = record.encode().unwrap();

        let mut decoded = Record::from_buffer(schema, &bytes);
        assert_eq!(decoded.get(&u1(2)).unwrap(), Some(Value::Unsigned(20)));
        assert!(decoded.tag_value_offset.contains_key(&Tag::Context(1)));
        assert!(decoded.tag_value_offset.contains_key(&Tag::Context(2)));
        assert!(!decoded.tag_value_offset.contains_key(&Tag::Context(3)));
    }

    #[test]
    fn read_order_independence() {
        let schema = Arc::new(Schema::struct_of(vec![u1(1), u1(2), u1(3)]));
        let mut record = Record::new(schema.clone());
        record.set(&u1(1), Value::Unsigned(10)).unwrap();
        record.set(&u1(2), Value::Unsigned(20)).unwrap();
        record.set(&u1(3), Value::Unsigned(30)).unwrap();
        let bytes = record.encode().unwrap();

        let mut forward = Record::from_buffer(schema.clone(), &bytes);
        let fwd = (
            forward.get(&u1(1)).unwrap(),
            forward.get(&u1(2)).unwrap(),
            forward.get(&u1(3)).unwrap(),
        );

        let mut backward = Record::from_buffer(schema, &bytes);
        let back = (
            backward.get(&u1(3)).unwrap(),
            backward.get(&u1(2)).unwrap(),
            backward.get(&u1(1)).unwrap(),
        );
        assert_eq!(fwd, (back.2, back.1, back.0));
    }

    #[test]
    fn array_of_structs_round_trip_yields_one_element_per_entry() {
        let item_field = u1(0);
        let item_schema = Arc::new(Schema::struct_of(vec![item_field.clone()]));
        let array_field = Field::new(
            Tag::Context(4),
            FieldKind::Array {
                inner: item_schema.clone(),
            },
        )
        .unwrap();
        let schema = Arc::new(Schema::struct_of(vec![array_field.clone()]));

        let mut record = Record::new(schema.clone());
        let mut elements = Vec::new();
        for v in [1u64, 2, 3] {
            let mut el = Record::new(item_schema.clone());
            el.set(&item_field, Value::Unsigned(v)).unwrap();
            elements.push(el);
        }
        record.set_array(&array_field, elements).unwrap();
        let bytes = record.encode().unwrap();

        let mut decoded = Record::from_buffer(schema, &bytes);
        let values: Vec<u64> = decoded
            .iter_array(&array_field)
            .unwrap()
            .map(|item| {
                let mut item = item.unwrap();
                item.get(&item_field).unwrap().unwrap().as_unsigned().unwrap()
            })
            .collect();
        assert_eq!(values, vec![1, 2, 3]);
    }
}
