//! Integration tests exercising the public `tlv` API against the concrete scenarios from
//! the wire-format specification.

use std::sync::Arc;

use tlv::{Field, FieldKind, Record, Schema, Tag, Value};

fn unsigned_field(tag: u8, octets: usize) -> Field {
    Field::new(
        Tag::Context(tag),
        FieldKind::Int {
            signed: false,
            octets,
            min: None,
            max: None,
        },
    )
    .unwrap()
}

fn signed_field(tag: u8, octets: usize) -> Field {
    Field::new(
        Tag::Context(tag),
        FieldKind::Int {
            signed: true,
            octets,
            min: None,
            max: None,
        },
    )
    .unwrap()
}

#[test]
fn s1_unsigned_one_octet() {
    let field = unsigned_field(1, 1);
    let schema = Arc::new(Schema::struct_of(vec![field.clone()]));
    let mut record = Record::new(schema.clone());
    record.set(&field, Value::Unsigned(42)).unwrap();
    assert_eq!(record.encode().unwrap(), vec![0x24, 0x01, 0x2A]);

    let mut decoded = Record::from_buffer(schema, &[0x24, 0x01, 0x2A]);
    assert_eq!(decoded.get(&field).unwrap(), Some(Value::Unsigned(42)));
}

#[test]
fn s2_bool_true() {
    let field = Field::new(Tag::Context(3), FieldKind::Bool).unwrap();
    let schema = Arc::new(Schema::struct_of(vec![field.clone()]));
    let mut record = Record::new(schema.clone());
    record.set(&field, Value::Bool(true)).unwrap();
    assert_eq!(record.encode().unwrap(), vec![0x29, 0x03]);

    let mut decoded = Record::from_buffer(schema, &[0x29, 0x03]);
    assert_eq!(decoded.get(&field).unwrap(), Some(Value::Bool(true)));
}

#[test]
fn s3_utf8_string() {
    let field = Field::new(Tag::Context(5), FieldKind::Utf8 { max_length: 255 }).unwrap();
    let schema = Arc::new(Schema::struct_of(vec![field.clone()]));
    let mut record = Record::new(schema.clone());
    record.set(&field, Value::Utf8("hi".to_owned())).unwrap();
    assert_eq!(record.encode().unwrap(), vec![0x2C, 0x05, 0x02, 0x68, 0x69]);

    let mut decoded = Record::from_buffer(schema, &[0x2C, 0x05, 0x02, 0x68, 0x69]);
    assert_eq!(
        decoded.get(&field).unwrap(),
        Some(Value::Utf8("hi".to_owned()))
    );
}

#[test]
fn s4_null() {
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
    let schema = Arc::new(Schema::struct_of(vec![field.clone()]));
    let mut record = Record::new(schema.clone());
    record.set_null(&field).unwrap();
    assert_eq!(record.encode().unwrap(), vec![0x34, 0x07]);

    let mut decoded = Record::from_buffer(schema, &[0x34, 0x07]);
    assert_eq!(decoded.get(&field).unwrap(), None);
}

#[test]
fn s5_nested_structure() {
    let inner_field = unsigned_field(0, 1);
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
    assert_eq!(
        outer.encode().unwrap(),
        vec![0x35, 0x09, 0x24, 0x00, 0x01, 0x18]
    );

    let mut decoded = Record::from_buffer(outer_schema, &[0x35, 0x09, 0x24, 0x00, 0x01, 0x18]);
    let mut inner_decoded = decoded.get_struct(&outer_field).unwrap().unwrap();
    assert_eq!(
        inner_decoded.get(&inner_field).unwrap(),
        Some(Value::Unsigned(1))
    );
}

#[test]
fn s6_signed_two_octet() {
    let field = signed_field(2, 2);
    let schema = Arc::new(Schema::struct_of(vec![field.clone()]));
    let mut record = Record::new(schema.clone());
    record.set(&field, Value::Signed(-1)).unwrap();
    assert_eq!(record.encode().unwrap(), vec![0x21, 0x02, 0xFF, 0xFF]);

    let mut decoded = Record::from_buffer(schema, &[0x21, 0x02, 0xFF, 0xFF]);
    assert_eq!(decoded.get(&field).unwrap(), Some(Value::Signed(-1)));
}

#[test]
fn validation_failure_leaves_the_cache_unchanged() {
    let field = unsigned_field(1, 1);
    let schema = Arc::new(Schema::struct_of(vec![field.clone()]));
    let mut record = Record::new(schema);
    record.set(&field, Value::Unsigned(10)).unwrap();
    assert!(record.set(&field, Value::Unsigned(9999)).is_err());
    assert_eq!(record.get(&field).unwrap(), Some(Value::Unsigned(10)));
}

#[test]
fn render_produces_a_readable_tree() {
    let field = unsigned_field(1, 1);
    let schema = Arc::new(Schema::struct_of(vec![field.clone()]));
    let mut record = Record::new(schema);
    record.set(&field, Value::Unsigned(42)).unwrap();
    let rendered = record.render().unwrap();
    assert!(rendered.contains("42"));
}

#[test]
fn list_iteration_sees_every_element_in_wire_order_including_repeats() {
    let a = unsigned_field(1, 1);
    let b = unsigned_field(2, 1);
    let schema = Arc::new(Schema::list_of(vec![a.clone(), b.clone()]));

    // Hand-assemble the wire image directly: a context(1)=10, then context(2)=20, then a
    // second context(1)=11, mirroring a list's permission for a tag to repeat.
    let bytes: Vec<u8> = vec![0x24, 0x01, 10, 0x24, 0x02, 20, 0x24, 0x01, 11];
    let list = Record::from_buffer(schema, &bytes);

    let tags_in_order: Vec<Tag> = list
        .iter_list()
        .unwrap()
        .map(|item| match item.unwrap() {
            tlv::ListValue::Scalar(tag, _) => tag,
            _ => panic!("expected scalar list values"),
        })
        .collect();
    assert_eq!(
        tags_in_order,
        vec![Tag::Context(1), Tag::Context(2), Tag::Context(1)]
    );
}
