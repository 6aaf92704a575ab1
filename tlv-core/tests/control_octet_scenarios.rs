//! Exercises the element layer's public API as an external consumer would, covering the
//! concrete wire scenarios named in the codec's specification.

use tlv_core::codec::decode_header;
use tlv_core::kind::{ElementKind, FloatWidth, IntWidth, LengthWidth};
use tlv_core::tag::Tag;

#[test]
fn s2_bool_true_context_tag_3() {
    let buf = [0x29, 0x03];
    let header = decode_header(&buf, 0).unwrap();
    assert_eq!(header.tag, Tag::Context(3));
    assert_eq!(header.kind, ElementKind::Bool(true));
    assert_eq!(header.payload_len, 0);
    assert_eq!(header.total_len(), 2);
}

#[test]
fn s3_utf8_string_hi_context_tag_5() {
    let buf = [0x2C, 0x05, 0x02, b'h', b'i'];
    let header = decode_header(&buf, 0).unwrap();
    assert_eq!(header.tag, Tag::Context(5));
    assert_eq!(header.kind, ElementKind::Utf8String(LengthWidth::W1));
    assert_eq!(header.payload(&buf), b"hi");
}

#[test]
fn s4_null_context_tag_7() {
    let buf = [0x34, 0x07];
    let header = decode_header(&buf, 0).unwrap();
    assert_eq!(header.tag, Tag::Context(7));
    assert_eq!(header.kind, ElementKind::Null);
    assert_eq!(header.total_len(), 2);
}

#[test]
fn s6_signed_2_octet_minus_one_context_tag_2() {
    let buf = [0x21, 0x02, 0xFF, 0xFF];
    let header = decode_header(&buf, 0).unwrap();
    assert_eq!(header.tag, Tag::Context(2));
    assert_eq!(header.kind, ElementKind::SignedInt(IntWidth::W2));
    let value = tlv_core::codec::read_signed(header.payload(&buf), IntWidth::W2).unwrap();
    assert_eq!(value, -1);
}

#[test]
fn float_roundtrips_through_primitive_helpers() {
    let mut buf = Vec::new();
    tlv_core::codec::write_float(&mut buf, FloatWidth::Double, 3.5);
    let value = tlv_core::codec::read_float(&buf, FloatWidth::Double).unwrap();
    assert_eq!(value, 3.5);
}
