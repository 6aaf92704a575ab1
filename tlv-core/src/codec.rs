//! Little-endian primitive encode/decode, control-octet framing, and structural
//! container-end scanning.
//!
//! Matter TLV is little-endian throughout; this module still routes every multi-byte
//! read and write through `byteordered` rather than hand-rolled `to_le_bytes` calls for
//! the scalar payloads, the same primitive-codec crate the teacher's own basic encoder and
//! decoder use.

use byteordered::ByteOrdered;
use tracing::trace;

use crate::error::{Error, Result};
use crate::kind::{pack_control, split_control, ElementKind, FloatWidth, IntWidth, LengthWidth};
use crate::tag::Tag;

/// A decoded element header: everything about an element except the bytes of its payload
/// (callers slice those out of the original buffer using `payload_offset`/`payload_len`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Header {
    /// Offset of the control octet.
    pub control_offset: usize,
    /// The control octet itself; `Bool` and `Null` carry their value here rather than in
    /// a payload.
    pub control: u8,
    /// The element's tag.
    pub tag: Tag,
    /// The element's kind.
    pub kind: ElementKind,
    /// Offset of the first payload byte (after control octet, tag header, and any length
    /// prefix).
    pub payload_offset: usize,
    /// Length of the payload in bytes. For containers, this excludes the trailing
    /// end-of-container byte.
    pub payload_len: usize,
}

impl Header {
    /// The payload slice this header describes.
    pub fn payload<'a>(&self, buf: &'a [u8]) -> &'a [u8] {
        &buf[self.payload_offset..self.payload_offset + self.payload_len]
    }

    /// Total bytes this element occupies on the wire, from its control octet through its
    /// payload and, for containers, the trailing end-of-container byte.
    pub fn total_len(&self) -> usize {
        let trailer = if self.kind.is_container_opener() { 1 } else { 0 };
        (self.payload_offset - self.control_offset) + self.payload_len + trailer
    }

    /// Offset one past the end of this element (see [`Header::total_len`]).
    pub fn end_offset(&self) -> usize {
        self.control_offset + self.total_len()
    }
}

/// Decode the element header at `offset`. For container kinds this recursively resolves
/// the full nested extent (by parsing headers all the way down rather than scanning for a
/// raw `0x18` byte), so the returned `payload_len` is exact even when a nested octet string
/// payload happens to contain a byte equal to the end-of-container marker.
pub fn decode_header(buf: &[u8], offset: usize) -> Result<Header> {
    if offset >= buf.len() {
        return Err(Error::TruncatedBuffer(offset));
    }
    let control = buf[offset];
    let (tag_control, kind_bits) = split_control(control);
    let kind = ElementKind::from_bits(kind_bits)?;
    let (tag, tag_width) = Tag::decode(tag_control, buf, offset + 1)?;
    let tag_end = offset + 1 + tag_width;

    let (payload_offset, payload_len) = match kind {
        ElementKind::SignedInt(w) | ElementKind::UnsignedInt(w) => {
            let len = w.octets();
            require_len(buf, tag_end, len)?;
            (tag_end, len)
        }
        ElementKind::Float(w) => {
            let len = w.octets();
            require_len(buf, tag_end, len)?;
            (tag_end, len)
        }
        ElementKind::Bool(_) | ElementKind::Null | ElementKind::EndOfContainer => (tag_end, 0),
        ElementKind::Utf8String(lw) | ElementKind::OctetString(lw) => {
            let lw_len = lw.octets();
            require_len(buf, tag_end, lw_len)?;
            let length = read_length(&buf[tag_end..tag_end + lw_len], lw)?;
            let value_offset = tag_end + lw_len;
            require_len(buf, value_offset, length)?;
            (value_offset, length)
        }
        ElementKind::Structure | ElementKind::Array | ElementKind::List => {
            let len = find_container_end(buf, tag_end)?;
            (tag_end, len)
        }
    };

    trace!(
        offset,
        ?tag,
        ?kind,
        payload_offset,
        payload_len,
        "decoded element header"
    );

    Ok(Header {
        control_offset: offset,
        control,
        tag,
        kind,
        payload_offset,
        payload_len,
    })
}

fn require_len(buf: &[u8], offset: usize, len: usize) -> Result<()> {
    if buf.len() < offset + len {
        Err(Error::TruncatedBuffer(offset))
    } else {
        Ok(())
    }
}

fn read_length(bytes: &[u8], width: LengthWidth) -> Result<usize> {
    let mut src = ByteOrdered::le(bytes);
    Ok(match width {
        LengthWidth::W1 => src.read_u8().map_err(|_| Error::TruncatedBuffer(0))? as usize,
        LengthWidth::W2 => src.read_u16().map_err(|_| Error::TruncatedBuffer(0))? as usize,
        LengthWidth::W4 => src.read_u32().map_err(|_| Error::TruncatedBuffer(0))? as usize,
        LengthWidth::W8 => src.read_u64().map_err(|_| Error::TruncatedBuffer(0))? as usize,
    })
}

/// Find the length, in bytes, of a container's payload starting at `start` (the first byte
/// after the opener's tag header), by parsing element headers until the matching
/// end-of-container is found at nesting depth zero. Because [`decode_header`] already
/// resolves nested containers to their full extent, this loop never needs to track nesting
/// depth itself: a nested container is skipped over in one step, and only this container's
/// own end-of-container byte is ever visible to it.
pub fn find_container_end(buf: &[u8], start: usize) -> Result<usize> {
    let mut cursor = start;
    loop {
        if cursor >= buf.len() {
            return Err(Error::TruncatedContainer(start));
        }
        let header = decode_header(buf, cursor)?;
        if header.kind == ElementKind::EndOfContainer {
            return Ok(cursor - start);
        }
        cursor = header.end_offset();
    }
}

/// Append a control octet and tag header for `tag`/`kind` to `out`.
pub fn encode_control_and_tag(out: &mut Vec<u8>, tag: Tag, kind: ElementKind) {
    out.push(pack_control(tag.control(), kind));
    tag.encode(out);
}

/// Append a length prefix of the given width. The caller is responsible for having already
/// validated `length` against the field's `max_length`; this never fails.
pub fn encode_length(out: &mut Vec<u8>, width: LengthWidth, length: usize) {
    let mut dst = ByteOrdered::le(out);
    match width {
        LengthWidth::W1 => dst.write_u8(length as u8).expect("Vec<u8> write is infallible"),
        LengthWidth::W2 => dst
            .write_u16(length as u16)
            .expect("Vec<u8> write is infallible"),
        LengthWidth::W4 => dst
            .write_u32(length as u32)
            .expect("Vec<u8> write is infallible"),
        LengthWidth::W8 => dst
            .write_u64(length as u64)
            .expect("Vec<u8> write is infallible"),
    }
}

/// Read an unsigned integer payload of the given on-wire width. Matches decoding's
/// tolerance for a narrower on-wire width than a field's declared width.
pub fn read_unsigned(bytes: &[u8], width: IntWidth) -> Result<u64> {
    let mut src = ByteOrdered::le(bytes);
    Ok(match width {
        IntWidth::W1 => src.read_u8().map_err(|_| Error::TruncatedBuffer(0))? as u64,
        IntWidth::W2 => src.read_u16().map_err(|_| Error::TruncatedBuffer(0))? as u64,
        IntWidth::W4 => src.read_u32().map_err(|_| Error::TruncatedBuffer(0))? as u64,
        IntWidth::W8 => src.read_u64().map_err(|_| Error::TruncatedBuffer(0))?,
    })
}

/// Read a signed integer payload of the given on-wire width.
pub fn read_signed(bytes: &[u8], width: IntWidth) -> Result<i64> {
    let mut src = ByteOrdered::le(bytes);
    Ok(match width {
        IntWidth::W1 => src.read_i8().map_err(|_| Error::TruncatedBuffer(0))? as i64,
        IntWidth::W2 => src.read_i16().map_err(|_| Error::TruncatedBuffer(0))? as i64,
        IntWidth::W4 => src.read_i32().map_err(|_| Error::TruncatedBuffer(0))? as i64,
        IntWidth::W8 => src.read_i64().map_err(|_| Error::TruncatedBuffer(0))?,
    })
}

/// Write an unsigned integer payload at the declared width (encoding never shrinks to a
/// narrower on-wire width than declared).
pub fn write_unsigned(out: &mut Vec<u8>, width: IntWidth, value: u64) {
    let mut dst = ByteOrdered::le(out);
    match width {
        IntWidth::W1 => dst.write_u8(value as u8),
        IntWidth::W2 => dst.write_u16(value as u16),
        IntWidth::W4 => dst.write_u32(value as u32),
        IntWidth::W8 => dst.write_u64(value),
    }
    .expect("Vec<u8> write is infallible")
}

/// Write a signed integer payload at the declared width.
pub fn write_signed(out: &mut Vec<u8>, width: IntWidth, value: i64) {
    let mut dst = ByteOrdered::le(out);
    match width {
        IntWidth::W1 => dst.write_i8(value as i8),
        IntWidth::W2 => dst.write_i16(value as i16),
        IntWidth::W4 => dst.write_i32(value as i32),
        IntWidth::W8 => dst.write_i64(value),
    }
    .expect("Vec<u8> write is infallible")
}

/// Read a float payload of the given width.
pub fn read_float(bytes: &[u8], width: FloatWidth) -> Result<f64> {
    let mut src = ByteOrdered::le(bytes);
    Ok(match width {
        FloatWidth::Single => src.read_f32().map_err(|_| Error::TruncatedBuffer(0))? as f64,
        FloatWidth::Double => src.read_f64().map_err(|_| Error::TruncatedBuffer(0))?,
    })
}

/// Write a float payload at the given width.
pub fn write_float(out: &mut Vec<u8>, width: FloatWidth, value: f64) {
    let mut dst = ByteOrdered::le(out);
    match width {
        FloatWidth::Single => dst.write_f32(value as f32),
        FloatWidth::Double => dst.write_f64(value),
    }
    .expect("Vec<u8> write is infallible")
}
