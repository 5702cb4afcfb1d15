//! Builders for well-formed PDUs of each supported wire format.

use bytes::{BufMut, BytesMut};
use rdpframe::frame::{Endianness, LengthFormat};

/// TPKT PDU wrapping `payload`.
///
/// # Panics
///
/// Panics if the PDU does not fit the 16-bit length field.
#[must_use]
pub fn tpkt(payload: &[u8]) -> Vec<u8> {
    let total = u16::try_from(payload.len() + 4).expect("TPKT PDU fits in 16 bits");
    let mut buf = BytesMut::with_capacity(usize::from(total));
    buf.put_u8(0x03);
    buf.put_u8(0x00);
    buf.put_u16(total);
    buf.put_slice(payload);
    buf.to_vec()
}

/// Fast-path output PDU wrapping `payload`, using the one-byte length form
/// when it fits.
///
/// # Panics
///
/// Panics if the PDU exceeds the 15-bit long-form length.
#[must_use]
pub fn fast_path(payload: &[u8]) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(payload.len() + 3);
    buf.put_u8(0x00);
    if payload.len() + 2 <= 0x7f {
        buf.put_u8(u8::try_from(payload.len() + 2).expect("short form fits in 7 bits"));
    } else {
        let total = u16::try_from(payload.len() + 3).expect("fast-path PDU fits in 15 bits");
        assert!(total <= 0x7fff, "fast-path PDU fits in 15 bits");
        buf.put_u16(total | 0x8000);
    }
    buf.put_slice(payload);
    buf.to_vec()
}

/// RAIL order of `order_type` carrying `body`.
///
/// # Panics
///
/// Panics if the order does not fit the 16-bit length field.
#[must_use]
pub fn rail_order(order_type: u16, body: &[u8]) -> Vec<u8> {
    let total = u16::try_from(body.len() + 4).expect("RAIL order fits in 16 bits");
    let mut buf = BytesMut::with_capacity(usize::from(total));
    buf.put_u16_le(order_type);
    buf.put_u16_le(total);
    buf.put_slice(body);
    buf.to_vec()
}

/// `payload` behind an integer prefix described by `format`.
///
/// # Panics
///
/// Panics if `payload` is too long for the prefix.
#[must_use]
pub fn length_prefixed(format: LengthFormat, payload: &[u8]) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(format.width() + payload.len());
    format
        .write_len(payload.len(), &mut buf)
        .expect("payload length fits the prefix");
    buf.put_slice(payload);
    buf.to_vec()
}

/// Shorthand for a big-endian `u16` length prefix.
#[must_use]
pub fn u16_be_prefixed(payload: &[u8]) -> Vec<u8> {
    length_prefixed(LengthFormat::new(2, Endianness::Big), payload)
}
