//! Helpers for explicit wire byte-order conversions.
//!
//! RDP mixes byte orders: TPKT and fast-path headers carry big-endian
//! lengths while virtual channel orders such as RAIL are little-endian.
//! These helpers keep Clippy expectations scoped to the conversion points so
//! the hint evaluators can stay explicit about which order each field uses.

/// Parse a network-order (big-endian) `u16` from its on-wire representation.
///
/// # Examples
///
/// ```
/// use rdpframe::byte_order::read_network_u16;
///
/// assert_eq!(read_network_u16([0x12, 0x34]), 0x1234);
/// ```
#[must_use]
pub fn read_network_u16(bytes: [u8; 2]) -> u16 {
    #[expect(
        clippy::big_endian_bytes,
        reason = "TPKT and fast-path lengths are big-endian on the wire."
    )]
    u16::from_be_bytes(bytes)
}

/// Serialise a `u16` in network byte order (big-endian).
///
/// # Examples
///
/// ```
/// use rdpframe::byte_order::write_network_u16;
///
/// assert_eq!(write_network_u16(0x1234), [0x12, 0x34]);
/// ```
#[must_use]
pub fn write_network_u16(value: u16) -> [u8; 2] {
    #[expect(
        clippy::big_endian_bytes,
        reason = "TPKT and fast-path lengths are big-endian on the wire."
    )]
    value.to_be_bytes()
}

/// Parse a little-endian `u16` as used by virtual channel order headers.
///
/// # Examples
///
/// ```
/// use rdpframe::byte_order::read_le_u16;
///
/// assert_eq!(read_le_u16([0x34, 0x12]), 0x1234);
/// ```
#[must_use]
pub fn read_le_u16(bytes: [u8; 2]) -> u16 {
    #[expect(
        clippy::little_endian_bytes,
        reason = "Virtual channel order headers are little-endian on the wire."
    )]
    u16::from_le_bytes(bytes)
}

/// Serialise a `u16` in little-endian order.
///
/// # Examples
///
/// ```
/// use rdpframe::byte_order::write_le_u16;
///
/// assert_eq!(write_le_u16(0x1234), [0x34, 0x12]);
/// ```
#[must_use]
pub fn write_le_u16(value: u16) -> [u8; 2] {
    #[expect(
        clippy::little_endian_bytes,
        reason = "Virtual channel order headers are little-endian on the wire."
    )]
    value.to_le_bytes()
}

#[cfg(test)]
mod tests {
    //! Byte-order helper checks against literal wire encodings.

    use rstest::rstest;

    use super::{read_le_u16, read_network_u16, write_le_u16, write_network_u16};

    #[rstest]
    #[case::network(write_network_u16(0x002a), [0x00, 0x2a], read_network_u16([0x00, 0x2a]))]
    #[case::little(write_le_u16(0x002a), [0x2a, 0x00], read_le_u16([0x2a, 0x00]))]
    fn encodes_and_reads_back(
        #[case] written: [u8; 2],
        #[case] expected: [u8; 2],
        #[case] read_back: u16,
    ) {
        assert_eq!(written, expected);
        assert_eq!(read_back, 0x002a);
    }
}
