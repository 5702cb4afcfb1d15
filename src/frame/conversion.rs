//! Conversion helpers for length prefix encoding.

use super::format::Endianness;
use crate::codec::FramingError;

fn is_supported_width(width: usize) -> bool { matches!(width, 1 | 2 | 4 | 8) }

/// Largest value a prefix of `width` bytes can carry, saturated to `usize`.
pub(crate) fn max_for_width(width: usize) -> usize {
    if width >= 8 {
        usize::MAX
    } else {
        usize::try_from((1_u64 << (8 * width)) - 1).unwrap_or(usize::MAX)
    }
}

/// Reads a `width`-byte integer from the front of `bytes`.
///
/// Returns `Ok(None)` while fewer than `width` bytes are available so callers
/// can treat a short prefix as "need more data".
///
/// # Errors
/// Returns [`FramingError::UnsupportedPrefixWidth`] unless `width` is `1`,
/// `2`, `4`, or `8`.
pub fn bytes_to_u64(
    bytes: &[u8],
    width: usize,
    endianness: Endianness,
) -> Result<Option<u64>, FramingError> {
    if !is_supported_width(width) {
        return Err(FramingError::UnsupportedPrefixWidth { width });
    }
    let Some(prefix) = bytes.get(..width) else {
        return Ok(None);
    };

    let mut buf = [0u8; 8];
    let value = match endianness {
        Endianness::Big => {
            buf[8 - width..].copy_from_slice(prefix);
            #[expect(clippy::big_endian_bytes, reason = "prefix declared big-endian")]
            u64::from_be_bytes(buf)
        }
        Endianness::Little => {
            buf[..width].copy_from_slice(prefix);
            #[expect(clippy::little_endian_bytes, reason = "prefix declared little-endian")]
            u64::from_le_bytes(buf)
        }
    };
    Ok(Some(value))
}

/// Encodes `len` into the first `width` bytes of `out`, zeroing the rest.
///
/// # Errors
/// Returns [`FramingError::UnsupportedPrefixWidth`] for unsupported widths and
/// [`FramingError::OversizedPdu`] if `len` does not fit the prefix.
pub fn u64_to_bytes(
    len: usize,
    width: usize,
    endianness: Endianness,
    out: &mut [u8; 8],
) -> Result<usize, FramingError> {
    if !is_supported_width(width) {
        return Err(FramingError::UnsupportedPrefixWidth { width });
    }
    let max = max_for_width(width);
    if len > max {
        return Err(FramingError::OversizedPdu { size: len, max });
    }

    let value = len as u64;
    out.fill(0);
    match endianness {
        Endianness::Big => {
            #[expect(clippy::big_endian_bytes, reason = "prefix declared big-endian")]
            let bytes = value.to_be_bytes();
            out[..width].copy_from_slice(&bytes[8 - width..]);
        }
        Endianness::Little => {
            #[expect(clippy::little_endian_bytes, reason = "prefix declared little-endian")]
            let bytes = value.to_le_bytes();
            out[..width].copy_from_slice(&bytes[..width]);
        }
    }
    Ok(width)
}
