//! Length prefix formatting options.

use bytes::BytesMut;
use serde::{Deserialize, Serialize};

use super::conversion::{bytes_to_u64, u64_to_bytes};
use crate::codec::FramingError;

/// Byte order used for encoding and decoding length prefixes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Endianness {
    /// Most significant byte first.
    Big,
    /// Least significant byte first.
    Little,
}

/// Format of the integer prefix preceding each PDU.
///
/// The prefix carries the payload length only; the total PDU length is the
/// prefix width plus the encoded value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LengthFormat {
    width: usize,
    endianness: Endianness,
}

impl LengthFormat {
    /// Creates a new `LengthFormat`.
    ///
    /// # Panics
    ///
    /// Panics if `width` is not `1`, `2`, `4`, or `8`.
    #[must_use]
    pub const fn new(width: usize, endianness: Endianness) -> Self {
        assert!(
            matches!(width, 1 | 2 | 4 | 8),
            "invalid length-prefix width"
        );
        Self { width, endianness }
    }

    /// Fallible constructor validating the prefix width.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::UnsupportedPrefixWidth`] if `width` is not `1`,
    /// `2`, `4`, or `8`.
    pub fn try_new(width: usize, endianness: Endianness) -> Result<Self, FramingError> {
        if !matches!(width, 1 | 2 | 4 | 8) {
            return Err(FramingError::UnsupportedPrefixWidth { width });
        }
        Ok(Self { width, endianness })
    }

    /// 2-byte big-endian prefix.
    #[must_use]
    pub const fn u16_be() -> Self { Self::new(2, Endianness::Big) }

    /// 2-byte little-endian prefix.
    #[must_use]
    pub const fn u16_le() -> Self { Self::new(2, Endianness::Little) }

    /// 4-byte big-endian prefix.
    #[must_use]
    pub const fn u32_be() -> Self { Self::new(4, Endianness::Big) }

    /// 4-byte little-endian prefix.
    #[must_use]
    pub const fn u32_le() -> Self { Self::new(4, Endianness::Little) }

    /// Width of the prefix in bytes.
    #[must_use]
    pub const fn width(&self) -> usize { self.width }

    /// Byte order of the prefix.
    #[must_use]
    pub const fn endianness(&self) -> Endianness { self.endianness }

    /// Read the payload length encoded at the front of `bytes`.
    ///
    /// Returns `Ok(None)` while the prefix itself is incomplete.
    ///
    /// # Errors
    /// Returns [`FramingError::OversizedPdu`] if the encoded length exceeds
    /// `usize`.
    pub fn read_len(&self, bytes: &[u8]) -> Result<Option<usize>, FramingError> {
        let Some(len) = bytes_to_u64(bytes, self.width, self.endianness)? else {
            return Ok(None);
        };
        usize::try_from(len)
            .map(Some)
            .map_err(|_| FramingError::OversizedPdu {
                size: usize::MAX,
                max: usize::MAX,
            })
    }

    /// Write `len` to `dst` using this format's prefix encoding.
    ///
    /// # Errors
    /// Returns [`FramingError::OversizedPdu`] if `len` cannot be represented
    /// by the prefix width.
    pub fn write_len(&self, len: usize, dst: &mut BytesMut) -> Result<(), FramingError> {
        let mut buf = [0u8; 8];
        let written = u64_to_bytes(len, self.width, self.endianness, &mut buf)?;
        dst.extend_from_slice(&buf[..written]);
        Ok(())
    }
}

impl Default for LengthFormat {
    fn default() -> Self { Self::u32_be() }
}
