//! PDU size hints.
//!
//! A hint inspects the bytes received so far and reports whether the total
//! length of the PDU at the front of the buffer is already known. It never
//! decodes the PDU body and never retains the buffer, so a transport loop can
//! call it again after every read until it answers
//! [`PduHintOutcome::Complete`], then slice exactly that many bytes for the
//! decoder.
//!
//! ```
//! use rdpframe::hint::{PduHint, PduHintOutcome, TpktHint};
//!
//! let hint = TpktHint::new();
//! assert_eq!(hint.find_size(&[0x03, 0x00]), Ok(PduHintOutcome::Incomplete));
//! assert_eq!(
//!     hint.find_size(&[0x03, 0x00, 0x00, 0x2a]),
//!     Ok(PduHintOutcome::Complete(42))
//! );
//! ```

use std::fmt;

use crate::codec::FramingError;

mod fast_path;
mod length_prefixed;
mod rail;
mod tpkt;

pub use fast_path::FastPathHint;
pub use length_prefixed::LengthPrefixedHint;
pub use rail::{RailOrderHint, rail_order_name};
pub use tpkt::{RdpHint, TpktHint};

/// Upper bound accepted for any configured maximum PDU length (16 MiB).
pub const MAX_PDU_LENGTH: usize = 16 * 1024 * 1024;

/// Result of evaluating a hint against a byte prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PduHintOutcome {
    /// The length-bearing header is not complete yet; read more bytes.
    Incomplete,
    /// Total length of the PDU, header included.
    Complete(usize),
}

impl PduHintOutcome {
    /// Total PDU length, if known.
    #[must_use]
    pub fn length(self) -> Option<usize> {
        match self {
            Self::Incomplete => None,
            Self::Complete(len) => Some(len),
        }
    }

    /// Returns true once the total length is known.
    #[must_use]
    pub fn is_complete(self) -> bool { matches!(self, Self::Complete(_)) }
}

impl From<Option<usize>> for PduHintOutcome {
    fn from(value: Option<usize>) -> Self { value.map_or(Self::Incomplete, Self::Complete) }
}

impl From<PduHintOutcome> for Option<usize> {
    fn from(value: PduHintOutcome) -> Self { value.length() }
}

/// Determines PDU boundaries from a byte prefix.
///
/// Implementations must be pure functions of `bytes`: the same prefix always
/// yields the same outcome, and once a prefix yields
/// [`PduHintOutcome::Complete`], every longer buffer sharing that prefix
/// yields the same length.
pub trait PduHint: Send + Sync + fmt::Debug {
    /// Fewest bytes for which [`find_size`](Self::find_size) can answer
    /// anything but [`PduHintOutcome::Incomplete`].
    fn min_header_len(&self) -> usize;

    /// Evaluate the PDU at the front of `bytes`.
    ///
    /// # Errors
    /// Returns a [`FramingError`] when enough bytes are present to read the
    /// header but the header is malformed.
    fn find_size(&self, bytes: &[u8]) -> Result<PduHintOutcome, FramingError>;
}

impl<H: PduHint + ?Sized> PduHint for Box<H> {
    fn min_header_len(&self) -> usize { (**self).min_header_len() }

    fn find_size(&self, bytes: &[u8]) -> Result<PduHintOutcome, FramingError> {
        (**self).find_size(bytes)
    }
}

impl<H: PduHint + ?Sized> PduHint for &H {
    fn min_header_len(&self) -> usize { (**self).min_header_len() }

    fn find_size(&self, bytes: &[u8]) -> Result<PduHintOutcome, FramingError> {
        (**self).find_size(bytes)
    }
}

/// Validate a decoded total length against the header size and an optional
/// limit.
pub(crate) fn checked_total(
    total: usize,
    header_len: usize,
    max_pdu_length: Option<usize>,
) -> Result<PduHintOutcome, FramingError> {
    if total < header_len {
        return Err(FramingError::LengthTooShort {
            length: total,
            min: header_len,
        });
    }
    if let Some(max) = max_pdu_length
        && total > max
    {
        return Err(FramingError::OversizedPdu { size: total, max });
    }
    Ok(PduHintOutcome::Complete(total))
}

pub(crate) fn clamp_max(max: usize) -> usize { max.min(MAX_PDU_LENGTH) }

#[cfg(test)]
mod tests;
