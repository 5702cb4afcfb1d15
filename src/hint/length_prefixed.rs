//! Hint for PDUs carrying a plain integer length prefix.

use super::{PduHint, PduHintOutcome, checked_total, clamp_max};
use crate::{codec::FramingError, frame::LengthFormat};

/// Hint for payloads preceded by a [`LengthFormat`] prefix.
///
/// The prefix encodes the payload length only, so the reported total is the
/// prefix width plus the encoded value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LengthPrefixedHint {
    format: LengthFormat,
    max_pdu_length: Option<usize>,
}

impl LengthPrefixedHint {
    /// Hint reading prefixes in `format`.
    #[must_use]
    pub const fn new(format: LengthFormat) -> Self {
        Self {
            format,
            max_pdu_length: None,
        }
    }

    /// Reject PDUs whose total length exceeds `max` bytes.
    #[must_use]
    pub fn with_max_pdu_length(mut self, max: usize) -> Self {
        self.max_pdu_length = Some(clamp_max(max));
        self
    }

    /// Prefix format in use.
    #[must_use]
    pub const fn format(&self) -> LengthFormat { self.format }
}

impl PduHint for LengthPrefixedHint {
    fn min_header_len(&self) -> usize { self.format.width() }

    fn find_size(&self, bytes: &[u8]) -> Result<PduHintOutcome, FramingError> {
        let Some(payload_len) = self.format.read_len(bytes)? else {
            return Ok(PduHintOutcome::Incomplete);
        };
        let width = self.format.width();
        let total = width
            .checked_add(payload_len)
            .ok_or(FramingError::OversizedPdu {
                size: usize::MAX,
                max: self.max_pdu_length.unwrap_or(usize::MAX),
            })?;
        checked_total(total, width, self.max_pdu_length)
    }
}
