//! Fast-path output hint.

use super::{PduHint, PduHintOutcome, checked_total, clamp_max};
use crate::codec::FramingError;

const ACTION_MASK: u8 = 0x03;
const LONG_LENGTH_FLAG: u8 = 0x80;
const SHORT_HEADER_LEN: usize = 2;
const LONG_HEADER_LEN: usize = 3;

/// Hint for fast-path PDUs.
///
/// The first byte carries the action in its two low bits, which must be `0`.
/// The total length (header included) follows in PER form: one byte when the
/// high bit is clear, otherwise fifteen bits spread across two big-endian
/// bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FastPathHint {
    max_pdu_length: Option<usize>,
}

impl FastPathHint {
    /// Hint with no length limit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_pdu_length: None,
        }
    }

    /// Reject PDUs longer than `max` bytes.
    #[must_use]
    pub fn with_max_pdu_length(mut self, max: usize) -> Self {
        self.max_pdu_length = Some(clamp_max(max));
        self
    }
}

impl PduHint for FastPathHint {
    fn min_header_len(&self) -> usize { SHORT_HEADER_LEN }

    fn find_size(&self, bytes: &[u8]) -> Result<PduHintOutcome, FramingError> {
        let [first, len0, rest @ ..] = bytes else {
            return Ok(PduHintOutcome::Incomplete);
        };
        if first & ACTION_MASK != 0 {
            return Err(FramingError::InvalidHeader {
                found: *first,
                expected: "fast-path action 0",
            });
        }
        if len0 & LONG_LENGTH_FLAG == 0 {
            return checked_total(usize::from(*len0), SHORT_HEADER_LEN, self.max_pdu_length);
        }
        let Some(len1) = rest.first() else {
            return Ok(PduHintOutcome::Incomplete);
        };
        let total = (usize::from(len0 & !LONG_LENGTH_FLAG) << 8) | usize::from(*len1);
        checked_total(total, LONG_HEADER_LEN, self.max_pdu_length)
    }
}
