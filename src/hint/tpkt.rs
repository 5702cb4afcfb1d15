//! Slow-path (TPKT) and combined slow/fast-path hints.

use super::{FastPathHint, PduHint, PduHintOutcome, checked_total, clamp_max};
use crate::{byte_order::read_network_u16, codec::FramingError};

const TPKT_VERSION: u8 = 0x03;
const TPKT_HEADER_LEN: usize = 4;

const ACTION_MASK: u8 = 0x03;
const ACTION_FAST_PATH: u8 = 0x00;
const ACTION_X224: u8 = 0x03;

/// Hint for TPKT-framed X.224 traffic.
///
/// Header layout: version (`0x03`), a reserved byte, then the big-endian
/// total length including the four header bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TpktHint {
    max_pdu_length: Option<usize>,
}

impl TpktHint {
    /// Hint with no length limit beyond the 16-bit field itself.
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

impl PduHint for TpktHint {
    fn min_header_len(&self) -> usize { TPKT_HEADER_LEN }

    fn find_size(&self, bytes: &[u8]) -> Result<PduHintOutcome, FramingError> {
        let Some(&version) = bytes.first() else {
            return Ok(PduHintOutcome::Incomplete);
        };
        if bytes.len() < TPKT_HEADER_LEN {
            return Ok(PduHintOutcome::Incomplete);
        }
        if version != TPKT_VERSION {
            return Err(FramingError::InvalidHeader {
                found: version,
                expected: "TPKT version 3",
            });
        }
        let total = usize::from(read_network_u16([bytes[2], bytes[3]]));
        checked_total(total, TPKT_HEADER_LEN, self.max_pdu_length)
    }
}

/// Hint for a server-to-client RDP stream mixing TPKT and fast-path PDUs.
///
/// The two low bits of the first byte select the framing: `3` for TPKT,
/// `0` for fast-path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RdpHint {
    tpkt: TpktHint,
    fast_path: FastPathHint,
}

impl RdpHint {
    /// Hint with no length limit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tpkt: TpktHint::new(),
            fast_path: FastPathHint::new(),
        }
    }

    /// Reject PDUs longer than `max` bytes on either path.
    #[must_use]
    pub fn with_max_pdu_length(self, max: usize) -> Self {
        Self {
            tpkt: self.tpkt.with_max_pdu_length(max),
            fast_path: self.fast_path.with_max_pdu_length(max),
        }
    }
}

impl PduHint for RdpHint {
    fn min_header_len(&self) -> usize { self.fast_path.min_header_len() }

    fn find_size(&self, bytes: &[u8]) -> Result<PduHintOutcome, FramingError> {
        let Some(&first) = bytes.first() else {
            return Ok(PduHintOutcome::Incomplete);
        };
        match first & ACTION_MASK {
            ACTION_X224 => self.tpkt.find_size(bytes),
            ACTION_FAST_PATH => self.fast_path.find_size(bytes),
            _ if bytes.len() < self.min_header_len() => Ok(PduHintOutcome::Incomplete),
            _ => Err(FramingError::InvalidHeader {
                found: first,
                expected: "TPKT version 3 or fast-path action 0",
            }),
        }
    }
}
