//! RAIL virtual channel order hint.

use super::{PduHint, PduHintOutcome, checked_total, clamp_max};
use crate::{byte_order::read_le_u16, codec::FramingError};

const ORDER_HEADER_LEN: usize = 4;

macro_rules! rail_orders {
    ($(($name:literal, $value:literal);)+) => {
        /// Symbolic name of a RAIL order type, if it is one the protocol
        /// defines.
        #[must_use]
        pub fn rail_order_name(order_type: u16) -> Option<&'static str> {
            match order_type {
                $($value => Some($name),)+
                _ => None,
            }
        }
    };
}

rail_orders! {
    ("EXEC", 0x0001);
    ("ACTIVATE", 0x0002);
    ("SYSPARAM", 0x0003);
    ("SYSCOMMAND", 0x0004);
    ("HANDSHAKE", 0x0005);
    ("NOTIFY_EVENT", 0x0006);
    ("WINDOWMOVE", 0x0008);
    ("LOCALMOVESIZE", 0x0009);
    ("MINMAXINFO", 0x000A);
    ("CLIENTSTATUS", 0x000B);
    ("SYSMENU", 0x000C);
    ("LANGBARINFO", 0x000D);
    ("GET_APPID_REQ", 0x000E);
    ("GET_APPID_RESP", 0x000F);
    ("TASKBARINFO", 0x0010);
    ("LANGUAGEIMEINFO", 0x0011);
    ("COMPARTMENTINFO", 0x0012);
    ("HANDSHAKE_EX", 0x0013);
    ("ZORDER_SYNC", 0x0014);
    ("CLOAK", 0x0015);
    ("POWER_DISPLAY_REQUEST", 0x0016);
    ("SNAP_ARRANGE", 0x0017);
    ("GET_APPID_RESP_EX", 0x0018);
    ("EXEC_RESULT", 0x0080);
}

/// Hint for orders on the RAIL (remote application) static channel.
///
/// Every order starts with a little-endian `orderType` and `orderLength`;
/// `orderLength` covers the whole order including this header. Unknown order
/// types are framed like any other so newer servers do not break the
/// stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RailOrderHint {
    max_pdu_length: Option<usize>,
}

impl RailOrderHint {
    /// Hint with no length limit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_pdu_length: None,
        }
    }

    /// Reject orders longer than `max` bytes.
    #[must_use]
    pub fn with_max_pdu_length(mut self, max: usize) -> Self {
        self.max_pdu_length = Some(clamp_max(max));
        self
    }
}

impl PduHint for RailOrderHint {
    fn min_header_len(&self) -> usize { ORDER_HEADER_LEN }

    fn find_size(&self, bytes: &[u8]) -> Result<PduHintOutcome, FramingError> {
        let [t0, t1, l0, l1, ..] = bytes else {
            return Ok(PduHintOutcome::Incomplete);
        };
        let order_type = read_le_u16([*t0, *t1]);
        if rail_order_name(order_type).is_none() {
            tracing::trace!(order_type, "framing unknown RAIL order type");
        }
        let total = usize::from(read_le_u16([*l0, *l1]));
        checked_total(total, ORDER_HEADER_LEN, self.max_pdu_length)
    }
}
