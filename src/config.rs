//! Framing configuration.
//!
//! [`HintConfig`] selects the wire format whose PDU boundaries should be
//! detected and an optional size limit. It deserialises from any `serde`
//! format, so hosts can keep framing choices next to the rest of their
//! connection settings:
//!
//! ```
//! use rdpframe::config::{HintConfig, WireFormat};
//!
//! let config = HintConfig::new(WireFormat::Tpkt).with_max_pdu_length(8 * 1024);
//! let hint = config.build_hint().expect("TPKT needs no extra parameters");
//! assert_eq!(hint.min_header_len(), 4);
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    codec::FramingError,
    frame::{Endianness, LengthFormat},
    hint::{
        FastPathHint,
        LengthPrefixedHint,
        MAX_PDU_LENGTH,
        PduHint,
        RailOrderHint,
        RdpHint,
        TpktHint,
    },
};

/// Wire formats with a known PDU length encoding.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum WireFormat {
    /// TPKT-framed X.224 (slow-path).
    Tpkt,
    /// Fast-path output PDUs.
    FastPath,
    /// Mixed TPKT and fast-path, as sent by an RDP server.
    #[default]
    Rdp,
    /// RAIL static virtual channel orders.
    RailOrder,
    /// Payloads behind a plain integer length prefix.
    LengthPrefixed {
        /// Prefix width in bytes (`1`, `2`, `4`, or `8`).
        width: usize,
        /// Prefix byte order.
        endianness: Endianness,
    },
}

/// Settings used to build a [`PduHint`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HintConfig {
    /// Wire format to frame.
    pub format: WireFormat,
    /// Reject PDUs larger than this many bytes. Clamped to
    /// [`MAX_PDU_LENGTH`], which also applies when unset.
    pub max_pdu_length: Option<usize>,
}

impl HintConfig {
    /// Configuration for `format` with the default [`MAX_PDU_LENGTH`] limit.
    #[must_use]
    pub const fn new(format: WireFormat) -> Self {
        Self {
            format,
            max_pdu_length: None,
        }
    }

    /// Reject PDUs larger than `max` bytes.
    #[must_use]
    pub fn with_max_pdu_length(mut self, max: usize) -> Self {
        self.max_pdu_length = Some(max.min(MAX_PDU_LENGTH));
        self
    }

    /// Build the hint described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::UnsupportedPrefixWidth`] if a length-prefixed
    /// format names a width other than `1`, `2`, `4`, or `8`.
    pub fn build_hint(&self) -> Result<Box<dyn PduHint>, FramingError> {
        let max = self.effective_max_pdu_length();
        let hint: Box<dyn PduHint> = match self.format {
            WireFormat::Tpkt => Box::new(TpktHint::new().with_max_pdu_length(max)),
            WireFormat::FastPath => Box::new(FastPathHint::new().with_max_pdu_length(max)),
            WireFormat::Rdp => Box::new(RdpHint::new().with_max_pdu_length(max)),
            WireFormat::RailOrder => Box::new(RailOrderHint::new().with_max_pdu_length(max)),
            WireFormat::LengthPrefixed { width, endianness } => Box::new(
                LengthPrefixedHint::new(LengthFormat::try_new(width, endianness)?)
                    .with_max_pdu_length(max),
            ),
        };
        Ok(hint)
    }

    /// Limit applied by built hints: the configured one, or
    /// [`MAX_PDU_LENGTH`] when none is set.
    #[must_use]
    pub fn effective_max_pdu_length(&self) -> usize {
        self.max_pdu_length.unwrap_or(MAX_PDU_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{HintConfig, WireFormat};
    use crate::{
        codec::FramingError,
        frame::Endianness,
        hint::{MAX_PDU_LENGTH, PduHintOutcome},
    };

    #[test]
    fn defaults_to_mixed_rdp_without_limit() {
        let config: HintConfig = serde_json::from_str("{}").expect("empty config");
        assert_eq!(config, HintConfig::new(WireFormat::Rdp));
    }

    #[test]
    fn deserialises_length_prefixed_format() {
        let config: HintConfig = serde_json::from_str(
            r#"{
                "format": { "kind": "length-prefixed", "width": 2, "endianness": "little" },
                "max-pdu-length": 512
            }"#,
        )
        .expect("valid config");
        assert_eq!(
            config.format,
            WireFormat::LengthPrefixed {
                width: 2,
                endianness: Endianness::Little,
            }
        );
        assert_eq!(config.max_pdu_length, Some(512));
    }

    #[rstest]
    #[case(WireFormat::Tpkt, &[0x03, 0x00, 0x00, 0x2a])]
    #[case(WireFormat::FastPath, &[0x00, 0x2a])]
    #[case(WireFormat::Rdp, &[0x00, 0x2a])]
    #[case(WireFormat::RailOrder, &[0x01, 0x00, 0x2a, 0x00])]
    #[case(
        WireFormat::LengthPrefixed { width: 1, endianness: Endianness::Big },
        &[0x29]
    )]
    fn built_hints_frame_their_format(#[case] format: WireFormat, #[case] header: &[u8]) {
        let hint = HintConfig::new(format).build_hint().expect("valid format");
        assert_eq!(hint.find_size(header), Ok(PduHintOutcome::Complete(42)));
    }

    #[test]
    fn built_hints_apply_limit() {
        let hint = HintConfig::new(WireFormat::Tpkt)
            .with_max_pdu_length(16)
            .build_hint()
            .expect("valid format");
        assert!(hint.find_size(&[0x03, 0x00, 0x00, 0x2a]).is_err());
    }

    #[test]
    fn unset_limit_defaults_to_maximum() {
        let config = HintConfig::new(WireFormat::LengthPrefixed {
            width: 4,
            endianness: Endianness::Big,
        });
        assert_eq!(config.effective_max_pdu_length(), MAX_PDU_LENGTH);
        let hint = config.build_hint().expect("valid format");
        assert!(matches!(
            hint.find_size(&[0xff, 0xff, 0xff, 0xff]),
            Err(FramingError::OversizedPdu { max: MAX_PDU_LENGTH, .. })
        ));
    }

    #[test]
    fn limit_is_clamped() {
        let config = HintConfig::new(WireFormat::Rdp).with_max_pdu_length(usize::MAX);
        assert_eq!(config.max_pdu_length, Some(MAX_PDU_LENGTH));
    }

    #[test]
    fn invalid_prefix_width_is_rejected() {
        let config = HintConfig::new(WireFormat::LengthPrefixed {
            width: 3,
            endianness: Endianness::Big,
        });
        assert_eq!(
            config.build_hint().expect_err("width 3 is unsupported"),
            FramingError::UnsupportedPrefixWidth { width: 3 }
        );
    }
}
