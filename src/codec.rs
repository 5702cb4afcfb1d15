//! Hint-driven PDU framing for byte streams.
//!
//! [`HintDecoder`] is the transport read loop expressed as a
//! [`tokio_util::codec::Decoder`]: it asks a [`PduHint`] how long the PDU at
//! the front of the buffer is, waits until that many bytes are buffered, and
//! hands out exactly one self-contained PDU at a time. It never decodes the
//! PDU body and never reads past a PDU boundary.
//!
//! # Error Handling
//!
//! Framing errors surface as [`io::ErrorKind::InvalidData`] and EOF inside a
//! PDU as [`io::ErrorKind::UnexpectedEof`]; the structured [`FramingError`]
//! or [`EofError`] remains available through [`io::Error::get_ref`]. A
//! framing error is fatal to the stream: no attempt is made to resynchronise.
//!
//! Whatever limit the hint carries, a PDU announcing more than
//! [`MAX_PDU_LENGTH`] bytes is rejected before any buffer space is reserved
//! for it.

use std::io;

use bytes::{Bytes, BytesMut};
use tokio_util::codec::Decoder;

use crate::hint::{MAX_PDU_LENGTH, PduHint, PduHintOutcome};

pub mod error;

pub use error::{CodecError, EofError, FramingError};

/// Splits a byte stream into PDUs using a [`PduHint`].
///
/// # Examples
///
/// ```
/// use bytes::BytesMut;
/// use rdpframe::{codec::HintDecoder, hint::TpktHint};
/// use tokio_util::codec::Decoder;
///
/// let mut decoder = HintDecoder::new(TpktHint::new());
/// let mut buf = BytesMut::from(&[0x03, 0x00, 0x00, 0x05, 0xaa, 0x03][..]);
///
/// let pdu = decoder.decode(&mut buf).unwrap().unwrap();
/// assert_eq!(pdu.as_ref(), &[0x03, 0x00, 0x00, 0x05, 0xaa]);
/// assert_eq!(decoder.decode(&mut buf).unwrap(), None);
/// ```
#[derive(Debug)]
pub struct HintDecoder<H> {
    hint: H,
    decoded: u64,
}

impl<H: PduHint> HintDecoder<H> {
    /// Create a decoder framing PDUs with `hint`.
    #[must_use]
    pub fn new(hint: H) -> Self { Self { hint, decoded: 0 } }

    /// The hint used to find PDU boundaries.
    #[must_use]
    pub fn hint(&self) -> &H { &self.hint }

    /// Number of complete PDUs produced so far.
    #[must_use]
    pub fn decoded_count(&self) -> u64 { self.decoded }

    /// Consume the decoder, returning its hint.
    pub fn into_inner(self) -> H { self.hint }
}

impl<H: PduHint> Decoder for HintDecoder<H> {
    type Item = Bytes;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let outcome = self.hint.find_size(src).and_then(|outcome| match outcome {
            PduHintOutcome::Complete(len) if len > MAX_PDU_LENGTH => {
                Err(FramingError::OversizedPdu {
                    size: len,
                    max: MAX_PDU_LENGTH,
                })
            }
            outcome => Ok(outcome),
        });
        match outcome {
            Ok(PduHintOutcome::Incomplete) => {
                tracing::trace!(buffered = src.len(), "PDU header incomplete");
                src.reserve(self.hint.min_header_len().saturating_sub(src.len()));
                Ok(None)
            }
            Ok(PduHintOutcome::Complete(len)) if src.len() < len => {
                tracing::trace!(len, buffered = src.len(), "PDU body incomplete");
                src.reserve(len - src.len());
                Ok(None)
            }
            Ok(PduHintOutcome::Complete(len)) => {
                self.decoded += 1;
                tracing::trace!(len, buffered = src.len(), "PDU boundary found");
                Ok(Some(src.split_to(len).freeze()))
            }
            Err(err) => {
                let err = CodecError::Framing(err);
                tracing::debug!(
                    error = %err,
                    error_type = err.error_type(),
                    buffered = src.len(),
                    "PDU framing failed"
                );
                Err(err.into())
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // Clean close: the stream ended on a PDU boundary.
        if src.is_empty() {
            return Ok(None);
        }
        if let Some(pdu) = self.decode(src)? {
            return Ok(Some(pdu));
        }
        Err(self.build_eof_error(src))
    }
}

impl<H: PduHint> HintDecoder<H> {
    /// Describe where in the PDU the stream ended.
    ///
    /// - [`EofError::MidHeader`]: the hint could not determine a length yet.
    /// - [`EofError::MidFrame`]: the length was known but the body was short.
    fn build_eof_error(&self, src: &BytesMut) -> io::Error {
        let bytes_received = src.len();
        let err = match self.hint.find_size(src) {
            Ok(PduHintOutcome::Complete(expected)) => EofError::MidFrame {
                bytes_received,
                expected,
            },
            _ => EofError::MidHeader { bytes_received },
        };
        CodecError::Eof(err).into()
    }
}
