//! Error types for PDU framing.
//!
//! The taxonomy separates framing errors (a header that cannot yield a PDU
//! length) from EOF conditions where the stream ended inside a PDU. Transport
//! I/O errors never pass through here; readers surface them unchanged.
//!
//! "More bytes required" is deliberately absent: running out of data is the
//! normal [`PduHintOutcome::Incomplete`](crate::hint::PduHintOutcome) result,
//! never an error.
//!
//! # Error Categories
//!
//! - [`FramingError`]: the bytes present are malformed so no PDU length can be computed. Fatal to
//!   the stream's framing.
//! - [`EofError`]: end-of-stream arrived mid-header or mid-PDU.
//! - [`CodecError`]: top-level enum wrapping both categories.

use std::io;

use thiserror::Error;

/// Framing errors raised while determining a PDU boundary.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FramingError {
    /// The header marker byte does not identify a known PDU format.
    #[error("invalid header marker {found:#04x}, expected {expected}")]
    InvalidHeader {
        /// Marker byte found on the wire.
        found: u8,
        /// Human-readable description of the accepted markers.
        expected: &'static str,
    },

    /// The encoded length is smaller than the header carrying it.
    #[error("encoded PDU length {length} is shorter than the {min}-byte header")]
    LengthTooShort {
        /// Total length announced by the header.
        length: usize,
        /// Minimum legal total length.
        min: usize,
    },

    /// The encoded length exceeds the configured maximum.
    #[error("PDU exceeds max length: {size} > {max}")]
    OversizedPdu {
        /// Total length announced by the header.
        size: usize,
        /// Maximum allowed PDU size.
        max: usize,
    },

    /// A generic length prefix was configured with an unsupported width.
    #[error("unsupported length prefix width: {width} bytes")]
    UnsupportedPrefixWidth {
        /// Rejected width in bytes.
        width: usize,
    },
}

/// EOF conditions where the stream ended inside a PDU.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum EofError {
    /// EOF received while the PDU header was still incomplete.
    #[error("premature EOF during header: {bytes_received} bytes buffered")]
    MidHeader {
        /// Bytes buffered before EOF.
        bytes_received: usize,
    },

    /// EOF received after the PDU length was known but before the PDU was
    /// complete.
    #[error("premature EOF: {bytes_received} bytes of {expected} byte PDU received")]
    MidFrame {
        /// Bytes buffered before EOF.
        bytes_received: usize,
        /// Total PDU length announced by the header.
        expected: usize,
    },
}

/// Top-level framing error taxonomy.
///
/// # Examples
///
/// ```
/// use rdpframe::codec::{CodecError, FramingError};
///
/// let err = CodecError::Framing(FramingError::OversizedPdu {
///     size: 2000,
///     max: 1024,
/// });
/// assert_eq!(err.error_type(), "framing");
/// ```
#[derive(Debug, Error)]
pub enum CodecError {
    /// The header could not be interpreted.
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),

    /// The stream ended inside a PDU.
    #[error("EOF: {0}")]
    Eof(#[from] EofError),
}

impl CodecError {
    /// Returns the error category as a string for logging.
    ///
    /// Either `"framing"` or `"eof"`.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Framing(_) => "framing",
            Self::Eof(_) => "eof",
        }
    }
}

impl From<CodecError> for io::Error {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Framing(e) => io::Error::new(io::ErrorKind::InvalidData, e),
            CodecError::Eof(e) => io::Error::new(io::ErrorKind::UnexpectedEof, e),
        }
    }
}

impl From<FramingError> for io::Error {
    fn from(err: FramingError) -> Self { CodecError::Framing(err).into() }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
