//! Unit tests for framing error types.

use std::io;

use super::{CodecError, EofError, FramingError};

#[test]
fn framing_error_converts_to_invalid_data() {
    let io_err: io::Error = FramingError::InvalidHeader {
        found: 0x07,
        expected: "TPKT version 3",
    }
    .into();
    assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn eof_error_converts_to_unexpected_eof() {
    let err = CodecError::Eof(EofError::MidFrame {
        bytes_received: 10,
        expected: 20,
    });
    let io_err: io::Error = err.into();
    assert_eq!(io_err.kind(), io::ErrorKind::UnexpectedEof);
}

#[test]
fn error_type_returns_correct_category() {
    assert_eq!(
        CodecError::Framing(FramingError::UnsupportedPrefixWidth { width: 3 }).error_type(),
        "framing"
    );
    assert_eq!(
        CodecError::Eof(EofError::MidHeader { bytes_received: 1 }).error_type(),
        "eof"
    );
}

#[test]
fn invalid_header_display_shows_marker_in_hex() {
    let err = FramingError::InvalidHeader {
        found: 0x07,
        expected: "TPKT version 3",
    };
    let display = err.to_string();
    assert!(display.contains("0x07"), "{display}");
    assert!(display.contains("TPKT version 3"), "{display}");
}

#[test]
fn eof_error_display_includes_byte_counts() {
    let err = EofError::MidFrame {
        bytes_received: 100,
        expected: 200,
    };
    let display = err.to_string();
    assert!(display.contains("100"));
    assert!(display.contains("200"));
}
