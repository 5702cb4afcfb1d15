//! Tests for the raw entry points, exercised the way foreign callers use
//! them.

use std::ptr;

use rstest::rstest;

use super::*;

fn new_factory(format: FfiWireFormat) -> *mut FfiHintFactory {
    // SAFETY: built by `rdpframe_hint_factory_new`.
    unsafe { rdpframe_hint_factory_new(format as u32, 0).into_parts() }
        .expect("known wire format")
}

fn error_parts(err: *mut FfiError) -> (FfiErrorKind, String) {
    // SAFETY: `err` is a live descriptor until destroyed below.
    let parts = unsafe {
        (
            rdpframe_error_kind(err),
            rdpframe_error_message(err).as_str().to_owned(),
        )
    };
    // SAFETY: destroyed exactly once.
    unsafe { rdpframe_error_destroy(err) };
    parts
}

#[test]
fn factory_builds_hints_that_report_lengths() {
    let factory = new_factory(FfiWireFormat::Tpkt);
    // SAFETY: `factory` is live.
    let hint = unsafe { rdpframe_hint_factory_build_pdu_hint(factory) };
    assert!(!hint.is_null());

    let header = [0x03, 0x00, 0x00, 0x2a];
    // SAFETY: `hint` is live and `header` is readable.
    let result = unsafe { rdpframe_pdu_hint_find_size(hint, header.as_ptr(), header.len()) };
    // SAFETY: produced by `rdpframe_pdu_hint_find_size`.
    let size = unsafe { result.into_parts() }.expect("valid header");
    assert_eq!(
        size,
        OptionalUsize {
            is_some: true,
            value: 42,
        }
    );

    // SAFETY: each pointer is destroyed exactly once.
    unsafe {
        rdpframe_pdu_hint_destroy(hint);
        rdpframe_hint_factory_destroy(factory);
    }
}

#[test]
fn empty_null_buffer_needs_more_bytes() {
    let factory = new_factory(FfiWireFormat::Rdp);
    // SAFETY: `factory` is live; a null buffer of length zero is allowed.
    let size = unsafe {
        let hint = rdpframe_hint_factory_build_pdu_hint(factory);
        let size = rdpframe_pdu_hint_find_size(hint, ptr::null(), 0).into_parts();
        rdpframe_pdu_hint_destroy(hint);
        rdpframe_hint_factory_destroy(factory);
        size
    }
    .expect("empty buffer is not an error");
    assert!(!size.is_some);
}

#[test]
fn corrupted_header_yields_decode_error() {
    let factory = new_factory(FfiWireFormat::Tpkt);
    let header = [0x07, 0x00, 0x00, 0x2a];
    // SAFETY: pointers are live and destroyed once.
    let err = unsafe {
        let hint = rdpframe_hint_factory_build_pdu_hint(factory);
        let result = rdpframe_pdu_hint_find_size(hint, header.as_ptr(), header.len());
        rdpframe_pdu_hint_destroy(hint);
        rdpframe_hint_factory_destroy(factory);
        result.into_parts()
    }
    .expect_err("corrupted marker");
    let (kind, message) = error_parts(err);
    assert_eq!(kind, FfiErrorKind::Decode);
    assert!(message.contains("0x07"), "{message}");
}

#[rstest]
#[case::null_hint(true, false)]
#[case::null_bytes(false, true)]
fn null_arguments_are_reported(#[case] null_hint: bool, #[case] null_bytes: bool) {
    let factory = new_factory(FfiWireFormat::FastPath);
    // SAFETY: `factory` is live.
    let hint = unsafe { rdpframe_hint_factory_build_pdu_hint(factory) };
    let buf = [0u8; 2];
    let target = if null_hint { ptr::null() } else { hint.cast_const() };
    let bytes = if null_bytes { ptr::null() } else { buf.as_ptr() };
    // SAFETY: null arguments are rejected before any dereference.
    let result = unsafe { rdpframe_pdu_hint_find_size(target, bytes, 2) };
    // SAFETY: destroyed exactly once.
    unsafe {
        rdpframe_pdu_hint_destroy(hint);
        rdpframe_hint_factory_destroy(factory);
    }
    // SAFETY: produced by `rdpframe_pdu_hint_find_size`.
    let err = unsafe { result.into_parts() }.expect_err("null argument");
    assert_eq!(error_parts(err).0, FfiErrorKind::InvalidArgument);
}

#[test]
fn unknown_wire_format_is_invalid_argument() {
    // SAFETY: produced by `rdpframe_hint_factory_new`.
    let err = unsafe { rdpframe_hint_factory_new(99, 0).into_parts() }
        .expect_err("format 99 does not exist");
    let (kind, message) = error_parts(err);
    assert_eq!(kind, FfiErrorKind::InvalidArgument);
    assert!(message.contains("99"), "{message}");
}

#[test]
fn unsupported_prefix_width_is_invalid_argument() {
    let result = rdpframe_hint_factory_new_length_prefixed(3, false, 0);
    assert!(!result.is_ok());
    // SAFETY: produced by `rdpframe_hint_factory_new_length_prefixed`.
    let err = unsafe { result.into_parts() }.expect_err("width 3");
    assert_eq!(error_parts(err).0, FfiErrorKind::InvalidArgument);
}

#[test]
fn null_factory_builds_nothing() {
    // SAFETY: null is accepted.
    let hint = unsafe { rdpframe_hint_factory_build_pdu_hint(ptr::null()) };
    assert!(hint.is_null());
}

#[test]
fn destroy_entry_points_ignore_null() {
    // SAFETY: null is accepted by every destructor.
    unsafe {
        rdpframe_pdu_hint_destroy(ptr::null_mut());
        rdpframe_hint_factory_destroy(ptr::null_mut());
        rdpframe_error_destroy(ptr::null_mut());
    }
}

#[test]
fn null_error_descriptor_has_safe_accessors() {
    // SAFETY: null is accepted by both accessors.
    let (kind, message) = unsafe {
        (
            rdpframe_error_kind(ptr::null()),
            rdpframe_error_message(ptr::null()).as_str(),
        )
    };
    assert_eq!(kind, FfiErrorKind::InvalidArgument);
    assert_eq!(message, "");
}

#[test]
fn zero_limit_selects_default_maximum() {
    // SAFETY: produced by `rdpframe_hint_factory_new_length_prefixed`.
    let factory = unsafe { rdpframe_hint_factory_new_length_prefixed(4, false, 0).into_parts() }
        .expect("width 4 is supported");
    let header = [0xff, 0xff, 0xff, 0xff];
    // SAFETY: pointers are live and destroyed once.
    let err = unsafe {
        let hint = rdpframe_hint_factory_build_pdu_hint(factory);
        let result = rdpframe_pdu_hint_find_size(hint, header.as_ptr(), header.len());
        rdpframe_pdu_hint_destroy(hint);
        rdpframe_hint_factory_destroy(factory);
        result.into_parts()
    }
    .expect_err("prefix above the default limit");
    let (kind, message) = error_parts(err);
    assert_eq!(kind, FfiErrorKind::Decode);
    assert!(
        message.contains(&crate::hint::MAX_PDU_LENGTH.to_string()),
        "{message}"
    );
}
