//! Native error descriptors.

use std::ptr::NonNull;

use super::FfiStr;
use crate::{codec::FramingError, handle::NativeResource};

/// Category of a native error.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FfiErrorKind {
    /// Unclassified failure.
    Generic = 0,
    /// Bytes could not be framed or decoded.
    Decode = 1,
    /// An argument was null, out of range, or otherwise unusable.
    InvalidArgument = 2,
}

/// Opaque error descriptor owned by the caller once returned.
#[derive(Debug)]
pub struct FfiError {
    kind: FfiErrorKind,
    message: String,
}

impl FfiError {
    pub(crate) fn new(kind: FfiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(FfiErrorKind::InvalidArgument, message)
    }

    pub(crate) fn into_raw(self) -> *mut Self { Box::into_raw(Box::new(self)) }
}

impl From<FramingError> for FfiError {
    fn from(err: FramingError) -> Self {
        let kind = match err {
            FramingError::UnsupportedPrefixWidth { .. } => FfiErrorKind::InvalidArgument,
            _ => FfiErrorKind::Decode,
        };
        Self::new(kind, err.to_string())
    }
}

// SAFETY: `destroy` frees a `Box<FfiError>`, which is `Send`.
unsafe impl NativeResource for FfiError {
    const TYPE_NAME: &'static str = "RdpError";

    unsafe fn destroy(raw: NonNull<Self>) {
        // SAFETY: forwarded from the caller.
        unsafe { rdpframe_error_destroy(raw.as_ptr()) }
    }
}

/// Free an error descriptor. Null is ignored.
///
/// # Safety
///
/// `err` must be null or a pointer returned by this library that has not
/// been destroyed yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rdpframe_error_destroy(err: *mut FfiError) {
    if !err.is_null() {
        // SAFETY: allocated by `FfiError::into_raw`.
        drop(unsafe { Box::from_raw(err) });
    }
}

/// Category of `err`. A null pointer reports [`FfiErrorKind::InvalidArgument`].
///
/// # Safety
///
/// `err` must be null or a live error descriptor.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rdpframe_error_kind(err: *const FfiError) -> FfiErrorKind {
    // SAFETY: forwarded from the caller.
    unsafe { err.as_ref() }.map_or(FfiErrorKind::InvalidArgument, |err| err.kind)
}

/// Human-readable message of `err`, valid until `err` is destroyed.
///
/// A null pointer yields an empty string.
///
/// # Safety
///
/// `err` must be null or a live error descriptor.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rdpframe_error_message(err: *const FfiError) -> FfiStr {
    // SAFETY: forwarded from the caller.
    match unsafe { err.as_ref() } {
        Some(err) => FfiStr::borrowed(&err.message),
        None => FfiStr::borrowed(""),
    }
}
