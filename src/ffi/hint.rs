//! Native PDU hint and hint factory objects.

use std::{ptr::NonNull, slice};

use super::{FfiError, FfiResult, OptionalUsize};
use crate::{
    config::{HintConfig, WireFormat},
    frame::Endianness,
    handle::NativeResource,
    hint::PduHint,
};

/// Wire format selector accepted by [`rdpframe_hint_factory_new`].
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FfiWireFormat {
    /// TPKT-framed X.224.
    Tpkt = 0,
    /// Fast-path output.
    FastPath = 1,
    /// Mixed TPKT and fast-path.
    Rdp = 2,
    /// RAIL channel orders.
    RailOrder = 3,
}

impl FfiWireFormat {
    fn from_raw(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Tpkt),
            1 => Some(Self::FastPath),
            2 => Some(Self::Rdp),
            3 => Some(Self::RailOrder),
            _ => None,
        }
    }
}

impl From<FfiWireFormat> for WireFormat {
    fn from(value: FfiWireFormat) -> Self {
        match value {
            FfiWireFormat::Tpkt => Self::Tpkt,
            FfiWireFormat::FastPath => Self::FastPath,
            FfiWireFormat::Rdp => Self::Rdp,
            FfiWireFormat::RailOrder => Self::RailOrder,
        }
    }
}

/// Opaque PDU hint.
#[derive(Debug)]
pub struct FfiPduHint {
    hint: Box<dyn PduHint>,
}

/// Opaque factory producing [`FfiPduHint`]s for one validated configuration.
#[derive(Debug)]
pub struct FfiHintFactory {
    config: HintConfig,
}

// SAFETY: `destroy` frees a `Box<FfiPduHint>`; `PduHint` is `Send`.
unsafe impl NativeResource for FfiPduHint {
    const TYPE_NAME: &'static str = "PduHint";

    unsafe fn destroy(raw: NonNull<Self>) {
        // SAFETY: forwarded from the caller.
        unsafe { rdpframe_pdu_hint_destroy(raw.as_ptr()) }
    }
}

// SAFETY: `destroy` frees a `Box<FfiHintFactory>`, which is `Send`.
unsafe impl NativeResource for FfiHintFactory {
    const TYPE_NAME: &'static str = "HintFactory";

    unsafe fn destroy(raw: NonNull<Self>) {
        // SAFETY: forwarded from the caller.
        unsafe { rdpframe_hint_factory_destroy(raw.as_ptr()) }
    }
}

fn factory_from_config(config: HintConfig) -> FfiResult<*mut FfiHintFactory, *mut FfiError> {
    match config.build_hint() {
        Ok(_) => FfiResult::ok(Box::into_raw(Box::new(FfiHintFactory { config }))),
        Err(err) => FfiResult::err(FfiError::from(err).into_raw()),
    }
}

fn limit(max_pdu_length: usize) -> Option<usize> {
    (max_pdu_length != 0).then_some(max_pdu_length)
}

/// Create a hint factory for one of the fixed RDP wire formats.
///
/// `format` is an [`FfiWireFormat`] discriminant; `max_pdu_length` of `0`
/// selects the default limit, [`MAX_PDU_LENGTH`](crate::hint::MAX_PDU_LENGTH).
#[unsafe(no_mangle)]
pub extern "C" fn rdpframe_hint_factory_new(
    format: u32,
    max_pdu_length: usize,
) -> FfiResult<*mut FfiHintFactory, *mut FfiError> {
    let Some(format) = FfiWireFormat::from_raw(format) else {
        return FfiResult::err(
            FfiError::invalid_argument(format!("unknown wire format {format}")).into_raw(),
        );
    };
    let mut config = HintConfig::new(format.into());
    if let Some(max) = limit(max_pdu_length) {
        config = config.with_max_pdu_length(max);
    }
    factory_from_config(config)
}

/// Create a hint factory for payloads behind an integer length prefix.
///
/// `width` must be `1`, `2`, `4`, or `8`; `max_pdu_length` of `0` selects
/// the default limit.
#[unsafe(no_mangle)]
pub extern "C" fn rdpframe_hint_factory_new_length_prefixed(
    width: usize,
    little_endian: bool,
    max_pdu_length: usize,
) -> FfiResult<*mut FfiHintFactory, *mut FfiError> {
    let endianness = if little_endian {
        Endianness::Little
    } else {
        Endianness::Big
    };
    let mut config = HintConfig::new(WireFormat::LengthPrefixed { width, endianness });
    if let Some(max) = limit(max_pdu_length) {
        config = config.with_max_pdu_length(max);
    }
    factory_from_config(config)
}

/// Build a fresh PDU hint owned by the caller. Returns null if `factory` is
/// null.
///
/// # Safety
///
/// `factory` must be null or a live factory.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rdpframe_hint_factory_build_pdu_hint(
    factory: *const FfiHintFactory,
) -> *mut FfiPduHint {
    // SAFETY: forwarded from the caller.
    let Some(factory) = (unsafe { factory.as_ref() }) else {
        return std::ptr::null_mut();
    };
    match factory.config.build_hint() {
        Ok(hint) => Box::into_raw(Box::new(FfiPduHint { hint })),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Free a hint factory. Null is ignored.
///
/// # Safety
///
/// `factory` must be null or a pointer returned by this library that has
/// not been destroyed yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rdpframe_hint_factory_destroy(factory: *mut FfiHintFactory) {
    if !factory.is_null() {
        // SAFETY: allocated by `factory_from_config`.
        drop(unsafe { Box::from_raw(factory) });
    }
}

/// Evaluate `hint` against `len` bytes at `bytes`.
///
/// The success branch holds no length while more bytes are required, and
/// the total PDU length once it is known. Malformed headers and invalid
/// arguments produce an error descriptor.
///
/// # Safety
///
/// `hint` must be null or a live hint; `bytes` must be valid for reads of
/// `len` bytes, or null when `len` is `0`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rdpframe_pdu_hint_find_size(
    hint: *const FfiPduHint,
    bytes: *const u8,
    len: usize,
) -> FfiResult<OptionalUsize, *mut FfiError> {
    // SAFETY: forwarded from the caller.
    let Some(hint) = (unsafe { hint.as_ref() }) else {
        return FfiResult::err(FfiError::invalid_argument("null PduHint").into_raw());
    };
    let bytes = match (bytes.is_null(), len) {
        (true, 0) => &[][..],
        (true, _) => {
            return FfiResult::err(
                FfiError::invalid_argument("null byte buffer with non-zero length").into_raw(),
            );
        }
        // SAFETY: the caller guarantees `len` readable bytes.
        (false, _) => unsafe { slice::from_raw_parts(bytes, len) },
    };
    match hint.hint.find_size(bytes) {
        Ok(outcome) => FfiResult::ok(outcome.into()),
        Err(err) => FfiResult::err(FfiError::from(err).into_raw()),
    }
}

/// Free a PDU hint. Null is ignored.
///
/// # Safety
///
/// `hint` must be null or a pointer returned by this library that has not
/// been destroyed yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rdpframe_pdu_hint_destroy(hint: *mut FfiPduHint) {
    if !hint.is_null() {
        // SAFETY: allocated by `rdpframe_hint_factory_build_pdu_hint`.
        drop(unsafe { Box::from_raw(hint) });
    }
}
