//! Owned wrappers over the native entry points.
//!
//! Each native type is exposed as a [`Handle`] specialisation, so the
//! lifecycle rules live in one place and this module only adds the
//! operations. Every fallible native call goes through
//! [`FfiResult::into_result`], which takes ownership of the error descriptor
//! before surfacing it.
//!
//! ```
//! use rdpframe::{
//!     binding::HintFactoryHandle,
//!     config::{HintConfig, WireFormat},
//!     hint::PduHintOutcome,
//! };
//!
//! let factory = HintFactoryHandle::new(&HintConfig::new(WireFormat::Tpkt))?;
//! let hint = factory.build_pdu_hint()?;
//! assert_eq!(hint.find_size(&[0x03, 0x00])?, PduHintOutcome::Incomplete);
//! assert_eq!(
//!     hint.find_size(&[0x03, 0x00, 0x00, 0x2a])?,
//!     PduHintOutcome::Complete(42)
//! );
//! # Ok::<(), rdpframe::Error>(())
//! ```

use std::{fmt, ptr::NonNull};

use crate::{
    config::{HintConfig, WireFormat},
    error::{Error, Result},
    ffi::{self, FfiError, FfiErrorKind, FfiHintFactory, FfiPduHint, FfiResult, FfiWireFormat},
    frame::Endianness,
    handle::{Handle, NativeResource},
    hint::PduHintOutcome,
};

/// Owned native PDU hint.
pub type PduHintHandle = Handle<FfiPduHint>;

/// Owned native hint factory.
pub type HintFactoryHandle = Handle<FfiHintFactory>;

/// Category of a [`NativeError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NativeErrorKind {
    /// Unclassified failure.
    Generic,
    /// Bytes could not be framed or decoded.
    Decode,
    /// An argument was rejected by the native layer.
    InvalidArgument,
}

impl From<FfiErrorKind> for NativeErrorKind {
    fn from(kind: FfiErrorKind) -> Self {
        match kind {
            FfiErrorKind::Generic => Self::Generic,
            FfiErrorKind::Decode => Self::Decode,
            FfiErrorKind::InvalidArgument => Self::InvalidArgument,
        }
    }
}

/// Error reported by the native layer.
///
/// Owns the native descriptor; dropping the error destroys it.
pub struct NativeError {
    descriptor: Handle<FfiError>,
}

// SAFETY: the descriptor is immutable after creation and only read through
// `&self`, so shared access from several threads cannot race.
unsafe impl Sync for NativeError {}

impl NativeError {
    fn new(descriptor: Handle<FfiError>) -> Self { Self { descriptor } }

    /// Error category.
    #[must_use]
    pub fn kind(&self) -> NativeErrorKind {
        self.descriptor
            .with_raw(|raw| {
                // SAFETY: `raw` is live while the handle is.
                Ok(unsafe { ffi::rdpframe_error_kind(raw.as_ptr()) }.into())
            })
            .unwrap_or(NativeErrorKind::Generic)
    }

    /// Message supplied by the native layer.
    #[must_use]
    pub fn message(&self) -> String {
        self.descriptor
            .with_raw(|raw| {
                // SAFETY: the view stays valid until the descriptor is
                // destroyed, and it is copied before this borrow ends.
                Ok(unsafe { ffi::rdpframe_error_message(raw.as_ptr()).as_str() }.to_owned())
            })
            .unwrap_or_default()
    }

    /// The underlying descriptor handle, for interop.
    #[must_use]
    pub fn descriptor(&self) -> &Handle<FfiError> { &self.descriptor }
}

impl fmt::Debug for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeError")
            .field("kind", &self.kind())
            .field("message", &self.message())
            .finish()
    }
}

impl fmt::Display for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "native {:?} error: {}", self.kind(), self.message())
    }
}

impl std::error::Error for NativeError {}

impl<T: Copy> FfiResult<T, *mut FfiError> {
    /// Translate a native result into the managed error model.
    ///
    /// The discriminant is checked first; on failure the error descriptor is
    /// wrapped in a [`Handle`] before anything else touches it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Native`] carrying the descriptor, or
    /// [`Error::NullHandle`] if the native layer reported failure without
    /// one.
    ///
    /// # Safety
    ///
    /// `self` must come straight from a native entry point and must not have
    /// been translated before, since the error branch transfers ownership.
    pub unsafe fn into_result(self) -> Result<T> {
        // SAFETY: forwarded from the caller.
        match unsafe { self.into_parts() } {
            Ok(value) => Ok(value),
            // SAFETY: the error pointer is fresh and unowned.
            Err(raw) => match unsafe { Handle::from_ptr(raw) } {
                Some(descriptor) => Err(NativeError::new(descriptor).into()),
                None => Err(Error::NullHandle {
                    type_name: FfiError::TYPE_NAME,
                }),
            },
        }
    }
}

/// Take ownership of a pointer returned by a native constructor.
///
/// # Safety
///
/// `ptr` must be null or fresh and unowned.
unsafe fn own<R: NativeResource>(ptr: *mut R) -> Result<Handle<R>> {
    // SAFETY: forwarded from the caller.
    unsafe { Handle::from_ptr(ptr) }.ok_or(Error::NullHandle {
        type_name: R::TYPE_NAME,
    })
}

impl Handle<FfiHintFactory> {
    /// Create a native hint factory for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Native`] if the native layer rejects the
    /// configuration, for example an unsupported prefix width.
    pub fn new(config: &HintConfig) -> Result<Self> {
        let max = config.max_pdu_length.unwrap_or(0);
        let result = match config.format {
            WireFormat::Tpkt => ffi::rdpframe_hint_factory_new(FfiWireFormat::Tpkt as u32, max),
            WireFormat::FastPath => {
                ffi::rdpframe_hint_factory_new(FfiWireFormat::FastPath as u32, max)
            }
            WireFormat::Rdp => ffi::rdpframe_hint_factory_new(FfiWireFormat::Rdp as u32, max),
            WireFormat::RailOrder => {
                ffi::rdpframe_hint_factory_new(FfiWireFormat::RailOrder as u32, max)
            }
            WireFormat::LengthPrefixed { width, endianness } => {
                ffi::rdpframe_hint_factory_new_length_prefixed(
                    width,
                    endianness == Endianness::Little,
                    max,
                )
            }
        };
        // SAFETY: fresh result from a native constructor.
        let raw = unsafe { result.into_result() }?;
        // SAFETY: the success branch carries a fresh, unowned factory.
        unsafe { own(raw) }
    }

    /// Build a new PDU hint owned by the caller.
    ///
    /// The returned handle is independent of the factory: disposing either
    /// leaves the other usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Disposed`] if the factory has been disposed.
    pub fn build_pdu_hint(&self) -> Result<PduHintHandle> {
        let ctor = |raw: NonNull<FfiHintFactory>| {
            // SAFETY: `raw` is the live factory.
            unsafe { ffi::rdpframe_hint_factory_build_pdu_hint(raw.as_ptr()) }
        };
        // SAFETY: the entry point returns a fresh hint or null.
        unsafe { self.build_child(ctor) }
    }
}

impl Handle<FfiPduHint> {
    /// Evaluate the hint against the bytes received so far.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Disposed`] after disposal, without calling into the
    /// native layer, and [`Error::Native`] with
    /// [`NativeErrorKind::Decode`] for malformed headers.
    pub fn find_size(&self, bytes: &[u8]) -> Result<PduHintOutcome> {
        self.with_raw(|raw| {
            // SAFETY: `raw` is live and `bytes` is a valid slice.
            let result = unsafe {
                ffi::rdpframe_pdu_hint_find_size(raw.as_ptr(), bytes.as_ptr(), bytes.len())
            };
            // SAFETY: fresh result from a native entry point.
            unsafe { result.into_result() }.map(PduHintOutcome::from)
        })
    }
}
