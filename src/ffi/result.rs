//! C-compatible result and value types.

use std::{slice, str};

use crate::hint::PduHintOutcome;

#[repr(C)]
#[derive(Clone, Copy)]
union FfiResultValue<T: Copy, E: Copy> {
    ok: T,
    err: E,
}

/// Discriminated success/failure value returned by fallible entry points.
///
/// Exactly one branch is populated, selected by the `is_ok` flag. The
/// payload can only be read through [`into_parts`](Self::into_parts), which
/// checks the flag first.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct FfiResult<T: Copy, E: Copy> {
    value: FfiResultValue<T, E>,
    is_ok: bool,
}

impl<T: Copy, E: Copy> FfiResult<T, E> {
    /// Successful result carrying `value`.
    pub fn ok(value: T) -> Self {
        Self {
            value: FfiResultValue { ok: value },
            is_ok: true,
        }
    }

    /// Failed result carrying `err`.
    pub fn err(err: E) -> Self {
        Self {
            value: FfiResultValue { err },
            is_ok: false,
        }
    }

    /// Returns true if the success branch is populated.
    #[must_use]
    pub fn is_ok(&self) -> bool { self.is_ok }

    /// Split into a Rust result, reading only the branch the discriminant
    /// selects.
    ///
    /// # Safety
    ///
    /// The value must have been built by [`ok`](Self::ok) or
    /// [`err`](Self::err), or by foreign code honouring the same layout.
    pub unsafe fn into_parts(self) -> Result<T, E> {
        if self.is_ok {
            // SAFETY: `is_ok` says the `ok` field was written.
            Ok(unsafe { self.value.ok })
        } else {
            // SAFETY: `is_ok` says the `err` field was written.
            Err(unsafe { self.value.err })
        }
    }
}

/// Optional size: the PDU length hint as it crosses the boundary.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OptionalUsize {
    /// Whether `value` holds a length.
    pub is_some: bool,
    /// Total PDU length; meaningless when `is_some` is false.
    pub value: usize,
}

impl From<PduHintOutcome> for OptionalUsize {
    fn from(outcome: PduHintOutcome) -> Self {
        match outcome {
            PduHintOutcome::Incomplete => Self {
                is_some: false,
                value: 0,
            },
            PduHintOutcome::Complete(value) => Self {
                is_some: true,
                value,
            },
        }
    }
}

impl From<OptionalUsize> for PduHintOutcome {
    fn from(value: OptionalUsize) -> Self {
        if value.is_some {
            Self::Complete(value.value)
        } else {
            Self::Incomplete
        }
    }
}

/// Borrowed UTF-8 string view.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct FfiStr {
    /// First byte of the string.
    pub ptr: *const u8,
    /// Length in bytes.
    pub len: usize,
}

impl FfiStr {
    pub(crate) fn borrowed(value: &str) -> Self {
        Self {
            ptr: value.as_ptr(),
            len: value.len(),
        }
    }

    /// View the bytes as a string slice.
    ///
    /// # Safety
    ///
    /// The view must come from this crate and its owner must outlive `'a`.
    #[must_use]
    pub unsafe fn as_str<'a>(self) -> &'a str {
        if self.ptr.is_null() {
            return "";
        }
        // SAFETY: views are only built from live `&str`s by `borrowed`.
        unsafe { str::from_utf8_unchecked(slice::from_raw_parts(self.ptr, self.len)) }
    }
}
