//! Exclusive ownership of native objects across the FFI boundary.
//!
//! A [`Handle<R>`] owns one native object of type `R` and guarantees its
//! native destructor runs exactly once: either when [`Handle::dispose`] is
//! called or, failing that, when the handle is dropped. After disposal the
//! handle keeps a sentinel instead of the pointer, so every further
//! operation fails with [`Error::Disposed`] without touching native code.
//!
//! One generic wrapper serves every native type; each type only has to
//! describe its destructor through [`NativeResource`].

use std::{fmt, marker::PhantomData, ptr::NonNull};

use tracing::debug;

use crate::error::{Error, Result};

/// Contract implemented by every opaque native type owned through a
/// [`Handle`].
///
/// # Safety
///
/// Implementors must guarantee that:
/// - [`destroy`](Self::destroy) frees the object behind a pointer previously produced by the
///   matching native constructor or factory, and nothing else.
/// - [`destroy`](Self::destroy) may be called from any thread. Drops can happen on whichever thread
///   last owned the handle.
pub unsafe trait NativeResource {
    /// Type name reported in errors and logs.
    const TYPE_NAME: &'static str;

    /// Native destructor.
    ///
    /// # Safety
    ///
    /// `raw` must be a live pointer produced by the native layer and must not
    /// be used again after this call.
    unsafe fn destroy(raw: NonNull<Self>);
}

/// How a handle's native object came to be destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Release {
    Dispose,
    Drop,
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dispose => "dispose",
            Self::Drop => "drop",
        })
    }
}

/// Single-owner proxy over one native object.
///
/// `Handle` is move-only. It is `Send`, since native destructors must be
/// callable from any thread, but not `Sync`: concurrent operations on one
/// handle need external synchronisation.
pub struct Handle<R: NativeResource> {
    raw: Option<NonNull<R>>,
    _owns: PhantomData<R>,
}

// SAFETY: `NativeResource` requires `destroy` to be callable from any thread,
// and `Handle` hands out the pointer only through `&self`/`&mut self`
// borrows, so moving the sole owner between threads is sound.
unsafe impl<R: NativeResource> Send for Handle<R> {}

impl<R: NativeResource> Handle<R> {
    /// Take ownership of a native object.
    ///
    /// # Safety
    ///
    /// `raw` must come from the native layer, must be live, and must not be
    /// owned by any other live `Handle`. Two handles over one pointer cause a
    /// double free.
    #[must_use]
    pub unsafe fn from_raw(raw: NonNull<R>) -> Self {
        Self {
            raw: Some(raw),
            _owns: PhantomData,
        }
    }

    /// Take ownership of a possibly-null native pointer.
    ///
    /// Returns `None` for a null pointer.
    ///
    /// # Safety
    ///
    /// Same contract as [`from_raw`](Self::from_raw) for non-null pointers.
    #[must_use]
    pub unsafe fn from_ptr(ptr: *mut R) -> Option<Self> {
        // SAFETY: forwarded to the caller.
        NonNull::new(ptr).map(|raw| unsafe { Self::from_raw(raw) })
    }

    /// Run `op` against the live native pointer.
    ///
    /// This is the single entry point through which native operations are
    /// invoked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Disposed`] without calling `op` once the handle has
    /// been disposed, otherwise whatever `op` returns.
    pub fn with_raw<T>(&self, op: impl FnOnce(NonNull<R>) -> Result<T>) -> Result<T> {
        let raw = self.raw.ok_or(Error::Disposed {
            type_name: R::TYPE_NAME,
        })?;
        op(raw)
    }

    /// Build a new owned native object from this one.
    ///
    /// `ctor` is the native factory entry point. Its return value is wrapped
    /// before this method returns, so the child pointer is never observable
    /// unowned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Disposed`] if this handle has been disposed and
    /// [`Error::NullHandle`] if the factory returned null.
    ///
    /// # Safety
    ///
    /// `ctor` must return either null or a fresh pointer that nothing else
    /// owns.
    pub unsafe fn build_child<C: NativeResource>(
        &self,
        ctor: impl FnOnce(NonNull<R>) -> *mut C,
    ) -> Result<Handle<C>> {
        self.with_raw(|raw| {
            // SAFETY: `ctor` yields an unowned pointer per the caller contract.
            unsafe { Handle::from_ptr(ctor(raw)) }.ok_or_else(|| {
                tracing::warn!(
                    parent = R::TYPE_NAME,
                    child = C::TYPE_NAME,
                    "native factory returned null"
                );
                Error::NullHandle {
                    type_name: C::TYPE_NAME,
                }
            })
        })
    }

    /// Borrow the raw pointer for interop without transferring ownership.
    ///
    /// Returns `None` after disposal. Callers must not destroy the pointer.
    #[must_use]
    pub fn as_raw(&self) -> Option<NonNull<R>> { self.raw }

    /// Give up ownership, returning the raw pointer without destroying it.
    ///
    /// Returns `None` if the handle was already disposed.
    #[must_use]
    pub fn into_raw(mut self) -> Option<NonNull<R>> { self.raw.take() }

    /// Returns true once the native object has been destroyed.
    #[must_use]
    pub fn is_disposed(&self) -> bool { self.raw.is_none() }

    /// Destroy the native object now.
    ///
    /// Idempotent: later calls, and the eventual drop, do nothing.
    pub fn dispose(&mut self) { self.release(Release::Dispose); }

    fn release(&mut self, how: Release) {
        let Some(raw) = self.raw.take() else {
            return;
        };
        // SAFETY: `raw` was owned exclusively by this handle and the sentinel
        // is already in place, so it cannot be destroyed twice.
        unsafe { R::destroy(raw) };
        debug!(
            resource = R::TYPE_NAME,
            via = %how,
            "native handle destroyed"
        );
    }
}

impl<R: NativeResource> Drop for Handle<R> {
    fn drop(&mut self) { self.release(Release::Drop); }
}

impl<R: NativeResource> fmt::Debug for Handle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("type", &R::TYPE_NAME)
            .field("raw", &self.raw)
            .finish()
    }
}
