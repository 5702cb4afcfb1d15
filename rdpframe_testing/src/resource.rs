//! A native resource that counts its own destruction.

use std::{
    ptr::NonNull,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use rdpframe::{Handle, NativeResource, Result};

/// Counters shared between a test and the [`CountingResource`]s it creates.
#[derive(Debug, Default)]
pub struct ResourceCounters {
    destroyed: AtomicUsize,
    calls: AtomicUsize,
}

impl ResourceCounters {
    /// Shared counters starting at zero.
    #[must_use]
    pub fn new() -> Arc<Self> { Arc::new(Self::default()) }

    /// Number of times a resource tied to these counters was destroyed.
    #[must_use]
    pub fn destroyed(&self) -> usize { self.destroyed.load(Ordering::SeqCst) }

    /// Number of native operations that reached a live resource.
    #[must_use]
    pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }

    /// Allocate an unowned resource, as a native constructor would.
    #[must_use]
    pub fn allocate(self: &Arc<Self>) -> *mut CountingResource {
        Box::into_raw(Box::new(CountingResource {
            counters: Arc::clone(self),
        }))
    }

    /// Allocate a resource and hand it straight to a [`Handle`].
    ///
    /// # Panics
    ///
    /// Never in practice: a boxed allocation is not null.
    #[must_use]
    pub fn handle(self: &Arc<Self>) -> Handle<CountingResource> {
        // SAFETY: fresh allocation owned by nothing else.
        unsafe { Handle::from_ptr(self.allocate()) }.expect("allocation is non-null")
    }
}

/// Stand-in for an opaque native object.
#[derive(Debug)]
pub struct CountingResource {
    counters: Arc<ResourceCounters>,
}

// SAFETY: `destroy` frees a `Box<CountingResource>`, which is `Send`.
unsafe impl NativeResource for CountingResource {
    const TYPE_NAME: &'static str = "CountingResource";

    unsafe fn destroy(raw: NonNull<Self>) {
        // SAFETY: allocated by `ResourceCounters::allocate`.
        let resource = unsafe { Box::from_raw(raw.as_ptr()) };
        resource.counters.destroyed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Invoke a native operation on `handle`, returning the running call count.
///
/// # Errors
///
/// Returns [`rdpframe::Error::Disposed`] once `handle` has been disposed.
pub fn invoke(handle: &Handle<CountingResource>) -> Result<usize> {
    handle.with_raw(|raw| {
        // SAFETY: `with_raw` only yields live pointers.
        let resource = unsafe { raw.as_ref() };
        Ok(resource.counters.calls.fetch_add(1, Ordering::SeqCst) + 1)
    })
}
