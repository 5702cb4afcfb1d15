//! Canonical error and result types for the managed side of the binding.
//!
//! Errors fall into two groups. Wrapper errors ([`Error::Disposed`],
//! [`Error::NullHandle`]) are detected locally and never reach native code.
//! Native errors ([`Error::Native`]) carry the descriptor the native layer
//! returned, still owned so it is destroyed through the usual handle
//! lifecycle.

use thiserror::Error;

use crate::binding::NativeError;

/// Top-level error type for operations on native handles.
#[derive(Debug, Error)]
pub enum Error {
    /// The handle was disposed before the operation was invoked.
    #[error("{type_name} has been disposed")]
    Disposed {
        /// Native type the handle wrapped.
        type_name: &'static str,
    },

    /// A native constructor or factory returned a null pointer.
    #[error("native layer returned a null {type_name}")]
    NullHandle {
        /// Native type that was expected.
        type_name: &'static str,
    },

    /// The native layer reported a failure.
    #[error(transparent)]
    Native(#[from] NativeError),
}

impl Error {
    /// Returns true if this error came from using a disposed handle.
    #[must_use]
    pub fn is_disposed(&self) -> bool { matches!(self, Self::Disposed { .. }) }

    /// The native error descriptor, if the native layer reported one.
    #[must_use]
    pub fn as_native(&self) -> Option<&NativeError> {
        match self {
            Self::Native(err) => Some(err),
            _ => None,
        }
    }
}

/// Canonical result alias used by `rdpframe` handle APIs.
pub type Result<T> = std::result::Result<T, Error>;
