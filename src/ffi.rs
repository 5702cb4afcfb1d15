//! Native entry points.
//!
//! This is the C ABI surface a managed runtime links against. Every object
//! crossing it is heap-allocated on this side and handed out as an opaque
//! pointer; each type has exactly one `*_destroy` entry point that frees it.
//! Fallible entry points return an [`FfiResult`] whose error branch carries
//! an owned [`FfiError`] descriptor the caller must destroy in turn.
//!
//! Rust callers should not use these functions directly: the owned wrappers
//! in [`crate::binding`] pair every pointer with its destructor.

mod error;
mod hint;
mod result;

pub use error::{
    FfiError,
    FfiErrorKind,
    rdpframe_error_destroy,
    rdpframe_error_kind,
    rdpframe_error_message,
};
pub use hint::{
    FfiHintFactory,
    FfiPduHint,
    FfiWireFormat,
    rdpframe_hint_factory_build_pdu_hint,
    rdpframe_hint_factory_destroy,
    rdpframe_hint_factory_new,
    rdpframe_hint_factory_new_length_prefixed,
    rdpframe_pdu_hint_destroy,
    rdpframe_pdu_hint_find_size,
};
pub use result::{FfiResult, FfiStr, OptionalUsize};

#[cfg(test)]
mod tests;
