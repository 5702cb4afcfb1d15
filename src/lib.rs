#![doc(html_root_url = "https://docs.rs/rdpframe/latest")]
//! Public API for the `rdpframe` library.
//!
//! This crate frames RDP byte streams into self-contained PDUs and exposes
//! that framing across a C ABI. The managed side owns every native object
//! through [`Handle`], which destroys it exactly once whether the caller
//! disposes it explicitly or simply drops it.
//!
//! - [`hint`] answers "how long is the PDU at the front of this buffer?".
//! - [`codec`] turns a hint into a [`tokio_util::codec::Decoder`].
//! - [`ffi`] is the native surface and [`binding`] the owned wrappers over
//!   it.

pub mod binding;
pub mod byte_order;
pub mod codec;
pub mod config;
pub mod error;
pub mod ffi;
pub mod frame;
pub mod handle;
pub mod hint;

pub use binding::{HintFactoryHandle, NativeError, NativeErrorKind, PduHintHandle};
pub use codec::{CodecError, EofError, FramingError, HintDecoder};
pub use config::{HintConfig, WireFormat};
pub use error::Error;
/// Result type alias re-exported for convenience when working with native
/// handles.
pub use error::Result;
pub use handle::{Handle, NativeResource};
pub use hint::{
    FastPathHint,
    LengthPrefixedHint,
    MAX_PDU_LENGTH,
    PduHint,
    PduHintOutcome,
    RailOrderHint,
    RdpHint,
    TpktHint,
};
