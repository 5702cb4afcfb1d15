//! Length prefix encodings for generically length-prefixed PDUs.
//!
//! RDP's own headers have fixed layouts handled by the dedicated hints in
//! [`crate::hint`]. Side channels and test harnesses frequently wrap payloads
//! in a plain integer prefix instead; [`LengthFormat`] describes such a
//! prefix.

pub mod conversion;
pub mod format;

pub use conversion::{bytes_to_u64, u64_to_bytes};
pub use format::{Endianness, LengthFormat};
