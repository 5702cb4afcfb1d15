//! Test utilities for `rdpframe`.
//!
//! - [`ResourceCounters`] and [`CountingResource`] stand in for a native
//!   object so handle lifecycles can be observed.
//! - [`pdu`] builds well-formed PDUs for each wire format.
//! - [`logger`] captures log records emitted through the `tracing` log
//!   bridge.
//!
//! ```rust
//! use rdpframe_testing::{ResourceCounters, invoke};
//!
//! let counters = ResourceCounters::new();
//! let mut handle = counters.handle();
//! assert_eq!(invoke(&handle).unwrap(), 1);
//! handle.dispose();
//! assert!(invoke(&handle).is_err());
//! assert_eq!(counters.destroyed(), 1);
//! ```

mod logging;
pub mod pdu;
mod resource;

pub use logging::{LoggerHandle, logger};
pub use resource::{CountingResource, ResourceCounters, invoke};
