//! Structured logging facility for filterx
//!
//! - Single initialization point via `init(profile)`
//! - Operation boundary macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for asserting on emitted events
//!
//! # Usage
//!
//! ```rust
//! use filterx_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

use std::time::Instant;

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};

/// Whole milliseconds since `started`, saturating
#[doc(hidden)]
pub fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
