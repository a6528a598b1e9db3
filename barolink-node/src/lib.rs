//! Barolink node loops
//!
//! Two thin orchestrators wire the driver, link and display crates
//! together:
//!
//! - [`SenderNode`]: discover → calibrate → configure → sample forever,
//!   sending each temperature as fixed-precision text
//! - [`ReceiverNode`]: poll the radio, redraw on receive and on schedule,
//!   and periodically dump the framebuffer
//!
//! Both loops are single-threaded and cooperative. Per-iteration failures
//! are logged and the loop carries on; only startup failures are returned.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod error;
pub mod receiver;
pub mod sender;

#[cfg(test)]
mod testing;

pub use error::{SampleError, StartupError};
pub use receiver::{PassReport, ReceiverNode, ReceiverSetup};
pub use sender::{SampleReport, SenderNode, SenderSetup};
