//! Barolink Hardware Abstraction Layer
//!
//! This crate defines the collaborator traits the telemetry nodes call into.
//! Board crates implement them on top of their chip HAL; the core logic in
//! the other workspace crates only ever sees these traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  barolink-node (sender / receiver)      │
//! └─────────────────────────────────────────┘
//!          │                │
//!          ▼                ▼
//! ┌─────────────────┐ ┌─────────────────────┐
//! │ drivers/display │ │ protocol (link)     │
//! └─────────────────┘ └─────────────────────┘
//!          │                │
//!          ▼                ▼
//! ┌─────────────────────────────────────────┐
//! │  barolink-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - Register-based serial bus (sensor and panel)
//! - [`radio::Radio`] - Connectionless peer radio primitives
//! - [`time::TickSource`] - Monotonic, wrapping millisecond counter
//!
//! Blocking delays use [`embedded_hal::delay::DelayNs`] directly.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod i2c;
pub mod radio;
pub mod time;

// Re-export key traits at crate root for convenience
pub use i2c::{EmbeddedHalBus, I2cBus};
pub use radio::{MacAddress, Radio, BROADCAST_MAC};
pub use time::TickSource;
#[cfg(feature = "embassy")]
pub use time::EmbassyTicks;
