//! Board-agnostic core logic for the Barolink telemetry nodes
//!
//! This crate contains everything that does not depend on a specific
//! sensor, radio, or panel implementation:
//!
//! - Wraparound-safe tick arithmetic
//! - Immutable configuration structures (register map, link, node timing)
//! - Sender state machine and receiver display state
//! - Sensor trait and reading types

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod state;
pub mod ticks;
pub mod traits;
