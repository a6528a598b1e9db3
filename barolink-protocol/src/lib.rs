//! Barolink telemetry link
//!
//! The sensor node sends each compensated temperature to the display node
//! as a single datagram over a connectionless peer radio:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ ASCII decimal, 2 fraction    │   e.g. "25.08"
//! │ digits, 1–250 bytes          │
//! └──────────────────────────────┘
//! ```
//!
//! There is no extra framing; the radio's datagram boundary delimits the
//! message. Peers are addressed by their 6-byte physical address on a fixed
//! channel shared by both nodes.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod link;
pub mod payload;
pub mod peer;

pub use link::{Datagram, LinkError, LinkInit, PeerRegistration, SendOutcome, TelemetryLink};
pub use payload::{decode_temperature, encode_temperature, PayloadError, TemperaturePayload, MAX_PAYLOAD_SIZE};
pub use peer::{PeerAddress, PeerError};
