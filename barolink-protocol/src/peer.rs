//! Peer addressing

use core::fmt;

use barolink_hal::{MacAddress, BROADCAST_MAC};

/// Length of a physical peer address
pub const PEER_ADDRESS_LEN: usize = 6;

/// Errors constructing a peer address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeerError {
    /// Address was not exactly six bytes
    InvalidLength(usize),
    /// Text form contained a non-hex character
    InvalidHex,
}

/// Validated 6-byte physical address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeerAddress(MacAddress);

impl PeerAddress {
    pub const BROADCAST: PeerAddress = PeerAddress(BROADCAST_MAC);

    pub const fn new(bytes: MacAddress) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &MacAddress {
        &self.0
    }

    /// Check for the all-ones broadcast sentinel
    pub fn is_broadcast(&self) -> bool {
        self.0 == BROADCAST_MAC
    }

    /// Parse twelve hex digits, optionally separated by `:` or `-`
    pub fn parse_hex(text: &str) -> Result<Self, PeerError> {
        let mut bytes = [0u8; PEER_ADDRESS_LEN];
        let mut nibbles = 0usize;

        for c in text.chars().filter(|c| *c != ':' && *c != '-') {
            let value = c.to_digit(16).ok_or(PeerError::InvalidHex)? as u8;
            if nibbles >= PEER_ADDRESS_LEN * 2 {
                return Err(PeerError::InvalidLength(nibbles / 2 + 1));
            }
            bytes[nibbles / 2] = (bytes[nibbles / 2] << 4) | value;
            nibbles += 1;
        }

        if nibbles != PEER_ADDRESS_LEN * 2 {
            return Err(PeerError::InvalidLength(nibbles / 2));
        }
        Ok(Self(bytes))
    }
}

impl From<MacAddress> for PeerAddress {
    fn from(bytes: MacAddress) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for PeerAddress {
    type Error = PeerError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let array: MacAddress = bytes
            .try_into()
            .map_err(|_| PeerError::InvalidLength(bytes.len()))?;
        Ok(Self(array))
    }
}

impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}
