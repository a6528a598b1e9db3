//! Radio link configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Peer the sender targets when none is configured explicitly
pub const DEFAULT_PEER: [u8; 6] = [0x0C, 0x4E, 0xA0, 0x63, 0x1A, 0x1C];

/// Peer-to-peer radio settings shared by both nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkConfig {
    /// Fixed radio channel; both nodes must agree
    pub channel: u8,
    /// Peer registered at init and targeted by sends
    pub peer: Option<[u8; 6]>,
    /// Additional send attempts after the first failure
    pub retries: u8,
    /// Encrypt peer traffic (unsupported, always false in practice)
    pub encrypt: bool,
}

impl LinkConfig {
    /// Sender side: targets the default display node
    pub const fn sender() -> Self {
        Self {
            channel: 1,
            peer: Some(DEFAULT_PEER),
            retries: 1,
            encrypt: false,
        }
    }

    /// Receiver side: listens only, registers no peer
    pub const fn receiver() -> Self {
        Self {
            channel: 1,
            peer: None,
            retries: 1,
            encrypt: false,
        }
    }

    /// Replace the peer address
    pub const fn with_peer(mut self, peer: [u8; 6]) -> Self {
        self.peer = Some(peer);
        self
    }

    /// Replace the channel
    pub const fn with_channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self::sender()
    }
}
