//! Connectionless peer radio abstractions
//!
//! Models a short-range datagram radio (ESP-NOW style): no association or
//! handshake, frames addressed by the peer's 6-byte physical address, and a
//! fixed channel shared by both nodes.

/// Physical peer address
pub type MacAddress = [u8; 6];

/// All-ones broadcast address
///
/// Peers configured with this address are never registered explicitly.
pub const BROADCAST_MAC: MacAddress = [0xFF; 6];

/// Peer radio primitives
///
/// Every call is synchronous and returns before the next poll of the
/// caller's loop.
pub trait Radio {
    /// Error type for radio operations
    type Error;

    /// Activate the station interface on a fixed channel, disconnected
    /// from any access point
    fn start_station(&mut self, channel: u8) -> Result<(), Self::Error>;

    /// Activate the connectionless send/receive protocol
    fn enable_peer_protocol(&mut self) -> Result<(), Self::Error>;

    /// Register a peer for unicast transmission
    ///
    /// # Arguments
    /// * `peer` - Peer physical address
    /// * `channel` - Radio channel the peer listens on
    /// * `encrypt` - Whether frames to this peer are encrypted
    fn add_peer(&mut self, peer: &MacAddress, channel: u8, encrypt: bool)
        -> Result<(), Self::Error>;

    /// Transmit one datagram to `peer`
    fn send(&mut self, peer: &MacAddress, payload: &[u8]) -> Result<(), Self::Error>;

    /// Receive one pending datagram without blocking
    ///
    /// Returns `Ok(Some((sender, len)))` with the payload copied into `buf`,
    /// or `Ok(None)` if nothing is pending.
    fn try_receive(&mut self, buf: &mut [u8]) -> Result<Option<(MacAddress, usize)>, Self::Error>;
}

impl<T: Radio + ?Sized> Radio for &mut T {
    type Error = T::Error;

    fn start_station(&mut self, channel: u8) -> Result<(), Self::Error> {
        T::start_station(self, channel)
    }

    fn enable_peer_protocol(&mut self) -> Result<(), Self::Error> {
        T::enable_peer_protocol(self)
    }

    fn add_peer(
        &mut self,
        peer: &MacAddress,
        channel: u8,
        encrypt: bool,
    ) -> Result<(), Self::Error> {
        T::add_peer(self, peer, channel, encrypt)
    }

    fn send(&mut self, peer: &MacAddress, payload: &[u8]) -> Result<(), Self::Error> {
        T::send(self, peer, payload)
    }

    fn try_receive(&mut self, buf: &mut [u8]) -> Result<Option<(MacAddress, usize)>, Self::Error> {
        T::try_receive(self, buf)
    }
}
