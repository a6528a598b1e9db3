//! Telemetry link over a connectionless peer radio
//!
//! Sender side: validated sends with a bounded retry. Receiver side:
//! non-blocking poll for one pending datagram.

use heapless::Vec;

use barolink_core::config::LinkConfig;
use barolink_hal::Radio;

use crate::payload::MAX_PAYLOAD_SIZE;
use crate::peer::PeerAddress;

/// Errors bringing up or polling the radio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError<E> {
    /// Underlying radio call failed
    Radio(E),
    /// Radio reported a datagram longer than the receive buffer
    Oversized(usize),
}

impl<E> From<E> for LinkError<E> {
    fn from(e: E) -> Self {
        LinkError::Radio(e)
    }
}

/// What happened to the configured peer during initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeerRegistration {
    /// Peer registered on the link channel
    Registered(PeerAddress),
    /// Peer is the broadcast address; no registration needed
    SkippedBroadcast,
    /// No peer configured (listen-only node)
    NotConfigured,
    /// Registration failed; the link is still usable for receiving
    Failed(PeerAddress),
}

/// Report of a completed initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkInit {
    pub channel: u8,
    pub peer: PeerRegistration,
}

/// Result of one send call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendOutcome {
    /// Transmitted; `attempts` counts the successful try
    Delivered { attempts: u8 },
    /// Peer address missing or not six bytes; nothing transmitted
    InvalidPeer,
    /// Every attempt failed; the datagram is dropped
    Failed { attempts: u8 },
}

impl SendOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, SendOutcome::Delivered { .. })
    }
}

/// One received datagram
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Datagram {
    pub sender: PeerAddress,
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

/// Telemetry link bound to one radio
pub struct TelemetryLink<R> {
    radio: R,
    config: LinkConfig,
}

impl<R: Radio> TelemetryLink<R> {
    /// Bring the radio up on the configured channel
    ///
    /// Station and protocol activation failures are returned. A failed peer
    /// registration is not: it is reported in [`LinkInit::peer`] and the
    /// link is returned anyway.
    pub fn initialize(
        mut radio: R,
        config: LinkConfig,
    ) -> Result<(Self, LinkInit), LinkError<R::Error>> {
        radio.start_station(config.channel)?;
        radio.enable_peer_protocol()?;

        let peer = match config.peer.map(PeerAddress::new) {
            None => PeerRegistration::NotConfigured,
            Some(peer) if peer.is_broadcast() => PeerRegistration::SkippedBroadcast,
            Some(peer) => match radio.add_peer(peer.as_bytes(), config.channel, config.encrypt) {
                Ok(()) => PeerRegistration::Registered(peer),
                Err(_) => PeerRegistration::Failed(peer),
            },
        };

        let init = LinkInit {
            channel: config.channel,
            peer,
        };
        Ok((Self { radio, config }, init))
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Send `payload` to `peer`, retrying up to the configured count
    ///
    /// A peer that is absent or not exactly six bytes is rejected before
    /// any transmission.
    pub fn try_send(&mut self, peer: Option<&[u8]>, payload: &[u8]) -> SendOutcome {
        let Some(peer) = peer.and_then(|p| PeerAddress::try_from(p).ok()) else {
            return SendOutcome::InvalidPeer;
        };

        let max_attempts = self.config.retries.saturating_add(1);
        for attempt in 1..=max_attempts {
            if self.radio.send(peer.as_bytes(), payload).is_ok() {
                return SendOutcome::Delivered { attempts: attempt };
            }
        }
        SendOutcome::Failed {
            attempts: max_attempts,
        }
    }

    /// Boolean form of [`try_send`](Self::try_send)
    pub fn send(&mut self, peer: Option<&[u8]>, payload: &[u8]) -> bool {
        self.try_send(peer, payload).is_delivered()
    }

    /// Send to the peer from the link configuration
    pub fn send_to_peer(&mut self, payload: &[u8]) -> SendOutcome {
        let peer = self.config.peer;
        self.try_send(peer.as_ref().map(|p| &p[..]), payload)
    }

    /// Check for one pending datagram without blocking
    pub fn poll(&mut self) -> Result<Option<Datagram>, LinkError<R::Error>> {
        let mut buf = [0u8; MAX_PAYLOAD_SIZE];
        let Some((sender, len)) = self.radio.try_receive(&mut buf)? else {
            return Ok(None);
        };

        let bytes = buf.get(..len).ok_or(LinkError::Oversized(len))?;
        let mut payload = Vec::new();
        payload
            .extend_from_slice(bytes)
            .map_err(|_| LinkError::Oversized(len))?;

        Ok(Some(Datagram {
            sender: PeerAddress::new(sender),
            payload,
        }))
    }

    /// Release the radio
    pub fn release(self) -> R {
        self.radio
    }
}
