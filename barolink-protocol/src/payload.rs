//! Temperature payload codec
//!
//! A payload is the temperature as ASCII decimal text with a fixed number of
//! fraction digits and nothing else.

use core::fmt::Write;

use heapless::String;

/// Largest datagram the radio carries
pub const MAX_PAYLOAD_SIZE: usize = 250;

/// Longest formatted temperature we produce
pub const MAX_TEXT_LEN: usize = 32;

/// Formatted temperature ready to transmit
pub type TemperaturePayload = String<MAX_TEXT_LEN>;

/// Errors encoding or decoding a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PayloadError {
    /// Formatted value does not fit the payload buffer
    TooLong,
    /// Datagram had no bytes
    Empty,
    /// Datagram was not valid UTF-8
    NotUtf8,
    /// Text did not parse as a number
    NotANumber,
}

/// Format a temperature with `decimals` fraction digits
pub fn encode_temperature(value: f64, decimals: u8) -> Result<TemperaturePayload, PayloadError> {
    let mut text = TemperaturePayload::new();
    write!(text, "{:.*}", decimals as usize, value).map_err(|_| PayloadError::TooLong)?;
    Ok(text)
}

/// Parse a received payload back into a temperature
///
/// Surrounding whitespace is ignored.
pub fn decode_temperature(bytes: &[u8]) -> Result<f64, PayloadError> {
    if bytes.is_empty() {
        return Err(PayloadError::Empty);
    }
    let text = core::str::from_utf8(bytes).map_err(|_| PayloadError::NotUtf8)?;
    text.trim().parse::<f64>().map_err(|_| PayloadError::NotANumber)
}
