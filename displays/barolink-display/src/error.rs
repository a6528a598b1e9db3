//! Display errors

/// Requested panel size the framebuffer cannot hold
///
/// Width must be 1..=128 and height a whole number of 8-pixel pages up to 64.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidDimensions {
    pub width: u16,
    pub height: u16,
}

/// Display engine errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError<E> {
    /// Transport to the panel failed
    Transport(E),
    /// Panel size not supported by the framebuffer
    InvalidDimensions(InvalidDimensions),
}

impl<E> From<E> for DisplayError<E> {
    fn from(e: E) -> Self {
        DisplayError::Transport(e)
    }
}
