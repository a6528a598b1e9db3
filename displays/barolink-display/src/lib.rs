//! Display engine for the Barolink display node
//!
//! This crate provides:
//! - [`Framebuffer`]: page-organized 1-bit raster with the panel's data-write
//!   control byte kept in front of the pixel data
//! - 8×8 glyph text, tight bounding-box measurement and integer scaling
//! - [`PanelTransport`] for byte-oriented panels, with an I2C implementation
//! - [`DisplayEngine`] composing a framebuffer with a transport
//! - Auto-scaling layouts for a single numeric reading
//! - A hex dump of the framebuffer for external capture
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   render_value   ┌─────────────┐   show   ┌────────────────┐
//! │ LayoutConfig │ ───────────────► │ Framebuffer │ ───────► │ PanelTransport │
//! └──────────────┘                  └─────────────┘          └────────────────┘
//!                                          │ write_dump
//!                                          ▼
//!                                    fmt::Write sink
//! ```
//!
//! Rendering never touches the bus; only [`DisplayEngine::show`] and the
//! panel control commands do.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod dump;
pub mod error;
pub mod font;
pub mod framebuffer;
pub mod layout;
pub mod panel;
pub mod text;
pub mod transport;

// Re-export key types
pub use dump::write_dump;
pub use error::{DisplayError, InvalidDimensions};
pub use framebuffer::Framebuffer;
pub use layout::{render_value, select_scale, LayoutConfig, LayoutStrategy, Rendered};
pub use panel::{DisplayEngine, PanelConfig};
pub use text::{measure_text, GlyphBounds, ScratchRaster, TextMeasure};
pub use transport::{I2cPanelTransport, PanelTransport};

pub use embedded_graphics::pixelcolor::BinaryColor;
