//! SSD1306-style panel engine
//!
//! Composes a [`Framebuffer`] with a [`PanelTransport`]. Rendering happens
//! in the framebuffer; only [`DisplayEngine::show`] and the control
//! commands reach the wire.

use embedded_graphics::pixelcolor::BinaryColor;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::DisplayError;
use crate::framebuffer::Framebuffer;
use crate::transport::PanelTransport;

/// Panel commands
mod cmd {
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_ENTIRE_ON: u8 = 0xA4;
    pub const SET_NORM_INV: u8 = 0xA6;
    pub const SET_DISP: u8 = 0xAE;
    pub const SET_MEM_ADDR: u8 = 0x20;
    pub const SET_DISP_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA0;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_COM_OUT_DIR: u8 = 0xC0;
    pub const SET_DISP_OFFSET: u8 = 0xD3;
    pub const SET_COM_PIN_CFG: u8 = 0xDA;
    pub const SET_DISP_CLK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_VCOM_DESEL: u8 = 0xDB;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Bytes in the init sequence
pub const INIT_LEN: usize = 25;

/// Panel geometry and bring-up settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    pub width: u16,
    pub height: u16,
    /// 7-bit I2C address
    pub address: u8,
    /// Contrast applied by the init sequence
    pub contrast: u8,
    /// Panel powered from an external VCC instead of the charge pump
    pub external_vcc: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 64,
            address: 0x3C,
            contrast: 0xFF,
            external_vcc: false,
        }
    }
}

impl PanelConfig {
    /// Ordered command bytes issued before first use
    pub fn init_sequence(&self) -> [u8; INIT_LEN] {
        let (precharge, charge_pump) = if self.external_vcc {
            (0x22, 0x10)
        } else {
            (0xF1, 0x14)
        };
        [
            cmd::SET_DISP,
            cmd::SET_MEM_ADDR,
            0x00,
            cmd::SET_DISP_START_LINE,
            cmd::SET_SEG_REMAP | 0x01,
            cmd::SET_MUX_RATIO,
            (self.height.saturating_sub(1)) as u8,
            cmd::SET_COM_OUT_DIR | 0x08,
            cmd::SET_DISP_OFFSET,
            0x00,
            cmd::SET_COM_PIN_CFG,
            0x12,
            cmd::SET_DISP_CLK_DIV,
            0x80,
            cmd::SET_PRECHARGE,
            precharge,
            cmd::SET_VCOM_DESEL,
            0x30,
            cmd::SET_CONTRAST,
            self.contrast,
            cmd::SET_ENTIRE_ON,
            cmd::SET_NORM_INV,
            cmd::SET_CHARGE_PUMP,
            charge_pump,
            cmd::SET_DISP | 0x01,
        ]
    }
}

/// Framebuffer plus the transport that carries it to the panel
pub struct DisplayEngine<T> {
    transport: T,
    config: PanelConfig,
    framebuffer: Framebuffer,
}

impl<T: PanelTransport> DisplayEngine<T> {
    /// Create an engine without touching the wire
    pub fn new(transport: T, config: PanelConfig) -> Result<Self, DisplayError<T::Error>> {
        let framebuffer =
            Framebuffer::new(config.width, config.height).map_err(DisplayError::InvalidDimensions)?;
        Ok(Self {
            transport,
            config,
            framebuffer,
        })
    }

    /// Create an engine and bring the panel up
    ///
    /// Powers on, runs the init sequence, then clears and shows a blank
    /// frame.
    pub fn bring_up(transport: T, config: PanelConfig) -> Result<Self, DisplayError<T::Error>> {
        let mut engine = Self::new(transport, config)?;
        engine.power_on()?;
        engine.init()?;
        engine.framebuffer.fill(BinaryColor::Off);
        engine.show()?;
        Ok(engine)
    }

    /// Issue the init sequence
    pub fn init(&mut self) -> Result<(), DisplayError<T::Error>> {
        for command in self.config.init_sequence() {
            self.transport.write_command(command)?;
        }
        Ok(())
    }

    /// Transfer the whole framebuffer
    pub fn show(&mut self) -> Result<(), DisplayError<T::Error>> {
        let frame = self.framebuffer.transfer();
        self.transport.write_frame(frame)?;
        Ok(())
    }

    pub fn power_off(&mut self) -> Result<(), DisplayError<T::Error>> {
        self.transport.write_command(cmd::SET_DISP)?;
        Ok(())
    }

    pub fn power_on(&mut self) -> Result<(), DisplayError<T::Error>> {
        self.transport.write_command(cmd::SET_DISP | 0x01)?;
        Ok(())
    }

    pub fn contrast(&mut self, level: u8) -> Result<(), DisplayError<T::Error>> {
        self.transport.write_command(cmd::SET_CONTRAST)?;
        self.transport.write_command(level)?;
        Ok(())
    }

    pub fn invert(&mut self, invert: bool) -> Result<(), DisplayError<T::Error>> {
        self.transport
            .write_command(cmd::SET_NORM_INV | invert as u8)?;
        Ok(())
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    /// Release the transport
    pub fn release(self) -> T {
        self.transport
    }
}
