//! Framebuffer hex dump
//!
//! Text protocol for capturing the panel contents off-device:
//!
//! ```text
//! DISPLAY_DUMP_START 128x64
//! PAGE 0: 0000...00
//! ...
//! PAGE 7: 0000...00
//! DISPLAY_DUMP_END
//! ```
//!
//! Each page line carries `width` bytes as lowercase hex. The control byte
//! is not part of the dump.

use core::fmt::{self, Write};

use crate::framebuffer::Framebuffer;

pub const DUMP_START: &str = "DISPLAY_DUMP_START";
pub const DUMP_END: &str = "DISPLAY_DUMP_END";

/// Write one page line, without the trailing newline
pub fn write_page<W: Write>(fb: &Framebuffer, page: usize, out: &mut W) -> fmt::Result {
    let Some(bytes) = fb.page(page) else {
        return Ok(());
    };
    write!(out, "PAGE {page}: ")?;
    for byte in bytes {
        write!(out, "{byte:02x}")?;
    }
    Ok(())
}

/// Write the whole dump, one line per page, each line newline-terminated
pub fn write_dump<W: Write>(fb: &Framebuffer, out: &mut W) -> fmt::Result {
    writeln!(out, "{DUMP_START} {}x{}", fb.width(), fb.height())?;
    for page in 0..fb.pages() {
        write_page(fb, page, out)?;
        out.write_char('\n')?;
    }
    writeln!(out, "{DUMP_END}")
}
