//! ST7735 TFT Display Driver
//!
//! Driver for the 0.96" 160x80 RGB565 TFT module, a write-only SPI panel
//! with separate data/command and reset lines.
//!
//! The driver is immediate-mode: there is no framebuffer, every primitive
//! arms a rectangular window in panel memory and streams pixel data into it.
//! Solid fills and glyph rendering stage at most one display row of pixels
//! in a fixed scratch buffer and let the bulk transfer path replay it, so no
//! drawing operation allocates.
//!
//! ### Usage
//!
//! 1. construct the driver with an SPI device, the DC and RST pins, a delay
//!    provider and an [`driver::Orientation`] — construction runs the timed
//!    power-up sequence
//! 2. draw through the primitive and text functions on [`driver::St7735`],
//!    or through `embedded-graphics`, for which the driver is a `DrawTarget`
//!
//! Everything is synchronous and blocking; the panel gives no feedback, so
//! operations only fail if the host SPI or GPIO layer does.

pub mod cmd;
pub mod color;
pub mod driver;
pub mod flag;
pub mod font;
pub mod interface;
pub mod pins;

#[cfg(test)]
pub(crate) mod mock;

/// Display width, pixels horizontally
pub const WIDTH: u16 = 160;

/// Display height, pixels vertically
pub const HEIGHT: u16 = 80;

/// Panel memory column of the first visible pixel. Panel memory is larger
/// than the visible glass; every public x coordinate is shifted by this
/// amount before it reaches a window command. Fixed by the module wiring.
pub const X_OFFSET: u16 = 1;

/// Panel memory row of the first visible pixel.
pub const Y_OFFSET: u16 = 26;

/// Glyph width of the built-in font, pixels
pub const FONT_WIDTH: u16 = 5;

/// Glyph height of the built-in font, pixels
pub const FONT_HEIGHT: u16 = 7;

/// Scratch buffer capacity: one full display row at 16 bits per pixel.
/// Every bulk operation stages strictly no more than this.
pub const ROW_BUFFER_BYTES: usize = (WIDTH as usize) * 2;
