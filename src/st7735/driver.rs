//! ST7735 Display Driver Implementation
//!
//! Immediate-mode driver for the 0.96" 160x80 RGB565 panel: every drawing
//! call writes straight into panel memory through an addressing window, the
//! panel itself is the only store of pixel state.
//!
//! ## Architecture
//!
//! Each primitive computes a target window, renders at most one row or
//! column of pixel data into a reused scratch buffer, and hands the buffer
//! to the bulk transfer path. Solid fills exploit the transfer engine's
//! repeat mode: one row of pixels is streamed `height` times, so a fill
//! costs O(width) buffer work regardless of its height.
//!
//! ### Drawing functions
//! - `draw_pixel()` / `draw_line()` / `draw_rect()` / `fill_rect()`
//! - `draw_bitmap()` - stream a caller-prepared RGB565 image
//!
//! ### Text functions
//! - `set_cursor()` / `set_color()` / `set_background_color()`
//! - `print_char()` / `print()` / `print_number()`
//!
//! Diagonal lines go through the Bresenham rasterizer and emit one window
//! per pixel; that path has no bulk-transfer acceleration and dominates the
//! cost of diagonal drawing.

pub use display_interface::DisplayError;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::Pixel;

use crate::st7735::interface::DisplayInterface;
use crate::st7735::{
    cmd::Cmd, flag::Flag, font, FONT_HEIGHT, FONT_WIDTH, HEIGHT, ROW_BUFFER_BYTES, WIDTH,
    X_OFFSET, Y_OFFSET,
};

/// Wait after releasing reset before the first command.
const RESET_SETTLE_MS: u32 = 50;
/// Wait after Sleep Out, ST7735 datasheet minimum.
const SLPOUT_SETTLE_MS: u32 = 120;

/// Panel orientation, chosen once at construction.
///
/// Maps to the Memory Data Access Control byte sent during init. The fixed
/// panel offsets are calibrated for [`Orientation::Landscape`] on the 0.96"
/// module; other rotations address the same memory but keep the same offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
    PortraitSwapped,
    LandscapeSwapped,
}

impl Orientation {
    /// The MADCTL argument for this rotation. The panel is a BGR part.
    pub fn madctl(self) -> u8 {
        match self {
            Orientation::Portrait => Flag::MADCTL_BGR,
            Orientation::Landscape => Flag::MADCTL_MY | Flag::MADCTL_MV | Flag::MADCTL_BGR,
            Orientation::PortraitSwapped => Flag::MADCTL_MX | Flag::MADCTL_MY | Flag::MADCTL_BGR,
            Orientation::LandscapeSwapped => Flag::MADCTL_MX | Flag::MADCTL_MV | Flag::MADCTL_BGR,
        }
    }
}

/// ST7735 TFT Display Driver
///
/// Owns the display interface, the drawing state (cursor, colors) and the
/// scratch row buffer. There is exactly one owner per panel and every
/// operation takes `&mut self`, so concurrent access is ruled out by
/// construction rather than by caller discipline.
///
/// ## Type Parameters
///
/// - `SPI` - SPI device for communication (owns chip select)
/// - `DC` - Data/Command output pin
/// - `RST` - Reset output pin
/// - `DELAY` - Delay provider for the timed init sequence
pub struct St7735<SPI, DC, RST, DELAY> {
    interface: DisplayInterface<SPI, DC, RST>,
    delay: DELAY,
    orientation: Orientation,
    /// Text insertion point, in panel memory coordinates.
    cursor_x: u16,
    cursor_y: u16,
    /// Foreground color for glyph pixels.
    color: u16,
    /// Background color for glyph pixels.
    bg_color: u16,
    /// Scratch buffer, one full display row at 16 bpp. Reused by every bulk
    /// operation; never grows past its fixed capacity.
    row: heapless::Vec<u8, ROW_BUFFER_BYTES>,
}

impl<SPI, DC, RST, DELAY> St7735<SPI, DC, RST, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Positive polarity gamma correction characteristics.
    const GAMMA_POSITIVE: [u8; 16] = [
        0x09, 0x16, 0x09, 0x20, 0x21, 0x1B, 0x13, 0x19, 0x17, 0x15, 0x1E, 0x2B, 0x04, 0x05,
        0x02, 0x0E,
    ];

    /// Negative polarity gamma correction characteristics.
    const GAMMA_NEGATIVE: [u8; 16] = [
        0x0B, 0x14, 0x08, 0x1E, 0x22, 0x1D, 0x18, 0x1E, 0x1B, 0x1A, 0x24, 0x2B, 0x06, 0x06,
        0x02, 0x0F,
    ];

    /// Create the driver and run the panel power-up sequence.
    pub fn new(
        spi: SPI,
        dc: DC,
        rst: RST,
        delay: DELAY,
        orientation: Orientation,
    ) -> Result<Self, DisplayError> {
        let interface = DisplayInterface::new(spi, dc, rst);
        let mut tft = St7735 {
            interface,
            delay,
            orientation,
            cursor_x: X_OFFSET,
            cursor_y: Y_OFFSET,
            color: crate::st7735::color::WHITE,
            bg_color: crate::st7735::color::BLACK,
            row: heapless::Vec::new(),
        };
        tft.init()?;
        Ok(tft)
    }

    /// Panel power-up sequence. Runs once from [`St7735::new`].
    ///
    /// Every delay is a datasheet minimum and mandatory; the bus protocol has
    /// no acknowledgement, so a skipped wait shows up as a corrupted or blank
    /// panel instead of an error.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        log::info!("Initializing ST7735 panel ({:?})", self.orientation);

        self.interface.reset(&mut self.delay)?;
        self.delay.delay_ms(RESET_SETTLE_MS);

        // Out of sleep mode
        self.interface.cmd(Cmd::SLPOUT)?;
        self.delay.delay_ms(SLPOUT_SETTLE_MS);

        // Rotation and subpixel order
        let madctl = self.orientation.madctl();
        self.interface.cmd_with_data(Cmd::MADCTL, &[madctl])?;

        // 16-bit/pixel
        self.interface
            .cmd_with_data(Cmd::COLMOD, &[Flag::COLMOD_16_BPP])?;

        // Gamma adjustments, both polarities. Not strictly required but
        // provides accurate colors.
        self.interface.cmd(Cmd::GMCTRP1)?;
        self.interface.send_block(&Self::GAMMA_POSITIVE, 1)?;
        self.interface.cmd(Cmd::GMCTRN1)?;
        self.interface.send_block(&Self::GAMMA_NEGATIVE, 1)?;
        self.delay.delay_ms(10);

        // The 0.96" module is an inverted-polarity part
        self.interface.cmd(Cmd::INVON)?;

        self.interface.cmd(Cmd::NORON)?;
        self.delay.delay_ms(10);

        self.interface.cmd(Cmd::DISPON)?;
        self.delay.delay_ms(10);

        log::info!("Panel ready");
        Ok(())
    }

    /// Arm a memory write window; the panel then expects a pixel stream.
    ///
    /// Coordinates are panel memory addresses, offsets already applied.
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), DisplayError> {
        self.interface.cmd(Cmd::CASET)?;
        self.interface.data16(x0)?;
        self.interface.data16(x1)?;
        self.interface.cmd(Cmd::RASET)?;
        self.interface.data16(y0)?;
        self.interface.data16(y1)?;
        self.interface.cmd(Cmd::RAMWR)
    }

    /// Render `pixels` repetitions of `color` into the scratch buffer.
    fn fill_row(&mut self, pixels: u16, color: u16) {
        debug_assert!((pixels as usize) * 2 <= ROW_BUFFER_BYTES);
        self.row.clear();
        let [hi, lo] = color.to_be_bytes();
        for _ in 0..pixels {
            self.row.push(hi).ok();
            self.row.push(lo).ok();
        }
    }

    /// Draw a single pixel.
    pub fn draw_pixel(&mut self, x: u16, y: u16, color: u16) -> Result<(), DisplayError> {
        let x = x + X_OFFSET;
        let y = y + Y_OFFSET;
        self.set_window(x, y, x, y)?;
        self.interface.data16(color)
    }

    /// Fill a rectangle with a solid color.
    ///
    /// One row of pixel data is rendered once and replayed `height` times by
    /// the bulk transfer path.
    pub fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: u16,
    ) -> Result<(), DisplayError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        let x = x + X_OFFSET;
        let y = y + Y_OFFSET;
        self.fill_row(width, color);
        self.set_window(x, y, x + width - 1, y + height - 1)?;
        self.interface.send_block(&self.row, height)
    }

    /// Draw a horizontal line without rasterization.
    fn draw_fast_h_line(&mut self, x: i16, y: i16, w: i16, color: u16) -> Result<(), DisplayError> {
        if w <= 0 {
            return Ok(());
        }
        let x = (x + X_OFFSET as i16) as u16;
        let y = (y + Y_OFFSET as i16) as u16;
        self.fill_row(w as u16, color);
        self.set_window(x, y, x + w as u16 - 1, y)?;
        self.interface.send_block(&self.row, 1)
    }

    /// Draw a vertical line without rasterization.
    fn draw_fast_v_line(&mut self, x: i16, y: i16, h: i16, color: u16) -> Result<(), DisplayError> {
        if h <= 0 {
            return Ok(());
        }
        let x = (x + X_OFFSET as i16) as u16;
        let y = (y + Y_OFFSET as i16) as u16;
        self.fill_row(h as u16, color);
        self.set_window(x, y, x, y + h as u16 - 1)?;
        self.interface.send_block(&self.row, 1)
    }

    /// Draw a one-pixel rectangle outline.
    pub fn draw_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: u16,
    ) -> Result<(), DisplayError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.draw_fast_h_line(x as i16, y as i16, width as i16, color)?;
        self.draw_fast_h_line(x as i16, (y + height - 1) as i16, width as i16, color)?;
        self.draw_fast_v_line(x as i16, y as i16, height as i16, color)?;
        self.draw_fast_v_line((x + width - 1) as i16, y as i16, height as i16, color)
    }

    /// Draw a line between two arbitrary points.
    ///
    /// Axis-aligned segments take the single-burst fast path; everything else
    /// is rasterized pixel by pixel.
    pub fn draw_line(
        &mut self,
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        color: u16,
    ) -> Result<(), DisplayError> {
        if x0 == x1 {
            let (y0, y1) = if y0 > y1 { (y1, y0) } else { (y0, y1) };
            self.draw_fast_v_line(x0, y0, y1 - y0 + 1, color)
        } else if y0 == y1 {
            let (x0, x1) = if x0 > x1 { (x1, x0) } else { (x0, x1) };
            self.draw_fast_h_line(x0, y0, x1 - x0 + 1, color)
        } else {
            self.draw_line_bresenham(x0, y0, x1, y1, color)
        }
    }

    /// Bresenham's line algorithm.
    ///
    /// Steep lines are transposed so the major axis always iterates on x,
    /// then endpoints are ordered left to right; the emitted pixel set is
    /// therefore independent of the endpoint order the caller used.
    fn draw_line_bresenham(
        &mut self,
        mut x0: i16,
        mut y0: i16,
        mut x1: i16,
        mut y1: i16,
        color: u16,
    ) -> Result<(), DisplayError> {
        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            core::mem::swap(&mut x0, &mut y0);
            core::mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            core::mem::swap(&mut x0, &mut x1);
            core::mem::swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        let dy = (y1 - y0).abs();
        let mut err = dx >> 1;
        let step = if y0 < y1 { 1 } else { -1 };

        while x0 <= x1 {
            if steep {
                self.draw_pixel(y0 as u16, x0 as u16, color)?;
            } else {
                self.draw_pixel(x0 as u16, y0 as u16, color)?;
            }
            err -= dy;
            if err < 0 {
                err += dx;
                y0 += step;
            }
            x0 += 1;
        }
        Ok(())
    }

    /// Stream a caller-prepared RGB565 image into a window.
    ///
    /// `bitmap` holds `width * height` big-endian pixel values; the caller
    /// owns correct sizing. The data bypasses the scratch buffer entirely.
    pub fn draw_bitmap(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        bitmap: &[u8],
    ) -> Result<(), DisplayError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        debug_assert_eq!(bitmap.len(), (width as usize) * (height as usize) * 2);
        let x = x + X_OFFSET;
        let y = y + Y_OFFSET;
        self.set_window(x, y, x + width - 1, y + height - 1)?;
        self.interface.send_block(bitmap, 1)
    }

    /// Set the cursor position for the print functions.
    pub fn set_cursor(&mut self, x: u16, y: u16) {
        self.cursor_x = x + X_OFFSET;
        self.cursor_y = y + Y_OFFSET;
    }

    /// Set the text color.
    pub fn set_color(&mut self, color: u16) {
        self.color = color;
    }

    /// Set the text background color.
    pub fn set_background_color(&mut self, color: u16) {
        self.bg_color = color;
    }

    /// Print one character at the cursor position.
    ///
    /// The 5x7 glyph is rasterized row-major into the scratch buffer, one
    /// foreground or background pixel per font bit, and streamed as a single
    /// burst. The cursor does not move; [`St7735::print`] advances it.
    pub fn print_char(&mut self, c: char) -> Result<(), DisplayError> {
        let glyph = font::glyph(c);

        self.row.clear();
        for row in 0..FONT_HEIGHT {
            for col in 0..FONT_WIDTH {
                let lit = glyph[col as usize] & (1 << row) != 0;
                let color = if lit { self.color } else { self.bg_color };
                let [hi, lo] = color.to_be_bytes();
                self.row.push(hi).ok();
                self.row.push(lo).ok();
            }
        }

        let (x, y) = (self.cursor_x, self.cursor_y);
        self.set_window(x, y, x + FONT_WIDTH - 1, y + FONT_HEIGHT - 1)?;
        self.interface.send_block(&self.row, 1)
    }

    /// Print a string, advancing the cursor one glyph width plus a gap per
    /// character. There is no wrapping; text past the right edge runs off
    /// the visible panel.
    pub fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        for c in text.chars() {
            self.print_char(c)?;
            self.cursor_x += FONT_WIDTH + 1;
        }
        Ok(())
    }

    /// Print a signed number right-aligned in a pixel field.
    ///
    /// `width` is a minimum field width in pixels. When the rendered number
    /// is narrower, the cursor is advanced first so the number ends where the
    /// field ends; a wider number is printed in full without truncation.
    pub fn print_number(&mut self, num: i32, width: u16) -> Result<(), DisplayError> {
        // Worst case "-2147483648" is 11 bytes.
        let mut digits = [0u8; 12];
        let mut position = digits.len();
        let mut magnitude = num.unsigned_abs();

        while magnitude > 0 {
            position -= 1;
            digits[position] = b'0' + (magnitude % 10) as u8;
            magnitude /= 10;
        }

        // The conversion loop emits nothing for zero.
        if position == digits.len() {
            position -= 1;
            digits[position] = b'0';
        }

        if num < 0 {
            position -= 1;
            digits[position] = b'-';
        }

        let rendered = (digits.len() - position) as u16 * (FONT_WIDTH + 1) - 1;
        if width > rendered {
            self.cursor_x += width - rendered;
        }

        let text = core::str::from_utf8(&digits[position..]).unwrap_or_default();
        self.print(text)
    }
}

// -------------------- embedded-graphics integration --------------------

impl<SPI, DC, RST, DELAY> OriginDimensions for St7735<SPI, DC, RST, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<SPI, DC, RST, DELAY> DrawTarget for St7735<SPI, DC, RST, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    type Color = Rgb565;
    type Error = DisplayError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Rgb565>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u16, point.y as u16);
            if x >= WIDTH || y >= HEIGHT {
                continue;
            }
            self.draw_pixel(x, y, color.into_storage())?;
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Rgb565) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if area.size.width == 0 || area.size.height == 0 {
            return Ok(());
        }
        self.fill_rect(
            area.top_left.x as u16,
            area.top_left.y as u16,
            area.size.width as u16,
            area.size.height as u16,
            color.into_storage(),
        )
    }

    fn clear(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        self.fill_rect(0, 0, WIDTH, HEIGHT, color.into_storage())
    }
}
