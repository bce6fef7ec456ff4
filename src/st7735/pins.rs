//! Pin assignments for the ST7735 module wiring.
//!
//! The panel is a write-only SPI device: clock and data out plus three
//! control lines. There is no MISO line and no busy/ready feedback.

/// GPIO assignments used by the demo binary.
pub struct Pins;

impl Pins {
    /// Chip Select. Owned by the SPI driver; wire the panel's CS to ground
    /// instead and construct the SPI device without a CS pin if the module is
    /// meant to stay permanently selected.
    pub const CS: u8 = 45;
    /// Data/Command select (high for data, low for command)
    pub const DC: u8 = 46;
    /// Panel reset, active low
    pub const RST: u8 = 47;
    /// SPI clock
    pub const SCK: u8 = 12;
    /// SPI Master Out Slave In
    pub const MOSI: u8 = 11;
}
