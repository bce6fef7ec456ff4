/// Command argument flags and constants for the ST7735 controller.
///
/// All values are taken from the ST7735 datasheet and are fixed wire-format
/// constants, not runtime-negotiable settings.
pub struct Flag;
impl Flag {
    // Memory Data Access Control (0x36) bits
    pub const MADCTL_MH: u8 = 0x04; // Bit 2 - Refresh left to right
    pub const MADCTL_RGB: u8 = 0x00; // Bit 3 - RGB subpixel order
    pub const MADCTL_BGR: u8 = 0x08; // Bit 3 - BGR subpixel order
    pub const MADCTL_ML: u8 = 0x10; // Bit 4 - Scan address increase
    pub const MADCTL_MV: u8 = 0x20; // Bit 5 - X-Y exchange
    pub const MADCTL_MX: u8 = 0x40; // Bit 6 - X mirror
    pub const MADCTL_MY: u8 = 0x80; // Bit 7 - Y mirror

    // Interface Pixel Format (0x3A) values
    pub const COLMOD_12_BPP: u8 = 0x03; // 011 - 12-bit/pixel
    pub const COLMOD_16_BPP: u8 = 0x05; // 101 - 16-bit/pixel
    pub const COLMOD_18_BPP: u8 = 0x06; // 110 - 18-bit/pixel
}
