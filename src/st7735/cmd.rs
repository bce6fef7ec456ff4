pub struct Cmd;
impl Cmd {
    // Sleep / display state
    pub const SLPIN: u8 = 0x10;
    pub const SLPOUT: u8 = 0x11;
    pub const PTLON: u8 = 0x12;
    pub const NORON: u8 = 0x13;
    pub const INVOFF: u8 = 0x20;
    pub const INVON: u8 = 0x21;
    pub const GAMSET: u8 = 0x26;
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;

    // Memory addressing
    pub const CASET: u8 = 0x2A;
    pub const RASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const PLTAR: u8 = 0x30;
    pub const TEOFF: u8 = 0x34;
    pub const TEON: u8 = 0x35;
    pub const MADCTL: u8 = 0x36;
    pub const IDMOFF: u8 = 0x38;
    pub const IDMON: u8 = 0x39;
    pub const COLMOD: u8 = 0x3A;

    // Panel gamma correction
    pub const GMCTRP1: u8 = 0xE0;
    pub const GMCTRN1: u8 = 0xE1;
}

/*
ST7735 datasheet, system function command list (write commands only):
0x10 - Sleep In
0x11 - Sleep Out
0x12 - Partial Display Mode On
0x13 - Normal Display Mode On
0x20 - Display Inversion Off
0x21 - Display Inversion On
0x26 - Gamma Set
0x28 - Display Off
0x29 - Display On
0x2A - Column Address Set
0x2B - Row Address Set
0x2C - Memory Write
0x30 - Partial Area
0x34 - Tearing Effect Line Off
0x35 - Tearing Effect Line On
0x36 - Memory Data Access Control
0x38 - Idle Mode Off
0x39 - Idle Mode On
0x3A - Interface Pixel Format
0xE0 - Gamma '+' Polarity Correction
0xE1 - Gamma '-' Polarity Correction
*/
