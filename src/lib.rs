//! Driver library for the 0.96" 160x80 ST7735 TFT module.
//!
//! The driver itself is hardware-agnostic over `embedded-hal` traits; the
//! accompanying binary wires it to the ESP32-S3 and runs a drawing demo.

pub mod st7735;

pub use crate::st7735::driver::{Orientation, St7735};
