//! Drawing demo for the 0.96" 160x80 ST7735 TFT module on ESP32-S3.
//!
//! Cycles through the driver's primitives: random pixels, scan lines, random
//! lines, rectangle outlines and solid fills, with a popup caption between
//! scenes and an optional build-time-embedded logo at startup.

#[cfg(target_os = "espidf")]
mod demo {
    use embedded_hal::{digital::OutputPin, spi::SpiDevice};

    use esp_idf_svc::hal::delay::Delay;
    use esp_idf_svc::hal::gpio;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::hal::prelude::*;
    use esp_idf_svc::hal::spi;

    use rakugaki::st7735::driver::DisplayError;
    use rakugaki::st7735::{color, HEIGHT, WIDTH};
    use rakugaki::{Orientation, St7735};

    // Pre-converted demo image, generated at build time from logo.png.
    // Empty when no logo.png was present.
    const LOGO_IMAGE: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/logo.bin"));

    /// White noise generator: 32-bit LFSR, taps at 31/21/1/0.
    struct Noise {
        lfsr: u32,
    }

    impl Noise {
        fn new() -> Self {
            Noise { lfsr: 1 }
        }

        fn rand8(&mut self) -> u8 {
            for _ in 0..8 {
                let bit =
                    (self.lfsr >> 31) ^ (self.lfsr >> 21) ^ (self.lfsr >> 1) ^ self.lfsr;
                self.lfsr = (self.lfsr << 1) | (bit & 1);
            }
            self.lfsr as u8
        }
    }

    pub fn run() -> anyhow::Result<()> {
        // It is necessary to call this function once. Otherwise some patches to the runtime
        // implemented by esp-idf-sys might not link properly. See https://github.com/esp-rs/esp-idf-template/issues/71
        esp_idf_svc::sys::link_patches();

        // Bind the log crate to the ESP Logging facilities
        esp_idf_svc::log::EspLogger::initialize_default();

        let peripherals = Peripherals::take().expect("Could not take peripherals");
        let pins = peripherals.pins;

        log::info!("Configuring SPI for the ST7735 module");
        let mut spi_device = spi::SpiDeviceDriver::new_single(
            peripherals.spi2,
            pins.gpio12,                    // SCK - Pins::SCK
            pins.gpio11,                    // MOSI - Pins::MOSI
            Option::<gpio::AnyIOPin>::None, // the panel is write-only, no MISO
            Some(pins.gpio45),              // CS - Pins::CS
            &spi::SpiDriverConfig::new().dma(spi::Dma::Auto(4096)),
            &spi::SpiConfig::new().baudrate(26.MHz().into()),
        )
        .expect("Could not create SPI device driver");

        let delay = Delay::default();

        log::info!("Creating display driver");
        let mut tft = St7735::new(
            &mut spi_device,
            gpio::PinDriver::output(pins.gpio46).expect("Failed to set DC pin as output"), // Pins::DC
            gpio::PinDriver::output(pins.gpio47).expect("Failed to set RST pin as output"), // Pins::RST
            delay,
            Orientation::Landscape,
        )
        .expect("Could not initialize the panel");

        run_scenes(&mut tft, delay).map_err(|e| anyhow::anyhow!("drawing failed: {:?}", e))
    }

    /// Wipe open a black popup box and print a caption into it.
    fn popup<SPI, DC, RST>(
        tft: &mut St7735<SPI, DC, RST, Delay>,
        delay: Delay,
        message: &str,
    ) -> Result<(), DisplayError>
    where
        SPI: SpiDevice,
        DC: OutputPin,
        RST: OutputPin,
    {
        for i in 1..11u16 {
            tft.fill_rect(110 - 4 * i, 30 - 2 * i, 8 * i, 4 * i, color::BLACK)?;
            delay.delay_ms(10);
        }
        tft.set_cursor(83, 26);
        tft.print(message)?;
        delay.delay_ms(1000);
        Ok(())
    }

    fn run_scenes<SPI, DC, RST>(
        tft: &mut St7735<SPI, DC, RST, Delay>,
        delay: Delay,
    ) -> Result<(), DisplayError>
    where
        SPI: SpiDevice,
        DC: OutputPin,
        RST: OutputPin,
    {
        let colors = [
            color::BLACK,
            color::NAVY,
            color::DARKGREEN,
            color::DARKCYAN,
            color::MAROON,
            color::PURPLE,
            color::OLIVE,
            color::LIGHTGREY,
            color::DARKGREY,
            color::BLUE,
            color::GREEN,
            color::CYAN,
            color::RED,
            color::MAGENTA,
            color::YELLOW,
            color::WHITE,
            color::ORANGE,
            color::GREENYELLOW,
            color::PINK,
        ];
        let mut noise = Noise::new();

        tft.fill_rect(0, 0, WIDTH, HEIGHT, color::BLACK)?;
        tft.set_color(color::RED);
        tft.set_background_color(color::BLACK);

        if LOGO_IMAGE.len() == WIDTH as usize * HEIGHT as usize * 2 {
            log::info!("Showing embedded logo, {} bytes", LOGO_IMAGE.len());
            tft.draw_bitmap(0, 0, WIDTH, HEIGHT, LOGO_IMAGE)?;
            delay.delay_ms(3000);
        } else if !LOGO_IMAGE.is_empty() {
            log::warn!("Skipping logo, unexpected size {} bytes", LOGO_IMAGE.len());
        }

        loop {
            popup(tft, delay, "Draw Point")?;
            tft.fill_rect(0, 0, WIDTH, HEIGHT, color::BLACK)?;
            for _ in 0..30_000 {
                tft.draw_pixel(
                    noise.rand8() as u16 % WIDTH,
                    noise.rand8() as u16 % HEIGHT,
                    colors[noise.rand8() as usize % colors.len()],
                )?;
            }

            popup(tft, delay, "Scan Line")?;
            tft.fill_rect(0, 0, WIDTH, HEIGHT, color::BLACK)?;
            for _ in 0..50 {
                for x in 0..WIDTH as i16 {
                    tft.draw_line(
                        x,
                        0,
                        x,
                        HEIGHT as i16 - 1,
                        colors[noise.rand8() as usize % colors.len()],
                    )?;
                }
            }
            for _ in 0..50 {
                for y in 0..HEIGHT as i16 {
                    tft.draw_line(
                        0,
                        y,
                        WIDTH as i16 - 1,
                        y,
                        colors[noise.rand8() as usize % colors.len()],
                    )?;
                }
            }

            popup(tft, delay, "Draw Line")?;
            tft.fill_rect(0, 0, WIDTH, HEIGHT, color::BLACK)?;
            for _ in 0..2000 {
                tft.draw_line(
                    (noise.rand8() as u16 % WIDTH) as i16,
                    (noise.rand8() as u16 % HEIGHT) as i16,
                    (noise.rand8() as u16 % WIDTH) as i16,
                    (noise.rand8() as u16 % HEIGHT) as i16,
                    colors[noise.rand8() as usize % colors.len()],
                )?;
            }

            popup(tft, delay, "Scan Rect")?;
            tft.fill_rect(0, 0, WIDTH, HEIGHT, color::BLACK)?;
            for _ in 0..100 {
                for i in 0..40u16 {
                    tft.draw_rect(
                        i,
                        i,
                        WIDTH - 2 * i,
                        HEIGHT - 2 * i,
                        colors[noise.rand8() as usize % colors.len()],
                    )?;
                }
            }

            popup(tft, delay, "Draw Rect")?;
            tft.fill_rect(0, 0, WIDTH, HEIGHT, color::BLACK)?;
            for _ in 0..5000 {
                tft.draw_rect(
                    noise.rand8() as u16 % (WIDTH - 20),
                    noise.rand8() as u16 % (HEIGHT - 20),
                    20,
                    20,
                    colors[noise.rand8() as usize % colors.len()],
                )?;
            }

            popup(tft, delay, "Fill Rect")?;
            tft.fill_rect(0, 0, WIDTH, HEIGHT, color::BLACK)?;
            for _ in 0..5000 {
                tft.fill_rect(
                    noise.rand8() as u16 % (WIDTH - 20),
                    noise.rand8() as u16 % (HEIGHT - 20),
                    20,
                    20,
                    colors[noise.rand8() as usize % colors.len()],
                )?;
            }
        }
    }
}

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    demo::run()
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    // The demo drives ESP32 peripherals; there is nothing to run on the host.
    // The driver library and its tests build everywhere.
}
