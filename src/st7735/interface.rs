//! Display interface using SPI
//!
//! Frames every byte clocked to the panel as either a command or data via the
//! DC line, and drives the reset line. The panel bus is unidirectional; no
//! operation here reads anything back, and a transfer that the panel ignores
//! is indistinguishable from one it accepted.

use display_interface::DisplayError;
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

/// Reset pulse width and post-release settle time.
const RESET_DELAY_MS: u32 = 50;

/// Command/data framing layer over the raw SPI device.
///
/// Chip select is owned by the `SpiDevice` implementation, which asserts it
/// for the duration of each transfer. A permanently-selected panel (CS tied
/// to ground) is expressed by constructing the SPI device without a CS pin.
pub struct DisplayInterface<SPI, DC, RST> {
    /// SPI device
    spi: SPI,
    /// Data/Command control pin (high for data, low for command)
    dc: DC,
    /// Pin for resetting the panel
    rst: RST,
}

impl<SPI, DC, RST> DisplayInterface<SPI, DC, RST> {
    pub fn new(spi: SPI, dc: DC, rst: RST) -> Self {
        DisplayInterface { spi, dc, rst }
    }
}

impl<SPI, DC, RST> DisplayInterface<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Basic function for sending commands
    pub(crate) fn cmd(&mut self, command: u8) -> Result<(), DisplayError> {
        // low for commands
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;

        match self.spi.write(&[command]) {
            Ok(_) => Ok(()),
            Err(e) => {
                log::error!("SPI write error for command 0x{:02X}: {:?}", command, e);
                Err(DisplayError::BusWriteError)
            }
        }
    }

    /// Basic function for sending an array of u8-values of data over spi
    pub(crate) fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        // high for data
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        self.spi
            .write(data)
            .map_err(|_| DisplayError::BusWriteError)
    }

    /// Send one 16-bit value as data, MSB first.
    pub(crate) fn data16(&mut self, value: u16) -> Result<(), DisplayError> {
        self.data(&value.to_be_bytes())
    }

    /// Basic function for sending a command and the data belonging to it.
    pub(crate) fn cmd_with_data(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.cmd(command)?;
        self.data(data)
    }

    /// Stream the same buffer `repeat` times as one data burst.
    ///
    /// This is how a single row-sized buffer services a multi-row fill: the
    /// transfer engine re-reads the identical memory region each repetition
    /// instead of needing `repeat` times the data. Each iteration is one
    /// blocking bulk write that returns at that repetition's completion;
    /// `repeat = 0` sends nothing.
    pub(crate) fn send_block(&mut self, buffer: &[u8], repeat: u16) -> Result<(), DisplayError> {
        // high for data
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;

        for _ in 0..repeat {
            self.spi
                .write(buffer)
                .map_err(|_| DisplayError::BusWriteError)?;
        }
        Ok(())
    }

    /// Resets the panel: hold the reset line low, release, let it settle.
    pub(crate) fn reset(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError> {
        log::debug!("Resetting panel");
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(RESET_DELAY_MS);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(RESET_DELAY_MS);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::st7735::mock::{BusEvent, EventLog};

    fn interface() -> (
        DisplayInterface<
            crate::st7735::mock::RecordingSpi,
            crate::st7735::mock::DcPin,
            crate::st7735::mock::RstPin,
        >,
        EventLog,
    ) {
        let (spi, dc, rst, log) = crate::st7735::mock::recording_bus();
        (DisplayInterface::new(spi, dc, rst), log)
    }

    #[test]
    fn commands_are_framed_with_dc_low() {
        let (mut iface, log) = interface();
        iface.cmd(0x2A).unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            &[BusEvent::Dc(false), BusEvent::Write(vec![0x2A])]
        );
    }

    #[test]
    fn data_is_framed_with_dc_high() {
        let (mut iface, log) = interface();
        iface.data(&[0x01, 0x02]).unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            &[BusEvent::Dc(true), BusEvent::Write(vec![0x01, 0x02])]
        );
    }

    #[test]
    fn data16_sends_msb_first() {
        let (mut iface, log) = interface();
        iface.data16(0xABCD).unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            &[BusEvent::Dc(true), BusEvent::Write(vec![0xAB, 0xCD])]
        );
    }

    #[test]
    fn send_block_replays_the_buffer_exactly_repeat_times() {
        for repeat in [0u16, 1, 5] {
            let (mut iface, log) = interface();
            iface.send_block(&[0xAA, 0xBB], repeat).unwrap();

            let writes: Vec<_> = log
                .borrow()
                .iter()
                .filter(|e| matches!(e, BusEvent::Write(_)))
                .cloned()
                .collect();
            assert_eq!(writes.len(), repeat as usize);
            for w in writes {
                assert_eq!(w, BusEvent::Write(vec![0xAA, 0xBB]));
            }
        }
    }

    #[test]
    fn reset_pulses_the_line_low_then_high() {
        let (mut iface, log) = interface();
        let mut delay = crate::st7735::mock::NoDelay;
        iface.reset(&mut delay).unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            &[BusEvent::Rst(false), BusEvent::Rst(true)]
        );
    }
}
