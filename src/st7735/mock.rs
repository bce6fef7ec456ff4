//! Recording test doubles for the SPI bus and control lines.
//!
//! The doubles share one event log so tests can replay the exact order of
//! DC/RST transitions and byte bursts, and decode the command stream the
//! panel would have seen.

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{Operation, SpiDevice};

use crate::st7735::cmd::Cmd;

/// One observable bus-level event, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BusEvent {
    /// DC line transition (true = data mode).
    Dc(bool),
    /// Reset line transition.
    Rst(bool),
    /// One bulk write on the SPI bus.
    Write(Vec<u8>),
}

pub(crate) type EventLog = Rc<RefCell<Vec<BusEvent>>>;

pub(crate) struct RecordingSpi {
    log: EventLog,
}

impl embedded_hal::spi::ErrorType for RecordingSpi {
    type Error = core::convert::Infallible;
}

impl SpiDevice for RecordingSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        for op in operations.iter() {
            if let Operation::Write(bytes) = op {
                self.log.borrow_mut().push(BusEvent::Write(bytes.to_vec()));
            }
        }
        Ok(())
    }
}

pub(crate) struct DcPin {
    log: EventLog,
}

impl embedded_hal::digital::ErrorType for DcPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for DcPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(BusEvent::Dc(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(BusEvent::Dc(true));
        Ok(())
    }
}

pub(crate) struct RstPin {
    log: EventLog,
}

impl embedded_hal::digital::ErrorType for RstPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for RstPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(BusEvent::Rst(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(BusEvent::Rst(true));
        Ok(())
    }
}

/// Delay provider that does not wait; timing is irrelevant off-hardware.
pub(crate) struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// A fresh recording SPI device, DC pin and RST pin sharing one event log.
pub(crate) fn recording_bus() -> (RecordingSpi, DcPin, RstPin, EventLog) {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    (
        RecordingSpi { log: log.clone() },
        DcPin { log: log.clone() },
        RstPin { log: log.clone() },
        log,
    )
}

/// Replay the DC line over the log, pairing each command byte with the data
/// bytes that followed it.
pub(crate) fn decoded(log: &EventLog) -> Vec<(u8, Vec<u8>)> {
    let mut data_mode = false;
    let mut out: Vec<(u8, Vec<u8>)> = Vec::new();
    for event in log.borrow().iter() {
        match event {
            BusEvent::Dc(state) => data_mode = *state,
            BusEvent::Rst(_) => {}
            BusEvent::Write(bytes) => {
                if data_mode {
                    if let Some((_, data)) = out.last_mut() {
                        data.extend_from_slice(bytes);
                    }
                } else {
                    for &b in bytes {
                        out.push((b, Vec::new()));
                    }
                }
            }
        }
    }
    out
}

/// One decoded addressing window and the pixel bytes streamed into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Window {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
    pub data: Vec<u8>,
}

/// Decode the log into the sequence of windows the panel was given.
pub(crate) fn windows(log: &EventLog) -> Vec<Window> {
    let mut out = Vec::new();
    let (mut x0, mut x1, mut y0, mut y1) = (0u16, 0u16, 0u16, 0u16);
    for (cmd, data) in decoded(log) {
        if cmd == Cmd::CASET && data.len() == 4 {
            x0 = be16(&data[0..2]);
            x1 = be16(&data[2..4]);
        } else if cmd == Cmd::RASET && data.len() == 4 {
            y0 = be16(&data[0..2]);
            y1 = be16(&data[2..4]);
        } else if cmd == Cmd::RAMWR {
            out.push(Window { x0, y0, x1, y1, data });
        }
    }
    out
}

fn be16(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}
