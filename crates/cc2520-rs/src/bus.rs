//! The bus transaction layer.
//!
//! Every CC2520 instruction is a single chip-select framed exchange:
//! `begin()`, one or more `exchange()` calls, then `end()`.
//! No other instruction may start until `end()` was called.

use core::fmt::{Display, Formatter, Result};
use embedded_hal::{digital::OutputPin, spi::SpiBus};

/// Byte level access to the transceiver's serial interface.
pub trait Cc2520Bus {
    type Error;

    /// Assert chip select.
    fn begin(&mut self) -> core::result::Result<(), Self::Error>;

    /// Clock `byte` out while clocking one byte in.
    ///
    /// Blocks until the received byte is available.
    fn exchange(&mut self, byte: u8) -> core::result::Result<u8, Self::Error>;

    /// Deassert chip select once every queued byte has been clocked.
    fn end(&mut self) -> core::result::Result<(), Self::Error>;
}

/// An error raised by [`SpiInterface`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BusError<SPI, CS> {
    /// Represents a SPI transfer error.
    Spi(SPI),
    /// Represents an error driving the chip select pin.
    ChipSelect(CS),
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl<SPI, CS> defmt::Format for BusError<SPI, CS> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            BusError::Spi(_) => defmt::write!(fmt, "SPI transfer failed"),
            BusError::ChipSelect(_) => defmt::write!(fmt, "chip select failed"),
        }
    }
}

impl<SPI, CS> Display for BusError<SPI, CS> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            BusError::Spi(_) => write!(f, "SPI transfer failed"),
            BusError::ChipSelect(_) => write!(f, "chip select failed"),
        }
    }
}

/// Adapts an exclusive [`SpiBus`] plus a chip select [`OutputPin`] to [`Cc2520Bus`].
///
/// A [`SpiDevice`](trait@embedded_hal::spi::SpiDevice) does not fit here because
/// the driver needs to hold chip select low across separate byte exchanges
/// (and sometimes with no exchange at all while waiting on the oscillator).
pub struct SpiInterface<SPI, CS> {
    spi: SPI,
    cs_pin: CS,
}

impl<SPI, CS> SpiInterface<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    /// Wrap a SPI bus and the radio's CSn pin.
    ///
    /// The bus must be configured for mode 0, MSB first, at 8 MHz or less.
    pub fn new(spi: SPI, cs_pin: CS) -> Self {
        Self { spi, cs_pin }
    }

    /// Release the SPI bus and chip select pin.
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs_pin)
    }
}

impl<SPI, CS> Cc2520Bus for SpiInterface<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    type Error = BusError<SPI::Error, CS::Error>;

    fn begin(&mut self) -> core::result::Result<(), Self::Error> {
        self.cs_pin.set_low().map_err(BusError::ChipSelect)
    }

    fn exchange(&mut self, byte: u8) -> core::result::Result<u8, Self::Error> {
        let mut buf = [byte];
        self.spi
            .transfer_in_place(&mut buf)
            .map_err(BusError::Spi)?;
        Ok(buf[0])
    }

    fn end(&mut self) -> core::result::Result<(), Self::Error> {
        self.spi.flush().map_err(BusError::Spi)?;
        self.cs_pin.set_high().map_err(BusError::ChipSelect)
    }
}
