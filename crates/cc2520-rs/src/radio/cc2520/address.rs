use super::{memory, Cc2520, Cc2520Error};
use crate::{bus::Cc2520Bus, irq::InterruptControl, radio::prelude::WpanAddress};
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};

impl<BUS, DI, DO, IRQ, DELAY, const N: usize> WpanAddress for Cc2520<BUS, DI, DO, IRQ, DELAY, N>
where
    BUS: Cc2520Bus,
    DI: InputPin,
    DO: OutputPin,
    IRQ: InterruptControl,
    DELAY: DelayNs,
{
    type AddressErrorType = Cc2520Error<BUS::Error, DI::Error, DO::Error>;

    fn set_pan_id(&mut self, pan_id: u16) -> Result<(), Self::AddressErrorType> {
        self._ins
            .mem_write16(memory::RAM_PANID, pan_id)
            .map_err(Cc2520Error::Bus)?;
        Ok(())
    }

    fn get_pan_id(&mut self) -> Result<u16, Self::AddressErrorType> {
        self._ins
            .mem_read16(memory::RAM_PANID)
            .map_err(Cc2520Error::Bus)
    }

    fn set_short_address(&mut self, address: u16) -> Result<(), Self::AddressErrorType> {
        self._ins
            .mem_write16(memory::RAM_SHORTADDR, address)
            .map_err(Cc2520Error::Bus)?;
        Ok(())
    }

    fn get_short_address(&mut self) -> Result<u16, Self::AddressErrorType> {
        self._ins
            .mem_read16(memory::RAM_SHORTADDR)
            .map_err(Cc2520Error::Bus)
    }

    /// The address is stored little endian, like every multi-byte value in chip RAM.
    fn set_extended_address(&mut self, address: u64) -> Result<(), Self::AddressErrorType> {
        self._ins
            .mem_write(memory::RAM_EXTADDR, &address.to_le_bytes())
            .map_err(Cc2520Error::Bus)?;
        Ok(())
    }
}
