use super::{mnemonics, registers, Cc2520, Cc2520Error};
use crate::{bus::Cc2520Bus, irq::InterruptControl, radio::prelude::WpanChannel};
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};

/// The `FREQCTRL` value for an 802.15.4 channel.
const fn channel_to_freq(channel: u8) -> u8 {
    channel
        .wrapping_sub(mnemonics::MIN_CHANNEL)
        .wrapping_mul(mnemonics::CHANNEL_SPACING)
        .wrapping_add(mnemonics::MIN_CHANNEL)
}

const fn freq_to_channel(freq: u8) -> u8 {
    (freq & 0x7F)
        .wrapping_sub(mnemonics::MIN_CHANNEL)
        .wrapping_div(mnemonics::CHANNEL_SPACING)
        .wrapping_add(mnemonics::MIN_CHANNEL)
}

impl<BUS, DI, DO, IRQ, DELAY, const N: usize> WpanChannel for Cc2520<BUS, DI, DO, IRQ, DELAY, N>
where
    BUS: Cc2520Bus,
    DI: InputPin,
    DO: OutputPin,
    IRQ: InterruptControl,
    DELAY: DelayNs,
{
    type ChannelErrorType = Cc2520Error<BUS::Error, DI::Error, DO::Error>;

    /// Channels are 5 MHz apart starting at 2405 MHz (channel 11).
    ///
    /// Out of range values wrap around in 8 bit arithmetic and are written anyway.
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::ChannelErrorType> {
        self._ins
            .reg_write8(registers::FREQCTRL, channel_to_freq(channel))
            .map_err(Cc2520Error::Bus)?;
        Ok(())
    }

    /// See also [`Cc2520::set_channel()`].
    fn get_channel(&mut self) -> Result<u8, Self::ChannelErrorType> {
        let freq = self
            ._ins
            .reg_read8(registers::FREQCTRL)
            .map_err(Cc2520Error::Bus)?;
        Ok(freq_to_channel(freq))
    }
}
