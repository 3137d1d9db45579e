use super::{gpio, registers, Cc2520, Cc2520Error};
use crate::{
    bus::Cc2520Bus,
    irq::InterruptControl,
    radio::prelude::{WpanPower, WpanStatus},
    FrontEnd, LinkState,
};
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};

impl<BUS, DI, DO, IRQ, DELAY, const N: usize> WpanPower for Cc2520<BUS, DI, DO, IRQ, DELAY, N>
where
    BUS: Cc2520Bus,
    DI: InputPin,
    DO: OutputPin,
    IRQ: InterruptControl,
    DELAY: DelayNs,
{
    type PowerErrorType = Cc2520Error<BUS::Error, DI::Error, DO::Error>;

    /// With a CC2591 attached, its PA and LNA are also powered down (GPIO4/5 forced high).
    fn enter_low_power(&mut self) -> Result<(), Self::PowerErrorType> {
        self.require_awake()?;
        while !self.is_idle()? {}
        if self._config.front_end() == FrontEnd::Cc2591 {
            self._ins
                .reg_write8(registers::GPIOCTRL4, gpio::HIGH)
                .map_err(Cc2520Error::Bus)?;
            self._ins
                .reg_write8(registers::GPIOCTRL5, gpio::HIGH)
                .map_err(Cc2520Error::Bus)?;
        }
        self._ins.srfoff().map_err(Cc2520Error::Bus)?;
        self._ins.sxoscoff().map_err(Cc2520Error::Bus)?;
        self._state = LinkState::LowPower;
        Ok(())
    }

    /// Blocks until the crystal oscillator is stable, then re-enables the receiver
    /// and its interrupt.
    fn exit_low_power(&mut self) -> Result<(), Self::PowerErrorType> {
        if self._state != LinkState::LowPower {
            return Err(Cc2520Error::InvalidState(self._state));
        }
        self._ins.sxoscon().map_err(Cc2520Error::Bus)?;
        self._ins.snop().map_err(Cc2520Error::Bus)?;
        self.wait_oscillator(None)?;
        if self._config.front_end() == FrontEnd::Cc2591 {
            self._ins
                .reg_write8(registers::GPIOCTRL4, gpio::LNA_PD_INVERTED)
                .map_err(Cc2520Error::Bus)?;
            self._ins
                .reg_write8(registers::GPIOCTRL5, gpio::PA_PD_INVERTED)
                .map_err(Cc2520Error::Bus)?;
        }
        self._ins.srxon().map_err(Cc2520Error::Bus)?;
        // the receive interrupt may have been disarmed by receive_off()
        self._irq.clear();
        self._irq.enable();
        self._state = LinkState::Idle;
        Ok(())
    }

    fn is_low_power(&self) -> bool {
        self._state == LinkState::LowPower
    }
}
