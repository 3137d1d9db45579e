use super::{Cc2520, Cc2520Error};
use crate::{
    bus::Cc2520Bus,
    irq::InterruptControl,
    radio::prelude::WpanStatus,
    types::{FsmStatus, StatusByte},
};
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};

impl<BUS, DI, DO, IRQ, DELAY, const N: usize> WpanStatus for Cc2520<BUS, DI, DO, IRQ, DELAY, N>
where
    BUS: Cc2520Bus,
    DI: InputPin,
    DO: OutputPin,
    IRQ: InterruptControl,
    DELAY: DelayNs,
{
    type StatusErrorType = Cc2520Error<BUS::Error, DI::Error, DO::Error>;

    fn rx_active(&mut self) -> Result<bool, Self::StatusErrorType> {
        Ok(self.read_fsm()?.receiving())
    }

    fn tx_active(&mut self) -> Result<bool, Self::StatusErrorType> {
        Ok(self.read_fsm()?.tx_active())
    }

    fn is_idle(&mut self) -> Result<bool, Self::StatusErrorType> {
        Ok(self.read_fsm()?.idle())
    }

    fn get_fsm_status(&mut self) -> Result<FsmStatus, Self::StatusErrorType> {
        self.read_fsm()
    }

    fn update(&mut self) -> Result<(), Self::StatusErrorType> {
        self._ins.snop().map_err(Cc2520Error::Bus)?;
        Ok(())
    }

    fn get_status(&self) -> StatusByte {
        self._ins.status()
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::WpanStatus;
    use crate::{
        radio::{
            cc2520::{opcodes, registers},
            RadioConfig,
        },
        test::{mk_radio, PinExpectations},
    };
    use std::vec;

    #[test]
    fn fsm_flags() {
        let mut mocks = mk_radio(RadioConfig::default(), PinExpectations::default());
        assert!(mocks.radio.is_idle().unwrap());

        mocks.chip.poke(registers::FSMSTAT1 as u16, 0x20);
        assert!(mocks.radio.rx_active().unwrap());
        assert!(!mocks.radio.tx_active().unwrap());
        assert!(!mocks.radio.is_idle().unwrap());

        mocks.chip.poke(registers::FSMSTAT1 as u16, 0x02);
        assert!(!mocks.radio.rx_active().unwrap());
        assert!(mocks.radio.tx_active().unwrap());
        assert!(!mocks.radio.is_idle().unwrap());

        mocks.chip.poke(registers::FSMSTAT1 as u16, 0x81);
        let fsm = mocks.radio.get_fsm_status().unwrap();
        assert!(fsm.fifo());
        assert!(fsm.rx_active());
        assert!(mocks.radio.is_idle().unwrap());
        assert_eq!(
            mocks.chip.transactions()[0],
            vec![opcodes::REGRD | registers::FSMSTAT1, 0]
        );
        mocks.done();
    }

    #[test]
    fn status_byte() {
        let mut mocks = mk_radio(RadioConfig::default(), PinExpectations::default());
        assert_eq!(mocks.radio.get_status().into_bits(), 0);
        mocks.chip.set_status(0x80);
        mocks.radio.update().unwrap();
        assert!(mocks.radio.get_status().xosc_stable());
        assert_eq!(mocks.chip.transactions(), vec![vec![opcodes::SNOP]]);
        mocks.done();
    }
}
