use super::{exceptions, gpio, memory, mnemonics, registers, timing, Cc2520, Cc2520Error};
use crate::{
    bus::Cc2520Bus,
    irq::{Edge, InterruptControl},
    radio::prelude::{WpanAddress, WpanChannel, WpanInit, WpanRadio},
    FrontEnd, LinkState,
};
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};

const fn freg(addr: u8) -> u16 {
    addr as u16
}

/// Register values applied after reset, in order.
const TUNING: [(u16, u8); 19] = [
    (freg(registers::TXPOWER), 0xF7),
    (freg(registers::CCACTRL0), 0xF8),
    (memory::MDMCTRL0, mnemonics::MDMCTRL0_TUNED),
    (memory::MDMCTRL1, 0x14),
    (memory::RXCTRL, 0x3F),
    (memory::FSCTRL, 0x5A),
    (memory::FSCAL1, 0x03),
    (memory::AGCCTRL1, 0x11),
    (memory::ADCTEST0, 0x10),
    (memory::ADCTEST1, 0x0E),
    (memory::ADCTEST2, 0x03),
    (freg(registers::FRMCTRL0), mnemonics::AUTOCRC),
    (memory::EXTCLOCK, 0x00),
    (freg(registers::GPIOCTRL0), 1 + exceptions::RX_FRM_DONE),
    (freg(registers::GPIOCTRL1), gpio::SAMPLED_CCA),
    (freg(registers::GPIOCTRL2), gpio::RSSI_VALID),
    (freg(registers::GPIOCTRL3), gpio::SFD),
    (freg(registers::GPIOCTRL4), gpio::SNIFFER_DATA),
    (freg(registers::GPIOCTRL5), gpio::SNIFFER_CLK),
];

/// Like [`TUNING`] but with GPIO3..5 driving a CC2591 range extender.
const TUNING_CC2591: [(u16, u8); 21] = [
    (freg(registers::TXPOWER), 0xF9),
    (freg(registers::TXCTRL), 0xC1),
    (freg(registers::CCACTRL0), 0xF8),
    (memory::MDMCTRL0, mnemonics::MDMCTRL0_TUNED),
    (memory::MDMCTRL1, 0x14),
    (memory::RXCTRL, 0x3F),
    (memory::FSCTRL, 0x5A),
    (memory::FSCAL1, 0x03),
    (memory::AGCCTRL1, 0x16),
    (memory::ADCTEST0, 0x10),
    (memory::ADCTEST1, 0x0E),
    (memory::ADCTEST2, 0x03),
    (freg(registers::FRMCTRL0), mnemonics::AUTOCRC),
    (memory::EXTCLOCK, 0x00),
    (freg(registers::GPIOCTRL0), 1 + exceptions::RX_FRM_DONE),
    (freg(registers::GPIOCTRL1), gpio::SAMPLED_CCA),
    (freg(registers::GPIOCTRL2), gpio::RSSI_VALID),
    // high gain mode
    (freg(registers::GPIOCTRL3), gpio::HIGH),
    (freg(registers::GPIOCTRL4), gpio::LNA_PD_INVERTED),
    (freg(registers::GPIOCTRL5), gpio::PA_PD_INVERTED),
    (freg(registers::GPIOPOLARITY), 0x0F),
];

pub(super) const fn tuning(front_end: FrontEnd) -> &'static [(u16, u8)] {
    match front_end {
        FrontEnd::None => &TUNING,
        FrontEnd::Cc2591 => &TUNING_CC2591,
    }
}

impl<BUS, DI, DO, IRQ, DELAY, const N: usize> WpanInit for Cc2520<BUS, DI, DO, IRQ, DELAY, N>
where
    BUS: Cc2520Bus,
    DI: InputPin,
    DO: OutputPin,
    IRQ: InterruptControl,
    DELAY: DelayNs,
{
    type ConfigErrorType = Cc2520Error<BUS::Error, DI::Error, DO::Error>;

    /// Power cycle the chip, apply the tuning table and the
    /// [`RadioConfig`](struct@crate::radio::RadioConfig) given to [`Cc2520::new()`],
    /// then enable the receiver.
    ///
    /// Any frames buffered from a previous session are discarded.
    fn init(&mut self) -> Result<(), Self::ConfigErrorType> {
        self._state = LinkState::Uninitialized;
        self._irq.disable();

        self._pins.reset.set_low().map_err(Cc2520Error::Gpo)?;
        self._pins.vreg_en.set_low().map_err(Cc2520Error::Gpo)?;
        self._delay_impl.delay_us(timing::RESET_HOLD_US);
        self._pins.vreg_en.set_high().map_err(Cc2520Error::Gpo)?;
        self._delay_impl.delay_us(timing::VREG_STARTUP_US);
        self._pins.reset.set_high().map_err(Cc2520Error::Gpo)?;

        if !self.wait_oscillator(Some(timing::XOSC_POLLS))? {
            #[cfg(feature = "defmt")]
            #[cfg(target_os = "none")]
            defmt::error!("CC2520 crystal oscillator did not start");
            return Err(Cc2520Error::OscillatorNotReady);
        }

        for (addr, value) in tuning(self._config.front_end()) {
            self._ins
                .mem_write8(*addr, *value)
                .map_err(Cc2520Error::Bus)?;
        }
        let modem = self
            ._ins
            .mem_read8(memory::MDMCTRL0)
            .map_err(Cc2520Error::Bus)?;
        if modem != mnemonics::MDMCTRL0_TUNED {
            #[cfg(feature = "defmt")]
            #[cfg(target_os = "none")]
            defmt::error!("MDMCTRL0 read back {=u8:#x}", modem);
            return Err(Cc2520Error::ConfigVerificationFailed);
        }

        self._rx_queue.flush();
        let config = self._config;
        critical_section::with(|_| {
            self.set_channel(config.channel())?;
            self.set_pan_id(config.pan_id())?;
            self.set_short_address(config.short_address())?;
            self._irq.set_edge(Edge::Rising);
            self._irq.clear();
            self._irq.enable();
            self._ins
                .clear_exception(exceptions::RX_FRM_DONE)
                .map_err(Cc2520Error::Bus)?;
            Ok::<(), Self::ConfigErrorType>(())
        })?;

        self._state = LinkState::Idle;
        self.receive_on()
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::tuning;
    use crate::{
        irq::Edge,
        radio::{
            cc2520::{exceptions, memory, opcodes, registers, Cc2520Error},
            prelude::{WpanInit, WpanRadio},
            RadioConfig,
        },
        test::{mk_radio, IrqEvent, PinExpectations},
        FrontEnd, LinkState,
    };
    use embedded_hal_mock::eh1::digital::{State as PinState, Transaction as PinTransaction};
    use std::vec;

    fn power_cycle() -> PinExpectations {
        PinExpectations {
            reset: vec![
                PinTransaction::set(PinState::Low),
                PinTransaction::set(PinState::High),
            ],
            vreg_en: vec![
                PinTransaction::set(PinState::Low),
                PinTransaction::set(PinState::High),
            ],
            ..Default::default()
        }
    }

    pub fn init_parametrized(front_end: FrontEnd) {
        let config = RadioConfig::default()
            .with_channel(26)
            .with_pan_id(0x2222)
            .with_short_address(0x0042)
            .with_front_end(front_end);
        let pins = PinExpectations {
            so: vec![
                PinTransaction::get(PinState::Low),
                PinTransaction::get(PinState::Low),
                PinTransaction::get(PinState::High),
            ],
            ..power_cycle()
        };
        let mut mocks = mk_radio(config, pins);
        // stale frame from a previous session
        assert!(mocks.radio._rx_queue.push(&[3, 1, 2, 3]));

        mocks.radio.init().unwrap();

        assert_eq!(mocks.radio._state, LinkState::Idle);
        assert_eq!(mocks.radio.frames_pending(), 0);
        for (addr, value) in tuning(front_end) {
            assert_eq!(mocks.chip.peek(*addr), *value);
        }
        assert_eq!(mocks.chip.peek(registers::FREQCTRL as u16), 11 + 5 * 15);
        assert_eq!(mocks.chip.peek(memory::RAM_PANID), 0x22);
        assert_eq!(mocks.chip.peek(memory::RAM_SHORTADDR), 0x42);
        assert_eq!(mocks.chip.peek(memory::RAM_SHORTADDR + 1), 0x00);

        let log = mocks.chip.transactions();
        // the oscillator wait is an empty transaction
        assert!(log[0].is_empty());
        assert_eq!(log[1][0] & 0xF0, opcodes::MEMWR);
        assert_eq!(log.last().unwrap(), &vec![opcodes::SRXON]);
        assert!(log.contains(&vec![opcodes::BCLR, registers::EXCFLAG0 * 8 + exceptions::RX_FRM_DONE]));

        let events = mocks.irq.events();
        assert_eq!(events[0], IrqEvent::Disable);
        assert!(events.contains(&IrqEvent::SetEdge(Edge::Rising)));
        assert!(mocks.irq.is_enabled());
        mocks.done();
    }

    #[test]
    fn init_without_front_end() {
        init_parametrized(FrontEnd::None);
    }

    #[test]
    fn init_with_cc2591() {
        init_parametrized(FrontEnd::Cc2591);
    }

    #[test]
    fn init_oscillator_timeout() {
        let pins = PinExpectations {
            so: vec![PinTransaction::get(PinState::Low); 100],
            ..power_cycle()
        };
        let mut mocks = mk_radio(RadioConfig::default(), pins);
        assert!(matches!(
            mocks.radio.init(),
            Err(Cc2520Error::OscillatorNotReady)
        ));
        assert_eq!(mocks.radio._state, LinkState::Uninitialized);
        // nothing but the oscillator wait reached the chip
        let log = mocks.chip.transactions();
        assert_eq!(log.len(), 1);
        assert!(log[0].is_empty());
        assert!(mocks.chip.is_deselected());
        mocks.done();
    }

    #[test]
    fn init_verification_failure() {
        let pins = PinExpectations {
            so: vec![PinTransaction::get(PinState::High)],
            ..power_cycle()
        };
        let mut mocks = mk_radio(RadioConfig::default(), pins);
        mocks.chip.freeze(memory::MDMCTRL0, 0x45);
        assert!(matches!(
            mocks.radio.init(),
            Err(Cc2520Error::ConfigVerificationFailed)
        ));
        assert_eq!(mocks.radio._state, LinkState::Uninitialized);
        assert!(!mocks
            .chip
            .transactions()
            .contains(&vec![opcodes::SRXON]));
        mocks.done();
    }

    #[test]
    fn init_bus_failure() {
        let pins = PinExpectations {
            so: vec![PinTransaction::get(PinState::High)],
            ..power_cycle()
        };
        let mut mocks = mk_radio(RadioConfig::default(), pins);
        mocks.chip.fail_on(opcodes::MEMWR);
        assert!(matches!(mocks.radio.init(), Err(Cc2520Error::Bus(_))));
        assert!(mocks.chip.is_deselected());
        mocks.done();
    }
}
