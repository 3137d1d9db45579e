use super::{exceptions, mnemonics, timing, Cc2520, Cc2520Error};
use crate::{
    bus::Cc2520Bus,
    irq::InterruptControl,
    radio::{
        frame::MAX_PAYLOAD_LEN,
        prelude::{WpanRadio, WpanStatus},
    },
    LinkState,
};
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};

impl<BUS, DI, DO, IRQ, DELAY, const N: usize> Cc2520<BUS, DI, DO, IRQ, DELAY, N>
where
    BUS: Cc2520Bus,
    DI: InputPin,
    DO: OutputPin,
    IRQ: InterruptControl,
    DELAY: DelayNs,
{
    /// Strobe `STXONCCA` until the sampled CCA signal reports a clear channel,
    /// then wait for the frame to leave.
    ///
    /// GPIO2 must already be routed to the TX frame done exception.
    fn transmit_when_clear(&mut self) -> Result<(), Cc2520Error<BUS::Error, DI::Error, DO::Error>> {
        let mut clear = false;
        for _ in 0..timing::CCA_ATTEMPTS {
            critical_section::with(|_| self._ins.stxoncca()).map_err(Cc2520Error::Bus)?;
            if self._pins.sampled_cca.is_high().map_err(Cc2520Error::Gpi)? {
                clear = true;
                break;
            }
            self._delay_impl.delay_us(timing::CCA_RETRY_US);
        }
        if !clear {
            self._ins.sflushtx().map_err(Cc2520Error::Bus)?;
            #[cfg(feature = "defmt")]
            #[cfg(target_os = "none")]
            defmt::warn!("channel never cleared, TX FIFO flushed");
            return Err(Cc2520Error::ChannelNeverClear);
        }

        // TX_FRM_DONE
        self.wait_for_gpio2()?;
        critical_section::with(|_| self._ins.clear_exception(exceptions::TX_FRM_DONE))
            .map_err(Cc2520Error::Bus)?;
        Ok(())
    }
}

impl<BUS, DI, DO, IRQ, DELAY, const N: usize> WpanRadio for Cc2520<BUS, DI, DO, IRQ, DELAY, N>
where
    BUS: Cc2520Bus,
    DI: InputPin,
    DO: OutputPin,
    IRQ: InterruptControl,
    DELAY: DelayNs,
{
    type RadioErrorType = Cc2520Error<BUS::Error, DI::Error, DO::Error>;

    /// Waits for any frame being received to finish, then writes the length byte
    /// and `payload` to the TX FIFO.
    ///
    /// The receive interrupt is masked while the FIFO is written.
    /// Oversized payloads are rejected before the bus is touched.
    fn prepare(&mut self, payload: &[u8]) -> Result<(), Self::RadioErrorType> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(Cc2520Error::FrameTooLarge);
        }
        self.require_listening()?;
        self.wait_transceiver_ready()?;

        self.disable_rx_interrupt()?;
        let len = payload.len() as u8 + mnemonics::FOOTER_LEN;
        let written = self
            ._ins
            .txbuf(&[len])
            .and_then(|_| self._ins.txbuf(payload))
            .map_err(Cc2520Error::Bus);
        self._irq.enable();
        written?;
        Ok(())
    }

    /// GPIO2 is routed to the TX frame done exception for the duration of this call.
    fn transmit(&mut self) -> Result<(), Self::RadioErrorType> {
        self.require_listening()?;
        // RSSI must be valid before CCA means anything
        self.wait_for_gpio2()?;

        self._state = LinkState::Transmitting;
        let result = self.with_gpio2(1 + exceptions::TX_FRM_DONE, |radio| {
            radio.transmit_when_clear()
        });
        self._state = LinkState::Idle;
        result
    }

    fn send(&mut self, payload: &[u8]) -> Result<(), Self::RadioErrorType> {
        self.prepare(payload)?;
        self.transmit()
    }

    fn receive(&mut self, buf: &mut [u8]) -> usize {
        self._rx_queue.pop(buf)
    }

    fn frames_pending(&self) -> usize {
        self._rx_queue.frames()
    }

    fn receive_on(&mut self) -> Result<(), Self::RadioErrorType> {
        self.require_awake()?;
        self._ins.srxon().map_err(Cc2520Error::Bus)?;
        self._irq.enable();
        self._state = LinkState::Idle;
        Ok(())
    }

    fn receive_off(&mut self) -> Result<(), Self::RadioErrorType> {
        self.require_awake()?;
        while self.rx_active()? {}
        self.disable_rx_interrupt()?;
        self._ins.srfoff().map_err(Cc2520Error::Bus)?;
        self._state = LinkState::RadioOff;
        Ok(())
    }

    fn is_channel_clear(&mut self) -> Result<bool, Self::RadioErrorType> {
        self.require_awake()?;
        self._ins.ssamplecca().map_err(Cc2520Error::Bus)?;
        self._pins.sampled_cca.is_high().map_err(Cc2520Error::Gpi)
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::super::test::mk_idle_radio;
    use crate::{
        radio::{
            cc2520::{exceptions, gpio, opcodes, registers, Cc2520Error},
            prelude::WpanRadio,
            RadioConfig,
        },
        test::{mk_radio, IrqEvent, PinExpectations},
        FrontEnd, LinkState,
    };
    use embedded_hal_mock::eh1::digital::{State as PinState, Transaction as PinTransaction};
    use std::{vec, vec::Vec};

    const PAYLOAD: [u8; 5] = [0x41, 0x88, 0x01, 0xCD, 0xAB];
    const BCLR_TX_DONE: [u8; 2] = [opcodes::BCLR, registers::EXCFLAG0 * 8 + exceptions::TX_FRM_DONE];
    const BCLR_RX_DONE: [u8; 2] = [opcodes::BCLR, registers::EXCFLAG0 * 8 + exceptions::RX_FRM_DONE];

    fn count(log: &[Vec<u8>], transaction: &[u8]) -> usize {
        log.iter().filter(|t| t.as_slice() == transaction).count()
    }

    #[test]
    fn send_happy_path() {
        let pins = PinExpectations {
            // not receiving
            sfd: vec![PinTransaction::get(PinState::Low)],
            // RSSI valid, then TX frame done
            gpio2: vec![
                PinTransaction::get(PinState::High),
                PinTransaction::get(PinState::High),
            ],
            sampled_cca: vec![PinTransaction::get(PinState::High)],
            ..Default::default()
        };
        let mut mocks = mk_idle_radio(RadioConfig::default(), pins);
        mocks.radio.send(&PAYLOAD).unwrap();

        let log = mocks.chip.transactions();
        assert_eq!(count(&log, &[opcodes::TXBUF, 7]), 1);
        let mut body = vec![opcodes::TXBUF];
        body.extend_from_slice(&PAYLOAD);
        assert_eq!(count(&log, &body), 1);
        assert_eq!(count(&log, &BCLR_TX_DONE), 1);
        assert_eq!(count(&log, &[opcodes::STXONCCA]), 1);
        assert_eq!(count(&log, &[opcodes::SFLUSHTX]), 0);
        assert_eq!(mocks.chip.tx_fifo(), [&[7u8][..], &PAYLOAD[..]].concat());
        // GPIO2 re-routed for the transmission, then restored
        assert_eq!(
            count(&log, &[opcodes::REGWR | registers::GPIOCTRL2, 1 + exceptions::TX_FRM_DONE]),
            1
        );
        assert_eq!(
            log.last().unwrap(),
            &vec![opcodes::REGWR | registers::GPIOCTRL2, gpio::RSSI_VALID]
        );
        assert_eq!(mocks.radio._state, LinkState::Idle);
        // receive interrupt masked while loading the FIFO
        let events = mocks.irq.events();
        assert_eq!(events[0], IrqEvent::Disable);
        assert!(mocks.irq.is_enabled());
        mocks.done();
    }

    #[test]
    fn send_channel_never_clear() {
        let pins = PinExpectations {
            sfd: vec![PinTransaction::get(PinState::Low)],
            gpio2: vec![PinTransaction::get(PinState::High)],
            sampled_cca: vec![PinTransaction::get(PinState::Low); 2500],
            ..Default::default()
        };
        let mut mocks = mk_idle_radio(RadioConfig::default(), pins);
        assert!(matches!(
            mocks.radio.send(&PAYLOAD),
            Err(Cc2520Error::ChannelNeverClear)
        ));

        let log = mocks.chip.transactions();
        assert_eq!(count(&log, &[opcodes::STXONCCA]), 2500);
        assert_eq!(count(&log, &[opcodes::SFLUSHTX]), 1);
        assert_eq!(count(&log, &BCLR_TX_DONE), 0);
        assert!(mocks.chip.tx_fifo().is_empty());
        assert_eq!(
            log.last().unwrap(),
            &vec![opcodes::REGWR | registers::GPIOCTRL2, gpio::RSSI_VALID]
        );
        assert_eq!(mocks.radio._state, LinkState::Idle);
        mocks.done();
    }

    #[test]
    fn oversized_payload_touches_nothing() {
        let mut mocks = mk_idle_radio(RadioConfig::default(), PinExpectations::default());
        let payload = [0u8; 126];
        assert!(matches!(
            mocks.radio.send(&payload),
            Err(Cc2520Error::FrameTooLarge)
        ));
        assert!(mocks.chip.transactions().is_empty());
        assert!(mocks.irq.events().is_empty());
        mocks.done();

        // largest legal payload
        let pins = PinExpectations {
            sfd: vec![PinTransaction::get(PinState::Low)],
            ..Default::default()
        };
        let mut mocks = mk_idle_radio(RadioConfig::default(), pins);
        mocks.radio.prepare(&[0xAA; 125]).unwrap();
        assert_eq!(mocks.chip.tx_fifo().len(), 126);
        assert_eq!(mocks.chip.tx_fifo()[0], 127);
        mocks.done();
    }

    #[test]
    fn prepare_needs_receiver() {
        let mut mocks = mk_radio(RadioConfig::default(), PinExpectations::default());
        assert!(matches!(
            mocks.radio.prepare(&PAYLOAD),
            Err(Cc2520Error::InvalidState(LinkState::Uninitialized))
        ));
        mocks.radio._state = LinkState::LowPower;
        assert!(matches!(
            mocks.radio.send(&PAYLOAD),
            Err(Cc2520Error::InvalidState(LinkState::LowPower))
        ));
        mocks.radio._state = LinkState::RadioOff;
        assert!(matches!(
            mocks.radio.transmit(),
            Err(Cc2520Error::InvalidState(LinkState::RadioOff))
        ));
        assert!(mocks.chip.transactions().is_empty());
        mocks.done();
    }

    #[test]
    fn prepare_waits_for_sfd() {
        let pins = PinExpectations {
            sfd: vec![
                PinTransaction::get(PinState::High),
                PinTransaction::get(PinState::High),
                PinTransaction::get(PinState::Low),
            ],
            ..Default::default()
        };
        let mut mocks = mk_idle_radio(RadioConfig::default(), pins);
        mocks.radio.prepare(&PAYLOAD).unwrap();
        let log = mocks.chip.transactions();
        assert_eq!(log[0], BCLR_RX_DONE.to_vec());
        assert_eq!(log[1], vec![opcodes::TXBUF, 7]);
        mocks.done();
    }

    #[test]
    fn prepare_with_cc2591_borrows_gpio2() {
        let pins = PinExpectations {
            gpio2: vec![
                PinTransaction::get(PinState::High),
                PinTransaction::get(PinState::Low),
            ],
            ..Default::default()
        };
        let config = RadioConfig::default().with_front_end(FrontEnd::Cc2591);
        let mut mocks = mk_idle_radio(config, pins);
        mocks.radio.prepare(&PAYLOAD).unwrap();
        let log = mocks.chip.transactions();
        assert_eq!(log[0], vec![opcodes::REGWR | registers::GPIOCTRL2, gpio::SFD]);
        assert_eq!(
            log[1],
            vec![opcodes::REGWR | registers::GPIOCTRL2, gpio::RSSI_VALID]
        );
        assert_eq!(log[2], BCLR_RX_DONE.to_vec());
        mocks.done();
    }

    #[test]
    fn receive_on_off() {
        let mut mocks = mk_idle_radio(RadioConfig::default(), PinExpectations::default());
        mocks.radio.receive_off().unwrap();
        assert_eq!(mocks.radio._state, LinkState::RadioOff);
        assert!(!mocks.irq.is_enabled());
        mocks.radio.receive_on().unwrap();
        assert_eq!(mocks.radio._state, LinkState::Idle);
        assert!(mocks.irq.is_enabled());

        let log = mocks.chip.transactions();
        assert_eq!(log[0], vec![opcodes::REGRD | registers::FSMSTAT1, 0]);
        assert_eq!(log[1], BCLR_RX_DONE.to_vec());
        assert_eq!(log[2], vec![opcodes::SRFOFF]);
        assert_eq!(log[3], vec![opcodes::SRXON]);

        mocks.radio._state = LinkState::LowPower;
        assert!(matches!(
            mocks.radio.receive_on(),
            Err(Cc2520Error::InvalidState(LinkState::LowPower))
        ));
        mocks.done();
    }

    #[test]
    fn channel_clear_sampling() {
        let pins = PinExpectations {
            sampled_cca: vec![
                PinTransaction::get(PinState::High),
                PinTransaction::get(PinState::Low),
            ],
            ..Default::default()
        };
        let mut mocks = mk_idle_radio(RadioConfig::default(), pins);
        assert!(mocks.radio.is_channel_clear().unwrap());
        assert!(!mocks.radio.is_channel_clear().unwrap());
        assert_eq!(
            mocks.chip.transactions(),
            vec![vec![opcodes::SSAMPLECCA], vec![opcodes::SSAMPLECCA]]
        );
        mocks.done();
    }
}
