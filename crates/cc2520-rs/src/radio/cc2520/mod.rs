use core::fmt::{Display, Formatter};

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};
mod address;
mod channel;
mod constants;
mod details;
mod init;
mod instructions;
mod power;
mod radio;
mod receive;
mod security;
mod status;
pub use constants::{exceptions, gpio, memory, mnemonics, opcodes, registers, timing};
pub use instructions::{Instructions, Priority};
pub use security::CipherArgs;

use super::RadioConfig;
use crate::{
    bus::Cc2520Bus,
    irq::InterruptControl,
    ring_buffer::FrameQueue,
    types::{FsmStatus, LinkState},
    FrontEnd,
};

/// A collection of error types to describe hardware malfunctions and misuse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cc2520Error<BUS, DI, DO> {
    /// Represents an error from the bus transaction layer.
    Bus(BUS),
    /// Represents a DigitalInput error.
    Gpi(DI),
    /// Represents a DigitalOutput error.
    Gpo(DO),
    /// The crystal oscillator did not report stable during bring-up.
    OscillatorNotReady,
    /// A register written during bring-up did not read back as expected.
    ConfigVerificationFailed,
    /// Clear channel assessment never passed, so nothing was sent.
    ///
    /// The TX FIFO has been flushed.
    ChannelNeverClear,
    /// The payload exceeds [`MAX_PAYLOAD_LEN`](value@crate::radio::frame::MAX_PAYLOAD_LEN).
    FrameTooLarge,
    /// The operation is not allowed in the driver's current state.
    InvalidState(LinkState),
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl<BUS, DI, DO> defmt::Format for Cc2520Error<BUS, DI, DO> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Cc2520Error::Bus(_) => defmt::write!(fmt, "bus transaction failed"),
            Cc2520Error::Gpi(_) => defmt::write!(fmt, "digital input failed"),
            Cc2520Error::Gpo(_) => defmt::write!(fmt, "digital output failed"),
            Cc2520Error::OscillatorNotReady => defmt::write!(fmt, "oscillator not ready"),
            Cc2520Error::ConfigVerificationFailed => {
                defmt::write!(fmt, "configuration verification failed")
            }
            Cc2520Error::ChannelNeverClear => defmt::write!(fmt, "channel never clear"),
            Cc2520Error::FrameTooLarge => defmt::write!(fmt, "frame too large"),
            Cc2520Error::InvalidState(state) => defmt::write!(fmt, "invalid in state {}", state),
        }
    }
}

impl<BUS, DI, DO> Display for Cc2520Error<BUS, DI, DO> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Cc2520Error::Bus(_) => write!(f, "bus transaction failed"),
            Cc2520Error::Gpi(_) => write!(f, "digital input failed"),
            Cc2520Error::Gpo(_) => write!(f, "digital output failed"),
            Cc2520Error::OscillatorNotReady => write!(f, "oscillator not ready"),
            Cc2520Error::ConfigVerificationFailed => {
                write!(f, "configuration verification failed")
            }
            Cc2520Error::ChannelNeverClear => write!(f, "channel never clear"),
            Cc2520Error::FrameTooLarge => write!(f, "frame too large"),
            Cc2520Error::InvalidState(state) => write!(f, "invalid in state {state}"),
        }
    }
}

/// The GPIO lines wired between the MCU and the transceiver.
///
/// The chip's GPIO0 output (frame received) is not listed here; it belongs to the
/// [`InterruptControl`] implementation given to [`Cc2520::new()`].
pub struct Cc2520Pins<DI, DO> {
    /// The SPI MISO line, sampled while chip select is held low to detect
    /// a stable crystal oscillator.
    pub so: DI,
    /// GPIO1, routed to the sampled CCA signal.
    pub sampled_cca: DI,
    /// GPIO2, routed to RSSI valid (temporarily re-routed during transmission).
    pub gpio2: DI,
    /// GPIO3, routed to SFD when no front end is attached.
    pub sfd: DI,
    /// The active low reset line.
    pub reset: DO,
    /// The voltage regulator enable line.
    pub vreg_en: DO,
}

/// This struct implements the [`Wpan*` traits](mod@crate::radio::prelude)
/// for the CC2520 transceiver.
///
/// Received frames are buffered in a [`FrameQueue`] of `N` bytes by the
/// receive interrupt handler ([`Cc2520::handle_rx_interrupt()`]).
pub struct Cc2520<BUS, DI, DO, IRQ, DELAY, const N: usize = 512> {
    _ins: Instructions<BUS>,
    _pins: Cc2520Pins<DI, DO>,
    _irq: IRQ,
    _delay_impl: DELAY,
    _config: RadioConfig,
    _state: LinkState,
    _fsm: FsmStatus,
    _rx_queue: FrameQueue<N>,
    _rx_frame: [u8; 128],
}

impl<BUS, DI, DO, IRQ, DELAY, const N: usize> Cc2520<BUS, DI, DO, IRQ, DELAY, N>
where
    BUS: Cc2520Bus,
    DI: InputPin,
    DO: OutputPin,
    IRQ: InterruptControl,
    DELAY: DelayNs,
{
    /// Instantiate a [`Cc2520`] object.
    ///
    /// Nothing is sent to the chip until [`init()`](fn@crate::radio::prelude::WpanInit::init)
    /// is called.
    pub fn new(
        bus: BUS,
        pins: Cc2520Pins<DI, DO>,
        irq: IRQ,
        delay_impl: DELAY,
        config: RadioConfig,
    ) -> Self {
        Self {
            _ins: Instructions::new(bus),
            _pins: pins,
            _irq: irq,
            _delay_impl: delay_impl,
            _config: config,
            _state: LinkState::Uninitialized,
            _fsm: FsmStatus::from_bits(0),
            _rx_queue: FrameQueue::new(),
            _rx_frame: [0u8; 128],
        }
    }

    /// The configuration applied by [`init()`](fn@crate::radio::prelude::WpanInit::init).
    pub fn config(&self) -> &RadioConfig {
        &self._config
    }

    /// The driver's current [`LinkState`].
    ///
    /// When the receiver is idle, the chip is asked whether a frame is arriving
    /// and [`LinkState::Receiving`] is reported if so.
    pub fn state(&mut self) -> Result<LinkState, Cc2520Error<BUS::Error, DI::Error, DO::Error>> {
        if self._state == LinkState::Idle {
            let fsm = self.read_fsm()?;
            if fsm.receiving() {
                return Ok(LinkState::Receiving);
            }
        }
        Ok(self._state)
    }

    /// Read the `CHIPID` register (0x84 for a CC2520).
    pub fn chip_id(&mut self) -> Result<u8, Cc2520Error<BUS::Error, DI::Error, DO::Error>> {
        self._ins
            .mem_read8(memory::CHIPID)
            .map_err(Cc2520Error::Bus)
    }

    /// Read the `VERSION` register.
    pub fn chip_version(&mut self) -> Result<u8, Cc2520Error<BUS::Error, DI::Error, DO::Error>> {
        self._ins
            .mem_read8(memory::VERSION)
            .map_err(Cc2520Error::Bus)
    }

    /// How many bytes (length bytes included) are buffered in the receive queue?
    pub fn pending_bytes(&self) -> usize {
        self._rx_queue.bytes()
    }

    /// Direct access to the instruction set layer.
    ///
    /// Useful for the security instructions (see [`CipherArgs`]).
    /// Instructions that change the RF state will confuse the driver's [`LinkState`].
    pub fn instructions(&mut self) -> &mut Instructions<BUS> {
        &mut self._ins
    }

    /// Consume the driver and give back its resources.
    pub fn release(self) -> (BUS, Cc2520Pins<DI, DO>, IRQ, DELAY) {
        (
            self._ins.release(),
            self._pins,
            self._irq,
            self._delay_impl,
        )
    }

    fn require_awake(&self) -> Result<(), Cc2520Error<BUS::Error, DI::Error, DO::Error>> {
        if self._state.is_awake() {
            Ok(())
        } else {
            Err(Cc2520Error::InvalidState(self._state))
        }
    }

    /// Transmission needs the receiver on (CCA is sampled by the receive chain).
    fn require_listening(&self) -> Result<(), Cc2520Error<BUS::Error, DI::Error, DO::Error>> {
        match self._state {
            LinkState::Idle | LinkState::Receiving => Ok(()),
            state => Err(Cc2520Error::InvalidState(state)),
        }
    }

    fn read_fsm(&mut self) -> Result<FsmStatus, Cc2520Error<BUS::Error, DI::Error, DO::Error>> {
        let value = self
            ._ins
            .reg_read8(registers::FSMSTAT1)
            .map_err(Cc2520Error::Bus)?;
        self._fsm = FsmStatus::from_bits(value);
        Ok(self._fsm)
    }

    fn wait_for_gpio2(&mut self) -> Result<(), Cc2520Error<BUS::Error, DI::Error, DO::Error>> {
        while !self._pins.gpio2.is_high().map_err(Cc2520Error::Gpi)? {}
        Ok(())
    }

    /// Route `signal` to GPIO2 for the duration of `op`.
    ///
    /// GPIO2 is routed back to RSSI valid afterward, even if `op` failed.
    fn with_gpio2<T, F>(
        &mut self,
        signal: u8,
        op: F,
    ) -> Result<T, Cc2520Error<BUS::Error, DI::Error, DO::Error>>
    where
        F: FnOnce(&mut Self) -> Result<T, Cc2520Error<BUS::Error, DI::Error, DO::Error>>,
    {
        critical_section::with(|_| self._ins.reg_write8(registers::GPIOCTRL2, signal))
            .map_err(Cc2520Error::Bus)?;
        let result = op(self);
        let restored =
            critical_section::with(|_| self._ins.reg_write8(registers::GPIOCTRL2, gpio::RSSI_VALID))
                .map_err(Cc2520Error::Bus);
        let value = result?;
        restored?;
        Ok(value)
    }

    /// Block until no frame is being received.
    fn wait_transceiver_ready(
        &mut self,
    ) -> Result<(), Cc2520Error<BUS::Error, DI::Error, DO::Error>> {
        match self._config.front_end() {
            FrontEnd::None => {
                while self._pins.sfd.is_high().map_err(Cc2520Error::Gpi)? {}
                Ok(())
            }
            // GPIO3 is busy controlling the front end, so SFD is borrowed through GPIO2
            FrontEnd::Cc2591 => self.with_gpio2(gpio::SFD, |radio| {
                while radio._pins.gpio2.is_high().map_err(Cc2520Error::Gpi)? {}
                Ok(())
            }),
        }
    }

    /// Mask the receive interrupt and acknowledge anything already latched.
    fn disable_rx_interrupt(&mut self) -> Result<(), Cc2520Error<BUS::Error, DI::Error, DO::Error>> {
        self._irq.disable();
        let cleared = self
            ._ins
            .clear_exception(exceptions::RX_FRM_DONE)
            .map_err(Cc2520Error::Bus);
        self._irq.clear();
        cleared.map(|_| ())
    }

    /// Sample SO with chip select held low until the crystal oscillator reports stable.
    ///
    /// `polls` limits the number of samples (with a delay in between). `None` waits forever.
    fn wait_oscillator(
        &mut self,
        polls: Option<u16>,
    ) -> Result<bool, Cc2520Error<BUS::Error, DI::Error, DO::Error>> {
        self._ins.bus().begin().map_err(Cc2520Error::Bus)?;
        let ready = self.poll_so(polls);
        let end = self._ins.bus().end().map_err(Cc2520Error::Bus);
        let ready = ready?;
        end?;
        Ok(ready)
    }

    fn poll_so(
        &mut self,
        polls: Option<u16>,
    ) -> Result<bool, Cc2520Error<BUS::Error, DI::Error, DO::Error>> {
        match polls {
            Some(polls) => {
                for _ in 0..polls {
                    if self._pins.so.is_high().map_err(Cc2520Error::Gpi)? {
                        return Ok(true);
                    }
                    self._delay_impl.delay_us(timing::XOSC_POLL_US);
                }
                Ok(false)
            }
            None => {
                while !self._pins.so.is_high().map_err(Cc2520Error::Gpi)? {}
                Ok(true)
            }
        }
    }
}
