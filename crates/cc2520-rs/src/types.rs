//! This module defines types used by various traits.
//! These types are meant to be agnostic of the trait implementation.

use core::{
    fmt::{Display, Formatter, Result},
    write,
};

use bitfield_struct::bitfield;

/// The conceptual operating state of the link-layer driver.
///
/// Most states follow from the sequence of driver calls. [`LinkState::Receiving`]
/// is only reported after sampling the chip's SFD status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkState {
    /// Driver constructed but the chip has not been brought up.
    Uninitialized,
    /// Receiver enabled and no frame in flight.
    Idle,
    /// Receiver enabled and a frame is arriving (SFD asserted).
    Receiving,
    /// Receiver disabled with [`receive_off()`](fn@crate::radio::prelude::WpanRadio::receive_off).
    ///
    /// The chip is powered and configured but will not raise receive interrupts.
    RadioOff,
    /// A frame is being pushed to the air.
    Transmitting,
    /// Crystal oscillator and frequency synthesizer are off.
    LowPower,
}

impl LinkState {
    /// Can the chip accept bus instructions that touch the RF core?
    pub const fn is_awake(self) -> bool {
        matches!(
            self,
            LinkState::Idle | LinkState::Receiving | LinkState::RadioOff | LinkState::Transmitting
        )
    }
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for LinkState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            LinkState::Uninitialized => defmt::write!(fmt, "Uninitialized"),
            LinkState::Idle => defmt::write!(fmt, "Idle"),
            LinkState::Receiving => defmt::write!(fmt, "Receiving"),
            LinkState::RadioOff => defmt::write!(fmt, "RadioOff"),
            LinkState::Transmitting => defmt::write!(fmt, "Transmitting"),
            LinkState::LowPower => defmt::write!(fmt, "LowPower"),
        }
    }
}

impl Display for LinkState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            LinkState::Uninitialized => write!(f, "Uninitialized"),
            LinkState::Idle => write!(f, "Idle"),
            LinkState::Receiving => write!(f, "Receiving"),
            LinkState::RadioOff => write!(f, "RadioOff"),
            LinkState::Transmitting => write!(f, "Transmitting"),
            LinkState::LowPower => write!(f, "LowPower"),
        }
    }
}

/// The optional RF front end wired to the transceiver's GPIO pins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrontEnd {
    /// The transceiver drives the antenna directly.
    ///
    /// GPIO3 reports SFD and GPIO4/5 carry the packet sniffer's data and clock.
    None,
    /// A CC2591 range extender is attached.
    ///
    /// GPIO3 holds the CC2591 in high gain mode while GPIO4/5 drive its
    /// LNA and PA enable lines (with inverted polarity).
    Cc2591,
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for FrontEnd {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FrontEnd::None => defmt::write!(fmt, "None"),
            FrontEnd::Cc2591 => defmt::write!(fmt, "CC2591"),
        }
    }
}

impl Display for FrontEnd {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            FrontEnd::None => write!(f, "None"),
            FrontEnd::Cc2591 => write!(f, "CC2591"),
        }
    }
}

/// The status byte clocked out by the chip during the first byte of every instruction.
///
/// ```
/// use cc2520::StatusByte;
/// let status = StatusByte::from_bits(0x80);
/// assert!(status.xosc_stable());
/// ```
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct StatusByte {
    /// The crystal oscillator is running and stable.
    #[bits(1, access = RO)]
    pub xosc_stable: bool,

    /// The RSSI value is valid (receiver has been on for at least 8 symbol periods).
    #[bits(1, access = RO)]
    pub rssi_valid: bool,

    /// An exception mapped to exception channel B has fired.
    #[bits(1, access = RO)]
    pub exception_b: bool,

    /// An exception mapped to exception channel A has fired.
    #[bits(1, access = RO)]
    pub exception_a: bool,

    /// The high priority data processing unit is busy.
    #[bits(1, access = RO)]
    pub dpu_h_active: bool,

    /// The low priority data processing unit is busy.
    #[bits(1, access = RO)]
    pub dpu_l_active: bool,

    /// The transmitter is active.
    #[bits(1, access = RO)]
    pub tx_active: bool,

    /// The receiver is active.
    #[bits(1, access = RO)]
    pub rx_active: bool,
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for StatusByte {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "StatusByte xosc_stable: {}, rssi_valid: {}, tx_active: {}, rx_active: {}",
            self.xosc_stable(),
            self.rssi_valid(),
            self.tx_active(),
            self.rx_active()
        )
    }
}

impl Display for StatusByte {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "StatusByte xosc_stable: {}, rssi_valid: {}, tx_active: {}, rx_active: {}",
            self.xosc_stable(),
            self.rssi_valid(),
            self.tx_active(),
            self.rx_active()
        )
    }
}

/// A view of the radio control state machine's `FSMSTAT1` register.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct FsmStatus {
    /// The RX FIFO holds at least one byte.
    #[bits(1, access = RO)]
    pub fifo: bool,

    /// The RX FIFO holds a complete frame (or passed its threshold).
    #[bits(1, access = RO)]
    pub fifop: bool,

    /// A start of frame delimiter was sent or received and the frame is still in flight.
    #[bits(1, access = RO)]
    pub sfd: bool,

    /// The channel is currently clear.
    #[bits(1, access = RO)]
    pub cca: bool,

    /// The channel was clear when last sampled.
    #[bits(1, access = RO)]
    pub sampled_cca: bool,

    /// The frequency synthesizer is locked.
    #[bits(1, access = RO)]
    pub lock: bool,

    /// The transmitter is active.
    #[bits(1, access = RO)]
    pub tx_active: bool,

    /// The receiver is active.
    #[bits(1, access = RO)]
    pub rx_active: bool,
}

impl FsmStatus {
    /// Is a frame currently being received?
    ///
    /// This follows the SFD bit rather than `rx_active` because the receiver
    /// stays active while merely listening.
    pub const fn receiving(&self) -> bool {
        self.sfd()
    }

    /// Is the chip neither receiving nor transmitting a frame?
    pub const fn idle(&self) -> bool {
        !self.sfd() && !self.tx_active()
    }
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for FsmStatus {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "FsmStatus sfd: {}, cca: {}, lock: {}, tx_active: {}, rx_active: {}",
            self.sfd(),
            self.cca(),
            self.lock(),
            self.tx_active(),
            self.rx_active()
        )
    }
}

impl Display for FsmStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "FsmStatus sfd: {}, cca: {}, lock: {}, tx_active: {}, rx_active: {}",
            self.sfd(),
            self.cca(),
            self.lock(),
            self.tx_active(),
            self.rx_active()
        )
    }
}
