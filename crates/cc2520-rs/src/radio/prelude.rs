//! This module defines the generic traits that may
//! need to imported to use radio implementations.
//!
//! Since rustc only compiles objects that are used,
//! it is convenient to import these traits with the `*` syntax.
//!
//! ```
//! use cc2520::radio::prelude::*;
//! ```

use crate::types::{FsmStatus, StatusByte};

/// A trait to represent bring-up of an IEEE 802.15.4 transceiver.
pub trait WpanInit {
    type ConfigErrorType;

    /// Power up, reset and configure the radio, then start listening.
    ///
    /// This applies the [`RadioConfig`](struct@crate::radio::RadioConfig) given at construction.
    /// A failure leaves the radio uninitialized; callers may retry or power cycle.
    fn init(&mut self) -> Result<(), Self::ConfigErrorType>;
}

/// A trait to represent manipulation of a channel (aka frequency)
/// for an IEEE 802.15.4 transceiver.
pub trait WpanChannel {
    type ChannelErrorType;

    /// Tune to the given 2.4 GHz channel.
    ///
    /// Valid channels are in range [11, 26]. The value is not range checked.
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::ChannelErrorType>;

    /// Get the currently tuned channel.
    fn get_channel(&mut self) -> Result<u8, Self::ChannelErrorType>;
}

/// A trait to represent manipulation of the addresses used by
/// the transceiver's frame filter.
pub trait WpanAddress {
    type AddressErrorType;

    fn set_pan_id(&mut self, pan_id: u16) -> Result<(), Self::AddressErrorType>;

    fn get_pan_id(&mut self) -> Result<u16, Self::AddressErrorType>;

    fn set_short_address(&mut self, address: u16) -> Result<(), Self::AddressErrorType>;

    fn get_short_address(&mut self) -> Result<u16, Self::AddressErrorType>;

    /// Set the 64 bit IEEE (extended) address.
    fn set_extended_address(&mut self, address: u64) -> Result<(), Self::AddressErrorType>;
}

/// A trait to represent the primary data path of an IEEE 802.15.4 transceiver.
pub trait WpanRadio {
    type RadioErrorType;

    /// Load `payload` into the TX FIFO without transmitting it.
    ///
    /// The chip appends a 2 byte CRC, so `payload` may not exceed
    /// [`MAX_PAYLOAD_LEN`](value@crate::radio::frame::MAX_PAYLOAD_LEN) bytes.
    fn prepare(&mut self, payload: &[u8]) -> Result<(), Self::RadioErrorType>;

    /// Transmit whatever is in the TX FIFO once the channel is clear.
    ///
    /// Blocks until the frame has been sent.
    /// If the channel never clears, the TX FIFO is flushed and an error is returned.
    fn transmit(&mut self) -> Result<(), Self::RadioErrorType>;

    /// [`WpanRadio::prepare()`] then [`WpanRadio::transmit()`].
    fn send(&mut self, payload: &[u8]) -> Result<(), Self::RadioErrorType>;

    /// Copy the oldest received frame into `buf`.
    ///
    /// Returns the number of bytes copied (the frame's length, footer included),
    /// or 0 if nothing is pending. If the frame does not fit in `buf`, every
    /// buffered frame is discarded and 0 is returned.
    fn receive(&mut self, buf: &mut [u8]) -> usize;

    /// How many received frames are waiting to be read?
    fn frames_pending(&self) -> usize;

    /// Enable the receiver and its frame-done interrupt.
    fn receive_on(&mut self) -> Result<(), Self::RadioErrorType>;

    /// Wait for any frame being received, then disable the receiver and its interrupt.
    fn receive_off(&mut self) -> Result<(), Self::RadioErrorType>;

    /// Sample the channel and report if it is clear.
    fn is_channel_clear(&mut self) -> Result<bool, Self::RadioErrorType>;
}

/// A trait to represent manipulation of the transceiver's power state.
pub trait WpanPower {
    type PowerErrorType;

    /// Wait until no frame is in flight, then stop the crystal oscillator.
    fn enter_low_power(&mut self) -> Result<(), Self::PowerErrorType>;

    /// Restart the crystal oscillator and resume listening.
    fn exit_low_power(&mut self) -> Result<(), Self::PowerErrorType>;

    /// Is the radio in low power mode?
    fn is_low_power(&self) -> bool;
}

/// A trait to represent the state reported by the transceiver.
pub trait WpanStatus {
    type StatusErrorType;

    /// Is a frame being received (SFD seen, frame not finished)?
    fn rx_active(&mut self) -> Result<bool, Self::StatusErrorType>;

    /// Is a frame being transmitted?
    fn tx_active(&mut self) -> Result<bool, Self::StatusErrorType>;

    /// Neither receiving nor transmitting.
    fn is_idle(&mut self) -> Result<bool, Self::StatusErrorType>;

    /// Read the radio control state machine's status.
    fn get_fsm_status(&mut self) -> Result<FsmStatus, Self::StatusErrorType>;

    /// Refresh the cached [`StatusByte`] with a no-op instruction.
    fn update(&mut self) -> Result<(), Self::StatusErrorType>;

    /// The [`StatusByte`] returned by the last instruction.
    fn get_status(&self) -> StatusByte;
}

/// A trait to represent debug output of the transceiver's configuration.
pub trait WpanDetails {
    type DetailsErrorType;

    /// Print details about the radio's current configuration.
    ///
    /// This function is a no-op unless the `defmt` or `std` feature is enabled.
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType>;
}
