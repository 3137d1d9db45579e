use crate::{radio::frame, FrontEnd};

/// An object to configure the radio.
///
/// This struct follows a builder pattern. Since all fields are private, users should
/// start with the [`RadioConfig::default`] constructor, then mutate the object accordingly.
/// ```
/// use cc2520::radio::RadioConfig;
/// let config = RadioConfig::default().with_channel(15).with_pan_id(0x2222);
/// assert_eq!(config.channel(), 15);
/// ```
///
/// The configuration is handed to [`Cc2520::new()`](fn@crate::radio::Cc2520::new)
/// and applied by [`WpanInit::init()`](fn@crate::radio::prelude::WpanInit::init).
/// It cannot be changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadioConfig {
    channel: u8,
    pan_id: u16,
    short_address: u16,
    ack_request: bool,
    front_end: FrontEnd,
}

impl Default for RadioConfig {
    /// Instantiate a [`RadioConfig`] object with library defaults.
    ///
    /// | feature | default value |
    /// |--------:|:--------------|
    /// | [`RadioConfig::channel()`] | `11` |
    /// | [`RadioConfig::pan_id()`] | `0xABCD` |
    /// | [`RadioConfig::short_address()`] | `0x1234` |
    /// | [`RadioConfig::ack_request()`] | `false` |
    /// | [`RadioConfig::front_end()`] | [`FrontEnd::None`] |
    fn default() -> Self {
        Self {
            channel: 11,
            pan_id: 0xABCD,
            short_address: 0x1234,
            ack_request: false,
            front_end: FrontEnd::None,
        }
    }
}

impl RadioConfig {
    /// Returns the value set by [`RadioConfig::with_channel()`].
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// The 802.15.4 channel (in range [11, 26]).
    ///
    /// The value is stored as given; see
    /// [`WpanChannel::set_channel()`](fn@crate::radio::prelude::WpanChannel::set_channel).
    pub fn with_channel(self, channel: u8) -> Self {
        Self { channel, ..self }
    }

    /// Returns the value set by [`RadioConfig::with_pan_id()`].
    pub const fn pan_id(&self) -> u16 {
        self.pan_id
    }

    /// The PAN identifier used by the chip's frame filter.
    pub fn with_pan_id(self, pan_id: u16) -> Self {
        Self { pan_id, ..self }
    }

    /// Returns the value set by [`RadioConfig::with_short_address()`].
    pub const fn short_address(&self) -> u16 {
        self.short_address
    }

    /// This node's 16 bit short address.
    pub fn with_short_address(self, short_address: u16) -> Self {
        Self {
            short_address,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_ack_request()`].
    pub const fn ack_request(&self) -> bool {
        self.ack_request
    }

    /// Should outgoing data frames ask for an acknowledgement?
    ///
    /// The driver neither builds MAC headers nor matches acknowledgements (they are
    /// dropped on receipt). This is for callers building the MAC header: it selects
    /// the frame control field given by [`RadioConfig::frame_control()`].
    pub fn with_ack_request(self, enable: bool) -> Self {
        Self {
            ack_request: enable,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_front_end()`].
    pub const fn front_end(&self) -> FrontEnd {
        self.front_end
    }

    /// The RF front end attached to the transceiver.
    pub fn with_front_end(self, front_end: FrontEnd) -> Self {
        Self { front_end, ..self }
    }

    /// The frame control field for a data frame with short addressing and PAN ID compression.
    ///
    /// The driver sends payloads as given, so callers put this (little endian)
    /// at the start of the MAC header they pass to
    /// [`send()`](fn@crate::radio::prelude::WpanRadio::send).
    pub const fn frame_control(&self) -> u16 {
        frame::data_frame_control(self.ack_request)
    }
}
