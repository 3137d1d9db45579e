//! Helpers for the frame format exchanged through the chip's FIFOs.
//!
//! A frame in either FIFO is `[len][MAC header + payload][footer]` where `len`
//! counts everything after itself, footer included. With automatic CRC enabled
//! the chip appends the 2 byte FCS on transmit, and replaces it with the
//! [`FrameFooter`] on receive.

use super::cc2520::mnemonics;
use core::fmt::{Display, Formatter, Result};

/// The largest payload that [`send()`](fn@crate::radio::prelude::WpanRadio::send) accepts.
///
/// The length byte, payload and the appended footer must fit in 128 bytes.
pub const MAX_PAYLOAD_LEN: usize = (mnemonics::MAX_PSDU_LEN - mnemonics::FOOTER_LEN) as usize;

/// Frame control field of a data frame without acknowledgement request.
pub const FCF_NO_ACK: u16 = 0x8841;
/// Frame control field of a data frame requesting an acknowledgement.
pub const FCF_ACK: u16 = 0x8861;
/// The acknowledgement request bit of a frame control field.
pub const FCF_ACK_REQUEST: u16 = 0x0020;

/// The frame control field for a data frame using short addresses and PAN ID compression.
///
/// For callers building MAC headers; the driver itself never inspects it.
pub const fn data_frame_control(ack_request: bool) -> u16 {
    if ack_request {
        FCF_ACK
    } else {
        FCF_NO_ACK
    }
}

/// Does a received length byte describe an acknowledgement frame?
///
/// Only acknowledgements are exactly 5 bytes long (footer included).
pub const fn is_ack_length(len: u8) -> bool {
    len & mnemonics::LEN_MASK == mnemonics::ACK_FRAME_LEN
}

/// The 2 byte footer that replaces the FCS of a received frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameFooter {
    /// The received signal strength (in dBm, before the datasheet's offset correction).
    pub rssi: i8,
    /// Was the frame's CRC valid?
    pub crc_ok: bool,
    /// The correlation value (link quality indicator).
    pub correlation: u8,
}

impl FrameFooter {
    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        Self {
            rssi: bytes[0] as i8,
            crc_ok: bytes[1] & mnemonics::CRC_OK != 0,
            correlation: bytes[1] & !mnemonics::CRC_OK,
        }
    }

    /// Parse the footer of a frame body (everything after the length byte).
    ///
    /// Returns `None` if `body` is shorter than a footer.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        match body {
            [.., rssi, status] => Some(Self::from_bytes([*rssi, *status])),
            _ => None,
        }
    }
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for FrameFooter {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "FrameFooter rssi: {=i8}, crc_ok: {=bool}, correlation: {=u8}",
            self.rssi,
            self.crc_ok,
            self.correlation
        )
    }
}

impl Display for FrameFooter {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "FrameFooter rssi: {}, crc_ok: {}, correlation: {}",
            self.rssi, self.crc_ok, self.correlation
        )
    }
}
