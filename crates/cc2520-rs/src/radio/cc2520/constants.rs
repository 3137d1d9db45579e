/// Instruction opcodes.
///
/// Instructions that accept a priority bit have it OR'd into the opcode's LSB
/// (see [`mnemonics::PRIORITY_HIGH`]).
pub mod opcodes {
    pub const SNOP: u8 = 0x00;
    pub const IBUFLD: u8 = 0x02;
    pub const SIBUFEX: u8 = 0x03;
    pub const SSAMPLECCA: u8 = 0x04;
    pub const SRES: u8 = 0x0F;
    pub const MEMRD: u8 = 0x10;
    pub const MEMWR: u8 = 0x20;
    pub const RXBUF: u8 = 0x30;
    pub const RXBUFCP: u8 = 0x38;
    pub const RXBUFMOV: u8 = 0x32;
    pub const TXBUF: u8 = 0x3A;
    pub const TXBUFCP: u8 = 0x3E;
    pub const RANDOM: u8 = 0x3C;
    pub const SXOSCON: u8 = 0x40;
    pub const STXCAL: u8 = 0x41;
    pub const SRXON: u8 = 0x42;
    pub const STXON: u8 = 0x43;
    pub const STXONCCA: u8 = 0x44;
    pub const SRFOFF: u8 = 0x45;
    pub const SXOSCOFF: u8 = 0x46;
    pub const SFLUSHRX: u8 = 0x47;
    pub const SFLUSHTX: u8 = 0x48;
    pub const SACK: u8 = 0x49;
    pub const SACKPEND: u8 = 0x4A;
    pub const SNACK: u8 = 0x4B;
    pub const SRXMASKBITSET: u8 = 0x4C;
    pub const SRXMASKBITCLR: u8 = 0x4D;
    pub const RXMASKAND: u8 = 0x4E;
    pub const RXMASKOR: u8 = 0x4F;
    pub const MEMCP: u8 = 0x50;
    pub const MEMCPR: u8 = 0x52;
    pub const MEMXCP: u8 = 0x54;
    pub const MEMXWR: u8 = 0x56;
    pub const BCLR: u8 = 0x58;
    pub const BSET: u8 = 0x59;
    pub const CTR: u8 = 0x60;
    pub const CBCMAC: u8 = 0x64;
    pub const UCBCMAC: u8 = 0x66;
    pub const CCM: u8 = 0x68;
    pub const UCCM: u8 = 0x6A;
    pub const ECB: u8 = 0x70;
    pub const ECBO: u8 = 0x72;
    pub const ECBX: u8 = 0x74;
    pub const ECBXO: u8 = 0x76;
    pub const INC: u8 = 0x78;
    pub const ABORT: u8 = 0x7F;
    pub const REGRD: u8 = 0x80;
    pub const REGWR: u8 = 0xC0;
}

/// Addresses of the FREG registers (reachable with `REGRD`/`REGWR`).
pub mod registers {
    pub const FRMFILT0: u8 = 0x00;
    pub const FRMFILT1: u8 = 0x01;
    pub const SRCMATCH: u8 = 0x02;
    pub const FRMCTRL0: u8 = 0x0C;
    pub const FRMCTRL1: u8 = 0x0D;
    pub const RXENABLE0: u8 = 0x0E;
    pub const EXCFLAG0: u8 = 0x10;
    pub const EXCFLAG1: u8 = 0x11;
    pub const EXCFLAG2: u8 = 0x12;
    pub const GPIOCTRL0: u8 = 0x1E;
    pub const GPIOCTRL1: u8 = 0x1F;
    pub const GPIOCTRL2: u8 = 0x20;
    pub const GPIOCTRL3: u8 = 0x21;
    pub const GPIOCTRL4: u8 = 0x22;
    pub const GPIOCTRL5: u8 = 0x23;
    pub const GPIOPOLARITY: u8 = 0x24;
    pub const GPIOCTRL: u8 = 0x28;
    pub const DPUCON: u8 = 0x2A;
    pub const DPUSTAT: u8 = 0x2C;
    pub const FREQCTRL: u8 = 0x2E;
    pub const FREQTUNE: u8 = 0x2F;
    pub const TXPOWER: u8 = 0x30;
    pub const TXCTRL: u8 = 0x31;
    pub const FSMSTAT0: u8 = 0x32;
    pub const FSMSTAT1: u8 = 0x33;
    pub const FIFOPCTRL: u8 = 0x34;
    pub const FSMCTRL: u8 = 0x35;
    pub const CCACTRL0: u8 = 0x36;
    pub const CCACTRL1: u8 = 0x37;
    pub const RSSI: u8 = 0x38;
    pub const RSSISTAT: u8 = 0x39;
    pub const RXFIRST: u8 = 0x3C;
    pub const RXFIFOCNT: u8 = 0x3E;
    pub const TXFIFOCNT: u8 = 0x3F;
}

/// Addresses of the SREG registers and RAM locations (reachable with `MEMRD`/`MEMWR`).
pub mod memory {
    pub const CHIPID: u16 = 0x40;
    pub const VERSION: u16 = 0x42;
    pub const EXTCLOCK: u16 = 0x44;
    pub const MDMCTRL0: u16 = 0x46;
    pub const MDMCTRL1: u16 = 0x47;
    pub const FREQEST: u16 = 0x48;
    pub const RXCTRL: u16 = 0x4A;
    pub const FSCTRL: u16 = 0x4C;
    pub const FSCAL0: u16 = 0x4E;
    pub const FSCAL1: u16 = 0x4F;
    pub const FSCAL2: u16 = 0x50;
    pub const FSCAL3: u16 = 0x51;
    pub const AGCCTRL0: u16 = 0x52;
    pub const AGCCTRL1: u16 = 0x53;
    pub const AGCCTRL2: u16 = 0x54;
    pub const AGCCTRL3: u16 = 0x55;
    pub const ADCTEST0: u16 = 0x56;
    pub const ADCTEST1: u16 = 0x57;
    pub const ADCTEST2: u16 = 0x58;

    pub const RAM_TXFIFO: u16 = 0x100;
    pub const RAM_RXFIFO: u16 = 0x180;
    pub const RAM_EXTADDR: u16 = 0x3EA;
    pub const RAM_PANID: u16 = 0x3F2;
    pub const RAM_SHORTADDR: u16 = 0x3F4;
}

/// Bit indices into the 24-bit `EXCFLAG0..2` exception bank.
pub mod exceptions {
    pub const RF_IDLE: u8 = 0;
    pub const TX_FRM_DONE: u8 = 1;
    pub const TX_ACK_DONE: u8 = 2;
    pub const TX_UNDERFLOW: u8 = 3;
    pub const TX_OVERFLOW: u8 = 4;
    pub const RX_UNDERFLOW: u8 = 5;
    pub const RX_OVERFLOW: u8 = 6;
    pub const RXENABLE_ZERO: u8 = 7;
    pub const RX_FRM_DONE: u8 = 8;
    pub const RX_FRM_ACCEPTED: u8 = 9;
    pub const SRC_MATCH_DONE: u8 = 10;
    pub const SRC_MATCH_FOUND: u8 = 11;
    pub const FIFOP: u8 = 12;
    pub const SFD: u8 = 13;
}

/// Signals that can be routed to a GPIO pin through `GPIOCTRLn`.
///
/// An exception is routed with the value `1 + exception`.
pub mod gpio {
    pub const FIFO: u8 = 0x27;
    pub const FIFOP: u8 = 0x28;
    pub const CCA: u8 = 0x29;
    pub const SFD: u8 = 0x2A;
    pub const RSSI_VALID: u8 = 0x2C;
    pub const SAMPLED_CCA: u8 = 0x2D;
    pub const SNIFFER_CLK: u8 = 0x31;
    pub const SNIFFER_DATA: u8 = 0x32;
    pub const LNA_PD_INVERTED: u8 = 0x46;
    pub const PA_PD_INVERTED: u8 = 0x47;
    pub const LOW: u8 = 0x7E;
    pub const HIGH: u8 = 0x7F;
}

/// Miscellaneous masks and framing constants.
pub mod mnemonics {
    /// OR'd into an instruction opcode to run it on the high priority DPU.
    pub const PRIORITY_HIGH: u8 = 0x01;
    /// The last FREG address; higher addresses need memory instructions.
    pub const FREG_LIMIT: u8 = 0x3F;
    /// The reserved MSB of a received length byte.
    pub const LEN_MASK: u8 = 0x7F;
    /// The CRC-valid bit of a received frame's last footer byte.
    pub const CRC_OK: u8 = 0x80;
    /// `FRMCTRL0` value enabling automatic CRC generation.
    pub const AUTOCRC: u8 = 0x40;
    /// Expected read back of `MDMCTRL0` after the tuning table is written.
    pub const MDMCTRL0_TUNED: u8 = 0x85;
    /// Length of an 802.15.4 acknowledgement frame (including the footer).
    pub const ACK_FRAME_LEN: u8 = 5;
    /// Length of the automatically appended footer (FCS on air, RSSI/CRC in the RX FIFO).
    pub const FOOTER_LEN: u8 = 2;
    /// Largest PHY payload (PSDU) the chip will put on air.
    pub const MAX_PSDU_LEN: u8 = 127;
    pub const MIN_CHANNEL: u8 = 11;
    pub const MAX_CHANNEL: u8 = 26;
    pub const CHANNEL_SPACING: u8 = 5;
    /// Bit in the `FSMSTAT1` register asserted while a frame's SFD is active.
    pub const FSMSTAT1_SFD: u8 = 0x20;
    /// Bit in the `FSMSTAT1` register asserted while transmitting.
    pub const FSMSTAT1_TX_ACTIVE: u8 = 0x02;
}

/// Timing and retry budgets used during bring-up and transmission.
pub mod timing {
    /// Time to hold RESETn and VREG_EN low before power up (in microseconds).
    pub const RESET_HOLD_US: u32 = 1100;
    /// Worst case voltage regulator start up time (in microseconds).
    pub const VREG_STARTUP_US: u32 = 200;
    /// Number of times SO is sampled while waiting for the crystal oscillator.
    pub const XOSC_POLLS: u16 = 100;
    /// Delay between oscillator polls (in microseconds).
    pub const XOSC_POLL_US: u32 = 10;
    /// Number of `STXONCCA` strobes before giving up on a busy channel.
    pub const CCA_ATTEMPTS: u16 = 2500;
    /// Delay between `STXONCCA` strobes (in microseconds).
    pub const CCA_RETRY_US: u32 = 20;
}
