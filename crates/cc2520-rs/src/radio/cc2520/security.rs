//! Instructions driving the chip's AES security engine.
//!
//! The link-layer driver never invokes these. They exist so applications can
//! run CTR, CBC-MAC, CCM and ECB transforms on data already held in chip RAM.
//! Keys, nonces and data all live in chip memory and are referenced by address;
//! key and nonce addresses are given in units of 16 bytes.

use super::{
    instructions::{hi, lo, Instructions, Priority},
    opcodes,
};
use crate::{bus::Cc2520Bus, types::StatusByte};

/// The operands shared by the security instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CipherArgs {
    /// Which DPU queue to run on.
    pub priority: Priority,
    /// Key address (`address / 16`).
    pub key: u8,
    /// Number of bytes (or blocks, for the ECB variants) to process.
    pub count: u8,
    /// Nonce address (`address / 16`). Ignored by instructions without a nonce.
    pub nonce: u8,
    /// Source address in chip memory.
    pub src: u16,
    /// Destination address in chip memory.
    pub dest: u16,
}

impl CipherArgs {
    const fn addresses(&self) -> [u8; 3] {
        [
            (hi(self.src) << 4) | (hi(self.dest) & 0x0F),
            lo(self.src),
            lo(self.dest),
        ]
    }

    const fn opcode(&self, opcode: u8) -> u8 {
        opcode | self.priority.into_bits()
    }
}

impl<BUS> Instructions<BUS>
where
    BUS: Cc2520Bus,
{
    /// Counter mode encryption (or decryption, the transform is symmetric).
    pub fn ctr(&mut self, args: &CipherArgs) -> Result<StatusByte, BUS::Error> {
        let [a0, a1, a2] = args.addresses();
        self.write_security_header(&[
            args.opcode(opcodes::CTR),
            args.key,
            args.count,
            args.nonce,
            a0,
            a1,
            a2,
        ])
    }

    /// Counter mode decryption. Shares its opcode with [`Instructions::ctr()`].
    pub fn uctr(&mut self, args: &CipherArgs) -> Result<StatusByte, BUS::Error> {
        self.ctr(args)
    }

    /// Compute a CBC-MAC of `args.count` bytes at `args.src`, storing the tag at `args.dest`.
    ///
    /// `tag_len` selects the MIC length.
    pub fn cbcmac(&mut self, args: &CipherArgs, tag_len: u8) -> Result<StatusByte, BUS::Error> {
        let [a0, a1, a2] = args.addresses();
        self.write_security_header(&[
            args.opcode(opcodes::CBCMAC),
            args.key,
            args.count,
            a0,
            a1,
            a2,
            tag_len,
        ])
    }

    /// Verify a CBC-MAC. Only `args.src` is used as an address.
    pub fn ucbcmac(&mut self, args: &CipherArgs, tag_len: u8) -> Result<StatusByte, BUS::Error> {
        self.write_security_header(&[
            args.opcode(opcodes::UCBCMAC),
            args.key,
            args.count,
            hi(args.src) & 0x0F,
            lo(args.src),
            tag_len,
        ])
    }

    /// CCM authenticated encryption.
    ///
    /// `auth_len` is the number of bytes to authenticate only and `tag_len` selects the MIC length.
    pub fn ccm(
        &mut self,
        args: &CipherArgs,
        auth_len: u8,
        tag_len: u8,
    ) -> Result<StatusByte, BUS::Error> {
        self.ccm_common(opcodes::CCM, args, auth_len, tag_len)
    }

    /// CCM authenticated decryption.
    pub fn uccm(
        &mut self,
        args: &CipherArgs,
        auth_len: u8,
        tag_len: u8,
    ) -> Result<StatusByte, BUS::Error> {
        self.ccm_common(opcodes::UCCM, args, auth_len, tag_len)
    }

    fn ccm_common(
        &mut self,
        opcode: u8,
        args: &CipherArgs,
        auth_len: u8,
        tag_len: u8,
    ) -> Result<StatusByte, BUS::Error> {
        let [a0, a1, a2] = args.addresses();
        self.write_security_header(&[
            args.opcode(opcode),
            args.key,
            args.count,
            args.nonce,
            a0,
            a1,
            a2,
            auth_len,
            tag_len,
        ])
    }

    fn ecb_common(&mut self, opcode: u8, args: &CipherArgs) -> Result<StatusByte, BUS::Error> {
        self.write_security_header(&[
            args.opcode(opcode),
            args.key,
            (args.count << 4) | (hi(args.src) & 0x0F),
            lo(args.src),
            hi(args.dest),
            lo(args.dest),
        ])
    }

    fn ecb_in_place(&mut self, opcode: u8, args: &CipherArgs) -> Result<StatusByte, BUS::Error> {
        self.write_security_header(&[
            args.opcode(opcode),
            args.key,
            (args.count << 4) | (hi(args.src) & 0x0F),
            lo(args.src),
        ])
    }

    /// AES ECB encryption of one block from `args.src` to `args.dest`.
    pub fn ecb(&mut self, args: &CipherArgs) -> Result<StatusByte, BUS::Error> {
        self.ecb_common(opcodes::ECB, args)
    }

    /// AES ECB encryption overwriting the block at `args.src`.
    pub fn ecbo(&mut self, args: &CipherArgs) -> Result<StatusByte, BUS::Error> {
        self.ecb_in_place(opcodes::ECBO, args)
    }

    /// AES ECB encryption of `args.src`, XOR'd into `args.dest`.
    pub fn ecbx(&mut self, args: &CipherArgs) -> Result<StatusByte, BUS::Error> {
        self.ecb_common(opcodes::ECBX, args)
    }

    /// AES ECB encryption of `args.src`, XOR'd onto itself.
    pub fn ecbxo(&mut self, args: &CipherArgs) -> Result<StatusByte, BUS::Error> {
        self.ecb_in_place(opcodes::ECBXO, args)
    }

    /// Increment the `2^count` byte wide little endian counter at `addr`.
    pub fn inc(&mut self, priority: Priority, count: u8, addr: u16) -> Result<StatusByte, BUS::Error> {
        self.write_security_header(&[
            opcodes::INC | priority.into_bits(),
            (count << 4) | (hi(addr) & 0x0F),
            lo(addr),
        ])
    }

    /// Abort the security instruction running on (or queued to) the given DPU selection.
    pub fn abort(&mut self, selection: u8) -> Result<StatusByte, BUS::Error> {
        self.write_security_header(&[opcodes::ABORT, selection])
    }
}
