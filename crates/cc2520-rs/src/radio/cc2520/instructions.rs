use super::{mnemonics, opcodes, registers};
use crate::{bus::Cc2520Bus, types::StatusByte};

/// The DPU priority an instruction is queued on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Priority {
    #[default]
    Low,
    High,
}

impl Priority {
    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            Priority::Low => 0,
            Priority::High => mnemonics::PRIORITY_HIGH,
        }
    }
}

pub(crate) const fn hi(value: u16) -> u8 {
    (value >> 8) as u8
}

pub(crate) const fn lo(value: u16) -> u8 {
    value as u8
}

/// The CC2520 instruction set, one method per instruction.
///
/// Every method is exactly one chip-select framed transaction on the underlying
/// [`Cc2520Bus`]. The status byte clocked out with each opcode is cached and
/// available from [`Instructions::status()`].
///
/// Block operations transfer exactly `buf.len()` bytes; callers size the
/// buffer to the count the chip expects.
pub struct Instructions<BUS> {
    bus: BUS,
    status: StatusByte,
}

impl<BUS> Instructions<BUS>
where
    BUS: Cc2520Bus,
{
    pub fn new(bus: BUS) -> Self {
        Self {
            bus,
            status: StatusByte::from_bits(0),
        }
    }

    /// The status byte returned by the most recent instruction.
    pub fn status(&self) -> StatusByte {
        self.status
    }

    /// Direct access to the bus transaction layer.
    ///
    /// Used to hold chip select low without clocking an instruction.
    pub fn bus(&mut self) -> &mut BUS {
        &mut self.bus
    }

    pub fn release(self) -> BUS {
        self.bus
    }

    /// Run one transaction: send `header` (opcode first), then hand the bus to `body`.
    ///
    /// Chip select is released even if an exchange fails.
    fn transact<T, F>(&mut self, header: &[u8], body: F) -> Result<T, BUS::Error>
    where
        F: FnOnce(&mut BUS) -> Result<T, BUS::Error>,
    {
        self.bus.begin()?;
        let mut result = Ok(());
        for (i, byte) in header.iter().enumerate() {
            match self.bus.exchange(*byte) {
                Ok(status) if i == 0 => self.status = StatusByte::from_bits(status),
                Ok(_) => (),
                Err(e) => {
                    result = Err(e);
                    break;
                }
            }
        }
        let value = result.and_then(|_| body(&mut self.bus));
        let end = self.bus.end();
        let value = value?;
        end?;
        Ok(value)
    }

    fn write_header(&mut self, header: &[u8], data: &[u8]) -> Result<StatusByte, BUS::Error> {
        self.transact(header, |bus| {
            for byte in data {
                bus.exchange(*byte)?;
            }
            Ok(())
        })?;
        Ok(self.status)
    }

    fn read_header(&mut self, header: &[u8], buf: &mut [u8]) -> Result<StatusByte, BUS::Error> {
        self.transact(header, |bus| {
            for byte in buf.iter_mut() {
                *byte = bus.exchange(0)?;
            }
            Ok(())
        })?;
        Ok(self.status)
    }

    fn read_le(&mut self, header: &[u8], width: usize) -> Result<u32, BUS::Error> {
        let mut buf = [0u8; 4];
        self.read_header(header, &mut buf[..width])?;
        Ok(u32::from_le_bytes(buf))
    }

    const fn mem_header(opcode: u8, addr: u16) -> [u8; 2] {
        [opcode | (hi(addr) & 0x0F), lo(addr)]
    }

    const fn reg_header(opcode: u8, addr: u8) -> [u8; 1] {
        [opcode | (addr & mnemonics::FREG_LIMIT)]
    }

    /* ******************** strobes ******************** */

    /// Send a single byte instruction with no payload.
    pub fn strobe(&mut self, opcode: u8) -> Result<StatusByte, BUS::Error> {
        self.write_header(&[opcode], &[])
    }

    pub fn snop(&mut self) -> Result<StatusByte, BUS::Error> {
        self.strobe(opcodes::SNOP)
    }

    pub fn sibufex(&mut self) -> Result<StatusByte, BUS::Error> {
        self.strobe(opcodes::SIBUFEX)
    }

    pub fn ssamplecca(&mut self) -> Result<StatusByte, BUS::Error> {
        self.strobe(opcodes::SSAMPLECCA)
    }

    pub fn sxoscon(&mut self) -> Result<StatusByte, BUS::Error> {
        self.strobe(opcodes::SXOSCON)
    }

    pub fn stxcal(&mut self) -> Result<StatusByte, BUS::Error> {
        self.strobe(opcodes::STXCAL)
    }

    pub fn srxon(&mut self) -> Result<StatusByte, BUS::Error> {
        self.strobe(opcodes::SRXON)
    }

    pub fn stxon(&mut self) -> Result<StatusByte, BUS::Error> {
        self.strobe(opcodes::STXON)
    }

    pub fn stxoncca(&mut self) -> Result<StatusByte, BUS::Error> {
        self.strobe(opcodes::STXONCCA)
    }

    pub fn srfoff(&mut self) -> Result<StatusByte, BUS::Error> {
        self.strobe(opcodes::SRFOFF)
    }

    pub fn sxoscoff(&mut self) -> Result<StatusByte, BUS::Error> {
        self.strobe(opcodes::SXOSCOFF)
    }

    pub fn sflushrx(&mut self) -> Result<StatusByte, BUS::Error> {
        self.strobe(opcodes::SFLUSHRX)
    }

    pub fn sflushtx(&mut self) -> Result<StatusByte, BUS::Error> {
        self.strobe(opcodes::SFLUSHTX)
    }

    pub fn sack(&mut self) -> Result<StatusByte, BUS::Error> {
        self.strobe(opcodes::SACK)
    }

    pub fn sackpend(&mut self) -> Result<StatusByte, BUS::Error> {
        self.strobe(opcodes::SACKPEND)
    }

    pub fn snack(&mut self) -> Result<StatusByte, BUS::Error> {
        self.strobe(opcodes::SNACK)
    }

    pub fn srxmaskbitset(&mut self) -> Result<StatusByte, BUS::Error> {
        self.strobe(opcodes::SRXMASKBITSET)
    }

    pub fn srxmaskbitclr(&mut self) -> Result<StatusByte, BUS::Error> {
        self.strobe(opcodes::SRXMASKBITCLR)
    }

    /// Load an instruction into the immediate instruction buffer.
    pub fn ibufld(&mut self, instruction: u8) -> Result<StatusByte, BUS::Error> {
        self.write_header(&[opcodes::IBUFLD, instruction], &[])
    }

    /// Software reset. The chip needs a fresh oscillator start afterwards.
    pub fn sres(&mut self) -> Result<StatusByte, BUS::Error> {
        self.write_header(&[opcodes::SRES, 0], &[])
    }

    /* ******************** registers ******************** */

    /// Read `buf.len()` consecutive FREG registers starting at `addr`.
    pub fn reg_read(&mut self, addr: u8, buf: &mut [u8]) -> Result<StatusByte, BUS::Error> {
        self.read_header(&Self::reg_header(opcodes::REGRD, addr), buf)
    }

    pub fn reg_read8(&mut self, addr: u8) -> Result<u8, BUS::Error> {
        Ok(self.read_le(&Self::reg_header(opcodes::REGRD, addr), 1)? as u8)
    }

    pub fn reg_read16(&mut self, addr: u8) -> Result<u16, BUS::Error> {
        Ok(self.read_le(&Self::reg_header(opcodes::REGRD, addr), 2)? as u16)
    }

    pub fn reg_read24(&mut self, addr: u8) -> Result<u32, BUS::Error> {
        self.read_le(&Self::reg_header(opcodes::REGRD, addr), 3)
    }

    /// Write `data` to consecutive FREG registers starting at `addr`.
    pub fn reg_write(&mut self, addr: u8, data: &[u8]) -> Result<StatusByte, BUS::Error> {
        self.write_header(&Self::reg_header(opcodes::REGWR, addr), data)
    }

    pub fn reg_write8(&mut self, addr: u8, value: u8) -> Result<StatusByte, BUS::Error> {
        self.reg_write(addr, &[value])
    }

    pub fn reg_write16(&mut self, addr: u8, value: u16) -> Result<StatusByte, BUS::Error> {
        self.reg_write(addr, &value.to_le_bytes())
    }

    pub fn reg_write24(&mut self, addr: u8, value: u32) -> Result<StatusByte, BUS::Error> {
        self.reg_write(addr, &value.to_le_bytes()[..3])
    }

    /* ******************** memory ******************** */

    /// Read `buf.len()` bytes of chip memory starting at the 12 bit address `addr`.
    pub fn mem_read(&mut self, addr: u16, buf: &mut [u8]) -> Result<StatusByte, BUS::Error> {
        self.read_header(&Self::mem_header(opcodes::MEMRD, addr), buf)
    }

    pub fn mem_read8(&mut self, addr: u16) -> Result<u8, BUS::Error> {
        Ok(self.read_le(&Self::mem_header(opcodes::MEMRD, addr), 1)? as u8)
    }

    pub fn mem_read16(&mut self, addr: u16) -> Result<u16, BUS::Error> {
        Ok(self.read_le(&Self::mem_header(opcodes::MEMRD, addr), 2)? as u16)
    }

    pub fn mem_read24(&mut self, addr: u16) -> Result<u32, BUS::Error> {
        self.read_le(&Self::mem_header(opcodes::MEMRD, addr), 3)
    }

    /// Write `data` to chip memory starting at the 12 bit address `addr`.
    pub fn mem_write(&mut self, addr: u16, data: &[u8]) -> Result<StatusByte, BUS::Error> {
        self.write_header(&Self::mem_header(opcodes::MEMWR, addr), data)
    }

    pub fn mem_write8(&mut self, addr: u16, value: u8) -> Result<StatusByte, BUS::Error> {
        self.mem_write(addr, &[value])
    }

    pub fn mem_write16(&mut self, addr: u16, value: u16) -> Result<StatusByte, BUS::Error> {
        self.mem_write(addr, &value.to_le_bytes())
    }

    pub fn mem_write24(&mut self, addr: u16, value: u32) -> Result<StatusByte, BUS::Error> {
        self.mem_write(addr, &value.to_le_bytes()[..3])
    }

    /* ******************** FIFOs ******************** */

    /// Pop `buf.len()` bytes from the RX FIFO.
    pub fn rxbuf(&mut self, buf: &mut [u8]) -> Result<StatusByte, BUS::Error> {
        self.read_header(&[opcodes::RXBUF], buf)
    }

    pub fn rxbuf8(&mut self) -> Result<u8, BUS::Error> {
        Ok(self.read_le(&[opcodes::RXBUF], 1)? as u8)
    }

    pub fn rxbuf16(&mut self) -> Result<u16, BUS::Error> {
        Ok(self.read_le(&[opcodes::RXBUF], 2)? as u16)
    }

    /// Copy `buf.len()` bytes from the RX FIFO to `buf` and to chip memory at `addr`.
    pub fn rxbufcp(&mut self, addr: u16, buf: &mut [u8]) -> Result<StatusByte, BUS::Error> {
        self.read_header(&[opcodes::RXBUFCP, hi(addr) & 0x0F, lo(addr)], buf)
    }

    /// Move `count` bytes from the RX FIFO into chip memory at `addr`.
    pub fn rxbufmov(
        &mut self,
        priority: Priority,
        addr: u16,
        count: u8,
    ) -> Result<StatusByte, BUS::Error> {
        let opcode = opcodes::RXBUFMOV | priority.into_bits();
        self.write_header(&[opcode, count, hi(addr) & 0x0F, lo(addr)], &[])
    }

    /// Push `data` into the TX FIFO.
    pub fn txbuf(&mut self, data: &[u8]) -> Result<StatusByte, BUS::Error> {
        self.write_header(&[opcodes::TXBUF], data)
    }

    pub fn txbuf8(&mut self, value: u8) -> Result<StatusByte, BUS::Error> {
        self.txbuf(&[value])
    }

    pub fn txbuf16(&mut self, value: u16) -> Result<StatusByte, BUS::Error> {
        self.txbuf(&value.to_le_bytes())
    }

    /// Copy `count` bytes from chip memory at `addr` into the TX FIFO.
    pub fn txbufcp(
        &mut self,
        priority: Priority,
        addr: u16,
        count: u8,
    ) -> Result<StatusByte, BUS::Error> {
        let opcode = opcodes::TXBUFCP | priority.into_bits();
        self.write_header(&[opcode, count, hi(addr) & 0x0F, lo(addr)], &[])
    }

    /// Read `buf.len()` random bytes generated by the radio's noise source.
    pub fn random(&mut self, buf: &mut [u8]) -> Result<StatusByte, BUS::Error> {
        self.read_header(&[opcodes::RANDOM, 0], buf)
    }

    pub fn random8(&mut self) -> Result<u8, BUS::Error> {
        Ok(self.read_le(&[opcodes::RANDOM, 0], 1)? as u8)
    }

    pub fn random16(&mut self) -> Result<u16, BUS::Error> {
        Ok(self.read_le(&[opcodes::RANDOM, 0], 2)? as u16)
    }

    /* ******************** frame filter mask ******************** */

    pub fn rxmask_or(&mut self, mask: u16) -> Result<StatusByte, BUS::Error> {
        self.write_header(&[opcodes::RXMASKOR, hi(mask), lo(mask)], &[])
    }

    pub fn rxmask_and(&mut self, mask: u16) -> Result<StatusByte, BUS::Error> {
        self.write_header(&[opcodes::RXMASKAND, hi(mask), lo(mask)], &[])
    }

    /* ******************** memory copy ******************** */

    fn memcp_common(
        &mut self,
        opcode: u8,
        priority: Priority,
        count: u8,
        src: u16,
        dest: u16,
    ) -> Result<StatusByte, BUS::Error> {
        self.write_header(
            &[
                opcode | priority.into_bits(),
                count,
                (hi(src) << 4) | (hi(dest) & 0x0F),
                lo(src),
                lo(dest),
            ],
            &[],
        )
    }

    /// Copy `count` bytes of chip memory from `src` to `dest`.
    pub fn memcp(
        &mut self,
        priority: Priority,
        count: u8,
        src: u16,
        dest: u16,
    ) -> Result<StatusByte, BUS::Error> {
        self.memcp_common(opcodes::MEMCP, priority, count, src, dest)
    }

    /// Like [`Instructions::memcp()`] but reverses the byte order.
    pub fn memcpr(
        &mut self,
        priority: Priority,
        count: u8,
        src: u16,
        dest: u16,
    ) -> Result<StatusByte, BUS::Error> {
        self.memcp_common(opcodes::MEMCPR, priority, count, src, dest)
    }

    /// XOR `count` bytes at `src` into `dest`.
    pub fn memxcp(
        &mut self,
        priority: Priority,
        count: u8,
        src: u16,
        dest: u16,
    ) -> Result<StatusByte, BUS::Error> {
        self.memcp_common(opcodes::MEMXCP, priority, count, src, dest)
    }

    /// XOR `data` into chip memory starting at `addr`.
    pub fn memxwr(&mut self, addr: u16, data: &[u8]) -> Result<StatusByte, BUS::Error> {
        self.write_header(&[opcodes::MEMXWR, hi(addr) & 0x0F, lo(addr)], data)
    }

    /* ******************** bit access ******************** */

    /// Set one bit of the bit-addressable FREG area (`bit_addr = reg * 8 + bit`).
    pub fn bset(&mut self, bit_addr: u8) -> Result<StatusByte, BUS::Error> {
        self.write_header(&[opcodes::BSET, bit_addr], &[])
    }

    /// Clear one bit of the bit-addressable FREG area (`bit_addr = reg * 8 + bit`).
    pub fn bclr(&mut self, bit_addr: u8) -> Result<StatusByte, BUS::Error> {
        self.write_header(&[opcodes::BCLR, bit_addr], &[])
    }

    /// Clear a latched exception flag (see [`exceptions`](mod@super::exceptions)).
    pub fn clear_exception(&mut self, exception: u8) -> Result<StatusByte, BUS::Error> {
        self.bclr(registers::EXCFLAG0 * 8 + exception)
    }

    /// Is the given exception flag latched?
    pub fn got_exception(&mut self, exception: u8) -> Result<bool, BUS::Error> {
        let flags = self.reg_read8(registers::EXCFLAG0 + (exception >> 3))?;
        Ok(flags & (1 << (exception & 7)) != 0)
    }

    pub(super) fn write_security_header(&mut self, header: &[u8]) -> Result<StatusByte, BUS::Error> {
        self.write_header(header, &[])
    }
}
