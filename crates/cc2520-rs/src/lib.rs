#![doc = include_str!("../README.md")]
//!
//! ## Basic API
//!
//! - [`Cc2520::new()`](fn@crate::radio::Cc2520::new)
//! - [`Cc2520::init()`](radio/struct.Cc2520.html#method.init)
//! - [`Cc2520::send()`](radio/struct.Cc2520.html#method.send)
//! - [`Cc2520::receive()`](radio/struct.Cc2520.html#method.receive)
//! - [`Cc2520::frames_pending()`](radio/struct.Cc2520.html#method.frames_pending)
//! - [`Cc2520::handle_rx_interrupt()`](fn@crate::radio::Cc2520::handle_rx_interrupt)
//! - [`Cc2520::set_channel()`](radio/struct.Cc2520.html#method.set_channel)
//! - [`Cc2520::get_channel()`](radio/struct.Cc2520.html#method.get_channel)
//!
//! ## Advanced API
//!
//! - [`Cc2520::prepare()`](radio/struct.Cc2520.html#method.prepare)
//! - [`Cc2520::transmit()`](radio/struct.Cc2520.html#method.transmit)
//! - [`Cc2520::receive_on()`](radio/struct.Cc2520.html#method.receive_on)
//! - [`Cc2520::receive_off()`](radio/struct.Cc2520.html#method.receive_off)
//! - [`Cc2520::is_channel_clear()`](radio/struct.Cc2520.html#method.is_channel_clear)
//! - [`Cc2520::state()`](fn@crate::radio::Cc2520::state)
//! - [`Cc2520::update()`](radio/struct.Cc2520.html#method.update)
//! - [`Cc2520::get_status()`](radio/struct.Cc2520.html#method.get_status)
//! - [`Cc2520::get_fsm_status()`](radio/struct.Cc2520.html#method.get_fsm_status)
//! - [`Cc2520::instructions()`](fn@crate::radio::Cc2520::instructions)
//! - [`Cc2520::chip_id()`](fn@crate::radio::Cc2520::chip_id)
//! - [`Cc2520::pending_bytes()`](fn@crate::radio::Cc2520::pending_bytes)
//!
//! ## Configuration API
//!
//! - [`RadioConfig`](struct@crate::radio::RadioConfig)
//! - [`Cc2520::set_pan_id()`](radio/struct.Cc2520.html#method.set_pan_id)
//! - [`Cc2520::set_short_address()`](radio/struct.Cc2520.html#method.set_short_address)
//! - [`Cc2520::set_extended_address()`](radio/struct.Cc2520.html#method.set_extended_address)
//! - [`Cc2520::enter_low_power()`](radio/struct.Cc2520.html#method.enter_low_power)
//! - [`Cc2520::exit_low_power()`](radio/struct.Cc2520.html#method.exit_low_power)
//!
#![no_std]

pub mod bus;
pub mod irq;
pub mod ring_buffer;
mod types;
pub use types::{FrontEnd, FsmStatus, LinkState, StatusByte};
pub mod radio;

#[cfg(test)]
mod test {
    extern crate std;
    use crate::{
        bus::Cc2520Bus,
        irq::{Edge, InterruptControl},
        radio::{cc2520::opcodes, Cc2520, Cc2520Pins, RadioConfig},
    };
    use core::cell::RefCell;
    use embedded_hal_mock::eh1::{
        delay::NoopDelay,
        digital::{Mock as PinMock, Transaction as PinTransaction},
    };
    use std::{collections::VecDeque, rc::Rc, vec, vec::Vec};

    /// The error raised by [`FakeChip`] when told to fail.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct FakeBusError;

    struct ChipState {
        status: u8,
        memory: Vec<u8>,
        frozen: Vec<(u16, u8)>,
        scripted: Vec<(u16, VecDeque<u8>)>,
        rx_fifo: VecDeque<u8>,
        tx_fifo: Vec<u8>,
        log: Vec<Vec<u8>>,
        selected: bool,
        fail_on: Option<u8>,
    }

    impl ChipState {
        fn read(&mut self, addr: u16) -> u8 {
            let addr = addr & 0xFFF;
            if let Some((_, value)) = self.frozen.iter().find(|(a, _)| *a == addr) {
                return *value;
            }
            if let Some((_, queue)) = self.scripted.iter_mut().find(|(a, _)| *a == addr) {
                if let Some(value) = queue.pop_front() {
                    return value;
                }
            }
            self.memory[addr as usize]
        }

        fn write(&mut self, addr: u16, value: u8) {
            let addr = addr & 0xFFF;
            if !self.frozen.iter().any(|(a, _)| *a == addr) {
                self.memory[addr as usize] = value;
            }
        }

        /// Respond to byte `pos` of the current transaction, whose opcode is `op`.
        fn respond(&mut self, op: u8, pos: usize, byte: u8) -> u8 {
            let mem_addr = |t: &[u8]| ((op as u16 & 0x0F) << 8) | t[1] as u16;
            match op {
                0x80..=0xBF => self.read((op & 0x3F) as u16 + pos as u16 - 1),
                0xC0..=0xFF => {
                    self.write((op & 0x3F) as u16 + pos as u16 - 1, byte);
                    0
                }
                0x10..=0x1F if pos > 1 => {
                    let addr = mem_addr(self.log.last().map(Vec::as_slice).unwrap_or(&[]));
                    self.read(addr + pos as u16 - 2)
                }
                0x20..=0x2F if pos > 1 => {
                    let addr = mem_addr(self.log.last().map(Vec::as_slice).unwrap_or(&[]));
                    self.write(addr + pos as u16 - 2, byte);
                    0
                }
                opcodes::RXBUF => self.rx_fifo.pop_front().unwrap_or(0),
                opcodes::TXBUF => {
                    self.tx_fifo.push(byte);
                    0
                }
                opcodes::BCLR | opcodes::BSET if pos == 1 => {
                    let reg = (byte >> 3) as u16;
                    let mask = 1u8 << (byte & 7);
                    let value = self.read(reg);
                    if op == opcodes::BSET {
                        self.write(reg, value | mask);
                    } else {
                        self.write(reg, value & !mask);
                    }
                    0
                }
                _ => 0,
            }
        }
    }

    /// A software model of the chip's serial interface.
    ///
    /// Registers and RAM share one memory map. Every transaction's MOSI bytes are
    /// logged, and the first MISO byte of each transaction is the status byte.
    #[derive(Clone)]
    pub struct FakeChip(Rc<RefCell<ChipState>>);

    impl FakeChip {
        pub fn new() -> Self {
            Self(Rc::new(RefCell::new(ChipState {
                status: 0,
                memory: vec![0u8; 0x1000],
                frozen: Vec::new(),
                scripted: Vec::new(),
                rx_fifo: VecDeque::new(),
                tx_fifo: Vec::new(),
                log: Vec::new(),
                selected: false,
                fail_on: None,
            })))
        }

        pub fn set_status(&self, status: u8) {
            self.0.borrow_mut().status = status;
        }

        /// The MOSI bytes of every transaction so far.
        pub fn transactions(&self) -> Vec<Vec<u8>> {
            self.0.borrow().log.clone()
        }

        pub fn is_deselected(&self) -> bool {
            !self.0.borrow().selected
        }

        pub fn peek(&self, addr: u16) -> u8 {
            self.0.borrow().memory[addr as usize]
        }

        pub fn poke(&self, addr: u16, value: u8) {
            self.0.borrow_mut().memory[addr as usize] = value;
        }

        /// Make `addr` read as `value` and ignore writes to it.
        pub fn freeze(&self, addr: u16, value: u8) {
            self.0.borrow_mut().frozen.push((addr, value));
        }

        /// The next reads of `addr` return `values` (in order) before falling back to memory.
        pub fn script_reads(&self, addr: u16, values: &[u8]) {
            self.0
                .borrow_mut()
                .scripted
                .push((addr, values.iter().copied().collect()));
        }

        pub fn load_rx_fifo(&self, data: &[u8]) {
            self.0.borrow_mut().rx_fifo.extend(data.iter().copied());
        }

        pub fn tx_fifo(&self) -> Vec<u8> {
            self.0.borrow().tx_fifo.clone()
        }

        /// Fail any transaction that starts with `opcode`.
        pub fn fail_on(&self, opcode: u8) {
            self.0.borrow_mut().fail_on = Some(opcode);
        }
    }

    impl Cc2520Bus for FakeChip {
        type Error = FakeBusError;

        fn begin(&mut self) -> Result<(), Self::Error> {
            let mut state = self.0.borrow_mut();
            state.selected = true;
            state.log.push(Vec::new());
            Ok(())
        }

        fn exchange(&mut self, byte: u8) -> Result<u8, Self::Error> {
            let mut state = self.0.borrow_mut();
            let transaction = state.log.last_mut().ok_or(FakeBusError)?;
            let pos = transaction.len();
            transaction.push(byte);
            let op = transaction[0];
            if pos == 0 {
                if state.fail_on == Some(byte) {
                    return Err(FakeBusError);
                }
                match byte {
                    opcodes::SFLUSHRX => state.rx_fifo.clear(),
                    opcodes::SFLUSHTX => state.tx_fifo.clear(),
                    _ => (),
                }
                return Ok(state.status);
            }
            Ok(state.respond(op, pos, byte))
        }

        fn end(&mut self) -> Result<(), Self::Error> {
            self.0.borrow_mut().selected = false;
            Ok(())
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum IrqEvent {
        Enable,
        Disable,
        Clear,
        SetEdge(Edge),
    }

    #[derive(Default)]
    struct IrqState {
        enabled: bool,
        events: Vec<IrqEvent>,
    }

    /// Records what the driver does with its interrupt pin.
    #[derive(Clone, Default)]
    pub struct FakeIrq(Rc<RefCell<IrqState>>);

    impl FakeIrq {
        pub fn events(&self) -> Vec<IrqEvent> {
            self.0.borrow().events.clone()
        }

        pub fn is_enabled(&self) -> bool {
            self.0.borrow().enabled
        }

        fn record(&self, event: IrqEvent) {
            let mut state = self.0.borrow_mut();
            match event {
                IrqEvent::Enable => state.enabled = true,
                IrqEvent::Disable => state.enabled = false,
                _ => (),
            }
            state.events.push(event);
        }
    }

    impl InterruptControl for FakeIrq {
        fn enable(&mut self) {
            self.record(IrqEvent::Enable);
        }

        fn disable(&mut self) {
            self.record(IrqEvent::Disable);
        }

        fn clear(&mut self) {
            self.record(IrqEvent::Clear);
        }

        fn set_edge(&mut self, edge: Edge) {
            self.record(IrqEvent::SetEdge(edge));
        }
    }

    /// Expected transactions for each of the driver's pins.
    #[derive(Default)]
    pub struct PinExpectations {
        pub so: Vec<PinTransaction>,
        pub sampled_cca: Vec<PinTransaction>,
        pub gpio2: Vec<PinTransaction>,
        pub sfd: Vec<PinTransaction>,
        pub reset: Vec<PinTransaction>,
        pub vreg_en: Vec<PinTransaction>,
    }

    /// A struct to encapsulate objects used to mock [`Cc2520`].
    pub struct MockRadio {
        pub radio: Cc2520<FakeChip, PinMock, PinMock, FakeIrq, NoopDelay>,
        pub chip: FakeChip,
        pub pins: Cc2520Pins<PinMock, PinMock>,
        pub irq: FakeIrq,
    }

    impl MockRadio {
        /// Verify every pin expectation was consumed.
        pub fn done(&mut self) {
            self.pins.so.done();
            self.pins.sampled_cca.done();
            self.pins.gpio2.done();
            self.pins.sfd.done();
            self.pins.reset.done();
            self.pins.vreg_en.done();
        }
    }

    /// Create a mock radio (not yet initialized) using the given pin expectations.
    pub fn mk_radio(config: RadioConfig, expectations: PinExpectations) -> MockRadio {
        let chip = FakeChip::new();
        let irq = FakeIrq::default();
        let pins = Cc2520Pins {
            so: PinMock::new(&expectations.so),
            sampled_cca: PinMock::new(&expectations.sampled_cca),
            gpio2: PinMock::new(&expectations.gpio2),
            sfd: PinMock::new(&expectations.sfd),
            reset: PinMock::new(&expectations.reset),
            vreg_en: PinMock::new(&expectations.vreg_en),
        };
        let radio = Cc2520::new(
            chip.clone(),
            Cc2520Pins {
                so: pins.so.clone(),
                sampled_cca: pins.sampled_cca.clone(),
                gpio2: pins.gpio2.clone(),
                sfd: pins.sfd.clone(),
                reset: pins.reset.clone(),
                vreg_en: pins.vreg_en.clone(),
            },
            irq.clone(),
            NoopDelay::new(),
            config,
        );
        MockRadio {
            radio,
            chip,
            pins,
            irq,
        }
    }
}
