//! Interrupt plumbing between a GPIO port and the handlers that service it.
//!
//! A microcontroller usually funnels every pin of a port through one interrupt
//! vector. [`PortDispatcher`] fans that vector back out to per-pin handlers,
//! and [`InterruptControl`] is the narrow interface the radio driver uses to arm
//! and disarm its own pin.

use core::fmt::{Display, Formatter, Result};

/// The edge on which an interrupt pin fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Rising,
    Falling,
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for Edge {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Edge::Rising => defmt::write!(fmt, "rising"),
            Edge::Falling => defmt::write!(fmt, "falling"),
        }
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Edge::Rising => write!(f, "rising"),
            Edge::Falling => write!(f, "falling"),
        }
    }
}

/// Control over a single interrupt-capable input pin.
///
/// Implementations typically wrap the MCU's port interrupt enable, flag and
/// edge-select registers for the pin wired to the radio's frame-done output.
pub trait InterruptControl {
    /// Allow the pin to raise interrupts.
    fn enable(&mut self);

    /// Prevent the pin from raising interrupts.
    fn disable(&mut self);

    /// Clear a latched interrupt flag for the pin.
    fn clear(&mut self);

    /// Select the edge that latches the interrupt flag.
    fn set_edge(&mut self, edge: Edge);
}

/// Something that services an interrupt.
///
/// Any `FnMut()` closure is a handler.
pub trait InterruptHandler {
    fn handle(&mut self);
}

impl<F: FnMut()> InterruptHandler for F {
    fn handle(&mut self) {
        self()
    }
}

/// An error raised when registering a handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IrqError {
    /// The pin index is not part of the port.
    PinOutOfRange(u8),
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for IrqError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            IrqError::PinOutOfRange(pin) => defmt::write!(fmt, "pin {=u8} is out of range", pin),
        }
    }
}

impl Display for IrqError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            IrqError::PinOutOfRange(pin) => write!(f, "pin {} is out of range", pin),
        }
    }
}

/// A registration table mapping the pins of one port to their handlers.
///
/// ```
/// use cc2520::irq::PortDispatcher;
/// let mut hits = 0;
/// let mut on_pin0 = || hits += 1;
/// let mut port: PortDispatcher<'_> = PortDispatcher::new();
/// port.register(0, &mut on_pin0).unwrap();
/// // flags read from the port's interrupt flag register
/// port.dispatch(0b0000_0001);
/// drop(port);
/// assert_eq!(hits, 1);
/// ```
pub struct PortDispatcher<'a, const PINS: usize = 8> {
    handlers: [Option<&'a mut dyn InterruptHandler>; PINS],
}

impl<const PINS: usize> Default for PortDispatcher<'_, PINS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const PINS: usize> PortDispatcher<'a, PINS> {
    pub fn new() -> Self {
        Self {
            handlers: core::array::from_fn(|_| None),
        }
    }

    /// Attach `handler` to `pin`, replacing any previous handler.
    pub fn register(
        &mut self,
        pin: u8,
        handler: &'a mut dyn InterruptHandler,
    ) -> core::result::Result<(), IrqError> {
        let slot = self
            .handlers
            .get_mut(pin as usize)
            .ok_or(IrqError::PinOutOfRange(pin))?;
        *slot = Some(handler);
        Ok(())
    }

    /// Detach whatever handler is attached to `pin`.
    pub fn unregister(&mut self, pin: u8) -> core::result::Result<(), IrqError> {
        let slot = self
            .handlers
            .get_mut(pin as usize)
            .ok_or(IrqError::PinOutOfRange(pin))?;
        *slot = None;
        Ok(())
    }

    /// Is a handler attached to `pin`?
    pub fn is_registered(&self, pin: u8) -> bool {
        matches!(self.handlers.get(pin as usize), Some(Some(_)))
    }

    /// Run the handler of every pin whose bit is set in `flags`, lowest pin first.
    ///
    /// Flagged pins without a handler are ignored.
    /// Returns the subset of `flags` that was serviced.
    pub fn dispatch(&mut self, flags: u32) -> u32 {
        let mut serviced = 0;
        for (pin, slot) in self.handlers.iter_mut().enumerate().take(32) {
            if flags & (1 << pin) == 0 {
                continue;
            }
            if let Some(handler) = slot.as_deref_mut() {
                handler.handle();
                serviced |= 1 << pin;
            }
        }
        serviced
    }
}
