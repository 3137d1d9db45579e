use super::{mnemonics, Cc2520, Cc2520Error};
use crate::{
    bus::Cc2520Bus,
    irq::{InterruptControl, InterruptHandler},
    radio::frame::{is_ack_length, FrameFooter},
};
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};

impl<BUS, DI, DO, IRQ, DELAY, const N: usize> Cc2520<BUS, DI, DO, IRQ, DELAY, N>
where
    BUS: Cc2520Bus,
    DI: InputPin,
    DO: OutputPin,
    IRQ: InterruptControl,
    DELAY: DelayNs,
{
    /// Service the frame received interrupt (GPIO0 rising edge).
    ///
    /// The frame at the head of the RX FIFO is copied to the receive queue if its
    /// CRC is valid. Acknowledgements, runt frames and corrupt frames are dropped,
    /// as is a valid frame that does not fit in the queue. The RX FIFO is flushed
    /// afterward in every case, and the receive interrupt is re-armed even if a
    /// bus transaction failed.
    ///
    /// Call this from the interrupt context only, or through
    /// [`PortDispatcher`](struct@crate::irq::PortDispatcher).
    pub fn handle_rx_interrupt(&mut self) -> Result<(), Cc2520Error<BUS::Error, DI::Error, DO::Error>> {
        let result = self
            .disable_rx_interrupt()
            .and_then(|_| self.drain_rx_fifo());
        self._irq.enable();
        self._irq.clear();
        result
    }

    fn drain_rx_fifo(&mut self) -> Result<(), Cc2520Error<BUS::Error, DI::Error, DO::Error>> {
        let len = self._ins.rxbuf8().map_err(Cc2520Error::Bus)? & mnemonics::LEN_MASK;
        if !is_ack_length(len) && len >= mnemonics::FOOTER_LEN {
            let frame = &mut self._rx_frame[..=len as usize];
            frame[0] = len;
            self._ins
                .rxbuf(&mut frame[1..])
                .map_err(Cc2520Error::Bus)?;
            match FrameFooter::from_body(&frame[1..]) {
                Some(footer) if footer.crc_ok => {
                    if !self._rx_queue.push(frame) {
                        #[cfg(feature = "defmt")]
                        #[cfg(target_os = "none")]
                        defmt::warn!("receive queue full, dropped {=u8} byte frame", len);
                    }
                }
                _ => {
                    #[cfg(feature = "defmt")]
                    #[cfg(target_os = "none")]
                    defmt::debug!("dropped frame with bad CRC");
                }
            }
        }
        self._ins.sflushrx().map_err(Cc2520Error::Bus)?;
        Ok(())
    }
}

/// Lets the driver be registered with a [`PortDispatcher`](struct@crate::irq::PortDispatcher).
///
/// Errors are logged (with the `defmt` feature) and otherwise discarded.
impl<BUS, DI, DO, IRQ, DELAY, const N: usize> InterruptHandler for Cc2520<BUS, DI, DO, IRQ, DELAY, N>
where
    BUS: Cc2520Bus,
    DI: InputPin,
    DO: OutputPin,
    IRQ: InterruptControl,
    DELAY: DelayNs,
{
    fn handle(&mut self) {
        if let Err(_e) = self.handle_rx_interrupt() {
            #[cfg(feature = "defmt")]
            #[cfg(target_os = "none")]
            defmt::error!("receive interrupt failed: {}", _e);
        }
    }
}
