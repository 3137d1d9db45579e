use super::{Cc2520, Cc2520Error};
use crate::{bus::Cc2520Bus, irq::InterruptControl, radio::prelude::WpanDetails};
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};

#[cfg(any(feature = "defmt", feature = "std"))]
use super::{memory, mnemonics, registers};
#[cfg(any(feature = "defmt", feature = "std"))]
use crate::radio::prelude::{WpanAddress, WpanChannel, WpanStatus};

#[cfg(feature = "std")]
extern crate std;

/// The center frequency of a channel (in MHz).
#[cfg(any(feature = "defmt", feature = "std"))]
fn channel_mhz(channel: u8) -> u16 {
    2405 + (channel.saturating_sub(mnemonics::MIN_CHANNEL) as u16) * mnemonics::CHANNEL_SPACING as u16
}

impl<BUS, DI, DO, IRQ, DELAY, const N: usize> WpanDetails for Cc2520<BUS, DI, DO, IRQ, DELAY, N>
where
    BUS: Cc2520Bus,
    DI: InputPin,
    DO: OutputPin,
    IRQ: InterruptControl,
    DELAY: DelayNs,
{
    type DetailsErrorType = Cc2520Error<BUS::Error, DI::Error, DO::Error>;

    #[cfg(feature = "defmt")]
    #[cfg(target_os = "none")]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        defmt::println!("Chip ID___________________{=u8:#x}", self.chip_id()?);
        defmt::println!("Chip version______________{=u8}", self.chip_version()?);

        let channel = self.get_channel()?;
        defmt::println!(
            "Channel___________________{=u8} ~ {=u16} MHz",
            channel,
            channel_mhz(channel)
        );
        defmt::println!("PAN ID____________________{=u16:#06x}", self.get_pan_id()?);
        defmt::println!(
            "Short address_____________{=u16:#06x}",
            self.get_short_address()?
        );

        let tx_power = self
            ._ins
            .reg_read8(registers::TXPOWER)
            .map_err(Cc2520Error::Bus)?;
        defmt::println!("TX power__________________{=u8:#x}", tx_power);
        let modem = self
            ._ins
            .mem_read8(memory::MDMCTRL0)
            .map_err(Cc2520Error::Bus)?;
        defmt::println!("Modem control_____________{=u8:#x}", modem);

        defmt::println!("Front end_________________{}", self._config.front_end());
        defmt::println!("Link state________________{}", self.state()?);
        defmt::println!("{}", self.get_fsm_status()?);
        self.update()?;
        defmt::println!("{}", self.get_status());
        defmt::println!(
            "Receive queue_____________{=usize} frames ({=usize} bytes)",
            self._rx_queue.frames(),
            self._rx_queue.bytes()
        );
        Ok(())
    }

    #[cfg(not(any(feature = "defmt", feature = "std")))]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        Ok(())
    }

    #[cfg(not(target_os = "none"))]
    #[cfg(feature = "std")]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        std::println!("Chip ID___________________{:#04x}", self.chip_id()?);
        std::println!("Chip version______________{}", self.chip_version()?);

        let channel = self.get_channel()?;
        std::println!(
            "Channel___________________{channel} ~ {} MHz",
            channel_mhz(channel)
        );
        std::println!("PAN ID____________________{:#06x}", self.get_pan_id()?);
        std::println!(
            "Short address_____________{:#06x}",
            self.get_short_address()?
        );

        let tx_power = self
            ._ins
            .reg_read8(registers::TXPOWER)
            .map_err(Cc2520Error::Bus)?;
        std::println!("TX power__________________{tx_power:#04x}");
        let modem = self
            ._ins
            .mem_read8(memory::MDMCTRL0)
            .map_err(Cc2520Error::Bus)?;
        std::println!("Modem control_____________{modem:#04x}");

        std::println!("Front end_________________{}", self._config.front_end());
        std::println!("Link state________________{}", self.state()?);
        std::println!("{}", self.get_fsm_status()?);
        self.update()?;
        std::println!("{}", self.get_status());
        std::println!(
            "Receive queue_____________{} frames ({} bytes)",
            self._rx_queue.frames(),
            self._rx_queue.bytes()
        );
        Ok(())
    }
}
