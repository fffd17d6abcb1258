//! Board descriptor
//!
//! The complete, immutable description of one board. Board crates declare
//! it as a `static`; nothing writes to it after link time.

use ath79_hal::gpio::GpioLine;

#[cfg(feature = "serde")]
use serde::Serialize;

use super::hardware::{
    ButtonSpec, EthernetPortSpec, FlashSpec, LedSpec, MdioSpec, Peripheral, PhySwitchConfig,
    SpiDeviceSpec,
};
use super::layout::CalibrationLayout;

/// Number of wired interfaces on ath79 SoCs
pub const ETH_PORT_COUNT: usize = 2;

/// Label the USB power line is claimed under
pub const USB_POWER_LABEL: &str = "USB power";

/// Two peripherals referencing the same GPIO line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpioConflict {
    /// Contested line
    pub line: GpioLine,
    /// Earlier user in bring-up order
    pub first: Peripheral,
    /// Later user in bring-up order
    pub second: Peripheral,
}

/// Static description of a board's peripherals
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct BoardDescriptor {
    /// Board name
    pub name: &'static str,
    /// Boot flash
    pub flash: FlashSpec,
    /// Auxiliary SPI block device
    pub aux_storage_device: SpiDeviceSpec,
    /// LEDs, in registration order
    pub leds: &'static [LedSpec],
    /// Polled buttons, in registration order
    pub buttons: &'static [ButtonSpec],
    /// Button sampling interval (ms)
    pub poll_interval_ms: u32,
    /// Line that switches USB VBUS on when driven high
    pub usb_power_gpio: GpioLine,
    /// Built-in switch setup
    pub phy_switch: PhySwitchConfig,
    /// MDIO bus for the wired interfaces
    pub mdio: MdioSpec,
    /// Wired interfaces, registered in array order
    pub ethernet: [EthernetPortSpec; ETH_PORT_COUNT],
    /// Factory data layout
    pub calibration_layout: CalibrationLayout,
}

impl BoardDescriptor {
    /// Every GPIO line the board uses, in bring-up order
    pub fn gpio_users(&self) -> impl Iterator<Item = (GpioLine, Peripheral)> + '_ {
        let aux = core::iter::once((
            self.aux_storage_device.extra_chip_select_gpio,
            Peripheral::AuxStorage,
        ));
        let leds = self
            .leds
            .iter()
            .map(|led| (led.gpio_line, Peripheral::Led(led.name)));
        let buttons = self
            .buttons
            .iter()
            .map(|btn| (btn.gpio_line, Peripheral::Button(btn.name)));
        let usb = core::iter::once((self.usb_power_gpio, Peripheral::UsbPower));

        aux.chain(leds).chain(buttons).chain(usb)
    }

    /// Find the first GPIO line referenced twice
    ///
    /// Whole-board static check. The sequencer enforces the same rule
    /// step by step as lines are claimed.
    pub fn find_gpio_conflict(&self) -> Option<GpioConflict> {
        self.gpio_users().enumerate().find_map(|(i, (line, second))| {
            self.gpio_users()
                .take(i)
                .find(|(other, _)| *other == line)
                .map(|(_, first)| GpioConflict {
                    line,
                    first,
                    second,
                })
        })
    }

    /// Find an LED by name
    pub fn find_led(&self, name: &str) -> Option<&LedSpec> {
        self.leds.iter().find(|l| l.name == name)
    }

    /// Find a button by name
    pub fn find_button(&self, name: &str) -> Option<&ButtonSpec> {
        self.buttons.iter().find(|b| b.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::hardware::{EventCode, PortRole};
    use ath79_hal::spi::{Mode, SpiAddress};
    use ath79_hal::MemoryWindow;

    static LEDS: [LedSpec; 2] = [LedSpec::new("a", 0), LedSpec::new("b", 13)];
    static BUTTONS: [ButtonSpec; 1] = [ButtonSpec::key("reset", EventCode::Restart, 11, 60)];
    static CLASHING_BUTTONS: [ButtonSpec; 1] =
        [ButtonSpec::key("usb", EventCode::Btn7, 6, 60)];

    fn board(buttons: &'static [ButtonSpec]) -> BoardDescriptor {
        BoardDescriptor {
            name: "test",
            flash: FlashSpec {
                driver_name: "m25p80",
                address: SpiAddress::new(0, 0),
                window: MemoryWindow::new(0x1f00_0000, 0x0100_0000),
            },
            aux_storage_device: SpiDeviceSpec {
                bus: 0,
                chip_select: 1,
                max_clock_hz: 25_000_000,
                mode: Mode::Mode0,
                driver_name: "mmc_spi",
                extra_chip_select_gpio: 23,
                mmc: None,
            },
            leds: &LEDS,
            buttons,
            poll_interval_ms: 20,
            usb_power_gpio: 6,
            phy_switch: PhySwitchConfig::default(),
            mdio: MdioSpec { bus: 0, phy_mask: 0 },
            ethernet: [
                EthernetPortSpec { index: 0, role: PortRole::Wan },
                EthernetPortSpec { index: 1, role: PortRole::Lan },
            ],
            calibration_layout: CalibrationLayout {
                base_address: 0x1fff_0000,
                region_size: 0x1_0000,
                mac0_offset: 0,
                mac1_offset: 0,
                caldata_offset: 0x1000,
                radio_mac_offset: 0,
            },
        }
    }

    #[test]
    fn test_gpio_users_order() {
        let b = board(&BUTTONS);
        let lines: Vec<GpioLine> = b.gpio_users().map(|(l, _)| l).collect();
        assert_eq!(lines, [23, 0, 13, 11, 6]);
    }

    #[test]
    fn test_no_conflict() {
        assert_eq!(board(&BUTTONS).find_gpio_conflict(), None);
    }

    #[test]
    fn test_usb_power_conflict() {
        let conflict = board(&CLASHING_BUTTONS).find_gpio_conflict();
        assert_eq!(
            conflict,
            Some(GpioConflict {
                line: 6,
                first: Peripheral::Button("usb"),
                second: Peripheral::UsbPower,
            })
        );
    }

    #[test]
    fn test_find_by_name() {
        let b = board(&BUTTONS);
        assert_eq!(b.find_led("b").map(|l| l.gpio_line), Some(13));
        assert!(b.find_led("c").is_none());
        assert_eq!(b.find_button("reset").map(|b| b.gpio_line), Some(11));
    }
}
