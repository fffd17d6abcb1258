//! Peripheral descriptor types
//!
//! These types describe the LEDs, buttons, SPI devices and network
//! plumbing present on a board, in the shape the host's registration
//! framework consumes them.

use ath79_hal::gpio::{level_for, GpioLine, PinState};
use ath79_hal::spi::{Mode, SpiAddress};
use ath79_hal::MemoryWindow;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Key poll interval used by polled-button boards (ms)
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 20;

/// Debounce interval derived from the poll interval (3 samples)
pub const fn debounce_for_poll(poll_interval_ms: u32) -> u32 {
    3 * poll_interval_ms
}

/// MMC OCR bit for 3.2-3.3V
pub const MMC_VDD_32_33: u32 = 1 << 20;
/// MMC OCR bit for 3.3-3.4V
pub const MMC_VDD_33_34: u32 = 1 << 21;

/// Identity of a board peripheral
///
/// Used to attribute resource claims and failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Peripheral {
    /// Primary boot flash
    Flash,
    /// Auxiliary SPI block device
    AuxStorage,
    /// GPIO LED, by name
    Led(&'static str),
    /// The LED table as a whole
    Leds,
    /// Polled button, by name
    Button(&'static str),
    /// The polled button table as a whole
    Buttons,
    /// USB VBUS enable line
    UsbPower,
    /// USB host controller
    Usb,
    /// Built-in Ethernet switch
    PhySwitch,
    /// MDIO management bus
    Mdio,
    /// Wired network interface, by index
    Ethernet(u8),
    /// Wireless MAC
    Radio,
}

/// GPIO-driven LED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LedSpec {
    /// LED class name (e.g., "gl_ar150:wan")
    pub name: &'static str,
    /// GPIO line driving the LED
    pub gpio_line: GpioLine,
    /// LED lights when the line is low
    pub active_low: bool,
    /// LED is lit at registration
    pub default_on: bool,
}

impl LedSpec {
    /// Active-high LED, off at registration
    pub const fn new(name: &'static str, gpio_line: GpioLine) -> Self {
        Self {
            name,
            gpio_line,
            active_low: false,
            default_on: false,
        }
    }

    /// Mark the LED active-low
    pub const fn active_low(mut self) -> Self {
        self.active_low = true;
        self
    }

    /// Light the LED at registration
    pub const fn default_on(mut self) -> Self {
        self.default_on = true;
        self
    }

    /// Level the line is driven to at registration
    pub const fn initial_level(&self) -> PinState {
        level_for(self.default_on, self.active_low)
    }
}

/// Input event type reported by a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[repr(u16)]
pub enum EventType {
    /// Key press/release (EV_KEY)
    Key = 0x01,
}

/// Input event code reported by a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[repr(u16)]
pub enum EventCode {
    /// BTN_7
    Btn7 = 0x107,
    /// BTN_8
    Btn8 = 0x108,
    /// KEY_RESTART
    Restart = 0x198,
}

impl EventCode {
    /// Numeric input event code
    pub const fn code(self) -> u16 {
        self as u16
    }
}

/// Polled GPIO button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ButtonSpec {
    /// Button description
    pub name: &'static str,
    /// Event type
    pub event_type: EventType,
    /// Event code
    pub event_code: EventCode,
    /// GPIO line sampled
    pub gpio_line: GpioLine,
    /// Button reads pressed when the line is low
    pub active_low: bool,
    /// Minimum stable time before a change is reported (ms)
    pub debounce_ms: u32,
}

impl ButtonSpec {
    /// Active-high key button
    pub const fn key(
        name: &'static str,
        event_code: EventCode,
        gpio_line: GpioLine,
        debounce_ms: u32,
    ) -> Self {
        Self {
            name,
            event_type: EventType::Key,
            event_code,
            gpio_line,
            active_low: false,
            debounce_ms,
        }
    }
}

/// Platform data for an MMC card behind an SPI adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MmcSpiConfig {
    /// Card-detect debounce (ms)
    pub detect_delay_ms: u32,
    /// Supported voltage window (OCR bits)
    pub ocr_mask: u32,
}

/// SPI-attached device with a GPIO-synthesized chip-select
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SpiDeviceSpec {
    /// SPI bus number
    pub bus: u8,
    /// Chip-select index presented to the SPI core
    pub chip_select: u8,
    /// Maximum clock (Hz)
    pub max_clock_hz: u32,
    /// Clock mode
    pub mode: Mode,
    /// Protocol driver to bind ("mmc_spi")
    pub driver_name: &'static str,
    /// GPIO line that actually drives the chip-select
    pub extra_chip_select_gpio: GpioLine,
    /// MMC platform data, for `mmc_spi` devices
    pub mmc: Option<MmcSpiConfig>,
}

impl SpiDeviceSpec {
    /// Bus position of this device
    pub const fn address(&self) -> SpiAddress {
        SpiAddress::new(self.bus, self.chip_select)
    }
}

/// Primary SPI NOR boot flash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FlashSpec {
    /// Flash driver ("m25p80")
    pub driver_name: &'static str,
    /// Bus position of the flash chip
    pub address: SpiAddress,
    /// Physical window the flash is memory-mapped into
    pub window: MemoryWindow,
}

/// Built-in switch PHY4 configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PhySwitchConfig {
    /// Swap PHY0 and PHY4
    pub swap_phy: bool,
    /// Swap the PHY addresses of PHY0 and PHY4
    pub swap_addr: bool,
}

/// MDIO management bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MdioSpec {
    /// MDIO bus id
    pub bus: u8,
    /// PHYs the bus must not probe
    pub phy_mask: u32,
}

/// Logical role of a wired interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum PortRole {
    /// Upstream port
    Wan,
    /// Local port
    Lan,
}

/// Wired network interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EthernetPortSpec {
    /// Interface index (eth0, eth1)
    pub index: u8,
    /// Logical role
    pub role: PortRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_led_initial_level() {
        let off = LedSpec::new("off", 0);
        assert_eq!(off.initial_level(), PinState::Low);

        let on = LedSpec::new("on", 15).default_on();
        assert_eq!(on.initial_level(), PinState::High);

        let inverted_on = LedSpec::new("inv", 4).active_low().default_on();
        assert_eq!(inverted_on.initial_level(), PinState::Low);
    }

    #[test]
    fn test_event_codes() {
        assert_eq!(EventCode::Btn7.code(), 0x107);
        assert_eq!(EventCode::Btn8.code(), 0x108);
        assert_eq!(EventCode::Restart.code(), 408);
    }

    #[test]
    fn test_debounce() {
        assert_eq!(debounce_for_poll(DEFAULT_POLL_INTERVAL_MS), 60);
    }

    #[test]
    fn test_button_key() {
        let btn = ButtonSpec::key("reset", EventCode::Restart, 11, 60);
        assert_eq!(btn.event_type, EventType::Key);
        assert!(!btn.active_low);
        assert_eq!(btn.debounce_ms, 60);
    }
}
