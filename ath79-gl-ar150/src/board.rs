//! GL-AR150 board table
//!
//! AR9331 SoC, 16 MiB SPI NOR, microSD behind an SPI adapter, three
//! LEDs, two slide-switch inputs and a reset button.

use ath79_core::config::{
    debounce_for_poll, BoardDescriptor, ButtonSpec, CalibrationLayout, EthernetPortSpec, EventCode,
    FlashSpec, LedSpec, MdioSpec, MmcSpiConfig, PhySwitchConfig, PortRole, SpiDeviceSpec,
    DEFAULT_POLL_INTERVAL_MS, MMC_VDD_32_33, MMC_VDD_33_34,
};
use ath79_hal::gpio::GpioLine;
use ath79_hal::spi::{Mode, SpiAddress};
use ath79_hal::MemoryWindow;

// LEDs
pub const GPIO_LED_WLAN: GpioLine = 0;
pub const GPIO_LED_LAN: GpioLine = 13;
pub const GPIO_LED_WAN: GpioLine = 15;

// USB VBUS enable
pub const GPIO_USB_POWER: GpioLine = 6;

// Buttons
pub const GPIO_BTN_MANUAL: GpioLine = 7;
pub const GPIO_BTN_AUTO: GpioLine = 8;
pub const GPIO_BTN_RESET: GpioLine = 11;

/// Chip-select line presented for the microSD slot
///
/// The slot really sits on an inverted copy of CS0; the SPI core still
/// needs a distinct line to toggle.
pub const GPIO_CS1_MMC: GpioLine = 23;

pub const KEYS_POLL_INTERVAL_MS: u32 = DEFAULT_POLL_INTERVAL_MS;
pub const KEYS_DEBOUNCE_INTERVAL_MS: u32 = debounce_for_poll(KEYS_POLL_INTERVAL_MS);

/// ART partition: last 64 KiB of flash
pub const ART_BASE: u32 = 0x1fff_0000;
pub const ART_SIZE: u32 = 0x1_0000;

pub const MAC0_OFFSET: u32 = 0x0000;
// Same as MAC0 in the factory data. Unverified against real units; kept
// as shipped.
pub const MAC1_OFFSET: u32 = 0x0000;
pub const CALDATA_OFFSET: u32 = 0x1000;
pub const WMAC_MAC_OFFSET: u32 = 0x0000;

static LEDS: [LedSpec; 3] = [
    LedSpec::new("gl_ar150:wlan", GPIO_LED_WLAN),
    LedSpec::new("gl_ar150:lan", GPIO_LED_LAN),
    LedSpec::new("gl_ar150:wan", GPIO_LED_WAN).default_on(),
];

static BUTTONS: [ButtonSpec; 3] = [
    ButtonSpec::key("BTN_7", EventCode::Btn7, GPIO_BTN_MANUAL, KEYS_DEBOUNCE_INTERVAL_MS),
    ButtonSpec::key("BTN_8", EventCode::Btn8, GPIO_BTN_AUTO, KEYS_DEBOUNCE_INTERVAL_MS),
    ButtonSpec::key("reset", EventCode::Restart, GPIO_BTN_RESET, KEYS_DEBOUNCE_INTERVAL_MS),
];

/// The GL-AR150 descriptor
pub static BOARD: BoardDescriptor = BoardDescriptor {
    name: "GL-AR150",
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
        extra_chip_select_gpio: GPIO_CS1_MMC,
        mmc: Some(MmcSpiConfig {
            detect_delay_ms: 100,
            ocr_mask: MMC_VDD_32_33 | MMC_VDD_33_34,
        }),
    },
    leds: &LEDS,
    buttons: &BUTTONS,
    poll_interval_ms: KEYS_POLL_INTERVAL_MS,
    usb_power_gpio: GPIO_USB_POWER,
    phy_switch: PhySwitchConfig {
        swap_phy: false,
        swap_addr: false,
    },
    mdio: MdioSpec {
        bus: 0,
        phy_mask: 0x0,
    },
    // eth0 is WAN, eth1 is LAN
    ethernet: [
        EthernetPortSpec {
            index: 0,
            role: PortRole::Wan,
        },
        EthernetPortSpec {
            index: 1,
            role: PortRole::Lan,
        },
    ],
    calibration_layout: CalibrationLayout {
        base_address: ART_BASE,
        region_size: ART_SIZE,
        mac0_offset: MAC0_OFFSET,
        mac1_offset: MAC1_OFFSET,
        caldata_offset: CALDATA_OFFSET,
        radio_mac_offset: WMAC_MAC_OFFSET,
    },
};
