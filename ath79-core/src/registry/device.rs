//! Device registration interface
//!
//! Implemented by the host's driver framework. Each call hands over one
//! descriptor; the drivers that do real I/O afterwards are out of scope.

use ath79_hal::OutputRequest;

use crate::boot::Resource;
use crate::calibration::{MacAddress, RadioCalibration};
use crate::config::{
    ButtonSpec, FlashSpec, LedSpec, MdioSpec, PhySwitchConfig, PortRole, SpiDeviceSpec,
};

/// Errors reported by the host registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// A resource named by the descriptor is held elsewhere
    Busy(Resource),
    /// The descriptor is malformed for this driver
    Rejected,
}

/// Wired interface, ready to register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EthernetPort {
    /// Interface index
    pub index: u8,
    /// Logical role
    pub role: PortRole,
    /// Station address
    pub mac: MacAddress,
}

/// Radio registration data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioSpec<'a> {
    /// Calibration blob
    pub calibration: RadioCalibration<'a>,
    /// Station address
    pub mac: MacAddress,
}

/// The host's peripheral registration surface
///
/// All calls are synchronous and happen at most once per boot, in the
/// order the sequencer dictates.
pub trait DeviceRegistry {
    /// Register the SPI NOR boot flash
    fn register_flash(&mut self, flash: &FlashSpec) -> Result<(), RegistryError>;

    /// Add devices to the SPI board-info table
    fn register_spi_devices(&mut self, devices: &[SpiDeviceSpec]) -> Result<(), RegistryError>;

    /// Register GPIO LEDs
    fn register_leds(&mut self, leds: &[LedSpec]) -> Result<(), RegistryError>;

    /// Register polled GPIO buttons
    fn register_polled_buttons(
        &mut self,
        poll_interval_ms: u32,
        buttons: &[ButtonSpec],
    ) -> Result<(), RegistryError>;

    /// Claim a line as an output and drive its initial level
    fn request_gpio_output(&mut self, request: &OutputRequest) -> Result<(), RegistryError>;

    /// Register the USB host controller
    fn register_usb(&mut self) -> Result<(), RegistryError>;

    /// Configure the built-in switch
    fn configure_phy_switch(&mut self, config: &PhySwitchConfig) -> Result<(), RegistryError>;

    /// Register an MDIO bus
    fn register_mdio(&mut self, mdio: &MdioSpec) -> Result<(), RegistryError>;

    /// Register a wired interface
    fn register_ethernet(&mut self, port: &EthernetPort) -> Result<(), RegistryError>;

    /// Register the wireless MAC
    fn register_radio(&mut self, radio: &RadioSpec<'_>) -> Result<(), RegistryError>;
}
