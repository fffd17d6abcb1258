//! Recording registry for tests
//!
//! Accepts every registration, remembers the calls in order, and can be
//! told to refuse one kind of call so abort paths can be exercised.

use ath79_hal::gpio::{GpioLine, PinState};
use ath79_hal::spi::SpiAddress;
use ath79_hal::OutputRequest;
use heapless::Vec;

use super::device::{DeviceRegistry, EthernetPort, RadioSpec, RegistryError};
use crate::boot::Resource;
use crate::calibration::MacAddress;
use crate::config::{ButtonSpec, FlashSpec, LedSpec, MdioSpec, PhySwitchConfig, SpiDeviceSpec};

/// Maximum calls remembered
pub const MAX_RECORDED_CALLS: usize = 32;

/// Kind of registration call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Flash,
    SpiDevice,
    Led,
    Buttons,
    GpioOutput,
    Usb,
    PhySwitch,
    Mdio,
    Ethernet,
    Radio,
}

/// One recorded registration call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Flash(SpiAddress),
    SpiDevice {
        address: SpiAddress,
        chip_select_gpio: GpioLine,
        max_clock_hz: u32,
        mode: u8,
    },
    Led {
        name: &'static str,
        line: GpioLine,
        level: PinState,
    },
    Buttons {
        poll_interval_ms: u32,
        count: usize,
    },
    GpioOutput(OutputRequest),
    Usb,
    PhySwitch(PhySwitchConfig),
    Mdio(MdioSpec),
    Ethernet(EthernetPort),
    Radio {
        mac: MacAddress,
        caldata_head: [u8; 4],
    },
}

impl Call {
    /// Kind of this call
    pub fn kind(&self) -> CallKind {
        match self {
            Call::Flash(_) => CallKind::Flash,
            Call::SpiDevice { .. } => CallKind::SpiDevice,
            Call::Led { .. } => CallKind::Led,
            Call::Buttons { .. } => CallKind::Buttons,
            Call::GpioOutput(_) => CallKind::GpioOutput,
            Call::Usb => CallKind::Usb,
            Call::PhySwitch(_) => CallKind::PhySwitch,
            Call::Mdio(_) => CallKind::Mdio,
            Call::Ethernet(_) => CallKind::Ethernet,
            Call::Radio { .. } => CallKind::Radio,
        }
    }
}

/// In-memory [`DeviceRegistry`] that records every call
#[derive(Debug, Default)]
pub struct RecordingRegistry {
    calls: Vec<Call, MAX_RECORDED_CALLS>,
    reject: Option<CallKind>,
    busy: Option<(CallKind, Resource)>,
}

impl RecordingRegistry {
    /// Registry that accepts everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that refuses calls of `kind` as malformed
    pub fn rejecting(kind: CallKind) -> Self {
        Self {
            reject: Some(kind),
            ..Self::default()
        }
    }

    /// Registry that reports `resource` busy on calls of `kind`
    pub fn busy(kind: CallKind, resource: Resource) -> Self {
        Self {
            busy: Some((kind, resource)),
            ..Self::default()
        }
    }

    /// Calls in the order they were made, including refused ones
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Index of the first call of `kind`
    pub fn position(&self, kind: CallKind) -> Option<usize> {
        self.calls.iter().position(|c| c.kind() == kind)
    }

    /// Number of calls of `kind`
    pub fn count(&self, kind: CallKind) -> usize {
        self.calls.iter().filter(|c| c.kind() == kind).count()
    }

    fn record(&mut self, call: Call) -> Result<(), RegistryError> {
        let kind = call.kind();
        self.calls.push(call).map_err(|_| RegistryError::Rejected)?;

        if self.reject == Some(kind) {
            return Err(RegistryError::Rejected);
        }
        match self.busy {
            Some((busy_kind, resource)) if busy_kind == kind => Err(RegistryError::Busy(resource)),
            _ => Ok(()),
        }
    }
}

impl DeviceRegistry for RecordingRegistry {
    fn register_flash(&mut self, flash: &FlashSpec) -> Result<(), RegistryError> {
        self.record(Call::Flash(flash.address))
    }

    fn register_spi_devices(&mut self, devices: &[SpiDeviceSpec]) -> Result<(), RegistryError> {
        for dev in devices {
            self.record(Call::SpiDevice {
                address: dev.address(),
                chip_select_gpio: dev.extra_chip_select_gpio,
                max_clock_hz: dev.max_clock_hz,
                mode: dev.mode.bits(),
            })?;
        }
        Ok(())
    }

    fn register_leds(&mut self, leds: &[LedSpec]) -> Result<(), RegistryError> {
        for led in leds {
            self.record(Call::Led {
                name: led.name,
                line: led.gpio_line,
                level: led.initial_level(),
            })?;
        }
        Ok(())
    }

    fn register_polled_buttons(
        &mut self,
        poll_interval_ms: u32,
        buttons: &[ButtonSpec],
    ) -> Result<(), RegistryError> {
        self.record(Call::Buttons {
            poll_interval_ms,
            count: buttons.len(),
        })
    }

    fn request_gpio_output(&mut self, request: &OutputRequest) -> Result<(), RegistryError> {
        self.record(Call::GpioOutput(*request))
    }

    fn register_usb(&mut self) -> Result<(), RegistryError> {
        self.record(Call::Usb)
    }

    fn configure_phy_switch(&mut self, config: &PhySwitchConfig) -> Result<(), RegistryError> {
        self.record(Call::PhySwitch(*config))
    }

    fn register_mdio(&mut self, mdio: &MdioSpec) -> Result<(), RegistryError> {
        self.record(Call::Mdio(*mdio))
    }

    fn register_ethernet(&mut self, port: &EthernetPort) -> Result<(), RegistryError> {
        self.record(Call::Ethernet(*port))
    }

    fn register_radio(&mut self, radio: &RadioSpec<'_>) -> Result<(), RegistryError> {
        let mut caldata_head = [0u8; 4];
        caldata_head.copy_from_slice(&radio.calibration.as_bytes()[..4]);
        self.record(Call::Radio {
            mac: radio.mac,
            caldata_head,
        })
    }
}
