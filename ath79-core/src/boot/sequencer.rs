//! Init sequencer
//!
//! Walks the board through [`BootState`] in order, issuing registration
//! calls against the host's [`DeviceRegistry`]. Consumed by [`run`], so a
//! sequencer can only ever bring a board up once.
//!
//! [`run`]: InitSequencer::run

use ath79_hal::{MappedRegion, OutputRequest};

use super::error::{BootError, BootFailure};
use super::ledger::{ClaimLedger, Resource};
use super::state::BootState;
use super::BootResult;
use crate::calibration::{CalibrationStore, MacAddress};
use crate::config::{BoardDescriptor, Peripheral, ETH_PORT_COUNT, USB_POWER_LABEL};
use crate::registry::{DeviceRegistry, EthernetPort, RadioSpec, RegistryError};

/// Summary of a successful bring-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootReport {
    /// States reached, in order, ending with `Done`
    pub reached: &'static [BootState],
    /// Addresses handed to eth0 and eth1
    pub eth_macs: [MacAddress; ETH_PORT_COUNT],
    /// Address handed to the radio
    pub radio_mac: MacAddress,
}

/// Map a host-reported failure onto the bring-up taxonomy
fn host_error(e: RegistryError, peripheral: Peripheral) -> BootError {
    match e {
        RegistryError::Busy(resource) => BootError::ResourceConflict {
            resource,
            requested_by: peripheral,
            held_by: None,
        },
        RegistryError::Rejected => BootError::DriverRejected(peripheral),
    }
}

/// Single-shot board bring-up
pub struct InitSequencer<'a> {
    board: &'a BoardDescriptor,
    store: CalibrationStore<'a>,
    state: BootState,
    ledger: ClaimLedger,
    eth_macs: Option<[MacAddress; ETH_PORT_COUNT]>,
    radio_mac: Option<MacAddress>,
}

impl<'a> InitSequencer<'a> {
    /// Prepare to bring up `board` with factory data from `calibration`
    pub fn new(board: &'a BoardDescriptor, calibration: MappedRegion<'a>) -> Self {
        Self {
            board,
            store: CalibrationStore::new(calibration),
            state: BootState::Start,
            ledger: ClaimLedger::new(),
            eth_macs: None,
            radio_mac: None,
        }
    }

    /// Current state
    pub fn state(&self) -> BootState {
        self.state
    }

    /// Resources claimed so far
    pub fn ledger(&self) -> &ClaimLedger {
        &self.ledger
    }

    /// Run bring-up to completion or to the first failure
    ///
    /// The descriptor is validated before the first registration call, so
    /// a bad calibration layout never leaves a half-registered board.
    pub fn run<R: DeviceRegistry + ?Sized>(mut self, registry: &mut R) -> BootResult {
        boot_log!(info, "{}: bring-up starting", self.board.name);

        if let Err(e) = self.preflight() {
            return Err(self.fail(BootState::FlashReady, e));
        }

        while let Some(next) = self.state.successor() {
            if let Err(e) = self.enter(next, registry) {
                return Err(self.fail(next, e));
            }
        }

        match (self.eth_macs, self.radio_mac) {
            (Some(eth_macs), Some(radio_mac)) => {
                boot_log!(info, "{}: bring-up complete", self.board.name);
                Ok(BootReport {
                    reached: &BootState::SEQUENCE[..],
                    eth_macs,
                    radio_mac,
                })
            }
            _ => Err(self.fail(
                BootState::Done,
                BootError::OutOfOrder {
                    entering: BootState::Done,
                    missing: BootState::MacDerived,
                },
            )),
        }
    }

    /// Descriptor checks that must pass before anything is registered
    fn preflight(&self) -> Result<(), BootError> {
        let layout = &self.board.calibration_layout;
        layout.check()?;

        // The host must have mapped at least the described region
        let mapped = self.store.region().window();
        if !mapped.contains_window(&layout.window()) {
            return Err(BootError::OutOfBounds {
                offset: 0,
                len: layout.region_size as usize,
                size: self.store.region().len(),
            });
        }

        // Calibration bytes are read through the flash mapping
        let flash = &self.board.flash.window;
        if !flash.contains_window(&layout.window()) {
            return Err(BootError::OutOfBounds {
                offset: layout.base_address.wrapping_sub(flash.base) as usize,
                len: layout.region_size as usize,
                size: flash.size as usize,
            });
        }

        Ok(())
    }

    fn has_reached(&self, state: BootState) -> bool {
        state <= self.state
    }

    fn enter<R: DeviceRegistry + ?Sized>(
        &mut self,
        next: BootState,
        registry: &mut R,
    ) -> Result<(), BootError> {
        if let Some(&missing) = next.requires().iter().find(|s| !self.has_reached(**s)) {
            return Err(BootError::OutOfOrder {
                entering: next,
                missing,
            });
        }

        // Strictly one step forward; nothing is entered twice
        let expected = self.state.successor();
        if expected != Some(next) {
            return Err(BootError::OutOfOrder {
                entering: next,
                missing: expected.unwrap_or(BootState::Done),
            });
        }

        boot_log!(debug, "{} -> {}", self.state, next);

        match next {
            BootState::Start | BootState::Done => {}
            BootState::FlashReady => self.register_flash(registry)?,
            BootState::StorageReady => self.register_aux_storage(registry)?,
            BootState::LedsReady => self.register_leds(registry)?,
            BootState::ButtonsReady => self.register_buttons(registry)?,
            BootState::UsbPowered => self.power_usb(registry)?,
            BootState::UsbReady => registry
                .register_usb()
                .map_err(|e| host_error(e, Peripheral::Usb))?,
            BootState::MacDerived => self.derive_eth_macs()?,
            BootState::EthReady => self.register_ethernet(registry)?,
            BootState::RadioReady => self.register_radio(registry)?,
        }

        self.state = next;
        boot_log!(info, "reached {}", next);
        Ok(())
    }

    fn fail(&self, failed_step: BootState, error: BootError) -> BootFailure {
        boot_log!(
            error,
            "{}: bring-up aborted entering {}: {}",
            self.board.name,
            failed_step,
            error
        );
        BootFailure {
            failed_step,
            last_reached: self.state,
            error,
        }
    }

    fn register_flash<R: DeviceRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
    ) -> Result<(), BootError> {
        let flash = &self.board.flash;
        self.ledger
            .claim(Resource::SpiChipSelect(flash.address), Peripheral::Flash)?;
        registry
            .register_flash(flash)
            .map_err(|e| host_error(e, Peripheral::Flash))
    }

    fn register_aux_storage<R: DeviceRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
    ) -> Result<(), BootError> {
        let dev = &self.board.aux_storage_device;
        self.ledger
            .claim(Resource::SpiChipSelect(dev.address()), Peripheral::AuxStorage)?;
        self.ledger
            .claim(Resource::Gpio(dev.extra_chip_select_gpio), Peripheral::AuxStorage)?;
        registry
            .register_spi_devices(core::slice::from_ref(dev))
            .map_err(|e| host_error(e, Peripheral::AuxStorage))
    }

    fn register_leds<R: DeviceRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
    ) -> Result<(), BootError> {
        let leds = self.board.leds;
        for led in leds {
            self.ledger
                .claim(Resource::Gpio(led.gpio_line), Peripheral::Led(led.name))?;
        }
        registry
            .register_leds(leds)
            .map_err(|e| host_error(e, Peripheral::Leds))
    }

    fn register_buttons<R: DeviceRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
    ) -> Result<(), BootError> {
        let buttons = self.board.buttons;
        for btn in buttons {
            self.ledger
                .claim(Resource::Gpio(btn.gpio_line), Peripheral::Button(btn.name))?;
        }
        registry
            .register_polled_buttons(self.board.poll_interval_ms, buttons)
            .map_err(|e| host_error(e, Peripheral::Buttons))
    }

    fn power_usb<R: DeviceRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
    ) -> Result<(), BootError> {
        let line = self.board.usb_power_gpio;
        self.ledger.claim(Resource::Gpio(line), Peripheral::UsbPower)?;

        let request = OutputRequest::high(line, USB_POWER_LABEL).with_fixed_direction();
        registry
            .request_gpio_output(&request)
            .map_err(|e| host_error(e, Peripheral::UsbPower))
    }

    fn derive_eth_macs(&mut self) -> Result<(), BootError> {
        let layout = &self.board.calibration_layout;
        let macs = [
            self.store
                .derive_hardware_address(layout.mac0_offset as usize)?,
            self.store
                .derive_hardware_address(layout.mac1_offset as usize)?,
        ];

        for (i, mac) in macs.iter().enumerate() {
            if !mac.is_valid_station() {
                boot_log!(warn, "eth{} factory address {} is not a station address", i, mac);
            }
            boot_log!(info, "eth{} address {}", i, mac);
        }

        self.eth_macs = Some(macs);
        Ok(())
    }

    fn register_ethernet<R: DeviceRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
    ) -> Result<(), BootError> {
        let macs = self.eth_macs.ok_or(BootError::OutOfOrder {
            entering: BootState::EthReady,
            missing: BootState::MacDerived,
        })?;

        registry
            .configure_phy_switch(&self.board.phy_switch)
            .map_err(|e| host_error(e, Peripheral::PhySwitch))?;

        let mdio = &self.board.mdio;
        self.ledger
            .claim(Resource::MdioBus(mdio.bus), Peripheral::Mdio)?;
        registry
            .register_mdio(mdio)
            .map_err(|e| host_error(e, Peripheral::Mdio))?;

        // Interface 0 always goes first, whatever order the table lists
        let mut ports = self.board.ethernet;
        ports.sort_unstable_by_key(|p| p.index);

        for spec in &ports {
            let peripheral = Peripheral::Ethernet(spec.index);
            let mac = *macs
                .get(spec.index as usize)
                .ok_or(BootError::DriverRejected(peripheral))?;
            let port = EthernetPort {
                index: spec.index,
                role: spec.role,
                mac,
            };
            registry
                .register_ethernet(&port)
                .map_err(|e| host_error(e, peripheral))?;
        }

        Ok(())
    }

    fn register_radio<R: DeviceRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
    ) -> Result<(), BootError> {
        let layout = &self.board.calibration_layout;
        let calibration = self
            .store
            .derive_radio_calibration(layout.caldata_offset as usize)?;
        let mac = self
            .store
            .derive_hardware_address(layout.radio_mac_offset as usize)?;
        boot_log!(info, "radio address {}", mac);

        registry
            .register_radio(&RadioSpec { calibration, mac })
            .map_err(|e| host_error(e, Peripheral::Radio))?;

        self.radio_mac = Some(mac);
        Ok(())
    }
}
