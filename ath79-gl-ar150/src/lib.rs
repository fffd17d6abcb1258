//! GL.iNet GL-AR150 board support
//!
//! Declares the board's peripherals and wires its bring-up into a
//! machine table. The host maps the ART partition (KSEG1 view of
//! [`board::ART_BASE`]) and supplies its registration framework; this
//! crate does the rest through `ath79-core`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod board;

use ath79_core::boot::{BootResult, InitSequencer};
use ath79_core::registry::{DeviceRegistry, InitEntry, MachineId, MachineRecord};
use ath79_hal::MappedRegion;

pub use board::BOARD;

/// Machine id the host selects this board by
pub const MACH_GL_AR150: MachineId = MachineId(150);

/// Short machine identifier
pub const SHORT_NAME: &str = "GL-AR150";

/// Human-readable machine name
pub const DISPLAY_NAME: &str = "GL AR150";

/// Bring the board up
///
/// `art` is the mapped ART partition. Runs once; the first failure is
/// returned and nothing after it is registered.
pub fn setup<R: DeviceRegistry + ?Sized>(registry: &mut R, art: MappedRegion<'_>) -> BootResult {
    #[cfg(feature = "defmt")]
    defmt::info!("{} setup, ART at {=u32:#x}", SHORT_NAME, art.base());

    InitSequencer::new(&BOARD, art).run(registry)
}

/// Machine table record for this board
///
/// `entry` is normally a closure calling [`setup`] with the host's
/// registry and ART mapping.
pub fn machine_record(entry: InitEntry<'_>) -> MachineRecord<'_> {
    MachineRecord {
        id: MACH_GL_AR150,
        short_name: SHORT_NAME,
        display_name: DISPLAY_NAME,
        init_entry: entry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ath79_core::boot::{BootError, BootState, Resource};
    use ath79_core::calibration::{MacAddress, RADIO_CALDATA_LEN};
    use ath79_core::config::Peripheral;
    use ath79_core::registry::{Call, CallKind, MachineTable, RecordingRegistry};
    use core::cell::RefCell;
    use proptest::prelude::*;

    const FACTORY_MAC: [u8; 6] = [0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF];

    fn art_with_mac(mac: [u8; 6]) -> Vec<u8> {
        let mut art = vec![0xFFu8; board::ART_SIZE as usize];
        art[0..6].copy_from_slice(&mac);
        let cal = board::CALDATA_OFFSET as usize;
        for (i, b) in art[cal..cal + RADIO_CALDATA_LEN].iter_mut().enumerate() {
            *b = (i % 251) as u8;
        }
        art
    }

    fn eth_macs(registry: &RecordingRegistry) -> Vec<(u8, MacAddress)> {
        registry
            .calls()
            .iter()
            .filter_map(|c| match c {
                Call::Ethernet(port) => Some((port.index, port.mac)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_setup_registers_everything() {
        let art = art_with_mac(FACTORY_MAC);
        let mut registry = RecordingRegistry::new();

        let report = setup(&mut registry, MappedRegion::new(board::ART_BASE, &art)).unwrap();
        assert_eq!(report.reached.last(), Some(&BootState::Done));
        assert_eq!(registry.count(CallKind::Led), 3);
        assert_eq!(registry.count(CallKind::Buttons), 1);
        assert_eq!(registry.count(CallKind::Ethernet), 2);
        assert_eq!(registry.count(CallKind::Radio), 1);
        assert_eq!(
            registry.calls().first(),
            Some(&Call::Flash(ath79_hal::SpiAddress::new(0, 0)))
        );
    }

    #[test]
    fn test_wired_interfaces_share_factory_mac() {
        let art = art_with_mac(FACTORY_MAC);
        let mut registry = RecordingRegistry::new();
        setup(&mut registry, MappedRegion::new(board::ART_BASE, &art)).unwrap();

        let mac = MacAddress::new(FACTORY_MAC);
        assert_eq!(eth_macs(&registry), [(0, mac), (1, mac)]);
    }

    #[test]
    fn test_radio_mac_and_caldata() {
        let mut art = art_with_mac(FACTORY_MAC);
        let cal = board::CALDATA_OFFSET as usize;
        art[cal..cal + 6].copy_from_slice(&[0xA5, 0x5A, 0, 0, 0, 0x02]);
        let mut registry = RecordingRegistry::new();
        let report = setup(&mut registry, MappedRegion::new(board::ART_BASE, &art)).unwrap();

        // Radio shares the factory MAC at the ART base
        assert_eq!(report.radio_mac, MacAddress::new(FACTORY_MAC));
        assert!(report.radio_mac.is_valid_station());
        assert_eq!(
            registry.calls().last(),
            Some(&Call::Radio {
                mac: MacAddress::new(FACTORY_MAC),
                caldata_head: [0xA5, 0x5A, 0, 0],
            })
        );
    }

    #[test]
    fn test_usb_power_conflict_from_host() {
        let art = art_with_mac(FACTORY_MAC);
        let mut registry = RecordingRegistry::busy(CallKind::GpioOutput, Resource::Gpio(6));

        let failure = setup(&mut registry, MappedRegion::new(board::ART_BASE, &art)).unwrap_err();
        assert_eq!(failure.failed_step, BootState::UsbPowered);
        assert_eq!(
            failure.error,
            BootError::ResourceConflict {
                resource: Resource::Gpio(6),
                requested_by: Peripheral::UsbPower,
                held_by: None,
            }
        );
        assert_eq!(registry.count(CallKind::Usb), 0);
        assert_eq!(registry.count(CallKind::Ethernet), 0);
        assert_eq!(registry.count(CallKind::Radio), 0);
    }

    #[test]
    fn test_truncated_art_mapping() {
        let art = art_with_mac(FACTORY_MAC);
        let mut registry = RecordingRegistry::new();

        let failure = setup(
            &mut registry,
            MappedRegion::new(board::ART_BASE, &art[..0x1800]),
        )
        .unwrap_err();
        assert_eq!(failure.last_reached, BootState::Start);
        assert!(matches!(failure.error, BootError::OutOfBounds { .. }));
        assert!(registry.calls().is_empty());
    }

    #[test]
    fn test_machine_table_boot() {
        let art = art_with_mac(FACTORY_MAC);
        let registry = RefCell::new(RecordingRegistry::new());
        let entry = || {
            setup(
                &mut *registry.borrow_mut(),
                MappedRegion::new(board::ART_BASE, &art),
            )
        };

        let mut table = MachineTable::new();
        table.register(machine_record(&entry)).unwrap();

        let record = table.lookup(MACH_GL_AR150).unwrap();
        assert_eq!(record.short_name, "GL-AR150");
        assert_eq!(record.display_name, "GL AR150");
        assert!(table.lookup(MachineId(0)).is_none());

        let report = table.boot(MACH_GL_AR150).unwrap().unwrap();
        assert_eq!(report.eth_macs, [MacAddress::new(FACTORY_MAC); 2]);
        assert_eq!(registry.borrow().count(CallKind::Radio), 1);
    }

    proptest! {
        #[test]
        fn prop_factory_mac_passed_verbatim(mac in any::<[u8; 6]>()) {
            let art = art_with_mac(mac);
            let mut registry = RecordingRegistry::new();
            let report = setup(&mut registry, MappedRegion::new(board::ART_BASE, &art)).unwrap();

            prop_assert_eq!(report.eth_macs, [MacAddress::new(mac); 2]);
            prop_assert_eq!(report.radio_mac, MacAddress::new(mac));
            let expected = MacAddress::new(mac);
            prop_assert_eq!(eth_macs(&registry), vec![(0, expected), (1, expected)]);
        }
    }
}
