//! Calibration (ART) region layout
//!
//! Factory data lives in the last erase block of the boot flash. All
//! offsets here are relative to the region's physical base.

use ath79_hal::MemoryWindow;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::calibration::{CalibrationError, MAC_ADDRESS_LEN, RADIO_CALDATA_LEN};

/// Field inside the calibration region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutField {
    /// First wired interface MAC
    Mac0,
    /// Second wired interface MAC
    Mac1,
    /// Radio calibration blob
    CalData,
    /// Radio MAC
    RadioMac,
}

/// Offsets of the factory data fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CalibrationLayout {
    /// Physical base of the calibration region
    pub base_address: u32,
    /// Size of the mapped region
    pub region_size: u32,
    /// MAC for eth0
    pub mac0_offset: u32,
    /// MAC for eth1
    pub mac1_offset: u32,
    /// Radio calibration blob
    pub caldata_offset: u32,
    /// Radio MAC
    pub radio_mac_offset: u32,
}

impl CalibrationLayout {
    /// Physical window the region occupies
    pub const fn window(&self) -> MemoryWindow {
        MemoryWindow::new(self.base_address, self.region_size)
    }

    /// Region-relative offset and width of each field
    pub const fn fields(&self) -> [(LayoutField, u32, usize); 4] {
        [
            (LayoutField::Mac0, self.mac0_offset, MAC_ADDRESS_LEN),
            (LayoutField::Mac1, self.mac1_offset, MAC_ADDRESS_LEN),
            (LayoutField::CalData, self.caldata_offset, RADIO_CALDATA_LEN),
            (LayoutField::RadioMac, self.radio_mac_offset, MAC_ADDRESS_LEN),
        ]
    }

    /// Check that every field lies within the region
    ///
    /// Returns the first field that does not fit.
    pub fn check(&self) -> Result<(), CalibrationError> {
        for (field, offset, len) in self.fields() {
            if !self.window().fits(offset, len as u32) {
                boot_log!(error, "ART field {} at {=u32:#x} overruns region", field, offset);
                return Err(CalibrationError::OutOfBounds {
                    offset: offset as usize,
                    len,
                    size: self.region_size as usize,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: CalibrationLayout = CalibrationLayout {
        base_address: 0x1fff_0000,
        region_size: 0x1_0000,
        mac0_offset: 0,
        mac1_offset: 0,
        caldata_offset: 0x1000,
        radio_mac_offset: 0,
    };

    #[test]
    fn test_valid_layout() {
        assert!(LAYOUT.check().is_ok());
    }

    #[test]
    fn test_radio_mac_past_end() {
        let layout = CalibrationLayout {
            radio_mac_offset: 0x1_0000 - 5,
            ..LAYOUT
        };
        assert_eq!(
            layout.check(),
            Err(CalibrationError::OutOfBounds {
                offset: 0x1_0000 - 5,
                len: MAC_ADDRESS_LEN,
                size: 0x1_0000,
            })
        );
    }

    #[test]
    fn test_radio_mac_exactly_fits() {
        let layout = CalibrationLayout {
            radio_mac_offset: 0x1_0000 - 6,
            ..LAYOUT
        };
        assert!(layout.check().is_ok());
    }

    #[test]
    fn test_caldata_must_fit_whole_blob() {
        let layout = CalibrationLayout {
            caldata_offset: 0xF800,
            ..LAYOUT
        };
        assert!(layout.check().is_err());
    }

    #[test]
    fn test_radio_mac_not_shifted_by_caldata() {
        // Past the end if it were counted from the caldata blob
        let layout = CalibrationLayout {
            radio_mac_offset: 0xF000,
            ..LAYOUT
        };
        assert!(layout.check().is_ok());

        let layout = CalibrationLayout {
            radio_mac_offset: u32::MAX,
            ..LAYOUT
        };
        assert!(layout.check().is_err());
    }
}
