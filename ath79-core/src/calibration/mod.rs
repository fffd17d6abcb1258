//! Factory calibration data
//!
//! Reads fixed-offset windows out of the read-only calibration region and
//! turns them into MAC addresses and radio calibration blobs.

pub mod mac;
pub mod store;

pub use mac::MacAddress;
pub use store::{CalibrationStore, RadioCalibration};

/// Width of a stored hardware address
pub const MAC_ADDRESS_LEN: usize = 6;

/// Size of the radio calibration blob (2048 EEPROM words)
pub const RADIO_CALDATA_LEN: usize = 0x1000;

/// Errors from calibration region reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// `offset + len` runs past the end of the region
    OutOfBounds {
        /// Requested offset from the region base
        offset: usize,
        /// Requested length
        len: usize,
        /// Size of the mapped region
        size: usize,
    },
}

impl core::fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CalibrationError::OutOfBounds { offset, len, size } => write!(
                f,
                "calibration read {:#x}+{:#x} exceeds region of {:#x} bytes",
                offset, len, size
            ),
        }
    }
}
