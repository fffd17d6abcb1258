//! Calibration store
//!
//! All reads are pure: the region is never written after it is mapped,
//! so the same offset always yields the same bytes.

use ath79_hal::MappedRegion;

use super::{CalibrationError, MacAddress, MAC_ADDRESS_LEN, RADIO_CALDATA_LEN};

/// Opaque radio calibration blob
///
/// Borrowed straight from the calibration region; the radio driver is
/// the only consumer that interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioCalibration<'a>(&'a [u8; RADIO_CALDATA_LEN]);

impl<'a> RadioCalibration<'a> {
    /// Raw blob bytes
    pub const fn as_bytes(&self) -> &'a [u8; RADIO_CALDATA_LEN] {
        self.0
    }
}

/// Reader over the factory calibration region
#[derive(Debug, Clone, Copy)]
pub struct CalibrationStore<'a> {
    region: MappedRegion<'a>,
}

impl<'a> CalibrationStore<'a> {
    /// Create a store over a mapped region
    pub const fn new(region: MappedRegion<'a>) -> Self {
        Self { region }
    }

    /// The underlying region
    pub const fn region(&self) -> &MappedRegion<'a> {
        &self.region
    }

    /// Borrow `len` bytes at `offset`
    pub fn read_window(&self, offset: usize, len: usize) -> Result<&'a [u8], CalibrationError> {
        self.region
            .get(offset, len)
            .ok_or(CalibrationError::OutOfBounds {
                offset,
                len,
                size: self.region.len(),
            })
    }

    /// Copy the 6-byte address stored at `offset`
    ///
    /// The bytes are taken verbatim. Two interfaces pointed at the same
    /// offset get the same address.
    pub fn derive_hardware_address(&self, offset: usize) -> Result<MacAddress, CalibrationError> {
        let window = self.read_window(offset, MAC_ADDRESS_LEN)?;
        let mut octets = [0u8; MAC_ADDRESS_LEN];
        octets.copy_from_slice(window);
        Ok(MacAddress::new(octets))
    }

    /// Borrow the radio calibration blob starting at `offset`
    pub fn derive_radio_calibration(
        &self,
        offset: usize,
    ) -> Result<RadioCalibration<'a>, CalibrationError> {
        let window = self.read_window(offset, RADIO_CALDATA_LEN)?;
        let blob = <&[u8; RADIO_CALDATA_LEN]>::try_from(window).map_err(|_| {
            CalibrationError::OutOfBounds {
                offset,
                len: RADIO_CALDATA_LEN,
                size: self.region.len(),
            }
        })?;
        Ok(RadioCalibration(blob))
    }
}
