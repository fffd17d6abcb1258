//! Exclusive resource claims
//!
//! Every GPIO line, SPI chip-select and MDIO bus is owned by exactly one
//! peripheral for the life of the system. Bring-up is single-threaded,
//! so a plain list is enough.

use ath79_hal::gpio::GpioLine;
use ath79_hal::spi::SpiAddress;
use heapless::Vec;

use super::error::BootError;
use crate::config::Peripheral;

/// Maximum claims tracked during one bring-up
pub const MAX_CLAIMS: usize = 48;

/// A resource that can be held by one peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resource {
    /// GPIO line
    Gpio(GpioLine),
    /// SPI chip-select on a bus
    SpiChipSelect(SpiAddress),
    /// MDIO bus id
    MdioBus(u8),
}

/// Record of which peripheral holds which resource
#[derive(Debug, Clone, Default)]
pub struct ClaimLedger {
    claims: Vec<(Resource, Peripheral), MAX_CLAIMS>,
}

impl ClaimLedger {
    /// Create an empty ledger
    pub const fn new() -> Self {
        Self { claims: Vec::new() }
    }

    /// Claim `resource` for `by`
    ///
    /// Fails with `ResourceConflict` if anyone already holds it, including
    /// `by` itself. A board that needs more than [`MAX_CLAIMS`] resources
    /// is malformed and the claim is rejected.
    pub fn claim(&mut self, resource: Resource, by: Peripheral) -> Result<(), BootError> {
        if let Some(holder) = self.holder(resource) {
            return Err(BootError::ResourceConflict {
                resource,
                requested_by: by,
                held_by: Some(holder),
            });
        }

        self.claims
            .push((resource, by))
            .map_err(|_| BootError::DriverRejected(by))
    }

    /// Peripheral currently holding `resource`
    pub fn holder(&self, resource: Resource) -> Option<Peripheral> {
        self.claims
            .iter()
            .find(|(held, _)| *held == resource)
            .map(|(_, by)| *by)
    }

    /// Number of resources claimed
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Check if nothing has been claimed
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
