//! Bring-up errors
//!
//! Every error is fatal. There is no retry path: the sequencer stops at
//! the first one and later steps never run.

use core::fmt;

use super::ledger::Resource;
use super::state::BootState;
use crate::calibration::CalibrationError;
use crate::config::Peripheral;

/// Why a bring-up step failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootError {
    /// Resource already held by another peripheral
    ResourceConflict {
        /// Contested resource
        resource: Resource,
        /// Peripheral that asked for it
        requested_by: Peripheral,
        /// Current holder, if known locally (`None` when the host reported it)
        held_by: Option<Peripheral>,
    },
    /// Calibration read past the end of the mapped region
    OutOfBounds {
        /// Offset from the region base
        offset: usize,
        /// Read length
        len: usize,
        /// Region size
        size: usize,
    },
    /// Host refused the descriptor
    DriverRejected(Peripheral),
    /// A step was entered before a state it depends on
    OutOfOrder {
        /// Step being entered
        entering: BootState,
        /// Dependency not yet reached
        missing: BootState,
    },
}

impl From<CalibrationError> for BootError {
    fn from(e: CalibrationError) -> Self {
        match e {
            CalibrationError::OutOfBounds { offset, len, size } => {
                BootError::OutOfBounds { offset, len, size }
            }
        }
    }
}

impl fmt::Display for BootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootError::ResourceConflict {
                resource,
                requested_by,
                held_by: Some(holder),
            } => write!(
                f,
                "{:?} requested by {:?} is held by {:?}",
                resource, requested_by, holder
            ),
            BootError::ResourceConflict {
                resource,
                requested_by,
                held_by: None,
            } => write!(f, "{:?} requested by {:?} is busy", resource, requested_by),
            BootError::OutOfBounds { offset, len, size } => write!(
                f,
                "calibration read {:#x}+{:#x} exceeds region of {:#x} bytes",
                offset, len, size
            ),
            BootError::DriverRejected(p) => write!(f, "driver rejected {:?}", p),
            BootError::OutOfOrder { entering, missing } => {
                write!(f, "entering {:?} before {:?}", entering, missing)
            }
        }
    }
}

/// A failed bring-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootFailure {
    /// Step that could not be entered
    pub failed_step: BootState,
    /// Last state successfully reached
    pub last_reached: BootState,
    /// What went wrong
    pub error: BootError,
}

impl fmt::Display for BootFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bring-up failed entering {:?} (reached {:?}): {}",
            self.failed_step, self.last_reached, self.error
        )
    }
}
