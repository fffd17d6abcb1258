//! SPI bus vocabulary
//!
//! Addressing and clock-mode types used when describing SPI-attached
//! devices to the host's SPI board-info table.

#[cfg(feature = "serde")]
use serde::Serialize;

/// Position of a device on the SPI controller
///
/// A (bus, chip-select) pair may be held by exactly one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SpiAddress {
    /// SPI bus number
    pub bus: u8,
    /// Chip-select index on that bus
    pub chip_select: u8,
}

impl SpiAddress {
    /// Create a new SPI address
    pub const fn new(bus: u8, chip_select: u8) -> Self {
        Self { bus, chip_select }
    }
}

/// SPI clock mode (CPOL/CPHA pair)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    #[default]
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl Mode {
    /// Mode number as used by the kernel's `spi_board_info.mode`
    pub const fn bits(self) -> u8 {
        match self {
            Mode::Mode0 => 0,
            Mode::Mode1 => 1,
            Mode::Mode2 => 2,
            Mode::Mode3 => 3,
        }
    }
}
