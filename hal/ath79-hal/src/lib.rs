//! ath79 hardware vocabulary
//!
//! Types shared by the board-agnostic bring-up core and the individual
//! board crates. Nothing in here performs I/O; these are the values that
//! get handed to the host's device registration framework.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Board crates (ath79-gl-ar150, ...)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ath79-core (descriptors, sequencer)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ath79-hal (this crate - vocabulary)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`gpio`] - GPIO lines, output requests, active-low handling
//! - [`spi`] - SPI bus addressing and clock modes
//! - [`flash`] - Physical memory windows and read-only mapped regions

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod gpio;
pub mod spi;

// Re-export key types at crate root for convenience
pub use flash::{MappedRegion, MemoryWindow};
pub use gpio::{GpioLine, OutputRequest, PinState};
pub use spi::{Mode, SpiAddress};
