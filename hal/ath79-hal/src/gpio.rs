//! GPIO line vocabulary
//!
//! A GPIO line is identified by its number on the SoC's GPIO controller.
//! Lines are claimed exclusively; the claim bookkeeping itself lives in
//! the core crate.

pub use embedded_hal::digital::PinState;

/// GPIO line number on the SoC controller
pub type GpioLine = u8;

/// Physical level for a logical state on a line with the given polarity
pub const fn level_for(on: bool, active_low: bool) -> PinState {
    // XOR: an active-low line that is "on" sits low
    if on != active_low {
        PinState::High
    } else {
        PinState::Low
    }
}

/// Request to claim a line as an output
///
/// Mirrors what the host's GPIO framework needs for a one-shot output
/// claim: the line, the level to drive immediately, whether userspace may
/// flip the direction later, and a label for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputRequest {
    /// Line to claim
    pub line: GpioLine,
    /// Level driven as soon as the line is claimed
    pub initial: PinState,
    /// Direction may not be changed after export
    pub fixed_direction: bool,
    /// Consumer label
    pub label: &'static str,
}

impl OutputRequest {
    /// Output initialised high
    pub const fn high(line: GpioLine, label: &'static str) -> Self {
        Self {
            line,
            initial: PinState::High,
            fixed_direction: false,
            label,
        }
    }

    /// Lock the exported direction
    pub const fn with_fixed_direction(mut self) -> Self {
        self.fixed_direction = true;
        self
    }
}
