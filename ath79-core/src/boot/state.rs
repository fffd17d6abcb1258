//! Bring-up states
//!
//! ```text
//! Start → FlashReady → StorageReady → LedsReady → ButtonsReady
//!       → UsbPowered → UsbReady → MacDerived → EthReady → RadioReady → Done
//! ```

/// Bring-up states, in the only order they may be reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootState {
    /// Nothing registered yet
    Start,
    /// Boot flash registered; calibration region is mapped
    FlashReady,
    /// Auxiliary SPI block device registered
    StorageReady,
    /// LED table registered
    LedsReady,
    /// Polled button table registered
    ButtonsReady,
    /// USB power line claimed and driven high
    UsbPowered,
    /// USB controller registered
    UsbReady,
    /// Wired interface addresses read from calibration data
    MacDerived,
    /// MDIO bus and wired interfaces registered
    EthReady,
    /// Radio registered with calibration data
    RadioReady,
    /// Bring-up complete
    Done,
}

/// Number of states, including `Start` and `Done`
pub const STATE_COUNT: usize = 11;

impl BootState {
    /// Every state in order
    pub const SEQUENCE: [BootState; STATE_COUNT] = [
        BootState::Start,
        BootState::FlashReady,
        BootState::StorageReady,
        BootState::LedsReady,
        BootState::ButtonsReady,
        BootState::UsbPowered,
        BootState::UsbReady,
        BootState::MacDerived,
        BootState::EthReady,
        BootState::RadioReady,
        BootState::Done,
    ];

    /// The next state, or `None` once done
    pub fn successor(self) -> Option<BootState> {
        use BootState::*;

        match self {
            Start => Some(FlashReady),
            FlashReady => Some(StorageReady),
            StorageReady => Some(LedsReady),
            LedsReady => Some(ButtonsReady),
            ButtonsReady => Some(UsbPowered),
            UsbPowered => Some(UsbReady),
            UsbReady => Some(MacDerived),
            MacDerived => Some(EthReady),
            EthReady => Some(RadioReady),
            RadioReady => Some(Done),
            Done => None,
        }
    }

    /// States that must have been reached before entering this one
    ///
    /// The hard hardware dependencies. Anything else in the sequence is
    /// ordered for determinism only.
    pub fn requires(self) -> &'static [BootState] {
        use BootState::*;

        match self {
            Start | FlashReady => &[],
            StorageReady => &[FlashReady],
            LedsReady => &[StorageReady],
            ButtonsReady => &[LedsReady],
            UsbPowered => &[ButtonsReady],
            UsbReady => &[UsbPowered],
            MacDerived => &[FlashReady, UsbReady],
            EthReady => &[MacDerived],
            RadioReady => &[FlashReady, EthReady],
            Done => &[RadioReady],
        }
    }

    /// Check if this is the terminal success state
    pub fn is_done(self) -> bool {
        self == BootState::Done
    }
}
