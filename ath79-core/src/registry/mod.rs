//! Host registration surface
//!
//! The sequencer drives a [`DeviceRegistry`] supplied by the host; the
//! host selects which board to bring up through a [`MachineTable`].

pub mod device;
pub mod machine;
#[cfg(any(test, feature = "testing"))]
pub mod recording;

pub use device::{DeviceRegistry, EthernetPort, RadioSpec, RegistryError};
pub use machine::{
    InitEntry, MachineId, MachineRecord, MachineTable, RegistrationError, MAX_MACHINES,
};
#[cfg(any(test, feature = "testing"))]
pub use recording::{Call, CallKind, RecordingRegistry};
