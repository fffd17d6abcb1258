//! Machine table
//!
//! The host picks a board's bring-up routine by numeric machine id. The
//! table is an explicit value owned by the boot orchestrator, filled by
//! `register` calls rather than link-time sections.

use core::fmt;

use heapless::Vec;

use crate::boot::BootResult;

/// Maximum machines a table can hold
pub const MAX_MACHINES: usize = 16;

/// Numeric machine id
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MachineId(pub u32);

/// Bring-up entry point
///
/// Takes no arguments: the record's owner captures the registry and the
/// mapped calibration region.
pub type InitEntry<'a> = &'a dyn Fn() -> BootResult;

/// One selectable board
#[derive(Clone, Copy)]
pub struct MachineRecord<'a> {
    /// Machine id
    pub id: MachineId,
    /// Short identifier (e.g., "GL-AR150")
    pub short_name: &'static str,
    /// Human-readable name
    pub display_name: &'static str,
    /// Bring-up routine
    pub init_entry: InitEntry<'a>,
}

impl fmt::Debug for MachineRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineRecord")
            .field("id", &self.id)
            .field("short_name", &self.short_name)
            .field("display_name", &self.display_name)
            .finish_non_exhaustive()
    }
}

/// Machine table errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistrationError {
    /// A record with this id is already registered
    DuplicateId(MachineId),
    /// No room for another record
    TableFull,
}

/// Table of boards the host can bring up
#[derive(Debug, Default)]
pub struct MachineTable<'a> {
    records: Vec<MachineRecord<'a>, MAX_MACHINES>,
}

impl<'a> MachineTable<'a> {
    /// Create an empty table
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Add a record
    pub fn register(&mut self, record: MachineRecord<'a>) -> Result<(), RegistrationError> {
        if self.lookup(record.id).is_some() {
            return Err(RegistrationError::DuplicateId(record.id));
        }
        self.records
            .push(record)
            .map_err(|_| RegistrationError::TableFull)
    }

    /// Find a record by id
    pub fn lookup(&self, id: MachineId) -> Option<&MachineRecord<'a>> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Find a record by short name
    pub fn lookup_name(&self, short_name: &str) -> Option<&MachineRecord<'a>> {
        self.records.iter().find(|r| r.short_name == short_name)
    }

    /// Run the bring-up routine registered under `id`
    ///
    /// `None` if no such machine. The caller invokes this at most once
    /// per boot.
    pub fn boot(&self, id: MachineId) -> Option<BootResult> {
        self.lookup(id).map(|record| {
            boot_log!(info, "booting machine {}", record.short_name);
            (record.init_entry)()
        })
    }

    /// Number of registered machines
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boot::{BootError, BootFailure, BootState};
    use crate::config::Peripheral;
    use core::cell::Cell;

    fn failing() -> BootResult {
        Err(BootFailure {
            failed_step: BootState::FlashReady,
            last_reached: BootState::Start,
            error: BootError::DriverRejected(Peripheral::Flash),
        })
    }

    #[test]
    fn test_register_and_lookup() {
        let entry = failing;
        let mut table = MachineTable::new();
        assert!(table.is_empty());

        table
            .register(MachineRecord {
                id: MachineId(1),
                short_name: "A",
                display_name: "Board A",
                init_entry: &entry,
            })
            .unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup(MachineId(1)).map(|r| r.short_name), Some("A"));
        assert!(table.lookup(MachineId(2)).is_none());
        assert_eq!(
            table.lookup_name("A").map(|r| r.display_name),
            Some("Board A")
        );
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let entry = failing;
        let record = MachineRecord {
            id: MachineId(7),
            short_name: "A",
            display_name: "Board A",
            init_entry: &entry,
        };
        let mut table = MachineTable::new();
        table.register(record).unwrap();
        assert_eq!(
            table.register(record),
            Err(RegistrationError::DuplicateId(MachineId(7)))
        );
    }

    #[test]
    fn test_table_full() {
        let entry = failing;
        let mut table = MachineTable::new();
        for id in 0..MAX_MACHINES as u32 {
            table
                .register(MachineRecord {
                    id: MachineId(id),
                    short_name: "x",
                    display_name: "x",
                    init_entry: &entry,
                })
                .unwrap();
        }
        let extra = MachineRecord {
            id: MachineId(999),
            short_name: "y",
            display_name: "y",
            init_entry: &entry,
        };
        assert_eq!(table.register(extra), Err(RegistrationError::TableFull));
    }

    #[test]
    fn test_boot_invokes_entry() {
        let calls = Cell::new(0);
        let entry = || {
            calls.set(calls.get() + 1);
            failing()
        };
        let mut table = MachineTable::new();
        table
            .register(MachineRecord {
                id: MachineId(3),
                short_name: "A",
                display_name: "Board A",
                init_entry: &entry,
            })
            .unwrap();

        assert!(table.boot(MachineId(4)).is_none());
        assert_eq!(calls.get(), 0);

        let result = table.boot(MachineId(3)).unwrap();
        assert_eq!(result.unwrap_err().failed_step, BootState::FlashReady);
        assert_eq!(calls.get(), 1);
    }
}
