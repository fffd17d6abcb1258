//! Board bring-up
//!
//! A linear, single-shot state machine. Each transition performs one
//! group of registration calls and checks that the states it depends on
//! have already been reached. The first failure is terminal.

pub mod error;
pub mod ledger;
pub mod sequencer;
pub mod state;

pub use error::{BootError, BootFailure};
pub use ledger::{ClaimLedger, Resource, MAX_CLAIMS};
pub use sequencer::{BootReport, InitSequencer};
pub use state::BootState;

/// Outcome of one bring-up run
pub type BootResult = Result<BootReport, BootFailure>;
