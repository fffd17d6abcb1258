//! Board descriptor types
//!
//! A board is described entirely by `const`-constructible values so that
//! each board crate can declare its descriptor as a `static`.

pub mod board;
pub mod hardware;
pub mod layout;

pub use board::*;
pub use hardware::*;
pub use layout::*;
