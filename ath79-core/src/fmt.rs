//! Logging shims
//!
//! Forward to `defmt` when the feature is enabled, compile to nothing
//! otherwise. Arguments are still evaluated by reference in both
//! configurations so neither build warns about unused bindings.

macro_rules! boot_log {
    ($level:ident, $fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::$level!($fmt $(, $arg)*);
        #[cfg(not(feature = "defmt"))]
        {
            $( let _ = &$arg; )*
        }
    }};
}
