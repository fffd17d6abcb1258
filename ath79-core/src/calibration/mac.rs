//! Hardware (MAC) addresses

use core::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use super::MAC_ADDRESS_LEN;

/// 48-bit hardware address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MacAddress([u8; MAC_ADDRESS_LEN]);

impl MacAddress {
    /// Create from raw octets
    pub const fn new(octets: [u8; MAC_ADDRESS_LEN]) -> Self {
        Self(octets)
    }

    /// Raw octets
    pub const fn octets(&self) -> [u8; MAC_ADDRESS_LEN] {
        self.0
    }

    /// All octets zero (unprogrammed factory data)
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Group bit set in the first octet
    pub const fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }

    /// Usable as a station address
    ///
    /// Diagnostic only. Addresses are always handed on verbatim.
    pub fn is_valid_station(&self) -> bool {
        !self.is_zero() && !self.is_multicast()
    }
}

impl From<[u8; MAC_ADDRESS_LEN]> for MacAddress {
    fn from(octets: [u8; MAC_ADDRESS_LEN]) -> Self {
        Self(octets)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            a, b, c, d, e, g
        )
    }
}
