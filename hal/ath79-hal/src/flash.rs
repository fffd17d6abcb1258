//! Memory-mapped flash windows
//!
//! Boot flash on these SoCs is mapped read-only into the physical address
//! space. Factory data (the ART partition) is read straight out of that
//! mapping, so the core only ever sees a borrowed byte slice plus the
//! physical address it was mapped from.

#[cfg(feature = "serde")]
use serde::Serialize;

/// A physical address range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MemoryWindow {
    /// Physical base address
    pub base: u32,
    /// Window size in bytes
    pub size: u32,
}

impl MemoryWindow {
    /// Create a new window
    pub const fn new(base: u32, size: u32) -> Self {
        Self { base, size }
    }

    /// One past the last address, computed wide so it cannot wrap
    pub const fn end(&self) -> u64 {
        self.base as u64 + self.size as u64
    }

    /// Check whether `other` lies entirely inside this window
    pub const fn contains_window(&self, other: &MemoryWindow) -> bool {
        other.base >= self.base && other.end() <= self.end()
    }

    /// Check whether `[offset, offset + len)` fits inside the window
    pub const fn fits(&self, offset: u32, len: u32) -> bool {
        offset as u64 + len as u64 <= self.size as u64
    }
}

/// Read-only view of a mapped region
///
/// The bytes are borrowed from wherever the host mapped them. There is
/// no writer once the region is mapped, so reads need no synchronisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MappedRegion<'a> {
    base: u32,
    bytes: &'a [u8],
}

impl<'a> MappedRegion<'a> {
    /// Wrap bytes mapped at physical address `base`
    pub const fn new(base: u32, bytes: &'a [u8]) -> Self {
        Self { base, bytes }
    }

    /// Physical base address
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Region size in bytes
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the region is empty
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The physical window this region occupies
    pub fn window(&self) -> MemoryWindow {
        MemoryWindow::new(self.base, u32::try_from(self.bytes.len()).unwrap_or(u32::MAX))
    }

    /// Borrow `len` bytes starting at `offset`, or `None` if out of range
    pub fn get(&self, offset: usize, len: usize) -> Option<&'a [u8]> {
        let end = offset.checked_add(len)?;
        self.bytes.get(offset..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_containment() {
        let flash = MemoryWindow::new(0x1f00_0000, 0x0100_0000);
        let art = MemoryWindow::new(0x1fff_0000, 0x1_0000);
        assert!(flash.contains_window(&art));

        let past_end = MemoryWindow::new(0x1fff_0000, 0x2_0000);
        assert!(!flash.contains_window(&past_end));

        let before = MemoryWindow::new(0x1eff_0000, 0x1_0000);
        assert!(!flash.contains_window(&before));
    }

    #[test]
    fn test_window_end_does_not_wrap() {
        let top = MemoryWindow::new(u32::MAX, 2);
        assert_eq!(top.end(), u32::MAX as u64 + 2);
        assert!(!top.fits(u32::MAX, 1));
        assert!(top.fits(1, 1));
    }

    #[test]
    fn test_region_get() {
        let bytes = [1u8, 2, 3, 4];
        let region = MappedRegion::new(0x1000, &bytes);
        assert_eq!(region.len(), 4);
        assert_eq!(region.get(1, 2), Some(&bytes[1..3]));
        assert_eq!(region.get(3, 1), Some(&bytes[3..4]));
        assert_eq!(region.get(3, 2), None);
        assert_eq!(region.get(usize::MAX, 2), None);
        assert_eq!(region.window(), MemoryWindow::new(0x1000, 4));
    }
}
