//! Type-safe physical and virtual addresses
//!
//! Address map entries are native-word values, but the kernel never mixes
//! the two spaces: a `PhysAddr` is what the bus sees, a `VirtAddr` is what
//! the kernel dereferences once the boot mapping is live.

use core::fmt;

/// Page size (4KB). Every device register block spans one page.
pub const PAGE_SIZE: usize = 4096;

/// Physical address
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PhysAddr(usize);

impl PhysAddr {
    pub const fn new(addr: usize) -> Self {
        Self(addr)
    }

    pub const fn as_usize(self) -> usize {
        self.0
    }

    /// Check if aligned to `align` (must be a power of two)
    pub const fn is_aligned(self, align: usize) -> bool {
        self.0 & (align - 1) == 0
    }
}

impl fmt::Display for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Kernel virtual address
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct VirtAddr(usize);

impl VirtAddr {
    pub const fn new(addr: usize) -> Self {
        Self(addr)
    }

    pub const fn as_usize(self) -> usize {
        self.0
    }

    /// Check if aligned to `align` (must be a power of two)
    pub const fn is_aligned(self, align: usize) -> bool {
        self.0 & (align - 1) == 0
    }
}

impl fmt::Display for VirtAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// One device register block: where it lives on the bus and where the
/// boot-time mapping exposes it to the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceFrame {
    pub paddr: PhysAddr,
    pub pptr: VirtAddr,
}

impl DeviceFrame {
    pub const fn new(paddr: usize, pptr: usize) -> Self {
        Self {
            paddr: PhysAddr::new(paddr),
            pptr: VirtAddr::new(pptr),
        }
    }

    /// True if the two frames share a page on either side of the mapping.
    pub const fn overlaps(&self, other: &DeviceFrame) -> bool {
        pages_intersect(self.paddr.as_usize(), other.paddr.as_usize())
            || pages_intersect(self.pptr.as_usize(), other.pptr.as_usize())
    }

    pub const fn is_page_aligned(&self) -> bool {
        self.paddr.is_aligned(PAGE_SIZE) && self.pptr.is_aligned(PAGE_SIZE)
    }
}

// Written as a distance so a frame in the top page cannot overflow.
const fn pages_intersect(a: usize, b: usize) -> bool {
    let distance = if a > b { a - b } else { b - a };
    distance < PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment() {
        assert!(PhysAddr::new(0x4000_0000).is_aligned(PAGE_SIZE));
        assert!(!PhysAddr::new(0x4000_0010).is_aligned(PAGE_SIZE));
        assert!(VirtAddr::new(0xfff0_1000).is_aligned(PAGE_SIZE));
        assert!(!VirtAddr::new(0xfff0_1004).is_aligned(PAGE_SIZE));
    }

    #[test]
    fn test_display_is_hex() {
        assert_eq!(format!("{}", PhysAddr::new(0x01c2_8000)), "0x1c28000");
        assert_eq!(format!("{}", VirtAddr::new(0xfff0_1000)), "0xfff01000");
    }

    #[test]
    fn test_frame_overlap() {
        let uart = DeviceFrame::new(0x01c2_8000, 0xfff0_1000);
        let gicd = DeviceFrame::new(0x01c8_1000, 0xfff0_2000);
        let same_pptr = DeviceFrame::new(0x0200_0000, 0xfff0_1800);
        let same_paddr = DeviceFrame::new(0x01c2_8000, 0xfff0_9000);

        assert!(!uart.overlaps(&gicd));
        assert!(uart.overlaps(&same_pptr));
        assert!(uart.overlaps(&same_paddr));
        assert!(uart.overlaps(&uart));
    }

    #[test]
    fn test_frame_in_top_page() {
        let top = DeviceFrame::new(0x1000, usize::MAX & !(PAGE_SIZE - 1));
        let below = DeviceFrame::new(0x2000, (usize::MAX & !(PAGE_SIZE - 1)) - PAGE_SIZE);
        assert!(!top.overlaps(&below));
        assert!(top.is_page_aligned());
    }
}
