//! Platform address maps
//!
//! Every board the kernel runs on is described by one immutable
//! [`Platform`] value: where the kernel is loaded and linked, where its
//! window of physical memory starts in virtual space, which device register
//! blocks the boot mapping exposes, and which UART register layout (if any)
//! the debug console speaks.
//!
//! # Platform Selection (Compile-Time)
//!
//! Exactly one platform is active per build, chosen by cargo feature:
//! - `plat-allwinner-a20`: Allwinner A20 (ARMv7, 16550 UART)
//! - `plat-zynqmp`: Xilinx ZynqMP in AArch32 mode (Cadence UART)
//! - `plat-qemu-virt`: QEMU virt (AArch64, PL011 UART)
//! - `plat-spike`: Spike RV32 simulator (no memory-mapped UART)
//!
//! The `default-platform` feature (on by default) selects the A20 only when
//! no `plat-*` feature is given, so `--features plat-zynqmp` works without
//! `--no-default-features`. Two explicit `plat-*` features are a build
//! error.
//!
//! The active platform is [`ACTIVE`]; the symbolic constants below
//! ([`UART_PPTR`], [`KERNEL_BASE`], ...) are resolved from it, so a name
//! that does not exist is a build failure, never a runtime one.
//!
//! Every variant is checked at compile time with
//! [`AddressMap::is_consistent`].

pub mod address;
pub mod allwinner_a20;
#[cfg(target_pointer_width = "64")]
pub mod qemu_virt;
pub mod spike;
pub mod zynqmp;

pub use address::{DeviceFrame, PhysAddr, VirtAddr, PAGE_SIZE};

use crate::components::console::uart::UartLayout;
use thiserror::Error;

/// Errors from address translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("physical address {addr:#x} is outside the kernel window")]
    PhysOutsideKernelWindow { addr: usize },

    #[error("virtual address {addr:#x} is outside the kernel window")]
    VirtOutsideKernelWindow { addr: usize },
}

/// Errors from platform lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlatformError {
    #[error("unknown platform")]
    UnknownPlatform,
}

pub type Result<T> = core::result::Result<T, AddressError>;

/// Which address space an entry's value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Space {
    Physical,
    Virtual,
}

/// Named address map entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub name: &'static str,
    pub space: Space,
    pub value: usize,
}

/// Compile-time address map of one platform variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressMap {
    /// Physical address the kernel image is loaded at
    pub kernel_phys_base: PhysAddr,
    /// Virtual address the kernel image is linked at
    pub kernel_virt_base: VirtAddr,
    /// Start of the linear window that maps `kernel_phys_base`
    pub pptr_base: VirtAddr,
    /// Size of the linear window at `pptr_base`
    pub kernel_window_size: usize,
    pub uart: Option<DeviceFrame>,
    pub gic_distributor: Option<DeviceFrame>,
    pub gic_cpu_interface: Option<DeviceFrame>,
    /// CoreSight debug/trace block, where the board has one mapped
    pub debug_unit: Option<DeviceFrame>,
}

impl AddressMap {
    /// All device register blocks, absent ones as `None`
    pub const fn device_frames(&self) -> [Option<DeviceFrame>; 4] {
        [
            self.uart,
            self.gic_distributor,
            self.gic_cpu_interface,
            self.debug_unit,
        ]
    }

    /// Check the invariants every address map must hold:
    /// - region anchors and device frames are page aligned
    /// - the kernel image is linked at the window start or outside the window
    /// - no device frame lies inside the kernel window
    /// - no two device frames share a page, physically or virtually
    pub const fn is_consistent(&self) -> bool {
        if !self.kernel_phys_base.is_aligned(PAGE_SIZE)
            || !self.kernel_virt_base.is_aligned(PAGE_SIZE)
            || !self.pptr_base.is_aligned(PAGE_SIZE)
            || self.kernel_window_size == 0
        {
            return false;
        }
        if self
            .pptr_base
            .as_usize()
            .checked_add(self.kernel_window_size - 1)
            .is_none()
        {
            return false;
        }
        if self.kernel_virt_base.as_usize() != self.pptr_base.as_usize()
            && self.in_kernel_window(self.kernel_virt_base)
        {
            return false;
        }

        let frames = self.device_frames();
        let mut i = 0;
        while i < frames.len() {
            if let Some(a) = frames[i] {
                if !a.is_page_aligned() || self.in_kernel_window(a.pptr) {
                    return false;
                }
                let mut j = i + 1;
                while j < frames.len() {
                    if let Some(b) = frames[j] {
                        if a.overlaps(&b) {
                            return false;
                        }
                    }
                    j += 1;
                }
            }
            i += 1;
        }
        true
    }

    /// True if `vaddr` falls inside the kernel window
    pub const fn in_kernel_window(&self, vaddr: VirtAddr) -> bool {
        let base = self.pptr_base.as_usize();
        let v = vaddr.as_usize();
        v >= base && v - base < self.kernel_window_size
    }

    /// Translate a physical address through the kernel window
    pub fn paddr_to_kernel_vaddr(&self, paddr: PhysAddr) -> Result<VirtAddr> {
        let offset = paddr
            .as_usize()
            .checked_sub(self.kernel_phys_base.as_usize())
            .filter(|offset| *offset < self.kernel_window_size)
            .ok_or(AddressError::PhysOutsideKernelWindow {
                addr: paddr.as_usize(),
            })?;
        Ok(VirtAddr::new(self.pptr_base.as_usize() + offset))
    }

    /// Translate a kernel window address back to physical
    pub fn kernel_vaddr_to_paddr(&self, vaddr: VirtAddr) -> Result<PhysAddr> {
        if !self.in_kernel_window(vaddr) {
            return Err(AddressError::VirtOutsideKernelWindow {
                addr: vaddr.as_usize(),
            });
        }
        let offset = vaddr.as_usize() - self.pptr_base.as_usize();
        self.kernel_phys_base
            .as_usize()
            .checked_add(offset)
            .map(PhysAddr::new)
            .ok_or(AddressError::VirtOutsideKernelWindow {
                addr: vaddr.as_usize(),
            })
    }

    /// Named entries: the region anchors, then each mapped device
    ///
    /// `PPTR_BASE` is listed only where the window does not start at
    /// `KERNEL_BASE`; otherwise it is the same address under a second name.
    pub fn entries(&self) -> impl Iterator<Item = Entry> {
        let phys = |name: &'static str, value: usize| {
            Some(Entry { name, space: Space::Physical, value })
        };
        let virt = |name: &'static str, value: usize| {
            Some(Entry { name, space: Space::Virtual, value })
        };
        let device = |name: &'static str, frame: Option<DeviceFrame>| {
            frame.and_then(|frame| virt(name, frame.pptr.as_usize()))
        };
        let pptr_base = if self.pptr_base == self.kernel_virt_base {
            None
        } else {
            virt("PPTR_BASE", self.pptr_base.as_usize())
        };
        [
            phys("PHYS_BASE", self.kernel_phys_base.as_usize()),
            virt("KERNEL_BASE", self.kernel_virt_base.as_usize()),
            pptr_base,
            device("UART_PPTR", self.uart),
            device("GIC_DISTRIBUTOR_PPTR", self.gic_distributor),
            device("GIC_CONTROLLER_PPTR", self.gic_cpu_interface),
            device("ARM_DEBUG_MMAPPING_PPTR", self.debug_unit),
        ]
        .into_iter()
        .flatten()
    }
}

/// One board: its address map and the register layout of its console UART
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub name: &'static str,
    pub map: AddressMap,
    /// `None` where the board has no memory-mapped debug UART
    pub uart: Option<UartLayout>,
}

impl Platform {
    /// Resolve a platform variant by name (host tooling, diagnostics)
    pub fn by_name(name: &str) -> core::result::Result<&'static Platform, PlatformError> {
        ALL.iter()
            .find(|platform| platform.name == name)
            .ok_or(PlatformError::UnknownPlatform)
    }
}

/// Every platform variant this build knows about
#[cfg(target_pointer_width = "64")]
pub static ALL: [Platform; 4] = [
    allwinner_a20::PLATFORM,
    zynqmp::PLATFORM,
    qemu_virt::PLATFORM,
    spike::PLATFORM,
];

/// Every platform variant this build knows about
#[cfg(not(target_pointer_width = "64"))]
pub static ALL: [Platform; 3] = [allwinner_a20::PLATFORM, zynqmp::PLATFORM, spike::PLATFORM];

// ============================================================================
// Active platform selection
// ============================================================================

#[cfg(not(any(
    feature = "default-platform",
    feature = "plat-allwinner-a20",
    feature = "plat-zynqmp",
    feature = "plat-qemu-virt",
    feature = "plat-spike"
)))]
compile_error!(
    "No platform selected. Enable exactly one of: plat-allwinner-a20, plat-zynqmp, plat-qemu-virt, plat-spike"
);

#[cfg(any(
    all(feature = "plat-allwinner-a20", feature = "plat-zynqmp"),
    all(feature = "plat-allwinner-a20", feature = "plat-qemu-virt"),
    all(feature = "plat-allwinner-a20", feature = "plat-spike"),
    all(feature = "plat-zynqmp", feature = "plat-qemu-virt"),
    all(feature = "plat-zynqmp", feature = "plat-spike"),
    all(feature = "plat-qemu-virt", feature = "plat-spike"),
))]
compile_error!("Several platforms selected. Enable exactly one plat-* feature");

#[cfg(all(feature = "plat-qemu-virt", not(target_pointer_width = "64")))]
compile_error!("plat-qemu-virt requires a 64-bit target");

/// The platform this kernel is built for
#[cfg(all(
    any(feature = "plat-allwinner-a20", feature = "default-platform"),
    not(any(feature = "plat-zynqmp", feature = "plat-qemu-virt", feature = "plat-spike"))
))]
pub const ACTIVE: Platform = allwinner_a20::PLATFORM;

/// The platform this kernel is built for
#[cfg(feature = "plat-zynqmp")]
pub const ACTIVE: Platform = zynqmp::PLATFORM;

/// The platform this kernel is built for
#[cfg(feature = "plat-qemu-virt")]
pub const ACTIVE: Platform = qemu_virt::PLATFORM;

/// The platform this kernel is built for
#[cfg(feature = "plat-spike")]
pub const ACTIVE: Platform = spike::PLATFORM;

const fn pptr(frame: Option<DeviceFrame>) -> Option<VirtAddr> {
    match frame {
        Some(frame) => Some(frame.pptr),
        None => None,
    }
}

pub const PHYS_BASE: PhysAddr = ACTIVE.map.kernel_phys_base;
pub const KERNEL_BASE: VirtAddr = ACTIVE.map.kernel_virt_base;
pub const PPTR_BASE: VirtAddr = ACTIVE.map.pptr_base;
pub const UART_PPTR: Option<VirtAddr> = pptr(ACTIVE.map.uart);
pub const GIC_DISTRIBUTOR_PPTR: Option<VirtAddr> = pptr(ACTIVE.map.gic_distributor);
pub const GIC_CONTROLLER_PPTR: Option<VirtAddr> = pptr(ACTIVE.map.gic_cpu_interface);
pub const ARM_DEBUG_MMAPPING_PPTR: Option<VirtAddr> = pptr(ACTIVE.map.debug_unit);
