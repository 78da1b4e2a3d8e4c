//! Spike RISC-V simulator, RV32
//!
//! The kernel image is linked at `KERNEL_BASE` near the top of the address
//! space; the linear window starts at `PPTR_BASE` and runs up to it. Spike
//! has no memory-mapped UART and no GIC: console output goes through the
//! SBI, so a build with `printing` or `debug-build` for this board fails at
//! console composition.

use super::{AddressMap, PhysAddr, Platform, VirtAddr};
use static_assertions::const_assert;

pub const PPTR_BASE: usize = 0x8000_0000;
pub const KERNEL_BASE: usize = 0xff80_0000;

pub const PLATFORM: Platform = Platform {
    name: "spike",
    map: AddressMap {
        kernel_phys_base: PhysAddr::new(0x8000_0000),
        kernel_virt_base: VirtAddr::new(KERNEL_BASE),
        pptr_base: VirtAddr::new(PPTR_BASE),
        kernel_window_size: KERNEL_BASE - PPTR_BASE,
        uart: None,
        gic_distributor: None,
        gic_cpu_interface: None,
        debug_unit: None,
    },
    uart: None,
};

const_assert!(PLATFORM.map.is_consistent());
