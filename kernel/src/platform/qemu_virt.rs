//! QEMU `virt` machine (AArch64)
//!
//! Devices sit in the kernel device region at the top of the address
//! space; the linear window maps RAM from 0x4000_0000. Only built for
//! 64-bit targets.

use super::{AddressMap, DeviceFrame, PhysAddr, Platform, VirtAddr};
use crate::components::console::uart::PL011;
use static_assertions::const_assert;

pub const PLATFORM: Platform = Platform {
    name: "qemu-virt",
    map: AddressMap {
        kernel_phys_base: PhysAddr::new(0x4000_0000),
        kernel_virt_base: VirtAddr::new(0xffff_ff80_0000_0000),
        pptr_base: VirtAddr::new(0xffff_ff80_0000_0000),
        kernel_window_size: 0x40_0000_0000,
        uart: Some(DeviceFrame::new(0x0900_0000, 0xffff_ffff_ffe0_1000)),
        gic_distributor: Some(DeviceFrame::new(0x0800_0000, 0xffff_ffff_ffe0_2000)),
        gic_cpu_interface: Some(DeviceFrame::new(0x0801_0000, 0xffff_ffff_ffe0_3000)),
        debug_unit: None,
    },
    uart: Some(PL011),
};

const_assert!(PLATFORM.map.is_consistent());
