//! Allwinner A20 (Cortex-A7, AArch32)
//!
//! DRAM starts at 0x4000_0000 and the kernel window covers everything up to
//! the device page block at 0xfff0_0000. UART0 is a DesignWare 8250 with a
//! 4-byte register stride.

use super::{AddressMap, DeviceFrame, PhysAddr, Platform, VirtAddr};
use crate::components::console::uart::NS16550;
use static_assertions::const_assert;

pub const PLATFORM: Platform = Platform {
    name: "allwinner-a20",
    map: AddressMap {
        kernel_phys_base: PhysAddr::new(0x4000_0000),
        kernel_virt_base: VirtAddr::new(0xe000_0000),
        pptr_base: VirtAddr::new(0xe000_0000),
        kernel_window_size: 0x1ff0_0000,
        uart: Some(DeviceFrame::new(0x01c2_8000, 0xfff0_1000)),
        gic_distributor: Some(DeviceFrame::new(0x01c8_1000, 0xfff0_2000)),
        gic_cpu_interface: Some(DeviceFrame::new(0x01c8_2000, 0xfff0_3000)),
        debug_unit: None,
    },
    uart: Some(NS16550),
};

const_assert!(PLATFORM.map.is_consistent());
