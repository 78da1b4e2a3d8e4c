//! Xilinx ZynqMP, Cortex-A53 cluster running in AArch32 mode
//!
//! UART0 is a Cadence UART: bytes go to the TX/RX FIFO register and the
//! channel status register reports when the transmit FIFO has drained.

use super::{AddressMap, DeviceFrame, PhysAddr, Platform, VirtAddr};
use crate::components::console::uart::CADENCE;
use static_assertions::const_assert;

pub const PLATFORM: Platform = Platform {
    name: "zynqmp",
    map: AddressMap {
        kernel_phys_base: PhysAddr::new(0x0000_0000),
        kernel_virt_base: VirtAddr::new(0xe000_0000),
        pptr_base: VirtAddr::new(0xe000_0000),
        kernel_window_size: 0x1ff0_0000,
        uart: Some(DeviceFrame::new(0xff00_0000, 0xfff0_1000)),
        gic_cpu_interface: Some(DeviceFrame::new(0xf902_0000, 0xfff0_3000)),
        gic_distributor: Some(DeviceFrame::new(0xf901_0000, 0xfff0_4000)),
        debug_unit: Some(DeviceFrame::new(0xfec1_0000, 0xfff0_5000)),
    },
    uart: Some(CADENCE),
};

const_assert!(PLATFORM.map.is_consistent());
