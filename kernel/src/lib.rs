//! KaaL platform layer
//!
//! Board-specific facts for the KaaL kernel, kept in one place so the rest
//! of the kernel is written once against symbolic names.
//!
//! # Architecture
//!
//! - `platform`: per-board address maps, one selected per build
//! - `mmio`: volatile register access
//! - `components::console`: polled debug UART
//! - `config`: compile-time composition of the console for the active board
//! - `debug`: `kprint!`/`kprintln!` and the `log` backend
//!
//! # Features
//!
//! - `plat-allwinner-a20` | `plat-zynqmp` | `plat-qemu-virt` | `plat-spike`:
//!   board (at most one)
//! - `default-platform` (default): the A20 when no `plat-*` feature is given
//! - `printing`: debug output (`put_debug_char`, `kprint!`)
//! - `debug-build`: debug output plus the `get_debug_char` stub
//! - `log-error` .. `log-trace`: maximum log level
//!
//! Debug I/O exists only in builds that ask for it. `put_debug_char` needs
//! `printing` or `debug-build`:
#![cfg_attr(
    any(feature = "printing", feature = "debug-build"),
    doc = "```no_run\nkaal_hal::put_debug_char(b'!');\n```"
)]
#![cfg_attr(
    not(any(feature = "printing", feature = "debug-build")),
    doc = "```compile_fail,E0425\nkaal_hal::put_debug_char(b'!');\n```"
)]
//!
//! and `get_debug_char` needs `debug-build`; `printing` alone does not
//! provide it:
#![cfg_attr(
    feature = "debug-build",
    doc = "```no_run\nlet _: u8 = kaal_hal::get_debug_char();\n```"
)]
#![cfg_attr(
    not(feature = "debug-build"),
    doc = "```compile_fail,E0425\nlet _: u8 = kaal_hal::get_debug_char();\n```"
)]
#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod components;
pub mod config;
#[cfg(any(feature = "printing", feature = "debug-build"))]
pub mod debug;
pub mod mmio;
pub mod platform;

pub use platform::{AddressMap, DeviceFrame, PhysAddr, Platform, VirtAddr, ACTIVE};

#[cfg(any(feature = "printing", feature = "debug-build"))]
pub use config::put_debug_char;

#[cfg(feature = "debug-build")]
pub use config::get_debug_char;
