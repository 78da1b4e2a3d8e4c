//! Kernel configuration and component composition
//!
//! This module handles compile-time composition of the debug console from
//! the active platform (see [`crate::platform::ACTIVE`]) and the diagnostic
//! cargo features:
//! - `printing` or `debug-build`: [`CONSOLE`] and [`put_debug_char`]
//! - `debug-build`: additionally [`get_debug_char`]
//!
//! With neither feature the console does not exist. A board without a
//! memory-mapped UART (spike) only builds with neither feature: composing
//! its console is a build error.

#[cfg(any(feature = "printing", feature = "debug-build"))]
use crate::components::console::{uart::PolledUart, Console};
#[cfg(any(feature = "printing", feature = "debug-build"))]
use crate::mmio::MmioBlock;
#[cfg(any(feature = "printing", feature = "debug-build"))]
use crate::platform;

/// Concrete console type of this build
#[cfg(any(feature = "printing", feature = "debug-build"))]
pub type KernelConsole = PolledUart<MmioBlock>;

/// The debug console of the active platform
///
/// Points at the UART's kernel virtual address; nothing may call into it
/// before the boot mapping of the device frames is live.
#[cfg(any(feature = "printing", feature = "debug-build"))]
// SAFETY: the boot mapping maps `ACTIVE.map.uart` at its pptr before the
// kernel runs any code that prints.
pub static CONSOLE: KernelConsole = match unsafe { PolledUart::for_platform(&platform::ACTIVE) } {
    Some(uart) => uart,
    None => panic!("selected platform has no memory-mapped debug UART; build without printing/debug-build"),
};

/// Get reference to the global console
#[cfg(any(feature = "printing", feature = "debug-build"))]
pub fn console() -> &'static impl Console {
    &CONSOLE
}

/// Emit one character on the debug UART, spinning until it is accepted
#[cfg(any(feature = "printing", feature = "debug-build"))]
pub fn put_debug_char(c: u8) {
    CONSOLE.transmit_byte(c);
}

/// Debug UART input. Not implemented on any platform: always returns 0.
#[cfg(feature = "debug-build")]
pub fn get_debug_char() -> u8 {
    CONSOLE.receive_byte()
}
