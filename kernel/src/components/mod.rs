//! Kernel components
//!
//! Minimal components built into the kernel for essential functionality.
//! These are NOT full-featured drivers - they provide only what the kernel
//! needs before any user-space driver exists.
//!
//! - **console**: polled `putc()` for debug output (no interrupts, no
//!   buffering, no receive)
//!
//! Kernel components are composed at compile time via cargo features; see
//! [`crate::config`].

pub mod console;
