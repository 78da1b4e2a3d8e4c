//! Memory-mapped register access
//!
//! Drivers never cast addresses themselves. A [`Register`] wraps one fixed
//! device address and only offers volatile reads and writes, so every
//! access reaches the device in program order and none is merged, cached
//! or elided.
//!
//! Polled drivers are written against [`RegisterBus`] rather than a
//! concrete block. On hardware the bus is an [`MmioBlock`]; host tests
//! substitute a scripted bus and observe every access.

use core::marker::PhantomData;
use core::ptr::{read_volatile, write_volatile};

/// A single memory-mapped register of width `T`
#[derive(Debug, Clone, Copy)]
pub struct Register<T: Copy> {
    addr: usize,
    _width: PhantomData<T>,
}

impl<T: Copy> Register<T> {
    /// Create a register handle for `addr`
    ///
    /// # Safety
    /// `addr` must be mapped device (or otherwise valid) memory, aligned for
    /// `T`, for as long as the handle is used.
    pub const unsafe fn new(addr: usize) -> Self {
        Self {
            addr,
            _width: PhantomData,
        }
    }

    pub const fn addr(&self) -> usize {
        self.addr
    }

    #[inline]
    pub fn read(&self) -> T {
        // SAFETY: validity of `addr` is the contract of `Register::new`.
        unsafe { read_volatile(self.addr as *const T) }
    }

    #[inline]
    pub fn write(&self, value: T) {
        // SAFETY: validity of `addr` is the contract of `Register::new`.
        unsafe { write_volatile(self.addr as *mut T, value) }
    }
}

/// A block of 32-bit registers addressed by byte offset from its base
pub trait RegisterBus {
    fn read32(&self, offset: usize) -> u32;
    fn write32(&self, offset: usize, value: u32);
}

/// Register block backed by mapped device memory
#[derive(Debug, Clone, Copy)]
pub struct MmioBlock {
    base: usize,
}

impl MmioBlock {
    /// # Safety
    /// Every offset the driver uses must land on a mapped, 4-byte aligned
    /// register of the block at `base`.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    pub const fn base(&self) -> usize {
        self.base
    }

    #[inline]
    fn register(&self, offset: usize) -> Register<u32> {
        // SAFETY: covered by the contract of `MmioBlock::new`.
        unsafe { Register::new(self.base + offset) }
    }
}

impl RegisterBus for MmioBlock {
    #[inline]
    fn read32(&self, offset: usize) -> u32 {
        self.register(offset).read()
    }

    #[inline]
    fn write32(&self, offset: usize, value: u32) {
        self.register(offset).write(value)
    }
}
