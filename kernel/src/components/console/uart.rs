//! Polled UART console component (minimal)
//!
//! This is a MINIMAL implementation for kernel debug output only: spin on
//! the status register until the transmitter can take a byte, then write
//! it. It does NOT support:
//! - Interrupts (IRQs handled in user-space)
//! - Buffering (user-space driver feature)
//! - Baud rate / FIFO configuration (assumes bootloader setup)
//! - Receive (see [`PolledUart::receive_byte`])
//!
//! Register offsets and the "ready" bit belong to the UART IP block, not
//! the board, so they live in a [`UartLayout`] that each platform picks.

use crate::mmio::{MmioBlock, RegisterBus};
use crate::platform::Platform;
use bitflags::bitflags;

#[cfg(any(feature = "printing", feature = "debug-build"))]
use super::Console;

/// Level of the status bit at which the transmitter accepts a byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyLevel {
    /// Ready while the bit is set ("holding register empty")
    Set,
    /// Ready while the bit is clear ("FIFO full")
    Clear,
}

/// Register layout of one UART IP block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartLayout {
    pub name: &'static str,
    /// Byte offset of the transmit register
    pub tx_offset: usize,
    /// Byte offset of the status register polled before each write
    pub status_offset: usize,
    /// Status bit that signals transmitter readiness
    pub tx_ready_mask: u32,
    pub ready_when: ReadyLevel,
}

impl UartLayout {
    /// Decode a status register value
    #[inline]
    pub const fn tx_ready(&self, status: u32) -> bool {
        let bit = status & self.tx_ready_mask != 0;
        match self.ready_when {
            ReadyLevel::Set => bit,
            ReadyLevel::Clear => !bit,
        }
    }
}

bitflags! {
    /// 16550 Line Status Register
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LineStatus: u32 {
        const DATA_READY = 1 << 0;
        const OVERRUN_ERROR = 1 << 1;
        const PARITY_ERROR = 1 << 2;
        const FRAMING_ERROR = 1 << 3;
        const BREAK_INTERRUPT = 1 << 4;
        /// Transmit Holding Register empty
        const THR_EMPTY = 1 << 5;
        /// Transmitter empty (THR and shift register)
        const TX_EMPTY = 1 << 6;
        const RX_FIFO_ERROR = 1 << 7;
    }
}

/// 16550-compatible UART with 32-bit register stride (DesignWare 8250)
///
/// THR is register 0, LSR is register 5.
pub const NS16550: UartLayout = UartLayout {
    name: "ns16550",
    tx_offset: 0x00,
    status_offset: 0x14,
    tx_ready_mask: LineStatus::THR_EMPTY.bits(),
    ready_when: ReadyLevel::Set,
};

/// Cadence UART (ZynqMP): TX/RX FIFO at 0x30, channel status at 0x2C
pub const CADENCE: UartLayout = UartLayout {
    name: "cadence",
    tx_offset: 0x30,
    status_offset: 0x2c,
    tx_ready_mask: 1 << 3, // TXEMPTY
    ready_when: ReadyLevel::Set,
};

/// ARM PL011: data register at 0x00, flag register at 0x18
pub const PL011: UartLayout = UartLayout {
    name: "pl011",
    tx_offset: 0x00,
    status_offset: 0x18,
    tx_ready_mask: 1 << 5, // TXFF
    ready_when: ReadyLevel::Clear,
};

/// Polled debug UART
///
/// Stateless: nothing about the hardware is cached between calls, the
/// status register is read fresh on every poll.
pub struct PolledUart<B: RegisterBus = MmioBlock> {
    bus: B,
    layout: UartLayout,
}

impl PolledUart<MmioBlock> {
    /// Console UART of `platform`, at its kernel virtual address
    ///
    /// `None` if the board has no memory-mapped UART or no layout for it.
    ///
    /// # Safety
    /// The platform's UART frame must already be mapped at its `pptr` (the
    /// boot-time device mapping does this) and must be the device the layout
    /// describes.
    pub const unsafe fn for_platform(platform: &Platform) -> Option<Self> {
        match (platform.map.uart, platform.uart) {
            (Some(frame), Some(layout)) => {
                Some(Self::new(MmioBlock::new(frame.pptr.as_usize()), layout))
            }
            _ => None,
        }
    }
}

impl<B: RegisterBus> PolledUart<B> {
    pub const fn new(bus: B, layout: UartLayout) -> Self {
        Self { bus, layout }
    }

    pub fn layout(&self) -> &UartLayout {
        &self.layout
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Hand one byte to the transmitter
    ///
    /// Spins on the status register with no timeout until the transmitter
    /// is ready, then writes `byte` once. If the device never reports ready
    /// this never returns.
    #[cfg(any(feature = "printing", feature = "debug-build"))]
    pub fn transmit_byte(&self, byte: u8) {
        while !self.layout.tx_ready(self.bus.read32(self.layout.status_offset)) {
            core::hint::spin_loop();
        }
        self.bus.write32(self.layout.tx_offset, u32::from(byte));
    }

    /// Receive placeholder: always 0, never touches the device
    ///
    /// A received NUL cannot be told apart from "nothing received"; a real
    /// receive path needs its own status check.
    #[cfg(feature = "debug-build")]
    pub fn receive_byte(&self) -> u8 {
        0
    }
}

#[cfg(any(feature = "printing", feature = "debug-build"))]
impl<B: RegisterBus + Send + Sync> Console for PolledUart<B> {
    #[inline]
    fn putc(&self, c: u8) {
        self.transmit_byte(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::vec::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Access {
        Read(usize),
        Write(usize, u32),
    }

    /// Bus that replays scripted status values, then reports `idle`
    struct ScriptedBus {
        status: Mutex<VecDeque<u32>>,
        idle: u32,
        log: Mutex<Vec<Access>>,
    }

    impl ScriptedBus {
        fn new(script: &[u32], idle: u32) -> Self {
            Self {
                status: Mutex::new(script.iter().copied().collect()),
                idle,
                log: Mutex::new(Vec::new()),
            }
        }

        fn accesses(&self) -> Vec<Access> {
            self.log.lock().unwrap().clone()
        }
    }

    impl RegisterBus for ScriptedBus {
        fn read32(&self, offset: usize) -> u32 {
            self.log.lock().unwrap().push(Access::Read(offset));
            self.status.lock().unwrap().pop_front().unwrap_or(self.idle)
        }

        fn write32(&self, offset: usize, value: u32) {
            self.log.lock().unwrap().push(Access::Write(offset, value));
        }
    }

    #[test]
    fn test_layout_ready_decoding() {
        assert!(NS16550.tx_ready(0x20));
        assert!(NS16550.tx_ready(0x60));
        assert!(!NS16550.tx_ready(0x00));
        assert!(!NS16550.tx_ready(0x41));

        assert!(CADENCE.tx_ready(0x08));
        assert!(!CADENCE.tx_ready(0x10));

        assert!(PL011.tx_ready(0x00));
        assert!(!PL011.tx_ready(0x20));
    }

    #[test]
    fn test_line_status_bits() {
        let lsr = LineStatus::from_bits_truncate(0x61);
        assert!(lsr.contains(LineStatus::THR_EMPTY | LineStatus::TX_EMPTY));
        assert!(lsr.contains(LineStatus::DATA_READY));
        assert_eq!(NS16550.tx_ready_mask, 0x20);
    }

    #[cfg(any(feature = "printing", feature = "debug-build"))]
    #[test]
    fn test_transmit_waits_for_thr_empty() {
        let n = 7;
        let mut script = std::vec![0x00; n];
        script.push(0x20);
        let uart = PolledUart::new(ScriptedBus::new(&script, 0x00), NS16550);

        uart.transmit_byte(0x41);

        let accesses = uart.bus().accesses();
        assert_eq!(accesses.len(), n + 2);
        assert!(accesses[..=n].iter().all(|a| *a == Access::Read(0x14)));
        assert_eq!(accesses[n + 1], Access::Write(0x00, 0x41));
    }

    #[cfg(any(feature = "printing", feature = "debug-build"))]
    #[test]
    fn test_transmit_every_byte_value() {
        for byte in 0..=255u8 {
            let uart = PolledUart::new(ScriptedBus::new(&[0x00, 0x01, 0x20], 0x00), NS16550);
            uart.transmit_byte(byte);
            assert_eq!(
                uart.bus().accesses(),
                [
                    Access::Read(0x14),
                    Access::Read(0x14),
                    Access::Read(0x14),
                    Access::Write(0x00, u32::from(byte)),
                ]
            );
        }
    }

    #[cfg(any(feature = "printing", feature = "debug-build"))]
    #[test]
    fn test_transmit_polls_even_when_ready() {
        let uart = PolledUart::new(ScriptedBus::new(&[], 0x20), NS16550);
        uart.transmit_byte(b'x');
        assert_eq!(
            uart.bus().accesses(),
            [Access::Read(0x14), Access::Write(0x00, u32::from(b'x'))]
        );
    }

    #[cfg(any(feature = "printing", feature = "debug-build"))]
    #[test]
    fn test_pl011_waits_while_fifo_full() {
        let uart = PolledUart::new(ScriptedBus::new(&[0x20, 0x20], 0x00), PL011);
        uart.transmit_byte(b'K');
        assert_eq!(
            uart.bus().accesses(),
            [
                Access::Read(0x18),
                Access::Read(0x18),
                Access::Read(0x18),
                Access::Write(0x00, u32::from(b'K')),
            ]
        );
    }

    #[cfg(any(feature = "printing", feature = "debug-build"))]
    #[test]
    fn test_cadence_offsets() {
        let uart = PolledUart::new(ScriptedBus::new(&[0x10], 0x08), CADENCE);
        uart.transmit_byte(b'z');
        assert_eq!(
            uart.bus().accesses(),
            [
                Access::Read(0x2c),
                Access::Read(0x2c),
                Access::Write(0x30, u32::from(b'z')),
            ]
        );
    }

    #[cfg(any(feature = "printing", feature = "debug-build"))]
    #[test]
    fn test_console_putc_is_transmit() {
        let uart = PolledUart::new(ScriptedBus::new(&[], 0x20), NS16550);
        uart.puts("a\n");
        let writes: Vec<_> = uart
            .bus()
            .accesses()
            .into_iter()
            .filter_map(|a| match a {
                Access::Write(_, v) => Some(v as u8),
                Access::Read(_) => None,
            })
            .collect();
        assert_eq!(writes, b"a\r\n");
    }

    #[cfg(feature = "debug-build")]
    #[test]
    fn test_receive_is_stub() {
        let uart = PolledUart::new(ScriptedBus::new(&[0x01], 0x21), NS16550);
        for _ in 0..3 {
            assert_eq!(uart.receive_byte(), 0);
        }
        assert!(uart.bus().accesses().is_empty());
    }

    #[test]
    fn test_for_platform_uses_uart_pptr() {
        let platform = crate::platform::allwinner_a20::PLATFORM;
        let uart = unsafe { PolledUart::for_platform(&platform) }.unwrap();
        assert_eq!(uart.bus().base(), 0xfff0_1000);
        assert_eq!(*uart.layout(), NS16550);
    }

    #[test]
    fn test_for_platform_without_uart() {
        let platform = crate::platform::spike::PLATFORM;
        assert!(unsafe { PolledUart::for_platform(&platform) }.is_none());

        let mut layout_only = crate::platform::zynqmp::PLATFORM;
        layout_only.map.uart = None;
        assert!(unsafe { PolledUart::for_platform(&layout_only) }.is_none());
    }
}
