//! Debug console seam
//!
//! [`Console`] is what the diagnostic output path is written against; the
//! polled UART in [`uart`] is its only implementation. The trait and
//! [`ConsoleWriter`] exist only with the `printing` or `debug-build`
//! feature, so a build without diagnostics cannot name them.

#[cfg(any(feature = "printing", feature = "debug-build"))]
use core::fmt;

/// Byte sink for kernel debug output
///
/// Implementations do not lock. Callers sharing a console between cores or
/// with an interrupt handler must serialise access themselves (the `debug`
/// module does this for `kprint!`).
#[cfg(any(feature = "printing", feature = "debug-build"))]
pub trait Console: Send + Sync {
    /// Emit one byte, blocking until the device takes it
    fn putc(&self, c: u8);

    /// Emit `s` as terminal text: every `\n` goes out as `\r\n`
    fn puts(&self, s: &str) {
        for line in s.split_inclusive('\n') {
            let (text, newline) = match line.strip_suffix('\n') {
                Some(text) => (text, true),
                None => (line, false),
            };
            text.bytes().for_each(|b| self.putc(b));
            if newline {
                self.putc(b'\r');
                self.putc(b'\n');
            }
        }
    }
}

/// `fmt::Write` adapter over a borrowed console
///
/// Never fails: the console blocks instead of reporting errors.
#[cfg(any(feature = "printing", feature = "debug-build"))]
pub struct ConsoleWriter<'a, C: Console + ?Sized> {
    console: &'a C,
}

#[cfg(any(feature = "printing", feature = "debug-build"))]
impl<'a, C: Console + ?Sized> ConsoleWriter<'a, C> {
    pub const fn new(console: &'a C) -> Self {
        Self { console }
    }
}

#[cfg(any(feature = "printing", feature = "debug-build"))]
impl<C: Console + ?Sized> fmt::Write for ConsoleWriter<'_, C> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.console.puts(s);
        Ok(())
    }
}

pub mod uart;
