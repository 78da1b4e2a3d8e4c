//! Debug output and logging
//!
//! `kprint!`/`kprintln!` format straight onto the debug console. The
//! console itself does not lock, so the writer sits behind a spinlock and a
//! whole formatted line goes out before another core's line starts.
//!
//! `kprint!` is not interrupt-safe. The lock is a plain spinlock that does
//! not mask interrupts, so a handler that prints while its own core holds
//! the lock spins forever. Mask interrupts around printing, or do not print
//! from handlers.
//!
//! [`init_logging`] installs a `log` backend on top of the same writer. The
//! maximum level comes from the `log-*` cargo features.

use core::fmt;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use spin::Mutex;

use crate::components::console::ConsoleWriter;
use crate::config::{KernelConsole, CONSOLE};
use crate::platform;

static WRITER: Mutex<ConsoleWriter<'static, KernelConsole>> = Mutex::new(ConsoleWriter::new(&CONSOLE));

#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    use core::fmt::Write;
    let _ = WRITER.lock().write_fmt(args);
}

/// Print macro for kernel
#[macro_export]
macro_rules! kprint {
    ($($arg:tt)*) => ($crate::debug::_print(format_args!($($arg)*)));
}

/// Print with newline macro for kernel
#[macro_export]
macro_rules! kprintln {
    () => ($crate::kprint!("\n"));
    ($($arg:tt)*) => ($crate::kprint!("{}\n", format_args!($($arg)*)));
}

/// Most verbose level enabled by the `log-*` features (info if none)
pub const fn max_level() -> LevelFilter {
    if cfg!(feature = "log-trace") {
        LevelFilter::Trace
    } else if cfg!(feature = "log-debug") {
        LevelFilter::Debug
    } else if cfg!(feature = "log-info") {
        LevelFilter::Info
    } else if cfg!(feature = "log-warn") {
        LevelFilter::Warn
    } else if cfg!(feature = "log-error") {
        LevelFilter::Error
    } else {
        LevelFilter::Info
    }
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERR",
        Level::Warn => "WRN",
        Level::Info => "INF",
        Level::Debug => "DBG",
        Level::Trace => "TRC",
    }
}

struct KernelLogger;

impl Log for KernelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        crate::kprintln!("[{}] {}", level_tag(record.level()), record.args());
    }

    fn flush(&self) {}
}

static LOGGER: KernelLogger = KernelLogger;

/// Route `log` records to the debug console
///
/// Call once, after the device mapping is up. Fails if another logger was
/// already installed.
pub fn init_logging() -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(max_level());
    log::info!(
        "platform {}: {} console at {:#x}",
        platform::ACTIVE.name,
        CONSOLE.layout().name,
        CONSOLE.bus().base()
    );
    Ok(())
}
