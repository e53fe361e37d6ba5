use core::fmt::Write;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::console::{Console, STDIO, Stream};
use crate::device::{DevicePort, Port};

/// A `log` backend that prints one `[LEVEL target] message` line per record
/// on the console's stderr stream.
///
/// Records go straight to the device port, so logging from inside the
/// allocator or the write path never recurses into newlib.
///
/// The logger's own `level` is a ceiling on top of `log::max_level()`.
pub struct ConsoleLogger<P: 'static> {
    console: &'static Console<P>,
    level: LevelFilter,
}

impl<P: DevicePort> ConsoleLogger<P> {
    pub const fn new(console: &'static Console<P>, level: LevelFilter) -> Self {
        Self { console, level }
    }
}

impl<P: DevicePort + Sync + Send> Log for ConsoleLogger<P> {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut err = self.console.stream(Stream::Stderr);
        let _ = writeln!(
            err,
            "[{:<5} {}] {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger<Port> = ConsoleLogger::new(&STDIO, LevelFilter::Trace);

/// Route `log` records to the global console at `level` and below.
///
/// Until this is called every `log` macro in the shim is a no-op, so program
/// output stays exactly what the guest wrote.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
