use core::fmt::{Display, Write};
use core::panic::Location;

use crate::console::{Console, Stream};
use crate::device::DevicePort;

const HEADER: &[u8] = b"\n=== zisk-sys: guest panicked ===\n";

/// Exit status handed to `terminate` after a panic.
pub const PANIC_STATUS: i32 = 101;

/// Print a panic diagnostic on the console's stderr stream.
///
/// Formatting goes straight to the port; nothing is allocated, so this is
/// safe to call with the heap in any state.
pub fn report<P: DevicePort>(
    console: &Console<P>,
    message: &dyn Display,
    location: Option<&Location<'_>>,
) {
    let mut err = console.stream(Stream::Stderr);
    err.write_bytes(HEADER);
    let _ = write!(err, "  message: {message}");
    if let Some(loc) = location {
        let _ = write!(err, "\n  at:      {}:{}:{}", loc.file(), loc.line(), loc.column());
    }
    err.write_bytes(b"\nhalting.\n\n");
}
