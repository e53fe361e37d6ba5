//! Standard output and standard error over a single device port.
//!
//! Both streams share the one output register; bytes reach it in call order
//! with no buffering, so a `write` is never partial.

use core::ffi::c_int;
use core::fmt;

use crate::config::CONFIG;
use crate::device::{DevicePort, Port};
use crate::errno::{Errno, SysResult};

pub const STDOUT_FILENO: c_int = 1;
pub const STDERR_FILENO: c_int = 2;

/// The descriptors `write` accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    pub const fn fileno(self) -> c_int {
        match self {
            Stream::Stdout => STDOUT_FILENO,
            Stream::Stderr => STDERR_FILENO,
        }
    }
}

impl TryFrom<c_int> for Stream {
    type Error = Errno;

    fn try_from(fd: c_int) -> Result<Self, Errno> {
        match fd {
            STDOUT_FILENO => Ok(Stream::Stdout),
            STDERR_FILENO => Ok(Stream::Stderr),
            _ => Err(Errno::EBADF),
        }
    }
}

pub struct Console<P> {
    port: P,
}

impl<P: DevicePort> Console<P> {
    pub const fn new(port: P) -> Self {
        Self { port }
    }

    /// Emit `bytes` on descriptor `fd`, returning how many were written.
    ///
    /// On a wired port only stdout and stderr are accepted; anything else
    /// fails with `EBADF` before a single byte is stored. An unwired port
    /// reports the full length for every descriptor.
    pub fn write(&self, fd: c_int, bytes: &[u8]) -> SysResult<usize> {
        if !self.port.is_wired() {
            return Ok(bytes.len());
        }
        let stream = Stream::try_from(fd).inspect_err(|_| {
            log::debug!("write: rejecting descriptor {fd}");
        })?;
        log::trace!("write: {} bytes on {stream:?}", bytes.len());
        self.emit_all(bytes);
        Ok(bytes.len())
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    /// A `core::fmt::Write` handle on one of the standard streams.
    ///
    /// Both streams land on the same register, so `stream` only documents
    /// intent at the call site.
    pub fn stream(&self, _stream: Stream) -> StreamWriter<'_, P> {
        StreamWriter { console: self }
    }

    fn emit_all(&self, bytes: &[u8]) {
        for &byte in bytes {
            self.port.emit(byte);
        }
    }
}

pub struct StreamWriter<'a, P> {
    console: &'a Console<P>,
}

impl<P: DevicePort> StreamWriter<'_, P> {
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.console.emit_all(bytes);
    }
}

impl<P: DevicePort> fmt::Write for StreamWriter<'_, P> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}

/// The process-wide console, built once from [`CONFIG`].
// SAFETY: CONFIG.uart_addr is the Zisk UART register.
pub static STDIO: Console<Port> = Console::new(unsafe { Port::from_config(&CONFIG) });
