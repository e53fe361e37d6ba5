//! The parts of the POSIX surface newlib links against but the zkVM does not
//! have. Every answer here is a constant; nothing is tracked between calls.

use core::ffi::{c_int, c_long};

use crate::errno::{Errno, SysError, SysResult};

/// `S_IFCHR` from newlib's `<sys/stat.h>`.
pub const S_IFCHR: u32 = 0o020000;

/// `WEOF` for newlib's 32-bit `wint_t`.
pub const WEOF: u32 = 0xffff_ffff;

/// The one process identity there is.
pub const PID: c_int = 1;

/// What `fstat` knows about a descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileStat {
    pub mode: u32,
}

/// An environment with no files, no processes and no signals.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullEnv;

impl NullEnv {
    /// Nothing is ever open, so nothing can be closed.
    pub fn close(&self, _fd: c_int) -> SysResult<()> {
        Err(SysError::Opaque)
    }

    /// Every descriptor looks like a character device so newlib picks
    /// line-buffered stdio.
    pub fn fstat(&self, _fd: c_int) -> SysResult<FileStat> {
        Ok(FileStat { mode: S_IFCHR })
    }

    pub fn isatty(&self, _fd: c_int) -> bool {
        true
    }

    pub fn lseek(&self, _fd: c_int, _offset: c_long, _whence: c_int) -> SysResult<c_long> {
        Ok(0)
    }

    /// There is no input stream; every read is at end of file.
    pub fn read(&self, _fd: c_int, _buf: &mut [u8]) -> SysResult<usize> {
        Ok(0)
    }

    pub fn kill(&self, _pid: c_int, _sig: c_int) -> SysResult<()> {
        Err(Errno::EINVAL.into())
    }

    pub fn getpid(&self) -> c_int {
        PID
    }

    /// Wide-character output is not supported; the character is dropped.
    pub fn fputwc(&self, _wc: i32) -> u32 {
        WEOF
    }
}
