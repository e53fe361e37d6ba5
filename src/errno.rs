use core::ffi::c_int;
use core::fmt;

/// The `errno` values the shim can report, numbered as in newlib's
/// `<sys/errno.h>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum Errno {
    /// Bad file descriptor.
    EBADF = 9,
    /// Invalid argument.
    EINVAL = 22,
}

impl Errno {
    pub const fn code(self) -> c_int {
        self as c_int
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Errno::EBADF => "bad file descriptor",
            Errno::EINVAL => "invalid argument",
        };
        write!(f, "{msg} (errno {})", self.code())
    }
}

/// Failure of a shim operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SysError {
    /// Reported through the return value only; `errno` is left untouched.
    Opaque,
    /// Reported through the return value and `errno`.
    Errno(Errno),
}

impl From<Errno> for SysError {
    fn from(errno: Errno) -> Self {
        SysError::Errno(errno)
    }
}

impl fmt::Display for SysError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SysError::Opaque => f.write_str("operation not supported"),
            SysError::Errno(errno) => errno.fmt(f),
        }
    }
}

pub type SysResult<T> = Result<T, SysError>;

/// Flatten a shim result into the C return convention.
///
/// Success yields the value itself. Failure yields -1, and `set_errno` is
/// invoked only when the error carries a code.
pub fn c_return<T>(result: SysResult<T>, set_errno: impl FnOnce(Errno)) -> T
where
    T: From<i8>,
{
    match result {
        Ok(value) => value,
        Err(SysError::Opaque) => T::from(-1),
        Err(SysError::Errno(errno)) => {
            set_errno(errno);
            T::from(-1)
        }
    }
}
