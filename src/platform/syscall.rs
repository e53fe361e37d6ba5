//! The newlib system call layer.
//!
//! newlib's stdio and malloc call these by name. Each export converts the C
//! arguments, asks the shim for an answer, and reports failure as -1 with
//! `errno` set where the operation defines one. The symbols are only
//! exported on the bare-metal target so host builds keep the host libc's.

use core::ffi::{c_char, c_int, c_long, c_void};

use spin::Mutex;

use super::{heap_start, set_errno};
use crate::arch::{Hart, terminate};
use crate::console::{Console, STDIO};
use crate::device::DevicePort;
use crate::env::NullEnv;
use crate::errno::c_return;
use crate::heap::HeapCursor;

static HEAP: Mutex<HeapCursor> = Mutex::new(HeapCursor::new(heap_start));

/// Leading fields of newlib's `struct stat`. Only `st_mode` is written; the
/// remainder of the caller's struct is left as it was.
#[repr(C)]
pub struct Stat {
    pub st_dev: i16,
    pub st_ino: u16,
    pub st_mode: u32,
}

#[cfg_attr(target_os = "none", unsafe(no_mangle))]
pub extern "C" fn _sbrk(incr: isize) -> *mut c_void {
    let prev = HEAP.lock().grow(incr);
    core::ptr::with_exposed_provenance_mut(prev)
}

/// A non-positive `len` on stdout or stderr emits nothing and is returned
/// as is, without touching `errno`.
///
/// # Safety
/// `ptr` must be valid for reads of `len` bytes when `len` is positive.
#[cfg_attr(target_os = "none", unsafe(no_mangle))]
pub unsafe extern "C" fn _write(file: c_int, ptr: *const c_char, len: c_int) -> c_int {
    // SAFETY: forwarded to the caller.
    unsafe { write_to(&STDIO, file, ptr, len) }
}

/// # Safety
/// Same contract as [`_write`].
unsafe fn write_to<P: DevicePort>(
    console: &Console<P>,
    file: c_int,
    ptr: *const c_char,
    len: c_int,
) -> c_int {
    let bytes: &[u8] = if len > 0 && !ptr.is_null() {
        // SAFETY: guaranteed by the caller.
        unsafe { core::slice::from_raw_parts(ptr.cast::<u8>(), len as usize) }
    } else {
        &[]
    };
    c_return(console.write(file, bytes).map(|_| len), set_errno)
}

#[cfg_attr(target_os = "none", unsafe(no_mangle))]
pub extern "C" fn _close(file: c_int) -> c_int {
    c_return(NullEnv.close(file).map(|()| 0), set_errno)
}

/// # Safety
/// `st` must be null or point to a writable newlib `struct stat`.
#[cfg_attr(target_os = "none", unsafe(no_mangle))]
pub unsafe extern "C" fn _fstat(file: c_int, st: *mut Stat) -> c_int {
    let result = NullEnv.fstat(file).map(|stat| {
        if !st.is_null() {
            // SAFETY: guaranteed by the caller; only the mode field is touched.
            unsafe { (&raw mut (*st).st_mode).write(stat.mode) };
        }
        0
    });
    c_return(result, set_errno)
}

#[cfg_attr(target_os = "none", unsafe(no_mangle))]
pub extern "C" fn _isatty(file: c_int) -> c_int {
    NullEnv.isatty(file) as c_int
}

#[cfg_attr(target_os = "none", unsafe(no_mangle))]
pub extern "C" fn _lseek(file: c_int, ptr: c_long, dir: c_int) -> c_long {
    c_return(NullEnv.lseek(file, ptr, dir), set_errno)
}

/// # Safety
/// `ptr` must be valid for writes of `len` bytes when `len` is positive.
#[cfg_attr(target_os = "none", unsafe(no_mangle))]
pub unsafe extern "C" fn _read(file: c_int, ptr: *mut c_char, len: c_int) -> c_int {
    let buf: &mut [u8] = if len > 0 && !ptr.is_null() {
        // SAFETY: guaranteed by the caller.
        unsafe { core::slice::from_raw_parts_mut(ptr.cast::<u8>(), len as usize) }
    } else {
        &mut []
    };
    c_return(NullEnv.read(file, buf).map(|n| n as c_int), set_errno)
}

#[cfg_attr(target_os = "none", unsafe(no_mangle))]
pub extern "C" fn _exit(status: c_int) -> ! {
    terminate(&Hart, status)
}

#[cfg_attr(target_os = "none", unsafe(no_mangle))]
pub extern "C" fn _kill(pid: c_int, sig: c_int) -> c_int {
    c_return(NullEnv.kill(pid, sig).map(|()| 0), set_errno)
}

#[cfg_attr(target_os = "none", unsafe(no_mangle))]
pub extern "C" fn _getpid() -> c_int {
    NullEnv.getpid()
}

/// newlib-nano pulls this in from `printf`'s wide-character path.
#[cfg_attr(target_os = "none", unsafe(no_mangle))]
pub extern "C" fn _fputwc_r(_reent: *mut c_void, wc: i32, _fp: *mut c_void) -> u32 {
    NullEnv.fputwc(wc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::testing::RecordingPort;
    use crate::env::{S_IFCHR, WEOF};
    use crate::errno::Errno;
    use crate::platform::{clear_errno, last_errno};

    /// `errno` and the heap break are process-wide; tests touching them
    /// take turns.
    static SERIAL: Mutex<()> = Mutex::new(());

    #[test]
    fn write_to_bad_descriptor_sets_ebadf() {
        let _guard = SERIAL.lock();
        let console = Console::new(RecordingPort::new());
        clear_errno();
        let ret = unsafe { write_to(&console, 5, c"x".as_ptr(), 1) };
        assert_eq!(ret, -1);
        assert_eq!(last_errno(), Errno::EBADF.code());
        assert!(console.port().take().is_empty());
    }

    #[test]
    fn write_to_stderr_emits_and_keeps_errno() {
        let _guard = SERIAL.lock();
        let console = Console::new(RecordingPort::new());
        clear_errno();
        let ret = unsafe { write_to(&console, 2, c"hi".as_ptr(), 2) };
        assert_eq!(ret, 2);
        assert_eq!(last_errno(), 0);
        assert_eq!(console.port().take(), b"hi");
    }

    #[test]
    fn write_to_with_empty_or_missing_buffer_emits_nothing() {
        let _guard = SERIAL.lock();
        let console = Console::new(RecordingPort::new());
        clear_errno();
        assert_eq!(unsafe { write_to(&console, 1, c"abc".as_ptr(), 0) }, 0);
        assert_eq!(unsafe { write_to(&console, 1, core::ptr::null(), 3) }, 3);
        assert_eq!(unsafe { write_to(&console, 1, c"abc".as_ptr(), -4) }, -4);
        assert_eq!(last_errno(), 0);
        assert!(console.port().take().is_empty());
    }

    #[test]
    fn formatted_line_goes_out_through_write() {
        let _guard = SERIAL.lock();
        let console = Console::new(RecordingPort::new());
        let line = std::format!("{} constructed\n", "Greeter");
        let ret = unsafe { write_to(&console, 1, line.as_ptr().cast(), line.len() as c_int) };
        assert_eq!(ret, line.len() as c_int);
        assert_eq!(console.port().take(), line.as_bytes());
    }

    #[test]
    fn exported_write_gates_descriptors() {
        let _guard = SERIAL.lock();
        clear_errno();
        let ret = unsafe { _write(5, c"x".as_ptr(), 1) };
        if STDIO.port().is_wired() {
            assert_eq!(ret, -1);
            assert_eq!(last_errno(), Errno::EBADF.code());
        } else {
            assert_eq!(ret, 1);
            assert_eq!(last_errno(), 0);
        }

        clear_errno();
        assert_eq!(unsafe { _write(1, c"x".as_ptr(), 0) }, 0);
        assert_eq!(unsafe { _write(1, core::ptr::null(), 3) }, 3);
        assert_eq!(last_errno(), 0);
    }

    #[test]
    fn sbrk_starts_at_heap_start() {
        let _guard = SERIAL.lock();
        let base = heap_start();
        assert_eq!(_sbrk(0) as usize, base);
        assert_eq!(_sbrk(16) as usize, base);
        assert_eq!(_sbrk(32) as usize, base + 16);
        assert_eq!(_sbrk(-48) as usize, base + 48);
        assert_eq!(_sbrk(0) as usize, base);
    }

    #[test]
    fn fstat_writes_only_the_mode() {
        let _guard = SERIAL.lock();
        clear_errno();
        let mut st = Stat {
            st_dev: 0x1234,
            st_ino: 0x5678,
            st_mode: 0,
        };
        assert_eq!(unsafe { _fstat(1, &mut st) }, 0);
        assert_eq!(st.st_mode, S_IFCHR);
        assert_eq!((st.st_dev, st.st_ino), (0x1234, 0x5678));
        assert_eq!(core::mem::offset_of!(Stat, st_mode), 4);
        assert_eq!(unsafe { _fstat(-1, core::ptr::null_mut()) }, 0);
        assert_eq!(last_errno(), 0);
    }

    #[test]
    fn kill_sets_einval() {
        let _guard = SERIAL.lock();
        clear_errno();
        assert_eq!(_kill(1, 9), -1);
        assert_eq!(last_errno(), Errno::EINVAL.code());
    }

    #[test]
    fn close_fails_without_errno() {
        let _guard = SERIAL.lock();
        clear_errno();
        assert_eq!(_close(1), -1);
        assert_eq!(last_errno(), 0);
    }

    #[test]
    fn constant_answers() {
        let _guard = SERIAL.lock();
        clear_errno();
        let mut buf = [0x55 as c_char; 8];
        assert_eq!(unsafe { _read(0, buf.as_mut_ptr(), 8) }, 0);
        assert!(buf.iter().all(|&b| b == 0x55));
        assert_eq!(unsafe { _read(0, core::ptr::null_mut(), 8) }, 0);
        assert_eq!(_lseek(3, 100, 0), 0);
        assert_eq!(_isatty(7), 1);
        assert_eq!(_getpid(), 1);
        assert_eq!(
            _fputwc_r(core::ptr::null_mut(), 'x' as i32, core::ptr::null_mut()),
            WEOF
        );
        assert_eq!(last_errno(), 0);
    }
}
