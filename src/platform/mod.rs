//! Symbols shared with newlib and the linker script.
//!
//! On the bare-metal target `errno` and `__heap_start` come from newlib and
//! the linker script. Host builds have neither, so a private cell and a
//! private byte stand in for them.

pub mod syscall;

use core::ffi::c_int;

use crate::errno::Errno;

#[cfg(target_os = "none")]
unsafe extern "C" {
    #[allow(non_upper_case_globals)]
    static mut errno: c_int;

    /// First free byte after `.bss`, placed by the linker script.
    static __heap_start: u8;

    #[cfg(feature = "rust-alloc")]
    pub fn malloc(size: usize) -> *mut u8;
    #[cfg(feature = "rust-alloc")]
    pub fn memalign(align: usize, size: usize) -> *mut u8;
    #[cfg(feature = "rust-alloc")]
    pub fn realloc(ptr: *mut u8, size: usize) -> *mut u8;
    #[cfg(feature = "rust-alloc")]
    pub fn free(ptr: *mut u8);
}

#[cfg(not(target_os = "none"))]
static ERRNO: core::sync::atomic::AtomicI32 = core::sync::atomic::AtomicI32::new(0);

#[cfg(not(target_os = "none"))]
static HEAP_START: u8 = 0;

#[cfg(target_os = "none")]
pub fn set_errno(code: Errno) {
    // SAFETY: single hart; newlib only reads errno after a failed call returns.
    unsafe { (&raw mut errno).write(code.code()) };
}

#[cfg(not(target_os = "none"))]
pub fn set_errno(code: Errno) {
    ERRNO.store(code.code(), core::sync::atomic::Ordering::Relaxed);
}

/// The current value of `errno`.
#[cfg(target_os = "none")]
pub fn last_errno() -> c_int {
    // SAFETY: plain load of newlib's errno on a single hart.
    unsafe { (&raw const errno).read() }
}

#[cfg(not(target_os = "none"))]
pub fn last_errno() -> c_int {
    ERRNO.load(core::sync::atomic::Ordering::Relaxed)
}

#[cfg(test)]
pub(crate) fn clear_errno() {
    ERRNO.store(0, core::sync::atomic::Ordering::Relaxed);
}

#[cfg(target_os = "none")]
pub fn heap_start() -> usize {
    #[allow(unused_unsafe)]
    // SAFETY: only the symbol's address is taken; it is never read.
    let start = unsafe { &raw const __heap_start };
    start as usize
}

#[cfg(not(target_os = "none"))]
pub fn heap_start() -> usize {
    (&raw const HEAP_START) as usize
}
