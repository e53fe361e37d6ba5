//! newlib system calls for bare-metal Zisk zkVM guests.
//!
//! Link the static library into a C or C++ program built against newlib and
//! the stubs below satisfy every OS hook newlib needs: `_sbrk` grows the heap
//! from `__heap_start`, `_write` stores stdout/stderr bytes to the UART
//! register, and the rest of the POSIX surface answers with fixed values.
//! `_exit` parks the hart forever.
//!
//! On hosts the same pieces are plain Rust types ([`heap::HeapCursor`],
//! [`console::Console`], [`env::NullEnv`]) and the `platform::syscall`
//! functions are callable from Rust without being exported as C symbols.

#![cfg_attr(target_os = "none", no_std)]

pub mod arch;
pub mod config;
pub mod console;
pub mod device;
pub mod env;
pub mod errno;
pub mod fault;
pub mod heap;
pub mod logger;
pub mod platform;

pub use config::{CONFIG, OutputMode, ShimConfig};
pub use console::{Console, STDIO, Stream};
pub use errno::{Errno, SysError, SysResult};

#[cfg(all(feature = "rust-alloc", target_os = "none"))]
mod rust_alloc {
    use core::alloc::{GlobalAlloc, Layout};

    use crate::platform;

    /// newlib's `malloc` never returns less aligned memory than this.
    const MIN_ALIGN: usize = 16;

    /// Hands Rust allocations to newlib so both languages share the heap
    /// behind `_sbrk`.
    struct NewlibAllocator;

    unsafe impl GlobalAlloc for NewlibAllocator {
        unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
            if layout.align() <= MIN_ALIGN {
                // SAFETY: malloc is provided by newlib.
                unsafe { platform::malloc(layout.size()) }
            } else {
                // SAFETY: Layout guarantees a power-of-two alignment.
                unsafe { platform::memalign(layout.align(), layout.size()) }
            }
        }

        unsafe fn dealloc(&self, ptr: *mut u8, _layout: Layout) {
            // SAFETY: ptr came from malloc or memalign above.
            unsafe { platform::free(ptr) }
        }

        unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
            if layout.align() <= MIN_ALIGN {
                // SAFETY: ptr was allocated by malloc, new_size is non-zero.
                return unsafe { platform::realloc(ptr, new_size) };
            }
            // SAFETY: same alignment as the old block, which Layout validated.
            let new_layout = unsafe { Layout::from_size_align_unchecked(new_size, layout.align()) };
            let new_ptr = unsafe { self.alloc(new_layout) };
            if !new_ptr.is_null() {
                // SAFETY: both blocks are live and distinct.
                unsafe {
                    core::ptr::copy_nonoverlapping(ptr, new_ptr, layout.size().min(new_size));
                    self.dealloc(ptr, layout);
                }
            }
            new_ptr
        }
    }

    #[global_allocator]
    static ALLOCATOR: NewlibAllocator = NewlibAllocator;
}

#[cfg(all(target_os = "none", not(test)))]
#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    fault::report(&STDIO, &info.message(), info.location());
    arch::terminate(&arch::Hart, fault::PANIC_STATUS)
}
