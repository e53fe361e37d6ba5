/// A primitive that parks the hart until something external happens.
pub trait Halt {
    fn wait(&self);
}

/// The running hart, parked with `wfi`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Hart;

impl Halt for Hart {
    #[inline(always)]
    fn wait(&self) {
        #[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
        {
            // SAFETY: `wfi` only stalls the hart; it touches no memory or registers.
            unsafe { core::arch::asm!("wfi", options(nomem, nostack, preserves_flags)) };
        }
        #[cfg(not(any(target_arch = "riscv32", target_arch = "riscv64")))]
        {
            core::hint::spin_loop();
        }
    }
}

/// Stop the program for good. `status` has nowhere to go and is dropped.
pub fn terminate<H: Halt>(halt: &H, status: i32) -> ! {
    log::debug!("terminate: status {status}, halting");
    loop {
        halt.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::sync::atomic::{AtomicBool, Ordering};
    use std::panic::{AssertUnwindSafe, catch_unwind};

    /// Bails out of the halt loop by panicking after `limit` waits.
    struct Tripwire {
        waits: Cell<usize>,
        limit: usize,
    }

    impl Halt for Tripwire {
        fn wait(&self) {
            self.waits.set(self.waits.get() + 1);
            if self.waits.get() == self.limit {
                panic!("still halted");
            }
        }
    }

    #[test]
    fn terminate_never_returns() {
        for status in [0, 1, -1, 101, i32::MAX, i32::MIN] {
            let reached = AtomicBool::new(false);
            let halt = Tripwire {
                waits: Cell::new(0),
                limit: 1000,
            };
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                terminate(&halt, status);
                #[allow(unreachable_code)]
                reached.store(true, Ordering::SeqCst);
            }));
            assert!(outcome.is_err());
            assert_eq!(halt.waits.get(), 1000);
            assert!(!reached.load(Ordering::SeqCst));
        }
    }

    #[cfg(not(any(target_arch = "riscv32", target_arch = "riscv64")))]
    #[test]
    fn hart_wait_returns_on_host() {
        Hart.wait();
    }
}
