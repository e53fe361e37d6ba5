//! Zisk memory map and output configuration.
//!
//! The guest sees a flat physical address space:
//!
//! | Region | Address       | Notes                                   |
//! |--------|---------------|-----------------------------------------|
//! | ROM    | `0x8000_0000` | program text and read-only data         |
//! | INPUT  | `0x9000_0000` | prover-supplied input, read-only        |
//! | RAM    | `0xa000_0000` | starts with the system area (`SYS_ADDR`)|
//!
//! The system area hosts the UART register at `SYS_ADDR + 0x200`. Every
//! single-byte store to it is consumed by the emulator as one character on
//! the guest's standard output. Reads from it are undefined.

/// Base of the system area at the bottom of RAM.
pub const SYS_ADDR: usize = 0xa000_0000;

/// Offset of the UART register inside the system area.
pub const UART_OFFSET: usize = 0x200;

/// The memory-mapped character output register.
pub const UART_ADDR: usize = SYS_ADDR + UART_OFFSET;

/// How `_write` treats the output channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputMode {
    /// Each byte is stored to the UART register.
    Uart,
    /// Nothing is emitted; every write reports full success.
    Inert,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShimConfig {
    pub uart_addr: usize,
    pub output: OutputMode,
}

impl ShimConfig {
    /// Resolve the configuration selected by the crate's cargo features.
    pub const fn from_features() -> Self {
        Self {
            uart_addr: UART_ADDR,
            output: if cfg!(feature = "uart") {
                OutputMode::Uart
            } else {
                OutputMode::Inert
            },
        }
    }
}

pub const CONFIG: ShimConfig = ShimConfig::from_features();
