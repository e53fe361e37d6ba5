use crate::config::{OutputMode, ShimConfig};

/// A write-only character sink.
pub trait DevicePort {
    fn emit(&self, byte: u8);

    /// Whether stores reach a real device. An unwired port swallows every
    /// byte and the console stops gating descriptors for it.
    fn is_wired(&self) -> bool {
        true
    }
}

/// A memory-mapped output register: each byte store is one character.
#[derive(Clone, Copy, Debug)]
pub struct MmioPort {
    addr: usize,
}

impl MmioPort {
    /// # Safety
    /// `addr` must be a byte-wide device register for which stores have no
    /// effect on program memory.
    pub const unsafe fn new(addr: usize) -> Self {
        Self { addr }
    }
}

impl DevicePort for MmioPort {
    #[inline(always)]
    fn emit(&self, byte: u8) {
        // SAFETY: the constructor's contract makes `addr` a store-only
        // device register.
        unsafe { core::ptr::write_volatile(self.addr as *mut u8, byte) };
    }
}

/// Output that is not wired to anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct InertPort;

impl DevicePort for InertPort {
    #[inline(always)]
    fn emit(&self, _byte: u8) {}

    fn is_wired(&self) -> bool {
        false
    }
}

/// The port selected by [`ShimConfig::output`].
#[derive(Clone, Copy, Debug)]
pub enum Port {
    Uart(MmioPort),
    Inert(InertPort),
}

impl Port {
    /// # Safety
    /// When `config.output` is [`OutputMode::Uart`], `config.uart_addr` must
    /// satisfy the contract of [`MmioPort::new`].
    pub const unsafe fn from_config(config: &ShimConfig) -> Self {
        match config.output {
            // SAFETY: forwarded to the caller.
            OutputMode::Uart => Port::Uart(unsafe { MmioPort::new(config.uart_addr) }),
            OutputMode::Inert => Port::Inert(InertPort),
        }
    }
}

impl DevicePort for Port {
    #[inline(always)]
    fn emit(&self, byte: u8) {
        match self {
            Port::Uart(uart) => uart.emit(byte),
            Port::Inert(inert) => inert.emit(byte),
        }
    }

    fn is_wired(&self) -> bool {
        match self {
            Port::Uart(uart) => uart.is_wired(),
            Port::Inert(inert) => inert.is_wired(),
        }
    }
}
