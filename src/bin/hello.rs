//! Greets on stdout and walks a labeled object through its lifetime.
//!
//! Built for the bare-metal target and linked against newlib's crt0, which
//! calls `main` and hands its return value to `_exit`. Every line is
//! formatted into a heap `String` (newlib `malloc`, fed by `_sbrk`) and
//! printed with `_write`.

#![no_std]
#![no_main]

extern crate alloc;

use alloc::format;
use alloc::string::String;
use core::ffi::c_int;

use zisk_sys::Stream;
use zisk_sys::platform::last_errno;
use zisk_sys::platform::syscall::_write;

fn print(fd: c_int, line: &str) -> c_int {
    // SAFETY: `line` is a live buffer of exactly `line.len()` bytes.
    unsafe { _write(fd, line.as_ptr().cast(), line.len() as c_int) }
}

fn println(line: String) {
    print(Stream::Stdout.fileno(), &format!("{line}\n"));
}

struct Greeter {
    name: &'static str,
}

impl Greeter {
    fn new(name: &'static str) -> Self {
        println(format!("{name} constructed"));
        Self { name }
    }

    fn greet(&self) {
        println(format!("Hello from {}!", self.name));
    }
}

impl Drop for Greeter {
    fn drop(&mut self) {
        println(format!("{} dropped", self.name));
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn main() -> c_int {
    let greeter = Greeter::new("Greeter");
    println(String::from("Hello, World from bare metal RISC-V!"));
    println(String::from("This is a Rust application on the zisk-sys newlib shim"));
    greeter.greet();

    if print(5, "lost\n") < 0 {
        println(format!("descriptor 5 rejected, errno {}", last_errno()));
    }
    0
}
