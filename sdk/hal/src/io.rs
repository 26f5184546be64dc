//! # Register Access
//!
//! All cores are reached through 32-bit words at `base + 4 * offset`.
//! Every access is a side effect the hardware depends on (a `RAM_DATA` write
//! pulses write-enable, a timer `CTRL` write can clear the counter), so reads
//! and writes are volatile and never merged or reordered.

use volatile_register::RW;

/// Word-level access to a peripheral slot.
///
/// Implemented by [`Mmio`] for the real bridge. Test doubles implement it to
/// record accesses and model register behavior.
pub trait IoBus {
    /// Read the word at `base + 4 * offset`.
    fn read(&mut self, base: usize, offset: usize) -> u32;

    /// Write `data` to the word at `base + 4 * offset`.
    fn write(&mut self, base: usize, offset: usize, data: u32);
}

/// The MMIO bridge of the running system.
///
/// Zero-sized; copies all talk to the same hardware.
#[derive(Clone, Copy, Debug)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// # Safety
    /// Only valid on the target, where the bridge decodes the addresses
    /// passed to [`IoBus::read`] and [`IoBus::write`]. Callers must only pass
    /// base addresses of cores that exist.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

/// # Safety
/// `base + 4 * offset` must be a mapped, word-aligned register.
#[inline(always)]
unsafe fn register(base: usize, offset: usize) -> &'static RW<u32> {
    unsafe { &*((base + 4 * offset) as *const RW<u32>) }
}

impl IoBus for Mmio {
    #[inline(always)]
    fn read(&mut self, base: usize, offset: usize) -> u32 {
        unsafe { register(base, offset) }.read()
    }

    #[inline(always)]
    fn write(&mut self, base: usize, offset: usize, data: u32) {
        unsafe { register(base, offset).write(data) }
    }
}
