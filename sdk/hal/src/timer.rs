//! # System Timer
//!
//! A 48-bit counter clocked at [`SYS_CLK_FREQ`] MHz (slot 0). It provides
//! the board's notion of time and the busy-wait delays used by the
//! bring-up routines.
//!
//! | Offset | Name            | Access | Notes                              |
//! |--------|-----------------|--------|------------------------------------|
//! | 0      | `COUNTER_LOWER` | R      | counter bits 31..0                 |
//! | 1      | `COUNTER_UPPER` | R      | counter bits 47..32                |
//! | 2      | `CTRL`          | W      | bit 0 go, bit 1 clear (pulse)      |

use crate::io::IoBus;
use crate::io_map::SYS_CLK_FREQ;

pub const COUNTER_LOWER_REG: usize = 0;
pub const COUNTER_UPPER_REG: usize = 1;
pub const CTRL_REG: usize = 2;

bitflags::bitflags! {
    /// Bits of the timer `CTRL` register.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct TimerCtrl: u32 {
        /// Count while set.
        const GO  = 0b01;
        /// Clear the counter. Only ever written as a one-off pulse.
        const CLR = 0b10;
    }
}

/// Blocking delays.
pub trait Delay {
    fn delay_us(&mut self, us: u64);

    fn delay_ms(&mut self, ms: u64) {
        self.delay_us(ms.saturating_mul(1000));
    }
}

pub struct TimerCore<B: IoBus> {
    bus: B,
    base: usize,
    /// Shadow of the write-only `CTRL` register, never holding `CLR`.
    ctrl: TimerCtrl,
}

impl<B: IoBus> TimerCore<B> {
    /// Bind to the timer at `base`, clear it and start counting.
    pub fn new(bus: B, base: usize) -> Self {
        let mut timer = Self {
            bus,
            base,
            ctrl: TimerCtrl::GO,
        };
        timer.clear();
        timer.write_ctrl(timer.ctrl);
        timer
    }

    #[inline(always)]
    fn write_ctrl(&mut self, ctrl: TimerCtrl) {
        self.bus.write(self.base, CTRL_REG, ctrl.bits());
    }

    pub fn pause(&mut self) {
        self.ctrl.remove(TimerCtrl::GO);
        self.write_ctrl(self.ctrl);
    }

    pub fn go(&mut self) {
        self.ctrl.insert(TimerCtrl::GO);
        self.write_ctrl(self.ctrl);
    }

    /// Reset the counter to zero without changing the go bit.
    pub fn clear(&mut self) {
        self.write_ctrl(self.ctrl | TimerCtrl::CLR);
    }

    pub fn is_running(&self) -> bool {
        self.ctrl.contains(TimerCtrl::GO)
    }

    /// Clock ticks since the last clear.
    pub fn read_tick(&mut self) -> u64 {
        let lower = self.bus.read(self.base, COUNTER_LOWER_REG) as u64;
        let upper = self.bus.read(self.base, COUNTER_UPPER_REG) as u64;
        (upper << 32) | lower
    }

    /// Microseconds since the last clear.
    pub fn read_time(&mut self) -> u64 {
        self.read_tick() / SYS_CLK_FREQ as u64
    }

    pub fn now_us(&mut self) -> u64 {
        self.read_time()
    }

    pub fn now_ms(&mut self) -> u64 {
        self.read_time() / 1000
    }

    /// Spin until `us` microseconds have passed.
    ///
    /// Never returns if the timer is paused and `us` is non-zero.
    pub fn sleep_us(&mut self, us: u64) {
        let start = self.read_time();
        while self.read_time().wrapping_sub(start) < us {}
    }

    pub fn sleep_ms(&mut self, ms: u64) {
        self.sleep_us(ms.saturating_mul(1000));
    }
}

impl<B: IoBus> Delay for TimerCore<B> {
    fn delay_us(&mut self, us: u64) {
        self.sleep_us(us);
    }
}
