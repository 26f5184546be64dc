//! # SPI Master
//!
//! Single-byte, full-duplex SPI controller (slot 4) with two active-low
//! slave selects.
//!
//! | Offset | Name      | Access | Notes                                       |
//! |--------|-----------|--------|---------------------------------------------|
//! | 0      | `RD_DATA` | R      | bit 8 ready, bits 7..0 received byte        |
//! | 1      | `SS_N`    | W      | slave selects, active low                   |
//! | 2      | `WR_DATA` | W      | byte to send; the write starts a transfer   |
//! | 3      | `CTRL`    | W      | bits 15..0 divisor, bit 16 cpol, bit 17 cpha|
//!
//! `f_sclk = SYS_CLK_FREQ / (2 * (dvsr + 1))`
//!
//! ```ignore
//! spi.set_freq(100);       // ~100 kHz
//! spi.set_mode(false, false);
//! spi.assert_ss(0);
//! let rx = spi.transfer(0xA5);
//! spi.deassert_ss(0);
//! ```

use bit_field::BitField;
use log::debug;

use crate::io::IoBus;
use crate::io_map::SYS_CLK_FREQ;

pub const RD_DATA_REG: usize = 0;
pub const SS_REG: usize = 1;
pub const WR_DATA_REG: usize = 2;
pub const CTRL_REG: usize = 3;

const READY_BIT: usize = 8;
const CPOL_BIT: usize = 16;
const CPHA_BIT: usize = 17;
const DVSR_MASK: u32 = 0x0000_FFFF;
const MODE_MASK: u32 = 0x0003_0000;

pub struct SpiCore<B: IoBus> {
    bus: B,
    base: usize,
    /// Shadow of `CTRL`.
    ctrl: u32,
    /// Shadow of `SS_N`.
    ss_n: u32,
}

impl<B: IoBus> SpiCore<B> {
    /// Bind to the controller: mode 0, divisor 256, all slaves deselected.
    pub fn new(bus: B, base: usize) -> Self {
        let mut spi = Self {
            bus,
            base,
            ctrl: 0x0000_0100,
            ss_n: 0b11,
        };
        spi.bus.write(base, CTRL_REG, spi.ctrl);
        spi.bus.write(base, SS_REG, spi.ss_n);
        spi
    }

    /// Set the SCLK rate in kHz, keeping the mode bits.
    ///
    /// Rates above the controller's maximum select divisor 0; a rate of zero
    /// selects the slowest divisor.
    pub fn set_freq(&mut self, khz: u32) {
        let dvsr = if khz == 0 {
            debug!("spi@{:#010x}: 0 kHz requested, using slowest clock", self.base);
            DVSR_MASK
        } else {
            ((SYS_CLK_FREQ * 1000) / khz.saturating_mul(2)).saturating_sub(1)
        };
        self.ctrl = (self.ctrl & MODE_MASK) | (dvsr & DVSR_MASK);
        self.bus.write(self.base, CTRL_REG, self.ctrl);
    }

    pub fn set_mode(&mut self, cpol: bool, cpha: bool) {
        self.ctrl.set_bit(CPOL_BIT, cpol);
        self.ctrl.set_bit(CPHA_BIT, cpha);
        self.bus.write(self.base, CTRL_REG, self.ctrl);
    }

    /// Select slave `n` (drives its line low).
    pub fn assert_ss(&mut self, n: usize) {
        self.write_ss(n, false);
    }

    pub fn deassert_ss(&mut self, n: usize) {
        self.write_ss(n, true);
    }

    fn write_ss(&mut self, n: usize, level: bool) {
        if n >= u32::BIT_LENGTH {
            debug!("spi@{:#010x}: no slave select {}", self.base, n);
            return;
        }
        self.ss_n.set_bit(n, level);
        self.bus.write(self.base, SS_REG, self.ss_n);
    }

    pub fn ready(&mut self) -> bool {
        self.bus.read(self.base, RD_DATA_REG).get_bit(READY_BIT)
    }

    /// Shift `data` out and return the byte shifted in.
    ///
    /// Blocks until the controller is idle, and again until the transfer
    /// completes.
    pub fn transfer(&mut self, data: u8) -> u8 {
        while !self.ready() {}
        self.bus.write(self.base, WR_DATA_REG, data as u32);
        while !self.ready() {}
        self.bus.read(self.base, RD_DATA_REG).get_bits(0..8) as u8
    }

    pub fn ctrl(&self) -> u32 {
        self.ctrl
    }

    pub fn ss_n(&self) -> u32 {
        self.ss_n
    }
}
