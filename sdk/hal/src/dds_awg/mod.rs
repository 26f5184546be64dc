//! # DDS / Arbitrary Waveform Generator
//!
//! The DDS/AWG core (slot 5) synthesizes a periodic signal on a 14-bit DAC.
//! A 32-bit phase accumulator advances by the Frequency Control Word every
//! synthesis clock; its top 10 bits, offset by the Phase Offset Word, index
//! either the built-in sine ROM or a 1024-entry RAM table you upload.
//!
//! ## Registers
//!
//! | Offset | Name       | Access | Notes                                          |
//! |--------|------------|--------|------------------------------------------------|
//! | 0      | `FCW`      | R/W    | Frequency Control Word                         |
//! | 1      | `CTRL`     | W      | bit 0 enable, bit 1 wave select                |
//! | 2      | `RAM_ADDR` | W      | RAM address latch (10 bits)                    |
//! | 3      | `RAM_DATA` | W      | RAM sample (14 bits); the write pulses WE      |
//! | 4      | `POW`      | W      | Phase Offset Word                              |
//!
//! Any read in the slot returns `FCW`, whatever the offset. `CTRL` and `POW`
//! are therefore shadowed in software and their getters never touch hardware.
//! `FCW` has no shadow: [`DdsAwgCore::get_fcw`] always reads the register.
//!
//! ## Example
//!
//! ```ignore
//! let mut dds = DdsAwgCore::new(Mmio::new(), slot_addr(BRIDGE_BASE, Slot::DdsAwg));
//!
//! dds.set_freq(10_000.0);
//! dds.gen_square(25);
//! dds.select_wave(WaveSelect::Arbitrary);
//! dds.enable(true);
//!
//! // retuning while running is safe: the output idles during the update
//! dds.set_freq(12_500.0);
//! ```
//!
//! No operation here can fail. Out-of-range inputs are clamped (frequency),
//! masked (table addresses and samples), reduced modulo 360 (phase) or
//! passed through (square-wave duty).

pub mod codec;
pub mod guard;
pub mod wavetable;

use log::debug;

use crate::io::IoBus;
use crate::io_map::DDS_CLK_FREQ;

pub use guard::UpdateGuard;
pub use wavetable::{DAC_MAX, TABLE_SIZE, WaveTable};

pub const FCW_REG: usize = 0;
pub const CTRL_REG: usize = 1;
pub const RAM_ADDR_REG: usize = 2;
pub const RAM_DATA_REG: usize = 3;
pub const POW_REG: usize = 4;

bitflags::bitflags! {
    /// Bits of the write-only `CTRL` register.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct CtrlFlags: u32 {
        /// Drive the DAC. When clear the output sits at mid-scale.
        const ENABLE   = 0b01;
        /// Play the RAM table instead of the sine ROM.
        const WAVE_SEL = 0b10;
    }
}

/// Source of the samples played by the synthesizer.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveSelect {
    /// Built-in sine ROM.
    Sine = 0,
    /// User table in AWG RAM.
    Arbitrary = 1,
}

impl From<u32> for WaveSelect {
    fn from(sel: u32) -> Self {
        if sel != 0 {
            WaveSelect::Arbitrary
        } else {
            WaveSelect::Sine
        }
    }
}

/// Driver for one DDS/AWG slot.
pub struct DdsAwgCore<B: IoBus> {
    bus: B,
    pub(crate) base: usize,
    f_clk_hz: u32,
    /// Shadow of the write-only `CTRL` register.
    pub(crate) ctrl: CtrlFlags,
    /// Shadow of the write-only `POW` register.
    pub(crate) pow: u32,
}

impl<B: IoBus> DdsAwgCore<B> {
    /// Bind to the core at `base`, clocked at [`DDS_CLK_FREQ`] MHz.
    ///
    /// Resets the core: `FCW`, `CTRL` and `POW` are written to zero, leaving
    /// the output disabled and set to the sine ROM.
    pub fn new(bus: B, base: usize) -> Self {
        Self::with_clock(bus, base, DDS_CLK_FREQ * 1_000_000)
    }

    /// Same as [`new`](DdsAwgCore::new) for a synthesis clock other than the
    /// board default.
    pub fn with_clock(bus: B, base: usize, f_clk_hz: u32) -> Self {
        let mut core = Self {
            bus,
            base,
            f_clk_hz,
            ctrl: CtrlFlags::empty(),
            pow: 0,
        };
        core.write_reg(FCW_REG, 0);
        core.write_ctrl();
        core.write_reg(POW_REG, 0);
        core
    }

    /// Give the bus back. The core keeps its last programmed state.
    pub fn release(self) -> B {
        self.bus
    }

    pub fn base(&self) -> usize {
        self.base
    }

    pub fn clock_hz(&self) -> u32 {
        self.f_clk_hz
    }

    #[inline(always)]
    pub(crate) fn write_reg(&mut self, offset: usize, data: u32) {
        self.bus.write(self.base, offset, data);
    }

    #[inline(always)]
    pub(crate) fn write_ctrl(&mut self) {
        let bits = self.ctrl.bits();
        self.write_reg(CTRL_REG, bits);
    }

    /// Open an update window. See [`UpdateGuard`].
    pub fn update(&mut self) -> UpdateGuard<'_, B> {
        UpdateGuard::acquire(self)
    }

    // frequency and phase

    /// Set the output frequency, clamped to `[0, f_clk / 2]`.
    ///
    /// The control word is truncated, so the programmed frequency is at most
    /// one step (`f_clk / 2^32`, about 38 mHz at 165 MHz) below the request.
    pub fn set_freq(&mut self, freq_hz: f64) {
        let clamped = codec::clamp_freq(freq_hz, self.f_clk_hz);
        if clamped != freq_hz {
            debug!("dds@{:#010x}: frequency {} Hz clamped to {} Hz", self.base, freq_hz, clamped);
        }
        let fcw = codec::freq_to_fcw(clamped, self.f_clk_hz);
        self.set_fcw(fcw);
    }

    /// Output frequency computed from the `FCW` register.
    pub fn get_freq(&mut self) -> f64 {
        let fcw = self.get_fcw();
        codec::fcw_to_freq(fcw, self.f_clk_hz)
    }

    pub fn set_fcw(&mut self, fcw: u32) {
        self.update().write_fcw(fcw);
    }

    /// Read the `FCW` register.
    pub fn get_fcw(&mut self) -> u32 {
        self.bus.read(self.base, FCW_REG)
    }

    /// Set the phase offset in degrees. Angles outside `[0, 360)` wrap.
    pub fn set_phase(&mut self, degrees: f64) {
        let pow = codec::degrees_to_pow(degrees);
        if !(0.0..360.0).contains(&degrees) {
            debug!("dds@{:#010x}: phase {} wrapped to word {:#010x}", self.base, degrees, pow);
        }
        self.set_pow(pow);
    }

    pub fn get_phase(&self) -> f64 {
        codec::pow_to_degrees(self.pow)
    }

    pub fn set_pow(&mut self, pow: u32) {
        self.update().write_pow(pow);
    }

    pub fn get_pow(&self) -> u32 {
        self.pow
    }

    // control

    /// Enable or disable the output immediately.
    ///
    /// This is the one control change that is not bracketed by an update
    /// window; disabling parks the DAC at mid-scale.
    pub fn enable(&mut self, on: bool) {
        self.ctrl.set(CtrlFlags::ENABLE, on);
        self.write_ctrl();
    }

    pub fn is_enabled(&self) -> bool {
        self.ctrl.contains(CtrlFlags::ENABLE)
    }

    /// Choose between the sine ROM and the RAM table.
    pub fn select_wave(&mut self, sel: WaveSelect) {
        self.update().write_wave(sel);
    }

    pub fn wave(&self) -> WaveSelect {
        if self.ctrl.contains(CtrlFlags::WAVE_SEL) {
            WaveSelect::Arbitrary
        } else {
            WaveSelect::Sine
        }
    }

    /// Software copy of `CTRL`.
    pub fn ctrl(&self) -> CtrlFlags {
        self.ctrl
    }

    // wave table

    /// Write one RAM sample.
    ///
    /// `addr` wraps modulo 1024 and `data` keeps only its low 14 bits. The
    /// address is latched first; the data write then stores the sample.
    /// Not bracketed by an update window.
    pub fn write_sample(&mut self, addr: u32, data: u32) {
        self.write_reg(RAM_ADDR_REG, wavetable::mask_addr(addr));
        self.write_reg(RAM_DATA_REG, wavetable::mask_sample(data));
    }

    /// Upload a full table in one update window.
    pub fn load_table(&mut self, table: &WaveTable) {
        self.update().write_table(table);
    }

    /// Square wave, full scale for the first `duty` percent of the period.
    /// See [`square_table`](wavetable::square_table) for out-of-range duty.
    pub fn gen_square(&mut self, duty: i32) {
        self.load_table(&wavetable::square_table(duty));
    }

    pub fn gen_triangle(&mut self) {
        self.load_table(&wavetable::TRIANGLE);
    }

    pub fn gen_sawtooth(&mut self) {
        self.load_table(&wavetable::SAWTOOTH);
    }
}
