//! # Glitch-free Updates
//!
//! Changing the frequency word, phase word, wave select or the sample table
//! while the output is running can put a discontinuity on the analog output.
//! [`UpdateGuard`] brackets such changes: on acquisition it records whether
//! the output was enabled and, if so, disables it (the DAC idles at mid-scale).
//! When the guard is dropped the recorded state is restored, on every exit
//! path.
//!
//! ```ignore
//! let mut update = dds.update();
//! update.write_fcw(fcw);
//! update.write_pow(pow);
//! // output comes back here, with both words applied
//! drop(update);
//! ```
//!
//! The guard holds the core mutably borrowed, so a second update window on
//! the same core cannot open until the first one closes.

use log::trace;

use crate::io::IoBus;

use super::wavetable::WaveTable;
use super::{CtrlFlags, DdsAwgCore, FCW_REG, POW_REG, WaveSelect};

/// An open update window on a [`DdsAwgCore`].
///
/// Created by [`DdsAwgCore::update`].
pub struct UpdateGuard<'a, B: IoBus> {
    core: &'a mut DdsAwgCore<B>,
    was_on: bool,
}

impl<'a, B: IoBus> UpdateGuard<'a, B> {
    pub(crate) fn acquire(core: &'a mut DdsAwgCore<B>) -> Self {
        let was_on = core.is_enabled();
        if was_on {
            core.enable(false);
        }
        trace!("dds@{:#010x}: update window opened (was_on={})", core.base, was_on);
        Self { core, was_on }
    }

    /// Whether the output will be re-enabled when the guard drops.
    pub fn was_enabled(&self) -> bool {
        self.was_on
    }

    pub fn write_fcw(&mut self, fcw: u32) {
        self.core.write_reg(FCW_REG, fcw);
    }

    /// Write the phase word, keeping the software copy in step.
    pub fn write_pow(&mut self, pow: u32) {
        self.core.pow = pow;
        self.core.write_reg(POW_REG, pow);
    }

    pub fn write_wave(&mut self, sel: WaveSelect) {
        self.core.ctrl.set(CtrlFlags::WAVE_SEL, sel == WaveSelect::Arbitrary);
        self.core.write_ctrl();
    }

    /// Same as [`DdsAwgCore::write_sample`], inside the window.
    pub fn write_sample(&mut self, addr: u32, data: u32) {
        self.core.write_sample(addr, data);
    }

    /// Write all 1024 samples, address 0 first.
    pub fn write_table(&mut self, table: &WaveTable) {
        trace!("dds@{:#010x}: uploading wave table", self.core.base);
        for (addr, &sample) in table.iter().enumerate() {
            self.core.write_sample(addr as u32, sample as u32);
        }
    }
}

impl<'a, B: IoBus> Drop for UpdateGuard<'a, B> {
    fn drop(&mut self) {
        if self.was_on {
            self.core.enable(true);
        }
        trace!("dds@{:#010x}: update window closed", self.core.base);
    }
}
