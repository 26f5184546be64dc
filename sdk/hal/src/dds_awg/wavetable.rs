//! # Waveform Tables
//!
//! The AWG plays a 1024-entry table of unsigned 14-bit samples from its RAM.
//! The table is write-only: each sample is written by latching an address in
//! `RAM_ADDR` and then writing the value to `RAM_DATA`, which pulses the RAM
//! write-enable.
//!
//! The builders here compute whole tables with integer math so the uploaded
//! samples are bit-identical on every target. Upload them with
//! [`DdsAwgCore::load_table`](super::DdsAwgCore::load_table), or use the
//! `gen_*` shortcuts on the core.
//!
//! ```ignore
//! let mut table = sawtooth_table();
//! table.reverse(); // falling ramp
//! dds.load_table(&table);
//! dds.select_wave(WaveSelect::Arbitrary);
//! ```

/// Address bits of the AWG RAM.
pub const PHASE_WIDTH: u32 = 10;
/// Entries in the AWG RAM.
pub const TABLE_SIZE: usize = 1 << PHASE_WIDTH;
/// Sample width of the DAC.
pub const DAC_WIDTH: u32 = 14;
/// Full-scale sample (16383).
pub const DAC_MAX: u16 = (1 << DAC_WIDTH) - 1;

/// One full period of samples, index 0 first.
pub type WaveTable = [u16; TABLE_SIZE];

/// Wrap a table address onto the 10-bit RAM address bus.
#[inline(always)]
pub const fn mask_addr(addr: u32) -> u32 {
    addr & (TABLE_SIZE as u32 - 1)
}

/// Truncate a sample to the 14-bit DAC width.
#[inline(always)]
pub const fn mask_sample(data: u32) -> u32 {
    data & DAC_MAX as u32
}

/// Full scale for the first `duty` percent of the period, zero after.
///
/// `duty` is not clamped: anything at or below 0 gives a silent table and
/// anything at or above 100 gives a constant full-scale table.
pub const fn square_table(duty: i32) -> WaveTable {
    let threshold = (TABLE_SIZE as i64 * duty as i64) / 100;
    let mut table = [0u16; TABLE_SIZE];
    let mut i = 0;
    while i < TABLE_SIZE {
        if (i as i64) < threshold {
            table[i] = DAC_MAX;
        }
        i += 1;
    }
    table
}

/// Rising ramp over the first half, falling ramp over the second.
pub const fn triangle_table() -> WaveTable {
    let half = (TABLE_SIZE / 2) as u32;
    let mut table = [0u16; TABLE_SIZE];
    let mut i = 0;
    while i < TABLE_SIZE {
        let n = if (i as u32) < half {
            i as u32
        } else {
            (TABLE_SIZE - i) as u32
        };
        table[i] = (DAC_MAX as u32 * n / half) as u16;
        i += 1;
    }
    table
}

/// Linear ramp from 0 up to just below full scale.
pub const fn sawtooth_table() -> WaveTable {
    let mut table = [0u16; TABLE_SIZE];
    let mut i = 0;
    while i < TABLE_SIZE {
        table[i] = (DAC_MAX as u32 * i as u32 / TABLE_SIZE as u32) as u16;
        i += 1;
    }
    table
}

pub const TRIANGLE: WaveTable = triangle_table();
pub const SAWTOOTH: WaveTable = sawtooth_table();
