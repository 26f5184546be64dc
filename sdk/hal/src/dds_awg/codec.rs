//! Fixed-point frequency and phase words.
//!
//! The DDS phase accumulator is 32 bits wide, so one full output cycle is
//! `2^32` counts:
//!
//! - `f_out = fcw * f_clk / 2^32`
//! - `phase = pow * 360 / 2^32` degrees
//!
//! Conversions into control words truncate; they never round.

/// Counts in one turn of the phase accumulator (`2^32`).
pub const PHASE_MODULUS: f64 = 4_294_967_296.0;

/// Highest frequency the synthesizer can produce: `f_clk / 2`.
#[inline]
pub fn nyquist(f_clk_hz: u32) -> f64 {
    f_clk_hz as f64 / 2.0
}

/// Clamp `freq_hz` into `[0, f_clk / 2]`. NaN maps to 0 Hz.
#[inline]
pub fn clamp_freq(freq_hz: f64, f_clk_hz: u32) -> f64 {
    if freq_hz.is_nan() {
        return 0.0;
    }
    freq_hz.clamp(0.0, nyquist(f_clk_hz))
}

/// Frequency in Hz to a Frequency Control Word, clamping to Nyquist first.
#[inline]
pub fn freq_to_fcw(freq_hz: f64, f_clk_hz: u32) -> u32 {
    let freq_hz = clamp_freq(freq_hz, f_clk_hz);
    // a zero clock gives NaN here, which converts to 0
    (freq_hz * PHASE_MODULUS / f_clk_hz as f64) as u32
}

#[inline]
pub fn fcw_to_freq(fcw: u32, f_clk_hz: u32) -> f64 {
    fcw as f64 * f_clk_hz as f64 / PHASE_MODULUS
}

/// Degrees to a Phase Offset Word.
///
/// The angle is reduced into `[0, 360)` first, so `-90.0` and `270.0` give
/// the same word. NaN and infinities map to 0.
#[inline]
pub fn degrees_to_pow(degrees: f64) -> u32 {
    let mut angle = degrees % 360.0;
    if angle < 0.0 {
        angle += 360.0;
    }
    // tiny negative angles round up to exactly 360.0, which must wrap to 0
    (angle * PHASE_MODULUS / 360.0) as u64 as u32
}

#[inline]
pub fn pow_to_degrees(pow: u32) -> f64 {
    pow as f64 * 360.0 / PHASE_MODULUS
}
