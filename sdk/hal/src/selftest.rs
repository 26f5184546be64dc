//! # Board Bring-up
//!
//! The checks the test firmware loops over. Each one exercises a core in a
//! way that's visible on the board (LEDs, a scope on the DAC output, a logic
//! analyzer on the SPI pins).
//!
//! ```ignore
//! let mut board = unsafe { Board::take() };
//! loop {
//!     selftest::run(&mut board);
//! }
//! ```

use log::info;

use crate::board::Board;
use crate::dds_awg::{DdsAwgCore, WaveSelect};
use crate::gpio::{GpiCore, GpoCore};
use crate::io::IoBus;
use crate::spi::SpiCore;
use crate::timer::Delay;

/// Number of LEDs on the Zybo Z7.
pub const LED_COUNT: usize = 4;

/// Byte sent by [`spi_check`].
pub const SPI_TEST_BYTE: u8 = 0xA5;

/// Output frequency used by [`dds_check`].
pub const DDS_TEST_FREQ_HZ: f64 = 1_000.0;

/// Blink all LEDs five times, one second on and one second off.
///
/// Checks that the timer runs at the expected rate.
pub fn timer_check<B: IoBus>(led: &mut GpoCore<B>, delay: &mut impl Delay) {
    for _ in 0..5 {
        led.write(0x0F);
        delay.delay_ms(1000);
        led.write(0x00);
        delay.delay_ms(1000);
    }
}

/// Light each of the first `n` LEDs in turn for 200 ms.
pub fn led_check<B: IoBus>(led: &mut GpoCore<B>, n: usize, delay: &mut impl Delay) {
    for i in 0..n {
        led.write_bit(true, i);
        delay.delay_ms(200);
        led.write_bit(false, i);
        delay.delay_ms(200);
    }
}

/// Flash the LEDs matching the switches that are on.
pub fn sw_check<B: IoBus>(led: &mut GpoCore<B>, sw: &mut GpiCore<B>, delay: &mut impl Delay) {
    let s = sw.read();
    for _ in 0..30 {
        led.write(s);
        delay.delay_ms(50);
        led.write(0);
        delay.delay_ms(50);
    }
}

/// Send one byte to slave 0 (mode 0, ~100 kHz) and show the low nibble of
/// the reply on the LEDs for two seconds.
pub fn spi_check<B: IoBus>(
    spi: &mut SpiCore<B>,
    led: &mut GpoCore<B>,
    delay: &mut impl Delay,
) -> u8 {
    spi.set_freq(100);
    spi.set_mode(false, false);

    spi.assert_ss(0);
    let rx = spi.transfer(SPI_TEST_BYTE);
    spi.deassert_ss(0);

    led.write((rx & 0x0F) as u32);
    delay.delay_ms(2000);
    led.write(0x00);
    rx
}

/// Play each waveform for a second at [`DDS_TEST_FREQ_HZ`], then disable
/// the output.
pub fn dds_check<B: IoBus>(dds: &mut DdsAwgCore<B>, delay: &mut impl Delay) {
    dds.set_freq(DDS_TEST_FREQ_HZ);
    dds.set_phase(0.0);
    dds.select_wave(WaveSelect::Sine);
    dds.enable(true);
    delay.delay_ms(1000);

    dds.gen_square(50);
    dds.select_wave(WaveSelect::Arbitrary);
    delay.delay_ms(1000);

    dds.gen_triangle();
    delay.delay_ms(1000);

    dds.gen_sawtooth();
    delay.delay_ms(1000);

    dds.enable(false);
}

/// One pass of every check.
pub fn run<B: IoBus>(board: &mut Board<B>) {
    info!("selftest: timer");
    timer_check(&mut board.led, &mut board.timer);
    info!("selftest: leds");
    led_check(&mut board.led, LED_COUNT, &mut board.timer);
    info!("selftest: switches");
    sw_check(&mut board.led, &mut board.sw, &mut board.timer);
    info!("selftest: spi");
    let rx = spi_check(&mut board.spi, &mut board.led, &mut board.timer);
    info!("selftest: spi replied {:#04x}", rx);
    info!("selftest: dds");
    dds_check(&mut board.dds, &mut board.timer);
}
