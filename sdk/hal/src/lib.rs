//! # MCS HAL
//!
//! Drivers for the peripheral cores of the MCS signal generator test platform.
//! Every core sits in its own 32-word slot behind the MMIO bridge at
//! [`BRIDGE_BASE`](io_map::BRIDGE_BASE):
//!
//! | Slot | Core                          | Driver                              |
//! |------|-------------------------------|-------------------------------------|
//! | 0    | System timer                  | [`TimerCore`](timer::TimerCore)     |
//! | 1    | LEDs (general purpose output) | [`GpoCore`](gpio::GpoCore)          |
//! | 2    | Switches (general purpose in) | [`GpiCore`](gpio::GpiCore)          |
//! | 4    | SPI master                    | [`SpiCore`](spi::SpiCore)           |
//! | 5    | DDS / arbitrary waveform gen  | [`DdsAwgCore`](dds_awg::DdsAwgCore) |
//!
//! Drivers are generic over [`IoBus`](io::IoBus) so the same code runs against
//! the real bridge ([`Mmio`](io::Mmio)) or a host-side fake.
//!
//! ## Quick Start
//!
//! ```ignore
//! let mut board = unsafe { Board::take() };
//!
//! board.dds.set_freq(1_000.0);
//! board.dds.gen_triangle();
//! board.dds.select_wave(WaveSelect::Arbitrary);
//! board.dds.enable(true);
//! ```

#![cfg_attr(not(test), no_std)]

pub mod board;
pub mod dds_awg;
pub mod gpio;
pub mod io;
pub mod io_map;
pub mod selftest;
pub mod spi;
pub mod timer;

pub use board::Board;
pub use dds_awg::{DdsAwgCore, WaveSelect};
pub use io::{IoBus, Mmio};
pub use timer::Delay;
