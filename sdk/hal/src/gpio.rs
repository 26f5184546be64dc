//! General purpose output (LEDs, slot 1) and input (switches, slot 2).
//!
//! Both cores have a single `DATA` register at offset 0. Output bits the core
//! doesn't implement ignore writes; missing input bits read as zero.

use bit_field::BitField;
use log::debug;

use crate::io::IoBus;

pub const DATA_REG: usize = 0;

pub struct GpoCore<B: IoBus> {
    bus: B,
    base: usize,
    /// Shadow of the write-only `DATA` register.
    wr_data: u32,
}

impl<B: IoBus> GpoCore<B> {
    pub fn new(bus: B, base: usize) -> Self {
        Self {
            bus,
            base,
            wr_data: 0,
        }
    }

    pub fn write(&mut self, data: u32) {
        self.wr_data = data;
        self.bus.write(self.base, DATA_REG, data);
    }

    /// Change one output bit, leaving the others as last written.
    pub fn write_bit(&mut self, bit_value: bool, bit_pos: usize) {
        if bit_pos >= u32::BIT_LENGTH {
            debug!("gpo@{:#010x}: ignoring write to bit {}", self.base, bit_pos);
            return;
        }
        self.wr_data.set_bit(bit_pos, bit_value);
        self.bus.write(self.base, DATA_REG, self.wr_data);
    }

    /// Last value written.
    pub fn data(&self) -> u32 {
        self.wr_data
    }
}

pub struct GpiCore<B: IoBus> {
    bus: B,
    base: usize,
}

impl<B: IoBus> GpiCore<B> {
    pub fn new(bus: B, base: usize) -> Self {
        Self { bus, base }
    }

    pub fn read(&mut self) -> u32 {
        self.bus.read(self.base, DATA_REG)
    }

    /// Read one input bit. Positions past bit 31 read as low.
    pub fn read_bit(&mut self, bit_pos: usize) -> bool {
        if bit_pos >= u32::BIT_LENGTH {
            return false;
        }
        self.read().get_bit(bit_pos)
    }
}
