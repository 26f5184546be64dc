//! Zybo Z7 board memory map and clock rates.

/// System clock rate in MHz; drives the timer and SPI dividers.
pub const SYS_CLK_FREQ: u32 = 125;
/// DDS synthesis clock rate in MHz (`f_out = fcw * f_clk / 2^32`).
pub const DDS_CLK_FREQ: u32 = 165;

/// IO bridge base address of the MicroBlaze MCS.
pub const BRIDGE_BASE: usize = 0xC000_0000;

/// Words per slot.
pub const SLOT_WORDS: usize = 32;

/// Peripheral slots on the IO bridge.
#[repr(usize)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Timer = 0,
    Led = 1,
    Sw = 2,
    Uart = 3,
    Spi = 4,
    DdsAwg = 5,
    User6 = 6,
    User7 = 7,
    User8 = 8,
    User9 = 9,
    User10 = 10,
    User11 = 11,
    User12 = 12,
    User13 = 13,
}

/// Byte address of `slot` behind the bridge at `base`.
#[inline(always)]
pub const fn slot_addr(base: usize, slot: Slot) -> usize {
    base + (slot as usize) * SLOT_WORDS * 4
}
