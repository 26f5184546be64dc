use crate::dds_awg::DdsAwgCore;
use crate::gpio::{GpiCore, GpoCore};
use crate::io::{IoBus, Mmio};
use crate::io_map::{BRIDGE_BASE, Slot, slot_addr};
use crate::spi::SpiCore;
use crate::timer::TimerCore;

/// Every core on the Zybo Z7 build, bound to its slot.
pub struct Board<B: IoBus> {
    pub timer: TimerCore<B>,
    pub led: GpoCore<B>,
    pub sw: GpiCore<B>,
    pub spi: SpiCore<B>,
    pub dds: DdsAwgCore<B>,
}

impl<B: IoBus + Clone> Board<B> {
    /// Bind all cores behind the bridge at `base`.
    ///
    /// Cores are initialized in slot order; the timer starts counting, SPI
    /// deselects its slaves and the DDS is reset with its output disabled.
    pub fn new(bus: B, base: usize) -> Self {
        Self {
            timer: TimerCore::new(bus.clone(), slot_addr(base, Slot::Timer)),
            led: GpoCore::new(bus.clone(), slot_addr(base, Slot::Led)),
            sw: GpiCore::new(bus.clone(), slot_addr(base, Slot::Sw)),
            spi: SpiCore::new(bus.clone(), slot_addr(base, Slot::Spi)),
            dds: DdsAwgCore::new(bus, slot_addr(base, Slot::DdsAwg)),
        }
    }
}

impl Board<Mmio> {
    /// # Safety
    /// Must run on the target, and only once: each core's shadow registers
    /// assume they are the only writer.
    pub unsafe fn take() -> Self {
        Self::new(unsafe { Mmio::new() }, BRIDGE_BASE)
    }
}
