#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use mcs_hal::io::IoBus;
use mcs_hal::io_map::{Slot, slot_addr};

pub const BASE: usize = 0xC000_0000;

pub fn dds_base() -> usize {
    slot_addr(BASE, Slot::DdsAwg)
}

pub fn timer_base() -> usize {
    slot_addr(BASE, Slot::Timer)
}

pub fn led_base() -> usize {
    slot_addr(BASE, Slot::Led)
}

pub fn sw_base() -> usize {
    slot_addr(BASE, Slot::Sw)
}

pub fn spi_base() -> usize {
    slot_addr(BASE, Slot::Spi)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Read { base: usize, offset: usize },
    Write { base: usize, offset: usize, data: u32 },
}

/// Behavioral model of the DDS/AWG slot.
#[derive(Clone, Debug)]
pub struct DdsModel {
    pub fcw: u32,
    pub ctrl: u32,
    pub pow: u32,
    pub addr_latch: u32,
    pub ram: Vec<u16>,
}

impl DdsModel {
    fn new() -> Self {
        Self {
            fcw: 0xDEAD_BEEF,
            ctrl: 0b11,
            pow: 0xDEAD_BEEF,
            addr_latch: 0,
            ram: vec![0; 1024],
        }
    }

    fn read(&self, _offset: usize) -> u32 {
        // every offset decodes to FCW
        self.fcw
    }

    fn write(&mut self, offset: usize, data: u32) {
        match offset {
            0 => self.fcw = data,
            1 => self.ctrl = data & 0b11,
            2 => self.addr_latch = data & 0x3FF,
            3 => self.ram[self.addr_latch as usize] = (data & 0x3FFF) as u16,
            4 => self.pow = data,
            _ => {}
        }
    }
}

/// Free-running counter that advances `step` ticks each time the low word is
/// read while running.
#[derive(Clone, Debug)]
pub struct TimerModel {
    pub ticks: u64,
    pub step: u64,
    pub running: bool,
    pub clears: usize,
}

impl TimerModel {
    fn read(&mut self, offset: usize) -> u32 {
        match offset {
            0 => {
                if self.running {
                    self.ticks += self.step;
                }
                self.ticks as u32
            }
            1 => ((self.ticks >> 32) & 0xFFFF) as u32,
            _ => 0,
        }
    }

    fn write(&mut self, offset: usize, data: u32) {
        if offset == 2 {
            if data & 0b10 != 0 {
                self.ticks = 0;
                self.clears += 1;
            }
            self.running = data & 0b01 != 0;
        }
    }
}

/// SPI controller that answers every byte with `reply`, staying busy for
/// `busy_polls` status reads after each transfer starts.
#[derive(Clone, Debug)]
pub struct SpiModel {
    pub reply: u8,
    pub busy_polls: u32,
    pub busy: u32,
    pub sent: Vec<u8>,
    pub ss_n: u32,
    pub ctrl: u32,
}

impl SpiModel {
    fn read(&mut self, offset: usize) -> u32 {
        if offset != 0 {
            return 0;
        }
        if self.busy > 0 {
            self.busy -= 1;
            0
        } else {
            0x100 | self.reply as u32
        }
    }

    fn write(&mut self, offset: usize, data: u32) {
        match offset {
            1 => self.ss_n = data,
            2 => {
                self.sent.push(data as u8);
                self.busy = self.busy_polls;
            }
            3 => self.ctrl = data,
            _ => {}
        }
    }
}

enum Device {
    Dds(DdsModel),
    Timer(TimerModel),
    Spi(SpiModel),
}

#[derive(Default)]
struct State {
    devices: HashMap<usize, Device>,
    plain: HashMap<(usize, usize), u32>,
    log: Vec<Access>,
}

/// Shared, recording fake of the IO bridge.
///
/// Clones share state, so several drivers can sit on one fake the way they
/// share the real bridge. Bases without a model behave as plain memory.
#[derive(Clone, Default)]
pub struct FakeBus(Rc<RefCell<State>>);

impl FakeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fake with every board core modelled at its slot.
    pub fn board(timer_step: u64, spi_reply: u8) -> Self {
        Self::new()
            .with_dds(dds_base())
            .with_timer(timer_base(), timer_step)
            .with_spi(spi_base(), spi_reply, 3)
    }

    pub fn with_dds(self, base: usize) -> Self {
        self.0.borrow_mut().devices.insert(base, Device::Dds(DdsModel::new()));
        self
    }

    pub fn with_timer(self, base: usize, step: u64) -> Self {
        let model = TimerModel {
            ticks: 0xFFFF_FFFF_FF,
            step,
            running: false,
            clears: 0,
        };
        self.0.borrow_mut().devices.insert(base, Device::Timer(model));
        self
    }

    pub fn with_spi(self, base: usize, reply: u8, busy_polls: u32) -> Self {
        let model = SpiModel {
            reply,
            busy_polls,
            busy: 0,
            sent: Vec::new(),
            ss_n: 0,
            ctrl: 0,
        };
        self.0.borrow_mut().devices.insert(base, Device::Spi(model));
        self
    }

    /// Value returned by reads of a plain register.
    pub fn set_input(&self, base: usize, offset: usize, value: u32) {
        self.0.borrow_mut().plain.insert((base, offset), value);
    }

    pub fn plain(&self, base: usize, offset: usize) -> u32 {
        self.0.borrow().plain.get(&(base, offset)).copied().unwrap_or(0)
    }

    pub fn log(&self) -> Vec<Access> {
        self.0.borrow().log.clone()
    }

    pub fn clear_log(&self) {
        self.0.borrow_mut().log.clear();
    }

    /// Data written to one register, oldest first.
    pub fn writes_to(&self, base: usize, offset: usize) -> Vec<u32> {
        self.0
            .borrow()
            .log
            .iter()
            .filter_map(|a| match *a {
                Access::Write {
                    base: b,
                    offset: o,
                    data,
                } if b == base && o == offset => Some(data),
                _ => None,
            })
            .collect()
    }

    /// `(offset, data)` of every write to `base`, oldest first.
    pub fn writes(&self, base: usize) -> Vec<(usize, u32)> {
        self.0
            .borrow()
            .log
            .iter()
            .filter_map(|a| match *a {
                Access::Write { base: b, offset, data } if b == base => Some((offset, data)),
                _ => None,
            })
            .collect()
    }

    pub fn dds(&self, base: usize) -> DdsModel {
        match self.0.borrow().devices.get(&base) {
            Some(Device::Dds(model)) => model.clone(),
            _ => panic!("no dds model at {base:#x}"),
        }
    }

    pub fn set_dds_fcw(&self, base: usize, fcw: u32) {
        match self.0.borrow_mut().devices.get_mut(&base) {
            Some(Device::Dds(model)) => model.fcw = fcw,
            _ => panic!("no dds model at {base:#x}"),
        }
    }

    pub fn timer(&self, base: usize) -> TimerModel {
        match self.0.borrow().devices.get(&base) {
            Some(Device::Timer(model)) => model.clone(),
            _ => panic!("no timer model at {base:#x}"),
        }
    }

    pub fn spi(&self, base: usize) -> SpiModel {
        match self.0.borrow().devices.get(&base) {
            Some(Device::Spi(model)) => model.clone(),
            _ => panic!("no spi model at {base:#x}"),
        }
    }
}

impl IoBus for FakeBus {
    fn read(&mut self, base: usize, offset: usize) -> u32 {
        let mut guard = self.0.borrow_mut();
        let state = &mut *guard;
        state.log.push(Access::Read { base, offset });
        match state.devices.get_mut(&base) {
            Some(Device::Dds(model)) => model.read(offset),
            Some(Device::Timer(model)) => model.read(offset),
            Some(Device::Spi(model)) => model.read(offset),
            None => state.plain.get(&(base, offset)).copied().unwrap_or(0),
        }
    }

    fn write(&mut self, base: usize, offset: usize, data: u32) {
        let mut guard = self.0.borrow_mut();
        let state = &mut *guard;
        state.log.push(Access::Write { base, offset, data });
        match state.devices.get_mut(&base) {
            Some(Device::Dds(model)) => model.write(offset, data),
            Some(Device::Timer(model)) => model.write(offset, data),
            Some(Device::Spi(model)) => model.write(offset, data),
            None => {
                state.plain.insert((base, offset), data);
            }
        }
    }
}
