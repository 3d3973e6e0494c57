//! A host-side model of the registers this crate touches.
//!
//! [Sim] stores register contents in memory, logs every access, and
//! fakes just enough hardware behaviour to let the clock, GPIO and
//! timer code run to completion off the chip:
//!
//! * PCLKSR reports OSC8M and the DFLL as ready, and XOSC32K as ready
//!   once it has been enabled.
//! * GCLK never reports SYNCBUSY. TC4 only does after a COUNT write,
//!   and only when [Sim::count_sync] asks for it. Until then COUNT
//!   keeps running from its old value.
//! * TC4 COUNT advances on every read while the timer is enabled.
//! * PORT set, clear and toggle registers act on DIR and OUT, and
//!   WRCONFIG updates PINCFG and PMUX.
//!
//! Any of this can be overridden with [Sim::force], to model hardware
//! that never becomes ready.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::vec::Vec;

use crate::bus::{Bus, Word};
use crate::registers::{nvmctrl, pm, port, sysctrl, tc4, Register, RegisterArray};

/// Contents of the NVM software calibration word, when not overridden.
pub const DEFAULT_CALIBRATION: u32 = 0x7dff_1234;

/// One register access, as seen by [Sim].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Access {
    Read { address: u32, value: u32 },
    Write { address: u32, value: u32 },
}

impl Access {
    /// Is this a read from `address`?
    pub fn is_read_from(&self, address: u32) -> bool {
        matches!(self, Access::Read { address: a, .. } if *a == address)
    }

    /// Is this a write to `address`?
    pub fn is_write_to(&self, address: u32) -> bool {
        matches!(self, Access::Write { address: a, .. } if *a == address)
    }

    /// Is this a write of `value` to `address`?
    pub fn is_write_of(&self, address: u32, value: u32) -> bool {
        *self
            == Access::Write {
                address,
                value,
            }
    }
}

#[derive(Debug, Clone, Copy)]
struct Force {
    mask: u32,
    value: u32,
}

#[derive(Debug)]
struct State {
    memory: BTreeMap<u32, u8>,
    log: Vec<Access>,
    forces: BTreeMap<u32, Force>,
    count_step: u16,
    count_sync: u8,
    // a COUNT write still in flight, and the STATUS reads left before it lands
    pending_count: Option<(u32, u8)>,
}

impl State {
    fn load(&self, address: u32, bytes: u32) -> u32 {
        (0..bytes).fold(0, |acc, i| {
            let b = self.memory.get(&(address + i)).copied().unwrap_or(0);
            acc | (b as u32) << (8 * i)
        })
    }

    fn store(&mut self, address: u32, bytes: u32, value: u32) {
        for i in 0..bytes {
            self.memory.insert(address + i, (value >> (8 * i)) as u8);
        }
    }

    fn load_reg<R: Register>(&self) -> u32 {
        self.load(R::ADDRESS, <R::Raw as Word>::BYTES)
    }

    fn store_reg<R: Register>(&mut self, value: u32) {
        self.store(R::ADDRESS, <R::Raw as Word>::BYTES, value)
    }

    fn update<R: Register>(&mut self, f: impl FnOnce(u32) -> u32) {
        let old = self.load_reg::<R>();
        self.store_reg::<R>(f(old));
    }

    fn read(&mut self, address: u32, bytes: u32) -> u32 {
        let mut value = self.load(address, bytes);

        if address == sysctrl::Pclksr::ADDRESS {
            let xosc32k = sysctrl::Xosc32k::from_bits(self.load_reg::<sysctrl::Xosc32k>() as u16);
            value = sysctrl::Pclksr::from_bits(value)
                .with_osc8mrdy(true)
                .with_dfllrdy(true)
                .with_xosc32krdy(xosc32k.enable())
                .into_bits();
        } else if address == tc4::Count::ADDRESS {
            let ctrla = tc4::CtrlA::from_bits(self.load_reg::<tc4::CtrlA>() as u16);
            if ctrla.enable() {
                value = (value as u16).wrapping_add(self.count_step) as u32;
                self.store(address, bytes, value);
            }
        } else if address == tc4::Status::ADDRESS {
            if let Some((count, left)) = self.pending_count {
                // SYNCBUSY
                value |= 0x80;
                if left <= 1 {
                    self.store_reg::<tc4::Count>(count);
                    self.pending_count = None;
                } else {
                    self.pending_count = Some((count, left - 1));
                }
            }
        }

        if let Some(force) = self.forces.get(&address) {
            value = (value & !force.mask) | (force.value & force.mask);
        }

        value
    }

    fn write(&mut self, address: u32, bytes: u32, value: u32) {
        match address {
            a if a == port::DirSet::ADDRESS => self.update::<port::Dir>(|old| old | value),
            a if a == port::DirClr::ADDRESS => self.update::<port::Dir>(|old| old & !value),
            a if a == port::DirTgl::ADDRESS => self.update::<port::Dir>(|old| old ^ value),
            a if a == port::OutSet::ADDRESS => self.update::<port::Out>(|old| old | value),
            a if a == port::OutClr::ADDRESS => self.update::<port::Out>(|old| old & !value),
            a if a == port::OutTgl::ADDRESS => self.update::<port::Out>(|old| old ^ value),
            a if a == port::WrConfig::ADDRESS => self.wrconfig(port::WrConfig::from_bits(value)),
            a if a == tc4::Count::ADDRESS && self.count_sync > 0 => {
                self.pending_count = Some((value, self.count_sync));
            }
            _ => self.store(address, bytes, value),
        }
    }

    fn wrconfig(&mut self, w: port::WrConfig) {
        let offset = if w.hwsel() { 16 } else { 0 };
        for bit in 0..16u8 {
            if w.pinmask() & (1 << bit) == 0 {
                continue;
            }
            let pin = bit + offset;

            if w.wrpincfg() {
                let cfg = port::PinCfg::new()
                    .with_pmuxen(w.pmuxen())
                    .with_inen(w.inen())
                    .with_pullen(w.pullen())
                    .with_drvstr(w.drvstr());
                self.store(port::PinCfg::address(pin), 1, cfg.into_bits() as u32);
            }

            if w.wrpmux() {
                let address = port::PMux::address(pin / 2);
                let mux = port::PMux::from_bits(self.load(address, 1) as u8);
                let mux = if pin % 2 == 0 {
                    mux.with_pmuxe(w.pmux())
                } else {
                    mux.with_pmuxo(w.pmux())
                };
                self.store(address, 1, mux.into_bits() as u32);
            }
        }
    }
}

/// A simulated register space. Clones share the same state.
#[derive(Debug, Clone)]
pub struct Sim {
    state: Rc<RefCell<State>>,
}

impl Default for Sim {
    fn default() -> Self {
        Self::new()
    }
}

impl Sim {
    /// A register space with reset values in place, and an empty log.
    pub fn new() -> Self {
        let mut state = State {
            memory: BTreeMap::new(),
            log: Vec::new(),
            forces: BTreeMap::new(),
            count_step: 1,
            count_sync: 0,
            pending_count: None,
        };

        state.store_reg::<sysctrl::Osc8m>(0x8707_0382);
        state.store_reg::<sysctrl::DfllCtrl>(0x0080);
        state.store_reg::<pm::ApbCMask>(0x0001_0000);
        state.store_reg::<nvmctrl::CtrlB>(0x0000_0080);
        state.store_reg::<nvmctrl::SoftwareCalib1>(DEFAULT_CALIBRATION);

        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// Replace the NVM software calibration word.
    pub fn with_calibration(self, raw: u32) -> Self {
        self.state
            .borrow_mut()
            .store_reg::<nvmctrl::SoftwareCalib1>(raw);
        self
    }

    /// How far TC4 COUNT advances per read, while enabled.
    pub fn count_step(self, step: u16) -> Self {
        self.state.borrow_mut().count_step = step;
        self
    }

    /// How many STATUS reads a COUNT write stays busy for. Zero, the
    /// default, makes COUNT writes land at once.
    pub fn count_sync(self, reads: u8) -> Self {
        self.state.borrow_mut().count_sync = reads;
        self
    }

    /// Make the bits in `mask` always read back as `value` at `address`.
    pub fn force(&self, address: u32, mask: u32, value: u32) {
        self.state
            .borrow_mut()
            .forces
            .insert(address, Force { mask, value });
    }

    /// Stop forcing bits at `address`.
    pub fn release(&self, address: u32) {
        self.state.borrow_mut().forces.remove(&address);
    }

    /// Current contents of a register, without side effects or logging.
    pub fn peek<R: Register>(&self) -> R {
        let raw = self.state.borrow().load(R::ADDRESS, <R::Raw as Word>::BYTES);
        R::from(<R::Raw as Word>::from_u32(raw))
    }

    /// Current contents of entry `n` of a register array.
    pub fn peek_at<R: RegisterArray>(&self, n: u8) -> R {
        let raw = self.state.borrow().load(R::address(n), <R::Raw as Word>::BYTES);
        R::from(<R::Raw as Word>::from_u32(raw))
    }

    /// Overwrite a register, without side effects or logging.
    pub fn poke<R: Register>(&self, value: R) {
        let raw: R::Raw = value.into();
        self.state
            .borrow_mut()
            .store(R::ADDRESS, <R::Raw as Word>::BYTES, raw.into_u32());
    }

    /// Every access so far, in order.
    pub fn log(&self) -> Vec<Access> {
        self.state.borrow().log.clone()
    }

    /// Every write so far, as (address, value).
    pub fn writes(&self) -> Vec<(u32, u32)> {
        self.state
            .borrow()
            .log
            .iter()
            .filter_map(|a| match a {
                Access::Write { address, value } => Some((*address, *value)),
                _ => None,
            })
            .collect()
    }

    /// Every read so far, as (address, value).
    pub fn reads(&self) -> Vec<(u32, u32)> {
        self.state
            .borrow()
            .log
            .iter()
            .filter_map(|a| match a {
                Access::Read { address, value } => Some((*address, *value)),
                _ => None,
            })
            .collect()
    }

    /// Forget every access so far.
    pub fn clear_log(&self) {
        self.state.borrow_mut().log.clear();
    }
}

impl Bus for Sim {
    fn read_raw<W: Word>(&self, address: u32) -> W {
        let mut state = self.state.borrow_mut();
        let value = state.read(address, W::BYTES);
        state.log.push(Access::Read { address, value });
        W::from_u32(value)
    }

    fn write_raw<W: Word>(&self, address: u32, value: W) {
        let mut state = self.state.borrow_mut();
        let value = value.into_u32();
        state.log.push(Access::Write { address, value });
        state.write(address, W::BYTES, value);
    }
}
