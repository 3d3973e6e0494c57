//! A busy-wait delay on TC4.
//!
//! [DelayTimer::configure] feeds TC4 a 1MHz clock (OSC8M divided by 8 on
//! generator 5) and starts it as a free-running 16-bit up-counter. The
//! resulting [Delay] waits by zeroing COUNT and spinning until it passes
//! the requested number of ticks.

use crate::bus::Bus;
use crate::poll::{self, Error, Flag, PollLimit};
use crate::power::{self, Clocks, Gate, Generator, Tc4};
use crate::registers::gclk::{Channel, Source};
use crate::registers::tc4::{self, CtrlA, CtrlBSet, Mode, ReadReq};
use crate::time::{Hertz, MicrosDuration};

mod hal02;
mod hal1;

/// The generator TC4 runs from.
pub const GCLK_TIMER: u8 = 5;

/// OSC8M divided by this gives the 1MHz tick.
const TIMER_DIV: u16 = 8;

/// The longest single wait on the counter. Half the COUNT16 range, so a
/// read that comes late still lands above the target and not past the wrap.
const MAX_SPAN: u16 = 0x8000;

/// Microsecond and millisecond busy-waits.
pub trait MicrosDelay {
    /// Wait at least `us` microseconds.
    fn delay_us(&mut self, us: u16);

    /// Wait at least `ms` milliseconds, one millisecond at a time.
    #[inline]
    fn delay_ms(&mut self, ms: u16) {
        for _ in 0..ms {
            self.delay_us(1000);
        }
    }
}

/// TC4, not yet configured.
pub struct DelayTimer<B> {
    bus: B,
    gate: Gate<B, Tc4>,
}

impl<B> core::fmt::Debug for DelayTimer<B>
where
    B: Bus,
{
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("DelayTimer")
            .field("gate", &self.gate)
            .finish()
    }
}

impl<B> DelayTimer<B>
where
    B: Bus,
{
    /// Take TC4, along with its bus gate.
    #[inline(always)]
    pub fn new(bus: B, gate: Gate<B, Tc4>) -> Self {
        Self { bus, gate }
    }

    /// Clock TC4 at 1MHz and start it counting up.
    ///
    /// This does not depend on the DFLL, only on OSC8M, which runs from
    /// reset.
    pub fn configure(mut self, clocks: &Clocks, limit: PollLimit) -> Result<Delay<B>, Error> {
        let bus = &self.bus;

        let gen = Generator::new(GCLK_TIMER, Source::Osc8m).div(TIMER_DIV);
        gen.configure(bus, limit)?;
        power::route(bus, Channel::Tc4Tc5, GCLK_TIMER);
        power::wait_sync(bus, limit)?;

        self.gate.enable();

        let sync = || !bus.read::<tc4::Status>().syncbusy();

        bus.modify(|r: CtrlA| r.with_enable(false));
        poll::wait_until(limit, Flag::TcSync, sync)?;
        bus.modify(|r: CtrlA| r.with_mode(Ok(Mode::Count16)));

        // counting up
        bus.write(CtrlBSet::new().with_dir(false));
        bus.write(tc4::Count::new());

        // keep COUNT synchronized, so reads return the live value
        bus.write(
            ReadReq::new()
                .with_rcont(true)
                .with_addr(tc4::COUNT_OFFSET),
        );

        bus.modify(|r: CtrlA| r.with_enable(true));
        poll::wait_until(limit, Flag::TcSync, sync)?;

        let tick = gen.freq(clocks.osc8m());
        debug!("tc4: counting at {}", tick);

        Ok(Delay {
            bus: self.bus,
            tick,
        })
    }
}

/// A running TC4, used for busy-wait delays.
pub struct Delay<B> {
    bus: B,
    tick: Hertz,
}

impl<B> core::fmt::Debug for Delay<B> {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Delay").field("tick", &self.tick).finish()
    }
}

#[cfg(feature = "defmt")]
impl<B> defmt::Format for Delay<B> {
    #[allow(clippy::missing_inline_in_public_items)]
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Delay {{ tick: {} }}", self.tick)
    }
}

impl<B> Delay<B>
where
    B: Bus,
{
    /// The counting rate of the timer.
    #[inline(always)]
    pub fn tick(&self) -> Hertz {
        self.tick
    }

    /// Wait at least `duration`, in as many counter spans as needed.
    #[inline]
    pub fn delay(&mut self, duration: MicrosDuration) {
        let mut us = duration.ticks();
        while us > MAX_SPAN as u32 {
            self.span(MAX_SPAN);
            us -= MAX_SPAN as u32;
        }
        self.span(us as u16);
    }

    /// Wait at least `ms` milliseconds.
    #[inline]
    pub fn delay_millis(&mut self, ms: u32) {
        for _ in 0..ms {
            self.span(1000);
        }
    }

    // one wait of at most MAX_SPAN ticks
    #[inline]
    fn span(&mut self, us: u16) {
        self.bus.write(tc4::Count::new());

        // COUNT is write-synchronized, reads before the sync finishes can
        // still see the old value
        while self.bus.read::<tc4::Status>().syncbusy() {
            core::hint::spin_loop();
        }

        while self.bus.read::<tc4::Count>().count() < us {
            core::hint::spin_loop();
        }
    }

    /// Give the bus back, leaving the timer running.
    #[inline(always)]
    pub fn free(self) -> B {
        self.bus
    }
}

impl<B> MicrosDelay for Delay<B>
where
    B: Bus,
{
    #[inline]
    fn delay_us(&mut self, us: u16) {
        if us > MAX_SPAN {
            self.span(MAX_SPAN);
            self.span(us - MAX_SPAN);
        } else {
            self.span(us);
        }
    }
}
