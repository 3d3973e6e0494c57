use crate::bus::Bus;
use crate::gpio::{self, Function};
use crate::poll::{self, Error, Flag, PollLimit};
use crate::registers::gclk::{Channel, Source};
use crate::registers::pm::{ApbASel, ApbBSel, ApbCSel, CpuSel, Prescaler};
use crate::registers::{nvmctrl, sysctrl};
use crate::time::Hertz;

use super::dfll;
use super::gclk::{self, Generator};

/// Generator 0 is GCLK_MAIN, the CPU and bus clock.
pub const GCLK_MAIN: u8 = 0;

/// Generator 1 carries the crystal into the DFLL reference channel.
pub const GCLK_DFLL_REF: u8 = 1;

/// Nominal frequency of the OSC8M internal oscillator.
pub const OSC8M: Hertz = Hertz::MHz(8);

/// Nominal frequency of a watch crystal on XIN32/XOUT32.
pub const XOSC32K: Hertz = Hertz::Hz(32_768);

/// Pin PA28 carries GCLK_IO0 on function H.
const CLOCK_OUT_PIN: u8 = 28;

/// XOSC32K start-up time, 2 is 4096 cycles (125ms).
const XOSC32K_STARTUP: u8 = 0x2;

/// Flash wait states needed at 48MHz.
const FLASH_WAIT_STATES: u8 = 1;

/// Clock configuration.
pub struct ClockConfig<B> {
    bus: B,

    limit: PollLimit,
    xosc32k: Hertz,
    clock_out: bool,
}

impl<B> core::fmt::Debug for ClockConfig<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("ClockConfig")
            .field("limit", &self.limit)
            .field("xosc32k", &self.xosc32k)
            .field("clock_out", &self.clock_out)
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl<B> defmt::Format for ClockConfig<B> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "ClockConfig {{limit: {}, xosc32k: {}, clock_out: {}}}",
            self.limit,
            self.xosc32k,
            self.clock_out
        );
    }
}

/// Represents frozen, complete information about clock frequencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Clocks {
    xosc32k: Hertz,
    osc8m: Hertz,
    dfll48m: Hertz,
    gclk_main: Hertz,
    gclk_dfll_ref: Hertz,
    cpu: Hertz,
    apba: Hertz,
    apbb: Hertz,
    apbc: Hertz,
}

impl Clocks {
    /// Get the system clock (GCLK_MAIN), in Hz.
    #[inline(always)]
    pub fn sys_clk(&self) -> Hertz {
        self.gclk_main
    }

    /// Get the CPU clock.
    #[inline(always)]
    pub fn cpu_clk(&self) -> Hertz {
        self.cpu
    }

    /// Get the APBA bus clock.
    #[inline(always)]
    pub fn apba_clk(&self) -> Hertz {
        self.apba
    }

    /// Get the APBB bus clock.
    #[inline(always)]
    pub fn apbb_clk(&self) -> Hertz {
        self.apbb
    }

    /// Get the APBC bus clock.
    #[inline(always)]
    pub fn apbc_clk(&self) -> Hertz {
        self.apbc
    }

    /// Get the DFLL48M output.
    #[inline(always)]
    pub fn dfll48m(&self) -> Hertz {
        self.dfll48m
    }

    /// Get the DFLL reference, generator 1.
    #[inline(always)]
    pub fn gclk_dfll_ref(&self) -> Hertz {
        self.gclk_dfll_ref
    }

    /// Get the external crystal frequency.
    #[inline(always)]
    pub fn xosc32k(&self) -> Hertz {
        self.xosc32k
    }

    /// Get the OSC8M output, after its prescaler.
    #[inline(always)]
    pub fn osc8m(&self) -> Hertz {
        self.osc8m
    }
}

impl<B> ClockConfig<B>
where
    B: Bus,
{
    #[inline(always)]
    pub(crate) fn new(bus: B) -> Self {
        Self {
            bus,

            limit: PollLimit::Forever,
            xosc32k: XOSC32K,
            clock_out: true,
        }
    }

    /// Bound every status poll, instead of spinning forever.
    #[inline(always)]
    pub fn poll_limit(self, limit: PollLimit) -> Self {
        Self { limit, ..self }
    }

    /// Override the XTAL external crystal frequency.
    ///
    /// This only changes the reported frequencies, the DFLL multiplier
    /// is fixed for a 32.768kHz crystal.
    #[inline(always)]
    pub fn xosc32k(self, xosc32k: Hertz) -> Self {
        Self { xosc32k, ..self }
    }

    /// Drive GCLK_MAIN out on PA28.
    #[inline(always)]
    pub fn clock_out(self, clock_out: bool) -> Self {
        Self { clock_out, ..self }
    }

    /// Configure the clock tree and return the clock frequencies.
    ///
    /// The CPU ends up on the DFLL48M, locked to the external 32kHz
    /// crystal. Running this a second time without a reset is not
    /// supported, which is why it consumes the configuration.
    pub fn freeze(self) -> Result<Clocks, Error> {
        let bus = &self.bus;
        let limit = self.limit;

        debug!("clocks: configuring {}", self);

        // at reset we run at 1MHz off OSC8M, with no wait states.
        // more speed needs more wait states, and they must come first
        bus.modify(|r: nvmctrl::CtrlB| r.with_rws(FLASH_WAIT_STATES));

        // the crystal is the DFLL reference
        bus.write(
            sysctrl::Xosc32k::new()
                .with_wrtlock(false)
                .with_startup(XOSC32K_STARTUP)
                .with_ondemand(false)
                .with_runstdby(false)
                .with_aampen(false)
                .with_en32k(true)
                .with_xtalen(true),
        );
        // enable separately, as the datasheet asks
        bus.modify(|r: sysctrl::Xosc32k| r.with_enable(true));
        poll::wait_until(limit, Flag::Xosc32kReady, || {
            bus.read::<sysctrl::Pclksr>().xosc32krdy()
        })?;
        debug!("clocks: xosc32k stable");

        // generator 1 passes the crystal through undivided...
        let dfll_ref = Generator::new(GCLK_DFLL_REF, Source::Xosc32k).div(1);
        dfll_ref.configure(bus, limit)?;

        // ...to the DFLL reference channel
        gclk::route(bus, Channel::Dfll48mRef, GCLK_DFLL_REF);

        dfll::enable_closed_loop(bus, &dfll::FROM_XOSC32K, limit)?;
        debug!("clocks: dfll48m in closed loop");

        // move GCLK_MAIN over to the DFLL
        let main = Generator::new(GCLK_MAIN, Source::Dfll48m).output(self.clock_out);
        main.configure(bus, limit)?;

        // make sure we're on the new clock before continuing
        bus.barrier();

        if self.clock_out {
            gpio::set_function(bus, CLOCK_OUT_PIN, Function::H);
        }

        // no division anywhere, everything runs at 48MHz
        bus.write(CpuSel::new().with_cpudiv(Prescaler::Div1));
        bus.write(ApbASel::new().with_apbadiv(Prescaler::Div1));
        bus.write(ApbBSel::new().with_apbbdiv(Prescaler::Div1));
        bus.write(ApbCSel::new().with_apbcdiv(Prescaler::Div1));

        // OSC8M starts out divided by 8 and on demand, undo both
        bus.modify(|r: sysctrl::Osc8m| r.with_presc(0).with_ondemand(false));

        let dfll48m = Hertz::from_raw(self.xosc32k.to_Hz() * dfll::FROM_XOSC32K.mul as u32);
        let gclk_main = main.freq(dfll48m);

        let clocks = Clocks {
            xosc32k: self.xosc32k,
            osc8m: OSC8M,
            dfll48m,
            gclk_main,
            gclk_dfll_ref: dfll_ref.freq(self.xosc32k),
            cpu: gclk_main,
            apba: gclk_main,
            apbb: gclk_main,
            apbc: gclk_main,
        };

        debug!("clocks: done, {}", clocks);
        Ok(clocks)
    }
}
