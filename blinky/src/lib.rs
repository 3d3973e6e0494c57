#![no_std]

//! Blink the LED on PA17 once a second, on a DFLL-clocked SAMD21.
//!
//! [App::init] brings up the clock tree, the LED pin and the delay
//! timer. [App::run] then blinks forever.

#[cfg(test)]
extern crate std;

use core::convert::Infallible;

use embedded_hal_1::digital::OutputPin;
use samd21_hal as hal;

use hal::bus::Bus;
use hal::gpio::{self, Output, Pin};
use hal::power::{self, Error};
use hal::timer::{Delay, DelayTimer, MicrosDelay};

/// Board constants.
pub mod config {
    use super::hal::bus::Bus;
    use super::hal::gpio::{Disabled, Pin, Pins};
    use super::hal::power::PollLimit;

    /// The LED is on PA17.
    pub const LED_PIN: u8 = 17;

    /// Pick the LED out of the split pins. The return type only accepts
    /// the field for [LED_PIN], so the two cannot drift apart.
    #[inline(always)]
    pub fn led_pin<B: Bus>(pins: Pins<B>) -> Pin<B, LED_PIN, Disabled> {
        pins.pa17
    }

    /// How long the LED stays on, and then off.
    pub const HALF_PERIOD_MS: u16 = 1000;

    /// How long to wait on clock and timer status flags.
    pub const POLL_LIMIT: PollLimit = PollLimit::Forever;
}

/// The LED pin, as an output.
pub type LedPin<B> = Pin<B, { config::LED_PIN }, Output>;

/// An LED driver: a digital output with a selectable drive strength.
pub trait Led: OutputPin<Error = Infallible> {
    /// Select the stronger output driver.
    fn set_drive_strength(&mut self, strong: bool);
}

impl<B, const N: u8> Led for Pin<B, N, Output>
where
    B: Bus,
{
    #[inline(always)]
    fn set_drive_strength(&mut self, strong: bool) {
        Pin::set_drive_strength(self, strong)
    }
}

/// The initialized application. Only [App::init] (or [App::new], given
/// already working parts) produces one.
#[derive(Debug)]
pub struct App<L, D> {
    led: L,
    delay: D,
}

impl<B> App<LedPin<B>, Delay<B>>
where
    B: Bus,
{
    /// Bring up the clocks, the LED and the delay timer, in that order.
    ///
    /// The clock tree can only be brought up once per reset.
    pub fn init(bus: B) -> Result<Self, Error> {
        let power = power::new(bus.clone());
        let clocks = power.clocks.poll_limit(config::POLL_LIMIT).freeze()?;

        let mut led = config::led_pin(gpio::new(bus.clone())).into_push_pull_output();
        led.set_low();

        let delay = DelayTimer::new(bus, power.gates.tc4).configure(&clocks, config::POLL_LIMIT)?;

        #[cfg(feature = "defmt")]
        defmt::info!("blinky: up, sys_clk {}", clocks.sys_clk());

        Ok(Self { led, delay })
    }
}

impl<L, D> App<L, D>
where
    L: Led,
    D: MicrosDelay,
{
    /// Assemble an application from parts that are already set up.
    #[inline(always)]
    pub fn new(led: L, delay: D) -> Self {
        Self { led, delay }
    }

    /// Swap out the delay.
    #[inline(always)]
    pub fn with_delay<D2: MicrosDelay>(self, delay: D2) -> App<L, D2> {
        App {
            led: self.led,
            delay,
        }
    }

    /// One blink: on for a half period, then off for a half period.
    pub fn blink(&mut self) {
        self.led.set_drive_strength(true);

        self.led.set_high().unwrap_or_else(|e| match e {});
        self.delay.delay_ms(config::HALF_PERIOD_MS);

        self.led.set_low().unwrap_or_else(|e| match e {});
        self.delay.delay_ms(config::HALF_PERIOD_MS);
    }

    /// Blink forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.blink();
        }
    }

    /// Take the parts back out.
    #[inline(always)]
    pub fn free(self) -> (L, D) {
        (self.led, self.delay)
    }
}

#[cfg(test)]
mod test {
    use std::vec::Vec;

    use super::*;
    use hal::registers::port::{Dir, Out, OutClr, OutSet, PinCfg};
    use hal::registers::{Register, RegisterArray};
    use hal::sim::Sim;

    /// Records every millisecond wait, instead of waiting.
    #[derive(Debug, Default)]
    struct MockDelay {
        us: Vec<u16>,
        ms: Vec<u16>,
    }

    impl MicrosDelay for MockDelay {
        fn delay_us(&mut self, us: u16) {
            self.us.push(us);
        }

        fn delay_ms(&mut self, ms: u16) {
            self.ms.push(ms);
        }
    }

    #[test]
    fn init_leaves_led_off() {
        let sim = Sim::new();
        let (led, _) = App::init(sim.clone()).unwrap().free();
        assert_eq!(config::LED_PIN, led.pin());

        assert!(sim.peek::<Dir>().is_set(17));
        assert!(!sim.peek::<Out>().is_set(17));

        // DIRSET strictly before OUTCLR
        let writes = sim.writes();
        let dirset = writes
            .iter()
            .position(|w| *w == (hal::registers::port::DirSet::ADDRESS, 1 << 17))
            .unwrap();
        let outclr = writes
            .iter()
            .position(|w| *w == (OutClr::ADDRESS, 1 << 17))
            .unwrap();
        assert!(dirset < outclr);
    }

    #[test]
    fn stuck_crystal_is_an_error() {
        let sim = Sim::new();
        sim.force(hal::registers::sysctrl::Pclksr::ADDRESS, 0x02, 0x00);

        // with the default limit this would spin forever, so go through
        // the clock config directly with a bound
        let p = power::new(sim.clone());
        let res = p
            .clocks
            .poll_limit(power::PollLimit::Spins(10))
            .freeze();
        assert_eq!(
            Err(Error::Timeout(power::Flag::Xosc32kReady)),
            res.map(|_| ())
        );
    }

    #[test]
    fn blink_once() {
        let sim = Sim::new();
        let mut app = App::init(sim.clone()).unwrap().with_delay(MockDelay::default());
        sim.clear_log();

        app.blink();

        let writes = sim.writes();
        assert_eq!(
            &[
                (PinCfg::address(17), 0x40),
                (OutSet::ADDRESS, 1 << 17),
                (OutClr::ADDRESS, 1 << 17),
            ],
            &writes[..]
        );
        assert!(sim.peek_at::<PinCfg>(17).drvstr());
        assert!(!sim.peek::<Out>().is_set(17));

        let (_, delay) = app.free();
        assert_eq!(&[1000, 1000], &delay.ms[..]);
        assert!(delay.us.is_empty());
    }

    #[test]
    fn blink_with_default_delay_ms() {
        // a delay that only provides delay_us still gets whole milliseconds
        #[derive(Default)]
        struct Micros(Vec<u16>);

        impl MicrosDelay for Micros {
            fn delay_us(&mut self, us: u16) {
                self.0.push(us);
            }
        }

        let sim = Sim::new();
        let led = config::led_pin(gpio::new(sim.clone())).into_push_pull_output();
        let mut app = App::new(led, Micros::default());
        app.blink();

        let (_, delay) = app.free();
        assert_eq!(2000, delay.0.len());
        assert!(delay.0.iter().all(|us| *us == 1000));
    }
}
