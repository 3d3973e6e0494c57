use embedded_hal_02::blocking::delay as hal02;

use crate::bus::Bus;
use crate::time::MicrosDuration;

use super::{Delay, MicrosDelay};

impl<B> hal02::DelayUs<u32> for Delay<B>
where
    B: Bus,
{
    #[inline(always)]
    fn delay_us(&mut self, us: u32) {
        self.delay(MicrosDuration::micros(us))
    }
}

impl<B> hal02::DelayUs<u16> for Delay<B>
where
    B: Bus,
{
    #[inline(always)]
    fn delay_us(&mut self, us: u16) {
        MicrosDelay::delay_us(self, us)
    }
}

impl<B> hal02::DelayUs<u8> for Delay<B>
where
    B: Bus,
{
    #[inline(always)]
    fn delay_us(&mut self, us: u8) {
        MicrosDelay::delay_us(self, us as u16)
    }
}

impl<B> hal02::DelayMs<u32> for Delay<B>
where
    B: Bus,
{
    #[inline(always)]
    fn delay_ms(&mut self, ms: u32) {
        self.delay_millis(ms)
    }
}

impl<B> hal02::DelayMs<u16> for Delay<B>
where
    B: Bus,
{
    #[inline(always)]
    fn delay_ms(&mut self, ms: u16) {
        MicrosDelay::delay_ms(self, ms)
    }
}

impl<B> hal02::DelayMs<u8> for Delay<B>
where
    B: Bus,
{
    #[inline(always)]
    fn delay_ms(&mut self, ms: u8) {
        MicrosDelay::delay_ms(self, ms as u16)
    }
}

#[cfg(test)]
mod test {
    use embedded_hal_02::blocking::delay::{DelayMs, DelayUs};

    use crate::poll::PollLimit;
    use crate::power;
    use crate::registers::{tc4, Register};
    use crate::sim::Sim;
    use crate::timer::{Delay, DelayTimer};

    fn delay(sim: &Sim) -> Delay<Sim> {
        let p = power::new(sim.clone());
        let clocks = p.clocks.freeze().unwrap();
        let delay = DelayTimer::new(sim.clone(), p.gates.tc4)
            .configure(&clocks, PollLimit::Forever)
            .unwrap();
        sim.clear_log();
        delay
    }

    fn zeroes(sim: &Sim) -> usize {
        sim.writes()
            .iter()
            .filter(|w| **w == (tc4::Count::ADDRESS, 0))
            .count()
    }

    fn count_reads(sim: &Sim) -> usize {
        sim.reads()
            .iter()
            .filter(|(a, _)| *a == tc4::Count::ADDRESS)
            .count()
    }

    #[test]
    fn micros_every_width() {
        let sim = Sim::new();
        let mut d = delay(&sim);

        DelayUs::<u8>::delay_us(&mut d, 7);
        assert_eq!(7, count_reads(&sim));

        sim.clear_log();
        DelayUs::<u16>::delay_us(&mut d, 300);
        assert_eq!(300, count_reads(&sim));

        sim.clear_log();
        DelayUs::<u32>::delay_us(&mut d, 40);
        assert_eq!(1, zeroes(&sim));
        assert_eq!(40, count_reads(&sim));
    }

    #[test]
    fn long_micros_are_chunked() {
        let sim = Sim::new().count_step(4);
        let mut d = delay(&sim);

        DelayUs::<u32>::delay_us(&mut d, 100_000);
        assert_eq!(4, zeroes(&sim));
    }

    #[test]
    fn millis_every_width() {
        let sim = Sim::new().count_step(100);
        let mut d = delay(&sim);

        DelayMs::<u8>::delay_ms(&mut d, 2);
        assert_eq!(2, zeroes(&sim));

        sim.clear_log();
        DelayMs::<u16>::delay_ms(&mut d, 3);
        assert_eq!(3, zeroes(&sim));
        assert_eq!(30, count_reads(&sim));

        sim.clear_log();
        DelayMs::<u32>::delay_ms(&mut d, 1_000);
        assert_eq!(1_000, zeroes(&sim));
    }
}
