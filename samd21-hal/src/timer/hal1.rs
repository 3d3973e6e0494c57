use embedded_hal_1::delay as hal1;

use crate::bus::Bus;
use crate::time::MicrosDuration;

use super::Delay;

impl<B> hal1::DelayNs for Delay<B>
where
    B: Bus,
{
    // the counter only resolves microseconds, round up to the next one
    #[inline]
    fn delay_ns(&mut self, ns: u32) {
        self.delay(MicrosDuration::micros(ns.div_ceil(1000)))
    }

    #[inline]
    fn delay_us(&mut self, us: u32) {
        self.delay(MicrosDuration::micros(us))
    }

    #[inline]
    fn delay_ms(&mut self, ms: u32) {
        self.delay_millis(ms)
    }
}

#[cfg(test)]
mod test {
    use embedded_hal_1::delay::DelayNs;

    use crate::power;
    use crate::registers::{tc4, Register};
    use crate::sim::Sim;
    use crate::timer::{Delay, DelayTimer};
    use crate::poll::PollLimit;

    fn delay(sim: &Sim) -> Delay<Sim> {
        let p = power::new(sim.clone());
        let clocks = p.clocks.freeze().unwrap();
        let delay = DelayTimer::new(sim.clone(), p.gates.tc4)
            .configure(&clocks, PollLimit::Forever)
            .unwrap();
        sim.clear_log();
        delay
    }

    fn count_reads(sim: &Sim) -> usize {
        sim.reads()
            .iter()
            .filter(|(a, _)| *a == tc4::Count::ADDRESS)
            .count()
    }

    #[test]
    fn nanos_round_up() {
        let sim = Sim::new();
        let mut d = delay(&sim);
        DelayNs::delay_ns(&mut d, 1);
        assert_eq!(1, count_reads(&sim));

        sim.clear_log();
        DelayNs::delay_ns(&mut d, 2001);
        assert_eq!(3, count_reads(&sim));
    }

    #[test]
    fn millis_are_microsecond_spans() {
        let sim = Sim::new().count_step(100);
        let mut d = delay(&sim);
        DelayNs::delay_ms(&mut d, 3);
        let zeroes = sim
            .writes()
            .iter()
            .filter(|w| **w == (tc4::Count::ADDRESS, 0))
            .count();
        assert_eq!(3, zeroes);
        assert_eq!(30, count_reads(&sim));
    }
}
