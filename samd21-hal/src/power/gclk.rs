use crate::bus::Bus;
use crate::poll::{self, Error, Flag, PollLimit};
use crate::registers::gclk::{Channel, ClkCtrl, GenCtrl, GenDiv, Source, Status};
use crate::time::Hertz;

/// Settings for one generic clock generator.
///
/// Generators are always enabled with a 50/50 duty cycle, plain
/// division and no standby operation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Generator {
    id: u8,
    src: Source,
    div: Option<u16>,
    oe: bool,
}

impl Generator {
    /// A generator `id` fed by `src`, with its division left untouched.
    #[inline(always)]
    pub const fn new(id: u8, src: Source) -> Self {
        Self {
            id,
            src,
            div: None,
            oe: false,
        }
    }

    /// Write this division factor before enabling the generator.
    #[inline(always)]
    pub const fn div(self, div: u16) -> Self {
        Self {
            div: Some(div),
            ..self
        }
    }

    /// Drive the generator out on its GCLK_IO pin.
    #[inline(always)]
    pub const fn output(self, oe: bool) -> Self {
        Self { oe, ..self }
    }

    /// The generator number.
    #[inline(always)]
    pub const fn id(&self) -> u8 {
        self.id
    }

    /// The output frequency, given the frequency of the source.
    #[inline(always)]
    pub fn freq(&self, src: Hertz) -> Hertz {
        match self.div {
            None | Some(0) | Some(1) => src,
            Some(d) => Hertz::from_raw(src.to_Hz() / d as u32),
        }
    }

    /// Write GENDIV (if a division was given) and GENCTRL, then wait
    /// for the generic clock domain to catch up.
    pub fn configure<B: Bus>(&self, bus: &B, limit: PollLimit) -> Result<(), Error> {
        trace!("gclk{}: src {}, div {}", self.id, self.src, self.div);

        if let Some(div) = self.div {
            bus.write(GenDiv::new().with_id(self.id).with_div(div));
        }

        bus.write(
            GenCtrl::new()
                .with_id(self.id)
                .with_src(Ok(self.src))
                .with_genen(true)
                .with_idc(true)
                .with_oov(false)
                .with_oe(self.oe)
                .with_divsel(false)
                .with_runstdby(false),
        );

        wait_sync(bus, limit)
    }
}

/// Connect generator `gen` to a peripheral channel, and enable it.
///
/// This does not wait for synchronization.
#[inline]
pub fn route<B: Bus>(bus: &B, channel: Channel, gen: u8) {
    trace!("gclk{} -> channel {}", gen, channel);
    bus.write(
        ClkCtrl::new()
            .with_id(channel as u8)
            .with_gen(gen)
            .with_clken(true)
            .with_wrtlock(false),
    );
}

/// Wait until GCLK.STATUS.SYNCBUSY clears.
#[inline]
pub fn wait_sync<B: Bus>(bus: &B, limit: PollLimit) -> Result<(), Error> {
    poll::wait_until(limit, Flag::GclkSync, || !bus.read::<Status>().syncbusy())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::registers::gclk;
    use crate::registers::Register;
    use crate::sim::Sim;

    #[test]
    fn freq() {
        let osc8m = Hertz::MHz(8);
        assert_eq!(osc8m, Generator::new(5, Source::Osc8m).freq(osc8m));
        assert_eq!(osc8m, Generator::new(5, Source::Osc8m).div(0).freq(osc8m));
        assert_eq!(osc8m, Generator::new(5, Source::Osc8m).div(1).freq(osc8m));
        assert_eq!(
            Hertz::MHz(1),
            Generator::new(5, Source::Osc8m).div(8).freq(osc8m)
        );
    }

    #[test]
    fn configure_with_div() {
        let sim = Sim::new();
        Generator::new(5, Source::Osc8m)
            .div(8)
            .configure(&sim, PollLimit::Forever)
            .unwrap();

        assert_eq!(
            &[(gclk::GenDiv::ADDRESS, 0x0000_0805), (gclk::GenCtrl::ADDRESS, 0x0003_0605)],
            &sim.writes()[..]
        );
        assert_eq!(
            Some(gclk::Status::ADDRESS),
            sim.reads().last().map(|(a, _)| *a)
        );
    }

    #[test]
    fn configure_without_div() {
        let sim = Sim::new();
        Generator::new(0, Source::Dfll48m)
            .output(true)
            .configure(&sim, PollLimit::Forever)
            .unwrap();

        assert_eq!(&[(gclk::GenCtrl::ADDRESS, 0x000b_0700)], &sim.writes()[..]);
    }

    #[test]
    fn stuck_sync() {
        let sim = Sim::new();
        sim.force(gclk::Status::ADDRESS, 0x80, 0x80);
        let res = Generator::new(1, Source::Xosc32k).configure(&sim, PollLimit::Spins(10));
        assert_eq!(Err(Error::Timeout(Flag::GclkSync)), res);
    }

    #[test]
    fn route_channel() {
        let sim = Sim::new();
        route(&sim, Channel::Tc4Tc5, 5);
        assert_eq!(&[(gclk::ClkCtrl::ADDRESS, 0x451c)], &sim.writes()[..]);
        // no sync wait
        assert!(sim.reads().is_empty());
    }
}
