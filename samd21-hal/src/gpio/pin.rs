use crate::bus::Bus;
use crate::registers::port::{DirClr, DirSet, Out, OutClr, OutSet, OutTgl, PinCfg, WrConfig};

use super::{Disabled, Function, Output, PinMode};

/// Digital pin state.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinState {
    Low = 0,
    High = 1,
}

impl From<bool> for PinState {
    #[inline(always)]
    fn from(value: bool) -> Self {
        if value {
            Self::High
        } else {
            Self::Low
        }
    }
}

impl core::ops::Not for PinState {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        match self {
            Self::High => Self::Low,
            Self::Low => Self::High,
        }
    }
}

impl PinState {
    /// Is the pin high?
    #[inline(always)]
    pub fn is_high(&self) -> bool {
        *self == Self::High
    }

    /// Is the pin low?
    #[inline(always)]
    pub fn is_low(&self) -> bool {
        *self == Self::Low
    }
}

/// Route `pin` to a peripheral function, through WRCONFIG.
///
/// This rewrites the whole PINCFG of the pin, so drive strength, pull
/// and input enable all go back to off.
#[inline]
pub(crate) fn set_function<B: Bus>(bus: &B, pin: u8, function: Function) {
    trace!("PA{=u8}: function {}", pin, function);
    bus.write(
        WrConfig::new()
            .with_hwsel(pin >= 16)
            .with_wrpincfg(true)
            .with_wrpmux(true)
            .with_pmux(function as u8)
            .with_pmuxen(true)
            .with_pinmask(1 << (pin % 16)),
    );
}

/// A PORT group 0 pin, with type state indicating mode.
pub struct Pin<B, const N: u8, Mode = Disabled> {
    bus: B,
    _marker: core::marker::PhantomData<Mode>,
}

impl<B, const N: u8, Mode> core::fmt::Debug for Pin<B, N, Mode>
where
    Mode: PinMode,
{
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_tuple("Pin")
            .field(&'A')
            .field(&N)
            .field(&Mode::default())
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl<B, const N: u8, Mode> defmt::Format for Pin<B, N, Mode>
where
    Mode: PinMode + defmt::Format,
{
    #[allow(clippy::missing_inline_in_public_items)]
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Pin(A, {}, {})", N, Mode::default())
    }
}

impl<B, const N: u8, Mode> Pin<B, N, Mode>
where
    B: Bus,
    Mode: PinMode,
{
    /// This must be the only handle to pin N, and Mode must match what
    /// the hardware is set to.
    #[inline(always)]
    pub(crate) fn new(bus: B) -> Self {
        Pin {
            bus,
            _marker: Default::default(),
        }
    }

    /// Get the pin number of this pin.
    #[inline(always)]
    pub fn pin(&self) -> u8 {
        N
    }

    /// Convert pin into a new mode.
    #[inline(always)]
    pub fn into_mode<M>(self) -> Pin<B, N, M>
    where
        M: PinMode,
    {
        if M::PMUXEN {
            if !Mode::PMUXEN || Mode::FUNCTION != M::FUNCTION {
                set_function(&self.bus, N, M::FUNCTION);
            }
        } else if Mode::PMUXEN {
            self.bus.modify_at(N, |r: PinCfg| r.with_pmuxen(false));
        }

        if M::DIR != Mode::DIR {
            if M::DIR {
                self.bus.write(DirSet::pin(N));
            } else {
                self.bus.write(DirClr::pin(N));
            }
        }

        Pin::new(self.bus)
    }

    /// Convert pin into a push-pull output. The output state is whatever
    /// OUT held before.
    #[inline(always)]
    pub fn into_push_pull_output(self) -> Pin<B, N, Output> {
        self.into_mode()
    }

    /// Convert pin into a push-pull output, in the given initial state.
    #[inline(always)]
    pub fn into_push_pull_output_in_state(self, state: PinState) -> Pin<B, N, Output> {
        self.write_data(state);
        self.into_mode()
    }

    /// Hand the pin to peripheral function F.
    #[inline(always)]
    pub fn into_alternate<const F: u8>(self) -> Pin<B, N, super::Alternate<F>> {
        self.into_mode()
    }

    /// Disconnect the pin entirely.
    #[inline(always)]
    pub fn into_disabled(self) -> Pin<B, N, Disabled> {
        self.into_mode()
    }

    /// Select the stronger output driver.
    #[inline(always)]
    pub fn set_drive_strength(&mut self, strong: bool) {
        self.bus.modify_at(N, |r: PinCfg| r.with_drvstr(strong));
    }

    // internal helper to read the output register
    #[inline(always)]
    fn read_data(&self) -> PinState {
        self.bus.read::<Out>().is_set(N).into()
    }

    // internal helper to drive the output through set/clear, which
    // leaves the other pins alone
    #[inline(always)]
    fn write_data(&self, state: PinState) {
        if state.is_high() {
            self.bus.write(OutSet::pin(N));
        } else {
            self.bus.write(OutClr::pin(N));
        }
    }
}

impl<B, const N: u8> Pin<B, N, Output>
where
    B: Bus,
{
    /// Get the current output drive state.
    #[inline(always)]
    pub fn get_state(&self) -> PinState {
        self.read_data()
    }

    /// Is the output set high?
    #[inline(always)]
    pub fn is_set_high(&self) -> bool {
        self.get_state().is_high()
    }

    /// Is the output set low?
    #[inline(always)]
    pub fn is_set_low(&self) -> bool {
        self.get_state().is_low()
    }

    /// Set the current output drive state.
    #[inline(always)]
    pub fn set_state(&mut self, state: PinState) {
        self.write_data(state);
    }

    /// Set the current output high.
    #[inline(always)]
    pub fn set_high(&mut self) {
        self.set_state(PinState::High);
    }

    /// Set the current output low.
    #[inline(always)]
    pub fn set_low(&mut self) {
        self.set_state(PinState::Low);
    }

    /// Toggle the output.
    #[inline(always)]
    pub fn toggle(&mut self) {
        self.bus.write(OutTgl::pin(N));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::gpio::Alternate;
    use crate::registers::port::{Dir, PMux};
    use crate::registers::Register;
    use crate::sim::Sim;

    fn pa17(sim: &Sim) -> Pin<Sim, 17, Disabled> {
        Pin::new(sim.clone())
    }

    #[test]
    fn output() {
        let sim = Sim::new();
        let mut led = pa17(&sim).into_push_pull_output();
        assert_eq!(&[(DirSet::ADDRESS, 1 << 17)], &sim.writes()[..]);
        assert!(sim.peek::<Dir>().is_set(17));

        led.set_low();
        assert!(led.is_set_low());
        led.set_high();
        assert!(led.is_set_high());
        led.toggle();
        assert!(led.is_set_low());

        assert_eq!(
            &[
                (DirSet::ADDRESS, 1 << 17),
                (OutClr::ADDRESS, 1 << 17),
                (OutSet::ADDRESS, 1 << 17),
                (OutTgl::ADDRESS, 1 << 17),
            ],
            &sim.writes()[..]
        );
    }

    #[test]
    fn output_in_state() {
        let sim = Sim::new();
        let led = pa17(&sim).into_push_pull_output_in_state(PinState::High);
        assert!(led.is_set_high());
        // the level is set before the driver turns on
        assert_eq!(
            &[(OutSet::ADDRESS, 1 << 17), (DirSet::ADDRESS, 1 << 17)],
            &sim.writes()[..]
        );
    }

    #[test]
    fn drive_strength() {
        let sim = Sim::new();
        let mut led = pa17(&sim).into_push_pull_output();
        led.set_drive_strength(true);
        assert!(sim.peek_at::<PinCfg>(17).drvstr());
        led.set_drive_strength(false);
        assert!(!sim.peek_at::<PinCfg>(17).drvstr());
    }

    #[test]
    fn alternate_and_back() {
        let sim = Sim::new();
        let pin: Pin<Sim, 28, Disabled> = Pin::new(sim.clone());
        let pin = pin.into_alternate::<7>();
        assert_eq!(&[(WrConfig::ADDRESS, 0xd701_1000)], &sim.writes()[..]);
        assert!(sim.peek_at::<PinCfg>(28).pmuxen());
        assert_eq!(7, sim.peek_at::<PMux>(14).pmuxe());

        // same function again is a no-op
        let pin: Pin<Sim, 28, Alternate<7>> = pin.into_mode();
        assert_eq!(1, sim.writes().len());

        let _ = pin.into_push_pull_output();
        assert!(!sim.peek_at::<PinCfg>(28).pmuxen());
        assert!(sim.peek::<Dir>().is_set(28));
    }

    #[test]
    fn lower_half() {
        let sim = Sim::new();
        set_function(&sim, 3, Function::B);
        let w = WrConfig::from_bits(sim.writes()[0].1);
        assert!(!w.hwsel());
        assert_eq!(1 << 3, w.pinmask());
        assert_eq!(1, w.pmux());
        assert_eq!(1, sim.peek_at::<PMux>(1).pmuxo());
    }
}
