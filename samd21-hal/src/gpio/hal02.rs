use core::convert::Infallible;
use embedded_hal_02::digital::v2 as hal02;

use crate::bus::Bus;

use super::{Output, Pin, PinState};

impl From<hal02::PinState> for PinState {
    #[inline(always)]
    fn from(value: hal02::PinState) -> Self {
        match value {
            hal02::PinState::Low => Self::Low,
            hal02::PinState::High => Self::High,
        }
    }
}

impl From<PinState> for hal02::PinState {
    #[inline(always)]
    fn from(value: PinState) -> Self {
        match value {
            PinState::Low => Self::Low,
            PinState::High => Self::High,
        }
    }
}

impl<B, const N: u8> hal02::OutputPin for Pin<B, N, Output>
where
    B: Bus,
{
    type Error = Infallible;

    #[inline(always)]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Pin::set_low(self);
        Ok(())
    }

    #[inline(always)]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        Pin::set_high(self);
        Ok(())
    }

    #[inline(always)]
    fn set_state(&mut self, state: hal02::PinState) -> Result<(), Self::Error> {
        Pin::set_state(self, state.into());
        Ok(())
    }
}

impl<B, const N: u8> hal02::StatefulOutputPin for Pin<B, N, Output>
where
    B: Bus,
{
    #[inline(always)]
    fn is_set_high(&self) -> Result<bool, Self::Error> {
        Ok(Pin::is_set_high(self))
    }

    #[inline(always)]
    fn is_set_low(&self) -> Result<bool, Self::Error> {
        Ok(Pin::is_set_low(self))
    }
}

impl<B, const N: u8> hal02::ToggleableOutputPin for Pin<B, N, Output>
where
    B: Bus,
{
    type Error = Infallible;

    #[inline(always)]
    fn toggle(&mut self) -> Result<(), Self::Error> {
        Pin::toggle(self);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::registers::port::{Out, OutClr, OutSet, OutTgl};
    use crate::registers::Register;
    use crate::sim::Sim;

    fn drive<P>(pin: &mut P) -> Result<(), P::Error>
    where
        P: hal02::OutputPin,
    {
        pin.set_high()?;
        pin.set_low()?;
        pin.set_state(hal02::PinState::High)
    }

    #[test]
    fn generic_driver() {
        let sim = Sim::new();
        let mut led = crate::gpio::new(sim.clone()).pa17.into_push_pull_output();
        sim.clear_log();

        drive(&mut led).unwrap();
        assert_eq!(
            &[
                (OutSet::ADDRESS, 1 << 17),
                (OutClr::ADDRESS, 1 << 17),
                (OutSet::ADDRESS, 1 << 17),
            ],
            &sim.writes()[..]
        );
        assert_eq!(Ok(true), hal02::StatefulOutputPin::is_set_high(&led));

        hal02::ToggleableOutputPin::toggle(&mut led).unwrap();
        assert_eq!(Some(&(OutTgl::ADDRESS, 1 << 17)), sim.writes().last());
        assert_eq!(Ok(true), hal02::StatefulOutputPin::is_set_low(&led));
        assert!(!sim.peek::<Out>().is_set(17));
    }

    #[test]
    fn pin_state_conversions() {
        assert_eq!(PinState::High, PinState::from(hal02::PinState::High));
        assert_eq!(hal02::PinState::Low, hal02::PinState::from(PinState::Low));
    }
}
