/// A trait for pin mode type states.
pub(super) trait PinModeSealed {
    /// Hand the pin to a peripheral function.
    const PMUXEN: bool;
    /// GPIO direction, 0 is input, 1 is output.
    const DIR: bool;
    /// Peripheral function, only meaningful with PMUXEN.
    const FUNCTION: Function;
}

/// A trait for pin mode type states.
#[allow(private_bounds)]
#[cfg(not(feature = "defmt"))]
pub trait PinMode: PinModeSealed + core::fmt::Debug + Default {}

/// A trait for pin mode type states.
#[allow(private_bounds)]
#[cfg(feature = "defmt")]
pub trait PinMode: PinModeSealed + core::fmt::Debug + defmt::Format + Default {}

/// Peripheral multiplexer functions.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Function {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl Function {
    /// Look up a function by number, wrapping at 8.
    #[inline(always)]
    pub const fn from_bits(v: u8) -> Self {
        match v & 0x7 {
            0 => Self::A,
            1 => Self::B,
            2 => Self::C,
            3 => Self::D,
            4 => Self::E,
            5 => Self::F,
            6 => Self::G,
            _ => Self::H,
        }
    }
}

/// Reset state, input buffer and output driver both off. (type state)
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Disabled;

impl PinMode for Disabled {}

impl PinModeSealed for Disabled {
    const PMUXEN: bool = false;
    const DIR: bool = false;
    const FUNCTION: Function = Function::A;
}

/// Push-pull output. (type state)
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Output;

impl PinMode for Output {}

impl PinModeSealed for Output {
    const PMUXEN: bool = false;
    const DIR: bool = true;
    const FUNCTION: Function = Function::A;
}

/// Connected to peripheral function F, where 0 is A. (type state)
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Alternate<const F: u8>;

impl<const F: u8> PinMode for Alternate<F> {}

impl<const F: u8> PinModeSealed for Alternate<F> {
    const PMUXEN: bool = true;
    const DIR: bool = false;
    const FUNCTION: Function = Function::from_bits(F);
}
