//! Generic clock controller: generators and peripheral channels.
//!
//! Generators and channels share these registers, and are selected by
//! the `id` field written alongside the configuration.

use bitfield_struct::bitfield;

use super::{impl_register, GCLK};

/// 0x01 Status.
#[cfg_attr(not(feature = "defmt"), bitfield(u8))]
#[cfg_attr(feature = "defmt", bitfield(u8, defmt = true))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Status {
    #[bits(7)]
    __: u8,

    /// A write is still being synchronized to the generic clock domain.
    #[bits(1, access = RO)]
    pub syncbusy: bool,
}

impl_register!(Status, u8, GCLK, 0x01);

/// 0x02 Generic clock channel control.
#[cfg_attr(not(feature = "defmt"), bitfield(u16))]
#[cfg_attr(feature = "defmt", bitfield(u16, defmt = true))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClkCtrl {
    /// Channel to configure, see [Channel].
    #[bits(6)]
    pub id: u8,
    #[bits(2)]
    __: u8,
    /// Generator feeding this channel.
    #[bits(4)]
    pub gen: u8,
    #[bits(2)]
    __: u8,
    /// Channel enable.
    pub clken: bool,
    /// Lock this channel until the next reset.
    pub wrtlock: bool,
}

impl_register!(ClkCtrl, u16, GCLK, 0x02);

/// 0x04 Generic clock generator control.
#[cfg_attr(not(feature = "defmt"), bitfield(u32))]
#[cfg_attr(feature = "defmt", bitfield(u32, defmt = true))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GenCtrl {
    /// Generator to configure.
    #[bits(4)]
    pub id: u8,
    #[bits(4)]
    __: u8,
    /// Clock source.
    #[bits(5, from = Source::from_bits, into = Source::into_bits)]
    pub src: Result<Source, u8>,
    #[bits(3)]
    __: u8,
    /// Generator enable.
    pub genen: bool,
    /// Improve duty cycle to 50/50 on odd divisions.
    pub idc: bool,
    /// Output level of GCLK_IO when the generator is off.
    pub oov: bool,
    /// Output the generator on its GCLK_IO pin.
    pub oe: bool,
    /// Divide by `2^(DIV+1)` instead of `DIV`.
    pub divsel: bool,
    /// Keep running in standby.
    pub runstdby: bool,
    #[bits(10)]
    __: u16,
}

impl_register!(GenCtrl, u32, GCLK, 0x04);

/// 0x08 Generic clock generator division.
#[cfg_attr(not(feature = "defmt"), bitfield(u32))]
#[cfg_attr(feature = "defmt", bitfield(u32, defmt = true))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GenDiv {
    /// Generator to configure.
    #[bits(4)]
    pub id: u8,
    #[bits(4)]
    __: u8,
    /// Division factor. 0 and 1 both mean undivided.
    #[bits(16)]
    pub div: u16,
    #[bits(8)]
    __: u8,
}

impl_register!(GenDiv, u32, GCLK, 0x08);

/// Generator clock sources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Source {
    /// External 0.4-32MHz oscillator.
    Xosc = 0x00,
    /// Generator input pad.
    GclkIn = 0x01,
    /// Output of generator 1.
    GclkGen1 = 0x02,
    /// Internal ultra-low-power 32kHz oscillator.
    OscUlp32k = 0x03,
    /// Internal 32kHz oscillator.
    Osc32k = 0x04,
    /// External 32kHz crystal oscillator.
    Xosc32k = 0x05,
    /// Internal 8MHz oscillator.
    Osc8m = 0x06,
    /// 48MHz digital frequency-locked loop.
    Dfll48m = 0x07,
    /// Fractional digital phase-locked loop.
    Fdpll96m = 0x08,
}

impl Source {
    pub const fn into_bits(this: Result<Self, u8>) -> u8 {
        match this {
            Ok(v) => v as u8,
            Err(v) => v,
        }
    }

    pub const fn from_bits(v: u8) -> Result<Self, u8> {
        match v {
            0x00 => Ok(Self::Xosc),
            0x01 => Ok(Self::GclkIn),
            0x02 => Ok(Self::GclkGen1),
            0x03 => Ok(Self::OscUlp32k),
            0x04 => Ok(Self::Osc32k),
            0x05 => Ok(Self::Xosc32k),
            0x06 => Ok(Self::Osc8m),
            0x07 => Ok(Self::Dfll48m),
            0x08 => Ok(Self::Fdpll96m),
            _ => Err(v),
        }
    }
}

/// Generic clock channels, as written to [ClkCtrl::id].
///
/// Only the channels this crate routes are listed.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Reference input of the DFLL48M.
    Dfll48mRef = 0x00,
    /// Shared by TC4 and TC5.
    Tc4Tc5 = 0x1c,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::registers::Register;

    #[test]
    fn addresses() {
        assert_eq!(0x4000_0c01, Status::ADDRESS);
        assert_eq!(0x4000_0c02, ClkCtrl::ADDRESS);
        assert_eq!(0x4000_0c04, GenCtrl::ADDRESS);
        assert_eq!(0x4000_0c08, GenDiv::ADDRESS);
    }

    #[test]
    fn status() {
        assert!(Status::from_bits(0x80).syncbusy());
        assert!(!Status::from_bits(0x7f).syncbusy());
    }

    #[test]
    fn gendiv() {
        assert_eq!(0x0000_0101, GenDiv::new().with_id(1).with_div(1).into_bits());
        assert_eq!(0x0000_0805, GenDiv::new().with_id(5).with_div(8).into_bits());
    }

    #[test]
    fn genctrl() {
        let gen1 = GenCtrl::new()
            .with_id(1)
            .with_src(Ok(Source::Xosc32k))
            .with_genen(true)
            .with_idc(true);
        assert_eq!(0x0003_0501, gen1.into_bits());

        let gen0 = GenCtrl::new()
            .with_id(0)
            .with_src(Ok(Source::Dfll48m))
            .with_genen(true)
            .with_idc(true)
            .with_oe(true);
        assert_eq!(0x000b_0700, gen0.into_bits());
    }

    #[test]
    fn unknown_source() {
        let g = GenCtrl::from_bits(0x0000_1f00);
        assert_eq!(Err(0x1f), g.src());
        assert_eq!(Ok(Source::Osc8m), g.with_src(Ok(Source::Osc8m)).src());
    }

    #[test]
    fn clkctrl() {
        let dfll_ref = ClkCtrl::new()
            .with_id(Channel::Dfll48mRef as u8)
            .with_gen(1)
            .with_clken(true);
        assert_eq!(0x4100, dfll_ref.into_bits());

        let tc4 = ClkCtrl::new()
            .with_id(Channel::Tc4Tc5 as u8)
            .with_gen(5)
            .with_clken(true);
        assert_eq!(0x451c, tc4.into_bits());
    }
}
