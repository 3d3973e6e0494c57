//! PORT group 0, the PAxx pins.

use bitfield_struct::bitfield;

use super::{impl_register, RegisterArray, PORT_GROUP0};

// the direction and output registers are one bit per pin, with
// write-one-to-act set/clear/toggle variants next to them
macro_rules! pin_mask_register {
    {$(($reg:ident, $offset:expr, $doc:literal)),+,} => {
        $(
            #[doc = $doc]
            #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
            #[cfg_attr(feature = "defmt", derive(defmt::Format))]
            pub struct $reg(u32);

            impl $reg {
                /// An empty mask.
                #[inline(always)]
                pub const fn new() -> Self {
                    Self(0)
                }

                /// A mask with only pin `n` set.
                #[inline(always)]
                pub const fn pin(n: u8) -> Self {
                    Self(1 << n)
                }

                #[inline(always)]
                pub const fn from_bits(bits: u32) -> Self {
                    Self(bits)
                }

                #[inline(always)]
                pub const fn into_bits(self) -> u32 {
                    self.0
                }

                /// Is pin `n` set?
                #[inline(always)]
                pub const fn is_set(&self, n: u8) -> bool {
                    self.0 & (1 << n) != 0
                }

                /// Set or clear pin `n`.
                #[inline(always)]
                pub const fn with(self, n: u8, value: bool) -> Self {
                    if value {
                        Self(self.0 | (1 << n))
                    } else {
                        Self(self.0 & !(1 << n))
                    }
                }
            }

            impl From<u32> for $reg {
                #[inline(always)]
                fn from(value: u32) -> Self {
                    Self(value)
                }
            }

            impl From<$reg> for u32 {
                #[inline(always)]
                fn from(value: $reg) -> Self {
                    value.0
                }
            }

            impl_register!($reg, u32, PORT_GROUP0, $offset);
        )+
    };
}

pin_mask_register! {
    (Dir, 0x00, "0x00 Data direction, set bits are outputs."),
    (DirClr, 0x04, "0x04 Data direction clear, write ones to make inputs."),
    (DirSet, 0x08, "0x08 Data direction set, write ones to make outputs."),
    (DirTgl, 0x0c, "0x0c Data direction toggle."),
    (Out, 0x10, "0x10 Data output value."),
    (OutClr, 0x14, "0x14 Data output clear, write ones to drive low."),
    (OutSet, 0x18, "0x18 Data output set, write ones to drive high."),
    (OutTgl, 0x1c, "0x1c Data output toggle."),
    (In, 0x20, "0x20 Data input value."),
}

/// 0x28 Write configuration.
///
/// Writes PINCFG and PMUX for up to 16 pins at once, in either the
/// lower or upper half of the group.
#[cfg_attr(not(feature = "defmt"), bitfield(u32))]
#[cfg_attr(feature = "defmt", bitfield(u32, defmt = true))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WrConfig {
    /// Pins to update, relative to the selected half.
    #[bits(16)]
    pub pinmask: u16,
    /// Peripheral multiplexer enable.
    pub pmuxen: bool,
    /// Input enable.
    pub inen: bool,
    /// Pull enable.
    pub pullen: bool,
    #[bits(3)]
    __: u8,
    /// Output driver strength.
    pub drvstr: bool,
    __: bool,
    /// Peripheral function, 0 is A.
    #[bits(4)]
    pub pmux: u8,
    /// Write PMUX.
    pub wrpmux: bool,
    __: bool,
    /// Write PINCFG.
    pub wrpincfg: bool,
    /// Select pins 16-31 instead of 0-15.
    pub hwsel: bool,
}

impl_register!(WrConfig, u32, PORT_GROUP0, 0x28);

/// 0x30 Peripheral multiplexing, one per even/odd pin pair.
#[cfg_attr(not(feature = "defmt"), bitfield(u8))]
#[cfg_attr(feature = "defmt", bitfield(u8, defmt = true))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PMux {
    /// Function of the even pin.
    #[bits(4)]
    pub pmuxe: u8,
    /// Function of the odd pin.
    #[bits(4)]
    pub pmuxo: u8,
}

impl RegisterArray for PMux {
    type Raw = u8;
    const BASE: u32 = PORT_GROUP0 + 0x30;
    const LEN: u8 = 16;
}

/// 0x40 Pin configuration, one per pin.
#[cfg_attr(not(feature = "defmt"), bitfield(u8))]
#[cfg_attr(feature = "defmt", bitfield(u8, defmt = true))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PinCfg {
    /// Hand the pin over to the function selected in [PMux].
    pub pmuxen: bool,
    /// Input enable.
    pub inen: bool,
    /// Pull enable.
    pub pullen: bool,
    #[bits(3)]
    __: u8,
    /// Stronger output driver.
    pub drvstr: bool,
    __: bool,
}

impl RegisterArray for PinCfg {
    type Raw = u8;
    const BASE: u32 = PORT_GROUP0 + 0x40;
    const LEN: u8 = 32;
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::registers::Register;

    #[test]
    fn addresses() {
        assert_eq!(0x4100_4400, Dir::ADDRESS);
        assert_eq!(0x4100_4408, DirSet::ADDRESS);
        assert_eq!(0x4100_4414, OutClr::ADDRESS);
        assert_eq!(0x4100_4418, OutSet::ADDRESS);
        assert_eq!(0x4100_4428, WrConfig::ADDRESS);
        assert_eq!(0x4100_443e, PMux::address(14));
        assert_eq!(0x4100_4451, PinCfg::address(17));
    }

    #[test]
    fn pin_masks() {
        assert_eq!(0x0002_0000, OutSet::pin(17).into_bits());
        let out = Out::new().with(17, true).with(3, true);
        assert!(out.is_set(17));
        assert!(out.is_set(3));
        assert!(!out.with(17, false).is_set(17));
    }

    #[test]
    fn wrconfig_clock_out() {
        let w = WrConfig::new()
            .with_hwsel(true)
            .with_wrpincfg(true)
            .with_wrpmux(true)
            .with_pmux(7)
            .with_pmuxen(true)
            .with_pinmask(1 << (28 - 16));
        assert_eq!(0xd701_1000, w.into_bits());
    }

    #[test]
    fn pincfg_drvstr() {
        assert_eq!(0x40, PinCfg::new().with_drvstr(true).into_bits());
        assert_eq!(0x01, PinCfg::new().with_pmuxen(true).into_bits());
    }
}
