//! Power manager: CPU and bus prescalers, and bus clock masks.

use bitfield_struct::bitfield;

use super::{impl_register, PM};

/// Clock division applied by the CPU and APB prescalers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Prescaler {
    #[default]
    Div1 = 0,
    Div2 = 1,
    Div4 = 2,
    Div8 = 3,
    Div16 = 4,
    Div32 = 5,
    Div64 = 6,
    Div128 = 7,
}

impl Prescaler {
    pub const fn into_bits(self) -> u8 {
        self as u8
    }

    pub const fn from_bits(v: u8) -> Self {
        match v & 0x7 {
            0 => Self::Div1,
            1 => Self::Div2,
            2 => Self::Div4,
            3 => Self::Div8,
            4 => Self::Div16,
            5 => Self::Div32,
            6 => Self::Div64,
            _ => Self::Div128,
        }
    }

    /// The division factor.
    #[inline(always)]
    pub const fn divisor(self) -> u32 {
        1 << (self as u32)
    }
}

macro_rules! prescaler_register {
    ($(($reg:ident, $offset:expr, $field:ident, $doc:literal)),+,) => {
        $(
            #[doc = $doc]
            #[cfg_attr(not(feature = "defmt"), bitfield(u8))]
            #[cfg_attr(feature = "defmt", bitfield(u8, defmt = true))]
            #[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
            pub struct $reg {
                /// Clock division.
                #[bits(3)]
                pub $field: Prescaler,
                #[bits(5)]
                __: u8,
            }

            impl_register!($reg, u8, PM, $offset);
        )+
    };
}

prescaler_register! {
    (CpuSel, 0x08, cpudiv, "0x08 CPU clock select."),
    (ApbASel, 0x09, apbadiv, "0x09 APBA clock select."),
    (ApbBSel, 0x0a, apbbdiv, "0x0a APBB clock select."),
    (ApbCSel, 0x0b, apbcdiv, "0x0b APBC clock select."),
}

/// 0x20 APBC mask, gates the bus interface of each APBC peripheral.
#[cfg_attr(not(feature = "defmt"), bitfield(u32))]
#[cfg_attr(feature = "defmt", bitfield(u32, defmt = true))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApbCMask {
    pub pac2: bool,
    pub evsys: bool,
    pub sercom0: bool,
    pub sercom1: bool,
    pub sercom2: bool,
    pub sercom3: bool,
    pub sercom4: bool,
    pub sercom5: bool,
    pub tcc0: bool,
    pub tcc1: bool,
    pub tcc2: bool,
    pub tc3: bool,
    pub tc4: bool,
    pub tc5: bool,
    pub tc6: bool,
    pub tc7: bool,
    pub adc: bool,
    pub ac: bool,
    pub dac: bool,
    pub ptc: bool,
    pub i2s: bool,
    pub ac1: bool,
    #[bits(10)]
    __: u16,
}

impl_register!(ApbCMask, u32, PM, 0x20);

#[cfg(test)]
mod test {
    use super::*;
    use crate::registers::Register;

    #[test]
    fn addresses() {
        assert_eq!(0x4000_0408, CpuSel::ADDRESS);
        assert_eq!(0x4000_0409, ApbASel::ADDRESS);
        assert_eq!(0x4000_040a, ApbBSel::ADDRESS);
        assert_eq!(0x4000_040b, ApbCSel::ADDRESS);
        assert_eq!(0x4000_0420, ApbCMask::ADDRESS);
    }

    #[test]
    fn prescaler() {
        assert_eq!(0x00, CpuSel::new().with_cpudiv(Prescaler::Div1).into_bits());
        assert_eq!(0x03, ApbBSel::new().with_apbbdiv(Prescaler::Div8).into_bits());
        assert_eq!(Prescaler::Div128, ApbASel::from_bits(0xff).apbadiv());
        assert_eq!(1, Prescaler::Div1.divisor());
        assert_eq!(128, Prescaler::Div128.divisor());
    }

    #[test]
    fn apbcmask() {
        // reset value only has the ADC on
        let reset = ApbCMask::from_bits(0x0001_0000);
        assert!(reset.adc());
        assert!(!reset.tc4());
        assert_eq!(0x0001_1000, reset.with_tc4(true).into_bits());
    }
}
