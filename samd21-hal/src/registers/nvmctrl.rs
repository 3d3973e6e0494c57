//! Non-volatile memory controller, and the factory calibration row.

use bitfield_struct::bitfield;

use super::{impl_register, NVMCTRL, NVM_SW_CALIB};

/// 0x04 Control B.
#[cfg_attr(not(feature = "defmt"), bitfield(u32))]
#[cfg_attr(feature = "defmt", bitfield(u32, defmt = true))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CtrlB {
    __: bool,

    /// Number of flash read wait states.
    ///
    /// At 3.3V, 48MHz needs one.
    #[bits(4)]
    pub rws: u8,
    #[bits(2)]
    __: u8,
    /// Manual write, page writes need an explicit command.
    pub manw: bool,
    /// Power reduction mode during sleep.
    #[bits(2)]
    pub sleepprm: u8,
    #[bits(6)]
    __: u8,
    /// NVMCTRL read mode.
    #[bits(2)]
    pub readmode: u8,
    /// Cache disable.
    pub cachedis: bool,
    #[bits(13)]
    __: u16,
}

impl_register!(CtrlB, u32, NVMCTRL, 0x04);

/// Word 1 of the software calibration row.
///
/// Only the DFLL48M coarse value is described, the rest is ADC and
/// USB trim.
#[cfg_attr(not(feature = "defmt"), bitfield(u32))]
#[cfg_attr(feature = "defmt", bitfield(u32, defmt = true))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SoftwareCalib1 {
    #[bits(26, access = RO)]
    pub other: u32,
    /// DFLL48M coarse calibration value.
    #[bits(6, access = RO)]
    pub dfll48m_coarse: u8,
}

impl_register!(SoftwareCalib1, u32, NVM_SW_CALIB, 0x04);

#[cfg(test)]
mod test {
    use super::*;
    use crate::registers::Register;

    #[test]
    fn addresses() {
        assert_eq!(0x4100_4004, CtrlB::ADDRESS);
        assert_eq!(0x0080_6024, SoftwareCalib1::ADDRESS);
    }

    #[test]
    fn ctrlb_rws() {
        assert_eq!(0x0000_0002, CtrlB::new().with_rws(1).into_bits());
        // reset value has the cache on and zero wait states
        let reset = CtrlB::from_bits(0x0000_0080);
        assert!(reset.manw());
        assert_eq!(1, reset.with_rws(1).rws());
        assert!(reset.with_rws(1).manw());
    }

    #[test]
    fn coarse_field() {
        assert_eq!(0x3f, SoftwareCalib1::from_bits(0xfc00_0000).dfll48m_coarse());
        assert_eq!(0x00, SoftwareCalib1::from_bits(0x03ff_ffff).dfll48m_coarse());
        assert_eq!(0x1d, SoftwareCalib1::from_bits(0x7400_0000).dfll48m_coarse());
    }
}
