use crate::bus::Bus;
use crate::registers::nvmctrl::SoftwareCalib1;

/// Bit position of the DFLL48M coarse value in [SoftwareCalib1].
pub const DFLL48M_COARSE_CAL_POS: u32 = 26;

/// Mask of the DFLL48M coarse value in [SoftwareCalib1].
pub const DFLL48M_COARSE_CAL_MASK: u32 = 0x3f << DFLL48M_COARSE_CAL_POS;

/// Extract the DFLL48M coarse calibration from a raw calibration word.
#[inline(always)]
pub const fn dfll48m_coarse(raw: u32) -> u8 {
    ((raw & DFLL48M_COARSE_CAL_MASK) >> DFLL48M_COARSE_CAL_POS) as u8
}

/// Read the factory DFLL48M coarse calibration out of NVM.
#[inline(always)]
pub fn read_dfll48m_coarse<B: Bus>(bus: &B) -> u8 {
    dfll48m_coarse(bus.read::<SoftwareCalib1>().into_bits())
}

#[cfg(test)]
mod test {
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn known_words() {
        assert_eq!(0x00, dfll48m_coarse(0x0000_0000));
        assert_eq!(0x00, dfll48m_coarse(0x03ff_ffff));
        assert_eq!(0x3f, dfll48m_coarse(0xffff_ffff));
        assert_eq!(0x1f, dfll48m_coarse(0x7dff_1234));
    }

    #[quickcheck]
    fn coarse_is_masked_field(raw: u32) -> bool {
        dfll48m_coarse(raw) as u32 == (raw & DFLL48M_COARSE_CAL_MASK) >> DFLL48M_COARSE_CAL_POS
    }

    #[quickcheck]
    fn coarse_matches_register_layout(raw: u32) -> bool {
        dfll48m_coarse(raw) == SoftwareCalib1::from_bits(raw).dfll48m_coarse()
    }

    #[quickcheck]
    fn coarse_fits_dfllval(raw: u32) -> bool {
        // DFLLVAL.COARSE is six bits wide
        dfll48m_coarse(raw) < 64
    }
}
