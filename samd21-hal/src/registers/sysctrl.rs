//! System controller: oscillators and the DFLL48M.

use bitfield_struct::bitfield;

use super::{impl_register, SYSCTRL};

/// 0x0c Power and clocks status.
#[cfg_attr(not(feature = "defmt"), bitfield(u32))]
#[cfg_attr(feature = "defmt", bitfield(u32, defmt = true))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pclksr {
    /// XOSC ready.
    pub xoscrdy: bool,
    /// XOSC32K ready.
    pub xosc32krdy: bool,
    /// OSC32K ready.
    pub osc32krdy: bool,
    /// OSC8M ready.
    pub osc8mrdy: bool,
    /// DFLL ready for register access.
    pub dfllrdy: bool,
    /// DFLL out of bounds.
    pub dflloob: bool,
    /// DFLL fine lock.
    pub dflllckf: bool,
    /// DFLL coarse lock.
    pub dflllckc: bool,
    /// DFLL reference clock stopped.
    pub dfllrcs: bool,
    /// BOD33 ready.
    pub bod33rdy: bool,
    /// BOD33 detection.
    pub bod33det: bool,
    /// BOD33 synchronization ready.
    pub b33srdy: bool,
    #[bits(3)]
    __: u8,
    /// DPLL lock rise.
    pub dplllckr: bool,
    /// DPLL lock fall.
    pub dplllckf: bool,
    /// DPLL lock timeout.
    pub dplllto: bool,
    #[bits(14)]
    __: u16,
}

impl_register!(Pclksr, u32, SYSCTRL, 0x0c);

/// 0x14 32kHz external crystal oscillator control.
#[cfg_attr(not(feature = "defmt"), bitfield(u16))]
#[cfg_attr(feature = "defmt", bitfield(u16, defmt = true))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Xosc32k {
    __: bool,

    /// Oscillator enable.
    pub enable: bool,
    /// Crystal connected to XIN32/XOUT32, rather than an external clock.
    pub xtalen: bool,
    /// 32kHz output enable.
    pub en32k: bool,
    /// 1kHz output enable.
    pub en1k: bool,
    /// Automatic amplitude control.
    pub aampen: bool,
    /// Keep running in standby.
    pub runstdby: bool,
    /// Only run when a peripheral requests it.
    pub ondemand: bool,
    /// Start-up time, in powers of two of 32kHz cycles.
    #[bits(3)]
    pub startup: u8,
    __: bool,
    /// Lock this register until the next reset.
    pub wrtlock: bool,
    #[bits(3)]
    __: u8,
}

impl_register!(Xosc32k, u16, SYSCTRL, 0x14);

/// 0x20 8MHz internal oscillator control.
#[cfg_attr(not(feature = "defmt"), bitfield(u32))]
#[cfg_attr(feature = "defmt", bitfield(u32, defmt = true))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Osc8m {
    __: bool,

    /// Oscillator enable.
    pub enable: bool,
    #[bits(4)]
    __: u8,
    /// Keep running in standby.
    pub runstdby: bool,
    /// Only run when a peripheral requests it.
    pub ondemand: bool,
    /// Output prescaler, divides by `1 << presc`.
    #[bits(2)]
    pub presc: u8,
    #[bits(6)]
    __: u8,
    /// Factory frequency and temperature calibration.
    #[bits(12)]
    pub calib: u16,
    #[bits(2)]
    __: u8,
    /// Oscillator frequency range.
    #[bits(2)]
    pub frange: u8,
}

impl_register!(Osc8m, u32, SYSCTRL, 0x20);

/// 0x24 DFLL48M control.
#[cfg_attr(not(feature = "defmt"), bitfield(u16))]
#[cfg_attr(feature = "defmt", bitfield(u16, defmt = true))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DfllCtrl {
    __: bool,

    /// DFLL enable.
    pub enable: bool,
    /// Closed loop mode, locked to the reference clock.
    pub mode: bool,
    /// Stable frequency, stop tracking once fine lock is reached.
    pub stable: bool,
    /// Lose lock after wake.
    pub llaw: bool,
    /// USB clock recovery mode.
    pub usbcrm: bool,
    /// Keep running in standby.
    pub runstdby: bool,
    /// Only run when a peripheral requests it.
    pub ondemand: bool,
    /// Chill cycle disable.
    pub ccdis: bool,
    /// Quick lock disable.
    pub qldis: bool,
    /// Bypass coarse lock.
    pub bplckc: bool,
    /// Keep the output gated until the DFLL has locked.
    pub waitlock: bool,
    #[bits(4)]
    __: u8,
}

impl_register!(DfllCtrl, u16, SYSCTRL, 0x24);

/// 0x28 DFLL48M value.
#[cfg_attr(not(feature = "defmt"), bitfield(u32))]
#[cfg_attr(feature = "defmt", bitfield(u32, defmt = true))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DfllVal {
    /// Fine value.
    #[bits(10)]
    pub fine: u16,
    /// Coarse value.
    #[bits(6)]
    pub coarse: u8,
    /// Multiplication ratio difference, closed loop only.
    #[bits(16, access = RO)]
    pub diff: u16,
}

impl_register!(DfllVal, u32, SYSCTRL, 0x28);

/// 0x2c DFLL48M multiplier.
#[cfg_attr(not(feature = "defmt"), bitfield(u32))]
#[cfg_attr(feature = "defmt", bitfield(u32, defmt = true))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DfllMul {
    /// Ratio of output to reference frequency.
    #[bits(16)]
    pub mul: u16,
    /// Maximum fine step during closed loop lock.
    #[bits(10)]
    pub fstep: u16,
    /// Maximum coarse step during closed loop lock.
    #[bits(6)]
    pub cstep: u8,
}

impl_register!(DfllMul, u32, SYSCTRL, 0x2c);

#[cfg(test)]
mod test {
    use super::*;
    use crate::registers::Register;

    #[test]
    fn addresses() {
        assert_eq!(0x4000_080c, Pclksr::ADDRESS);
        assert_eq!(0x4000_0814, Xosc32k::ADDRESS);
        assert_eq!(0x4000_0820, Osc8m::ADDRESS);
        assert_eq!(0x4000_0824, DfllCtrl::ADDRESS);
        assert_eq!(0x4000_0828, DfllVal::ADDRESS);
        assert_eq!(0x4000_082c, DfllMul::ADDRESS);
    }

    #[test]
    fn pclksr() {
        let p = Pclksr::from_bits(0x0000_0012);
        assert!(p.xosc32krdy());
        assert!(p.dfllrdy());
        assert!(!p.xoscrdy());
        assert!(!p.osc8mrdy());
    }

    #[test]
    fn xosc32k() {
        let x = Xosc32k::new()
            .with_startup(2)
            .with_en32k(true)
            .with_xtalen(true);
        assert_eq!(0x020c, x.into_bits());
        assert_eq!(0x020e, x.with_enable(true).into_bits());
    }

    #[test]
    fn osc8m_reset() {
        let o = Osc8m::from_bits(0x8707_0382);
        assert!(o.enable());
        assert!(o.ondemand());
        assert_eq!(3, o.presc());
        assert_eq!(0x707, o.calib());
        assert_eq!(2, o.frange());

        let o = o.with_presc(0).with_ondemand(false);
        assert_eq!(0x8707_0002, o.into_bits());
    }

    #[test]
    fn dfll() {
        assert_eq!(0x0002, DfllCtrl::new().with_enable(true).into_bits());
        assert_eq!(
            0x0806,
            DfllCtrl::new()
                .with_enable(true)
                .with_mode(true)
                .with_waitlock(true)
                .into_bits()
        );

        let mul = DfllMul::new().with_cstep(31).with_fstep(511).with_mul(1465);
        assert_eq!(0x7dff_05b9, mul.into_bits());

        let val = DfllVal::new().with_coarse(0x3f).with_fine(0x200);
        assert_eq!(0x0000_fe00, val.into_bits());
    }
}
