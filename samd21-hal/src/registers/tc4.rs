//! Timer/counter 4, seen through its 16-bit counter mode registers.

use bitfield_struct::bitfield;

use super::{impl_register, TC4};

/// Counter width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// 16-bit counter.
    Count16 = 0,
    /// 8-bit counter.
    Count8 = 1,
    /// 32-bit counter, paired with the next TC.
    Count32 = 2,
}

impl Mode {
    pub const fn into_bits(this: Result<Self, u8>) -> u8 {
        match this {
            Ok(v) => v as u8,
            Err(v) => v,
        }
    }

    pub const fn from_bits(v: u8) -> Result<Self, u8> {
        match v {
            0 => Ok(Self::Count16),
            1 => Ok(Self::Count8),
            2 => Ok(Self::Count32),
            _ => Err(v),
        }
    }
}

/// 0x00 Control A.
#[cfg_attr(not(feature = "defmt"), bitfield(u16))]
#[cfg_attr(feature = "defmt", bitfield(u16, defmt = true))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CtrlA {
    /// Software reset.
    pub swrst: bool,
    /// Counter enable.
    pub enable: bool,
    /// Counter width.
    #[bits(2, from = Mode::from_bits, into = Mode::into_bits)]
    pub mode: Result<Mode, u8>,
    __: bool,
    /// Waveform generation.
    #[bits(2)]
    pub wavegen: u8,
    __: bool,
    /// Input clock prescaler, divides by `1 << prescaler` up to 64,
    /// then 256 and 1024.
    #[bits(3)]
    pub prescaler: u8,
    /// Keep running in standby.
    pub runstdby: bool,
    /// What a counter reload or reset is synchronized to.
    #[bits(2)]
    pub prescsync: u8,
    #[bits(2)]
    __: u8,
}

impl_register!(CtrlA, u16, TC4, 0x00);

/// 0x02 Read request.
///
/// Registers in the counter clock domain must be synchronized before
/// they can be read over the bus.
#[cfg_attr(not(feature = "defmt"), bitfield(u16))]
#[cfg_attr(feature = "defmt", bitfield(u16, defmt = true))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReadReq {
    /// Offset of the register to synchronize.
    #[bits(5)]
    pub addr: u8,
    #[bits(9)]
    __: u16,
    /// Keep synchronizing `addr` continuously.
    pub rcont: bool,
    /// Synchronize `addr` once.
    pub rreq: bool,
}

impl_register!(ReadReq, u16, TC4, 0x02);

macro_rules! ctrlb_register {
    ($(($reg:ident, $offset:expr, $doc:literal)),+,) => {
        $(
            #[doc = $doc]
            #[cfg_attr(not(feature = "defmt"), bitfield(u8))]
            #[cfg_attr(feature = "defmt", bitfield(u8, defmt = true))]
            #[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
            pub struct $reg {
                /// Count down instead of up.
                pub dir: bool,
                __: bool,
                /// Stop on the next overflow.
                pub oneshot: bool,
                #[bits(3)]
                __: u8,
                /// Command.
                #[bits(2)]
                pub cmd: u8,
            }

            impl_register!($reg, u8, TC4, $offset);
        )+
    };
}

ctrlb_register! {
    (CtrlBClr, 0x04, "0x04 Control B clear, write ones to clear bits."),
    (CtrlBSet, 0x05, "0x05 Control B set, write ones to set bits."),
}

/// 0x0f Status.
#[cfg_attr(not(feature = "defmt"), bitfield(u8))]
#[cfg_attr(feature = "defmt", bitfield(u8, defmt = true))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Status {
    #[bits(3)]
    __: u8,
    /// Counter is stopped.
    #[bits(1, access = RO)]
    pub stop: bool,
    /// Counter is the slave half of a 32-bit pair.
    #[bits(1, access = RO)]
    pub slave: bool,
    #[bits(2)]
    __: u8,
    /// A write is still being synchronized to the counter clock domain.
    #[bits(1, access = RO)]
    pub syncbusy: bool,
}

impl_register!(Status, u8, TC4, 0x0f);

/// 0x10 Counter value.
#[cfg_attr(not(feature = "defmt"), bitfield(u16))]
#[cfg_attr(feature = "defmt", bitfield(u16, defmt = true))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Count {
    #[bits(16)]
    pub count: u16,
}

impl_register!(Count, u16, TC4, 0x10);

/// Offset of [Count] inside the TC, as used by [ReadReq::addr].
pub const COUNT_OFFSET: u8 = 0x10;

#[cfg(test)]
mod test {
    use super::*;
    use crate::registers::Register;

    #[test]
    fn addresses() {
        assert_eq!(0x4200_3000, CtrlA::ADDRESS);
        assert_eq!(0x4200_3002, ReadReq::ADDRESS);
        assert_eq!(0x4200_3004, CtrlBClr::ADDRESS);
        assert_eq!(0x4200_3005, CtrlBSet::ADDRESS);
        assert_eq!(0x4200_300f, Status::ADDRESS);
        assert_eq!(0x4200_3010, Count::ADDRESS);
        assert_eq!(Count::ADDRESS - TC4, COUNT_OFFSET as u32);
    }

    #[test]
    fn ctrla() {
        let c = CtrlA::new().with_mode(Ok(Mode::Count16)).with_enable(true);
        assert_eq!(0x0002, c.into_bits());
        assert_eq!(Ok(Mode::Count32), CtrlA::from_bits(0x0008).mode());
        assert_eq!(Err(3), CtrlA::from_bits(0x000c).mode());
    }

    #[test]
    fn readreq() {
        let r = ReadReq::new().with_rcont(true).with_addr(COUNT_OFFSET);
        assert_eq!(0x4010, r.into_bits());
    }

    #[test]
    fn status() {
        assert!(Status::from_bits(0x80).syncbusy());
        assert!(Status::from_bits(0x08).stop());
        assert!(!Status::from_bits(0x08).syncbusy());
    }
}
